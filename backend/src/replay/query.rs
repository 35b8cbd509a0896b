use shared::query::{group_pairs, OneOrMany};
use shared::SearchParams;

/// Builds store search parameters from the raw `search.json` query string.
///
/// Repeated keys collapse to their first value and empty values count as
/// absent. `rating` is a flag: any value turns it on.
pub fn search_params_from_query(query_string: &str) -> SearchParams {
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query_string) {
        Ok(pairs) => pairs,
        Err(e) => {
            log::warn!("Ignoring undecodable search query '{}': {}", query_string, e);
            Vec::new()
        }
    };
    let mut grouped = group_pairs(pairs);
    let mut take = |key: &str| {
        grouped
            .remove(key)
            .and_then(OneOrMany::first_or_self)
            .filter(|value| !value.is_empty())
    };

    let params = SearchParams {
        page: take("page").map(|page| parse_int_prefix(&page).unwrap_or(0)),
        rating: take("rating").map(|_| true),
        format: take("format"),
        username: take("username"),
        username2: take("username2"),
        order: take("order"),
    };
    log::debug!("Search parameters from query: {:?}", params);
    params
}

/// Reads the leading integer of `value` ("12abc" is 12), `None` when there
/// are no digits to read.
fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
