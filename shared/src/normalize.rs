use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ID_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Projects free text onto a lookup identifier: lower-cased, with everything
/// outside `[a-z0-9]` removed. Lossy and idempotent.
pub fn to_id(text: &str) -> String {
    NON_ID_CHARS.replace_all(&text.to_lowercase(), "").into_owned()
}
