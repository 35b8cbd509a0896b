use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A query parameter that may have been given once or several times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The single value, or the first of many.
    pub fn first_or_self(self) -> Option<T> {
        first_or_self(self)
    }

    fn push(self, value: T) -> Self {
        match self {
            OneOrMany::One(first) => OneOrMany::Many(vec![first, value]),
            OneOrMany::Many(mut values) => {
                values.push(value);
                OneOrMany::Many(values)
            }
        }
    }
}

pub fn first_or_self<T>(value: OneOrMany<T>) -> Option<T> {
    match value {
        OneOrMany::One(value) => Some(value),
        OneOrMany::Many(values) => values.into_iter().next(),
    }
}

/// Groups decoded `key=value` pairs by key, keeping repeats in request order.
pub fn group_pairs<I>(pairs: I) -> HashMap<String, OneOrMany<String>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut grouped: HashMap<String, OneOrMany<String>> = HashMap::new();
    for (key, value) in pairs {
        let entry = match grouped.remove(&key) {
            Some(existing) => existing.push(value),
            None => OneOrMany::One(value),
        };
        grouped.insert(key, entry);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_first_or_self() {
        assert_eq!(first_or_self(OneOrMany::One(7)), Some(7));
        assert_eq!(first_or_self(OneOrMany::Many(vec![1, 2, 3])), Some(1));
        assert_eq!(first_or_self(OneOrMany::<u8>::Many(vec![])), None);
    }

    #[test]
    fn test_group_pairs_collapses_repeats() {
        let grouped = group_pairs(vec![
            pair("format", "gen9ou"),
            pair("page", "2"),
            pair("format", "gen8ou"),
        ]);

        assert_eq!(
            grouped.get("format"),
            Some(&OneOrMany::Many(vec!["gen9ou".to_string(), "gen8ou".to_string()]))
        );
        assert_eq!(grouped.get("page"), Some(&OneOrMany::One("2".to_string())));
        assert_eq!(
            grouped.get("format").cloned().and_then(OneOrMany::first_or_self),
            Some("gen9ou".to_string())
        );
    }
}
