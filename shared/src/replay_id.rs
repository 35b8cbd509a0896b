use crate::error::{Result, SharedError};

const PASSWORD_SUFFIX: &str = "pw";

/// A replay identifier split into the store id and the optional password
/// of a private replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayId {
    pub id: String,
    pub password: Option<String>,
}

/// Parses the `{replayId}` path segment.
///
/// Private replays are addressed as `<baseId>-<password>pw`. The split happens
/// at the last dash, so a base id may contain dashes but a password may not:
/// a dash inside the password moves its head into the id.
pub fn parse_replay_id(raw: &str) -> Result<ReplayId> {
    if raw.is_empty() {
        return Err(SharedError::MissingField("replay id".to_string()));
    }

    if let Some(stripped) = raw.strip_suffix(PASSWORD_SUFFIX) {
        if let Some((id, password)) = stripped.rsplit_once('-') {
            return Ok(ReplayId {
                id: id.to_string(),
                password: Some(password.to_string()),
            });
        }
    }

    Ok(ReplayId {
        id: raw.to_string(),
        password: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("abc123-xyz-secretpw", "abc123-xyz", Some("secret") ; "password with dashed base id")]
    #[test_case("plainid", "plainid", None ; "plain id")]
    #[test_case("gen9ou-2001", "gen9ou-2001", None ; "public replay")]
    #[test_case("gen9ou-2001-pw", "gen9ou-2001", Some("") ; "empty password")]
    #[test_case("bypw", "bypw", None ; "suffix without dash")]
    #[test_case("gen9ou-1-pass-wordpw", "gen9ou-1-pass", Some("word") ; "dash in password is misattributed")]
    fn test_parse_replay_id(raw: &str, id: &str, password: Option<&str>) {
        let parsed = parse_replay_id(raw).unwrap();
        assert_eq!(parsed.id, id);
        assert_eq!(parsed.password.as_deref(), password);
    }

    #[test]
    fn test_empty_replay_id_is_rejected() {
        assert_eq!(
            parse_replay_id(""),
            Err(SharedError::MissingField("replay id".to_string()))
        );
    }
}
