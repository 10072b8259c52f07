/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Looks up `name` with `lookup`, treating blank values as unset.
pub fn non_empty_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_style_booleans() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn blank_vars_are_unset() {
        let lookup = |name: &str| match name {
            "BLANK" => Some("   ".to_string()),
            "SET" => Some(" value ".to_string()),
            _ => None,
        };
        assert_eq!(non_empty_var(&lookup, "BLANK"), None);
        assert_eq!(non_empty_var(&lookup, "SET").as_deref(), Some("value"));
        assert_eq!(non_empty_var(&lookup, "MISSING"), None);
    }
}
