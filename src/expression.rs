//! Placeholder resolution against work item attributes
//!
//! Two forms are understood:
//! - `${name}` resolves to the attribute value, or to an empty string when
//!   the attribute is missing
//! - `{name}` resolves to the attribute value, and is left verbatim when the
//!   attribute is missing so plain JSON braces pass through untouched

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::models::Attributes;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"(\$)?\{([A-Za-z0-9_.\-]+)\}").unwrap())
}

/// Substitutes every placeholder in `template` with values from `attributes`
pub fn evaluate(template: &str, attributes: &Attributes) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[2];
            match (attributes.get(name), caps.get(1)) {
                (Some(value), _) => value.clone(),
                (None, Some(_)) => String::new(),
                (None, None) => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_short_form() {
        let out = evaluate("https://example.test/{id}", &attrs(&[("id", "42")]));
        assert_eq!(out, "https://example.test/42");
    }

    #[test]
    fn test_expression_form() {
        let out = evaluate(r#"{"user":"${user.name}"}"#, &attrs(&[("user.name", "ada")]));
        assert_eq!(out, r#"{"user":"ada"}"#);
    }

    #[test]
    fn test_missing_expression_resolves_empty() {
        let out = evaluate("a${missing}b", &Attributes::new());
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_missing_short_form_left_verbatim() {
        let out = evaluate("/items/{missing}", &Attributes::new());
        assert_eq!(out, "/items/{missing}");
    }

    #[test]
    fn test_json_braces_untouched() {
        let template = r#"{"x":1,"nested":{"y":[1,2]}}"#;
        assert_eq!(evaluate(template, &attrs(&[("x", "9")])), template);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = evaluate("{a}", &attrs(&[("a", "{b}"), ("b", "nope")]));
        assert_eq!(out, "{b}");
    }
}
