use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Practical email shape rather than the full RFC grammar: one `@`, no
/// whitespace, and at least one dot in the domain part.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Trims `value` and returns it, or an `EmptyField` error naming `field` when
/// nothing but whitespace is left.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims every element of `values` and returns them. The first element that
/// trims to empty fails the whole array with its index; an empty array is
/// fine.
pub fn require_non_empty_items(
    field: &'static str,
    values: Vec<String>,
) -> Result<Vec<String>, ValidationError> {
    let mut trimmed = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let item = value.trim().to_string();
        if item.is_empty() {
            return Err(ValidationError::InvalidArrayElement { field, index });
        }
        trimmed.push(item);
    }
    Ok(trimmed)
}

/// Trims `raw` and returns it when it looks like an email address.
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidEmail(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty("title", "  Rust Meetup  ").unwrap(), "Rust Meetup");
    }

    #[test]
    fn test_require_non_empty_rejects_blank() {
        for value in ["", "   ", "\t\n"] {
            assert_eq!(
                require_non_empty("venue", value),
                Err(ValidationError::EmptyField("venue"))
            );
        }
    }

    #[test]
    fn test_require_non_empty_items_trims_each() {
        let items = vec!["Talk".to_string(), " Lunch ".to_string()];
        assert_eq!(
            require_non_empty_items("agenda", items).unwrap(),
            vec!["Talk".to_string(), "Lunch".to_string()]
        );
    }

    #[test]
    fn test_require_non_empty_items_reports_first_bad_index() {
        let items = vec!["Talk".to_string(), "  ".to_string(), String::new()];
        assert_eq!(
            require_non_empty_items("agenda", items),
            Err(ValidationError::InvalidArrayElement {
                field: "agenda",
                index: 1
            })
        );
    }

    #[test]
    fn test_require_non_empty_items_allows_empty_array() {
        assert_eq!(require_non_empty_items("tags", vec![]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_validate_email_accepts_plausible_addresses() {
        assert_eq!(validate_email("ada@example.com").unwrap(), "ada@example.com");
        assert_eq!(validate_email("  a.b+c@mail.co.uk ").unwrap(), "a.b+c@mail.co.uk");
    }

    #[test]
    fn test_validate_email_rejects_malformed_addresses() {
        for value in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@nodot",
            "user name@example.com",
            "user@@example.com",
        ] {
            assert!(validate_email(value).is_err(), "value: {:?}", value);
        }
    }
}
