use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex"));

/// Derives a URL-safe slug from an event title.
///
/// The title is lowercased, every character other than ascii letters, digits,
/// whitespace and hyphens is stripped, and the remaining runs of whitespace
/// and hyphens collapse into single hyphens. Punctuation inside a word is
/// removed rather than hyphenated, so "Rock & Roll!" becomes "rock-roll" and
/// "a!b" becomes "ab". A title with no letters or digits yields an empty
/// string; callers decide whether that is an error.
pub fn generate_slug(title: &str) -> String {
    let lowered: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    lowered
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Reports whether `value` already has canonical slug shape: one or more
/// lowercase ascii alphanumeric segments separated by single hyphens, with no
/// leading or trailing hyphen.
pub fn is_valid_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}
