//! Guessing which character a glyph file draws from its file name.
//!
//! Glyph sets are expected to follow a few naming conventions:
//!
//! - `a.svg`, `a_2.svg`, `a12.svg`: the lowercase form of the first character
//! - `UP_a.svg`, `up_A_3.svg`: the uppercase form of the fourth character
//! - `dot.svg`, `slash_2.svg`, ...: a named punctuation or symbol character,
//!   see [`MARK_NAMES`]
use crate::category::is_letter;
use regex::{Regex, RegexBuilder};
use std::path::Path;
use std::sync::LazyLock;

/// Names used in file names for characters which can't appear in one
pub const MARK_NAMES: [(&str, char); 12] = [
    ("asterisk", '*'),
    ("backslash", '\\'),
    ("caret", '^'),
    ("colon", ':'),
    ("dot", '.'),
    ("greater", '>'),
    ("less", '<'),
    ("question", '?'),
    ("quotes", '"'),
    ("semicolon", ';'),
    ("slash", '/'),
    ("vertical", '|'),
];

#[allow(clippy::expect_used)]
fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("glyph file name pattern should compile")
}

static SINGLE_CHARACTER: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"^._?[0-9]*\.svg"));
static UPPER_CASE: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"^UP_._?[0-9]*\.svg"));
static MARKS: LazyLock<Vec<(Regex, char)>> = LazyLock::new(|| {
    MARK_NAMES
        .iter()
        .map(|(name, c)| (case_insensitive(&format!(r"^{}_?[0-9]*\.svg", name)), *c))
        .collect()
});

/// Returns the character a glyph file is named after, or `None` if the name
/// follows none of the conventions. Any directory part of `file_name` is
/// ignored.
pub fn character_for_file_name(file_name: &str) -> Option<char> {
    let file_name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);
    let mut symbol = None;

    if SINGLE_CHARACTER.is_match(file_name) {
        symbol = file_name.chars().next().and_then(|c| c.to_lowercase().next());
    }

    if UPPER_CASE.is_match(file_name) {
        if let Some(fourth) = file_name.chars().nth(3).filter(|c| is_letter(*c)) {
            symbol = fourth.to_uppercase().next();
        }
    }

    let lowered = file_name.to_lowercase();
    if let Some((_, c)) = MARKS.iter().find(|(pattern, _)| pattern.is_match(&lowered)) {
        symbol = Some(*c);
    }

    symbol
}
