//! Language tokens with optional `(proficiency)` parentheticals.

use crate::records::LanguageDraft;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_LANGUAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*\(([^)]*)\)\s*$").unwrap());

/// Extract language entries from the languages section body.
///
/// The section is split on commas and newlines; each token either
/// matches `name (proficiency)` or becomes a language with empty
/// proficiency.
pub fn extract_languages(text: &str) -> Vec<LanguageDraft> {
    text.split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match RE_LANGUAGE.captures(token) {
            Some(caps) => LanguageDraft {
                name: caps[1].trim().to_string(),
                proficiency: caps[2].trim().to_string(),
            },
            None => LanguageDraft {
                name: token.to_string(),
                proficiency: String::new(),
            },
        })
        .collect()
}
