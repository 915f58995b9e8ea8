//! Footnote cleanup for translation text.
//!
//! Upstream translation entries embed footnote markers as `<sup>` spans,
//! e.g. `In the name of Allah<sup foot_note=76373>1</sup>`. The front-end
//! renders plain text, so the markers are stripped before the response goes
//! out.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::VersesResponse;

// (?s) so a marker split across newlines is still caught.
static SUP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<sup[^>]*>.*?</sup>").unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip footnote markers, collapse whitespace runs to a single space, trim.
pub fn clean_translation_text(raw: &str) -> String {
    let stripped = SUP_REGEX.replace_all(raw, "");
    WHITESPACE_REGEX.replace_all(&stripped, " ").trim().to_string()
}

/// Clean every translation entry of a verse-list response in place.
pub fn clean_verses(response: &mut VersesResponse) {
    for verse in &mut response.verses {
        for translation in &mut verse.translations {
            translation.text = clean_translation_text(&translation.text);
        }
    }
}
