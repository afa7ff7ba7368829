//! Regex-based cleaning of extracted contract text.
//!
//! Cleaning runs in a fixed order, each step on the previous step's output:
//!
//! 1. carriage returns and newlines become spaces
//! 2. whitespace runs collapse to one space
//! 3. `Page <n> of <m>` markers are removed
//! 4. `CONFIDENTIAL`, `DRAFT` and `EXHIBIT <letter>` are removed
//! 5. leading and trailing whitespace is trimmed
//!
//! Steps 3 and 4 match case-insensitively and without word boundaries, so a
//! removed token leaves its surrounding spaces behind. Unless
//! [`CleanOptions::collapse_after_strip`] is set, those double spaces are kept.
//!
//! Whitespace means Unicode whitespace plus the ASCII separators U+001C to
//! U+001F, which some PDF text layers emit between records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

static PAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Page \d+ of \d+").unwrap());

static BOILERPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CONFIDENTIAL|DRAFT|EXHIBIT [A-Z]").unwrap());

/// Options for [`TextCleaner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Collapse whitespace again after boilerplate removal
    #[serde(default)]
    pub collapse_after_strip: bool,
}

/// Text normalizer for extracted contract text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner {
    options: CleanOptions,
}

impl TextCleaner {
    /// Create a cleaner with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cleaner with the given options.
    #[must_use]
    pub fn with_options(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> CleanOptions {
        self.options
    }

    /// Clean a text. Never fails.
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        let text = text.replace(['\r', '\n'], " ");
        let text = WHITESPACE_RUN.replace_all(&text, " ");
        let text = PAGE_MARKER.replace_all(&text, "");
        let text = BOILERPLATE.replace_all(&text, "");

        if self.options.collapse_after_strip {
            WHITESPACE_RUN.replace_all(&text, " ").trim_matches(is_space).to_string()
        } else {
            text.trim_matches(is_space).to_string()
        }
    }
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1C'..='\x1F').contains(&c)
}

/// Clean a text with default options.
#[must_use]
pub fn clean(text: &str) -> String {
    TextCleaner::new().clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "CONFIDENTIAL\nThis is a draft document.\nPage 2 of 3\n",
        "Section 1.\r\n\r\nThe  Licensee shall\tpay the fee.",
        "See EXHIBIT B attached hereto. Page 10 of 12",
        "Plain text with no boilerplate at all.",
    ];

    fn relaxed() -> TextCleaner {
        TextCleaner::with_options(CleanOptions {
            collapse_after_strip: true,
        })
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("  \n\r\t "), "");
    }

    #[test]
    fn test_newlines_become_spaces() {
        assert_eq!(clean("first line\nsecond line\r\nthird"), "first line second line third");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(clean("a  \t b\u{00A0}\u{00A0}c"), "a b c");
    }

    #[test]
    fn test_ascii_separators_are_whitespace() {
        assert_eq!(clean("\x1Ca\x1Cb\x1F\x1D"), "a b");
        assert_eq!(clean("Term\x1E\x1E ends"), "Term ends");
        assert_eq!(relaxed().clean("x\x1FDRAFT\x1Fy"), "x y");
    }

    #[test]
    fn test_boilerplate_removal() {
        let cleaned = clean("CONFIDENTIAL\nThis is a draft document.\nPage 2 of 3\n");
        assert!(!cleaned.to_uppercase().contains("CONFIDENTIAL"));
        assert!(!cleaned.to_uppercase().contains("PAGE 2 OF 3"));
    }

    #[test]
    fn test_removed_tokens_leave_double_space() {
        let cleaned = clean("CONFIDENTIAL\nThis is a draft document.\nPage 2 of 3\n");
        assert_eq!(cleaned, "This is a  document.");
    }

    #[test]
    fn test_collapse_after_strip() {
        let cleaned = relaxed().clean("CONFIDENTIAL\nThis is a draft document.\nPage 2 of 3\n");
        assert_eq!(cleaned, "This is a document.");
    }

    #[test]
    fn test_page_marker_case_insensitive() {
        assert_eq!(clean("end of clause PAGE 7 OF 20 next"), "end of clause  next");
        assert_eq!(clean("page 1 of 1"), "");
    }

    #[test]
    fn test_page_marker_requires_digits() {
        assert_eq!(clean("Page one of two"), "Page one of two");
    }

    #[test]
    fn test_exhibit_letter_removed() {
        assert_eq!(clean("as set out in Exhibit C."), "as set out in .");
        assert_eq!(clean("Exhibit 4 applies"), "Exhibit 4 applies");
    }

    #[test]
    fn test_patterns_match_inside_words() {
        // No word boundaries: "confidentiality" loses its prefix.
        assert_eq!(clean("confidentiality obligations"), "ity obligations");
        assert_eq!(clean("redrafted"), "reed");
    }

    #[test]
    fn test_default_options() {
        let cleaner = TextCleaner::new();
        assert!(!cleaner.options().collapse_after_strip);
    }

    #[test]
    fn test_free_function_matches_default_cleaner() {
        for sample in SAMPLES {
            assert_eq!(clean(sample), TextCleaner::new().clean(sample));
        }
    }

    #[test]
    fn test_idempotent_when_collapsing() {
        let cleaner = relaxed();
        for sample in SAMPLES {
            let once = cleaner.clean(sample);
            assert_eq!(cleaner.clean(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn test_idempotent_up_to_whitespace_by_default() {
        for sample in SAMPLES {
            let once = clean(sample);
            let twice = clean(&once);
            let normalized = WHITESPACE_RUN.replace_all(&once, " ").to_string();
            assert_eq!(twice, normalized, "input: {sample:?}");
        }
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(clean("Lieferant:\nMüller GmbH, Zürich"), "Lieferant: Müller GmbH, Zürich");
    }
}
