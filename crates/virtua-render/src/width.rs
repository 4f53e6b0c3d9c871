//! Display-width-aware truncation (§4.7 ADDED).
//!
//! Byte or `char` counts both misreport terminal column width for wide
//! (CJK, emoji) text, so every measurement here goes through
//! `unicode_width::UnicodeWidthStr`. Truncation walks grapheme clusters
//! from `unicode-segmentation` rather than `char`s so a cut point never
//! lands inside a multi-codepoint cluster.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal column width of `s`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` display columns, appending
/// `ellipsis` when truncation occurs. Never splits a grapheme cluster.
///
/// If `ellipsis` itself doesn't fit in `max_width`, falls back to a bare
/// grapheme-respecting cut with no ellipsis appended.
pub fn truncate_to_width(s: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let ellipsis_width = display_width(ellipsis);
    let budget = if ellipsis_width >= max_width {
        max_width
    } else {
        max_width - ellipsis_width
    };

    let mut out = String::new();
    let mut used = 0usize;
    for grapheme in s.graphemes(true) {
        let w = display_width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }

    if ellipsis_width < max_width {
        out.push_str(ellipsis);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_to_width("hi", 10, "…"), "hi");
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6, "…"), "hello…");
    }

    #[test]
    fn never_splits_a_wide_grapheme() {
        // Each CJK character is 2 columns wide; a budget of 3 only fits one
        // plus the ellipsis, not a partial character.
        let truncated = truncate_to_width("漢字漢字", 3, "…");
        assert_eq!(truncated, "漢…");
        assert!(display_width(&truncated) <= 3);
    }

    #[test]
    fn ellipsis_too_wide_for_budget_falls_back_to_bare_cut() {
        let truncated = truncate_to_width("ab", 1, "…");
        assert_eq!(truncated, "a");
    }

    #[test]
    fn zero_width_truncates_to_empty() {
        assert_eq!(truncate_to_width("anything", 0, "…"), "");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Truncation must never hand back more display columns than the
        /// budget it was given, no matter what text (including wide CJK
        /// graphemes) or width is thrown at it.
        #[test]
        fn truncate_never_exceeds_budget(
            s in "[ -~]{0,40}|[\u{4e00}-\u{9fff}]{0,20}",
            max_width in 0usize..40,
        ) {
            let truncated = truncate_to_width(&s, max_width, "…");
            prop_assert!(display_width(&truncated) <= max_width);
        }

        /// A string already within budget passes through untouched.
        #[test]
        fn truncate_is_a_no_op_under_budget(s in "[ -~]{0,20}") {
            let width = display_width(&s);
            let truncated = truncate_to_width(&s, width, "…");
            prop_assert_eq!(truncated, s);
        }
    }
}
