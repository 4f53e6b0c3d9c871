//! ANSI-aware cell truncation (§4.8: "ANSI style escape sequences must
//! be preserved across truncation... the truncator operates on display
//! cells, not bytes").
//!
//! The teacher never formats ANSI-embedded strings, so this logic is new;
//! it's grounded in the split-then-measure technique `strip-ansi-escapes`
//! uses to separate escape sequences from visible text (an `Alb-O-xeno`
//! workspace dependency) — but since a cell must *keep* its escapes
//! rather than strip them, this module re-emits them verbatim instead of
//! dropping them.

use unicode_segmentation::UnicodeSegmentation;
use virtua_render::alignment::DEFAULT_ELLIPSIS;
use virtua_render::width;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Escape(String),
}

/// Splits `s` into alternating text/escape-sequence runs. An escape run
/// starts at `ESC` and, for CSI (`ESC [ ... final`) sequences, ends at
/// the first byte in the `0x40..=0x7E` final-byte range; any other byte
/// following `ESC` is treated as a single-character escape run.
fn split_segments(s: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();
    let mut text_buf = String::new();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            text_buf.push(c);
            continue;
        }
        if !text_buf.is_empty() {
            out.push(Segment::Text(std::mem::take(&mut text_buf)));
        }
        let mut escape = String::from(c);
        if chars.peek() == Some(&'[') {
            escape.push(chars.next().unwrap());
            for nc in chars.by_ref() {
                escape.push(nc);
                if (0x40..=0x7e).contains(&(nc as u32)) {
                    break;
                }
            }
        }
        out.push(Segment::Escape(escape));
    }
    if !text_buf.is_empty() {
        out.push(Segment::Text(text_buf));
    }
    out
}

/// Display width of just the visible text runs, ignoring escapes.
pub fn display_width(s: &str) -> usize {
    split_segments(s)
        .iter()
        .filter_map(|seg| match seg {
            Segment::Text(t) => Some(width::display_width(t)),
            Segment::Escape(_) => None,
        })
        .sum()
}

/// Truncates the visible text of `s` to `max_width` display columns,
/// appending an ellipsis when truncation occurs, while copying every
/// escape sequence through untouched — including ones that trail the cut
/// point, so a closing reset code is never dropped.
pub fn truncate_ansi_aware(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let ellipsis_width = width::display_width(DEFAULT_ELLIPSIS);
    let budget = max_width.saturating_sub(ellipsis_width);

    let mut out = String::new();
    let mut used = 0usize;
    let mut cut = false;

    for segment in split_segments(s) {
        match segment {
            Segment::Escape(code) => out.push_str(&code),
            Segment::Text(text) => {
                if cut {
                    continue;
                }
                for grapheme in text.graphemes(true) {
                    let w = width::display_width(grapheme);
                    if used + w > budget {
                        out.push_str(DEFAULT_ELLIPSIS);
                        cut = true;
                        break;
                    }
                    out.push_str(grapheme);
                    used += w;
                }
            }
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Whatever style escapes surround the visible text, the truncated
        /// cell's *visible* width (escapes excluded) never exceeds the
        /// requested budget (§4.8 "ANSI style escape sequences must be
        /// preserved across truncation").
        #[test]
        fn ansi_truncate_never_exceeds_visible_budget(
            prefix in "(\\x1b\\[[0-9]{1,2}m){0,2}",
            text in "[ -~]{0,30}",
            suffix in "(\\x1b\\[0m){0,1}",
            max_width in 0usize..30,
        ) {
            let styled = format!("{prefix}{text}{suffix}");
            let truncated = truncate_ansi_aware(&styled, max_width);
            prop_assert!(display_width(&truncated) <= max_width);
        }
    }
}
