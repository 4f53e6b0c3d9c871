//! Cell constraint application (§4.8): pad/truncate a formatted cell to
//! its column's display-width budget, ANSI escapes preserved.

use crate::ansi;
use virtua_render::Alignment;

pub fn constrain_cell(text: &str, width: u16, alignment: Alignment) -> String {
    let width = width as usize;
    let truncated = ansi::truncate_ansi_aware(text, width);
    pad(&truncated, width, alignment)
}

fn pad(s: &str, width: usize, alignment: Alignment) -> String {
    let current = ansi::display_width(s);
    if current >= width {
        return s.to_string();
    }
    let missing = width - current;
    match alignment {
        Alignment::Left => format!("{s}{}", " ".repeat(missing)),
        Alignment::Right => format!("{}{s}", " ".repeat(missing)),
        Alignment::Center => {
            let left = missing / 2;
            let right = missing - left;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(right))
        }
    }
}

/// Drops `offset` leading display columns from `s`, for horizontal
/// scroll (§4.8). Grapheme-aware; does not attempt to preserve ANSI
/// escapes that precede the drop point, since a scrolled-past style run
/// has nothing left in view to style.
pub fn drop_leading_columns(s: &str, offset: usize) -> String {
    if offset == 0 {
        return s.to_string();
    }
    use unicode_segmentation::UnicodeSegmentation;
    let mut used = 0usize;
    let mut start_byte = s.len();
    for (byte_idx, grapheme) in s.grapheme_indices(true) {
        if used >= offset {
            start_byte = byte_idx;
            break;
        }
        used += virtua_render::width::display_width(grapheme);
    }
    if used < offset {
        return String::new();
    }
    s[start_byte..].to_string()
}
