//! Built-in enumerators (§4.7): `none`, `arabic`, `bullet`, `checkbox`.

use crate::component::EnumeratorFn;

/// Produces no text; the slot is present for layout symmetry but emits
/// nothing.
pub fn none<T: 'static>() -> EnumeratorFn<T> {
    Box::new(|_row, _index, _ctx| String::new())
}

/// `"1. "`, `"2. "`, … right-aligned within the digit width implied by
/// `max_index` (the largest index the enumerator will ever be asked to
/// render), so the column doesn't reflow as the cursor passes 9, 99, …
pub fn arabic<T: 'static>(max_index: usize) -> EnumeratorFn<T> {
    let digits = (max_index + 1).to_string().len();
    Box::new(move |_row, index, _ctx| format!("{:>width$}. ", index + 1, width = digits))
}

pub fn bullet<T: 'static>() -> EnumeratorFn<T> {
    Box::new(|_row, _index, _ctx| "• ".to_string())
}

/// `"☑ "` when `row.selected`, else `"☐ "`.
pub fn checkbox<T: 'static>() -> EnumeratorFn<T> {
    Box::new(|row, _index, _ctx| if row.selected { "☑ ".to_string() } else { "☐ ".to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::RenderContext;
    use virtua_model::{Row, RowId, ViewportConfig};

    fn ctx(config: &ViewportConfig) -> RenderContext<'_> {
        RenderContext {
            config,
            total: None,
        }
    }

    #[test]
    fn arabic_right_aligns_within_fixed_width() {
        let config = ViewportConfig::new(10, 0, 9, 10).unwrap();
        let f = arabic::<&str>(123);
        let row = Row::new(RowId::from("r1"), "x");
        assert_eq!(f(&row, 0, &ctx(&config)), "  1. ");
        assert_eq!(f(&row, 98, &ctx(&config)), " 99. ");
    }

    #[test]
    fn checkbox_reflects_selection() {
        let config = ViewportConfig::new(10, 0, 9, 10).unwrap();
        let f = checkbox::<&str>();
        let selected = Row::new(RowId::from("r1"), "x").with_selected(true);
        let unselected = Row::new(RowId::from("r2"), "x");
        assert_eq!(f(&selected, 0, &ctx(&config)), "☑ ");
        assert_eq!(f(&unselected, 0, &ctx(&config)), "☐ ");
    }
}
