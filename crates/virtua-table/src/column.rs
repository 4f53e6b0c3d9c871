//! Column model (§4.8): per-column title, field key, width, alignment,
//! and optional formatters.

use virtua_render::{Alignment, ContentFormatter};

/// A header formatter: `(column) -> string`, parallel to a cell
/// formatter but with no row to inspect.
pub type HeaderFormatter<T> = Box<dyn Fn(&Column<T>) -> String + Send + Sync>;

pub struct Column<T> {
    pub field: String,
    pub title: String,
    pub width: u16,
    pub alignment: Alignment,
    pub header_alignment: Alignment,
    pub header_constraint: Option<u16>,
    pub cell_formatter: Option<ContentFormatter<T>>,
    pub header_formatter: Option<HeaderFormatter<T>>,
}

impl<T> Column<T> {
    pub fn new(field: impl Into<String>, title: impl Into<String>, width: u16) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            width,
            alignment: Alignment::Left,
            header_alignment: Alignment::Left,
            header_constraint: None,
            cell_formatter: None,
            header_formatter: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_header_alignment(mut self, alignment: Alignment) -> Self {
        self.header_alignment = alignment;
        self
    }

    /// An independent width budget for the header cell, when it must
    /// truncate differently than the body cells (§4.8 "optional
    /// per-column `headerConstraint`").
    pub fn with_header_constraint(mut self, width: u16) -> Self {
        self.header_constraint = Some(width);
        self
    }

    pub fn with_cell_formatter(mut self, formatter: ContentFormatter<T>) -> Self {
        self.cell_formatter = Some(formatter);
        self
    }

    pub fn with_header_formatter(mut self, formatter: HeaderFormatter<T>) -> Self {
        self.header_formatter = Some(formatter);
        self
    }

    /// The header cell's own width budget, falling back to the column
    /// width when no `headerConstraint` was set.
    pub fn header_width(&self) -> u16 {
        self.header_constraint.unwrap_or(self.width)
    }

    pub fn render_header(&self) -> String {
        match &self.header_formatter {
            Some(f) => f(self),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_width_falls_back_to_column_width() {
        let column = Column::<i32>::new("name", "Name", 12);
        assert_eq!(column.header_width(), 12);
    }

    #[test]
    fn header_constraint_overrides_header_width() {
        let column = Column::<i32>::new("name", "Name", 12).with_header_constraint(4);
        assert_eq!(column.header_width(), 4);
    }

    #[test]
    fn default_header_render_uses_the_title() {
        let column = Column::<i32>::new("name", "Name", 12);
        assert_eq!(column.render_header(), "Name");
    }

    #[test]
    fn custom_header_formatter_is_used_when_set() {
        let column = Column::<i32>::new("name", "Name", 12)
            .with_header_formatter(Box::new(|c| format!("[{}]", c.title)));
        assert_eq!(column.render_header(), "[Name]");
    }
}
