//! Row wrapper (§3 C1).

use crate::ids::RowId;
use crate::meta::{ErrorValue, MetaMap};

/// Wraps a host-owned item with the flags and identity the engine needs to
/// track across async chunk reloads.
///
/// Invariant: `id` is stable for the lifetime of the logical row it names;
/// `selected` is always a read-through of the data source's authoritative
/// map as observed when the chunk containing this row was last answered —
/// the engine never mutates `selected` itself (§4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub id: RowId,
    pub item: T,
    pub selected: bool,
    pub disabled: bool,
    pub hidden: bool,
    pub loading: bool,
    pub error: Option<ErrorValue>,
    pub metadata: MetaMap,
}

impl<T> Row<T> {
    pub fn new(id: RowId, item: T) -> Self {
        Self {
            id,
            item,
            selected: false,
            disabled: false,
            hidden: false,
            loading: false,
            error: None,
            metadata: MetaMap::new(),
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_metadata(mut self, metadata: MetaMap) -> Self {
        self.metadata = metadata;
        self
    }

    /// A placeholder row rendered while its chunk is still pending, per
    /// §4.7 ("rows whose `loading` flag is true render a placeholder").
    pub fn placeholder(id: RowId, item: T) -> Self {
        let mut row = Self::new(id, item);
        row.loading = true;
        row
    }

    /// A placeholder row rendered in place of a failed fetch (§4.1 failure
    /// model / §7 error taxonomy).
    pub fn errored(id: RowId, item: T, error: ErrorValue) -> Self {
        let mut row = Self::new(id, item);
        row.error = Some(error);
        row
    }

    pub fn is_renderable_normally(&self) -> bool {
        !self.loading && self.error.is_none() && !self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_sets_loading_only() {
        let row = Row::placeholder(RowId::from("r1"), 42);
        assert!(row.loading);
        assert!(row.error.is_none());
        assert!(!row.is_renderable_normally());
    }

    #[test]
    fn errored_carries_error_value() {
        let row = Row::errored(RowId::from("r1"), 0, ErrorValue::permanent("boom"));
        assert_eq!(row.error.as_ref().unwrap().message, "boom");
        assert!(!row.error.as_ref().unwrap().transient);
        assert!(!row.is_renderable_normally());
    }

    #[test]
    fn builder_methods_chain() {
        let row = Row::new(RowId::from("r1"), "x").with_selected(true);
        assert!(row.selected);
        assert!(row.is_renderable_normally());
    }
}
