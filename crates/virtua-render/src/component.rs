//! Sub-component contracts for the row render pipeline (§4.7).

use virtua_model::{ErrorValue, Row, ViewportConfig};

use crate::alignment::Alignment;

/// Read-only context threaded through every sub-component call. Carries
/// just enough of the viewport's shape for a formatter to make layout
/// decisions (e.g. an enumerator computing a fixed index column width
/// from `total`); it never exposes mutable engine state.
pub struct RenderContext<'a> {
    pub config: &'a ViewportConfig,
    pub total: Option<usize>,
}

/// `(row, index, context) -> string`, per §4.7's enumerator contract.
pub type EnumeratorFn<T> = Box<dyn Fn(&Row<T>, usize, &RenderContext<'_>) -> String + Send + Sync>;

/// `(row, index, context, isCursor, isTopThreshold, isBottomThreshold) ->
/// string`, per §4.7's content formatter contract.
pub type ContentFormatter<T> =
    Box<dyn Fn(&Row<T>, usize, &RenderContext<'_>, bool, bool, bool) -> String + Send + Sync>;

/// Replaces the whole row when `row.loading` is set.
pub type LoadingFormatter<T> = Box<dyn Fn(&Row<T>, usize, &RenderContext<'_>) -> String + Send + Sync>;

/// Replaces just the content component when `row.error` is set.
pub type ErrorFormatter<T> =
    Box<dyn Fn(&Row<T>, usize, &RenderContext<'_>, &ErrorValue) -> String + Send + Sync>;

/// The kind of thing a pipeline slot produces. `Content` is special: the
/// pipeline substitutes the error formatter for it when `row.error` is
/// set, rather than calling the formatter directly (§4.7).
pub enum ComponentKind<T> {
    Cursor { indicator: String, normal: String },
    Enumerator(EnumeratorFn<T>),
    Content(ContentFormatter<T>),
    Spacing(String),
}

/// One ordered, independently-enabled slot in a row pipeline.
pub struct ComponentSlot<T> {
    pub kind: ComponentKind<T>,
    pub enabled: bool,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl<T> ComponentSlot<T> {
    fn new(kind: ComponentKind<T>) -> Self {
        Self {
            kind,
            enabled: true,
            alignment: Alignment::default(),
            max_width: None,
        }
    }

    /// Produces `cursorIndicator` on the cursor row, `normalSpacing`
    /// otherwise. The two strings should share a display width so columns
    /// stay aligned across rows (§4.7); this is the caller's
    /// responsibility, not an invariant this type enforces.
    pub fn cursor(indicator: impl Into<String>, normal: impl Into<String>) -> Self {
        Self::new(ComponentKind::Cursor {
            indicator: indicator.into(),
            normal: normal.into(),
        })
    }

    pub fn enumerator(f: EnumeratorFn<T>) -> Self {
        Self::new(ComponentKind::Enumerator(f))
    }

    pub fn content(f: ContentFormatter<T>) -> Self {
        Self::new(ComponentKind::Content(f))
    }

    pub fn spacing(text: impl Into<String>) -> Self {
        Self::new(ComponentKind::Spacing(text.into()))
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
