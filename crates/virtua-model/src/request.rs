//! `DataRequest` — a contiguous window request against the data source.

use crate::meta::MetaMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The sort/filter portion of a [`DataRequest`], without a window. Carried
/// by `Cmd::GetTotal` so "total" queries reflect the same filters as the
/// row windows being fetched (§4.4: "`GetTotal` must reflect the filtered
/// total") without the data source needing to track filter state of its
/// own between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub sort_fields: Vec<String>,
    pub sort_directions: Vec<SortDirection>,
    pub filters: MetaMap,
}

/// A contiguous window request, with the sort/filter context it was issued
/// under. Two requests are *equivalent* (§3) iff all four fields compare
/// equal; this type derives `PartialEq` field-by-field to match that
/// definition exactly, and is the value compared against a chunk's
/// recorded `request` during stale-reply reconciliation (§4.1, §4.2).
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    pub start: usize,
    pub count: usize,
    pub sort_fields: Vec<String>,
    pub sort_directions: Vec<SortDirection>,
    pub filters: MetaMap,
}

impl DataRequest {
    pub fn new(start: usize, count: usize) -> Self {
        Self {
            start,
            count,
            sort_fields: Vec::new(),
            sort_directions: Vec::new(),
            filters: MetaMap::new(),
        }
    }

    pub fn with_sort(mut self, fields: Vec<String>, directions: Vec<SortDirection>) -> Self {
        debug_assert_eq!(
            fields.len(),
            directions.len(),
            "sort_fields and sort_directions must be parallel"
        );
        self.sort_fields = fields;
        self.sort_directions = directions;
        self
    }

    pub fn with_filters(mut self, filters: MetaMap) -> Self {
        self.filters = filters;
        self
    }

    /// End index, exclusive: `[start, end)`.
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Same sort/filter context as `other`, ignoring the window. Used when
    /// deriving a new request for a different chunk start without
    /// re-threading sort/filter plumbing at every call site.
    pub fn same_context(&self, start: usize, count: usize) -> Self {
        Self {
            start,
            count,
            sort_fields: self.sort_fields.clone(),
            sort_directions: self.sort_directions.clone(),
            filters: self.filters.clone(),
        }
    }

    pub fn context(&self) -> RequestContext {
        RequestContext {
            sort_fields: self.sort_fields.clone(),
            sort_directions: self.sort_directions.clone(),
            filters: self.filters.clone(),
        }
    }

    pub fn from_context(start: usize, count: usize, ctx: &RequestContext) -> Self {
        Self {
            start,
            count,
            sort_fields: ctx.sort_fields.clone(),
            sort_directions: ctx.sort_directions.clone(),
            filters: ctx.filters.clone(),
        }
    }
}
