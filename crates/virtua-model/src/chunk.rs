//! `Chunk` — a contiguous, cached slice of rows (§3 C2).

use crate::request::DataRequest;
use crate::row::Row;
use std::time::Instant;

/// A loaded window of rows plus the request that produced it, so a reply
/// can be validated against whatever is currently pending for its start
/// (§4.1 failure model, §4.2 `insert`).
#[derive(Debug, Clone)]
pub struct Chunk<T> {
    pub start: usize,
    pub rows: Vec<Row<T>>,
    pub request: DataRequest,
    pub loaded_at: Instant,
}

impl<T> Chunk<T> {
    pub fn new(start: usize, rows: Vec<Row<T>>, request: DataRequest) -> Self {
        Self {
            start,
            rows,
            request,
            loaded_at: Instant::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn end(&self) -> usize {
        self.start + self.rows.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    pub fn row_at(&self, index: usize) -> Option<&Row<T>> {
        if !self.contains(index) {
            return None;
        }
        self.rows.get(index - self.start)
    }

    /// Validates the invariants from §3 ("rows contiguous from `start`",
    /// "`|rows| <= chunkSize`", no duplicate ids) and §7's "invariant
    /// violation" error class.
    pub fn validate(&self, chunk_size: usize) -> Result<(), ChunkValidationError> {
        if self.rows.len() > chunk_size {
            return Err(ChunkValidationError::TooManyRows {
                requested: chunk_size,
                got: self.rows.len(),
            });
        }
        if self.rows.len() > self.request.count {
            return Err(ChunkValidationError::TooManyRows {
                requested: self.request.count,
                got: self.rows.len(),
            });
        }
        let mut seen = std::collections::HashSet::with_capacity(self.rows.len());
        for row in &self.rows {
            if !seen.insert(&row.id) {
                return Err(ChunkValidationError::DuplicateRowId(row.id.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkValidationError {
    #[error("chunk carries {got} rows but at most {requested} were requested")]
    TooManyRows { requested: usize, got: usize },
    #[error("chunk contains duplicate row id {0}")]
    DuplicateRowId(crate::ids::RowId),
    #[error("chunk rows are not contiguous from its start index")]
    NonContiguous,
}
