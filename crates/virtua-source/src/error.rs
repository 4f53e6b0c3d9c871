//! Error payload a data source reports back through a `ChunkError` or
//! failed `SelectionResponse` (§7).

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataSourceError {
    /// Re-requesting the same window may succeed (§7 "Transient fetch
    /// failure"). The next navigation into the same bounding area
    /// re-requests automatically.
    #[error("transient data source error: {0}")]
    Transient(String),
    /// Re-requesting will not succeed without host-side intervention
    /// (§7 "Permanent fetch failure"); only a user-initiated
    /// `Intent::DataRefresh` retries it.
    #[error("permanent data source error: {0}")]
    Permanent(String),
}

impl DataSourceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    pub fn into_error_value(self) -> virtua_model::ErrorValue {
        match self {
            Self::Transient(msg) => virtua_model::ErrorValue::transient(msg),
            Self::Permanent(msg) => virtua_model::ErrorValue::permanent(msg),
        }
    }
}
