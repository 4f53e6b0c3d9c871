//! Viewport configuration and its construction-time validation.
//!
//! Grounded in `core-config::ConfigContext`'s builder-plus-validation
//! pattern: values are plain fields set by the host, validated once, and
//! never re-validated on every access.

/// Horizontal scroll advance granularity (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HScrollMode {
    Character,
    Word,
    Smart,
}

/// Which rows a horizontal scroll offset applies to (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HScrollScope {
    CurrentRowOnly,
    AllRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("topThreshold ({top}) must be <= bottomThreshold ({bottom})")]
    ThresholdOutOfOrder { top: usize, bottom: usize },
    #[error("bottomThreshold ({bottom}) must be < height ({height})")]
    ThresholdExceedsHeight { bottom: usize, height: usize },
    #[error("height must be >= 1")]
    HeightZero,
    #[error("chunkSize must be >= 1")]
    ChunkSizeZero,
}

/// Fixed-at-construction viewport configuration (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    pub height: usize,
    pub top_threshold: usize,
    pub bottom_threshold: usize,
    pub chunk_size: usize,
    pub bounding_area_before: usize,
    pub bounding_area_after: usize,
    pub initial_index: usize,
    pub max_cached_rows: usize,
    pub eviction_slack: usize,
}

impl ViewportConfig {
    /// Validates `0 <= topThreshold <= bottomThreshold <= height-1`,
    /// `chunkSize >= 1`, `height >= 1` (§4.1, §7 "Config error").
    pub fn new(
        height: usize,
        top_threshold: usize,
        bottom_threshold: usize,
        chunk_size: usize,
    ) -> Result<Self, ConfigError> {
        if height == 0 {
            return Err(ConfigError::HeightZero);
        }
        if chunk_size == 0 {
            return Err(ConfigError::ChunkSizeZero);
        }
        if top_threshold > bottom_threshold {
            return Err(ConfigError::ThresholdOutOfOrder {
                top: top_threshold,
                bottom: bottom_threshold,
            });
        }
        if bottom_threshold > height - 1 {
            return Err(ConfigError::ThresholdExceedsHeight {
                bottom: bottom_threshold,
                height,
            });
        }
        Ok(Self {
            height,
            top_threshold,
            bottom_threshold,
            chunk_size,
            bounding_area_before: 0,
            bounding_area_after: 0,
            initial_index: 0,
            max_cached_rows: chunk_size.saturating_mul(16),
            eviction_slack: 0,
        })
    }

    pub fn with_bounding_area(mut self, before: usize, after: usize) -> Self {
        self.bounding_area_before = before;
        self.bounding_area_after = after;
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn with_max_cached_rows(mut self, max_cached_rows: usize) -> Self {
        self.max_cached_rows = max_cached_rows;
        self
    }

    pub fn with_eviction_slack(mut self, slack: usize) -> Self {
        self.eviction_slack = slack;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_height() {
        assert_eq!(ViewportConfig::new(0, 0, 0, 10), Err(ConfigError::HeightZero));
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert_eq!(
            ViewportConfig::new(10, 0, 5, 0),
            Err(ConfigError::ChunkSizeZero)
        );
    }

    #[test]
    fn rejects_top_above_bottom() {
        assert_eq!(
            ViewportConfig::new(10, 5, 2, 10),
            Err(ConfigError::ThresholdOutOfOrder { top: 5, bottom: 2 })
        );
    }

    #[test]
    fn rejects_bottom_at_or_above_height() {
        assert_eq!(
            ViewportConfig::new(10, 0, 10, 10),
            Err(ConfigError::ThresholdExceedsHeight {
                bottom: 10,
                height: 10
            })
        );
        // bottomThreshold == height-1 is the valid maximum (§4.1).
        assert!(ViewportConfig::new(10, 0, 9, 10).is_ok());
    }

    #[test]
    fn accepts_valid_config_with_defaults() {
        let cfg = ViewportConfig::new(10, 2, 7, 20).unwrap();
        assert_eq!(cfg.bounding_area_before, 0);
        assert_eq!(cfg.max_cached_rows, 320);
    }
}
