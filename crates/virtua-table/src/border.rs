//! Border types (§4.8): re-exported from `virtua-model`, which is where
//! they must live so `virtua-proto::Intent::SetBorderMask`/
//! `SetBorderAbsentBehavior` can name them without a cyclic dependency
//! back onto this crate.

pub use virtua_model::{AbsentBorderBehavior, BorderEdge, BorderMask};
