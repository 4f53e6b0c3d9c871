//! Table renderer (C8, §4.8): column model, cell constraints, borders,
//! and horizontal scroll on top of [`virtua_viewport::ViewportEngine`].

pub mod ansi;
pub mod border;
pub mod cell;
pub mod column;
pub mod hscroll;
pub mod table;

pub use border::{AbsentBorderBehavior, BorderEdge, BorderMask};
pub use column::Column;
pub use hscroll::{HScrollState, ScrollDirection};
pub use table::TableEngine;
