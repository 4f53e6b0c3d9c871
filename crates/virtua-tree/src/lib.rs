//! Tree linearizer and facade (C9, §4.6): two indexings over a
//! caller-supplied forest (visible and fully-expanded), composed with
//! [`virtua_viewport::ViewportEngine`] so tree navigation and cascading
//! selection reuse the same scroll/chunk machinery list and table use.

pub mod engine;
pub mod error;
pub mod linearizer;
pub mod node;

pub use engine::TreeEngine;
pub use error::TreeError;
pub use linearizer::TreeLinearizer;
pub use node::TreeNodeSpec;
