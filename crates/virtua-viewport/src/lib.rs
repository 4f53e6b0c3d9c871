//! Viewport engine, selection coordinator, and animation tick scheduler
//! (C3, C6, C10) — the stateful heart of the virtualization engine.
//!
//! This crate never touches a `DataSource` or an async runtime: it only
//! ever returns `virtua_proto::Cmd` descriptors for a host runtime to
//! execute, and only ever consumes `virtua_proto::Msg` values fed back into
//! `Update`. That separation is what lets `Init`/`Update`/`View` stay
//! synchronous and single-threaded (§5).

pub mod animation;
pub mod engine;
pub mod state;

pub use animation::{AnimationTicker, TickState};
pub use engine::ViewportEngine;
pub use state::ViewportState;
