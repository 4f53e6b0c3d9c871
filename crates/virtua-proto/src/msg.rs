//! Inbound message values fed into `Update` — either a user intent or the
//! asynchronous reply to a previously issued [`crate::Cmd`] (§4.3).

use crate::intent::{Intent, SelectionOp};
use std::time::Instant;
use virtua_model::{Chunk, ErrorValue, RowId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg<T> {
    /// A user-issued intent, normally produced by the host's key-binding
    /// layer (or this crate's minimal default keymap).
    Intent(Intent),

    /// Reply to `Cmd::GetTotal`.
    TotalCountLoaded(usize),

    /// Reply to `Cmd::LoadChunk` on success. Carries the chunk's own
    /// `start` so the recipient doesn't need to destructure `chunk.start`
    /// out of band; kept anyway on `Chunk` for the same reason the wire
    /// request is embedded (stale-reply validation, §4.1/§4.2).
    ChunkLoaded(Chunk<T>),

    /// Reply to `Cmd::LoadChunk` on failure.
    ChunkError { start: usize, error: ErrorValue },

    /// Reply to any of the five selection-mutating `Cmd` variants.
    SelectionResponse {
        ok: bool,
        index: Option<usize>,
        id: Option<RowId>,
        selected: bool,
        op: SelectionOp,
    },

    /// Periodic animation tick (§4.9). Never causes a data fetch.
    AnimationTick(Instant),
}
