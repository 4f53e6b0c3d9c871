//! Outbound command descriptors — the suspended computations `Init` and
//! `Update` return for the host runtime to execute (§4.3, §4.4, §9).
//!
//! `Cmd` values are plain data, never closures: per §9's design note, a
//! target language lacking first-class deferred computations should model
//! commands as tagged descriptors and let the runtime interpret them. The
//! descriptors here line up one-to-one with the §4.4 data source contract
//! plus the two structural commands every such runtime needs
//! (`None`, `Batch`).

use virtua_model::{DataRequest, RequestContext, RowId};

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// No side effect. Returned when an `Intent` was fully handled
    /// synchronously (e.g. a cursor move within already-loaded chunks).
    None,
    /// Run several commands; order of completion is not guaranteed
    /// (§5 "Ordering guarantees").
    Batch(Vec<Cmd>),

    /// §4.4: yields `Msg::TotalCountLoaded`. Carries the current
    /// sort/filter context so the reported total reflects it.
    GetTotal(RequestContext),
    /// §4.4: yields `Msg::ChunkLoaded` or `Msg::ChunkError`.
    LoadChunk(DataRequest),
    /// §4.4: yields `Msg::SelectionResponse { op: SetSelected, .. }`.
    SetSelected { index: usize, selected: bool },
    /// §4.4: yields `Msg::SelectionResponse { op: SetSelectedById, .. }`.
    SetSelectedById { id: RowId, selected: bool },
    /// §4.4: yields `Msg::SelectionResponse { op: SelectAll, .. }`.
    SelectAll,
    /// §4.4: yields `Msg::SelectionResponse { op: ClearSelection, .. }`.
    ClearSelection,
    /// §4.4: yields `Msg::SelectionResponse { op: SelectRange, .. }`.
    SelectRange { start_idx: usize, end_idx: usize },

    /// Surface a host-visible status string without touching cache state
    /// (§4.5: a failed `SelectionResponse` "is surfaced as a status
    /// message but does not alter cache").
    EmitStatus(String),
}

impl Cmd {
    pub fn batch(cmds: impl IntoIterator<Item = Cmd>) -> Cmd {
        let mut out: Vec<Cmd> = Vec::new();
        for cmd in cmds {
            match cmd {
                Cmd::None => {}
                Cmd::Batch(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => Cmd::None,
            1 => out.into_iter().next().unwrap(),
            _ => Cmd::Batch(out),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_flattens_and_drops_none() {
        let cmd = Cmd::batch([
            Cmd::None,
            Cmd::GetTotal(RequestContext::default()),
            Cmd::Batch(vec![Cmd::EmitStatus("x".into())]),
        ]);
        match cmd {
            Cmd::Batch(items) => assert_eq!(items.len(), 2),
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn batch_of_one_collapses_to_single_command() {
        let cmd = Cmd::batch([Cmd::None, Cmd::GetTotal(RequestContext::default())]);
        assert_eq!(cmd, Cmd::GetTotal(RequestContext::default()));
    }

    #[test]
    fn batch_of_none_collapses_to_none() {
        let cmd = Cmd::batch([Cmd::None, Cmd::None]);
        assert!(cmd.is_none());
    }
}
