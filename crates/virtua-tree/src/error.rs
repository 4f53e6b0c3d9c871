//! Tree construction errors (§4.6, §7 "Invariant violation" class).

use virtua_model::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),
    #[error("cycle detected at node id {0}")]
    Cycle(NodeId),
}
