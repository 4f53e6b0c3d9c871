//! Caller-supplied forest input (§4.6).

use virtua_model::NodeId;

/// One node in the forest the host hands to [`crate::TreeLinearizer::new`].
/// `parent: None` marks a root.
pub struct TreeNodeSpec<T> {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub item: T,
}

impl<T> TreeNodeSpec<T> {
    pub fn root(id: NodeId, item: T) -> Self {
        Self {
            id,
            parent: None,
            item,
        }
    }

    pub fn child(id: NodeId, parent: NodeId, item: T) -> Self {
        Self {
            id,
            parent: Some(parent),
            item,
        }
    }
}
