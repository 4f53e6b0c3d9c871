//! Tree facade (C9 composing C3, §4.6): wraps [`ViewportEngine`] and
//! keeps its `total` in lockstep with the linearizer's visible node
//! count, translating tree-structural intents into viewport state
//! changes plus a chunk resync.
//!
//! The forest is supplied wholesale at construction (§4.6 doesn't model
//! it as chunk-fetched), so this engine skips `Cmd::GetTotal` entirely:
//! `init` seeds the viewport's total from `tree.visible_len()` directly.
//! Row *content* for whatever's currently visible still flows through
//! the ordinary `LoadChunk`/`ChunkLoaded` cycle, unmodified.

use virtua_model::NodeId;
use virtua_proto::{Cmd, Intent, Msg};
use virtua_viewport::ViewportEngine;

use crate::linearizer::TreeLinearizer;

pub struct TreeEngine<T> {
    viewport: ViewportEngine<T>,
    tree: TreeLinearizer<T>,
    cascading_selection: bool,
}

impl<T> TreeEngine<T> {
    pub fn new(viewport: ViewportEngine<T>, tree: TreeLinearizer<T>) -> Self {
        Self {
            viewport,
            tree,
            cascading_selection: false,
        }
    }

    /// Cascading selection defaults to off (§4.6 "configurable, default
    /// off").
    pub fn with_cascading_selection(mut self, enabled: bool) -> Self {
        self.cascading_selection = enabled;
        self
    }

    pub fn viewport(&self) -> &ViewportEngine<T> {
        &self.viewport
    }

    pub fn tree(&self) -> &TreeLinearizer<T> {
        &self.tree
    }

    pub fn init(&mut self) -> Cmd {
        self.sync_total()
    }

    fn sync_total(&mut self) -> Cmd {
        let total = self.tree.visible_len();
        self.viewport.update(Msg::TotalCountLoaded(total))
    }

    pub fn update(&mut self, msg: Msg<T>) -> Cmd {
        match msg {
            Msg::Intent(Intent::ToggleNode(id)) => self.structural(|t| t.toggle(&id)),
            Msg::Intent(Intent::ExpandNode(id)) => self.structural(|t| t.expand(&id)),
            Msg::Intent(Intent::CollapseNode(id)) => self.structural(|t| t.collapse(&id)),
            Msg::Intent(Intent::TreeJumpToIndex { index, expand_parents }) => {
                self.jump_to_fully_expanded(index, expand_parents)
            }
            Msg::Intent(Intent::SelectCurrent) if self.cascading_selection => {
                self.cascading_select_current()
            }
            other => self.viewport.update(other),
        }
    }

    fn structural(&mut self, mutate: impl FnOnce(&mut TreeLinearizer<T>)) -> Cmd {
        mutate(&mut self.tree);
        let total_cmd = self.sync_total();
        let resync_cmd = self.viewport.resync_chunks();
        Cmd::batch(vec![total_cmd, resync_cmd])
    }

    fn jump_to_fully_expanded(&mut self, index: usize, expand_parents: bool) -> Cmd {
        match self.tree.jump_to_fully_expanded(index, expand_parents) {
            Some(visible_index) => {
                let total_cmd = self.sync_total();
                self.viewport.jump_to(visible_index);
                let resync_cmd = self.viewport.resync_chunks();
                Cmd::batch(vec![total_cmd, resync_cmd])
            }
            None => Cmd::EmitStatus(format!(
                "TreeJumpToIndex: index {index} is out of range or hidden behind a collapsed ancestor"
            )),
        }
    }

    /// §4.6 "selecting a node with cascading=true issues a batch select
    /// of the node's entire transitive children set via
    /// `SetSelectedById`" — the node itself plus every descendant,
    /// regardless of current expand state.
    fn cascading_select_current(&mut self) -> Cmd {
        let cursor_index = self.viewport.state().cursor_index;
        let Some(node_id) = self.tree.node_at(cursor_index).cloned() else {
            return Cmd::None;
        };
        let mut ids: Vec<NodeId> = self.tree.descendant_ids(&node_id);
        ids.push(node_id);
        // The data source contract only knows `RowId`; a tree's node ids
        // and its rows' ids are the same namespace, so this conversion is
        // a relabeling, not a lookup.
        let cmds = ids
            .into_iter()
            .map(|id| Cmd::SetSelectedById {
                id: virtua_model::RowId::from(id.as_str()),
                selected: true,
            })
            .collect();
        Cmd::batch(cmds)
    }
}
