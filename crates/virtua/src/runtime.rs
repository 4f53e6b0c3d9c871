//! A reference host runtime (§5 companion), shaped like the teacher's
//! `core-events::EventSourceRegistry`: a bounded channel carries `Msg`
//! values back into `update`, and an interpreter matches each `Cmd`
//! descriptor a facade returns to the one `DataSource` method it names.
//!
//! This is a reference, not a requirement (§5: "any runtime able to
//! execute Cmd and feed Msg back in satisfies the contract") — it exists
//! so the crate's own tests and a real caller both have something to
//! drive a facade with, but a host is free to replace it with its own
//! event loop over the same `Cmd`/`Msg` protocol.

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use virtua_proto::{Cmd, Msg, SelectionOp};
use virtua_source::DataSource;

use crate::facade::Facade;

const CHANNEL_CAPACITY: usize = 256;

enum Effect<T> {
    Msg(Msg<T>),
    Status(String),
    None,
}

fn flatten(cmd: Cmd, out: &mut Vec<Cmd>) {
    match cmd {
        Cmd::None => {}
        Cmd::Batch(cmds) => {
            for c in cmds {
                flatten(c, out);
            }
        }
        other => out.push(other),
    }
}

async fn execute_leaf<T: Send + Sync + 'static>(
    cmd: Cmd,
    source: &(dyn DataSource<T> + Send + Sync),
) -> Effect<T> {
    match cmd {
        Cmd::None | Cmd::Batch(_) => Effect::None,
        Cmd::GetTotal(ctx) => match source.get_total(&ctx).await {
            Ok(n) => Effect::Msg(Msg::TotalCountLoaded(n)),
            Err(err) => {
                tracing::warn!(target: "runtime.datasource", %err, "GetTotal failed");
                Effect::Status(format!("GetTotal failed: {err}"))
            }
        },
        Cmd::LoadChunk(request) => {
            let start = request.start;
            match source.load_chunk(request).await {
                Ok(chunk) => Effect::Msg(Msg::ChunkLoaded(chunk)),
                Err(err) => Effect::Msg(Msg::ChunkError { start, error: err.into_error_value() }),
            }
        }
        Cmd::SetSelected { index, selected } => {
            let ok = source.set_selected(index, selected).await.unwrap_or(false);
            Effect::Msg(Msg::SelectionResponse {
                ok,
                index: Some(index),
                id: None,
                selected,
                op: SelectionOp::SetSelected,
            })
        }
        Cmd::SetSelectedById { id, selected } => {
            let ok = source
                .set_selected_by_id(id.clone(), selected)
                .await
                .unwrap_or(false);
            Effect::Msg(Msg::SelectionResponse {
                ok,
                index: None,
                id: Some(id),
                selected,
                op: SelectionOp::SetSelectedById,
            })
        }
        Cmd::SelectAll => {
            let ok = source.select_all().await.unwrap_or(false);
            Effect::Msg(Msg::SelectionResponse {
                ok,
                index: None,
                id: None,
                selected: true,
                op: SelectionOp::SelectAll,
            })
        }
        Cmd::ClearSelection => {
            let ok = source.clear_selection().await.unwrap_or(false);
            Effect::Msg(Msg::SelectionResponse {
                ok,
                index: None,
                id: None,
                selected: false,
                op: SelectionOp::ClearSelection,
            })
        }
        Cmd::SelectRange { start_idx, end_idx } => {
            let ok = source.select_range(start_idx, end_idx).await.unwrap_or(false);
            Effect::Msg(Msg::SelectionResponse {
                ok,
                index: Some(start_idx),
                id: None,
                selected: true,
                op: SelectionOp::SelectRange,
            })
        }
        Cmd::EmitStatus(status) => Effect::Status(status),
    }
}

/// Drives a single facade: interprets the `Cmd`s it returns against its
/// own `DataSource`, and feeds the resulting `Msg`s back into `update`
/// until the queue is empty. Optionally arms a periodic `AnimationTick`
/// producer, spawned via [`JoinSet`] exactly as the teacher's
/// `TickEventSource` spawns its interval task.
pub struct Runtime<T> {
    tx: mpsc::Sender<Msg<T>>,
    rx: mpsc::Receiver<Msg<T>>,
    tasks: JoinSet<()>,
    statuses: Vec<String>,
}

impl<T: Send + Sync + 'static> Runtime<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            rx,
            tasks: JoinSet::new(),
            statuses: Vec::new(),
        }
    }

    /// Status strings surfaced via `Cmd::EmitStatus` or a failed async
    /// call, in the order they arrived.
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    /// Runs `facade.init()`'s command to completion, including whatever
    /// follow-up commands its own replies produce.
    pub async fn prime<F: Facade<T>>(&mut self, facade: &mut F) {
        let cmd = facade.init();
        self.run_cmd(facade, cmd).await;
    }

    /// Feeds one message through `facade.update`, then settles every
    /// command it and its replies produce.
    pub async fn send<F: Facade<T>>(&mut self, facade: &mut F, msg: Msg<T>) {
        let cmd = facade.update(msg);
        self.run_cmd(facade, cmd).await;
    }

    async fn run_cmd<F: Facade<T>>(&mut self, facade: &mut F, cmd: Cmd) {
        let mut pending = vec![cmd];
        while let Some(next) = pending.pop() {
            let mut leaves = Vec::new();
            flatten(next, &mut leaves);
            for leaf in leaves {
                match execute_leaf(leaf, facade.data_source()).await {
                    Effect::Msg(msg) => {
                        let _ = self.tx.send(msg).await;
                    }
                    Effect::Status(status) => self.statuses.push(status),
                    Effect::None => {}
                }
            }
            while let Ok(msg) = self.rx.try_recv() {
                pending.push(facade.update(msg));
            }
        }
    }

    /// Spawns a background task that sends `Msg::AnimationTick` on the
    /// facade's configured interval, if its ticker is enabled. The caller
    /// is responsible for periodically draining ticks with
    /// [`Runtime::drain_ticks`] (e.g. between input events) since this
    /// runtime never owns the host's own event loop.
    pub fn arm_animation_ticker<F: Facade<T>>(&mut self, facade: &F) {
        let ticker = *facade.animation();
        if !ticker.is_enabled() {
            return;
        }
        let tx = self.tx.clone();
        let interval = ticker.interval();
        tracing::trace!(target: "runtime.animation", ?interval, "arming animation ticker");
        self.tasks.spawn(async move {
            let mut ticker_interval = tokio::time::interval(interval);
            loop {
                ticker_interval.tick().await;
                if tx.send(Msg::AnimationTick(Instant::now())).await.is_err() {
                    break;
                }
            }
        });
    }

    /// Drains whatever ticks (or other messages) have queued since the
    /// last drive, feeding each through `facade.update` and settling the
    /// commands it produces.
    pub async fn drain_ticks<F: Facade<T>>(&mut self, facade: &mut F) {
        let mut queued = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            queued.push(msg);
        }
        for msg in queued {
            let cmd = facade.update(msg);
            self.run_cmd(facade, cmd).await;
        }
    }
}

impl<T: Send + Sync + 'static> Default for Runtime<T> {
    fn default() -> Self {
        Self::new()
    }
}
