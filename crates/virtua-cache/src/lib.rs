//! Chunk cache (§3, §4.2 C2): maps chunk-start to loaded chunk, tracks
//! pending requests with a per-start epoch, and keeps an LRU order for
//! eviction.
//!
//! Ownership: this cache *exclusively* owns `Chunk` values (§3 Lifecycle);
//! the viewport engine in `virtua-viewport` holds only `usize` starts into
//! it. All methods are `&mut self` and meant to be called only from within
//! a single engine `Update` step (§4.2: "Concurrent mutation is
//! disallowed").

use lru::LruCache;
use std::collections::HashMap;
use virtua_model::{Chunk, DataRequest};

/// What was recorded when a chunk start was marked pending: the epoch the
/// cache was at, and the exact request issued, so a reply can be validated
/// against both (§4.1 failure model, §4.2 `insert`).
#[derive(Debug, Clone, PartialEq)]
struct PendingEntry {
    epoch: u64,
    request: DataRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Reply discarded: either nothing was pending for this start, or the
    /// pending entry's epoch/request didn't match (§4.1, §4.2, §8 "Stale
    /// reply: silently dropped").
    StaleDiscarded,
}

pub struct ChunkCache<T> {
    loaded: HashMap<usize, Chunk<T>>,
    pending: HashMap<usize, PendingEntry>,
    /// Order tracker only — chunk storage lives in `loaded`. `LruCache`'s
    /// own value slot is unused (`()`); its key-promotion behavior on
    /// `get`/`put` is exactly the LRU bookkeeping §4.2 calls for.
    order: LruCache<usize, ()>,
    epoch: u64,
}

impl<T> ChunkCache<T> {
    pub fn new() -> Self {
        Self {
            loaded: HashMap::new(),
            pending: HashMap::new(),
            order: LruCache::unbounded(),
            epoch: 0,
        }
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_loaded(&self, start: usize) -> bool {
        self.loaded.contains_key(&start)
    }

    pub fn is_pending(&self, start: usize) -> bool {
        self.pending.contains_key(&start)
    }

    /// Read access that also records the touch for LRU ordering (§4.2
    /// "`lookup` updates LRU order").
    pub fn lookup(&mut self, start: usize) -> Option<&Chunk<T>> {
        if self.loaded.contains_key(&start) {
            self.order.get(&start);
            self.loaded.get(&start)
        } else {
            None
        }
    }

    /// Read access without touching LRU order, for call sites that only
    /// want to peek (e.g. rendering already-visible rows every frame
    /// shouldn't itself perpetually refresh recency beyond the first
    /// touch within a frame).
    pub fn peek(&self, start: usize) -> Option<&Chunk<T>> {
        self.loaded.get(&start)
    }

    /// Record a chunk-load request as in flight. Invariant (§3): `loaded`
    /// and `pending` stay disjoint, so marking a start pending that's
    /// already loaded first evicts the stale loaded entry — callers
    /// should not normally do this (bounding-area computation only
    /// requests starts that are neither loaded nor pending), but we don't
    /// want a cache bug to silently violate the invariant either.
    pub fn mark_pending(&mut self, start: usize, request: DataRequest) {
        if let Some(chunk) = self.loaded.remove(&start) {
            drop(chunk);
            self.order.pop(&start);
        }
        self.pending.insert(
            start,
            PendingEntry {
                epoch: self.epoch,
                request,
            },
        );
    }

    pub fn clear_pending(&mut self, start: usize) {
        self.pending.remove(&start);
    }

    /// Insert a successful reply. Rejects (discards) the chunk if nothing
    /// is pending for its start, or if the pending entry's epoch/request
    /// don't match what's recorded — the defining case being a reply that
    /// arrived after an intervening `invalidate_all` bumped the epoch
    /// (§4.1: "A total-count change invalidates all chunks and pending
    /// requests").
    pub fn insert(&mut self, chunk: Chunk<T>) -> InsertOutcome {
        let start = chunk.start;
        let Some(pending) = self.pending.get(&start) else {
            tracing::trace!(target: "cache.insert", start, "discarding unsolicited chunk");
            return InsertOutcome::StaleDiscarded;
        };
        if pending.epoch != self.epoch || pending.request != chunk.request {
            tracing::debug!(target: "cache.insert", start, "discarding stale chunk reply");
            return InsertOutcome::StaleDiscarded;
        }
        self.pending.remove(&start);
        self.order.put(start, ());
        self.loaded.insert(start, chunk);
        InsertOutcome::Inserted
    }

    /// §4.1 "A total-count change invalidates all chunks and pending
    /// requests: cache is cleared, epoch incremented". Any reply for a
    /// pre-invalidation request is rejected by `insert` from then on since
    /// its recorded epoch no longer matches.
    pub fn invalidate_all(&mut self) {
        self.loaded.clear();
        self.pending.clear();
        self.order.clear();
        self.epoch += 1;
    }

    /// Drop specific starts without bumping the global epoch, so a
    /// re-request at the current epoch is still accepted by `insert`. Used
    /// by `Intent::DataChunksRefresh` (§4.3, §4.5) to force a reload of the
    /// currently-visible chunks without disturbing unrelated pending
    /// requests the way `invalidate_all` would.
    pub fn invalidate(&mut self, starts: impl IntoIterator<Item = usize>) {
        for start in starts {
            if self.loaded.remove(&start).is_some() {
                self.order.pop(&start);
            }
            self.pending.remove(&start);
        }
    }

    pub fn total_loaded_rows(&self) -> usize {
        self.loaded.values().map(Chunk::len).sum()
    }

    pub fn loaded_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.loaded.keys().copied()
    }

    pub fn pending_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.pending.keys().copied()
    }

    /// Evict least-recently-used chunks matching `is_candidate` until
    /// total loaded rows is at or below `max_rows` (§4.1 "Eviction").
    /// Returns the evicted starts, oldest-evicted-first, for callers that
    /// want to log or assert on what left the cache.
    pub fn evict(&mut self, max_rows: usize, is_candidate: impl Fn(usize) -> bool) -> Vec<usize> {
        let mut evicted = Vec::new();
        if self.total_loaded_rows() <= max_rows {
            return evicted;
        }
        // `LruCache` iterates most-recently-used first; we want
        // least-recently-used first, so collect then reverse.
        let order_starts: Vec<usize> = self.order.iter().map(|(start, _)| *start).collect();
        for start in order_starts.into_iter().rev() {
            if self.total_loaded_rows() <= max_rows {
                break;
            }
            if !is_candidate(start) {
                continue;
            }
            if self.loaded.remove(&start).is_some() {
                self.order.pop(&start);
                evicted.push(start);
                tracing::trace!(target: "cache.evict", start, "evicted chunk");
            }
        }
        evicted
    }

    pub fn len_loaded(&self) -> usize {
        self.loaded.len()
    }
}

impl<T> Default for ChunkCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtua_model::{ids::RowId, row::Row};

    fn chunk(start: usize, n: usize, request: DataRequest) -> Chunk<i32> {
        let rows = (0..n)
            .map(|i| Row::new(RowId::from(format!("r{}", start + i)), 0))
            .collect();
        Chunk::new(start, rows, request)
    }

    #[test]
    fn insert_without_pending_is_discarded() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        let req = DataRequest::new(0, 5);
        let outcome = cache.insert(chunk(0, 5, req));
        assert_eq!(outcome, InsertOutcome::StaleDiscarded);
        assert!(!cache.is_loaded(0));
    }

    #[test]
    fn insert_matching_pending_succeeds() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        let req = DataRequest::new(0, 5);
        cache.mark_pending(0, req.clone());
        let outcome = cache.insert(chunk(0, 5, req));
        assert_eq!(outcome, InsertOutcome::Inserted);
        assert!(cache.is_loaded(0));
        assert!(!cache.is_pending(0));
    }

    #[test]
    fn insert_after_invalidate_is_stale() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        let req = DataRequest::new(0, 5);
        cache.mark_pending(0, req.clone());
        cache.invalidate_all();
        let outcome = cache.insert(chunk(0, 5, req));
        assert_eq!(outcome, InsertOutcome::StaleDiscarded);
        assert!(!cache.is_loaded(0));
    }

    #[test]
    fn insert_with_mismatched_request_is_stale() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        cache.mark_pending(0, DataRequest::new(0, 5));
        let different = DataRequest::new(0, 5).with_sort(vec!["x".into()], vec![virtua_model::SortDirection::Asc]);
        let outcome = cache.insert(chunk(0, 5, different));
        assert_eq!(outcome, InsertOutcome::StaleDiscarded);
    }

    #[test]
    fn loaded_and_pending_stay_disjoint() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        let req = DataRequest::new(0, 5);
        cache.mark_pending(0, req.clone());
        cache.insert(chunk(0, 5, req.clone()));
        cache.mark_pending(0, req.clone());
        assert!(cache.is_pending(0));
        assert!(!cache.is_loaded(0));
    }

    #[test]
    fn evict_respects_candidate_predicate_and_lru_order() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        for start in [0usize, 20, 40] {
            let req = DataRequest::new(start, 20);
            cache.mark_pending(start, req.clone());
            cache.insert(chunk(start, 20, req));
        }
        // Touch 20 so 0 becomes least-recently-used among {0, 20}.
        cache.lookup(20);
        let evicted = cache.evict(40, |start| start != 40);
        assert_eq!(evicted, vec![0]);
        assert!(!cache.is_loaded(0));
        assert!(cache.is_loaded(20));
        assert!(cache.is_loaded(40));
    }

    #[test]
    fn evict_noop_when_within_budget() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        let req = DataRequest::new(0, 10);
        cache.mark_pending(0, req.clone());
        cache.insert(chunk(0, 10, req));
        let evicted = cache.evict(100, |_| true);
        assert!(evicted.is_empty());
        assert!(cache.is_loaded(0));
    }

    #[test]
    fn invalidate_specific_starts_keeps_epoch() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        for start in [0usize, 20] {
            let req = DataRequest::new(start, 20);
            cache.mark_pending(start, req.clone());
            cache.insert(chunk(start, 20, req));
        }
        let epoch_before = cache.current_epoch();
        cache.invalidate([0]);
        assert!(!cache.is_loaded(0));
        assert!(cache.is_loaded(20));
        assert_eq!(cache.current_epoch(), epoch_before);

        let req = DataRequest::new(0, 20);
        cache.mark_pending(0, req.clone());
        assert_eq!(cache.insert(chunk(0, 20, req)), InsertOutcome::Inserted);
    }

    #[test]
    fn invalidate_all_clears_everything_and_bumps_epoch() {
        let mut cache: ChunkCache<i32> = ChunkCache::new();
        let req = DataRequest::new(0, 5);
        cache.mark_pending(0, req.clone());
        cache.insert(chunk(0, 5, req));
        let epoch_before = cache.current_epoch();
        cache.invalidate_all();
        assert_eq!(cache.len_loaded(), 0);
        assert_eq!(cache.pending_starts().count(), 0);
        assert_eq!(cache.current_epoch(), epoch_before + 1);
    }
}
