//! Reference `DataSource` implementation over an in-memory `Vec<T>`.
//!
//! Not part of the core contract (§9: "the spec gives the *contract* the
//! data source must satisfy; the implementation provides reference
//! adapters but does not depend on them") — exists so the engine's
//! integration tests and doctests have a real, spec-compliant
//! collaborator instead of a hand-rolled mock per call site.

use crate::{DataSource, DataSourceError};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::RwLock;
use virtua_model::{Chunk, DataRequest, MetaValue, RequestContext, Row, RowId, SortDirection};

type IdOf<T> = Box<dyn Fn(&T) -> RowId + Send + Sync>;
type SortCmp<T> = Box<dyn Fn(&T, &T, &str) -> Ordering + Send + Sync>;
type FilterPred<T> = Box<dyn Fn(&T, &str, &MetaValue) -> bool + Send + Sync>;

/// An in-memory data source over `Vec<T>`. Selection is the adapter's own
/// authoritative state (§4.5: "the data source owns selection state");
/// sort/filter application is recomputed per call from the request's
/// context rather than cached, since the reference adapter favors
/// correctness over throughput.
pub struct InMemoryDataSource<T> {
    items: RwLock<Vec<T>>,
    selected: RwLock<HashSet<RowId>>,
    id_of: IdOf<T>,
    sort_cmp: Option<SortCmp<T>>,
    filter_pred: Option<FilterPred<T>>,
}

impl<T: Clone + Send + Sync + 'static> InMemoryDataSource<T> {
    pub fn new(items: Vec<T>, id_of: impl Fn(&T) -> RowId + Send + Sync + 'static) -> Self {
        Self {
            items: RwLock::new(items),
            selected: RwLock::new(HashSet::new()),
            id_of: Box::new(id_of),
            sort_cmp: None,
            filter_pred: None,
        }
    }

    pub fn with_sort_cmp(
        mut self,
        cmp: impl Fn(&T, &T, &str) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_cmp = Some(Box::new(cmp));
        self
    }

    pub fn with_filter_pred(
        mut self,
        pred: impl Fn(&T, &str, &MetaValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter_pred = Some(Box::new(pred));
        self
    }

    fn filtered_sorted(&self, context: &RequestContext) -> Vec<T> {
        let items = self.items.read().expect("items lock poisoned");
        let mut out: Vec<T> = if let Some(pred) = &self.filter_pred {
            items
                .iter()
                .filter(|item| {
                    context
                        .filters
                        .iter()
                        .all(|(field, value)| pred(item, field, value))
                })
                .cloned()
                .collect()
        } else {
            items.clone()
        };
        if let Some(cmp) = &self.sort_cmp {
            for (field, direction) in context
                .sort_fields
                .iter()
                .zip(context.sort_directions.iter())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
            {
                out.sort_by(|a, b| {
                    let ord = cmp(a, b, field);
                    match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                });
            }
        }
        out
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> DataSource<T> for InMemoryDataSource<T> {
    async fn get_total(&self, context: &RequestContext) -> Result<usize, DataSourceError> {
        Ok(self.filtered_sorted(context).len())
    }

    async fn load_chunk(&self, request: DataRequest) -> Result<Chunk<T>, DataSourceError> {
        let context = request.context();
        let all = self.filtered_sorted(&context);
        if request.start > all.len() {
            return Ok(Chunk::new(request.start, Vec::new(), request));
        }
        let end = (request.start + request.count).min(all.len());
        let selected = self.selected.read().expect("selected lock poisoned");
        let rows = all[request.start..end]
            .iter()
            .map(|item| {
                let id = (self.id_of)(item);
                let is_selected = selected.contains(&id);
                Row::new(id, item.clone()).with_selected(is_selected)
            })
            .collect();
        Ok(Chunk::new(request.start, rows, request))
    }

    async fn set_selected(&self, index: usize, selected: bool) -> Result<bool, DataSourceError> {
        let context = RequestContext::default();
        let all = self.filtered_sorted(&context);
        let Some(item) = all.get(index) else {
            tracing::warn!(target: "source.memory", index, len = all.len(), "set_selected index out of range");
            return Err(DataSourceError::Permanent(format!(
                "index {index} out of range"
            )));
        };
        let id = (self.id_of)(item);
        self.set_selected_by_id(id, selected).await
    }

    async fn set_selected_by_id(
        &self,
        id: RowId,
        selected: bool,
    ) -> Result<bool, DataSourceError> {
        let mut set = self.selected.write().expect("selected lock poisoned");
        if selected {
            set.insert(id);
        } else {
            set.remove(&id);
        }
        Ok(selected)
    }

    async fn select_all(&self) -> Result<bool, DataSourceError> {
        let items = self.items.read().expect("items lock poisoned");
        let mut set = self.selected.write().expect("selected lock poisoned");
        set.clear();
        set.extend(items.iter().map(|item| (self.id_of)(item)));
        Ok(true)
    }

    async fn clear_selection(&self) -> Result<bool, DataSourceError> {
        self.selected.write().expect("selected lock poisoned").clear();
        Ok(true)
    }

    async fn select_range(
        &self,
        start_idx: usize,
        end_idx: usize,
    ) -> Result<bool, DataSourceError> {
        let context = RequestContext::default();
        let all = self.filtered_sorted(&context);
        let (lo, hi) = if start_idx <= end_idx {
            (start_idx, end_idx)
        } else {
            (end_idx, start_idx)
        };
        if lo >= all.len() {
            tracing::warn!(target: "source.memory", lo, len = all.len(), "select_range start out of bounds");
            return Err(DataSourceError::Permanent("range start out of bounds".into()));
        }
        let hi = hi.min(all.len().saturating_sub(1));
        let mut set = self.selected.write().expect("selected lock poisoned");
        for item in &all[lo..=hi] {
            set.insert((self.id_of)(item));
        }
        Ok(true)
    }

    fn get_item_id(&self, item: &T) -> RowId {
        (self.id_of)(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
        name: String,
    }

    fn fixture() -> InMemoryDataSource<Item> {
        InMemoryDataSource::new(
            vec![
                Item { id: "1".into(), name: "banana".into() },
                Item { id: "2".into(), name: "apple".into() },
                Item { id: "3".into(), name: "cherry".into() },
            ],
            |item: &Item| RowId::from(item.id.clone()),
        )
        .with_sort_cmp(|a, b, field| match field {
            "name" => a.name.cmp(&b.name),
            _ => Ordering::Equal,
        })
        .with_filter_pred(|item, field, value| match (field, value) {
            ("name_contains", MetaValue::Text(needle)) => item.name.contains(needle.as_str()),
            _ => true,
        })
    }

    #[tokio::test]
    async fn load_chunk_respects_window() {
        let src = fixture();
        let req = DataRequest::new(1, 2);
        let chunk = src.load_chunk(req.clone()).await.unwrap();
        assert_eq!(chunk.start, 1);
        assert_eq!(chunk.rows.len(), 2);
        assert_eq!(chunk.request, req);
    }

    #[tokio::test]
    async fn get_total_reflects_filter() {
        let src = fixture();
        let mut filters = virtua_model::MetaMap::new();
        filters.insert("name_contains".into(), MetaValue::from("an"));
        let ctx = RequestContext {
            filters,
            ..Default::default()
        };
        let total = src.get_total(&ctx).await.unwrap();
        assert_eq!(total, 1); // only "banana" contains "an"
    }

    #[tokio::test]
    async fn sort_applies_before_windowing() {
        let src = fixture();
        let req = DataRequest::new(0, 3).with_sort(vec!["name".into()], vec![SortDirection::Asc]);
        let chunk = src.load_chunk(req).await.unwrap();
        let names: Vec<&str> = chunk.rows.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "banana", "cherry"]);
    }

    #[tokio::test]
    async fn selection_round_trips() {
        let src = fixture();
        let ok = src.set_selected(0, true).await.unwrap();
        assert!(ok);
        let chunk = src.load_chunk(DataRequest::new(0, 1)).await.unwrap();
        assert!(chunk.rows[0].selected);
    }

    #[tokio::test]
    async fn select_all_then_clear() {
        let src = fixture();
        src.select_all().await.unwrap();
        let chunk = src.load_chunk(DataRequest::new(0, 3)).await.unwrap();
        assert!(chunk.rows.iter().all(|r| r.selected));
        src.clear_selection().await.unwrap();
        let chunk = src.load_chunk(DataRequest::new(0, 3)).await.unwrap();
        assert!(chunk.rows.iter().all(|r| !r.selected));
    }

    #[tokio::test]
    async fn set_selected_out_of_range_is_permanent_error() {
        let src = fixture();
        let err = src.set_selected(99, true).await.unwrap_err();
        assert!(!err.is_transient());
    }
}
