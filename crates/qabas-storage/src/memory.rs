// In-memory document store for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Document IDs generated via uuid v7 (time-ordered)
//
// Mirrors the PostgreSQL store so the API can run without a database.
// All data is lost on restart.

use std::collections::HashMap;

use parking_lot::RwLock;
use qabas_core::document::{matches_all, merge_fields, Fields};
use qabas_core::{Document, Filter, Query, Result, StoreError, WriteBatch, WriteOp};
use serde_json::Value;

use crate::new_document_id;

type Collection = HashMap<String, Fields>;

#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    pub async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let candidates = docs
            .iter()
            .filter(|(_, data)| query.matches(data))
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .collect::<Vec<_>>();
        Ok(query.apply(candidates))
    }

    pub async fn insert(&self, collection: &str, data: Fields) -> Result<Document> {
        let id = new_document_id();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data.clone());
        Ok(Document::new(id, data))
    }

    pub async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<Document> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data.clone());
        Ok(Document::new(id, data))
    }

    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.write();
        let Some(data) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(None);
        };
        merge_fields(data, patch);
        Ok(Some(Document::new(id, data.clone())))
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }

    /// Add `delta` to an integer field under the write lock; missing fields count as 0
    pub async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<Option<i64>> {
        let mut collections = self.collections.write();
        let Some(data) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(None);
        };
        let current = data.get(field).and_then(Value::as_i64).unwrap_or(0);
        let next = current + delta;
        data.insert(field.to_string(), Value::from(next));
        Ok(Some(next))
    }

    /// Apply a batch atomically: ops are staged and only written if all succeed
    pub async fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut collections = self.collections.write();
        let mut staged: Staged = HashMap::new();

        for op in batch.into_ops() {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    data,
                } => {
                    staged.insert((collection, id), Some(data));
                }
                WriteOp::Update {
                    collection,
                    id,
                    patch,
                } => {
                    let key = (collection, id);
                    let Some(mut data) = current(&collections, &staged, &key) else {
                        return Err(StoreError::not_found(&key.0, &key.1));
                    };
                    merge_fields(&mut data, patch);
                    staged.insert(key, Some(data));
                }
                WriteOp::Delete { collection, id } => {
                    staged.insert((collection, id), None);
                }
                WriteOp::Increment {
                    collection,
                    id,
                    field,
                    delta,
                } => {
                    let key = (collection, id);
                    let Some(mut data) = current(&collections, &staged, &key) else {
                        return Err(StoreError::not_found(&key.0, &key.1));
                    };
                    let next = data.get(&field).and_then(Value::as_i64).unwrap_or(0) + delta;
                    data.insert(field, Value::from(next));
                    staged.insert(key, Some(data));
                }
                WriteOp::UpdateWhere {
                    collection,
                    filters,
                    patch,
                } => {
                    for (key, mut data) in matching(&collections, &staged, &collection, &filters) {
                        merge_fields(&mut data, patch.clone());
                        staged.insert(key, Some(data));
                    }
                }
                WriteOp::DeleteWhere {
                    collection,
                    filters,
                } => {
                    for (key, _) in matching(&collections, &staged, &collection, &filters) {
                        staged.insert(key, None);
                    }
                }
            }
        }

        for ((collection, id), state) in staged {
            match state {
                Some(data) => {
                    collections.entry(collection).or_default().insert(id, data);
                }
                None => {
                    if let Some(docs) = collections.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
            }
        }
        Ok(())
    }
}

type Key = (String, String);
type Staged = HashMap<Key, Option<Fields>>;

/// Document state as the batch sees it: staged writes shadow committed data
fn current(collections: &HashMap<String, Collection>, staged: &Staged, key: &Key) -> Option<Fields> {
    match staged.get(key) {
        Some(state) => state.clone(),
        None => collections
            .get(&key.0)
            .and_then(|docs| docs.get(&key.1))
            .cloned(),
    }
}

fn matching(
    collections: &HashMap<String, Collection>,
    staged: &Staged,
    collection: &str,
    filters: &[Filter],
) -> Vec<(Key, Fields)> {
    let committed = collections
        .get(collection)
        .into_iter()
        .flat_map(|docs| docs.keys());
    let pending = staged
        .keys()
        .filter(|(c, _)| c == collection)
        .map(|(_, id)| id);

    let mut ids: Vec<&String> = committed.chain(pending).collect();
    ids.sort();
    ids.dedup();

    ids.into_iter()
        .filter_map(|id| {
            let key = (collection.to_string(), id.clone());
            let data = current(collections, staged, &key)?;
            matches_all(filters, &data).then_some((key, data))
        })
        .collect()
}
