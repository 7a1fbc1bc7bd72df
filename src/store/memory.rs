// ABOUTME: In-memory document store used by tests and offline development
// ABOUTME: Backs watches with state channels so subscribers always see the latest snapshot
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::collections::hash_map::Entry;
use std::collections::{btree_map, BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use super::{
    CollectionPath, CollectionSnapshot, CollectionWatch, Document, DocumentPath, DocumentSnapshot,
    DocumentStore, DocumentWatch,
};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// Shared mutable state behind one lock
///
/// Watch senders live next to the data so every mutation can publish the
/// new snapshot under the same write lock, keeping pushes ordered with
/// writes. Senders whose receivers are all gone are pruned lazily on the
/// next mutation of their path.
#[derive(Default)]
struct StoreState {
    collections: Collections,
    document_watchers: HashMap<String, watch::Sender<DocumentSnapshot>>,
    collection_watchers: HashMap<String, watch::Sender<CollectionSnapshot>>,
}

/// In-memory document store
///
/// Uses `Arc<RwLock<StoreState>>` for shared state so clones hand out views
/// of the same documents, mirroring how every component of the client talks
/// to one remote store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn document_in(collections: &Collections, collection: &str, id: &str) -> Option<Document> {
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_owned(),
                fields: fields.clone(),
            })
    }

    fn documents_in(collections: &Collections, collection: &str) -> Vec<Document> {
        collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Push the post-mutation snapshot to any watcher of the document or
    /// its collection, dropping senders nobody listens to anymore
    fn notify_watchers(state: &mut StoreState, collection: &str, id: &str) {
        let document_key = format!("{collection}/{id}");
        if let Entry::Occupied(entry) = state.document_watchers.entry(document_key) {
            if entry.get().is_closed() {
                entry.remove();
            } else {
                entry.get().send_replace(DocumentSnapshot {
                    document: Self::document_in(&state.collections, collection, id),
                });
            }
        }

        if let Entry::Occupied(entry) = state.collection_watchers.entry(collection.to_owned()) {
            if entry.get().is_closed() {
                entry.remove();
            } else {
                entry.get().send_replace(CollectionSnapshot {
                    documents: Self::documents_in(&state.collections, collection),
                });
            }
        }
    }

    fn into_object(fields: Value) -> AppResult<serde_json::Map<String, Value>> {
        match fields {
            Value::Object(map) => Ok(map),
            other => Err(AppError::invalid_input(format!(
                "document fields must be a JSON object, got {other}"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>> {
        let state = self.state.read().await;
        let (collection, id) = path.split();
        Ok(Self::document_in(&state.collections, collection.as_str(), id))
    }

    async fn set(&self, path: &DocumentPath, fields: Value) -> AppResult<()> {
        let incoming = Self::into_object(fields)?;
        let (collection, id) = path.split();

        let mut state = self.state.write().await;
        state
            .collections
            .entry(collection.as_str().to_owned())
            .or_default()
            .insert(id.to_owned(), Value::Object(incoming));
        Self::notify_watchers(&mut state, collection.as_str(), id);
        drop(state);

        AppLogger::log_store_operation("set", path.as_str(), true);
        Ok(())
    }

    async fn set_merge(&self, path: &DocumentPath, fields: Value) -> AppResult<()> {
        let incoming = Self::into_object(fields)?;
        let (collection, id) = path.split();

        let mut state = self.state.write().await;
        match state
            .collections
            .entry(collection.as_str().to_owned())
            .or_default()
            .entry(id.to_owned())
        {
            btree_map::Entry::Occupied(mut entry) => {
                if let Value::Object(existing) = entry.get_mut() {
                    existing.extend(incoming);
                } else {
                    entry.insert(Value::Object(incoming));
                }
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(Value::Object(incoming));
            }
        }
        Self::notify_watchers(&mut state, collection.as_str(), id);
        drop(state);

        AppLogger::log_store_operation("merge", path.as_str(), true);
        Ok(())
    }

    async fn add(&self, collection: &CollectionPath, fields: Value) -> AppResult<String> {
        let incoming = Self::into_object(fields)?;
        let id = Uuid::new_v4().to_string();

        let mut state = self.state.write().await;
        state
            .collections
            .entry(collection.as_str().to_owned())
            .or_default()
            .insert(id.clone(), Value::Object(incoming));
        Self::notify_watchers(&mut state, collection.as_str(), &id);
        drop(state);

        AppLogger::log_store_operation("add", collection.as_str(), true);
        Ok(id)
    }

    async fn delete(&self, path: &DocumentPath) -> AppResult<()> {
        let (collection, id) = path.split();

        let mut state = self.state.write().await;
        let removed = state
            .collections
            .get_mut(collection.as_str())
            .and_then(|docs| docs.remove(id));
        if removed.is_some() {
            Self::notify_watchers(&mut state, collection.as_str(), id);
        }
        drop(state);

        AppLogger::log_store_operation("delete", path.as_str(), true);
        Ok(())
    }

    async fn list(&self, collection: &CollectionPath) -> AppResult<Vec<Document>> {
        let state = self.state.read().await;
        Ok(Self::documents_in(&state.collections, collection.as_str()))
    }

    async fn watch_document(&self, path: &DocumentPath) -> DocumentWatch {
        let mut state = self.state.write().await;
        let (collection, id) = path.split();
        let current = DocumentSnapshot {
            document: Self::document_in(&state.collections, collection.as_str(), id),
        };

        let sender = state
            .document_watchers
            .entry(path.as_str().to_owned())
            .or_insert_with(|| watch::channel(current).0);
        DocumentWatch::new(sender.subscribe())
    }

    async fn watch_collection(&self, collection: &CollectionPath) -> CollectionWatch {
        let mut state = self.state.write().await;
        let current = CollectionSnapshot {
            documents: Self::documents_in(&state.collections, collection.as_str()),
        };

        let sender = state
            .collection_watchers
            .entry(collection.as_str().to_owned())
            .or_insert_with(|| watch::channel(current).0);
        CollectionWatch::new(sender.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UserScope;
    use serde_json::json;
    use tokio_stream::StreamExt;

    fn scope() -> UserScope {
        UserScope::new("pierre-fitness", "u1")
    }

    #[tokio::test]
    async fn test_merge_updates_only_listed_fields() {
        let store = InMemoryStore::new();
        let path = scope().daily_log("2026-01-15".parse().unwrap());

        store
            .set_merge(&path, json!({ "weight": 75.0, "sleepHours": 7.5 }))
            .await
            .unwrap();
        store
            .set_merge(&path, json!({ "weight": 74.6 }))
            .await
            .unwrap();

        let document = store.get(&path).await.unwrap().unwrap();
        assert_eq!(document.fields["weight"], 74.6);
        assert_eq!(document.fields["sleepHours"], 7.5);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_document() {
        let store = InMemoryStore::new();
        let path = scope().workout_plan();

        store
            .set(&path, json!({ "plan": [], "createdAt": 1 }))
            .await
            .unwrap();
        store.set(&path, json!({ "plan": [] })).await.unwrap();

        let document = store.get(&path).await.unwrap().unwrap();
        assert!(document.fields.get("createdAt").is_none());
    }

    #[tokio::test]
    async fn test_add_generates_unique_ids() {
        let store = InMemoryStore::new();
        let collection = scope().food_logs();

        let first = store
            .add(&collection, json!({ "name": "Oatmeal" }))
            .await
            .unwrap();
        let second = store
            .add(&collection, json!({ "name": "Salad" }))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(store.list(&collection).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_object_fields_rejected() {
        let store = InMemoryStore::new();
        let err = store
            .set(&scope().profile(), json!("just a string"))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_watch_yields_current_state_then_changes() {
        let store = InMemoryStore::new();
        let path = scope().profile();

        let mut watch = store.watch_document(&path).await;
        assert!(!watch.next().await.unwrap().exists());

        store
            .set_merge(&path, json!({ "height": 175 }))
            .await
            .unwrap();
        let snapshot = watch.next().await.unwrap();
        assert_eq!(snapshot.document.unwrap().fields["height"], 175);
    }

    #[tokio::test]
    async fn test_delete_missing_document_is_noop() {
        let store = InMemoryStore::new();
        store.delete(&scope().food_log("nope")).await.unwrap();
    }
}
