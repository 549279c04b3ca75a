//! In-process document store used by the test suites.
//!
//! Mirrors the observable semantics of the real store: system attributes on
//! every document, equality filters, attribute ordering, merge-on-update, and
//! `NotFound` for absent ids. Insertion order is preserved via a monotonic
//! `$sequence` attribute so creation-time ordering is deterministic even when
//! two documents share a timestamp.

use crate::{DocumentList, DocumentStore, Query, StoreError};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use uuid::Uuid;

/// Memory-backed [`DocumentStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, AtomicOrdering::Relaxed)
    }

    fn has_id(document: &Value, id: &str) -> bool {
        document.get("$id").and_then(Value::as_str) == Some(id)
    }

    fn document_matches(document: &Value, queries: &[Query]) -> bool {
        queries.iter().all(|query| match query {
            Query::Equal(attribute, value) => document.get(attribute) == Some(value),
            Query::OrderAsc(_) | Query::OrderDesc(_) => true,
        })
    }

    /// Compares two documents on an attribute, falling back to insertion
    /// order (`$sequence`) so sorts are total and deterministic.
    fn compare_attribute(a: &Value, b: &Value, attribute: &str) -> Ordering {
        let left = a.get(attribute).unwrap_or(&Value::Null);
        let right = b.get(attribute).unwrap_or(&Value::Null);
        let ordering = match (left, right) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        };
        ordering.then_with(|| {
            let seq = |v: &Value| v.get("$sequence").and_then(Value::as_u64).unwrap_or(0);
            seq(a).cmp(&seq(b))
        })
    }

    fn sort_documents(documents: &mut [Value], queries: &[Query]) {
        // Later clauses are subordinate to earlier ones, so apply them in
        // reverse with a stable sort.
        for query in queries.iter().rev() {
            match query {
                Query::OrderAsc(attribute) => {
                    documents.sort_by(|a, b| Self::compare_attribute(a, b, attribute));
                }
                Query::OrderDesc(attribute) => {
                    documents.sort_by(|a, b| Self::compare_attribute(b, a, attribute));
                }
                Query::Equal(..) => {}
            }
        }
    }

    fn as_object(data: Value) -> Result<serde_json::Map<String, Value>, StoreError> {
        match data {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Unexpected {
                status: 400,
                message: format!("document data must be a JSON object, got {other}"),
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let collections = self.collections.read().expect("memory store lock poisoned");
        collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| Self::has_id(d, id)))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError> {
        let collections = self.collections.read().expect("memory store lock poisoned");
        let mut documents: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| Self::document_matches(d, queries))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Self::sort_documents(&mut documents, queries);
        let total = documents.len() as u64;
        Ok(DocumentList { documents, total })
    }

    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Value,
    ) -> Result<Value, StoreError> {
        let mut fields = Self::as_object(data)?;
        let id = match id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().simple().to_string(),
        };
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        fields.insert("$id".into(), json!(id));
        fields.insert("$createdAt".into(), json!(now));
        fields.insert("$updatedAt".into(), json!(now));
        fields.insert("$sequence".into(), json!(self.next_sequence()));
        let document = Value::Object(fields);

        let mut collections = self.collections.write().expect("memory store lock poisoned");
        let documents = collections.entry(collection.to_string()).or_default();
        if documents.iter().any(|d| Self::has_id(d, &id)) {
            return Err(StoreError::Unexpected {
                status: 409,
                message: format!("document {id} already exists in {collection}"),
            });
        }
        documents.push(document.clone());
        Ok(document)
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> Result<Value, StoreError> {
        let fields = Self::as_object(data)?;
        let mut collections = self.collections.write().expect("memory store lock poisoned");
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| Self::has_id(d, id)))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        let target = document
            .as_object_mut()
            .expect("memory store documents are always objects");
        for (key, value) in fields {
            // System attributes are store-owned.
            if !key.starts_with('$') {
                target.insert(key, value);
            }
        }
        target.insert(
            "$updatedAt".into(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().expect("memory store lock poisoned");
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let before = documents.len();
        documents.retain(|d| !Self::has_id(d, id));
        if documents.len() == before {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let store = MemoryStore::new();
        let created = store
            .create("badges", Some("BADGE_1"), json!({"name": "Starter"}))
            .await
            .unwrap();
        assert_eq!(created["$id"], "BADGE_1");
        assert!(created["$createdAt"].is_string());

        let fetched = store.get("badges", "BADGE_1").await.unwrap();
        assert_eq!(fetched["name"], "Starter");
    }

    #[tokio::test]
    async fn get_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("badges", "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_filters_and_orders() {
        let store = MemoryStore::new();
        for (id, course, order) in [("L1", "C1", 2), ("L2", "C1", 1), ("L3", "C2", 1)] {
            store
                .create("lessons", Some(id), json!({"courseId": course, "order": order}))
                .await
                .unwrap();
        }

        let list = store
            .list(
                "lessons",
                &[Query::equal("courseId", "C1"), Query::order_asc("order")],
            )
            .await
            .unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.documents[0]["$id"], "L2");
        assert_eq!(list.documents[1]["$id"], "L1");
    }

    #[tokio::test]
    async fn created_desc_breaks_timestamp_ties_by_insertion() {
        let store = MemoryStore::new();
        store.create("users", Some("U1"), json!({})).await.unwrap();
        store.create("users", Some("U2"), json!({})).await.unwrap();

        let list = store
            .list("users", &[Query::order_desc("$createdAt")])
            .await
            .unwrap();
        assert_eq!(list.documents[0]["$id"], "U2");
        assert_eq!(list.documents[1]["$id"], "U1");
    }

    #[tokio::test]
    async fn update_merges_and_preserves_other_fields() {
        let store = MemoryStore::new();
        store
            .create("quizzes", Some("Q1"), json!({"title": "Quiz", "attemptCount": 0}))
            .await
            .unwrap();
        let updated = store
            .update("quizzes", "Q1", json!({"attemptCount": 1}))
            .await
            .unwrap();
        assert_eq!(updated["attemptCount"], 1);
        assert_eq!(updated["title"], "Quiz");
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let store = MemoryStore::new();
        store.create("users", Some("U1"), json!({})).await.unwrap();
        store.delete("users", "U1").await.unwrap();
        assert!(store.get("users", "U1").await.unwrap_err().is_not_found());
        assert!(store.delete("users", "U1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = MemoryStore::new();
        store.create("users", Some("U1"), json!({})).await.unwrap();
        let err = store.create("users", Some("U1"), json!({})).await.unwrap_err();
        assert!(!err.is_not_found());
    }
}
