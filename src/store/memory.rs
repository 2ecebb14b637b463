use anyhow::{bail, Result};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::{generate_id, resolve_document_id, Document, Id, StoredFile};
use crate::store::traits::{BlobStore, CollectionStore};

/// One call made against the store, in the order it was observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListDocuments { collection: String },
    /// Recorded once the document exists and its id is known
    CreateDocument { collection: String, id: Id },
    /// A create the store refused, with the fields it was given
    RejectedCreate {
        collection: String,
        fields: Map<String, Value>,
    },
    DeleteDocument { collection: String, id: Id },
    /// A delete the store refused
    RejectedDelete { collection: String, id: Id },
    ListFiles { bucket: String },
    DeleteFile { bucket: String, id: Id },
}

impl StoreCall {
    pub fn is_create_in(&self, collection_id: &str) -> bool {
        matches!(self, StoreCall::CreateDocument { collection, .. } if collection == collection_id)
    }

    pub fn is_delete_in(&self, collection_id: &str) -> bool {
        matches!(self, StoreCall::DeleteDocument { collection, .. } if collection == collection_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultOp {
    Create,
    Delete,
}

/// Fail the `nth` (1-based) create or delete in a collection
#[derive(Debug, Clone)]
struct Fault {
    op: FaultOp,
    collection: String,
    nth: usize,
    seen: usize,
}

/// In-process collection and blob store
///
/// Documents keep insertion order and get a `$createdAt` stamp. A document
/// with a `null` attribute is rejected, the same way the remote store
/// rejects a missing required relationship. With a page size set, listings
/// return at most that many entries, like the remote store's paged lists.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    buckets: Arc<RwLock<HashMap<String, Vec<StoredFile>>>>,
    journal: Arc<Mutex<Vec<StoreCall>>>,
    faults: Arc<Mutex<Vec<Fault>>>,
    page_size: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit every listing to the first `page_size` entries
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Place a file in a bucket without going through the journal
    pub async fn put_file(&self, bucket_id: &str, name: &str) -> Id {
        let file = StoredFile {
            id: generate_id(),
            name: name.to_string(),
        };
        let id = file.id.clone();
        self.buckets
            .write()
            .await
            .entry(bucket_id.to_string())
            .or_default()
            .push(file);
        id
    }

    /// Make the `nth` create call against `collection_id` fail
    pub fn fail_create(&self, collection_id: &str, nth: usize) {
        self.add_fault(FaultOp::Create, collection_id, nth);
    }

    /// Make the `nth` delete call against `collection_id` fail
    pub fn fail_delete(&self, collection_id: &str, nth: usize) {
        self.add_fault(FaultOp::Delete, collection_id, nth);
    }

    fn add_fault(&self, op: FaultOp, collection_id: &str, nth: usize) {
        self.faults.lock().push(Fault {
            op,
            collection: collection_id.to_string(),
            nth,
            seen: 0,
        });
    }

    fn page<T: Clone>(&self, entries: &[T]) -> Vec<T> {
        let limit = self.page_size.unwrap_or(entries.len());
        entries.iter().take(limit).cloned().collect()
    }

    /// Snapshot of a collection's documents, without journaling
    pub async fn documents(&self, collection_id: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn files(&self, bucket_id: &str) -> Vec<StoredFile> {
        self.buckets
            .read()
            .await
            .get(bucket_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.journal.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.journal.lock().clear();
    }

    fn record(&self, call: StoreCall) {
        self.journal.lock().push(call);
    }

    fn validate_create(&self, collection_id: &str, fields: &Map<String, Value>) -> Result<()> {
        self.check_faults(FaultOp::Create, collection_id)?;

        if let Some((attribute, _)) = fields.iter().find(|(_, value)| value.is_null()) {
            bail!(
                "Invalid document structure: attribute \"{}\" in collection '{}' is null",
                attribute,
                collection_id
            );
        }
        Ok(())
    }

    fn check_faults(&self, op: FaultOp, collection_id: &str) -> Result<()> {
        let mut faults = self.faults.lock();
        for fault in faults
            .iter_mut()
            .filter(|f| f.op == op && f.collection == collection_id)
        {
            fault.seen += 1;
            if fault.seen == fault.nth {
                bail!(
                    "Injected failure on {:?} #{} in collection '{}'",
                    op,
                    fault.nth,
                    collection_id
                );
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CollectionStore for MemoryStore {
    async fn list_documents(&self, collection_id: &str) -> Result<Vec<Document>> {
        self.record(StoreCall::ListDocuments {
            collection: collection_id.to_string(),
        });
        Ok(self.page(&self.documents(collection_id).await))
    }

    async fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document> {
        if let Err(error) = self.validate_create(collection_id, &fields) {
            self.record(StoreCall::RejectedCreate {
                collection: collection_id.to_string(),
                fields,
            });
            return Err(error);
        }

        let mut fields = fields;
        fields.insert(
            "$createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        let document = Document {
            id: resolve_document_id(document_id),
            fields,
        };

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection_id.to_string()).or_default();
        if documents.iter().any(|d| d.id == document.id) {
            bail!(
                "Document with the requested ID '{}' already exists in '{}'",
                document.id,
                collection_id
            );
        }
        documents.push(document.clone());
        drop(collections);

        self.record(StoreCall::CreateDocument {
            collection: collection_id.to_string(),
            id: document.id.clone(),
        });
        Ok(document)
    }

    async fn delete_document(&self, collection_id: &str, document_id: &Id) -> Result<()> {
        if let Err(error) = self.check_faults(FaultOp::Delete, collection_id) {
            self.record(StoreCall::RejectedDelete {
                collection: collection_id.to_string(),
                id: document_id.clone(),
            });
            return Err(error);
        }

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection_id.to_string()).or_default();
        let before = documents.len();
        documents.retain(|d| &d.id != document_id);
        if documents.len() == before {
            bail!(
                "Document '{}' not found in collection '{}'",
                document_id,
                collection_id
            );
        }
        drop(collections);

        self.record(StoreCall::DeleteDocument {
            collection: collection_id.to_string(),
            id: document_id.clone(),
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryStore {
    async fn list_files(&self, bucket_id: &str) -> Result<Vec<StoredFile>> {
        self.record(StoreCall::ListFiles {
            bucket: bucket_id.to_string(),
        });
        Ok(self.page(&self.files(bucket_id).await))
    }

    async fn delete_file(&self, bucket_id: &str, file_id: &Id) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        let files = buckets.entry(bucket_id.to_string()).or_default();
        let before = files.len();
        files.retain(|f| &f.id != file_id);
        if files.len() == before {
            bail!("File '{}' not found in bucket '{}'", file_id, bucket_id);
        }
        drop(buckets);

        self.record(StoreCall::DeleteFile {
            bucket: bucket_id.to_string(),
            id: file_id.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNIQUE_ID;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_assigns_ids_and_keeps_order() {
        let store = MemoryStore::new();
        let first = store
            .create_document("categories", UNIQUE_ID, fields(json!({"name": "Pizza"})))
            .await
            .unwrap();
        let second = store
            .create_document("categories", UNIQUE_ID, fields(json!({"name": "Drinks"})))
            .await
            .unwrap();

        let listed = store.list_documents("categories").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].str_field("name"), Some("Drinks"));
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn null_attributes_are_rejected() {
        let store = MemoryStore::new();
        let result = store
            .create_document("menu", UNIQUE_ID, fields(json!({"name": "Margherita", "categories": null})))
            .await;

        assert!(result.is_err());
        assert!(store.documents("menu").await.is_empty());
        assert!(matches!(
            &store.calls()[..],
            [StoreCall::RejectedCreate { collection, fields }]
                if collection == "menu" && fields["categories"].is_null()
        ));
    }

    #[tokio::test]
    async fn injected_fault_hits_only_the_nth_create() {
        let store = MemoryStore::new();
        store.fail_create("categories", 2);

        assert!(store
            .create_document("categories", UNIQUE_ID, fields(json!({"name": "A"})))
            .await
            .is_ok());
        assert!(store
            .create_document("categories", UNIQUE_ID, fields(json!({"name": "B"})))
            .await
            .is_err());
        assert!(store
            .create_document("categories", UNIQUE_ID, fields(json!({"name": "C"})))
            .await
            .is_ok());
        assert_eq!(store.documents("categories").await.len(), 2);
    }

    #[tokio::test]
    async fn page_size_limits_listings() {
        let store = MemoryStore::new().with_page_size(2);
        for name in ["A", "B", "C"] {
            store
                .create_document("categories", UNIQUE_ID, fields(json!({ "name": name })))
                .await
                .unwrap();
        }

        let listed = store.list_documents("categories").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].str_field("name"), Some("A"));
        assert_eq!(store.documents("categories").await.len(), 3);
    }

    #[tokio::test]
    async fn injected_delete_fault_is_journaled() {
        let store = MemoryStore::new();
        let doc = store
            .create_document("menu", UNIQUE_ID, fields(json!({"name": "Margherita"})))
            .await
            .unwrap();
        store.fail_delete("menu", 1);

        assert!(store.delete_document("menu", &doc.id).await.is_err());
        assert_eq!(store.documents("menu").await.len(), 1);
        assert_eq!(
            store.calls().last(),
            Some(&StoreCall::RejectedDelete {
                collection: "menu".to_string(),
                id: doc.id.clone()
            })
        );
        assert!(store.delete_document("menu", &doc.id).await.is_ok());
    }

    #[tokio::test]
    async fn deleting_a_missing_document_fails() {
        let store = MemoryStore::new();
        let result = store.delete_document("menu", &"nope".to_string()).await;
        assert!(result.is_err());
    }
}
