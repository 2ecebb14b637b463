use crate::model::{Document, Id, StoredFile};
use anyhow::Result;
use serde_json::{Map, Value};

/// Keyed document store organized into named collections
#[async_trait::async_trait]
pub trait CollectionStore: Send + Sync {
    /// List the documents currently held by a collection
    async fn list_documents(&self, collection_id: &str) -> Result<Vec<Document>>;
    /// Create a document; pass `UNIQUE_ID` to let the store assign the id
    async fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document>;
    async fn delete_document(&self, collection_id: &str, document_id: &Id) -> Result<()>;
}

/// Object store holding binary assets
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn list_files(&self, bucket_id: &str) -> Result<Vec<StoredFile>>;
    async fn delete_file(&self, bucket_id: &str, file_id: &Id) -> Result<()>;
}

pub trait Store: CollectionStore + BlobStore + Send + Sync {}
impl<T: CollectionStore + BlobStore> Store for T {}
