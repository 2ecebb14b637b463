use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::AppConfig;
use crate::model::{Document, DocumentList, FileList, Id, StoredFile};
use crate::store::traits::{BlobStore, CollectionStore};

/// Error body returned by the Appwrite REST API
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{status} {kind}: {message}")]
pub struct ApiError {
    #[serde(skip, default)]
    pub status: u16,
    #[serde(default)]
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

/// Appwrite database and storage client bound to one database
#[derive(Debug, Clone)]
pub struct AppwriteStore {
    http_client: reqwest::Client,
    endpoint: String,
    database_id: String,
}

impl AppwriteStore {
    pub fn new(endpoint: &str, project_id: &str, api_key: &str, database_id: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(project_id).context("Invalid Appwrite project id")?,
        );
        headers.insert(
            "X-Appwrite-Key",
            HeaderValue::from_str(api_key).context("Invalid Appwrite API key")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent("menu-seed/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            database_id: database_id.to_string(),
        })
    }

    /// Build a store from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.endpoint(),
            &config.project_id()?,
            &config.api_key()?,
            &config.database.database_id,
        )
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn files_url(&self, bucket_id: &str) -> String {
        format!("{}/storage/buckets/{}/files", self.endpoint, bucket_id)
    }

    /// Turn a non-success response into an `ApiError`
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let mut error = serde_json::from_str::<ApiError>(&body).unwrap_or_else(|_| ApiError {
            status: 0,
            code: status.as_u16(),
            kind: "unknown".to_string(),
            message: body,
        });
        error.status = status.as_u16();
        Err(error.into())
    }
}

#[async_trait::async_trait]
impl CollectionStore for AppwriteStore {
    async fn list_documents(&self, collection_id: &str) -> Result<Vec<Document>> {
        let url = self.documents_url(collection_id);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to list documents in '{}'", collection_id))?;
        let list: DocumentList = Self::check(response)
            .await
            .with_context(|| format!("Failed to list documents in '{}'", collection_id))?
            .json()
            .await
            .context("Failed to decode document list")?;

        Ok(list.documents)
    }

    async fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document> {
        let url = self.documents_url(collection_id);
        log::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "documentId": document_id, "data": fields }))
            .send()
            .await
            .with_context(|| format!("Failed to create document in '{}'", collection_id))?;
        let document: Document = Self::check(response)
            .await
            .with_context(|| format!("Failed to create document in '{}'", collection_id))?
            .json()
            .await
            .context("Failed to decode created document")?;

        Ok(document)
    }

    async fn delete_document(&self, collection_id: &str, document_id: &Id) -> Result<()> {
        let url = format!("{}/{}", self.documents_url(collection_id), document_id);
        log::debug!("DELETE {}", url);

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to delete document '{}'", document_id))?;
        Self::check(response)
            .await
            .with_context(|| format!("Failed to delete document '{}' from '{}'", document_id, collection_id))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl BlobStore for AppwriteStore {
    async fn list_files(&self, bucket_id: &str) -> Result<Vec<StoredFile>> {
        let url = self.files_url(bucket_id);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to list files in bucket '{}'", bucket_id))?;
        let list: FileList = Self::check(response)
            .await
            .with_context(|| format!("Failed to list files in bucket '{}'", bucket_id))?
            .json()
            .await
            .context("Failed to decode file list")?;

        Ok(list.files)
    }

    async fn delete_file(&self, bucket_id: &str, file_id: &Id) -> Result<()> {
        let url = format!("{}/{}", self.files_url(bucket_id), file_id);
        log::debug!("DELETE {}", url);

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to delete file '{}'", file_id))?;
        Self::check(response)
            .await
            .with_context(|| format!("Failed to delete file '{}' from bucket '{}'", file_id, bucket_id))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_the_rest_layout() {
        let store = AppwriteStore::new("https://cloud.appwrite.io/v1/", "project", "key", "db1").unwrap();

        assert_eq!(
            store.documents_url("menu"),
            "https://cloud.appwrite.io/v1/databases/db1/collections/menu/documents"
        );
        assert_eq!(
            store.files_url("assets"),
            "https://cloud.appwrite.io/v1/storage/buckets/assets/files"
        );
    }

    #[test]
    fn api_error_parses_appwrite_body() {
        let body = r#"{"message":"Invalid document structure: Missing required attribute \"categories\"","code":400,"type":"document_invalid_structure","version":"1.6.0"}"#;
        let mut error: ApiError = serde_json::from_str(body).unwrap();
        error.status = 400;

        assert_eq!(error.kind, "document_invalid_structure");
        assert!(error.to_string().starts_with("400 document_invalid_structure:"));
    }

    #[test]
    fn header_values_are_validated() {
        let result = AppwriteStore::new("https://cloud.appwrite.io/v1", "project", "bad\nkey", "db1");
        assert!(result.is_err());
    }
}
