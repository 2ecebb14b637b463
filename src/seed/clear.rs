use anyhow::{Context, Result};
use futures::future::try_join_all;

use crate::store::traits::{BlobStore, CollectionStore};

/// Remove every document from a collection. Returns how many were deleted.
///
/// The remote store pages its listings, so listing repeats until a pass
/// comes back empty. Deletions within a pass run concurrently.
pub async fn clear_collection<S: CollectionStore + ?Sized>(store: &S, collection_id: &str) -> Result<usize> {
    log::info!("Clearing collection: {}", collection_id);

    let mut deleted = 0;
    loop {
        let documents = store
            .list_documents(collection_id)
            .await
            .with_context(|| format!("Failed to list collection '{}' for clearing", collection_id))?;
        if documents.is_empty() {
            break;
        }

        try_join_all(
            documents
                .iter()
                .map(|doc| store.delete_document(collection_id, &doc.id)),
        )
        .await
        .with_context(|| format!("Failed to clear collection '{}'", collection_id))?;
        deleted += documents.len();
    }

    log::info!("Cleared collection: {} ({} documents)", collection_id, deleted);
    Ok(deleted)
}

/// Remove every file from a storage bucket. Returns how many were deleted.
pub async fn clear_bucket<S: BlobStore + ?Sized>(store: &S, bucket_id: &str) -> Result<usize> {
    log::info!("Clearing storage bucket: {}", bucket_id);

    let mut deleted = 0;
    loop {
        let files = store
            .list_files(bucket_id)
            .await
            .with_context(|| format!("Failed to list bucket '{}' for clearing", bucket_id))?;
        if files.is_empty() {
            break;
        }

        try_join_all(files.iter().map(|file| store.delete_file(bucket_id, &file.id)))
            .await
            .with_context(|| format!("Failed to clear bucket '{}'", bucket_id))?;
        deleted += files.len();
    }

    log::info!("Cleared storage bucket: {} ({} files)", bucket_id, deleted);
    Ok(deleted)
}
