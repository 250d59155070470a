use async_trait::async_trait;

use crate::common::error::Result;
use crate::domain::{Agency, DocumentRecord, InsertedDocument};

/// Backend the import pipeline writes to.
///
/// Production uses [`SupabaseStore`](crate::storage::SupabaseStore); tests run
/// against [`InMemoryDatastore`](crate::storage::InMemoryDatastore).
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Looks up an agency by its exact name.
    async fn find_agency_by_name(&self, name: &str) -> Result<Option<Agency>>;

    /// Creates an agency and returns it with its assigned id.
    async fn create_agency(&self, name: &str) -> Result<Agency>;

    /// Inserts a batch of document records, returning one id per inserted row.
    async fn bulk_insert_documents(&self, records: &[DocumentRecord]) -> Result<Vec<InsertedDocument>>;
}
