use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::common::error::{ImportError, Result};
use crate::domain::{Agency, DocumentRecord, InsertedDocument};
use crate::storage::traits::Datastore;

/// In-memory datastore used by tests.
///
/// Agencies get sequential ids the way the real table's bigint key does, and
/// insert failures can be injected to exercise the driver's batch handling.
pub struct InMemoryDatastore {
    agencies: Mutex<Vec<Agency>>,
    documents: Mutex<Vec<DocumentRecord>>,
    agency_creates: Mutex<usize>,
    failing_inserts: Mutex<usize>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self {
            agencies: Mutex::new(Vec::new()),
            documents: Mutex::new(Vec::new()),
            agency_creates: Mutex::new(0),
            failing_inserts: Mutex::new(0),
        }
    }

    /// Makes the next `count` bulk inserts fail.
    pub fn fail_next_inserts(&self, count: usize) {
        *self.failing_inserts.lock().unwrap() = count;
    }

    pub fn agencies(&self) -> Vec<Agency> {
        self.agencies.lock().unwrap().clone()
    }

    pub fn documents(&self) -> Vec<DocumentRecord> {
        self.documents.lock().unwrap().clone()
    }

    /// Number of `create_agency` calls that reached the store.
    pub fn agency_creates(&self) -> usize {
        *self.agency_creates.lock().unwrap()
    }
}

impl Default for InMemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Datastore for InMemoryDatastore {
    async fn find_agency_by_name(&self, name: &str) -> Result<Option<Agency>> {
        let agencies = self.agencies.lock().unwrap();
        Ok(agencies.iter().find(|agency| agency.name == name).cloned())
    }

    async fn create_agency(&self, name: &str) -> Result<Agency> {
        let mut agencies = self.agencies.lock().unwrap();
        let agency = Agency {
            id: agencies.len() as i64 + 1,
            name: name.to_string(),
        };
        agencies.push(agency.clone());
        *self.agency_creates.lock().unwrap() += 1;
        debug!("Created in-memory agency '{}' with id {}", agency.name, agency.id);
        Ok(agency)
    }

    async fn bulk_insert_documents(&self, records: &[DocumentRecord]) -> Result<Vec<InsertedDocument>> {
        let mut failing = self.failing_inserts.lock().unwrap();
        if *failing > 0 {
            *failing -= 1;
            return Err(ImportError::Datastore {
                message: "Injected insert failure".to_string(),
            });
        }
        drop(failing);

        let mut documents = self.documents.lock().unwrap();
        documents.extend_from_slice(records);
        Ok(records.iter().map(|_| InsertedDocument { id: Uuid::new_v4() }).collect())
    }
}
