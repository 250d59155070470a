use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use vbpl_core::common::error::Result;
use vbpl_core::storage::Datastore;

/// Find-or-create resolution of drafting agencies, cached for the run.
///
/// Each distinct name costs at most one lookup and one create; repeat names
/// across sheets come straight from the cache.
pub struct AgencyResolver {
    store: Arc<dyn Datastore>,
    cache: HashMap<String, i64>,
}

impl AgencyResolver {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    /// Resolves a raw agency cell to an agency id. Blank names resolve to
    /// `None`; unknown names are created in the datastore.
    pub async fn resolve(&mut self, name: &str) -> Result<Option<i64>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        if let Some(id) = self.cache.get(name) {
            return Ok(Some(*id));
        }

        if let Some(agency) = self.store.find_agency_by_name(name).await? {
            debug!("Found existing agency '{}' with id {}", name, agency.id);
            self.cache.insert(name.to_string(), agency.id);
            return Ok(Some(agency.id));
        }

        let agency = self.store.create_agency(name).await?;
        info!("Created new agency '{}' with id {}", name, agency.id);
        self.cache.insert(name.to_string(), agency.id);
        Ok(Some(agency.id))
    }
}
