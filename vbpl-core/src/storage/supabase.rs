use std::env;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::common::error::{ImportError, Result};
use crate::domain::{Agency, DocumentRecord, InsertedDocument};
use crate::storage::traits::Datastore;

/// Datastore backed by Supabase's PostgREST endpoint.
///
/// Talks to `/rest/v1/agencies` and `/rest/v1/documents` using the service
/// role key, which bypasses row level security for the import run.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    /// Reads `SUPABASE_URL` (falling back to `NEXT_PUBLIC_SUPABASE_URL`) and
    /// `SUPABASE_SERVICE_ROLE_KEY` from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SUPABASE_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_URL"))
            .unwrap_or_default();
        if base_url.trim().is_empty() {
            return Err(ImportError::Config {
                message: "SUPABASE_URL (or NEXT_PUBLIC_SUPABASE_URL) is not set; add it to .env.local"
                    .to_string(),
            });
        }

        let service_key = env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default();
        if service_key.trim().is_empty() {
            return Err(ImportError::Config {
                message: "SUPABASE_SERVICE_ROLE_KEY is not set; add it to .env.local".to_string(),
            });
        }

        Ok(Self::new(base_url, service_key))
    }

    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.service_key.as_str())
            .header("Authorization", format!("Bearer {}", self.service_key))
    }
}

#[async_trait]
impl Datastore for SupabaseStore {
    async fn find_agency_by_name(&self, name: &str) -> Result<Option<Agency>> {
        let filter = format!("eq.{}", name);
        let response = self
            .authorize(self.client.get(self.table_url("agencies")))
            .query(&[("select", "id,name"), ("name", filter.as_str()), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::Datastore {
                message: format!("Agency lookup failed: {} - {}", status, body),
            });
        }

        let body = response.text().await?;
        let agencies: Vec<Agency> = serde_json::from_str(&body)?;
        Ok(agencies.into_iter().next())
    }

    async fn create_agency(&self, name: &str) -> Result<Agency> {
        let response = self
            .authorize(self.client.post(self.table_url("agencies")))
            .header("Prefer", "return=representation")
            .json(&json!({ "name": name }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::Datastore {
                message: format!("Agency insert failed: {} - {}", status, body),
            });
        }

        let body = response.text().await?;
        let created: Vec<Agency> = serde_json::from_str(&body)?;
        created.into_iter().next().ok_or_else(|| ImportError::Datastore {
            message: format!("Agency insert for '{}' returned no representation", name),
        })
    }

    async fn bulk_insert_documents(&self, records: &[DocumentRecord]) -> Result<Vec<InsertedDocument>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Inserting {} document records", records.len());
        let response = self
            .authorize(self.client.post(self.table_url("documents")))
            .query(&[("select", "id")])
            .header("Prefer", "return=representation")
            .json(records)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::Datastore {
                message: format!("Document insert failed: {} - {}", status, body),
            });
        }

        let body = response.text().await?;
        let inserted: Vec<InsertedDocument> = serde_json::from_str(&body)?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutations stay inside this one test so nothing races.
    #[test]
    fn test_from_env_validates_configuration() {
        env::remove_var("SUPABASE_URL");
        env::remove_var("NEXT_PUBLIC_SUPABASE_URL");
        env::remove_var("SUPABASE_SERVICE_ROLE_KEY");

        let err = SupabaseStore::from_env().err().unwrap();
        assert!(err.to_string().contains("SUPABASE_URL"));

        env::set_var("NEXT_PUBLIC_SUPABASE_URL", "https://demo.supabase.co/");
        let err = SupabaseStore::from_env().err().unwrap();
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));

        env::set_var("SUPABASE_SERVICE_ROLE_KEY", "service-key");
        let store = SupabaseStore::from_env().unwrap();
        // Trailing slash on the URL must not double up in endpoints
        assert_eq!(
            store.table_url("documents"),
            "https://demo.supabase.co/rest/v1/documents"
        );

        env::remove_var("NEXT_PUBLIC_SUPABASE_URL");
        env::remove_var("SUPABASE_SERVICE_ROLE_KEY");
    }
}
