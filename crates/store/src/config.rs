use std::path::Path;

use serde::Deserialize;

use crate::StoreError;

fn default_database() -> String {
    "(default)".into()
}

fn default_collection() -> String {
    "messages".into()
}

/// Connection parameters for the hosted document store.
///
/// Static configuration consumed once at startup; the page never reads
/// them again after the client is built.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl StoreConfig {
    /// Read configuration from `FOLIO_STORE_*` environment variables.
    /// `PROJECT_ID` and `API_KEY` are required; database and collection
    /// fall back to `(default)` and `messages`.
    pub fn from_env() -> Result<Self, StoreError> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Ok(Self {
            project_id: var("FOLIO_STORE_PROJECT_ID")
                .ok_or(StoreError::MissingConfig("FOLIO_STORE_PROJECT_ID"))?,
            api_key: var("FOLIO_STORE_API_KEY")
                .ok_or(StoreError::MissingConfig("FOLIO_STORE_API_KEY"))?,
            database: var("FOLIO_STORE_DATABASE").unwrap_or_else(default_database),
            collection: var("FOLIO_STORE_COLLECTION").unwrap_or_else(default_collection),
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Resource name of the target document within the store.
    pub fn document_name(&self, doc_id: &str) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}/{}",
            self.project_id, self.database, self.collection, doc_id
        )
    }

    /// URL of the atomic commit endpoint.
    pub fn commit_url(&self) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents:commit?key={}",
            self.project_id, self.database, self.api_key
        )
    }
}
