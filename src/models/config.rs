//! Connection settings for the remote document store.

use std::path::Path;

use serde::Deserialize;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Prefix of environment variables read by [`StoreConfig::from_env`].
pub const ENV_PREFIX: &str = "FIREBASE";

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

/// Configuration for the document store client.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Project owning the database.
    pub project_id: String,
    /// Public web API key appended to requests when present.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_database_id")]
    pub database_id: String,
    /// REST root, overridable for emulators.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl StoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            database_id: default_database_id(),
            base_url: default_base_url(),
        }
    }

    /// Loads settings from `.env` and `FIREBASE_*` environment variables.
    pub fn from_env() -> RepositoryResult<Self> {
        dotenvy::dotenv().ok();
        Self::load(None)
    }

    /// Loads settings from a YAML file, with `FIREBASE_*` variables taking
    /// precedence over the file.
    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        Self::load(Some(path.as_ref()))
    }

    fn load(path: Option<&Path>) -> RepositoryResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| RepositoryError::Config(e.to_string()))?;

        let config: StoreConfig = settings
            .try_deserialize()
            .map_err(|e| RepositoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> RepositoryResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(RepositoryError::Config("project_id cannot be empty".into()));
        }
        Ok(())
    }

    /// Resource path of the database's document root.
    pub fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database_id
        )
    }

    /// Endpoint accepting structured queries.
    pub fn run_query_url(&self) -> String {
        format!(
            "{}/{}:runQuery",
            self.base_url.trim_end_matches('/'),
            self.documents_path()
        )
    }
}
