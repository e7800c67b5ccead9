//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted capture settings.
///
/// Loading never fails on absence: a missing file yields an empty
/// config so env and CLI layers can fill the gaps during merging.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load settings from storage; fields absent from the file are
    /// `None`.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the given settings, replacing the stored file.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file.
    fn path(&self) -> PathBuf;

    /// Whether a config file exists yet.
    fn exists(&self) -> bool;

    /// Write a fresh file with default settings.
    /// Fails if one already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
