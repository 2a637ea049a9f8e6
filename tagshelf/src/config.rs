// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const MAX_WORKERS: usize = 256;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    pub path: String,
    /// Only loopback peers may open the admin pages.
    #[serde(default = "default_localhost_only")]
    pub localhost_only: bool,
}

fn default_localhost_only() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorefrontConfig {
    #[serde(default = "default_category_base")]
    pub category_base: String,
    /// Label of the button that clears the tag selection.
    #[serde(default = "default_all_label")]
    pub all_label: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            category_base: default_category_base(),
            all_label: default_all_label(),
        }
    }
}

fn default_category_base() -> String {
    "/product-category".to_string()
}

fn default_all_label() -> String {
    "All".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    /// Catalog file, relative to the runtime root.
    #[serde(default = "default_catalog_file")]
    pub file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file: default_catalog_file(),
        }
    }
}

fn default_catalog_file() -> String {
    "catalog.yaml".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub storefront: StorefrontConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
    pub storefront: StorefrontConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::parse(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })
    }

    fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load(root)?.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        Self::validate_server(&self.server)?;
        Self::validate_logging(&self.logging)?;
        Self::validate_routes(&self.admin, &self.storefront)?;

        if self.storefront.all_label.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Storefront all_label must not be empty".to_string(),
            ));
        }

        let catalog_file = self.catalog.file.trim();
        if catalog_file.is_empty() || Path::new(catalog_file).is_absolute() {
            return Err(ConfigError::ValidationError(format!(
                "Catalog file must be a relative path, got: '{}'",
                self.catalog.file
            )));
        }

        Ok(ValidatedConfig {
            server: self.server,
            admin: self.admin,
            logging: self.logging,
            app: self.app,
            storefront: self.storefront,
            catalog: self.catalog,
        })
    }

    fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
        if !(1..=MAX_WORKERS).contains(&server.workers) {
            return Err(ConfigError::ValidationError(format!(
                "Server workers must be between 1 and {}, got: {}",
                MAX_WORKERS, server.workers
            )));
        }
        if server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Server host must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let level = logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Logging level must be one of {}, got: '{}'",
                LOG_LEVELS.join(", "),
                logging.level
            )));
        }
        Ok(())
    }

    fn validate_routes(
        admin: &AdminConfig,
        storefront: &StorefrontConfig,
    ) -> Result<(), ConfigError> {
        validate_route_prefix("Admin path", &admin.path)?;
        validate_route_prefix("Storefront category_base", &storefront.category_base)?;
        if admin.path == storefront.category_base {
            return Err(ConfigError::ValidationError(format!(
                "Admin path and category_base must differ, both are '{}'",
                admin.path
            )));
        }
        Ok(())
    }
}

fn validate_route_prefix(label: &str, value: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || value.len() < 2 || value.ends_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "{} must start with '/' and must not end with '/', got: '{}'",
            label, value
        )));
    }
    if value.contains(char::is_whitespace) || value.contains(['?', '#']) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be a plain path, got: '{}'",
            label, value
        )));
    }
    Ok(())
}
