// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use crate::config::{
    AdminConfig, AppConfig, CatalogConfig, LoggingConfig, ServerConfig, StorefrontConfig,
    ValidatedConfig,
};

#[derive(Debug, Clone)]
pub struct TestConfigBuilder {
    config: ValidatedConfig,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ValidatedConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 7080,
                    workers: 1,
                },
                admin: AdminConfig {
                    path: "/admin".to_string(),
                    localhost_only: true,
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                },
                app: AppConfig {
                    name: "Test Shop".to_string(),
                    description: "Test Description".to_string(),
                },
                storefront: StorefrontConfig::default(),
                catalog: CatalogConfig::default(),
            },
        }
    }

    pub fn with_admin_path(mut self, path: &str) -> Self {
        self.config.admin.path = path.to_string();
        self
    }

    pub fn with_localhost_only(mut self, localhost_only: bool) -> Self {
        self.config.admin.localhost_only = localhost_only;
        self
    }

    pub fn with_all_label(mut self, label: &str) -> Self {
        self.config.storefront.all_label = label.to_string();
        self
    }

    pub fn with_catalog_file(mut self, file: &str) -> Self {
        self.config.catalog.file = file.to_string();
        self
    }

    pub fn build(self) -> ValidatedConfig {
        self.config
    }
}

pub fn test_config() -> ValidatedConfig {
    TestConfigBuilder::new().build()
}
