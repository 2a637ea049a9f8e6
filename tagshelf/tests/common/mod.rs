// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use std::net::SocketAddr;
use std::sync::Arc;
use tagshelf::admin;
use tagshelf::app_state::AppState;
use tagshelf::builtin;
use tagshelf::catalog::YamlCatalog;
use tagshelf::config::ValidatedConfig;
use tagshelf::public;
use tagshelf::settings::YamlSettingsStore;
use tagshelf::util::test_config::TestConfigBuilder;
use tagshelf::util::test_fixtures::TestFixtureRoot;

/// Shoes carry red and blue tags, plus a hidden product tagged green.
pub const SHOP_CATALOG: &str = r#"categories:
  - { id: 10, slug: shoes, name: Shoes }
  - { id: 20, slug: hats, name: Hats }
  - { id: 30, slug: socks, name: Socks }
tags:
  - { id: 1, slug: red, name: Red }
  - { id: 2, slug: blue, name: Blue }
  - { id: 3, slug: green, name: Green }
  - { id: 4, slug: wool, name: Wool }
products:
  - { id: 100, name: Runner, price: "59.00", categories: [shoes], tags: [red, blue] }
  - { id: 101, name: Walker, price: "45.00", categories: [shoes], tags: [blue] }
  - { id: 102, name: Prototype, categories: [shoes], tags: [green], visible: false }
  - { id: 200, name: Beanie, categories: [hats], tags: [wool] }
"#;

pub fn loopback() -> SocketAddr {
    "127.0.0.1:40000".parse().expect("loopback addr")
}

pub fn remote() -> SocketAddr {
    "203.0.113.9:40000".parse().expect("remote addr")
}

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    pub fn new(catalog_yaml: &str) -> Self {
        Self::with_settings(catalog_yaml, None)
    }

    pub fn with_settings(catalog_yaml: &str, settings_yaml: Option<&str>) -> Self {
        Self::build(catalog_yaml, settings_yaml, TestConfigBuilder::new())
    }

    pub fn build(
        catalog_yaml: &str,
        settings_yaml: Option<&str>,
        config_builder: TestConfigBuilder,
    ) -> Self {
        let fixture = TestFixtureRoot::new_unique("tagshelf-it").expect("fixture root");
        fixture.init_runtime_layout().expect("fixture layout");
        fixture.write_catalog(catalog_yaml).expect("catalog file");
        if let Some(settings) = settings_yaml {
            fixture.write_settings(settings).expect("settings file");
        }

        let config = Arc::new(config_builder.build());
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");
        let catalog = YamlCatalog::load(&runtime_paths.catalog_file).expect("catalog");
        let settings = YamlSettingsStore::new(runtime_paths.settings_file.clone());
        let app_state = Arc::new(AppState::new(
            &config.app.name,
            runtime_paths,
            Arc::new(catalog),
            Arc::new(settings),
        ));

        Self {
            fixture,
            config,
            app_state,
        }
    }

    pub fn settings_file_contents(&self) -> String {
        std::fs::read_to_string(&self.app_state.runtime_paths.settings_file)
            .unwrap_or_default()
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let admin_path = harness.config.admin.path.clone();
    let localhost_only = harness.config.admin.localhost_only;
    let category_base = harness.config.storefront.category_base.clone();

    App::new()
        .app_data(web::Data::from(harness.config.clone()))
        .app_data(web::Data::from(harness.app_state.clone()))
        .configure(builtin::configure)
        .configure(|cfg| admin::configure(cfg, &admin_path, localhost_only))
        .configure(|cfg| public::configure(cfg, &category_base))
        .default_service(web::to(public::handlers::not_found))
}

/// Pulls the value of the hidden `token` input out of a rendered form.
pub fn extract_form_token(html: &str) -> Option<String> {
    let marker = r#"name="token" value=""#;
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('"')? + start;
    Some(html[start..end].to_string())
}
