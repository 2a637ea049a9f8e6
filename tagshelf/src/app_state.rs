// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::public::error::ErrorRenderer;
use crate::runtime_paths::RuntimePaths;
use crate::settings::SettingsStore;
use crate::templates::{MiniJinjaEngine, TemplateEngine};
use crate::util::FormTokenStore;

pub struct AppState {
    pub templates: Arc<dyn TemplateEngine>,
    pub error_renderer: ErrorRenderer,
    pub catalog: Arc<dyn Catalog>,
    pub settings: Arc<dyn SettingsStore>,
    pub form_tokens: FormTokenStore,
    pub runtime_paths: RuntimePaths,
}

impl AppState {
    pub fn new(
        app_name: &str,
        runtime_paths: RuntimePaths,
        catalog: Arc<dyn Catalog>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            templates: Arc::new(MiniJinjaEngine::new()),
            error_renderer: ErrorRenderer::new(app_name.to_string()),
            catalog,
            settings,
            form_tokens: FormTokenStore::new(),
            runtime_paths,
        }
    }
}
