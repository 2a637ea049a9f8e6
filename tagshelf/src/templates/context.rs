// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::{Category, Product};
use crate::filter::FilterControls;
use minijinja::{Value, context};
use serde::Serialize;

const TAG_FILTER_CSS: &str = "/builtin/tag-filter.css";
const TAG_FILTER_JS: &str = "/builtin/tag-filter.js";

#[derive(Debug, Clone)]
pub struct ErrorPageContext {
    app_name: String,
}

impl ErrorPageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            home_path => "/"
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShopPageContext {
    app_name: String,
    description: String,
    category_base: String,
    categories: Vec<Category>,
}

impl ShopPageContext {
    pub fn new(
        app_name: &str,
        description: &str,
        category_base: &str,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            description: description.to_string(),
            category_base: category_base.to_string(),
            categories,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            description => &self.description,
            category_base => &self.category_base,
            categories => &self.categories
        }
    }
}

/// Category archive page. `controls` is `None` when no filter block is shown;
/// `assets_enabled` follows the policy alone so an active but empty filter
/// still loads its assets.
#[derive(Debug, Clone)]
pub struct CategoryPageContext {
    app_name: String,
    category: Category,
    products: Vec<Product>,
    controls: Option<FilterControls>,
    assets_enabled: bool,
}

impl CategoryPageContext {
    pub fn new(
        app_name: &str,
        category: Category,
        products: Vec<Product>,
        controls: Option<FilterControls>,
        assets_enabled: bool,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            category,
            products,
            controls,
            assets_enabled,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            category => &self.category,
            products => &self.products,
            controls => &self.controls,
            assets_enabled => self.assets_enabled,
            tag_filter_css => TAG_FILTER_CSS,
            tag_filter_js => TAG_FILTER_JS
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsCategoryRow {
    pub id: u64,
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsPageContext {
    app_name: String,
    form_action: String,
    rows: Vec<SettingsCategoryRow>,
    form_token: String,
    notice: Option<String>,
}

impl SettingsPageContext {
    pub fn new(
        app_name: &str,
        form_action: &str,
        rows: Vec<SettingsCategoryRow>,
        form_token: &str,
        notice: Option<&str>,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            form_action: form_action.to_string(),
            rows,
            form_token: form_token.to_string(),
            notice: notice.map(str::to_string),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            form_action => &self.form_action,
            rows => &self.rows,
            form_token => &self.form_token,
            notice => &self.notice
        }
    }
}
