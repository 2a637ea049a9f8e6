// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Admin page choosing which category archives show the tag filter.

use crate::admin::handlers::SETTINGS_PAGE_PATH;
use crate::app_state::AppState;
use crate::catalog::{Category, CategoryId};
use crate::config::ValidatedConfig;
use crate::public::error;
use crate::settings::AllowList;
use crate::templates::{SettingsCategoryRow, SettingsPageContext, render_minijinja_template};
use actix_web::{HttpResponse, Result, web};

const FIELD_CATEGORIES: &str = "categories";
const FIELD_TOKEN: &str = "token";
const SAVED_NOTICE: &str = "Settings saved.";

pub async fn settings_page(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    render_settings(config.as_ref(), app_state.as_ref(), None)
}

pub async fn save_settings(
    form: web::Form<Vec<(String, String)>>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let fields = form.into_inner();

    let token = fields
        .iter()
        .rev()
        .find(|(name, _)| name == FIELD_TOKEN)
        .map(|(_, value)| value.as_str())
        .unwrap_or("");
    if token.is_empty() || !app_state.form_tokens.consume(token) {
        log::warn!("Rejected tag filter settings submission with an invalid form token");
        return Ok(HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body("Invalid or expired form token"));
    }

    let known = match app_state.catalog.list_categories() {
        Ok(categories) => categories,
        Err(err) => {
            log::error!("Failed to list categories while saving settings: {}", err);
            return error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    let selected = fields
        .iter()
        .filter(|(name, _)| name == FIELD_CATEGORIES)
        .filter_map(|(_, value)| parse_category_id(value));
    let allow_list = AllowList::from_selection(selected, &known);

    if let Err(err) = app_state.settings.set_allow_list(&allow_list) {
        log::error!("{}", err);
        return error::serve_500(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        );
    }

    render_settings(config.as_ref(), app_state.as_ref(), Some(SAVED_NOTICE))
}

fn render_settings(
    config: &ValidatedConfig,
    app_state: &AppState,
    notice: Option<&str>,
) -> Result<HttpResponse> {
    let categories = match app_state.catalog.list_categories() {
        Ok(categories) => categories,
        Err(err) => {
            log::error!("Failed to list categories for the settings page: {}", err);
            return error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    let allow_list = app_state.settings.allow_list();
    let rows = category_rows(&categories, &allow_list);
    let token = app_state.form_tokens.issue();
    let form_action = format!("{}{}", config.admin.path, SETTINGS_PAGE_PATH);
    let context = SettingsPageContext::new(&config.app.name, &form_action, rows, &token, notice);

    match render_minijinja_template(
        app_state.templates.as_ref(),
        "admin/settings.html",
        context.to_value(),
    ) {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .insert_header(("Cache-Control", "no-store"))
            .body(html)),
        Err(e) => {
            log::error!("Failed to render admin settings page: {}", e);
            error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            )
        }
    }
}

fn category_rows(categories: &[Category], allow_list: &AllowList) -> Vec<SettingsCategoryRow> {
    categories
        .iter()
        .map(|category| SettingsCategoryRow {
            id: category.id.0,
            name: category.name.clone(),
            enabled: allow_list.contains(category.id),
        })
        .collect()
}

fn parse_category_id(value: &str) -> Option<CategoryId> {
    match value.trim().parse::<u64>() {
        Ok(id) => Some(CategoryId(id)),
        Err(_) => {
            log::warn!("Ignoring non-numeric category value {:?}", value);
            None
        }
    }
}
