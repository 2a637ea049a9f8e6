// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::error;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::filter::{self, FilterControls, FilterState, PageView};
use crate::templates::{
    CategoryPageContext, ShopPageContext, TemplateEngine, render_minijinja_template,
};
use actix_web::{HttpRequest, HttpResponse, Result, web};
use log::debug;
use minijinja::Value;

pub async fn shop_index(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let categories = match app_state.catalog.list_categories() {
        Ok(categories) => categories,
        Err(err) => {
            log::error!("Failed to list categories for the shop index: {}", err);
            return error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    let context = ShopPageContext::new(
        &config.app.name,
        &config.app.description,
        &config.storefront.category_base,
        categories,
    );
    render_page(&app_state, "public/shop.html", context.to_value())
}

pub async fn category_archive(
    req: HttpRequest,
    path: web::Path<String>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    let catalog = app_state.catalog.as_ref();

    let category = match catalog.find_category(&slug) {
        Ok(Some(category)) => category,
        Ok(None) => {
            debug!("No category with slug {:?}", slug);
            return error::serve_404(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
        Err(err) => {
            log::error!("Failed to look up category {:?}: {}", slug, err);
            return error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    // Read on every request so admin changes apply without a restart.
    let allow_list = app_state.settings.allow_list();
    let view = PageView::category_archive(&category);
    let filter::TagResolution {
        active: filter_active,
        tags,
    } = filter::resolve(catalog, &view, &allow_list);
    let state = FilterState::from_query_string(req.query_string());

    let tag_slug = (!state.is_showing_all()).then(|| state.selected_slug());
    let products = match catalog.list_products(&category.slug, tag_slug) {
        Ok(products) => products,
        Err(err) => {
            log::warn!(
                "Product listing for category {:?} failed, rendering it empty: {}",
                category.slug,
                err
            );
            Vec::new()
        }
    };

    let controls = (filter_active && !tags.is_empty())
        .then(|| FilterControls::build(&tags, &state, &config.storefront.all_label));

    let context = CategoryPageContext::new(
        &config.app.name,
        category,
        products,
        controls,
        filter_active,
    );
    render_page(&app_state, "public/category.html", context.to_value())
}

pub async fn not_found(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    error::serve_404(
        &app_state.error_renderer,
        Some(app_state.templates.as_ref()),
    )
}

fn render_page(app_state: &AppState, template_name: &str, context: Value) -> Result<HttpResponse> {
    let engine: &dyn TemplateEngine = app_state.templates.as_ref();
    match render_minijinja_template(engine, template_name, context) {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html)),
        Err(e) => {
            log::error!("Failed to render {}: {}", template_name, e);
            error::serve_500(&app_state.error_renderer, Some(engine))
        }
    }
}
