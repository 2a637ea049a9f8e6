// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::{middleware, settings};
use actix_web::{HttpResponse, Result, web};

pub const SETTINGS_PAGE_PATH: &str = "/tag-filter";

pub fn configure(cfg: &mut web::ServiceConfig, admin_path: &str, localhost_only: bool) {
    let admin_path_for_redirect = admin_path.to_string();

    cfg.service(
        web::scope(admin_path)
            .wrap(middleware::LocalhostOnlyMiddleware::new(localhost_only))
            .route(
                "",
                web::get().to(move || admin_redirect_to_settings(admin_path_for_redirect.clone())),
            )
            .service(
                web::resource(SETTINGS_PAGE_PATH)
                    .route(web::get().to(settings::settings_page))
                    .route(web::post().to(settings::save_settings)),
            ),
    );
}

async fn admin_redirect_to_settings(admin_path: String) -> Result<HttpResponse> {
    Ok(HttpResponse::Found()
        .insert_header(("Location", format!("{}{}", admin_path, SETTINGS_PAGE_PATH)))
        .finish())
}
