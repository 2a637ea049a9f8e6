// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, Result, web};

const CACHE_CONTROL_ASSETS: &str = "public, max-age=3600";

/// Storefront assets compiled into the binary: (file name, mime type, body).
static BUILTIN_FILES: &[(&str, &str, &str)] = &[
    (
        "tag-filter.css",
        "text/css; charset=utf-8",
        include_str!("../builtin/tag-filter.css"),
    ),
    (
        "tag-filter.js",
        "application/javascript; charset=utf-8",
        include_str!("../builtin/tag-filter.js"),
    ),
];

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/builtin/{filename:.*}", web::get().to(serve_builtin_file));
}

pub fn lookup(filename: &str) -> Option<(&'static str, &'static str)> {
    BUILTIN_FILES
        .iter()
        .find(|(name, _, _)| *name == filename)
        .map(|(_, mime_type, body)| (*mime_type, *body))
}

async fn serve_builtin_file(req: HttpRequest) -> Result<HttpResponse> {
    let filename = match req.match_info().get("filename") {
        Some(f) => f,
        None => {
            log::error!("Missing 'filename' parameter in builtin file handler");
            return Ok(HttpResponse::InternalServerError().body("Internal Server Error"));
        }
    };

    match lookup(filename) {
        Some((mime_type, body)) => Ok(HttpResponse::Ok()
            .content_type(mime_type)
            .insert_header(("Cache-Control", CACHE_CONTROL_ASSETS))
            .body(body)),
        None => {
            log::debug!("Builtin asset missing: {}", filename);
            Ok(HttpResponse::NotFound().finish())
        }
    }
}
