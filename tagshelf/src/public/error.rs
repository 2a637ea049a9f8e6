// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::templates::{ErrorPageContext, TemplateEngine, render_minijinja_template};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result};

#[derive(Clone)]
pub struct ErrorRenderer {
    app_name: String,
}

impl ErrorRenderer {
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

pub fn serve_404(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    serve_error_page(
        StatusCode::NOT_FOUND,
        "error_404.html",
        renderer.app_name(),
        template_engine,
    )
}

pub fn serve_500(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    serve_error_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "error_500.html",
        renderer.app_name(),
        template_engine,
    )
}

fn serve_error_page(
    status: StatusCode,
    template_name: &str,
    app_name: &str,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    let context = ErrorPageContext::new(app_name).to_value();

    let html = match template_engine {
        Some(engine) => match render_minijinja_template(engine, template_name, context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render {} error template: {}", status.as_u16(), e);
                fallback_html(status)
            }
        },
        None => fallback_html(status),
    };

    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"))
        .body(html))
}

// The app name is left out so the fallback never needs escaping.
fn fallback_html(status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{code} - {reason}</title></head>
<body><h1>{code} - {reason}</h1></body></html>"#,
        code = status.as_u16(),
        reason = reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::MiniJinjaEngine;
    use actix_web::body::to_bytes;

    async fn body_of(response: HttpResponse) -> String {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[actix_web::test]
    async fn not_found_page_uses_template() {
        let engine = MiniJinjaEngine::new();
        let renderer = ErrorRenderer::new("Corner Shop".to_string());
        let response = serve_404(&renderer, Some(&engine)).expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_of(response).await;
        assert!(body.contains("404"));
        assert!(body.contains("Corner Shop"));
    }

    #[actix_web::test]
    async fn server_error_falls_back_without_engine() {
        let renderer = ErrorRenderer::new("Corner Shop".to_string());
        let response = serve_500(&renderer, None).expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert!(body.contains("500 - Internal Server Error"));
    }
}
