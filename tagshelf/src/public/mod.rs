// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod error;
pub mod handlers;

pub fn configure(cfg: &mut web::ServiceConfig, category_base: &str) {
    cfg.route("/", web::get().to(handlers::shop_index)).route(
        &format!("{}/{{slug}}", category_base),
        web::get().to(handlers::category_archive),
    );
}
