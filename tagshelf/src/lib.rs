// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod admin;
pub mod app_state;
pub mod bootstrap;
pub mod builtin;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod public;
pub mod runtime_paths;
pub mod settings;
pub mod templates;
pub mod util;
