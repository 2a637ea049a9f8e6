// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Tag filter for category archive pages.
//!
//! A page view flows through [`resolve`] (one [`is_filter_active`] check plus
//! the tag lookup) and [`FilterState::derive`]; [`FilterControls::build`]
//! turns the results into the buttons and hidden form fields the archive
//! template renders.

mod controls;
mod policy;
mod resolver;
mod state;

pub use controls::{FilterButton, FilterControls, HiddenField};
pub use policy::{PageView, QueriedCategory, RawId, is_filter_active};
pub use resolver::{TagResolution, resolve, resolve_tags};
pub use state::{FilterState, sanitize_text_field};

/// Query parameter carrying the selected tag slug.
pub const TAG_QUERY_PARAM: &str = "product_tag";
