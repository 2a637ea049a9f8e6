// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::{Category, CategoryId};
use crate::settings::AllowList;

/// Category identifier as it arrived from the routing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    pub fn normalize(&self) -> Option<CategoryId> {
        match self {
            RawId::Int(value) => u64::try_from(*value).ok().map(CategoryId),
            RawId::Text(text) => text.trim().parse::<u64>().ok().map(CategoryId),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueriedCategory {
    pub id: RawId,
    pub slug: String,
}

impl From<&Category> for QueriedCategory {
    fn from(category: &Category) -> Self {
        let id = i64::try_from(category.id.0)
            .map(RawId::Int)
            .unwrap_or_else(|_| RawId::Text(category.id.to_string()));
        Self {
            id,
            slug: category.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Category archive; `None` when the queried category could not be resolved.
    CategoryArchive(Option<QueriedCategory>),
    Other,
}

impl PageView {
    pub fn category_archive(category: &Category) -> Self {
        PageView::CategoryArchive(Some(QueriedCategory::from(category)))
    }

    pub fn queried_category(&self) -> Option<&QueriedCategory> {
        match self {
            PageView::CategoryArchive(category) => category.as_ref(),
            PageView::Other => None,
        }
    }
}

pub fn is_filter_active(view: &PageView, allow_list: &AllowList) -> bool {
    let PageView::CategoryArchive(category) = view else {
        return false;
    };
    if matches!(allow_list, AllowList::AllCategories) {
        return true;
    }
    match category.as_ref().and_then(|category| category.id.normalize()) {
        Some(id) => allow_list.contains(id),
        None => false,
    }
}
