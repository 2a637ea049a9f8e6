// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::{Category, CategoryId};
use std::collections::BTreeSet;
use std::fmt;

mod store;

pub use store::{SETTINGS_KEY_ENABLED_CATEGORIES, YamlSettingsStore};

/// Categories whose archive pages show the tag filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowList {
    #[default]
    AllCategories,
    Specific(BTreeSet<CategoryId>),
}

impl AllowList {
    /// Allow-list that enables the filter nowhere.
    pub fn none() -> Self {
        AllowList::Specific(BTreeSet::new())
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        match self {
            AllowList::AllCategories => true,
            AllowList::Specific(ids) => ids.contains(&id),
        }
    }

    /// Builds the allow-list for an admin selection.
    ///
    /// Ids that are not among `known` are dropped. A selection covering every
    /// known category collapses to [`AllowList::AllCategories`].
    pub fn from_selection(
        selected: impl IntoIterator<Item = CategoryId>,
        known: &[Category],
    ) -> Self {
        let known_ids: BTreeSet<CategoryId> = known.iter().map(|category| category.id).collect();
        let mut chosen = BTreeSet::new();
        for id in selected {
            if known_ids.contains(&id) {
                chosen.insert(id);
            } else {
                log::warn!("Ignoring unknown category id {} in filter selection", id);
            }
        }
        if !known_ids.is_empty() && chosen.len() == known_ids.len() {
            AllowList::AllCategories
        } else {
            AllowList::Specific(chosen)
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Persist(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Persist(msg) => write!(f, "Failed to persist settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

pub trait SettingsStore: Send + Sync {
    /// Current allow-list. Unset means every category; unreadable or
    /// unrecognised values mean none.
    fn allow_list(&self) -> AllowList;

    fn set_allow_list(&self, value: &AllowList) -> Result<(), SettingsError>;
}
