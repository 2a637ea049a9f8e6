// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{AllowList, SettingsError, SettingsStore};
use crate::catalog::CategoryId;
use crate::util::yaml_store;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;

pub const SETTINGS_KEY_ENABLED_CATEGORIES: &str = "enabled_categories";

const ALL_CATEGORIES_SENTINEL: &str = "all";

/// Settings persisted in `state/settings.yaml`.
pub struct YamlSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn read_mapping(&self) -> Result<Option<Mapping>, String> {
        match yaml_store::read_yaml_file::<Value>(&self.path, "settings") {
            Ok(None) => Ok(None),
            Ok(Some(Value::Mapping(mapping))) => Ok(Some(mapping)),
            Ok(Some(_)) => Err("settings file is not a mapping".to_string()),
            Err(err) => Err(err.to_string()),
        }
    }
}

impl SettingsStore for YamlSettingsStore {
    fn allow_list(&self) -> AllowList {
        match self.read_mapping() {
            Ok(None) => AllowList::AllCategories,
            Ok(Some(mapping)) => decode_allow_list(mapping.get(SETTINGS_KEY_ENABLED_CATEGORIES)),
            Err(err) => {
                log::warn!(
                    "Tag filter settings unreadable, filter disabled everywhere: {}",
                    err
                );
                AllowList::none()
            }
        }
    }

    fn set_allow_list(&self, value: &AllowList) -> Result<(), SettingsError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut mapping = match self.read_mapping() {
            Ok(Some(mapping)) => mapping,
            Ok(None) => Mapping::new(),
            Err(err) => {
                log::warn!("Overwriting unreadable settings file: {}", err);
                Mapping::new()
            }
        };
        mapping.insert(
            Value::String(SETTINGS_KEY_ENABLED_CATEGORIES.to_string()),
            encode_allow_list(value),
        );

        yaml_store::write_yaml_file(&self.path, "settings", &Value::Mapping(mapping))
            .map_err(|err| SettingsError::Persist(err.to_string()))?;
        log::info!("Tag filter allow-list updated: {}", describe(value));
        Ok(())
    }
}

/// Decodes the persisted allow-list. Absent means all categories; anything
/// other than the sentinel or a list of coercible ids means none.
pub(crate) fn decode_allow_list(value: Option<&Value>) -> AllowList {
    let Some(value) = value else {
        return AllowList::AllCategories;
    };
    match value {
        Value::Null => AllowList::AllCategories,
        Value::String(text) if text == ALL_CATEGORIES_SENTINEL => AllowList::AllCategories,
        Value::Sequence(items) => {
            let mut ids = BTreeSet::new();
            for item in items {
                match coerce_category_id(item) {
                    Some(id) => {
                        ids.insert(id);
                    }
                    None => {
                        log::warn!(
                            "Allow-list entry {:?} is not a category id; filter disabled everywhere",
                            item
                        );
                        return AllowList::none();
                    }
                }
            }
            AllowList::Specific(ids)
        }
        other => {
            log::warn!(
                "Unrecognised allow-list value {:?}; filter disabled everywhere",
                other
            );
            AllowList::none()
        }
    }
}

fn coerce_category_id(value: &Value) -> Option<CategoryId> {
    match value {
        Value::Number(number) => number.as_u64().map(CategoryId),
        Value::String(text) => text.trim().parse::<u64>().ok().map(CategoryId),
        _ => None,
    }
}

fn encode_allow_list(value: &AllowList) -> Value {
    match value {
        AllowList::AllCategories => Value::String(ALL_CATEGORIES_SENTINEL.to_string()),
        AllowList::Specific(ids) => Value::Sequence(
            ids.iter()
                .map(|id| Value::Number(serde_yaml::Number::from(id.0)))
                .collect(),
        ),
    }
}

fn describe(value: &AllowList) -> String {
    match value {
        AllowList::AllCategories => ALL_CATEGORIES_SENTINEL.to_string(),
        AllowList::Specific(ids) => {
            let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            format!("[{}]", ids.join(", "))
        }
    }
}
