// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{FilterState, TAG_QUERY_PARAM};
use crate::catalog::Tag;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub label: String,
    /// Empty for the "show all" button.
    pub slug: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Buttons plus the GET form that resubmits the page with a new selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControls {
    pub buttons: Vec<FilterButton>,
    pub hidden_fields: Vec<HiddenField>,
    pub method: &'static str,
}

impl FilterControls {
    pub fn build(tags: &[Tag], state: &FilterState, all_label: &str) -> Self {
        let mut buttons = Vec::with_capacity(tags.len() + 1);
        buttons.push(FilterButton {
            label: all_label.to_string(),
            slug: String::new(),
            active: state.is_showing_all(),
        });
        buttons.extend(tags.iter().map(|tag| FilterButton {
            label: tag.name.clone(),
            slug: tag.slug.clone(),
            active: state.is_selected(&tag.slug),
        }));

        // The current selection is carried even when no button matches it.
        let mut hidden_fields = Vec::with_capacity(state.passthrough().len() + 1);
        hidden_fields.push(HiddenField {
            name: TAG_QUERY_PARAM.to_string(),
            value: state.selected_slug().to_string(),
        });
        hidden_fields.extend(state.passthrough().iter().map(|(name, value)| HiddenField {
            name: name.clone(),
            value: value.clone(),
        }));

        Self {
            buttons,
            hidden_fields,
            method: "get",
        }
    }

    pub fn active_button(&self) -> Option<&FilterButton> {
        self.buttons.iter().find(|button| button.active)
    }

    /// Target the form submits to once `slug` is chosen.
    pub fn resubmit_url(&self, path: &str, slug: &str) -> String {
        let query = self
            .hidden_fields
            .iter()
            .map(|field| {
                let value = if field.name == TAG_QUERY_PARAM {
                    slug
                } else {
                    field.value.as_str()
                };
                format!(
                    "{}={}",
                    urlencoding::encode(&field.name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TagId;

    fn tags() -> Vec<Tag> {
        vec![
            Tag {
                id: TagId(2),
                slug: "blue".to_string(),
                name: "Blue".to_string(),
            },
            Tag {
                id: TagId(1),
                slug: "red".to_string(),
                name: "Red".to_string(),
            },
        ]
    }

    #[test]
    fn default_selection_marks_show_all_active() {
        let state = FilterState::from_query_string("");
        let controls = FilterControls::build(&tags(), &state, "All");
        let labels: Vec<&str> = controls
            .buttons
            .iter()
            .map(|button| button.label.as_str())
            .collect();
        assert_eq!(labels, vec!["All", "Blue", "Red"]);
        assert_eq!(
            controls.active_button().map(|button| button.label.as_str()),
            Some("All")
        );
        assert_eq!(controls.buttons.iter().filter(|b| b.active).count(), 1);
    }

    #[test]
    fn matching_tag_button_is_active() {
        let state = FilterState::from_query_string("product_tag=red");
        let controls = FilterControls::build(&tags(), &state, "All");
        assert_eq!(
            controls.active_button().map(|button| button.slug.as_str()),
            Some("red")
        );
    }

    #[test]
    fn unmatched_selection_activates_nothing_but_is_carried() {
        let state = FilterState::from_query_string("product_tag=green&orderby=price");
        let controls = FilterControls::build(&tags(), &state, "All");
        assert!(controls.active_button().is_none());
        assert_eq!(
            controls.hidden_fields,
            vec![
                HiddenField {
                    name: "product_tag".to_string(),
                    value: "green".to_string(),
                },
                HiddenField {
                    name: "orderby".to_string(),
                    value: "price".to_string(),
                },
            ]
        );
        assert_eq!(controls.method, "get");
    }

    #[test]
    fn resubmit_url_sets_tag_and_keeps_passthrough() {
        let state = FilterState::from_query_string("product_tag=red&orderby=price&s=red+shoes");
        let controls = FilterControls::build(&tags(), &state, "All");
        assert_eq!(
            controls.resubmit_url("/product-category/shoes", "blue"),
            "/product-category/shoes?product_tag=blue&orderby=price&s=red%20shoes"
        );
        assert_eq!(
            controls.resubmit_url("/product-category/shoes", ""),
            "/product-category/shoes?product_tag=&orderby=price&s=red%20shoes"
        );
    }
}
