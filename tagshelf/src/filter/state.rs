// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::TAG_QUERY_PARAM;
use actix_web::web;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static SCRIPT_STYLE_REGEX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script\s*>|<style[^>]*?>.*?</style\s*>")
});

// A `<` with no `>` before the next `<` or the end is text, not a tag.
static TAG_REGEX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"<[^<>]*>?"));

static OCTET_REGEX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"%[0-9A-Fa-f]{2}"));

static WHITESPACE_REGEX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"\s+"));

/// Tag selection and the query parameters to carry over when it changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    selected_slug: String,
    passthrough: BTreeMap<String, String>,
}

impl FilterState {
    /// Builds the state from decoded query pairs. Later duplicates win.
    pub fn derive<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut state = FilterState::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            if key == TAG_QUERY_PARAM {
                state.selected_slug = sanitize_text_field(&value);
            } else {
                state.passthrough.insert(key, value);
            }
        }
        state
    }

    /// Decodes a raw query string (without the leading `?`).
    pub fn from_query_string(query: &str) -> Self {
        match web::Query::<Vec<(String, String)>>::from_query(query) {
            Ok(pairs) => Self::derive(pairs.into_inner()),
            Err(err) => {
                log::debug!("Ignoring undecodable query string {:?}: {}", query, err);
                FilterState::default()
            }
        }
    }

    /// Selected slug, empty when every product is shown.
    pub fn selected_slug(&self) -> &str {
        &self.selected_slug
    }

    pub fn is_showing_all(&self) -> bool {
        self.selected_slug.is_empty()
    }

    pub fn is_selected(&self, slug: &str) -> bool {
        !self.selected_slug.is_empty() && self.selected_slug == slug
    }

    pub fn passthrough(&self) -> &BTreeMap<String, String> {
        &self.passthrough
    }
}

/// Reduces untrusted input to a single line of plain text: markup, control
/// characters and percent-encoded octets are removed, whitespace collapsed.
/// A stray `<` is kept as `&lt;`.
pub fn sanitize_text_field(raw: &str) -> String {
    let (Ok(script_style), Ok(tags), Ok(octets), Ok(whitespace)) = (
        SCRIPT_STYLE_REGEX.as_ref(),
        TAG_REGEX.as_ref(),
        OCTET_REGEX.as_ref(),
        WHITESPACE_REGEX.as_ref(),
    ) else {
        log::error!("Sanitizer patterns failed to compile; dropping input");
        return String::new();
    };

    let text = script_style.replace_all(raw, "");
    let text = tags.replace_all(&text, |caps: &regex::Captures<'_>| {
        let matched = &caps[0];
        if matched.ends_with('>') {
            String::new()
        } else {
            format!("&lt;{}", &matched[1..])
        }
    });
    let mut text: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    while octets.is_match(&text) {
        text = octets.replace_all(&text, "").into_owned();
    }

    whitespace.replace_all(&text, " ").trim().to_string()
}
