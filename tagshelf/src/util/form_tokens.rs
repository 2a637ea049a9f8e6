// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

const FORM_TOKEN_EXPIRY_SECONDS: u64 = 3600;
const MAX_OUTSTANDING_TOKENS: usize = 1024;

/// One-time tokens embedded in admin forms; a POST must present one that
/// was issued by a previous GET and has not been used yet.
pub struct FormTokenStore {
    inner: Mutex<TokenTable>,
    expiry: Duration,
}

#[derive(Default)]
struct TokenTable {
    next_serial: u64,
    tokens: HashMap<String, IssuedToken>,
}

struct IssuedToken {
    serial: u64,
    issued_at: Instant,
}

impl FormTokenStore {
    pub fn new() -> Self {
        Self::with_expiry(Duration::from_secs(FORM_TOKEN_EXPIRY_SECONDS))
    }

    pub fn with_expiry(expiry: Duration) -> Self {
        Self {
            inner: Mutex::new(TokenTable::default()),
            expiry,
        }
    }

    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Instant::now();
        let mut table = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let expiry = self.expiry;
        table
            .tokens
            .retain(|_, issued| now.duration_since(issued.issued_at) < expiry);
        if table.tokens.len() >= MAX_OUTSTANDING_TOKENS
            && let Some(oldest) = table
                .tokens
                .iter()
                .min_by_key(|(_, issued)| issued.serial)
                .map(|(token, _)| token.clone())
        {
            table.tokens.remove(&oldest);
        }
        let serial = table.next_serial;
        table.next_serial += 1;
        table.tokens.insert(
            token.clone(),
            IssuedToken {
                serial,
                issued_at: now,
            },
        );
        token
    }

    /// Consumes `token`; true when it was outstanding and unexpired.
    pub fn consume(&self, token: &str) -> bool {
        let mut table = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match table.tokens.remove(token) {
            Some(issued) => issued.issued_at.elapsed() < self.expiry,
            None => false,
        }
    }
}

impl Default for FormTokenStore {
    fn default() -> Self {
        Self::new()
    }
}
