// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Product catalog boundary.
//!
//! The storefront only ever talks to the catalog through [`Catalog`]. The
//! bundled [`YamlCatalog`] keeps a whole catalog file in memory, which is
//! enough for small shops and for tests.

use serde::{Deserialize, Serialize};
use std::fmt;

mod yaml;

pub use yaml::{CatalogFile, CategoryRecord, ProductRecord, TagRecord, YamlCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    /// Filter value carried in the `product_tag` query parameter.
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagOrder {
    #[default]
    Name,
}

/// Hints passed along with a tag lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagQuery {
    pub order_by: TagOrder,
    /// Skip tags that have no visible member products anywhere in the catalog.
    pub hide_empty: bool,
}

impl Default for TagQuery {
    fn default() -> Self {
        Self {
            order_by: TagOrder::Name,
            hide_empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Unavailable(String),
    Malformed(String),
    Taxonomy(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Unavailable(msg) => write!(f, "Catalog unavailable: {}", msg),
            CatalogError::Malformed(msg) => write!(f, "Malformed catalog data: {}", msg),
            CatalogError::Taxonomy(msg) => write!(f, "Taxonomy lookup failed: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

pub trait Catalog: Send + Sync {
    /// Every visible product filed under the category slug, without a limit.
    fn find_product_ids(&self, category_slug: &str) -> Result<Vec<ProductId>, CatalogError>;

    /// Distinct tags attached to any of `product_ids`.
    fn find_tags(&self, product_ids: &[ProductId], query: &TagQuery)
    -> Result<Vec<Tag>, CatalogError>;

    fn find_category(&self, slug: &str) -> Result<Option<Category>, CatalogError>;

    /// All categories, ordered by name.
    fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Listing query behind a category archive. A non-empty `tag_slug` narrows
    /// the listing to products carrying that tag; a slug no product carries
    /// yields an empty listing.
    fn list_products(
        &self,
        category_slug: &str,
        tag_slug: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError>;
}
