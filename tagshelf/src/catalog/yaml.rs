// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{
    Catalog, CatalogError, Category, CategoryId, Product, ProductId, Tag, TagId, TagOrder,
    TagQuery,
};
use crate::util::yaml_store::{self, YamlStoreError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRecord {
    pub id: u64,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagRecord {
    pub id: u64,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    /// Category slugs.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Tag slugs.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// In-memory catalog backed by a single `catalog.yaml` file.
#[derive(Debug, Clone, Default)]
pub struct YamlCatalog {
    data: CatalogFile,
}

impl YamlCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = match yaml_store::read_yaml_file::<CatalogFile>(path, "catalog") {
            Ok(Some(data)) => data,
            Ok(None) => {
                log::warn!(
                    "Catalog file {} is missing or empty; serving an empty catalog",
                    path.display()
                );
                CatalogFile::default()
            }
            Err(YamlStoreError::Read(msg)) => return Err(CatalogError::Unavailable(msg)),
            Err(err) => return Err(CatalogError::Malformed(err.to_string())),
        };
        Self::from_file(data)
    }

    pub fn from_file(data: CatalogFile) -> Result<Self, CatalogError> {
        ensure_unique("category id", data.categories.iter().map(|c| c.id.to_string()))?;
        ensure_unique("category slug", data.categories.iter().map(|c| c.slug.clone()))?;
        ensure_unique("tag id", data.tags.iter().map(|t| t.id.to_string()))?;
        ensure_unique("tag slug", data.tags.iter().map(|t| t.slug.clone()))?;
        ensure_unique("product id", data.products.iter().map(|p| p.id.to_string()))?;
        Ok(Self { data })
    }

    pub fn category_count(&self) -> usize {
        self.data.categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.data.products.len()
    }

    fn visible_products_in<'a>(
        &'a self,
        category_slug: &'a str,
    ) -> impl Iterator<Item = &'a ProductRecord> + 'a {
        self.data.products.iter().filter(move |product| {
            product.visible && product.categories.iter().any(|slug| slug == category_slug)
        })
    }

    fn visible_member_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for product in self.data.products.iter().filter(|product| product.visible) {
            for slug in &product.tags {
                *counts.entry(slug.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

fn ensure_unique(
    label: &str,
    values: impl Iterator<Item = String>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.clone()) {
            return Err(CatalogError::Malformed(format!(
                "Duplicate {} '{}'",
                label, value
            )));
        }
    }
    Ok(())
}

impl Catalog for YamlCatalog {
    fn find_product_ids(&self, category_slug: &str) -> Result<Vec<ProductId>, CatalogError> {
        let mut ids: Vec<ProductId> = self
            .visible_products_in(category_slug)
            .map(|product| ProductId(product.id))
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn find_tags(
        &self,
        product_ids: &[ProductId],
        query: &TagQuery,
    ) -> Result<Vec<Tag>, CatalogError> {
        let tags_by_slug: HashMap<&str, &TagRecord> = self
            .data
            .tags
            .iter()
            .map(|tag| (tag.slug.as_str(), tag))
            .collect();
        let wanted: HashSet<u64> = product_ids.iter().map(|id| id.0).collect();
        let counts = self.visible_member_counts();

        let mut found: BTreeMap<TagId, Tag> = BTreeMap::new();
        for product in self
            .data
            .products
            .iter()
            .filter(|product| wanted.contains(&product.id))
        {
            for slug in &product.tags {
                let record = tags_by_slug.get(slug.as_str()).ok_or_else(|| {
                    CatalogError::Malformed(format!(
                        "Product {} references unknown tag '{}'",
                        product.id, slug
                    ))
                })?;
                if query.hide_empty && counts.get(slug.as_str()).copied().unwrap_or(0) == 0 {
                    continue;
                }
                found.entry(TagId(record.id)).or_insert_with(|| Tag {
                    id: TagId(record.id),
                    slug: record.slug.clone(),
                    name: record.name.clone(),
                });
            }
        }

        let mut tags: Vec<Tag> = found.into_values().collect();
        match query.order_by {
            TagOrder::Name => tags.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then(a.id.cmp(&b.id))
            }),
        }
        Ok(tags)
    }

    fn find_category(&self, slug: &str) -> Result<Option<Category>, CatalogError> {
        Ok(self
            .data
            .categories
            .iter()
            .find(|category| category.slug == slug)
            .map(to_category))
    }

    fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut categories: Vec<Category> = self.data.categories.iter().map(to_category).collect();
        categories.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(categories)
    }

    fn list_products(
        &self,
        category_slug: &str,
        tag_slug: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let tag_slug = tag_slug.filter(|slug| !slug.is_empty());
        let mut products: Vec<Product> = self
            .visible_products_in(category_slug)
            .filter(|product| match tag_slug {
                Some(slug) => product.tags.iter().any(|tag| tag == slug),
                None => true,
            })
            .map(|product| Product {
                id: ProductId(product.id),
                name: product.name.clone(),
                price: product.price.clone(),
            })
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(products)
    }
}

fn to_category(record: &CategoryRecord) -> Category {
    Category {
        id: CategoryId(record.id),
        slug: record.slug.clone(),
        name: record.name.clone(),
    }
}
