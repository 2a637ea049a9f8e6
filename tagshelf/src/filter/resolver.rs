// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::policy::{PageView, is_filter_active};
use crate::catalog::{Catalog, Tag, TagQuery};
use crate::settings::AllowList;
use std::collections::HashSet;

/// Outcome of the filter policy for one page view, with its tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagResolution {
    pub active: bool,
    pub tags: Vec<Tag>,
}

/// Evaluates the filter policy once and, when it passes, collects the tags.
pub fn resolve(catalog: &dyn Catalog, view: &PageView, allow_list: &AllowList) -> TagResolution {
    if !is_filter_active(view, allow_list) {
        log::debug!("Tag filter inactive for {:?}", view);
        return TagResolution::default();
    }
    TagResolution {
        active: true,
        tags: tags_for_view(catalog, view),
    }
}

/// Tags selectable on this page view, ordered by name.
///
/// Never fails: an inactive filter, an empty category or a catalog error all
/// produce an empty list.
pub fn resolve_tags(catalog: &dyn Catalog, view: &PageView, allow_list: &AllowList) -> Vec<Tag> {
    resolve(catalog, view, allow_list).tags
}

fn tags_for_view(catalog: &dyn Catalog, view: &PageView) -> Vec<Tag> {
    let Some(category) = view.queried_category() else {
        return Vec::new();
    };
    if category.slug.is_empty() {
        return Vec::new();
    }

    let product_ids = match catalog.find_product_ids(&category.slug) {
        Ok(ids) => ids,
        Err(err) => {
            log::warn!(
                "Product lookup for category '{}' failed: {}",
                category.slug,
                err
            );
            return Vec::new();
        }
    };
    if product_ids.is_empty() {
        log::debug!("Category '{}' has no products", category.slug);
        return Vec::new();
    }

    let tags = match catalog.find_tags(&product_ids, &TagQuery::default()) {
        Ok(tags) => tags,
        Err(err) => {
            log::warn!("Tag lookup for category '{}' failed: {}", category.slug, err);
            return Vec::new();
        }
    };

    normalize(tags)
}

fn normalize(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Tag> = tags.into_iter().filter(|tag| seen.insert(tag.id)).collect();
    unique.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.id.cmp(&b.id))
    });
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogError, CatalogFile, Category, CategoryId, Product, ProductId, TagId, YamlCatalog,
    };
    use crate::filter::{QueriedCategory, RawId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shoes_catalog() -> YamlCatalog {
        let yaml = r#"categories:
  - id: 5
    slug: shoes
    name: Shoes
  - id: 6
    slug: empty
    name: Empty
tags:
  - id: 1
    slug: red
    name: Red
  - id: 2
    slug: blue
    name: Blue
products:
  - id: 1
    name: Runner
    categories: [shoes]
    tags: [red, blue]
  - id: 2
    name: Boot
    categories: [shoes]
    tags: [blue]
  - id: 3
    name: Sandal
    categories: [shoes]
"#;
        let data: CatalogFile = serde_yaml::from_str(yaml).expect("catalog yaml");
        YamlCatalog::from_file(data).expect("catalog")
    }

    fn view(id: u64, slug: &str) -> PageView {
        PageView::category_archive(&Category {
            id: CategoryId(id),
            slug: slug.to_string(),
            name: slug.to_string(),
        })
    }

    /// Catalog double that records calls and returns canned answers.
    struct ScriptedCatalog {
        product_ids: Result<Vec<ProductId>, CatalogError>,
        tags: Result<Vec<Tag>, CatalogError>,
        calls: AtomicUsize,
    }

    impl ScriptedCatalog {
        fn new(
            product_ids: Result<Vec<ProductId>, CatalogError>,
            tags: Result<Vec<Tag>, CatalogError>,
        ) -> Self {
            Self {
                product_ids,
                tags,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bump(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Catalog for ScriptedCatalog {
        fn find_product_ids(&self, _slug: &str) -> Result<Vec<ProductId>, CatalogError> {
            self.bump();
            self.product_ids.clone()
        }

        fn find_tags(
            &self,
            _ids: &[ProductId],
            _query: &TagQuery,
        ) -> Result<Vec<Tag>, CatalogError> {
            self.bump();
            self.tags.clone()
        }

        fn find_category(&self, _slug: &str) -> Result<Option<Category>, CatalogError> {
            Ok(None)
        }

        fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
            Ok(Vec::new())
        }

        fn list_products(
            &self,
            _slug: &str,
            _tag: Option<&str>,
        ) -> Result<Vec<Product>, CatalogError> {
            Ok(Vec::new())
        }
    }

    fn tag(id: u64, name: &str) -> Tag {
        Tag {
            id: TagId(id),
            slug: name.to_lowercase(),
            name: name.to_string(),
        }
    }

    #[test]
    fn shoes_scenario_lists_blue_then_red() {
        let tags = resolve_tags(&shoes_catalog(), &view(5, "shoes"), &AllowList::AllCategories);
        let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["Blue", "Red"]);
    }

    #[test]
    fn category_without_products_has_no_tags() {
        let tags = resolve_tags(&shoes_catalog(), &view(6, "empty"), &AllowList::AllCategories);
        assert!(tags.is_empty());
    }

    #[test]
    fn inactive_policy_skips_catalog_entirely() {
        let catalog = ScriptedCatalog::new(Ok(vec![ProductId(1)]), Ok(vec![tag(1, "Red")]));
        let tags = resolve_tags(&catalog, &view(5, "shoes"), &AllowList::none());
        assert!(tags.is_empty());
        assert_eq!(catalog.calls(), 0);

        let tags = resolve_tags(&catalog, &PageView::Other, &AllowList::AllCategories);
        assert!(tags.is_empty());
        assert_eq!(catalog.calls(), 0);
    }

    #[test]
    fn empty_product_set_skips_tag_lookup() {
        let catalog = ScriptedCatalog::new(Ok(Vec::new()), Ok(vec![tag(1, "Red")]));
        let tags = resolve_tags(&catalog, &view(5, "shoes"), &AllowList::AllCategories);
        assert!(tags.is_empty());
        assert_eq!(catalog.calls(), 1);
    }

    #[test]
    fn catalog_errors_degrade_to_no_tags() {
        let catalog = ScriptedCatalog::new(
            Err(CatalogError::Unavailable("down".to_string())),
            Ok(vec![tag(1, "Red")]),
        );
        assert!(resolve_tags(&catalog, &view(5, "shoes"), &AllowList::AllCategories).is_empty());

        let catalog = ScriptedCatalog::new(
            Ok(vec![ProductId(1)]),
            Err(CatalogError::Taxonomy("no such taxonomy".to_string())),
        );
        assert!(resolve_tags(&catalog, &view(5, "shoes"), &AllowList::AllCategories).is_empty());
    }

    #[test]
    fn duplicates_and_order_are_normalised() {
        let catalog = ScriptedCatalog::new(
            Ok(vec![ProductId(1)]),
            Ok(vec![
                tag(3, "red"),
                tag(2, "Blue"),
                tag(3, "red"),
                tag(1, "Red"),
                tag(4, "apple"),
            ]),
        );
        let tags = resolve_tags(&catalog, &view(5, "shoes"), &AllowList::AllCategories);
        let ids: Vec<u64> = tags.iter().map(|tag| tag.id.0).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }

    #[test]
    fn unresolved_category_yields_nothing_even_when_all_enabled() {
        let catalog = ScriptedCatalog::new(Ok(vec![ProductId(1)]), Ok(vec![tag(1, "Red")]));
        let tags = resolve_tags(
            &catalog,
            &PageView::CategoryArchive(None),
            &AllowList::AllCategories,
        );
        assert!(tags.is_empty());

        let blank_slug = PageView::CategoryArchive(Some(QueriedCategory {
            id: RawId::Int(5),
            slug: String::new(),
        }));
        assert!(resolve_tags(&catalog, &blank_slug, &AllowList::AllCategories).is_empty());
        assert_eq!(catalog.calls(), 0);
    }

    #[test]
    fn resolution_reports_policy_outcome_alongside_tags() {
        let resolution = resolve(&shoes_catalog(), &view(5, "shoes"), &AllowList::AllCategories);
        assert!(resolution.active);
        assert_eq!(resolution.tags.len(), 2);

        let resolution = resolve(&shoes_catalog(), &view(6, "empty"), &AllowList::AllCategories);
        assert!(resolution.active);
        assert!(resolution.tags.is_empty());

        let catalog = ScriptedCatalog::new(Ok(vec![ProductId(1)]), Ok(vec![tag(1, "Red")]));
        let resolution = resolve(&catalog, &view(5, "shoes"), &AllowList::none());
        assert_eq!(resolution, TagResolution::default());
        assert_eq!(catalog.calls(), 0);
    }
}
