// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use common::{SHOP_CATALOG, TestHarness, build_test_app};
use tagshelf::util::test_config::TestConfigBuilder;

macro_rules! get_html {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }};
}

fn button_slugs(html: &str) -> Vec<String> {
    let marker = r#"data-tag=""#;
    html.match_indices(marker)
        .filter_map(|(index, _)| {
            let start = index + marker.len();
            html[start..]
                .find('"')
                .map(|end| html[start..start + end].to_string())
        })
        .collect()
}

#[actix_web::test]
async fn shoes_archive_lists_tags_of_visible_products() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/product-category/shoes");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(button_slugs(&html), vec!["", "blue", "red"]);
    assert!(html.contains(r#"class="tagshelf-filter__button is-active" data-tag="""#));
    assert!(html.contains(r#"<input type="hidden" name="product_tag" value="" />"#));
    assert!(html.contains(r#"method="get""#));
    assert!(html.contains("tag-filter.css"));
    assert!(html.contains("tag-filter.js"));
    assert!(html.contains("Runner"));
    assert!(html.contains("Walker"));
    assert!(!html.contains("Prototype"));
    assert!(!html.contains(r#"data-tag="green""#));
}

#[actix_web::test]
async fn selected_tag_narrows_listing_and_keeps_passthrough() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/product-category/shoes?orderby=price&product_tag=red");
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="tagshelf-filter__button is-active" data-tag="red""#));
    assert!(html.contains(r#"class="tagshelf-filter__button" data-tag="""#));
    assert!(html.contains(r#"<input type="hidden" name="product_tag" value="red" />"#));
    assert!(html.contains(r#"<input type="hidden" name="orderby" value="price" />"#));
    assert!(html.contains("Runner"));
    assert!(!html.contains("Walker"));
    // The tag list always reflects the whole category.
    assert_eq!(button_slugs(&html), vec!["", "blue", "red"]);
}

#[actix_web::test]
async fn unmatched_tag_is_carried_but_activates_nothing() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/product-category/shoes?product_tag=purple");
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("is-active"));
    assert!(html.contains(r#"<input type="hidden" name="product_tag" value="purple" />"#));
    assert!(html.contains("No products were found matching your selection."));
}

#[actix_web::test]
async fn passthrough_values_are_escaped_in_hidden_fields() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (_, html) = get_html!(
        &app,
        "/product-category/shoes?s=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E"
    );
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains(r#"name="s" value="&quot;&gt;&lt;script&gt;"#));
}

#[actix_web::test]
async fn category_without_products_shows_no_controls_but_loads_assets() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/product-category/socks");
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("tagshelf-filter__form"));
    assert!(html.contains("tag-filter.js"));
}

#[actix_web::test]
async fn allow_list_limits_filter_to_enabled_categories() {
    let harness =
        TestHarness::with_settings(SHOP_CATALOG, Some("enabled_categories: [20]\n"));
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/product-category/shoes");
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("tagshelf-filter"));
    assert!(!html.contains("tag-filter.css"));
    assert!(!html.contains("tag-filter.js"));
    assert!(html.contains("Runner"));

    let (status, html) = get_html!(&app, "/product-category/hats");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(button_slugs(&html), vec!["", "wool"]);
}

#[actix_web::test]
async fn unrecognised_settings_disable_the_filter_everywhere() {
    let harness =
        TestHarness::with_settings(SHOP_CATALOG, Some("enabled_categories: some\n"));
    let app = test::init_service(build_test_app(&harness)).await;

    for uri in ["/product-category/shoes", "/product-category/hats"] {
        let (status, html) = get_html!(&app, uri);
        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains("tagshelf-filter"), "{}", uri);
    }
}

#[actix_web::test]
async fn shop_index_links_categories_without_filter() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/");
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("product-category"));
    assert!(html.contains(r#"shoes">Shoes</a>"#));
    assert!(html.contains(r#"hats">Hats</a>"#));
    assert!(!html.contains("tagshelf-filter"));
}

#[actix_web::test]
async fn unknown_category_and_unknown_route_are_not_found() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, html) = get_html!(&app, "/product-category/boots");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("404"));

    let (status, _) = get_html!(&app, "/cart");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn builtin_assets_are_served() {
    let harness = TestHarness::new(SHOP_CATALOG);
    let app = test::init_service(build_test_app(&harness)).await;

    let (status, css) = get_html!(&app, "/builtin/tag-filter.css");
    assert_eq!(status, StatusCode::OK);
    assert!(css.contains(".tagshelf-filter__button.is-active"));

    let (status, _) = get_html!(&app, "/builtin/other.js");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn show_all_label_comes_from_config() {
    let harness = TestHarness::build(
        SHOP_CATALOG,
        None,
        TestConfigBuilder::new().with_all_label("Everything"),
    );
    let app = test::init_service(build_test_app(&harness)).await;

    let (_, html) = get_html!(&app, "/product-category/shoes");
    assert!(html.contains(r#"data-tag="">Everything</button>"#));
}
