//! Helpers for integration tests.
#![allow(dead_code)]

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use discover::domain::locale::LocaleSet;
use discover::domain::types::{CatalogUrl, CategorySlug, Locale, PageLimit};
use discover::repository::{HttpCatalogSettings, HttpProductRepository};
use discover::services::catalog::ProductCatalog;
use discover::services::retry::RetryPolicy;
use discover::services::sitemap::{Sitemap, SitemapSettings};

pub const SITE_URL: &str = "https://discover.example.com";

/// Listing page as served by the upstream API.
pub fn page_json(ids: &[&str], next_page: u32) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "product": {
                    "identifier": id,
                    "author": format!("author of {id}"),
                    "createdAt": "2024-05-01T10:00:00Z",
                    "category": "life",
                },
                "meta": {
                    "title": format!("Title {id}"),
                    "description": format!("Description of {id}"),
                    "avatar": "🤖",
                    "tags": ["assistant"],
                },
            })
        })
        .collect();
    json!({ "data": data, "nextPage": next_page })
}

/// Repository reading from the mock server.
pub fn repository(server: &MockServer) -> HttpProductRepository {
    let settings = HttpCatalogSettings {
        request_timeout: Duration::from_secs(5),
        revalidate: Duration::from_secs(60),
        cache_capacity: 100,
    };
    HttpProductRepository::new(&CatalogUrl::new(server.uri()).unwrap(), &settings).unwrap()
}

pub fn catalog(server: &MockServer) -> ProductCatalog<HttpProductRepository> {
    ProductCatalog::new(
        repository(server),
        RetryPolicy::default(),
        vec![
            CategorySlug::new("life").unwrap(),
            CategorySlug::new("games").unwrap(),
        ],
    )
}

pub fn locales() -> LocaleSet {
    LocaleSet::new(
        Locale::new("en-US").unwrap(),
        vec![Locale::new("en-US").unwrap(), Locale::new("zh-CN").unwrap()],
    )
    .unwrap()
}

pub fn sitemap(server: &MockServer, production: bool) -> Sitemap<HttpProductRepository> {
    let settings = SitemapSettings {
        site_url: Url::parse(SITE_URL).unwrap(),
        locales: locales(),
        production,
        page_size: PageLimit::new(2).unwrap(),
        max_pages: 10,
    };
    let generated_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    Sitemap::new(catalog(server), settings, generated_at)
}
