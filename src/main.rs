use std::process;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use chrono::Utc;
use dotenvy::dotenv;
use env_logger::Env;
use url::Url;

use discover::domain::types::PageLimit;
use discover::models::config::ServerConfig;
use discover::repository::{HttpCatalogSettings, HttpProductRepository};
use discover::routes;
use discover::services::catalog::ProductCatalog;
use discover::services::retry::RetryPolicy;
use discover::services::sitemap::{Sitemap, SitemapSettings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
    let server_config = match ServerConfig::load(&app_env) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration for '{app_env}': {e}");
            process::exit(1);
        }
    };

    let locales = match server_config.locale_set() {
        Ok(locales) => locales,
        Err(e) => {
            log::error!("Invalid locale configuration: {e}");
            process::exit(1);
        }
    };

    let catalog_settings = HttpCatalogSettings {
        request_timeout: server_config.catalog.request_timeout(),
        revalidate: server_config.catalog.revalidate(),
        cache_capacity: server_config.catalog.cache_capacity,
    };
    let repo = match HttpProductRepository::new(server_config.catalog_url(), &catalog_settings) {
        Ok(repo) => repo,
        Err(e) => {
            log::error!("Failed to create catalog client: {e}");
            process::exit(1);
        }
    };
    log::info!("Reading products from {}", repo.base_url());

    let retry = RetryPolicy::default()
        .with_max_retries(server_config.catalog.max_retries)
        .with_initial_delay(server_config.catalog.retry_delay());
    let catalog = ProductCatalog::new(repo, retry, server_config.sitemap.categories.clone());

    let site_url = match Url::parse(server_config.site_url.as_str()) {
        Ok(url) => url,
        Err(e) => {
            log::error!("Invalid site url: {e}");
            process::exit(1);
        }
    };
    let page_size = match PageLimit::new(server_config.sitemap.page_size) {
        Ok(page_size) => page_size,
        Err(e) => {
            log::error!("Invalid sitemap page size: {e}");
            process::exit(1);
        }
    };
    let sitemap_settings = SitemapSettings {
        site_url,
        locales,
        production: server_config.is_production(),
        page_size,
        max_pages: server_config.sitemap.max_pages,
    };
    let sitemap = Sitemap::new(catalog.clone(), sitemap_settings, Utc::now());

    let tera = match routes::templates() {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            process::exit(1);
        }
    };

    let catalog = web::Data::new(catalog);
    let sitemap = web::Data::new(sitemap);
    let tera = web::Data::new(tera);

    let address = server_config.address.clone();
    let port = server_config.port;
    log::info!("Starting server on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(catalog.clone())
            .app_data(sitemap.clone())
            .app_data(tera.clone())
            .configure(routes::configure)
    })
    .bind((address, port))?
    .run()
    .await
}
