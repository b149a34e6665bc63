use std::time::Duration;

use ::config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::locale::LocaleSet;
use crate::domain::types::{CatalogUrl, CategorySlug, Locale, SiteUrl, TypeConstraintError};

/// Deployment environment; selects the upstream host and sitemap link style.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Configuration options specific to the Discover service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub environment: Environment,
    pub address: String,
    pub port: u16,
    /// Canonical public URL used in sitemaps and robots.
    pub site_url: SiteUrl,
    pub catalog: CatalogConfig,
    pub sitemap: SitemapConfig,
    pub locales: LocalesConfig,
}

/// Upstream product API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub production_url: CatalogUrl,
    pub development_url: CatalogUrl,
    /// How long a successful listing response may be served from memory.
    pub revalidate_secs: u64,
    pub request_timeout_secs: u64,
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub cache_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    pub categories: Vec<CategorySlug>,
    /// Rows requested per upstream page while enumerating products.
    pub page_size: u32,
    /// Upper bound on upstream requests for a single products sitemap.
    pub max_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalesConfig {
    pub default: Locale,
    pub supported: Vec<Locale>,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml`
    /// overlay and `APP__*` environment variables, in that order.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(::config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Host of the upstream product API for the current environment.
    pub fn catalog_url(&self) -> &CatalogUrl {
        match self.environment {
            Environment::Production => &self.catalog.production_url,
            Environment::Development => &self.catalog.development_url,
        }
    }

    pub fn locale_set(&self) -> Result<LocaleSet, TypeConstraintError> {
        LocaleSet::new(self.locales.default.clone(), self.locales.supported.clone())
    }
}

impl CatalogConfig {
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
