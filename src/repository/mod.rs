use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use url::Url;

use crate::domain::product::{ListingQuery, ProductListPage, ProductScope};
use crate::domain::types::CatalogUrl;

pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Path of the listing endpoints on the catalog host.
pub const PRODUCTS_API_PATH: &str = "api/products";

/// Repository backed by the upstream product REST API.
///
/// The `reqwest::Client` and the response cache are reference counted, so the
/// repository is cheap to clone and can be shared between workers.
#[derive(Clone)]
pub struct HttpProductRepository {
    client: Client,
    base_url: Url,
    cache: Cache<String, ProductListPage>,
}

/// Transport settings for [`HttpProductRepository`].
#[derive(Debug, Clone)]
pub struct HttpCatalogSettings {
    pub request_timeout: Duration,
    /// Revalidation window: successful responses are reused for this long.
    pub revalidate: Duration,
    pub cache_capacity: u64,
}

impl HttpProductRepository {
    /// Create a repository reading `{catalog_url}/api/products`.
    pub fn new(catalog_url: &CatalogUrl, settings: &HttpCatalogSettings) -> RepositoryResult<Self> {
        let mut base_url = Url::parse(catalog_url.as_str())?;
        base_url
            .path_segments_mut()
            .map_err(|_| RepositoryError::InvalidUrl(catalog_url.to_string()))?
            .pop_if_empty()
            .extend(PRODUCTS_API_PATH.split('/'));

        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("discover/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(settings.cache_capacity)
            .time_to_live(settings.revalidate)
            .build();

        Ok(Self {
            client,
            base_url,
            cache,
        })
    }

    /// Base URL of the listing endpoints.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Read-only access to product listings.
///
/// Implementations perform a single attempt; retrying is the caller's policy.
pub trait ProductReader {
    /// Fetch one listing page for the given scope.
    fn list_products(
        &self,
        scope: &ProductScope,
        query: ListingQuery,
    ) -> impl Future<Output = RepositoryResult<ProductListPage>>;
}

/// Builds `{base}[/{segment}]?page=&limit=`, encoding the segment as a single
/// path component.
pub fn listing_url(
    base_url: &Url,
    scope: &ProductScope,
    query: ListingQuery,
) -> RepositoryResult<Url> {
    let mut url = base_url.clone();
    if let Some(segment) = scope.path_segment() {
        url.path_segments_mut()
            .map_err(|_| RepositoryError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty()
            .push(segment);
    }
    url.query_pairs_mut().extend_pairs(query.pairs());
    Ok(url)
}
