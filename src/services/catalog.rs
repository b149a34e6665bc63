use percent_encoding::percent_decode_str;

use crate::domain::product::{
    ListingOutcome, ListingQuery, ProductListItem, ProductListPage, ProductScope,
};
use crate::domain::types::{CategorySlug, PageLimit, PageNumber};
use crate::repository::ProductReader;
use crate::services::retry::{RetryPolicy, retry_fetch};

/// Product listings and keyword search over an upstream [`ProductReader`].
///
/// Every listing goes through the same retry policy. When the policy is
/// exhausted the failure is logged and reported as
/// [`ListingOutcome::Unavailable`] instead of an error.
#[derive(Clone)]
pub struct ProductCatalog<R> {
    repo: R,
    retry: RetryPolicy,
    categories: Vec<CategorySlug>,
}

impl<R> ProductCatalog<R>
where
    R: ProductReader,
{
    pub fn new(repo: R, retry: RetryPolicy, categories: Vec<CategorySlug>) -> Self {
        Self {
            repo,
            retry,
            categories,
        }
    }

    /// Categories known to the storefront, in configuration order.
    pub fn categories(&self) -> &[CategorySlug] {
        &self.categories
    }

    /// Resolves a user supplied slug against the known categories.
    pub fn find_category(&self, slug: &str) -> Option<&CategorySlug> {
        self.categories.iter().find(|category| category.as_str() == slug)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// One page of the unfiltered listing.
    pub async fn get_product_list(&self, page: PageNumber, limit: PageLimit) -> ListingOutcome {
        self.fetch(ProductScope::All, ListingQuery::new(page, limit)).await
    }

    /// One page of a category listing.
    pub async fn get_product_category(
        &self,
        category: &CategorySlug,
        page: PageNumber,
        limit: PageLimit,
    ) -> ListingOutcome {
        self.fetch(
            ProductScope::Category(category.clone()),
            ListingQuery::new(page, limit),
        )
        .await
    }

    /// One page of the featured listing.
    pub async fn get_featured_products(&self, page: PageNumber, limit: PageLimit) -> ListingOutcome {
        self.fetch(ProductScope::Featured, ListingQuery::new(page, limit)).await
    }

    /// Keyword search over a single upstream page.
    ///
    /// With a category the first page of that category is scanned, otherwise
    /// the first [`PageLimit::SEARCH`] rows of the unfiltered listing. Items whose
    /// author, title, description or tags contain the percent-decoded keywords
    /// (ignoring case) are kept in upstream order.
    pub async fn search_product(
        &self,
        keywords: &str,
        category: Option<&CategorySlug>,
    ) -> Vec<ProductListItem> {
        self.search(keywords, category).await.into_page().data
    }

    /// [`Self::search_product`] keeping track of upstream availability.
    ///
    /// Matches come back as a single page without a next page.
    pub async fn search(&self, keywords: &str, category: Option<&CategorySlug>) -> ListingOutcome {
        let outcome = match category {
            Some(category) => {
                self.get_product_category(category, PageNumber::FIRST, PageLimit::DEFAULT)
                    .await
            }
            None => {
                self.get_product_list(PageNumber::FIRST, PageLimit::SEARCH)
                    .await
            }
        };

        let ListingOutcome::Fetched(page) = outcome else {
            return ListingOutcome::Unavailable;
        };

        let needle = decode_keywords(keywords).to_lowercase();
        let data = page
            .data
            .into_iter()
            .filter(|item| item.search_haystack().contains(&needle))
            .collect();
        ListingOutcome::Fetched(ProductListPage { data, next_page: 0 })
    }

    async fn fetch(&self, scope: ProductScope, query: ListingQuery) -> ListingOutcome {
        let operation = match &scope {
            ProductScope::All => "list products".to_string(),
            ProductScope::Category(slug) => format!("list category {slug}"),
            ProductScope::Featured => "list featured products".to_string(),
        };

        let result = retry_fetch(&self.retry, &operation, || {
            self.repo.list_products(&scope, query)
        })
        .await;

        match result {
            Ok(mut page) => {
                let excess = page.truncate(query.limit);
                if excess > 0 {
                    log::warn!("{operation}: upstream returned {excess} rows beyond limit");
                }
                ListingOutcome::Fetched(page)
            }
            Err(e) => {
                log::warn!("Failed to {operation}, serving empty page: {e}");
                ListingOutcome::Unavailable
            }
        }
    }
}

/// Decodes percent-escapes in search keywords, keeping the raw input when the
/// result is not valid UTF-8.
pub fn decode_keywords(keywords: &str) -> String {
    match percent_decode_str(keywords).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => keywords.to_string(),
    }
}
