use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategorySlug, MetaAvatar, MetaDescription, MetaTitle, PageLimit, PageNumber,
    ProductIdentifier,
};

/// A product as published by the upstream catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub identifier: ProductIdentifier,
    #[serde(default)]
    pub author: Option<String>,
    /// Creation timestamp exactly as sent upstream; normalized when rendered.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Display metadata attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Meta {
    #[serde(default)]
    pub title: Option<MetaTitle>,
    #[serde(default)]
    pub description: Option<MetaDescription>,
    #[serde(default)]
    pub avatar: Option<MetaAvatar>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One row of a listing: the product joined with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductListItem {
    pub product: Product,
    #[serde(default)]
    pub meta: Meta,
}

impl ProductListItem {
    /// Text searched by keyword queries: author, title, description and tags
    /// joined with commas, lower-cased. Empty values are skipped.
    pub fn search_haystack(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3 + self.meta.tags.len());
        parts.extend(self.product.author.as_deref());
        parts.extend(self.meta.title.as_ref().map(MetaTitle::as_str));
        parts.extend(self.meta.description.as_ref().map(MetaDescription::as_str));
        parts.extend(self.meta.tags.iter().map(String::as_str));
        parts.retain(|part| !part.is_empty());
        parts.join(",").to_lowercase()
    }
}

/// A page of listing rows. `next_page == 0` means there are no further pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductListPage {
    #[serde(default)]
    pub data: Vec<ProductListItem>,
    #[serde(default)]
    pub next_page: u32,
}

impl ProductListPage {
    /// The `{ data: [], nextPage: 0 }` sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether another page can be requested.
    pub fn has_next(&self) -> bool {
        self.next_page != 0
    }

    /// Drops rows beyond `limit`, returning how many were removed.
    pub fn truncate(&mut self, limit: PageLimit) -> usize {
        let limit = limit.get() as usize;
        let excess = self.data.len().saturating_sub(limit);
        self.data.truncate(limit);
        excess
    }
}

/// Result of fetching a listing once the retry policy is exhausted.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    /// The upstream answered with a page.
    Fetched(ProductListPage),
    /// The upstream could not be reached or answered with garbage.
    Unavailable,
}

impl ListingOutcome {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Collapses the outcome into a page, using the empty sentinel when the
    /// upstream was unavailable.
    pub fn into_page(self) -> ProductListPage {
        match self {
            Self::Fetched(page) => page,
            Self::Unavailable => ProductListPage::empty(),
        }
    }
}

/// Which upstream listing to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductScope {
    All,
    Category(CategorySlug),
    Featured,
}

impl ProductScope {
    /// Path segment appended to the catalog base URL, if any.
    pub fn path_segment(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(slug) => Some(slug.as_str()),
            Self::Featured => Some("featured"),
        }
    }
}

/// Query keys understood by the upstream listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: PageNumber,
    pub limit: PageLimit,
}

impl ListingQuery {
    pub fn new(page: PageNumber, limit: PageLimit) -> Self {
        Self { page, limit }
    }

    /// Rendered `(key, value)` pairs in the order they are sent.
    pub fn pairs(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(author: Option<&str>, title: Option<&str>, tags: &[&str]) -> ProductListItem {
        ProductListItem {
            product: Product {
                identifier: ProductIdentifier::new("p-1").unwrap(),
                author: author.map(str::to_string),
                created_at: None,
                category: None,
            },
            meta: Meta {
                title: title.map(|t| MetaTitle::new(t).unwrap()),
                description: None,
                avatar: None,
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        }
    }

    #[test]
    fn haystack_skips_missing_values() {
        let item = item(Some("Alice"), None, &["Cooking", "", "Food"]);
        assert_eq!(item.search_haystack(), "alice,cooking,food");
    }

    #[test]
    fn decodes_upstream_page() {
        let page: ProductListPage = serde_json::from_value(serde_json::json!({
            "data": [{
                "product": {
                    "identifier": "chef",
                    "author": "Alice",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "category": "life"
                },
                "meta": { "title": "Chef", "description": null, "avatar": "🍳", "tags": ["food"] }
            }],
            "nextPage": 2
        }))
        .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].product.identifier, "chef");
        assert!(page.has_next());
    }

    #[test]
    fn rejects_pages_with_blank_identifiers() {
        let result: Result<ProductListPage, _> = serde_json::from_value(serde_json::json!({
            "data": [{ "product": { "identifier": " " }, "meta": { "tags": [] } }],
            "nextPage": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn truncates_to_limit() {
        let mut page = ProductListPage {
            data: vec![item(None, None, &[]), item(None, None, &[]), item(None, None, &[])],
            next_page: 0,
        };
        let removed = page.truncate(PageLimit::new(2).unwrap());
        assert_eq!(removed, 1);
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn unavailable_collapses_to_sentinel() {
        assert_eq!(ListingOutcome::Unavailable.into_page(), ProductListPage::empty());
    }

    #[test]
    fn scope_segments() {
        assert_eq!(ProductScope::All.path_segment(), None);
        assert_eq!(ProductScope::Featured.path_segment(), Some("featured"));
    }
}
