use serde::Serialize;

use crate::domain::types::{ChangeFrequency, Locale, SitemapPriority};

/// Sub-sitemaps referenced from the sitemap index, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapType {
    Pages,
    Products,
}

impl SitemapType {
    pub const ALL: [Self; 2] = [Self::Pages, Self::Products];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Products => "products",
        }
    }

    /// Resolves a path segment such as `pages` or `pages.xml`.
    pub fn from_segment(segment: &str) -> Option<Self> {
        let id = segment.strip_suffix(".xml").unwrap_or(segment);
        Self::ALL.into_iter().find(|ty| ty.as_str() == id)
    }
}

/// Localized variants of a page in configured locale order.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Alternates {
    pub languages: Vec<(Locale, String)>,
}

impl Alternates {
    /// URL of the variant in `locale`, if listed.
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.languages
            .iter()
            .find(|(other, _)| other == locale)
            .map(|(_, href)| href.as_str())
    }
}

/// One `<url>` of a sitemap.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: String,
    pub change_frequency: ChangeFrequency,
    pub priority: SitemapPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternates: Option<Alternates>,
}

/// One `<sitemap>` of the sitemap index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SitemapLink {
    pub loc: String,
    pub lastmod: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_segments_with_and_without_suffix() {
        assert_eq!(SitemapType::from_segment("pages"), Some(SitemapType::Pages));
        assert_eq!(
            SitemapType::from_segment("products.xml"),
            Some(SitemapType::Products)
        );
        assert_eq!(SitemapType::from_segment("users.xml"), None);
    }

    #[test]
    fn serializes_entry_without_alternates() {
        let entry = SitemapEntry {
            url: "https://example.com/".into(),
            last_modified: "2024-01-01T00:00:00.000Z".into(),
            change_frequency: ChangeFrequency::Monthly,
            priority: SitemapPriority::DEFAULT,
            alternates: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "url": "https://example.com/",
                "lastModified": "2024-01-01T00:00:00.000Z",
                "changeFrequency": "monthly",
                "priority": 0.4
            })
        );
    }

    #[test]
    fn finds_alternate_by_locale() {
        let alternates = Alternates {
            languages: vec![
                (Locale::new("zh").unwrap(), "https://example.com/?hl=zh".into()),
                (Locale::new("ar").unwrap(), "https://example.com/?hl=ar".into()),
            ],
        };
        assert_eq!(
            alternates.get(&Locale::new("ar").unwrap()),
            Some("https://example.com/?hl=ar")
        );
        assert_eq!(alternates.get(&Locale::new("en").unwrap()), None);
    }
}
