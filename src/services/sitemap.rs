//! Sitemap index, per-type sitemaps and robots URLs for the storefront.
//!
//! Every page is published once per supported locale. The default locale uses
//! the bare canonical URL; the others add `?hl=<locale>`. Each localized entry
//! lists its sibling locales as alternates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use url::Url;

use crate::domain::locale::LocaleSet;
use crate::domain::product::ListingOutcome;
use crate::domain::sitemap::{Alternates, SitemapEntry, SitemapLink, SitemapType};
use crate::domain::types::{ChangeFrequency, Locale, PageLimit, PageNumber, SitemapPriority};
use crate::repository::ProductReader;
use crate::services::catalog::ProductCatalog;

/// Path of the sitemap index, relative to the site URL.
pub const SITEMAP_INDEX_PATH: &str = "/sitemap-index.xml";
/// Directory of the per-type sitemaps, relative to the site URL.
pub const SITEMAP_BASE_PATH: &str = "/sitemap";
/// Query parameter selecting a non-default locale.
pub const LOCALE_QUERY_KEY: &str = "hl";

/// Static pages that exist once regardless of locale.
const LOCALE_INVARIANT_PATHS: [&str; 3] = ["/", "/chat", "/welcome"];

/// Site-wide settings of the generator.
#[derive(Debug, Clone)]
pub struct SitemapSettings {
    pub site_url: Url,
    pub locales: LocaleSet,
    /// Production links carry an `.xml` suffix, development links do not.
    pub production: bool,
    /// Rows requested per upstream page while enumerating products.
    pub page_size: PageLimit,
    pub max_pages: u32,
}

/// Per-path options of a generated entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryOptions {
    pub change_frequency: ChangeFrequency,
    pub priority: SitemapPriority,
    /// Emit only the default-locale entry, without alternates.
    pub no_locales: bool,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            change_frequency: ChangeFrequency::Monthly,
            priority: SitemapPriority::DEFAULT,
            no_locales: false,
        }
    }
}

impl EntryOptions {
    pub fn locale_invariant() -> Self {
        Self {
            no_locales: true,
            ..Self::default()
        }
    }

    /// Listing pages refreshed every day.
    pub fn daily_listing() -> Self {
        Self {
            change_frequency: ChangeFrequency::Daily,
            priority: SitemapPriority::ELEVATED,
            no_locales: false,
        }
    }
}

/// Generates sitemap data from configuration and the product catalog.
///
/// `generated_at` is fixed when the generator is built and is used as the
/// index `lastmod` and as the fallback for missing or invalid timestamps.
pub struct Sitemap<R> {
    catalog: ProductCatalog<R>,
    settings: SitemapSettings,
    generated_at: DateTime<Utc>,
}

impl<R> Sitemap<R>
where
    R: ProductReader,
{
    pub fn new(
        catalog: ProductCatalog<R>,
        settings: SitemapSettings,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            catalog,
            settings,
            generated_at,
        }
    }

    pub fn settings(&self) -> &SitemapSettings {
        &self.settings
    }

    /// Start timestamp in ISO-8601 form.
    pub fn last_modified(&self) -> String {
        iso_timestamp(self.generated_at)
    }

    /// Normalizes an optional timestamp, falling back to the start timestamp.
    pub fn format_time(&self, time: Option<&str>) -> String {
        format_time(time, self.generated_at)
    }

    /// Absolute URL of a site path.
    pub fn canonical_url(&self, path: &str) -> Url {
        let mut url = self.settings.site_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }

    /// Location of a per-type sitemap.
    pub fn sitemap_url(&self, sitemap_type: SitemapType) -> Url {
        let id = sitemap_type.as_str();
        let file = if self.settings.production {
            format!("{id}.xml")
        } else {
            id.to_string()
        };
        self.canonical_url(&format!("{SITEMAP_BASE_PATH}/{file}"))
    }

    /// `<sitemap>` entries of the sitemap index, one per sitemap type.
    pub fn index(&self) -> Vec<SitemapLink> {
        let lastmod = self.last_modified();
        SitemapType::ALL
            .into_iter()
            .map(|sitemap_type| SitemapLink {
                loc: self.sitemap_url(sitemap_type).to_string(),
                lastmod: lastmod.clone(),
            })
            .collect()
    }

    /// URLs announced in the robots file: the index first, then every
    /// per-type sitemap.
    pub fn robots(&self) -> Vec<String> {
        std::iter::once(self.canonical_url(SITEMAP_INDEX_PATH).to_string())
            .chain(
                SitemapType::ALL
                    .into_iter()
                    .map(|sitemap_type| self.sitemap_url(sitemap_type).to_string()),
            )
            .collect()
    }

    /// Entries of the given sitemap type.
    pub async fn entries(&self, sitemap_type: SitemapType) -> Vec<SitemapEntry> {
        match sitemap_type {
            SitemapType::Pages => self.pages(),
            SitemapType::Products => self.products().await,
        }
    }

    /// Static pages followed by the product and category listings.
    pub fn pages(&self) -> Vec<SitemapEntry> {
        let mut entries = Vec::new();
        for path in LOCALE_INVARIANT_PATHS {
            entries.extend(self.localized_entries(path, None, EntryOptions::locale_invariant()));
        }
        for path in ["/", "/products"] {
            entries.extend(self.localized_entries(path, None, EntryOptions::daily_listing()));
        }
        for category in self.catalog.categories() {
            entries.extend(self.localized_entries(
                &format!("/products/{category}"),
                None,
                EntryOptions::daily_listing(),
            ));
        }
        entries
    }

    /// Detail pages of every product in the unfiltered listing.
    ///
    /// The listing is followed through `nextPage` up to `max_pages` requests.
    /// An unavailable page ends the enumeration with what was gathered.
    pub async fn products(&self) -> Vec<SitemapEntry> {
        let mut entries = Vec::new();
        let mut page = PageNumber::FIRST;

        for _ in 0..self.settings.max_pages {
            let listing = match self
                .catalog
                .get_product_list(page, self.settings.page_size)
                .await
            {
                ListingOutcome::Fetched(listing) => listing,
                ListingOutcome::Unavailable => {
                    log::warn!("Product listing unavailable, products sitemap stops at page {page}");
                    return entries;
                }
            };

            for item in &listing.data {
                entries.extend(self.localized_entries(
                    &format!("/product/{}", item.product.identifier),
                    item.product.created_at.as_deref(),
                    EntryOptions::default(),
                ));
            }

            match PageNumber::new(listing.next_page) {
                Ok(next) if next > page => page = next,
                _ => return entries,
            }
        }

        log::warn!(
            "Products sitemap truncated after {} pages",
            self.settings.max_pages
        );
        entries
    }

    /// Entries of one path: a single default-locale entry for locale-invariant
    /// pages, otherwise one per supported locale.
    pub fn localized_entries(
        &self,
        path: &str,
        last_modified: Option<&str>,
        options: EntryOptions,
    ) -> Vec<SitemapEntry> {
        let locales = &self.settings.locales;
        if options.no_locales {
            return vec![self.localized_entry(
                locales.default_locale(),
                path,
                last_modified,
                options,
            )];
        }
        locales
            .supported()
            .iter()
            .map(|locale| self.localized_entry(locale, path, last_modified, options))
            .collect()
    }

    /// Entry of one path in one locale.
    pub fn localized_entry(
        &self,
        locale: &Locale,
        path: &str,
        last_modified: Option<&str>,
        options: EntryOptions,
    ) -> SitemapEntry {
        let canonical = self.canonical_url(path);
        let url = if self.settings.locales.is_default(locale) {
            canonical.to_string()
        } else {
            with_locale(&canonical, locale)
        };

        let alternates = (!options.no_locales).then(|| Alternates {
            languages: self
                .settings
                .locales
                .supported()
                .iter()
                .filter(|other| *other != locale)
                .map(|other| (other.clone(), with_locale(&canonical, other)))
                .collect(),
        });

        SitemapEntry {
            url,
            last_modified: self.format_time(last_modified),
            change_frequency: options.change_frequency,
            priority: options.priority,
            alternates,
        }
    }
}

fn with_locale(url: &Url, locale: &Locale) -> String {
    let mut url = url.clone();
    url.query_pairs_mut()
        .append_pair(LOCALE_QUERY_KEY, locale.as_str());
    url.to_string()
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalizes `time` to ISO-8601, or returns `fallback` when it is missing or
/// cannot be parsed. Accepts RFC 3339, naive date-times (read as UTC) and
/// plain dates.
pub fn format_time(time: Option<&str>, fallback: DateTime<Utc>) -> String {
    iso_timestamp(time.and_then(parse_timestamp).unwrap_or(fallback))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(time.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
}
