use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::sitemap::{SitemapEntry, SitemapLink, SitemapType};
use crate::routes::{AppSitemap, render_template};

/// `<url>` as rendered by `sitemap/urlset.xml`.
#[derive(Debug, Serialize)]
struct UrlView<'a> {
    loc: &'a str,
    lastmod: &'a str,
    changefreq: &'static str,
    priority: String,
    alternates: Vec<AlternateView<'a>>,
}

#[derive(Debug, Serialize)]
struct AlternateView<'a> {
    hreflang: &'a str,
    href: &'a str,
}

impl<'a> From<&'a SitemapEntry> for UrlView<'a> {
    fn from(entry: &'a SitemapEntry) -> Self {
        let alternates = entry
            .alternates
            .iter()
            .flat_map(|alternates| alternates.languages.iter())
            .map(|(locale, href)| AlternateView {
                hreflang: locale.as_str(),
                href,
            })
            .collect();
        Self {
            loc: &entry.url,
            lastmod: &entry.last_modified,
            changefreq: entry.change_frequency.as_str(),
            priority: entry.priority.to_string(),
            alternates,
        }
    }
}

pub fn index_context(links: &[SitemapLink]) -> Context {
    let mut context = Context::new();
    context.insert("links", links);
    context
}

pub fn urlset_context(entries: &[SitemapEntry]) -> Context {
    let urls: Vec<UrlView> = entries.iter().map(UrlView::from).collect();
    let mut context = Context::new();
    context.insert("entries", &urls);
    context
}

pub fn robots_context(host: &str, sitemaps: &[String]) -> Context {
    let mut context = Context::new();
    context.insert("host", host.trim_end_matches('/'));
    context.insert("sitemaps", sitemaps);
    context
}

#[get("/sitemap-index.xml")]
pub async fn sitemap_index(
    sitemap: web::Data<AppSitemap>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = index_context(&sitemap.index());
    render_template(&tera, "sitemap/index.xml", &context, ContentType::xml())
}

#[get("/sitemap/{name}")]
pub async fn sitemap_urlset(
    name: web::Path<String>,
    sitemap: web::Data<AppSitemap>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(sitemap_type) = SitemapType::from_segment(&name) else {
        return HttpResponse::NotFound().finish();
    };

    let entries = sitemap.entries(sitemap_type).await;
    log::info!(
        "Serving {} sitemap with {} entries",
        sitemap_type.as_str(),
        entries.len()
    );

    let context = urlset_context(&entries);
    render_template(&tera, "sitemap/urlset.xml", &context, ContentType::xml())
}

#[get("/robots.txt")]
pub async fn robots(sitemap: web::Data<AppSitemap>, tera: web::Data<Tera>) -> impl Responder {
    let context = robots_context(sitemap.settings().site_url.as_str(), &sitemap.robots());
    render_template(&tera, "robots.txt", &context, ContentType::plaintext())
}
