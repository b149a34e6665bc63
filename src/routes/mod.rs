use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use tera::{Context, Tera};

use crate::repository::HttpProductRepository;
use crate::services::catalog::ProductCatalog;
use crate::services::sitemap::Sitemap;

pub mod api;
pub mod sitemap;

/// Catalog service as wired into the application.
pub type AppCatalog = ProductCatalog<HttpProductRepository>;
/// Sitemap service as wired into the application.
pub type AppSitemap = Sitemap<HttpProductRepository>;

const TEMPLATES: [(&str, &str); 3] = [
    (
        "sitemap/index.xml",
        include_str!("../../templates/sitemap/index.xml"),
    ),
    (
        "sitemap/urlset.xml",
        include_str!("../../templates/sitemap/urlset.xml"),
    ),
    ("robots.txt", include_str!("../../templates/robots.txt")),
];

/// Builds the template engine with the embedded templates.
///
/// XML templates are escaped for XML rather than HTML so that URLs keep
/// their slashes.
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    tera.autoescape_on(vec![".xml"]);
    tera.set_escape_fn(escape_xml);
    Ok(tera)
}

fn escape_xml(input: &str) -> String {
    quick_xml::escape::escape(input).into_owned()
}

pub fn render_template(
    tera: &Tera,
    template: &str,
    context: &Context,
    content_type: ContentType,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type(content_type).body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sitemap::sitemap_index)
        .service(sitemap::sitemap_urlset)
        .service(sitemap::robots)
        .service(api::api_search)
        .service(api::api_featured_products)
        .service(api::api_products)
        .service(api::api_category_products);
}
