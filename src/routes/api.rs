use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::domain::product::{ListingOutcome, ProductListPage};
use crate::forms::listing::ListingForm;
use crate::forms::search::SearchForm;
use crate::routes::AppCatalog;
use crate::services::api as service;
use crate::services::{ServiceError, ServiceResult};

/// Response header set when the body is the empty sentinel served because the
/// upstream catalog could not be reached.
pub const CATALOG_STATUS_HEADER: &str = "x-catalog-status";
pub const CATALOG_DEGRADED: &str = "degraded";

fn respond<T, F>(result: ServiceResult<ListingOutcome>, body: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(ProductListPage) -> T,
{
    match result {
        Ok(ListingOutcome::Fetched(page)) => HttpResponse::Ok().json(body(page)),
        Ok(ListingOutcome::Unavailable) => HttpResponse::Ok()
            .insert_header((CATALOG_STATUS_HEADER, CATALOG_DEGRADED))
            .json(body(ProductListPage::empty())),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => {
            log::debug!("Rejected catalog query: {message}");
            HttpResponse::BadRequest().body(message)
        }
    }
}

#[get("/api/products")]
pub async fn api_products(
    params: web::Query<ListingForm>,
    catalog: web::Data<AppCatalog>,
) -> impl Responder {
    let result = service::list_products(catalog.get_ref(), params.into_inner()).await;
    respond(result, |page| page)
}

#[get("/api/products/featured")]
pub async fn api_featured_products(
    params: web::Query<ListingForm>,
    catalog: web::Data<AppCatalog>,
) -> impl Responder {
    let result = service::list_featured_products(catalog.get_ref(), params.into_inner()).await;
    respond(result, |page| page)
}

#[get("/api/products/{category}")]
pub async fn api_category_products(
    category: web::Path<String>,
    params: web::Query<ListingForm>,
    catalog: web::Data<AppCatalog>,
) -> impl Responder {
    let result =
        service::list_category_products(catalog.get_ref(), &category, params.into_inner()).await;
    respond(result, |page| page)
}

#[get("/api/search")]
pub async fn api_search(
    params: web::Query<SearchForm>,
    catalog: web::Data<AppCatalog>,
) -> impl Responder {
    let result = service::search_products(catalog.get_ref(), params.into_inner()).await;
    respond(result, |page| page.data)
}
