//! Core library exports for the Discover storefront service.
//!
//! The `data` feature exposes only the domain types (products, listing pages,
//! locales and sitemap entries). The default `server` feature adds the HTTP
//! catalog client, the catalog and sitemap services and the actix-web routes
//! serving sitemaps, `robots.txt` and the JSON listing API.

pub mod domain;

#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
