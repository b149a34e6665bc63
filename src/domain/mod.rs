//! Domain entities and value objects shared by the catalog client and the
//! sitemap generator.

pub mod locale;
pub mod product;
pub mod sitemap;
pub mod types;
