pub mod api;
pub mod catalog;
pub mod errors;
pub mod retry;
pub mod sitemap;

pub use errors::{ServiceError, ServiceResult};
