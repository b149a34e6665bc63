//! Conversions from form errors into [`ServiceError`].
//!
//! Forms live next to the routes while the service layer owns the error type,
//! so the glue sits here instead of in either module.

use crate::forms::listing::ListingFormError;
use crate::forms::search::SearchFormError;
use crate::services::errors::ServiceError;

impl From<ListingFormError> for ServiceError {
    fn from(val: ListingFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<SearchFormError> for ServiceError {
    fn from(val: SearchFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
