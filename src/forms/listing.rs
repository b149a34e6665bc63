use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::ListingQuery;
use crate::domain::types::{PageLimit, PageNumber, TypeConstraintError};

/// Query string of the listing routes.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListingForm {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingFormPayload {
    pub page: PageNumber,
    pub limit: Option<PageLimit>,
}

impl ListingFormPayload {
    /// Listing query using `default_limit` when the client sent none.
    pub fn into_query(self, default_limit: PageLimit) -> ListingQuery {
        ListingQuery::new(self.page, self.limit.unwrap_or(default_limit))
    }
}

#[derive(Debug, Error)]
pub enum ListingFormError {
    #[error("Listing query validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for ListingFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

// Zero values are rejected by `validate()` first; this keeps `?` usable.
impl From<TypeConstraintError> for ListingFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<ListingForm> for ListingFormPayload {
    type Error = ListingFormError;

    fn try_from(value: ListingForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let page = match value.page {
            Some(page) => PageNumber::new(page)?,
            None => PageNumber::FIRST,
        };

        Ok(Self {
            page,
            limit: value.limit.map(PageLimit::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults() {
        let payload = ListingFormPayload::try_from(ListingForm::default()).unwrap();
        assert_eq!(payload.page, PageNumber::FIRST);
        assert_eq!(payload.limit, None);

        let query = payload.into_query(PageLimit::FEATURED);
        assert_eq!(query, ListingQuery::new(PageNumber::FIRST, PageLimit::FEATURED));
    }

    #[test]
    fn keeps_explicit_values() {
        let form = ListingForm {
            page: Some(3),
            limit: Some(100),
        };
        let query = ListingFormPayload::try_from(form)
            .unwrap()
            .into_query(PageLimit::DEFAULT);
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn rejects_out_of_range_values() {
        for (page, limit) in [(Some(0), None), (None, Some(0)), (None, Some(101))] {
            let result = ListingFormPayload::try_from(ListingForm { page, limit });
            assert!(matches!(result, Err(ListingFormError::Validation(_))));
        }
    }
}
