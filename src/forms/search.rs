use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategorySlug, TypeConstraintError};

/// Query string of `/api/search`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    #[validate(length(max = 256))]
    pub q: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchFormPayload {
    /// Raw keywords, still percent-encoded if the client sent them so.
    pub keywords: String,
    pub category: Option<CategorySlug>,
}

#[derive(Debug, Error)]
pub enum SearchFormError {
    #[error("Search query validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for SearchFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SearchFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<SearchForm> for SearchFormPayload {
    type Error = SearchFormError;

    fn try_from(value: SearchForm) -> Result<Self, Self::Error> {
        value.validate()?;
        // An empty `category=` means no category.
        let category = value
            .category
            .filter(|category| !category.trim().is_empty())
            .map(|category| CategorySlug::new(category.trim()))
            .transpose()?;

        Ok(Self {
            keywords: value.q,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_is_ignored() {
        let payload = SearchFormPayload::try_from(SearchForm {
            q: "chef".into(),
            category: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(payload.keywords, "chef");
        assert_eq!(payload.category, None);
    }

    #[test]
    fn keeps_category() {
        let payload = SearchFormPayload::try_from(SearchForm {
            q: "chef".into(),
            category: Some("life".into()),
        })
        .unwrap();
        assert_eq!(payload.category.unwrap(), "life");
    }

    #[test]
    fn rejects_overlong_keywords() {
        let result = SearchFormPayload::try_from(SearchForm {
            q: "a".repeat(257),
            category: None,
        });
        assert!(matches!(result, Err(SearchFormError::Validation(_))));
    }
}
