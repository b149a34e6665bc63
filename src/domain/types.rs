//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary. Values arriving from the upstream catalog are deserialized through
//! the same constructors, so a payload violating a constraint fails to decode.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A numeric value required to be positive was zero.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length in characters.
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Sitemap priority must be in [0.0, 1.0].
    #[error("sitemap priority must be between 0.0 and 1.0")]
    InvalidPriority,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Strings capped at a maximum number of characters, mirroring `varchar(n)`
/// columns of the upstream store. Empty values are allowed.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_CHARS: usize = $max;

            /// Constructs a value no longer than [`Self::MAX_CHARS`] characters.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                if value.chars().count() > Self::MAX_CHARS {
                    return Err(TypeConstraintError::TooLong($field, Self::MAX_CHARS));
                }
                Ok(Self(value))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }

            /// Borrow the URL as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned URL.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

macro_rules! positive_u32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(try_from = "u32", into = "u32")]
        pub struct $name(u32);

        impl $name {
            /// Creates a value ensuring it is greater than zero.
            pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveNumber($field))
                }
            }

            /// Returns the raw `u32`.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<u32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<u32> for $name {
            fn eq(&self, other: &u32) -> bool {
                self.0 == *other
            }
        }
    };
}

non_empty_string_newtype!(
    ProductIdentifier,
    "Public product identifier used in detail page paths.",
    "product identifier"
);
non_empty_string_newtype!(
    CategorySlug,
    "Product category slug used in listing paths.",
    "category"
);
non_empty_string_newtype!(
    Locale,
    "Language code such as `en-US` used for the `hl` query parameter.",
    "locale"
);

bounded_string_newtype!(MetaTitle, "Product display title.", "title", 255);
bounded_string_newtype!(
    MetaDescription,
    "Product display description.",
    "description",
    500
);
bounded_string_newtype!(MetaAvatar, "Short avatar token (emoji or code).", "avatar", 10);

url_string_newtype!(SiteUrl, "Canonical public URL of the site.", "site url");
url_string_newtype!(CatalogUrl, "Host URL of the upstream product API.", "catalog url");

positive_u32_newtype!(PageNumber, "One-based listing page number.", "page");
positive_u32_newtype!(PageLimit, "Maximum number of rows per listing page.", "limit");

impl PageNumber {
    pub const FIRST: Self = Self(1);
}

impl PageLimit {
    /// Page size of the product and category listings.
    pub const DEFAULT: Self = Self(12);
    /// Page size of the featured listing.
    pub const FEATURED: Self = Self(3);
    /// Rows scanned by a search without a category.
    pub const SEARCH: Self = Self(100);
}

/// How frequently a page is expected to change.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// Wire representation used in sitemap XML.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl Display for ChangeFrequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ChangeFrequency {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "change frequency: {other}"
            ))),
        }
    }
}

/// Sitemap priority in the inclusive range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct SitemapPriority(f64);

impl SitemapPriority {
    /// Priority given to pages without an explicit one.
    pub const DEFAULT: Self = Self(0.4);
    /// Priority of listing pages that change daily.
    pub const ELEVATED: Self = Self(0.7);

    /// Constructs a validated priority.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPriority)
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for SitemapPriority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for SitemapPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for SitemapPriority {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SitemapPriority> for f64 {
    fn from(value: SitemapPriority) -> Self {
        value.0
    }
}

impl PartialEq<f64> for SitemapPriority {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = ProductIdentifier::new("  chef-assistant  ").unwrap();
        assert_eq!(value.as_str(), "chef-assistant");
    }

    #[test]
    fn compares_with_string_slices() {
        let slug = CategorySlug::new("games").unwrap();
        assert!(slug == "games");
        assert!(PartialEq::<str>::eq(&slug, "games"));
        assert!("games" == slug);
        assert!(slug != "life");
    }

    #[test]
    fn rejects_empty_locales() {
        let err = Locale::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("locale"));
    }

    #[test]
    fn bounded_strings_count_characters() {
        assert!(MetaAvatar::new("🤖🤖🤖🤖🤖🤖🤖🤖🤖🤖").is_ok());
        assert_eq!(
            MetaAvatar::new("12345678901").unwrap_err(),
            TypeConstraintError::TooLong("avatar", 10)
        );
        assert!(MetaTitle::new("").is_ok());
    }

    #[test]
    fn bounded_strings_are_enforced_on_deserialize() {
        let long = "x".repeat(501);
        let result: Result<MetaDescription, _> = serde_json::from_value(serde_json::json!(long));
        assert!(result.is_err());
    }

    #[test]
    fn validates_urls() {
        assert!(SiteUrl::new("https://example.com").is_ok());
        let err = CatalogUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("catalog url"));
    }

    #[test]
    fn rejects_zero_page_numbers() {
        assert_eq!(
            PageNumber::new(0).unwrap_err(),
            TypeConstraintError::NonPositiveNumber("page")
        );
        assert_eq!(PageLimit::new(12).unwrap(), 12);
    }

    #[test]
    fn validates_priority_range() {
        assert!(SitemapPriority::new(0.0).is_ok());
        assert!(SitemapPriority::new(1.0).is_ok());
        assert_eq!(
            SitemapPriority::new(1.1).unwrap_err(),
            TypeConstraintError::InvalidPriority
        );
        assert_eq!(SitemapPriority::default(), 0.4);
    }

    #[test]
    fn parses_change_frequency() {
        assert_eq!(
            ChangeFrequency::try_from("Daily").unwrap(),
            ChangeFrequency::Daily
        );
        assert!(ChangeFrequency::try_from("sometimes").is_err());
        assert_eq!(ChangeFrequency::default().as_str(), "monthly");
    }
}
