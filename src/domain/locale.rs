use serde::Serialize;

use crate::domain::types::{Locale, TypeConstraintError};

/// Supported locales with one designated default.
///
/// Entries for the default locale omit the `hl` query parameter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocaleSet {
    default: Locale,
    supported: Vec<Locale>,
}

impl LocaleSet {
    /// Builds a set, requiring unique locales and a default that is one of them.
    pub fn new(default: Locale, supported: Vec<Locale>) -> Result<Self, TypeConstraintError> {
        if !supported.contains(&default) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "default locale {default} is not supported"
            )));
        }
        for (index, locale) in supported.iter().enumerate() {
            if supported[..index].contains(locale) {
                return Err(TypeConstraintError::InvalidValue(format!(
                    "duplicate locale {locale}"
                )));
            }
        }
        Ok(Self { default, supported })
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn is_default(&self, locale: &Locale) -> bool {
        &self.default == locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales(codes: &[&str]) -> Vec<Locale> {
        codes.iter().map(|c| Locale::new(*c).unwrap()).collect()
    }

    #[test]
    fn accepts_default_among_supported() {
        let set = LocaleSet::new(Locale::new("en").unwrap(), locales(&["en", "zh"])).unwrap();
        assert!(set.is_default(&Locale::new("en").unwrap()));
        assert_eq!(set.supported().len(), 2);
    }

    #[test]
    fn rejects_unsupported_default() {
        assert!(LocaleSet::new(Locale::new("fr").unwrap(), locales(&["en", "zh"])).is_err());
    }

    #[test]
    fn rejects_duplicates() {
        assert!(LocaleSet::new(Locale::new("en").unwrap(), locales(&["en", "zh", "en"])).is_err());
    }
}
