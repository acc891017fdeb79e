//! Category key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CategoryKey`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CategoryKeyError {
    /// The key is the empty string.
    #[error("category key cannot be empty")]
    Empty,
    /// The key exceeds the length limit.
    #[error("category key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9_-]`.
    #[error("category key contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A URL-safe category slug (e.g. `garden`, `hiking`).
///
/// Category keys address catalog collections and appear in request paths,
/// so they are restricted to lowercase ASCII alphanumerics, `-`, and `_`.
/// They also form half of the composite cart line key: the same item ID in
/// two categories is two distinct lines.
///
/// ## Examples
///
/// ```
/// use greenridge_core::CategoryKey;
///
/// assert!(CategoryKey::parse("garden").is_ok());
/// assert!(CategoryKey::parse("winter-sale").is_ok());
///
/// assert!(CategoryKey::parse("").is_err());        // empty
/// assert!(CategoryKey::parse("Сад").is_err());     // non-ASCII
/// assert!(CategoryKey::parse("a/b").is_err());     // path separator
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Maximum length of a category key.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `CategoryKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters,
    /// or contains anything but lowercase ASCII alphanumerics, `-`, or `_`.
    pub fn parse(s: &str) -> Result<Self, CategoryKeyError> {
        if s.is_empty() {
            return Err(CategoryKeyError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(CategoryKeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
        {
            return Err(CategoryKeyError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CategoryKey` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the key is the empty string.
    ///
    /// Only possible for values that bypassed [`CategoryKey::parse`]
    /// (deserialized persisted data); such values are rejected on restore.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CategoryKey {
    type Err = CategoryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx codecs for TEXT columns (postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CategoryKey {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CategoryKey {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Keys were validated on the way in; rows come back as-is
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CategoryKey {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys() {
        assert!(CategoryKey::parse("garden").is_ok());
        assert!(CategoryKey::parse("hiking").is_ok());
        assert!(CategoryKey::parse("winter-sale_2024").is_ok());
        assert!(CategoryKey::parse("x").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(CategoryKey::parse(""), Err(CategoryKeyError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(65);
        assert!(matches!(
            CategoryKey::parse(&long),
            Err(CategoryKeyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_uppercase() {
        assert!(matches!(
            CategoryKey::parse("Garden"),
            Err(CategoryKeyError::InvalidCharacter('G'))
        ));
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        assert!(CategoryKey::parse("a/b").is_err());
        assert!(CategoryKey::parse("a b").is_err());
        assert!(CategoryKey::parse("a.b").is_err());
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        assert!(CategoryKey::parse("сад").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let key: CategoryKey = "garden".parse().unwrap();
        assert_eq!(format!("{key}"), "garden");
        assert_eq!(key.as_str(), "garden");
    }

    #[test]
    fn test_serde_roundtrip() {
        let key = CategoryKey::parse("hiking").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"hiking\"");

        let parsed: CategoryKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
