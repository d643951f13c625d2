//! Validated search query.

use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters a trimmed query must contain.
pub const MIN_QUERY_LEN: usize = 2;

/// A trimmed, non-empty search keyword of at least [`MIN_QUERY_LEN`] characters.
///
/// Equality is exact string equality on the trimmed text; case is preserved.
///
/// # Examples
///
/// ```
/// use cinesearch::domain::Query;
///
/// let query = Query::parse("  batman ").unwrap();
/// assert_eq!(query.as_str(), "batman");
/// assert!(Query::parse(" a ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query(String);

impl Query {
    /// Trims `raw` and validates its length.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for blank input and
    /// [`ValidationError::TooShort`] when fewer than two characters remain.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();

        if actual == 0 {
            return Err(ValidationError::Empty);
        }
        if actual < MIN_QUERY_LEN {
            return Err(ValidationError::TooShort {
                min: MIN_QUERY_LEN,
                actual,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Query {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0
    }
}
