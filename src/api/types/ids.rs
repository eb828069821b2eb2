//! Parsing of numeric identifiers from paths and query strings

use crate::domain::DomainError;

/// Parse a positive numeric id, e.g. the `{id}` path segment
pub fn parse_id<T: From<i64>>(raw: &str, field: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(T::from)
        .ok_or_else(|| {
            DomainError::invalid_id(format!(
                "{} must be a positive integer, got '{}'",
                field, raw
            ))
        })
}
