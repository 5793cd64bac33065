//! Neo4j deserialization helpers for row conversion functions.

use neo4rs::Node;

use crate::infrastructure::ports::RepoError;

/// Extension trait for Neo4j Node to simplify common deserialization patterns.
pub trait NodeExt {
    /// Get a string field with a default value if missing.
    fn get_string_or(&self, field: &str, default: &str) -> String;

    /// Get an f64 field with a default value if missing.
    fn get_f64_or(&self, field: &str, default: f64) -> f64;

    /// Get a non-negative integer field, falling back to zero when missing.
    fn get_u64_or_zero(&self, field: &str) -> u64;

    /// Get an optional u32 field, returning None if negative or missing.
    fn get_optional_u32(&self, field: &str) -> Option<u32>;

    /// Get a required identifier field with strict error handling (fail-fast).
    fn get_id_strict(&self, field: &str) -> Result<u64, RepoError>;
}

impl NodeExt for Node {
    fn get_string_or(&self, field: &str, default: &str) -> String {
        self.get(field).unwrap_or_else(|_| default.to_string())
    }

    fn get_f64_or(&self, field: &str, default: f64) -> f64 {
        self.get(field).unwrap_or(default)
    }

    fn get_u64_or_zero(&self, field: &str) -> u64 {
        self.get::<i64>(field)
            .ok()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0)
    }

    fn get_optional_u32(&self, field: &str) -> Option<u32> {
        self.get::<i64>(field)
            .ok()
            .and_then(|n| u32::try_from(n).ok())
    }

    fn get_id_strict(&self, field: &str) -> Result<u64, RepoError> {
        let raw: i64 = self.get(field).map_err(|e| {
            RepoError::database(
                "query",
                format!("Missing required field '{}': {}", field, e),
            )
        })?;
        id_from_bolt(raw)
    }
}

/// Bolt integers are signed; identifiers are stored as non-negative i64.
pub fn id_to_bolt(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(i64::MAX)
}

pub fn id_from_bolt(raw: i64) -> Result<u64, RepoError> {
    u64::try_from(raw).map_err(|_| RepoError::serialization(format!("negative id {raw}")))
}

/// Map a failed write, surfacing constraint failures as `ConstraintViolation`.
pub fn map_write_error(operation: &'static str, error: neo4rs::Error) -> RepoError {
    let message = error.to_string();
    if message.contains("ConstraintValidationFailed") {
        RepoError::constraint(message)
    } else {
        RepoError::database(operation, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_cross_the_bolt_boundary_as_signed_integers() {
        assert_eq!(id_to_bolt(1000), 1000);
        assert_eq!(id_to_bolt(u64::MAX), i64::MAX);
        assert_eq!(id_from_bolt(42).expect("positive id"), 42);
        assert!(id_from_bolt(-1).is_err());
    }
}
