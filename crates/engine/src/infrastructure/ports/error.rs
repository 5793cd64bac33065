//! Error types for port operations.

/// Coarse classification shared by every storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Entity absent - not a failure of the operation itself.
    NotFound,
    /// Network or database connectivity.
    TransientIo,
    /// Payload or row could not be decoded into the expected shape.
    Malformed,
    /// Backend-specific uniqueness violation on write.
    Conflict,
}

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and key for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Uniqueness constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and key context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database { .. } => ErrorKind::TransientIo,
            Self::Serialization(_) => ErrorKind::Malformed,
            Self::ConstraintViolation(_) => ErrorKind::Conflict,
        }
    }
}

impl From<kinograph_domain::DomainError> for RepoError {
    fn from(e: kinograph_domain::DomainError) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Errors from the remote catalog API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Request(String),
    #[error("Catalog returned status {0}")]
    Status(u16),
    #[error("Catalog payload could not be decoded: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(_) | Self::Status(_) => ErrorKind::TransientIo,
            Self::Decode(_) => ErrorKind::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_classify_variants() {
        assert_eq!(RepoError::not_found("Movie", 1).kind(), ErrorKind::NotFound);
        assert_eq!(
            RepoError::database("query", "connection reset").kind(),
            ErrorKind::TransientIo
        );
        assert_eq!(RepoError::serialization("bad row").kind(), ErrorKind::Malformed);
        assert_eq!(RepoError::constraint("duplicate id").kind(), ErrorKind::Conflict);
        assert_eq!(CatalogError::Status(429).kind(), ErrorKind::TransientIo);
        assert_eq!(CatalogError::Decode("eof".into()).kind(), ErrorKind::Malformed);
    }

    #[test]
    fn not_found_message_names_entity_and_key() {
        let error = RepoError::not_found("Person", "Ridley Scott");
        assert_eq!(error.to_string(), "Person not found: Ridley Scott");
        assert!(error.is_not_found());
    }
}
