//! Directory error types.

use super::models::{SiteId, TournamentId};
use thiserror::Error;

/// Registration field that collided with an existing registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    Username,
    Email,
}

impl std::fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationField::Username => write!(f, "username"),
            RegistrationField::Email => write!(f, "email"),
        }
    }
}

/// Directory errors
///
/// Every error is recoverable: the operation that produced it left the
/// directory exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Missing or malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Site not found
    #[error("Site not found: {0}")]
    SiteNotFound(SiteId),

    /// Tournament not found
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// Tournament has no open seats
    #[error("Tournament {tournament_id} is full ({max_players} players)")]
    TournamentFull {
        tournament_id: TournamentId,
        max_players: u32,
    },

    /// Username or email already registered for the tournament
    #[error("Already registered for tournament {tournament_id}: {field} is taken")]
    AlreadyRegistered {
        tournament_id: TournamentId,
        field: RegistrationField,
    },
}

/// Coarse error taxonomy exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Capacity,
    DuplicateRegistration,
}

impl ErrorKind {
    /// Stable snake_case name for wire formats
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Capacity => "capacity",
            ErrorKind::DuplicateRegistration => "duplicate_registration",
        }
    }
}

impl DirectoryError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DirectoryError::Validation(message.into())
    }

    /// Which taxonomy bucket this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::Validation(_) => ErrorKind::Validation,
            DirectoryError::SiteNotFound(_) | DirectoryError::TournamentNotFound(_) => {
                ErrorKind::NotFound
            }
            DirectoryError::TournamentFull { .. } => ErrorKind::Capacity,
            DirectoryError::AlreadyRegistered { .. } => ErrorKind::DuplicateRegistration,
        }
    }

    /// Get a message that is safe to show to an end user
    ///
    /// Ids are dropped and a collision never says which other player owns
    /// the username or email.
    pub fn client_message(&self) -> String {
        match self {
            DirectoryError::Validation(_) => self.to_string(),
            DirectoryError::SiteNotFound(_) => "Site not found".to_string(),
            DirectoryError::TournamentNotFound(_) => "Tournament not found".to_string(),
            DirectoryError::TournamentFull { .. } => "Tournament is full".to_string(),
            DirectoryError::AlreadyRegistered { .. } => {
                "Already registered for this tournament".to_string()
            }
        }
    }
}

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_not_found_variants() {
        assert_eq!(DirectoryError::SiteNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(
            DirectoryError::TournamentNotFound(7).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_kind_names() {
        let full = DirectoryError::TournamentFull {
            tournament_id: 1,
            max_players: 2,
        };
        assert_eq!(full.kind().as_str(), "capacity");

        let dup = DirectoryError::AlreadyRegistered {
            tournament_id: 1,
            field: RegistrationField::Email,
        };
        assert_eq!(dup.kind().as_str(), "duplicate_registration");
        assert_eq!(
            DirectoryError::validation("name is required").kind().as_str(),
            "validation"
        );
    }

    #[test]
    fn test_display_names_colliding_field() {
        let err = DirectoryError::AlreadyRegistered {
            tournament_id: 3,
            field: RegistrationField::Username,
        };
        assert_eq!(
            err.to_string(),
            "Already registered for tournament 3: username is taken"
        );
    }

    #[test]
    fn test_client_message_hides_ids() {
        let err = DirectoryError::TournamentNotFound(42);
        assert_eq!(err.client_message(), "Tournament not found");
        assert!(!err.client_message().contains("42"));

        let err = DirectoryError::AlreadyRegistered {
            tournament_id: 42,
            field: RegistrationField::Email,
        };
        assert_eq!(
            err.client_message(),
            "Already registered for this tournament"
        );
    }

    #[test]
    fn test_client_message_keeps_validation_detail() {
        let err = DirectoryError::validation("siteCode is required");
        assert_eq!(err.client_message(), "Validation failed: siteCode is required");
    }
}
