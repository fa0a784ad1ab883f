use crate::kingdom::KingdomId;
use crate::location::LocationId;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors raised while constructing or validating world data.
///
/// Lookup queries on a built atlas never error — they return `Option` or an
/// empty collection, and callers treat absence as "nothing to show".
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Two points of interest share the same id.
    #[error("duplicate location id: \"{0}\"")]
    DuplicateLocation(String),

    /// Two kingdoms share the same id.
    #[error("duplicate kingdom id: \"{0}\"")]
    DuplicateKingdom(String),

    /// A location id could not be resolved.
    #[error("location not found: {0}")]
    UnknownLocation(LocationId),

    /// A kingdom id could not be resolved.
    #[error("kingdom not found: {0}")]
    UnknownKingdom(KingdomId),

    /// A structural validation failure with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
