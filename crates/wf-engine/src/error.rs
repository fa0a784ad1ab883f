//! Error types for the travel engine.

use thiserror::Error;

use wf_world::WorldError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while driving a game session.
///
/// Expected edge cases — unknown quest ids, transitions attempted in the
/// wrong state, malformed effect payloads — are deliberately *not* errors:
/// they degrade to no-ops recorded in the session journal, because a
/// narrative session must never crash on malformed generative output.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The world contains no locations to start a session from.
    #[error("world has no locations to start from")]
    EmptyWorld,

    /// World data was invalid or a start location could not be resolved.
    #[error(transparent)]
    World(#[from] WorldError),
}
