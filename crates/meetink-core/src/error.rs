//! Error taxonomy for the whiteboard plugin.

use thiserror::Error;

/// Errors surfaced by whiteboard operations.
///
/// Only the environment errors are fatal: they abort opening the overlay
/// with no partial state left behind. Transport errors are logged and
/// swallowed at the replication layer and never reach the user; the variant
/// exists so transports have a typed channel to report through.
#[derive(Debug, Error)]
pub enum WhiteboardError {
    /// The conference's video display container could not be located.
    #[error("video container not found")]
    ContainerNotFound,

    /// An overlay drawing surface could not be created.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The messaging channel rejected a broadcast.
    #[error("broadcast failed: {0}")]
    Transport(String),
}
