use thiserror::Error;

/// Errors raised by the drawing engine.
///
/// Out-of-range block writes are deliberately absent: they are clamped, never reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Surface created with a zero-sized side
    #[error("invalid surface dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: u32, height: u32 },

    /// Pen stamps must cover at least one pixel
    #[error("invalid pen size {0}: must be at least 1")]
    InvalidPenSize(u32),

    /// A collaborator the marker depends on was not supplied
    #[error("required collaborator missing: {0}")]
    MissingCollaborator(&'static str),
}
