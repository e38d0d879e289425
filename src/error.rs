// ============================================================================
// ERROR TYPES — one recoverable taxonomy for the whole engine
// ============================================================================
//
// Every variant is advisory: the front-end surfaces the message and carries
// on. Contract violations (mismatched buffer dimensions, bad byte lengths)
// are not represented here — those panic in the checked constructors.

/// Recoverable engine error, surfaced to the user as an informational
/// message by the front-end.
#[derive(Debug)]
pub enum EditError {
    /// An operation was invoked with no image loaded. The caller should
    /// no-op and tell the user, not crash.
    EmptyBuffer,
    /// `revert` with no loaded image to fall back to.
    NothingToRevert,
    /// `save` with nothing to save.
    NoImage,
    /// Unreadable or corrupt image bytes.
    Decode(String),
    /// Out-of-range strength/size/level. The UI pre-clamps via its input
    /// widgets, but the engine re-validates and rejects rather than trust
    /// the caller.
    InvalidParameter(String),
    Io(std::io::Error),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::EmptyBuffer => write!(f, "no image loaded"),
            EditError::NothingToRevert => write!(f, "no image to revert"),
            EditError::NoImage => write!(f, "there is no image to save"),
            EditError::Decode(e) => write!(f, "cannot open image: {}", e),
            EditError::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            EditError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EditError {
    fn from(e: std::io::Error) -> Self {
        EditError::Io(e)
    }
}

impl From<image::ImageError> for EditError {
    fn from(e: image::ImageError) -> Self {
        EditError::Decode(e.to_string())
    }
}
