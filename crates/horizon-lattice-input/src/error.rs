//! Error types for input routing.

/// Result type alias for input routing operations.
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors reported by the region index and the dispatcher.
///
/// Every rejected call leaves the router exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// A region with this name is already registered.
    #[error("A region named '{name}' is already registered")]
    DuplicateName { name: String },

    /// A candidate (IME composition) update carried malformed offsets.
    #[error("Invalid candidate update: {0}")]
    Validation(#[from] CandidateError),

    /// The operation referenced a region that is not registered.
    #[error("No region named '{name}' is registered")]
    UnknownRegion { name: String },

    /// The other half of a sample queue has been dropped.
    #[error("Sample queue disconnected")]
    QueueDisconnected,
}

impl InputError {
    /// Create a duplicate name error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create an unknown region error.
    pub fn unknown_region(name: impl Into<String>) -> Self {
        Self::UnknownRegion { name: name.into() }
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// The ways a candidate's offsets can be out of bounds.
///
/// All offsets are character indices into the composed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
    /// Highlight start lies after highlight end.
    #[error("highlight start {start} is after highlight end {end}")]
    HighlightReversed { start: usize, end: usize },

    /// Highlight end lies beyond the text.
    #[error("highlight end {end} exceeds text length {len}")]
    HighlightOutOfRange { end: usize, len: usize },

    /// Cursor lies beyond the text.
    #[error("cursor {cursor} exceeds text length {len}")]
    CursorOutOfRange { cursor: usize, len: usize },
}
