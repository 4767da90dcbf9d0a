use thiserror::Error;

/// Configuration problems found before any placement attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecorError {
    #[error("Room size must be non-negative, got ({x}, {y}, {z})")]
    NegativeRoomSize { x: f32, y: f32, z: f32 },

    #[error("Group '{group}' has no asset variants")]
    EmptyVariants { group: String },

    #[error("Group '{group}' has min_count {min} > max_count {max}")]
    InvalidCountRange { group: String, min: u32, max: u32 },

    #[error("Group '{group}' has distance band [{min}, {max}]; expected 0 <= min <= max <= 1")]
    InvalidDistanceBand { group: String, min: f32, max: f32 },

    #[error("Group '{group}' has height range [{min}, {max}]; expected min <= max")]
    InvalidHeightRange { group: String, min: f32, max: f32 },

    #[error("Group '{group}' has invalid overlap radius {radius}")]
    InvalidOverlapRadius { group: String, radius: f32 },
}

impl DecorError {
    /// Offending group, if the error is group-specific.
    pub fn group(&self) -> Option<&str> {
        match self {
            DecorError::NegativeRoomSize { .. } => None,
            DecorError::EmptyVariants { group }
            | DecorError::InvalidCountRange { group, .. }
            | DecorError::InvalidDistanceBand { group, .. }
            | DecorError::InvalidHeightRange { group, .. }
            | DecorError::InvalidOverlapRadius { group, .. } => Some(group),
        }
    }
}

/// Result type alias for decoration calls
pub type DecorResult<T> = Result<T, DecorError>;
