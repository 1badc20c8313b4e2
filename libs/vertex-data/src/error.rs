//! # Vertex Data Errors
//!
//! Error types for vertex data operations.
//!
//! ## Error Policy
//!
//! - Validation failures are returned immediately, nothing is retried
//! - Merge is not atomic: completion may already have filled buffers
//!   when a later participant fails validation

use crate::channel::ChannelKind;
use thiserror::Error;

/// Errors that can occur while validating, merging, splitting or
/// extracting vertex data.
#[derive(Debug, Error)]
pub enum VertexDataError {
    /// The store has no position channel.
    #[error("Positions are required")]
    MissingPositions,

    /// A channel's length disagrees with the vertex count, or positions do
    /// not hold a whole number of vertices.
    #[error("The {kind} buffer holds {actual} values, expected {expected}")]
    ElementCountMismatch {
        /// Offending channel
        kind: ChannelKind,
        /// Values the channel should hold
        expected: usize,
        /// Values the channel holds
        actual: usize,
    },

    /// Merge participants carry different channel sets and completion is off.
    #[error("Cannot merge vertex data that do not have the same set of attributes ({kind} differs)")]
    AttributeSetMismatch {
        /// First channel whose presence differs
        kind: ChannelKind,
    },

    /// A source color buffer is neither RGB nor RGBA.
    #[error("Unexpected number of color components: {0}")]
    UnexpectedColorComponentCount(usize),

    /// A material range points outside the store's buffers.
    #[error("Material range for material {material_index} is out of bounds")]
    MaterialRangeOutOfBounds {
        /// Material index of the offending range
        material_index: u32,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for vertex data operations.
pub type VertexDataResult<T> = Result<T, VertexDataError>;
