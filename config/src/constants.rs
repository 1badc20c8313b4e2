//! # Configuration Constants
//!
//! Centralized constants for the vertex data pipeline. Channel strides,
//! default fill values, index width limits and float tolerances are all
//! defined here.
//!
//! ## Categories
//!
//! - **Strides**: Scalar components per vertex for each attribute channel
//! - **Fill Values**: Values used when a missing channel is completed
//! - **Limits**: Index buffer width boundaries
//! - **Precision**: Floating-point comparison tolerances

// =============================================================================
// STRIDE CONSTANTS
// =============================================================================

/// Components per vertex in the position channel (x, y, z).
///
/// The position channel defines the vertex count of a store: every other
/// channel is validated against `positions.len() / POSITION_STRIDE`.
///
/// # Example
///
/// ```rust
/// use config::constants::POSITION_STRIDE;
///
/// let positions = [0.0f32; 9];
/// assert_eq!(positions.len() / POSITION_STRIDE, 3);
/// ```
pub const POSITION_STRIDE: usize = 3;

/// Components per vertex in the normal channel (nx, ny, nz).
pub const NORMAL_STRIDE: usize = 3;

/// Components per vertex in the tangent channel (x, y, z, handedness).
pub const TANGENT_STRIDE: usize = 4;

/// Components per vertex in each UV channel (u, v).
pub const UV_STRIDE: usize = 2;

/// Components per vertex in the color channel (r, g, b, a).
///
/// Stores always hold RGBA. Sources with [`RGB_COLOR_STRIDE`] are expanded
/// during extraction.
pub const COLOR_STRIDE: usize = 4;

/// Components per vertex of an RGB color buffer, accepted on extraction only.
pub const RGB_COLOR_STRIDE: usize = 3;

/// Components per vertex in skinning channels (bone indices and weights).
pub const SKIN_STRIDE: usize = 4;

/// Indices per triangle in a triangle list.
///
/// # Example
///
/// ```rust
/// use config::constants::TRIANGLE_INDEX_COUNT;
///
/// let indices = [0u32, 1, 2, 2, 1, 3];
/// assert_eq!(indices.len() / TRIANGLE_INDEX_COUNT, 2);
/// ```
pub const TRIANGLE_INDEX_COUNT: usize = 3;

// =============================================================================
// FILL VALUES
// =============================================================================

/// Fill value for channels allocated during merge completion.
pub const DEFAULT_ATTRIBUTE_FILL: f32 = 0.0;

/// Fill value for a color channel allocated during merge completion
/// (opaque white).
pub const DEFAULT_COLOR_FILL: f32 = 1.0;

/// Alpha written when an RGB color buffer is expanded to RGBA.
pub const DEFAULT_COLOR_ALPHA: f32 = 1.0;

// =============================================================================
// LIMITS
// =============================================================================

/// Largest index value representable in a 16-bit index buffer.
///
/// Merges that produce a larger index are widened to 32-bit.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_U16_INDEX;
///
/// assert_eq!(MAX_U16_INDEX, 65_535);
/// ```
pub const MAX_U16_INDEX: u32 = u16::MAX as u32;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for f32 length comparisons.
pub const EPSILON: f32 = 1e-5;

/// Determinant magnitude below which a linear transform is treated as
/// singular and cannot be inverted for normal transformation.
pub const SINGULAR_DETERMINANT_EPSILON: f32 = 1e-12;

/// Checks if a f32 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-7));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f32) -> bool {
    value.abs() < EPSILON
}
