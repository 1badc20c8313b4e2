//! # Config Crate
//!
//! Centralized configuration constants for the vertex data pipeline.
//! Channel strides, fill values and tolerances are defined here so the
//! engine crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{COLOR_STRIDE, DEFAULT_COLOR_FILL, POSITION_STRIDE};
//!
//! let vertex_count = 9 / POSITION_STRIDE;
//! let colors = vec![DEFAULT_COLOR_FILL; vertex_count * COLOR_STRIDE];
//! assert_eq!(colors.len(), 12);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values

pub mod constants;
