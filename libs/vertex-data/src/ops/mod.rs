//! # Vertex Data Operations
//!
//! Whole-store operations implemented as `impl VertexData` blocks:
//!
//! - [`transform`] - affine transform with winding correction
//! - [`merge`] - multi-store concatenation with index widening
//! - [`split`] - per-material partitioning
//! - [`normals`] - smooth vertex normals

pub mod merge;
pub mod normals;
pub mod split;
pub mod transform;
