//! # Vertex Data Crate
//!
//! Attribute buffer store for GPU-consumable triangle geometry: named
//! per-vertex channels plus a triangle-list index buffer, with validation,
//! affine transformation, multi-store merge and material-based split.
//!
//! ## Architecture
//!
//! ```text
//! GeometrySource ─extract_from─▶ VertexData ─apply_to/update─▶ GeometryTarget
//!                                  │    ▲
//!                     transform / merge / split / compute_normals
//! ```
//!
//! Renderers, meshes and geometries are reached only through the
//! [`GeometryTarget`] and [`GeometrySource`] traits. [`Geometry`] is a
//! plain in-memory implementation of both.
//!
//! ## Usage
//!
//! ```rust
//! use glam::{Mat4, Vec3};
//! use vertex_data::{ChannelKind, MergeOptions, VertexData};
//!
//! let triangle = || {
//!     VertexData::new()
//!         .with(ChannelKind::Position, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
//!         .with_indices(vec![0u16, 1, 2])
//! };
//!
//! let mut a = triangle();
//! let mut b = triangle();
//! b.transform(&Mat4::from_translation(Vec3::X * 5.0));
//!
//! a.merge(&mut [&mut b], MergeOptions::default())?;
//! assert_eq!(a.positions().unwrap().len(), 18);
//! assert_eq!(a.indices().unwrap().to_u32_vec(), vec![0, 1, 2, 3, 4, 5]);
//! # Ok::<(), vertex_data::VertexDataError>(())
//! ```

pub mod apply;
pub mod channel;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod id;
pub mod indices;
pub mod material;
pub mod ops;
pub mod serialize;
pub mod target;
pub mod vertex_data;

pub use apply::{ApplyStep, ApplyTask};
pub use channel::{ChannelDescriptor, ChannelKind};
pub use error::{VertexDataError, VertexDataResult};
pub use geometry::Geometry;
pub use id::IdAllocator;
pub use indices::Indices;
pub use material::MaterialRange;
pub use ops::merge::{MergeOptions, MergeSource};
pub use ops::normals::compute_normals;
pub use serialize::SerializedVertexData;
pub use target::{GeometrySource, GeometryTarget, SubMesh};
pub use vertex_data::VertexData;
