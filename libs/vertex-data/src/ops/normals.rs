//! # Vertex Normals
//!
//! Smooth per-vertex normals from a triangle list.

use config::constants::{approx_zero, NORMAL_STRIDE, POSITION_STRIDE, TRIANGLE_INDEX_COUNT};
use glam::Vec3;

use crate::channel::ChannelKind;
use crate::indices::Indices;
use crate::vertex_data::VertexData;

/// Computes area-weighted smooth normals.
///
/// Each face adds its un-normalized cross product to its three vertices,
/// so larger faces weigh more. The sums are normalized at the end; a
/// vertex touched by no face (or only degenerate ones) keeps a zero normal.
/// Triangles referencing a vertex past the end of `positions` are skipped.
///
/// # Example
///
/// ```rust
/// use vertex_data::{compute_normals, Indices};
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let normals = compute_normals(&positions, &Indices::U16(vec![0, 1, 2]));
/// assert_eq!(&normals[..3], &[0.0, 0.0, 1.0]);
/// ```
pub fn compute_normals(positions: &[f32], indices: &Indices) -> Vec<f32> {
    let vertex_count = positions.len() / POSITION_STRIDE;
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let vertex = |i: u32| -> Option<Vec3> {
        let start = i as usize * POSITION_STRIDE;
        positions
            .get(start..start + POSITION_STRIDE)
            .map(Vec3::from_slice)
    };

    let corners: Vec<u32> = indices.iter().collect();
    let mut skipped = 0usize;
    for tri in corners.chunks_exact(TRIANGLE_INDEX_COUNT) {
        let (Some(v0), Some(v1), Some(v2)) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2]))
        else {
            skipped += 1;
            continue;
        };

        let normal = (v1 - v0).cross(v2 - v0);
        for &i in tri {
            sums[i as usize] += normal;
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} triangles with out-of-range indices while computing normals");
    }

    let mut normals = Vec::with_capacity(vertex_count * NORMAL_STRIDE);
    for sum in sums {
        let length = sum.length();
        let normal = if approx_zero(length) { Vec3::ZERO } else { sum / length };
        normals.extend_from_slice(&normal.to_array());
    }
    normals
}

impl VertexData {
    /// Replaces the normal channel with smooth normals computed from
    /// positions and indices. Does nothing without both.
    pub fn compute_normals(&mut self) -> &mut Self {
        let normals = match (self.positions(), self.indices()) {
            (Some(positions), Some(indices)) => compute_normals(positions, indices),
            _ => {
                log::debug!(
                    "Vertex data {} has no positions or indices, normals not computed",
                    self.unique_id()
                );
                return self;
            }
        };
        self.insert_channel(ChannelKind::Normal, normals);
        self
    }
}
