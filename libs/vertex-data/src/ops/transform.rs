//! # Transform Engine
//!
//! Applies an affine matrix to positions, normals and tangents in place.
//! The slice-level helpers are shared with the merge engine, which
//! transforms each participant's copied slice.

use config::constants::{
    NORMAL_STRIDE, POSITION_STRIDE, SINGULAR_DETERMINANT_EPSILON, TANGENT_STRIDE,
};
use glam::{Mat3, Mat4, Vec3};

use crate::channel::ChannelKind;
use crate::vertex_data::VertexData;

impl VertexData {
    /// Transforms positions, normals and tangents by `matrix`.
    ///
    /// Positions get the full affine transform. Normals and tangent
    /// directions get the inverse-transpose of the linear part and are not
    /// re-normalized; tangent handedness passes through. A matrix with a
    /// negative determinant mirrors the geometry, so the winding of every
    /// triangle is flipped to keep front faces consistent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::{Mat4, Vec3};
    /// use vertex_data::{ChannelKind, VertexData};
    ///
    /// let mut data = VertexData::new()
    ///     .with(ChannelKind::Position, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    ///     .with_indices(vec![0u32, 1, 2]);
    /// data.transform(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    /// assert_eq!(data.indices().unwrap().to_u32_vec(), vec![0, 2, 1]);
    /// ```
    pub fn transform(&mut self, matrix: &Mat4) -> &mut Self {
        let flip = flips_winding(matrix);
        let normal_matrix = normal_matrix(matrix);

        if let Some(positions) = self.get_mut(ChannelKind::Position) {
            transform_positions(positions, matrix);
        }
        if let Some(normals) = self.get_mut(ChannelKind::Normal) {
            transform_normals(normals, &normal_matrix);
        }
        if let Some(tangents) = self.get_mut(ChannelKind::Tangent) {
            transform_tangents(tangents, &normal_matrix);
        }

        if flip {
            if let Some(indices) = self.indices_mut() {
                indices.flip_faces();
            }
        }

        self
    }
}

/// True when `matrix` mirrors geometry.
#[inline]
pub(crate) fn flips_winding(matrix: &Mat4) -> bool {
    matrix.determinant() < 0.0
}

/// Inverse-transpose of the linear part of `matrix`.
///
/// A singular linear part cannot be inverted; the plain linear part is used
/// instead so degenerate scales collapse directions rather than produce NaN.
pub(crate) fn normal_matrix(matrix: &Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(*matrix);
    if linear.determinant().abs() < SINGULAR_DETERMINANT_EPSILON {
        linear
    } else {
        linear.inverse().transpose()
    }
}

pub(crate) fn transform_positions(values: &mut [f32], matrix: &Mat4) {
    for p in values.chunks_exact_mut(POSITION_STRIDE) {
        let transformed = matrix.transform_point3(Vec3::from_slice(p));
        transformed.write_to_slice(p);
    }
}

pub(crate) fn transform_normals(values: &mut [f32], normal_matrix: &Mat3) {
    for n in values.chunks_exact_mut(NORMAL_STRIDE) {
        let transformed = *normal_matrix * Vec3::from_slice(n);
        transformed.write_to_slice(n);
    }
}

pub(crate) fn transform_tangents(values: &mut [f32], normal_matrix: &Mat3) {
    for t in values.chunks_exact_mut(TANGENT_STRIDE) {
        let transformed = *normal_matrix * Vec3::from_slice(&t[..3]);
        transformed.write_to_slice(&mut t[..3]);
    }
}

/// Applies the rule for `kind` to `values`. Channels other than position,
/// normal and tangent are left untouched.
pub(crate) fn transform_channel(kind: ChannelKind, values: &mut [f32], matrix: &Mat4) {
    match kind {
        ChannelKind::Position => transform_positions(values, matrix),
        ChannelKind::Normal => transform_normals(values, &normal_matrix(matrix)),
        ChannelKind::Tangent => transform_tangents(values, &normal_matrix(matrix)),
        _ => {}
    }
}
