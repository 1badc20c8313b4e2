//! # Extraction
//!
//! Builds a store from an existing mesh or geometry.

use config::constants::{COLOR_STRIDE, DEFAULT_COLOR_ALPHA, RGB_COLOR_STRIDE};

use crate::channel::ChannelKind;
use crate::error::{VertexDataError, VertexDataResult};
use crate::material::MaterialRange;
use crate::target::GeometrySource;
use crate::vertex_data::VertexData;

impl VertexData {
    /// Copies every present channel, the index buffer, the vertex-alpha
    /// flag and any submeshes out of `source`.
    ///
    /// Colors stored as RGB are expanded to RGBA with an alpha of 1. Any
    /// color layout other than RGB or RGBA is rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vertex_data::{ChannelKind, Geometry, VertexData};
    ///
    /// let mut geometry = Geometry::new();
    /// geometry.set_buffer(ChannelKind::Position, vec![0.0; 9], 3);
    /// geometry.set_buffer(ChannelKind::Color, vec![0.5; 9], 3);
    ///
    /// let data = VertexData::extract_from(&geometry, false, false)?;
    /// assert_eq!(data.colors().unwrap().len(), 12);
    /// # Ok::<(), vertex_data::VertexDataError>(())
    /// ```
    pub fn extract_from(
        source: &impl GeometrySource,
        copy_when_shared: bool,
        force_copy: bool,
    ) -> VertexDataResult<VertexData> {
        let mut data = VertexData::new();

        for kind in ChannelKind::ALL {
            if !source.is_vertices_data_present(kind) {
                continue;
            }
            let Some(values) = source.get_vertices_data(kind, copy_when_shared, force_copy) else {
                continue;
            };

            let values = if kind == ChannelKind::Color {
                let components = source.vertex_size(kind).unwrap_or(COLOR_STRIDE);
                expand_colors(values, components)?
            } else {
                values
            };
            data.set(kind, values);
        }

        if let Some(indices) = source.get_indices(copy_when_shared, force_copy) {
            data.set_indices(indices);
        }

        if source.has_vertex_alpha() {
            data.set_has_vertex_alpha(true);
        }

        if let Some(sub_meshes) = source.sub_meshes() {
            data.set_material_ranges(sub_meshes.into_iter().map(MaterialRange::from).collect());
        }

        log::debug!(
            "Extracted vertex data {} ({} vertices)",
            data.unique_id(),
            data.vertex_count()
        );
        Ok(data)
    }
}

/// Converts a color buffer with `components` values per vertex to RGBA.
fn expand_colors(values: Vec<f32>, components: usize) -> VertexDataResult<Vec<f32>> {
    match components {
        COLOR_STRIDE => Ok(values),
        RGB_COLOR_STRIDE => {
            let mut rgba = Vec::with_capacity(values.len() / RGB_COLOR_STRIDE * COLOR_STRIDE);
            for rgb in values.chunks_exact(RGB_COLOR_STRIDE) {
                rgba.extend_from_slice(rgb);
                rgba.push(DEFAULT_COLOR_ALPHA);
            }
            Ok(rgba)
        }
        other => Err(VertexDataError::UnexpectedColorComponentCount(other)),
    }
}
