//! # Material Ranges
//!
//! Contiguous vertex/index spans tagged with a material index, used to
//! partition one buffer set for multi-material rendering.

use serde::{Deserialize, Serialize};

use crate::target::SubMesh;

/// A contiguous vertex/index span associated with one material index.
///
/// Serializes with the engine's `materialInfos` field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRange {
    pub material_index: u32,
    #[serde(rename = "verticesStart")]
    pub vertex_start: usize,
    #[serde(rename = "verticesCount")]
    pub vertex_count: usize,
    pub index_start: usize,
    pub index_count: usize,
}

impl MaterialRange {
    /// Creates a range.
    pub fn new(
        material_index: u32,
        vertex_start: usize,
        vertex_count: usize,
        index_start: usize,
        index_count: usize,
    ) -> Self {
        Self {
            material_index,
            vertex_start,
            vertex_count,
            index_start,
            index_count,
        }
    }

    /// One past the last vertex of the range.
    #[inline]
    pub fn vertex_end(&self) -> usize {
        self.vertex_start + self.vertex_count
    }

    /// One past the last index of the range.
    #[inline]
    pub fn index_end(&self) -> usize {
        self.index_start + self.index_count
    }
}

impl From<SubMesh> for MaterialRange {
    fn from(sub_mesh: SubMesh) -> Self {
        Self {
            material_index: sub_mesh.material_index,
            vertex_start: sub_mesh.vertices_start,
            vertex_count: sub_mesh.vertices_count,
            index_start: sub_mesh.index_start,
            index_count: sub_mesh.index_count,
        }
    }
}

impl From<MaterialRange> for SubMesh {
    fn from(range: MaterialRange) -> Self {
        Self {
            material_index: range.material_index,
            vertices_start: range.vertex_start,
            vertices_count: range.vertex_count,
            index_start: range.index_start,
            index_count: range.index_count,
        }
    }
}
