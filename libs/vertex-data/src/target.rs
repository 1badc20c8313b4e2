//! # Geometry Collaborators
//!
//! The narrow capability contracts the engine needs from the rendering and
//! scene layer. Meshes and geometries implement [`GeometryTarget`] to
//! receive vertex data and [`GeometrySource`] to have it extracted.

use crate::channel::ChannelKind;
use crate::indices::Indices;

/// A submesh descriptor as held by a multi-material mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubMesh {
    pub material_index: u32,
    pub vertices_start: usize,
    pub vertices_count: usize,
    pub index_start: usize,
    pub index_count: usize,
}

/// Anything vertex data can be applied to.
///
/// The vertex-alpha and submesh hooks default to no-ops for targets that
/// do not carry those concepts (plain geometries, for instance).
pub trait GeometryTarget {
    /// Installs a named attribute buffer.
    fn set_vertices_data(&mut self, kind: ChannelKind, data: &[f32], updatable: bool);

    /// Updates the contents of an existing attribute buffer.
    fn update_vertices_data(
        &mut self,
        kind: ChannelKind,
        data: &[f32],
        update_extends: bool,
        make_unique: bool,
    );

    /// Installs the index buffer. An empty buffer clears it.
    fn set_indices(&mut self, indices: &Indices, total_vertices: Option<usize>, updatable: bool);

    /// Sets the vertex-alpha flag, if the target has one.
    fn set_has_vertex_alpha(&mut self, _has_vertex_alpha: bool) {}

    /// Replaces the submesh list, if the target is partitioned into submeshes.
    fn set_sub_meshes(&mut self, _sub_meshes: Vec<SubMesh>) {}
}

/// Anything vertex data can be extracted from.
pub trait GeometrySource {
    /// Returns true if a buffer of `kind` exists.
    fn is_vertices_data_present(&self, kind: ChannelKind) -> bool;

    /// Returns the buffer for `kind`.
    fn get_vertices_data(
        &self,
        kind: ChannelKind,
        copy_when_shared: bool,
        force_copy: bool,
    ) -> Option<Vec<f32>>;

    /// Returns the number of components per vertex stored for `kind`.
    ///
    /// Only consulted for colors, which may be stored as RGB.
    fn vertex_size(&self, kind: ChannelKind) -> Option<usize>;

    /// Returns the index buffer.
    fn get_indices(&self, copy_when_shared: bool, force_copy: bool) -> Option<Indices>;

    /// Returns the vertex-alpha flag.
    fn has_vertex_alpha(&self) -> bool {
        false
    }

    /// Returns the submesh list of a multi-material mesh.
    fn sub_meshes(&self) -> Option<Vec<SubMesh>> {
        None
    }
}
