//! # In-Memory Geometry
//!
//! A plain buffer holder implementing both [`GeometryTarget`] and
//! [`GeometrySource`], for consumers without a renderer and for tests.

use config::constants::POSITION_STRIDE;
use glam::Vec3;

use crate::channel::ChannelKind;
use crate::indices::Indices;
use crate::target::{GeometrySource, GeometryTarget, SubMesh};

/// One attribute buffer.
#[derive(Debug, Clone, PartialEq)]
struct Buffer {
    data: Vec<f32>,
    /// Components per vertex as stored (colors may be RGB).
    size: usize,
    updatable: bool,
}

/// A triangle geometry held as flat attribute buffers.
///
/// The bounding box is cached: installing positions refreshes it, and
/// updating positions refreshes it only when asked to.
///
/// # Example
///
/// ```rust
/// use vertex_data::{ChannelKind, Geometry, VertexData};
///
/// let data = VertexData::new()
///     .with(ChannelKind::Position, vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0])
///     .with_indices(vec![0u16, 1, 2]);
///
/// let mut geometry = Geometry::new();
/// data.apply_to(&mut geometry, false);
/// assert_eq!(geometry.triangle_count(), 1);
/// assert_eq!(geometry.bounding_box().1.y, 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    buffers: [Option<Buffer>; ChannelKind::COUNT],
    indices: Option<Indices>,
    indices_updatable: bool,
    total_vertices: Option<usize>,
    has_vertex_alpha: bool,
    sub_meshes: Option<Vec<SubMesh>>,
    extends: (Vec3, Vec3),
}

impl Geometry {
    /// Creates an empty geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a buffer with an explicit per-vertex component count.
    pub fn set_buffer(&mut self, kind: ChannelKind, data: Vec<f32>, size: usize) {
        self.buffers[kind as usize] = Some(Buffer {
            data,
            size,
            updatable: false,
        });
        if kind == ChannelKind::Position {
            self.refresh_extends();
        }
    }

    /// Returns the buffer for `kind`.
    #[inline]
    pub fn buffer(&self, kind: ChannelKind) -> Option<&[f32]> {
        self.buffers[kind as usize].as_ref().map(|b| b.data.as_slice())
    }

    /// Returns true if the buffer for `kind` was installed as updatable.
    pub fn is_updatable(&self, kind: ChannelKind) -> bool {
        self.buffers[kind as usize]
            .as_ref()
            .is_some_and(|b| b.updatable)
    }

    /// Returns the index buffer.
    #[inline]
    pub fn indices(&self) -> Option<&Indices> {
        self.indices.as_ref()
    }

    /// Returns true if the index buffer was installed as updatable.
    #[inline]
    pub fn indices_updatable(&self) -> bool {
        self.indices_updatable
    }

    /// Vertex count announced with the index buffer, if any.
    #[inline]
    pub fn total_vertices(&self) -> Option<usize> {
        self.total_vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffer(ChannelKind::Position)
            .map_or(0, |p| p.len() / POSITION_STRIDE)
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |i| i.len() / 3)
    }

    /// Returns true if the geometry has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Returns the submeshes installed by the last apply.
    pub fn sub_mesh_list(&self) -> Option<&[SubMesh]> {
        self.sub_meshes.as_deref()
    }

    /// Returns the cached (min, max) corners of the bounding box.
    #[inline]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        self.extends
    }

    fn refresh_extends(&mut self) {
        let mut points = self
            .buffer(ChannelKind::Position)
            .unwrap_or_default()
            .chunks_exact(POSITION_STRIDE)
            .map(Vec3::from_slice);

        self.extends = match points.next() {
            Some(first) => points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))),
            None => (Vec3::ZERO, Vec3::ZERO),
        };
    }
}

impl GeometryTarget for Geometry {
    fn set_vertices_data(&mut self, kind: ChannelKind, data: &[f32], updatable: bool) {
        self.buffers[kind as usize] = Some(Buffer {
            data: data.to_vec(),
            size: kind.stride(),
            updatable,
        });
        if kind == ChannelKind::Position {
            self.refresh_extends();
        }
    }

    fn update_vertices_data(
        &mut self,
        kind: ChannelKind,
        data: &[f32],
        update_extends: bool,
        _make_unique: bool,
    ) {
        let Some(buffer) = self.buffers[kind as usize].as_mut() else {
            log::warn!("Updating missing vertex buffer '{kind}', ignored");
            return;
        };
        buffer.data.clear();
        buffer.data.extend_from_slice(data);

        if kind == ChannelKind::Position && update_extends {
            self.refresh_extends();
        }
    }

    fn set_indices(&mut self, indices: &Indices, total_vertices: Option<usize>, updatable: bool) {
        self.indices = (!indices.is_empty()).then(|| indices.clone());
        self.total_vertices = total_vertices;
        self.indices_updatable = updatable;
    }

    fn set_has_vertex_alpha(&mut self, has_vertex_alpha: bool) {
        self.has_vertex_alpha = has_vertex_alpha;
    }

    fn set_sub_meshes(&mut self, sub_meshes: Vec<SubMesh>) {
        self.sub_meshes = Some(sub_meshes);
    }
}

impl GeometrySource for Geometry {
    fn is_vertices_data_present(&self, kind: ChannelKind) -> bool {
        self.buffers[kind as usize].is_some()
    }

    fn get_vertices_data(
        &self,
        kind: ChannelKind,
        _copy_when_shared: bool,
        _force_copy: bool,
    ) -> Option<Vec<f32>> {
        self.buffer(kind).map(<[f32]>::to_vec)
    }

    fn vertex_size(&self, kind: ChannelKind) -> Option<usize> {
        self.buffers[kind as usize].as_ref().map(|b| b.size)
    }

    fn get_indices(&self, _copy_when_shared: bool, _force_copy: bool) -> Option<Indices> {
        self.indices.clone()
    }

    fn has_vertex_alpha(&self) -> bool {
        self.has_vertex_alpha
    }

    fn sub_meshes(&self) -> Option<Vec<SubMesh>> {
        self.sub_meshes.clone()
    }
}
