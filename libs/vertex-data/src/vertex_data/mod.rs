//! # Vertex Data Store
//!
//! The attribute buffer store: named per-vertex channels, an index buffer,
//! the vertex-alpha flag and material ranges, plus validation.

#[cfg(test)]
mod tests;

use config::constants::POSITION_STRIDE;

use crate::channel::ChannelKind;
use crate::error::{VertexDataError, VertexDataResult};
use crate::id::{self, IdAllocator};
use crate::indices::Indices;
use crate::material::MaterialRange;

/// Per-vertex attribute channels plus an index buffer.
///
/// Channels are stored in a table indexed by [`ChannelKind`], so every
/// table-driven operation (validation, completion, merge, split, apply)
/// walks [`ChannelKind::ALL`] instead of naming channels one by one.
///
/// Equality compares content only; the unique id is ignored.
///
/// # Example
///
/// ```rust
/// use vertex_data::{ChannelKind, VertexData};
///
/// let mut data = VertexData::new();
/// data.set(ChannelKind::Position, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// data.set_indices(vec![0u16, 1, 2]);
/// assert_eq!(data.vertex_count(), 3);
/// assert!(data.validate().is_ok());
/// ```
#[derive(Debug)]
pub struct VertexData {
    unique_id: u64,
    channels: [Option<Vec<f32>>; ChannelKind::COUNT],
    indices: Option<Indices>,
    has_vertex_alpha: Option<bool>,
    material_ranges: Option<Vec<MaterialRange>>,
}

impl Default for VertexData {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for VertexData {
    /// Copies every buffer into independent storage under a fresh id.
    fn clone(&self) -> Self {
        Self {
            unique_id: id::global().allocate(),
            channels: self.channels.clone(),
            indices: self.indices.clone(),
            has_vertex_alpha: self.has_vertex_alpha,
            material_ranges: self.material_ranges.clone(),
        }
    }
}

impl PartialEq for VertexData {
    fn eq(&self, other: &Self) -> bool {
        self.channels == other.channels
            && self.indices == other.indices
            && self.has_vertex_alpha == other.has_vertex_alpha
            && self.material_ranges == other.material_ranges
    }
}

impl VertexData {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Creates an empty store with an id from the process-wide allocator.
    pub fn new() -> Self {
        Self::with_ids(id::global())
    }

    /// Creates an empty store with an id from `ids`.
    pub fn with_ids(ids: &IdAllocator) -> Self {
        Self {
            unique_id: ids.allocate(),
            channels: Default::default(),
            indices: None,
            has_vertex_alpha: None,
            material_ranges: None,
        }
    }

    /// Builder form of [`VertexData::set`].
    #[must_use]
    pub fn with(mut self, kind: ChannelKind, data: impl Into<Vec<f32>>) -> Self {
        self.set(kind, data);
        self
    }

    /// Builder form of [`VertexData::set_indices`].
    #[must_use]
    pub fn with_indices(mut self, indices: impl Into<Indices>) -> Self {
        self.set_indices(indices);
        self
    }

    /// Returns the id assigned at construction.
    #[inline]
    pub fn unique_id(&self) -> u64 {
        self.unique_id
    }

    // =========================================================================
    // CHANNEL ACCESS
    // =========================================================================

    /// Assigns `data` to the channel for `kind`.
    ///
    /// Empty data is still assigned, leaving the channel present but empty,
    /// which validation rejects once positions exist.
    pub fn set(&mut self, kind: ChannelKind, data: impl Into<Vec<f32>>) {
        let data = data.into();
        if data.is_empty() {
            log::warn!("Setting empty vertex data for kind '{kind}'");
        }
        self.channels[kind as usize] = Some(data);
    }

    /// Returns the channel for `kind`.
    #[inline]
    pub fn get(&self, kind: ChannelKind) -> Option<&[f32]> {
        self.channels[kind as usize].as_deref()
    }

    /// Returns the channel for `kind` mutably.
    #[inline]
    pub fn get_mut(&mut self, kind: ChannelKind) -> Option<&mut Vec<f32>> {
        self.channels[kind as usize].as_mut()
    }

    /// Assigns `data` without the empty-data warning, for buffers the
    /// engine derives itself.
    pub(crate) fn insert_channel(&mut self, kind: ChannelKind, data: Vec<f32>) {
        self.channels[kind as usize] = Some(data);
    }

    /// Removes and returns the channel for `kind`.
    pub fn take(&mut self, kind: ChannelKind) -> Option<Vec<f32>> {
        self.channels[kind as usize].take()
    }

    /// Returns true if the channel for `kind` is present.
    #[inline]
    pub fn is_present(&self, kind: ChannelKind) -> bool {
        self.channels[kind as usize].is_some()
    }

    /// Iterates over present channels in canonical order.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelKind, &[f32])> + '_ {
        ChannelKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|data| (kind, data)))
    }

    /// Returns the position channel.
    #[inline]
    pub fn positions(&self) -> Option<&[f32]> {
        self.get(ChannelKind::Position)
    }

    /// Returns the normal channel.
    #[inline]
    pub fn normals(&self) -> Option<&[f32]> {
        self.get(ChannelKind::Normal)
    }

    /// Returns the tangent channel.
    #[inline]
    pub fn tangents(&self) -> Option<&[f32]> {
        self.get(ChannelKind::Tangent)
    }

    /// Returns the color channel.
    #[inline]
    pub fn colors(&self) -> Option<&[f32]> {
        self.get(ChannelKind::Color)
    }

    /// Number of vertices, derived from the position channel.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions().map_or(0, |p| p.len() / POSITION_STRIDE)
    }

    // =========================================================================
    // INDICES, FLAGS, MATERIALS
    // =========================================================================

    /// Returns the index buffer.
    #[inline]
    pub fn indices(&self) -> Option<&Indices> {
        self.indices.as_ref()
    }

    /// Returns the index buffer mutably.
    #[inline]
    pub fn indices_mut(&mut self) -> Option<&mut Indices> {
        self.indices.as_mut()
    }

    /// Sets the index buffer.
    pub fn set_indices(&mut self, indices: impl Into<Indices>) {
        self.indices = Some(indices.into());
    }

    /// Removes and returns the index buffer.
    pub fn take_indices(&mut self) -> Option<Indices> {
        self.indices.take()
    }

    /// Number of indices, zero when the buffer is absent.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Indices::len)
    }

    /// Returns the vertex-alpha flag, false when unset.
    #[inline]
    pub fn has_vertex_alpha(&self) -> bool {
        self.has_vertex_alpha.unwrap_or(false)
    }

    /// Returns the vertex-alpha flag as stored, `None` when never set.
    #[inline]
    pub fn vertex_alpha_flag(&self) -> Option<bool> {
        self.has_vertex_alpha
    }

    /// Sets the vertex-alpha flag.
    pub fn set_has_vertex_alpha(&mut self, has_vertex_alpha: bool) {
        self.has_vertex_alpha = Some(has_vertex_alpha);
    }

    /// Returns the material ranges.
    #[inline]
    pub fn material_ranges(&self) -> Option<&[MaterialRange]> {
        self.material_ranges.as_deref()
    }

    /// Sets the material ranges.
    pub fn set_material_ranges(&mut self, ranges: Vec<MaterialRange>) {
        self.material_ranges = Some(ranges);
    }

    /// Removes and returns the material ranges.
    pub fn take_material_ranges(&mut self) -> Option<Vec<MaterialRange>> {
        self.material_ranges.take()
    }

    /// Material index of the first range, zero when there are none.
    pub(crate) fn leading_material_index(&self) -> u32 {
        self.material_ranges
            .as_ref()
            .and_then(|ranges| ranges.first())
            .map_or(0, |range| range.material_index)
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Checks that positions exist and hold whole vertices, and that every
    /// present channel holds exactly `stride * vertex_count` values.
    ///
    /// Errors report value counts, so a ragged buffer is never rounded
    /// down into a passing element count.
    pub fn validate(&self) -> VertexDataResult<()> {
        let positions = self.positions().ok_or(VertexDataError::MissingPositions)?;
        let whole = positions.len() - positions.len() % POSITION_STRIDE;
        if whole != positions.len() {
            return Err(VertexDataError::ElementCountMismatch {
                kind: ChannelKind::Position,
                expected: whole,
                actual: positions.len(),
            });
        }
        let vertex_count = positions.len() / POSITION_STRIDE;

        for kind in ChannelKind::optional() {
            let Some(values) = self.get(kind) else {
                continue;
            };
            let expected = vertex_count * kind.stride();
            if values.len() != expected {
                return Err(VertexDataError::ElementCountMismatch {
                    kind,
                    expected,
                    actual: values.len(),
                });
            }
        }

        Ok(())
    }

    /// Moves every buffer into a new store carrying the same id, leaving
    /// this store empty.
    pub(crate) fn detach(&mut self) -> VertexData {
        VertexData {
            unique_id: self.unique_id,
            channels: std::mem::take(&mut self.channels),
            indices: self.indices.take(),
            has_vertex_alpha: self.has_vertex_alpha.take(),
            material_ranges: self.material_ranges.take(),
        }
    }

    /// Overwrites the vertex-alpha flag, including clearing it.
    pub(crate) fn set_vertex_alpha_flag(&mut self, flag: Option<bool>) {
        self.has_vertex_alpha = flag;
    }

    /// Overwrites the index buffer, including clearing it.
    pub(crate) fn replace_indices(&mut self, indices: Option<Indices>) {
        self.indices = indices;
    }

    /// Allocates `kind` filled with its default value, sized to the current
    /// vertex count. Does nothing if the channel is already present.
    pub(crate) fn complete_channel(&mut self, kind: ChannelKind) {
        if self.is_present(kind) {
            return;
        }
        let len = self.vertex_count() * kind.stride();
        log::trace!("Completing channel '{kind}' with {len} values");
        self.channels[kind as usize] = Some(vec![kind.default_fill(); len]);
    }
}
