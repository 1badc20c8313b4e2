//! # Merge Engine
//!
//! Combines several stores, each with an optional transform, into one.
//!
//! ## Algorithm Overview
//!
//! 1. Validate every participant
//! 2. Reconcile channel sets (fail on mismatch, or complete missing channels)
//! 3. Optionally split by material and re-sort by material index
//! 4. Concatenate indices, offsetting each participant by the vertices
//!    before it and flipping winding for mirroring transforms
//! 5. Concatenate every channel, transforming each participant's slice

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use config::constants::MAX_U16_INDEX;
use glam::Mat4;

use crate::channel::ChannelKind;
use crate::error::{VertexDataError, VertexDataResult};
use crate::indices::{flip_faces, Indices};
use crate::material::MaterialRange;
use crate::ops::transform::{flips_winding, transform_channel};
use crate::vertex_data::VertexData;

/// Options for [`VertexData::merge`].
///
/// # Example
///
/// ```rust
/// use vertex_data::MergeOptions;
///
/// let options = MergeOptions {
///     enable_completion: true,
///     ..MergeOptions::default()
/// };
/// assert!(!options.use_32bit_indices);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Always produce a 32-bit index buffer.
    pub use_32bit_indices: bool,
    /// Copy the root index buffer into a fresh allocation instead of
    /// extending it.
    pub force_clone_indices: bool,
    /// Group the output by material index and rebuild material ranges.
    pub merge_material_ids: bool,
    /// Fill channels missing on some participants instead of failing.
    pub enable_completion: bool,
}

/// A merge participant and the transform applied to its copied data.
#[derive(Debug)]
pub struct MergeSource<'a> {
    pub data: &'a mut VertexData,
    pub transform: Option<Mat4>,
}

impl<'a> MergeSource<'a> {
    /// A participant merged without a transform.
    pub fn new(data: &'a mut VertexData) -> Self {
        Self {
            data,
            transform: None,
        }
    }

    /// A participant merged with `transform`.
    pub fn transformed(data: &'a mut VertexData, transform: Mat4) -> Self {
        Self {
            data,
            transform: Some(transform),
        }
    }
}

type Participant<'a> = (&'a VertexData, Option<Mat4>);

impl VertexData {
    /// Merges `others` into this store.
    ///
    /// `others` are only modified when completion fills their missing
    /// channels.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vertex_data::{ChannelKind, MergeOptions, VertexData};
    ///
    /// let mut a = VertexData::new()
    ///     .with(ChannelKind::Position, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    ///     .with_indices(vec![0u16, 1, 2]);
    /// let mut b = a.clone();
    ///
    /// a.merge(&mut [&mut b], MergeOptions::default())?;
    /// assert_eq!(a.vertex_count(), 6);
    /// assert_eq!(a.indices().unwrap().to_u32_vec(), vec![0, 1, 2, 3, 4, 5]);
    /// # Ok::<(), vertex_data::VertexDataError>(())
    /// ```
    pub fn merge(
        &mut self,
        others: &mut [&mut VertexData],
        options: MergeOptions,
    ) -> VertexDataResult<&mut Self> {
        let mut sources: Vec<MergeSource<'_>> = others
            .iter_mut()
            .map(|data| MergeSource::new(&mut **data))
            .collect();
        self.merge_with_transforms(None, &mut sources, options)
    }

    /// Merges `others` into this store, transforming each participant's
    /// copied data by its own matrix. `transform` applies to this store.
    pub fn merge_with_transforms(
        &mut self,
        transform: Option<Mat4>,
        others: &mut [MergeSource<'_>],
        options: MergeOptions,
    ) -> VertexDataResult<&mut Self> {
        self.validate()?;
        for other in others.iter() {
            other.data.validate()?;
        }

        if options.enable_completion {
            self.complete_from(others);
        } else {
            self.check_same_channels(others)?;
        }

        log::debug!(
            "Merging {} stores into vertex data {}",
            others.len(),
            self.unique_id()
        );

        if options.merge_material_ids {
            self.merge_by_material(transform, others, options)?;
        } else {
            let root = self.detach();
            let participants: Vec<Participant<'_>> = others
                .iter()
                .map(|source| (&*source.data, source.transform))
                .collect();
            self.merge_participants(root, transform, &participants, options);
        }

        Ok(self)
    }

    // =========================================================================
    // RECONCILIATION
    // =========================================================================

    fn check_same_channels(&self, others: &[MergeSource<'_>]) -> VertexDataResult<()> {
        for other in others {
            for kind in ChannelKind::optional() {
                if self.is_present(kind) != other.data.is_present(kind) {
                    return Err(VertexDataError::AttributeSetMismatch { kind });
                }
            }
        }
        Ok(())
    }

    /// Makes every participant's channel set the union of all sets.
    fn complete_from(&mut self, others: &mut [MergeSource<'_>]) {
        for other in others.iter() {
            for kind in ChannelKind::optional() {
                if other.data.is_present(kind) {
                    self.complete_channel(kind);
                }
            }
        }
        for other in others.iter_mut() {
            for kind in ChannelKind::optional() {
                if self.is_present(kind) {
                    other.data.complete_channel(kind);
                }
            }
        }
    }

    // =========================================================================
    // MATERIAL MERGE
    // =========================================================================

    fn merge_by_material(
        &mut self,
        transform: Option<Mat4>,
        others: &[MergeSource<'_>],
        options: MergeOptions,
    ) -> VertexDataResult<()> {
        // Split everything before detaching so a bad range leaves self intact
        let own_slices = self.material_slices()?;
        let mut entries: Vec<(Cow<'_, VertexData>, Option<Mat4>)> = Vec::new();
        let mut other_entries = Vec::new();
        for other in others {
            match other.data.material_slices()? {
                Some(slices) => other_entries.extend(
                    slices
                        .into_iter()
                        .map(|slice| (Cow::Owned(slice), other.transform)),
                ),
                None => other_entries.push((Cow::Borrowed(&*other.data), other.transform)),
            }
        }

        let detached = self.detach();
        match own_slices {
            Some(slices) => entries.extend(
                slices
                    .into_iter()
                    .map(|slice| (Cow::Owned(slice), transform)),
            ),
            None => entries.push((Cow::Owned(detached), transform)),
        }
        entries.extend(other_entries);

        entries.sort_by_key(|(data, _)| data.leading_material_index());
        let ranges = coalesce_material_ranges(&entries);

        let mut entries = entries.into_iter();
        let Some((root, root_transform)) = entries.next() else {
            return Ok(());
        };
        let rest: Vec<(Cow<'_, VertexData>, Option<Mat4>)> = entries.collect();
        let participants: Vec<Participant<'_>> = rest
            .iter()
            .map(|(data, transform)| (data.as_ref(), *transform))
            .collect();

        self.merge_participants(root.into_owned(), root_transform, &participants, options);
        self.set_material_ranges(ranges);
        Ok(())
    }

    // =========================================================================
    // CONCATENATION
    // =========================================================================

    /// Writes the concatenation of `root` and `others` into this store.
    fn merge_participants(
        &mut self,
        mut root: VertexData,
        root_transform: Option<Mat4>,
        others: &[Participant<'_>],
        options: MergeOptions,
    ) {
        let indices = merge_indices(&mut root, root_transform, others, options);
        self.replace_indices(indices);

        for kind in ChannelKind::ALL {
            if let Some(merged) = merge_channel(kind, root.take(kind), root_transform, others) {
                self.insert_channel(kind, merged);
            }
        }

        let flags = std::iter::once(root.vertex_alpha_flag())
            .chain(others.iter().map(|(other, _)| other.vertex_alpha_flag()))
            .flatten();
        let has_vertex_alpha = flags.reduce(|a, b| a || b);
        self.set_vertex_alpha_flag(has_vertex_alpha);
    }
}

/// Walks the sorted entries and emits one range per run of equal
/// material indices.
fn coalesce_material_ranges(entries: &[(Cow<'_, VertexData>, Option<Mat4>)]) -> Vec<MaterialRange> {
    let mut ranges: Vec<MaterialRange> = Vec::new();
    let mut vertex_offset = 0;
    let mut index_offset = 0;

    for (data, _) in entries {
        let material_index = data.leading_material_index();
        let vertex_count = data.vertex_count();
        let index_count = data.index_count();

        match ranges.last_mut() {
            Some(last) if last.material_index == material_index => {
                last.vertex_count += vertex_count;
                last.index_count += index_count;
            }
            _ => ranges.push(MaterialRange::new(
                material_index,
                vertex_offset,
                vertex_count,
                index_offset,
                index_count,
            )),
        }

        vertex_offset += vertex_count;
        index_offset += index_count;
    }

    ranges
}

// =============================================================================
// INDEX MERGE
// =============================================================================

/// Concatenates all index buffers.
///
/// The output is 32-bit when requested, when any input is already 32-bit,
/// or when the largest offset index no longer fits 16 bits.
fn merge_indices(
    root: &mut VertexData,
    root_transform: Option<Mat4>,
    others: &[Participant<'_>],
    options: MergeOptions,
) -> Option<Indices> {
    let root_indices = root.take_indices();
    let total = root_indices.as_ref().map_or(0, Indices::len)
        + others.iter().map(|(other, _)| other.index_count()).sum::<usize>();
    if total == 0 {
        return root_indices;
    }

    let root_vertices = root.vertex_count();
    let any_32bit = root_indices.as_ref().is_some_and(Indices::is_32bit)
        || others
            .iter()
            .any(|(other, _)| other.indices().is_some_and(Indices::is_32bit));
    let wide = options.use_32bit_indices
        || any_32bit
        || largest_merged_index(root_indices.as_ref(), root_vertices, others) > u64::from(MAX_U16_INDEX);

    let root_flip = root_transform.is_some_and(|m| flips_winding(&m));
    let force_clone = options.force_clone_indices;

    Some(if wide {
        Indices::U32(concat_indices(
            root_indices,
            root_flip,
            root_vertices,
            others,
            force_clone,
            total,
        ))
    } else {
        Indices::U16(concat_indices(
            root_indices,
            root_flip,
            root_vertices,
            others,
            force_clone,
            total,
        ))
    })
}

fn largest_merged_index(
    root_indices: Option<&Indices>,
    root_vertices: usize,
    others: &[Participant<'_>],
) -> u64 {
    let mut largest = root_indices
        .and_then(Indices::max_index)
        .map_or(0, u64::from);
    let mut offset = root_vertices as u64;
    for (other, _) in others {
        if let Some(max) = other.indices().and_then(Indices::max_index) {
            largest = largest.max(offset + u64::from(max));
        }
        offset += other.vertex_count() as u64;
    }
    largest
}

/// Fixed-width index element.
trait IndexValue: Copy {
    fn from_u32(value: u32) -> Self;

    /// Takes the buffer's storage if it already has this width.
    fn reuse(indices: Indices) -> Result<Vec<Self>, Indices>;
}

impl IndexValue for u16 {
    #[inline]
    fn from_u32(value: u32) -> Self {
        value as u16
    }

    fn reuse(indices: Indices) -> Result<Vec<Self>, Indices> {
        match indices {
            Indices::U16(values) => Ok(values),
            other => Err(other),
        }
    }
}

impl IndexValue for u32 {
    #[inline]
    fn from_u32(value: u32) -> Self {
        value
    }

    fn reuse(indices: Indices) -> Result<Vec<Self>, Indices> {
        match indices {
            Indices::U32(values) => Ok(values),
            other => Err(other),
        }
    }
}

fn concat_indices<T: IndexValue>(
    root_indices: Option<Indices>,
    root_flip: bool,
    root_vertices: usize,
    others: &[Participant<'_>],
    force_clone: bool,
    total: usize,
) -> Vec<T> {
    let mut merged: Vec<T> = match root_indices.map(T::reuse) {
        Some(Ok(values)) if !force_clone => values,
        Some(Ok(values)) => {
            let mut fresh = Vec::with_capacity(total);
            fresh.extend_from_slice(&values);
            fresh
        }
        Some(Err(other)) => other.iter().map(T::from_u32).collect(),
        None => Vec::new(),
    };
    merged.reserve(total.saturating_sub(merged.len()));

    if root_flip {
        flip_faces(&mut merged);
    }

    let mut offset = root_vertices as u32;
    for (other, transform) in others {
        if let Some(indices) = other.indices() {
            let start = merged.len();
            merged.extend(indices.iter().map(|index| T::from_u32(index + offset)));
            if transform.is_some_and(|m| flips_winding(&m)) {
                flip_faces(&mut merged[start..]);
            }
        }
        offset += other.vertex_count() as u32;
    }

    merged
}

// =============================================================================
// CHANNEL MERGE
// =============================================================================

/// Concatenates one channel across all participants.
///
/// A root without the channel hands the role to the first participant that
/// has it. Each slice is transformed by its own participant's matrix.
fn merge_channel(
    kind: ChannelKind,
    root_values: Option<Vec<f32>>,
    root_transform: Option<Mat4>,
    others: &[Participant<'_>],
) -> Option<Vec<f32>> {
    let mut sources = others
        .iter()
        .filter_map(|(other, transform)| other.get(kind).map(|values| (values, *transform)));

    let (mut merged, transform) = match root_values {
        Some(values) => (values, root_transform),
        None => {
            let (values, transform) = sources.next()?;
            (values.to_vec(), transform)
        }
    };
    let transformable = kind.is_transformable();
    if let Some(matrix) = transform.filter(|_| transformable) {
        transform_channel(kind, &mut merged, &matrix);
    }

    let rest: Vec<_> = sources.collect();
    merged.reserve(rest.iter().map(|(values, _)| values.len()).sum());
    for (values, transform) in rest {
        let start = merged.len();
        merged.extend_from_slice(values);
        if let Some(matrix) = transform.filter(|_| transformable) {
            transform_channel(kind, &mut merged[start..], &matrix);
        }
    }

    Some(merged)
}
