//! # Split Engine
//!
//! Partitions a multi-material store into one store per material range.
//! Each output is locally zero-based: indices are rebased by the range's
//! vertex start and the single range it carries starts at zero.

use crate::error::{VertexDataError, VertexDataResult};
use crate::material::MaterialRange;
use crate::vertex_data::VertexData;

impl VertexData {
    /// Splits the store into one store per material range.
    ///
    /// Stores with fewer than two ranges are returned unchanged as a
    /// single-element list. The output order follows the range order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vertex_data::{ChannelKind, MaterialRange, VertexData};
    ///
    /// let mut data = VertexData::new()
    ///     .with(ChannelKind::Position, vec![0.0; 18])
    ///     .with_indices(vec![0u32, 1, 2, 3, 4, 5]);
    /// data.set_material_ranges(vec![
    ///     MaterialRange::new(0, 0, 3, 0, 3),
    ///     MaterialRange::new(1, 3, 3, 3, 3),
    /// ]);
    ///
    /// let parts = data.split_based_on_material_id()?;
    /// assert_eq!(parts.len(), 2);
    /// assert_eq!(parts[1].indices().unwrap().to_u32_vec(), vec![0, 1, 2]);
    /// # Ok::<(), vertex_data::VertexDataError>(())
    /// ```
    pub fn split_based_on_material_id(self) -> VertexDataResult<Vec<VertexData>> {
        match self.material_slices()? {
            Some(slices) => Ok(slices),
            None => Ok(vec![self]),
        }
    }

    /// Borrowing form of [`VertexData::split_based_on_material_id`].
    ///
    /// Returns `None` when the store has fewer than two ranges and would
    /// not be split.
    pub fn material_slices(&self) -> VertexDataResult<Option<Vec<VertexData>>> {
        let Some(ranges) = self.material_ranges().filter(|ranges| ranges.len() >= 2) else {
            return Ok(None);
        };

        log::debug!(
            "Splitting vertex data {} into {} material slices",
            self.unique_id(),
            ranges.len()
        );

        ranges
            .iter()
            .map(|range| self.slice_material_range(range))
            .collect::<VertexDataResult<Vec<_>>>()
            .map(Some)
    }

    fn slice_material_range(&self, range: &MaterialRange) -> VertexDataResult<VertexData> {
        let out_of_bounds = || VertexDataError::MaterialRangeOutOfBounds {
            material_index: range.material_index,
        };

        let mut slice = VertexData::new();
        for (kind, values) in self.channels() {
            let stride = kind.stride();
            let values = values
                .get(range.vertex_start * stride..range.vertex_end() * stride)
                .ok_or_else(out_of_bounds)?;
            slice.insert_channel(kind, values.to_vec());
        }

        if let Some(indices) = self.indices() {
            let base = u32::try_from(range.vertex_start).map_err(|_| out_of_bounds())?;
            let rebased = indices
                .slice_rebased(range.index_start, range.index_count, base)
                .ok_or_else(out_of_bounds)?;
            slice.set_indices(rebased);
        }

        if let Some(has_vertex_alpha) = self.vertex_alpha_flag() {
            slice.set_has_vertex_alpha(has_vertex_alpha);
        }

        let vertex_count = slice.vertex_count();
        let index_count = slice.index_count();
        slice.set_material_ranges(vec![MaterialRange::new(
            range.material_index,
            0,
            vertex_count,
            0,
            index_count,
        )]);

        Ok(slice)
    }
}
