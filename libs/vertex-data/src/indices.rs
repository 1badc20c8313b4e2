//! # Index Buffers
//!
//! Fixed-width triangle-list index buffers and the winding helpers shared by
//! the transform and merge engines.

use config::constants::TRIANGLE_INDEX_COUNT;

/// A triangle-list index buffer in 16-bit or 32-bit width.
///
/// # Example
///
/// ```rust
/// use vertex_data::Indices;
///
/// let mut indices = Indices::U16(vec![0, 1, 2]);
/// indices.flip_faces();
/// assert_eq!(indices.to_u32_vec(), vec![0, 2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Default for Indices {
    fn default() -> Self {
        Indices::U32(Vec::new())
    }
}

impl From<Vec<u16>> for Indices {
    fn from(indices: Vec<u16>) -> Self {
        Indices::U16(indices)
    }
}

impl From<Vec<u32>> for Indices {
    fn from(indices: Vec<u32>) -> Self {
        Indices::U32(indices)
    }
}

impl Indices {
    /// Returns the number of indices.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Indices::U16(v) => v.len(),
            Indices::U32(v) => v.len(),
        }
    }

    /// Returns true if the buffer holds no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for the 32-bit variant.
    #[inline]
    pub fn is_32bit(&self) -> bool {
        matches!(self, Indices::U32(_))
    }

    /// Returns the index at `i` widened to `u32`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Indices::U16(v) => v.get(i).map(|&x| u32::from(x)),
            Indices::U32(v) => v.get(i).copied(),
        }
    }

    /// Iterates over all indices widened to `u32`.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        let (narrow, wide) = match self {
            Indices::U16(v) => (Some(v.iter().map(|&x| u32::from(x))), None),
            Indices::U32(v) => (None, Some(v.iter().copied())),
        };
        narrow.into_iter().flatten().chain(wide.into_iter().flatten())
    }

    /// Copies all indices into a `Vec<u32>`.
    pub fn to_u32_vec(&self) -> Vec<u32> {
        match self {
            Indices::U16(v) => v.iter().map(|&x| u32::from(x)).collect(),
            Indices::U32(v) => v.clone(),
        }
    }

    /// Returns the largest index, or `None` when empty.
    pub fn max_index(&self) -> Option<u32> {
        self.iter().max()
    }

    /// Swaps the 2nd and 3rd index of every triangle.
    pub fn flip_faces(&mut self) {
        match self {
            Indices::U16(v) => flip_faces(v.as_mut_slice()),
            Indices::U32(v) => flip_faces(v.as_mut_slice()),
        }
    }

    /// Swaps the 2nd and 3rd index of every triangle inside
    /// `[start, start + count)`. A trailing partial triangle is left alone.
    ///
    /// Returns `false` and leaves the buffer unchanged if the range is out
    /// of bounds.
    pub fn flip_faces_range(&mut self, start: usize, count: usize) -> bool {
        let Some(end) = start.checked_add(count) else {
            return false;
        };
        match self {
            Indices::U16(v) => v.get_mut(start..end).map(flip_faces).is_some(),
            Indices::U32(v) => v.get_mut(start..end).map(flip_faces).is_some(),
        }
    }

    /// Copies `[start, start + count)` and subtracts `base` from every
    /// value, keeping the buffer width.
    ///
    /// Returns `None` if the range is out of bounds or a value is below
    /// `base`.
    pub fn slice_rebased(&self, start: usize, count: usize, base: u32) -> Option<Indices> {
        let end = start.checked_add(count)?;
        match self {
            Indices::U16(v) => {
                let base = u16::try_from(base).ok()?;
                v.get(start..end)?
                    .iter()
                    .map(|&x| x.checked_sub(base))
                    .collect::<Option<Vec<_>>>()
                    .map(Indices::U16)
            }
            Indices::U32(v) => v
                .get(start..end)?
                .iter()
                .map(|&x| x.checked_sub(base))
                .collect::<Option<Vec<_>>>()
                .map(Indices::U32),
        }
    }
}

/// Reverses the winding of every complete triangle in `indices`.
pub(crate) fn flip_faces<T>(indices: &mut [T]) {
    for triangle in indices.chunks_exact_mut(TRIANGLE_INDEX_COUNT) {
        triangle.swap(1, 2);
    }
}
