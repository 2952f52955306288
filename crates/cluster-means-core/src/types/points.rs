//! Point dataset buffers and row access.
//!
//! A point dataset is a point-major `[num_points x num_dimensions]` numeric
//! buffer. The backing element type varies per dataset, so reads go through
//! [`PointView`], a row accessor resolved once per dataset that widens every
//! element type to `f32`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Backing storage for a point dataset, tagged by element type.
///
/// Datasets arrive with different element widths depending on how they were
/// produced (raw acquisitions are often integer typed, derived data is
/// floating point). All statistics are computed in `f32`, matching the
/// widest representation consumers work with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointStorage {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I16(Vec<i16>),
    U8(Vec<u8>),
}

impl PointStorage {
    /// Total number of stored elements (points x dimensions).
    pub fn len(&self) -> usize {
        match self {
            PointStorage::F32(v) => v.len(),
            PointStorage::F64(v) => v.len(),
            PointStorage::I16(v) => v.len(),
            PointStorage::U8(v) => v.len(),
        }
    }

    /// Check if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the backing element type, for diagnostics.
    pub fn element_name(&self) -> &'static str {
        match self {
            PointStorage::F32(_) => "f32",
            PointStorage::F64(_) => "f64",
            PointStorage::I16(_) => "i16",
            PointStorage::U8(_) => "u8",
        }
    }
}

/// A point-major 2D numeric buffer with named dimensions.
///
/// Shape is `[num_points x num_dimensions]`; the value of dimension `d` of
/// point `p` lives at flat offset `p * num_dimensions + d`. The buffer is
/// immutable once constructed.
///
/// # Example
///
/// ```
/// use cluster_means_core::types::PointData;
///
/// let data = PointData::from_f32(vec![1.0, 10.0, 2.0, 20.0], 2).unwrap();
/// assert_eq!(data.num_points(), 2);
/// assert_eq!(data.num_dimensions(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    storage: PointStorage,
    num_points: usize,
    num_dimensions: usize,
    dimension_names: Vec<String>,
}

impl PointData {
    /// Create a point dataset over an arbitrary storage variant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `num_dimensions` is zero or the
    /// buffer length is not a multiple of `num_dimensions`.
    pub fn with_storage(storage: PointStorage, num_dimensions: usize) -> CoreResult<Self> {
        if num_dimensions == 0 {
            return Err(CoreError::validation(
                "num_dimensions",
                "a point dataset needs at least one dimension",
            ));
        }
        let len = storage.len();
        if len % num_dimensions != 0 {
            return Err(CoreError::validation(
                "storage",
                format!(
                    "buffer of {} {} elements does not divide into rows of {}",
                    len,
                    storage.element_name(),
                    num_dimensions
                ),
            ));
        }
        Ok(Self {
            num_points: len / num_dimensions,
            num_dimensions,
            dimension_names: Vec::new(),
            storage,
        })
    }

    /// Create an `f32`-backed point dataset.
    pub fn from_f32(values: Vec<f32>, num_dimensions: usize) -> CoreResult<Self> {
        Self::with_storage(PointStorage::F32(values), num_dimensions)
    }

    /// Attach dimension names.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the name count does not match
    /// `num_dimensions`.
    pub fn with_dimension_names(mut self, names: Vec<String>) -> CoreResult<Self> {
        if names.len() != self.num_dimensions {
            return Err(CoreError::validation(
                "dimension_names",
                format!(
                    "{} names for {} dimensions",
                    names.len(),
                    self.num_dimensions
                ),
            ));
        }
        self.dimension_names = names;
        Ok(self)
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// Dimension names, empty if none were attached.
    pub fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    /// Resolve a row accessor for this dataset.
    ///
    /// The element-type dispatch happens once here; row reads through the
    /// view are plain slice copies.
    pub fn view(&self) -> PointView<'_> {
        PointView {
            storage: &self.storage,
            num_points: self.num_points,
            num_dimensions: self.num_dimensions,
        }
    }
}

/// Read-only row accessor over a [`PointData`] buffer.
///
/// Rows are materialized as `f32` regardless of the backing element type.
#[derive(Debug, Clone, Copy)]
pub struct PointView<'a> {
    storage: &'a PointStorage,
    num_points: usize,
    num_dimensions: usize,
}

impl PointView<'_> {
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// Copy the dimension vector of point `point` into `out`, widening to
    /// `f32`.
    ///
    /// `point` must be in range and `out` must hold exactly
    /// `num_dimensions` values; callers bounds-check indices before
    /// streaming rows.
    pub fn copy_row(&self, point: usize, out: &mut [f32]) {
        debug_assert!(point < self.num_points);
        debug_assert_eq!(out.len(), self.num_dimensions);
        let start = point * self.num_dimensions;
        let end = start + self.num_dimensions;
        match self.storage {
            PointStorage::F32(v) => out.copy_from_slice(&v[start..end]),
            PointStorage::F64(v) => {
                for (o, x) in out.iter_mut().zip(&v[start..end]) {
                    *o = *x as f32;
                }
            }
            PointStorage::I16(v) => {
                for (o, x) in out.iter_mut().zip(&v[start..end]) {
                    *o = f32::from(*x);
                }
            }
            PointStorage::U8(v) => {
                for (o, x) in out.iter_mut().zip(&v[start..end]) {
                    *o = f32::from(*x);
                }
            }
        }
    }
}
