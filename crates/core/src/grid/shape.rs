//! Grid shape and linear indexing
//!
//! A `Shape` is 1-D, 2-D or 3-D. Internally the extents are padded to three
//! axes with trailing 1s, which keeps row-major indexing identical for every
//! dimensionality: `(x, y, z) -> (x * ny + y) * nz + z`.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Immutable extent of a planet grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Shape {
    extents: [usize; 3],
    ndim: usize,
}

impl Shape {
    /// Build a shape from 1, 2 or 3 extents
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDimensionality` for any other number of axes and
    /// `ZeroExtent` when an axis holds no cells.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() || dims.len() > 3 {
            return Err(GridError::UnsupportedDimensionality(dims.len()));
        }
        if let Some(axis) = dims.iter().position(|&extent| extent == 0) {
            return Err(GridError::ZeroExtent { axis });
        }

        let mut extents = [1; 3];
        extents[..dims.len()].copy_from_slice(dims);
        Ok(Self {
            extents,
            ndim: dims.len(),
        })
    }

    /// Number of axes (1, 2 or 3)
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Extents of the real axes, in order
    pub fn dims(&self) -> &[usize] {
        &self.extents[..self.ndim]
    }

    /// Extents padded to `(nx, ny, nz)`
    pub fn extents(&self) -> [usize; 3] {
        self.extents
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.extents.iter().product()
    }

    /// Always false: every axis holds at least one cell
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent of the last real axis (the contiguous one)
    pub fn last_axis_len(&self) -> usize {
        self.extents[self.ndim - 1]
    }

    /// Linear offsets of a unit step along x, y and z
    pub fn strides(&self) -> [usize; 3] {
        let [_, ny, nz] = self.extents;
        [ny * nz, nz, 1]
    }

    /// Linear index of a coordinate given over the real axes
    ///
    /// # Panics
    ///
    /// Panics if the coordinate has the wrong number of axes or lies outside
    /// the grid.
    pub fn index(&self, coords: &[usize]) -> usize {
        assert_eq!(
            coords.len(),
            self.ndim,
            "Coordinate has {} axes, grid has {}",
            coords.len(),
            self.ndim
        );
        let mut padded = [0; 3];
        padded[..self.ndim].copy_from_slice(coords);
        assert!(
            padded.iter().zip(self.extents).all(|(&c, e)| c < e),
            "Coordinates out of bounds"
        );
        self.index_padded(padded)
    }

    /// Linear index of a padded `(x, y, z)` coordinate, unchecked
    #[inline]
    pub(crate) fn index_padded(&self, [x, y, z]: [usize; 3]) -> usize {
        let [_, ny, nz] = self.extents;
        (x * ny + y) * nz + z
    }

    /// Padded `(x, y, z)` coordinate of a linear index
    #[inline]
    pub fn coords(&self, index: usize) -> [usize; 3] {
        let [_, ny, nz] = self.extents;
        let z = index % nz;
        let rest = index / nz;
        [rest / ny, rest % ny, z]
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = GridError;

    fn try_from(dims: Vec<usize>) -> Result<Self> {
        Self::new(&dims)
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims().to_vec()
    }
}
