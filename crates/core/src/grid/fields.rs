//! Dense per-cell field storage
//!
//! Every quantity of the planet grid is stored as a flat `Vec<f64>` in
//! row-major order, sharing one `Shape` for the lifetime of the grid.

use super::shape::Shape;
use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Field data container
///
/// Stores one scalar per cell as a flat `Vec<f64>` in row-major order.
/// Deserialized fields go through `from_vec`, so a snapshot whose values do
/// not cover the shape is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldSnapshot")]
pub struct FieldData {
    /// Field values in row-major order
    data: Vec<f64>,
    /// Grid shape shared with every sibling field
    shape: Shape,
}

/// Unvalidated serialized form of `FieldData`
#[derive(Deserialize)]
struct FieldSnapshot {
    data: Vec<f64>,
    shape: Shape,
}

impl TryFrom<FieldSnapshot> for FieldData {
    type Error = GridError;

    fn try_from(snapshot: FieldSnapshot) -> Result<Self> {
        Self::from_vec(snapshot.shape, snapshot.data, "data")
    }
}

impl FieldData {
    /// Create a new field initialized to zero
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self::with_value(shape, 0.0)
    }

    /// Create a new field with every cell set to `value`
    #[must_use]
    pub fn with_value(shape: Shape, value: f64) -> Self {
        Self {
            data: vec![value; shape.len()],
            shape,
        }
    }

    /// Wrap caller-supplied values
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `data` does not hold exactly one value per cell.
    pub fn from_vec(shape: Shape, data: Vec<f64>, field: &'static str) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(GridError::ShapeMismatch {
                field,
                expected: shape.len(),
                found: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Shape of the field
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True only for a field with no cells, which `Shape` rules out
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get value at a linear index
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        assert!(index < self.data.len(), "Cell index out of bounds");
        self.data[index]
    }

    /// Set value at a linear index
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds
    pub fn set(&mut self, index: usize, value: f64) {
        assert!(index < self.data.len(), "Cell index out of bounds");
        self.data[index] = value;
    }

    /// Get value at a coordinate over the real axes
    #[must_use]
    pub fn get_at(&self, coords: &[usize]) -> f64 {
        self.data[self.shape.index(coords)]
    }

    /// Set value at a coordinate over the real axes
    pub fn set_at(&mut self, coords: &[usize], value: f64) {
        let index = self.shape.index(coords);
        self.data[index] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}
