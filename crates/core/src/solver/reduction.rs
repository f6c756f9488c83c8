//! Two-stage field reduction
//!
//! Stage one collapses the contiguous last axis with a backward cumulative
//! sum, leaving each row's total in its first element. Stage two adds up
//! those row heads in storage order. Engines may parallelise stage one, but
//! stage two always runs sequentially so every engine returns the same bits.

use super::kernels::collapse_row;
use crate::grid::FieldData;

/// Sum of the first element of every `row_len`-long row of `collapsed`
pub fn sum_row_heads(collapsed: &[f64], row_len: usize) -> f64 {
    collapsed.iter().step_by(row_len).sum()
}

/// Reduce a field to the sum of all its cells
pub fn reduce_to_scalar(field: &FieldData) -> f64 {
    let row_len = field.shape().last_axis_len();
    let mut scratch = field.as_slice().to_vec();
    for row in scratch.chunks_mut(row_len) {
        collapse_row(row);
    }
    sum_row_heads(&scratch, row_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Shape;
    use approx::assert_relative_eq;

    fn field(dims: &[usize], values: Vec<f64>) -> FieldData {
        FieldData::from_vec(Shape::new(dims).unwrap(), values, "test").unwrap()
    }

    #[test]
    fn test_reduce_line() {
        let line = field(&[4], vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(reduce_to_scalar(&line), 10.0);
    }

    #[test]
    fn test_reduce_volume() {
        let values: Vec<f64> = (0..24).map(f64::from).collect();
        let total = reduce_to_scalar(&field(&[2, 3, 4], values));
        assert_relative_eq!(total, 276.0);
    }

    #[test]
    fn test_reduce_does_not_modify_field() {
        let f = field(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let _ = reduce_to_scalar(&f);
        assert_eq!(f.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sum_row_heads() {
        // Rows [6, 5, 3] and [15, 11, 6] after collapsing
        assert_eq!(sum_row_heads(&[6.0, 5.0, 3.0, 15.0, 11.0, 6.0], 3), 21.0);
    }
}
