//! Axis-aligned neighbor topology
//!
//! `neighbors` is the ground truth for which cells exchange heat. Both stencil
//! formulations in `solver::diffusion` are checked against it.
//!
//! Ordering follows the 3-D convention front(−z), top(−y), left(−x),
//! right(+x), bottom(+y), back(+z). Axes a lower-dimensional grid lacks are
//! skipped, so 2-D grids yield top, left, right, bottom and 1-D grids yield
//! left, right. Cells outside the grid are omitted, never wrapped.

use super::shape::Shape;

/// Indices of the existing axis-adjacent cells of `index`
///
/// # Panics
///
/// Panics if `index` is not a cell of `shape`.
pub fn neighbors(index: usize, shape: &Shape) -> Vec<usize> {
    assert!(index < shape.len(), "Cell index out of bounds");

    let [x, y, z] = shape.coords(index);
    let [nx, ny, nz] = shape.extents();
    let [sx, sy, sz] = shape.strides();

    let mut out = Vec::with_capacity(6);
    if z > 0 {
        out.push(index - sz);
    }
    if y > 0 {
        out.push(index - sy);
    }
    if x > 0 {
        out.push(index - sx);
    }
    if x + 1 < nx {
        out.push(index + sx);
    }
    if y + 1 < ny {
        out.push(index + sy);
    }
    if z + 1 < nz {
        out.push(index + sz);
    }
    out
}

/// Number of grid faces the cell touches, counted over the real axes
pub fn boundary_faces(index: usize, shape: &Shape) -> usize {
    let coords = shape.coords(index);
    shape
        .dims()
        .iter()
        .zip(coords)
        .map(|(&extent, c)| usize::from(c == 0) + usize::from(c + 1 == extent))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[usize]) -> Shape {
        Shape::new(dims).unwrap()
    }

    #[test]
    fn test_interior_cell_has_six_neighbors_in_order() {
        let s = shape(&[3, 3, 3]);
        let center = s.index(&[1, 1, 1]);
        let expected = vec![
            s.index(&[1, 1, 0]), // front
            s.index(&[1, 0, 1]), // top
            s.index(&[0, 1, 1]), // left
            s.index(&[2, 1, 1]), // right
            s.index(&[1, 2, 1]), // bottom
            s.index(&[1, 1, 2]), // back
        ];
        assert_eq!(neighbors(center, &s), expected);
    }

    #[test]
    fn test_corner_cell_omits_outside_cells() {
        let s = shape(&[3, 3, 3]);
        let origin = neighbors(0, &s);
        let expected = [[1, 0, 0], [0, 1, 0], [0, 0, 1]].map(|c: [usize; 3]| s.index(&c));
        assert_eq!(origin, expected);

        let far = neighbors(s.len() - 1, &s);
        let expected = [[2, 2, 1], [2, 1, 2], [1, 2, 2]].map(|c: [usize; 3]| s.index(&c));
        assert_eq!(far, expected);
    }

    #[test]
    fn test_line_has_no_wraparound() {
        let s = shape(&[4]);
        assert_eq!(neighbors(0, &s), vec![1]);
        assert_eq!(neighbors(1, &s), vec![0, 2]);
        assert_eq!(neighbors(3, &s), vec![2]);
    }

    #[test]
    fn test_plane_ordering() {
        let s = shape(&[3, 3]);
        let center = s.index(&[1, 1]);
        assert_eq!(
            neighbors(center, &s),
            vec![
                s.index(&[1, 0]),
                s.index(&[0, 1]),
                s.index(&[2, 1]),
                s.index(&[1, 2])
            ]
        );
    }

    #[test]
    fn test_neighbor_count_matches_boundary_faces() {
        for dims in [&[5][..], &[4, 3], &[4, 3, 5], &[3, 1, 1], &[2, 1, 3]] {
            let s = shape(dims);
            for index in 0..s.len() {
                let count = neighbors(index, &s).len();
                assert_eq!(
                    count,
                    2 * s.ndim() - boundary_faces(index, &s),
                    "dims={dims:?} index={index}"
                );
            }
        }
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let s = shape(&[3, 4, 2]);
        for index in 0..s.len() {
            for n in neighbors(index, &s) {
                assert!(neighbors(n, &s).contains(&index));
            }
        }
    }
}
