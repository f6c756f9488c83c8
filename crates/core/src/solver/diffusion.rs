//! Heat diffusion stencil
//!
//! For every cell `c` the stencil accumulates
//!
//! ```text
//! ΔE(c) = Σ_{n ∈ neighbors(c)} (T(n) − T(c)) × htc(c) × shc(c) × Δt
//! ```
//!
//! reading only the chunk-temperature snapshot and writing only the delta
//! buffer. Two formulations are provided:
//!
//! - `diffuse_by_region`: classifies each axis coordinate as single, low,
//!   interior or high and adds exactly the terms that region owns.
//! - `masked_delta`: evaluates all six offsets uniformly and zeroes the ones
//!   that fall outside the grid.
//!
//! Both sum their terms in topology order (front, top, left, right, bottom,
//! back), so they agree bit for bit. `delta_from_neighbors` evaluates the
//! definition directly from `grid::neighbors` and is the reference the tests
//! compare against.

use crate::grid::{neighbors, Shape};

/// Read-only inputs of one diffusion pass
#[derive(Debug, Clone, Copy)]
pub struct DiffusionInputs<'a> {
    pub shape: Shape,
    /// Chunk temperature at the end of the previous rule
    pub temperature: &'a [f64],
    pub heat_transfer_coefficient: &'a [f64],
    pub specific_heat_capacity: &'a [f64],
    /// Tick duration in seconds
    pub time_delta: f64,
}

impl DiffusionInputs<'_> {
    /// Scale applied to the temperature gradient of one cell
    #[inline]
    pub fn coefficient(&self, index: usize) -> f64 {
        self.heat_transfer_coefficient[index] * self.specific_heat_capacity[index] * self.time_delta
    }
}

/// Position of a coordinate along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisRegion {
    /// The axis has extent 1: no neighbors either way
    Single,
    /// First slice: only the upper neighbor exists
    Low,
    Interior,
    /// Last slice: only the lower neighbor exists
    High,
}

impl AxisRegion {
    fn classify(coord: usize, extent: usize) -> Self {
        match (coord, extent) {
            (_, 1) => Self::Single,
            (0, _) => Self::Low,
            (c, e) if c + 1 == e => Self::High,
            _ => Self::Interior,
        }
    }

    fn has_lower(self) -> bool {
        matches!(self, Self::Interior | Self::High)
    }

    fn has_upper(self) -> bool {
        matches!(self, Self::Low | Self::Interior)
    }
}

/// Region-by-region stencil used by the reference engine
pub fn diffuse_by_region(inputs: &DiffusionInputs<'_>, out: &mut [f64]) {
    let [nx, ny, nz] = inputs.shape.extents();
    let [sx, sy, sz] = inputs.shape.strides();
    let t = inputs.temperature;

    for x in 0..nx {
        let rx = AxisRegion::classify(x, nx);
        for y in 0..ny {
            let ry = AxisRegion::classify(y, ny);
            for z in 0..nz {
                let rz = AxisRegion::classify(z, nz);
                let index = inputs.shape.index_padded([x, y, z]);
                let centre = t[index];

                let mut gradient = 0.0;
                if rz.has_lower() {
                    gradient += t[index - sz] - centre;
                }
                if ry.has_lower() {
                    gradient += t[index - sy] - centre;
                }
                if rx.has_lower() {
                    gradient += t[index - sx] - centre;
                }
                if rx.has_upper() {
                    gradient += t[index + sx] - centre;
                }
                if ry.has_upper() {
                    gradient += t[index + sy] - centre;
                }
                if rz.has_upper() {
                    gradient += t[index + sz] - centre;
                }

                out[index] = gradient * inputs.coefficient(index);
            }
        }
    }
}

/// Uniform six-offset stencil for one cell, with out-of-grid terms masked
///
/// Masked offsets are redirected to the cell itself so the read stays in
/// bounds, then multiplied by zero.
#[inline]
pub fn masked_delta(inputs: &DiffusionInputs<'_>, index: usize) -> f64 {
    let [x, y, z] = inputs.shape.coords(index);
    let [nx, ny, nz] = inputs.shape.extents();
    let [sx, sy, sz] = inputs.shape.strides();
    let t = inputs.temperature;
    let centre = t[index];

    let offsets = [
        (z > 0, index.wrapping_sub(sz)),
        (y > 0, index.wrapping_sub(sy)),
        (x > 0, index.wrapping_sub(sx)),
        (x + 1 < nx, index + sx),
        (y + 1 < ny, index + sy),
        (z + 1 < nz, index + sz),
    ];

    let mut gradient = 0.0;
    for (inside, neighbor) in offsets {
        let mask = f64::from(u8::from(inside));
        let neighbor = if inside { neighbor } else { index };
        gradient += mask * (t[neighbor] - centre);
    }
    gradient * inputs.coefficient(index)
}

/// Sequential sweep of `masked_delta`
pub fn diffuse_masked(inputs: &DiffusionInputs<'_>, out: &mut [f64]) {
    for (index, delta) in out.iter_mut().enumerate() {
        *delta = masked_delta(inputs, index);
    }
}

/// Diffusion delta of one cell taken straight from the neighbor definition
pub fn delta_from_neighbors(inputs: &DiffusionInputs<'_>, index: usize) -> f64 {
    let t = inputs.temperature;
    neighbors(index, &inputs.shape)
        .into_iter()
        .map(|n| (t[n] - t[index]) * inputs.coefficient(index))
        .sum()
}
