//! Both engines against the neighbor definition and against each other

use approx::assert_relative_eq;
use planet_sim_core::grid::{
    boundary_faces, neighbors, Component, FieldKind, InitialFields, PlanetGrid, Shape,
};
use planet_sim_core::{create_grid_ops, Backend, EvaporationPolicy, GridOps};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One shape per boundary class: extents of 1, 2 and > 2 on every axis
const SHAPES: &[&[usize]] = &[
    &[1],
    &[2],
    &[9],
    &[1, 1],
    &[1, 4],
    &[4, 1],
    &[2, 2],
    &[5, 3],
    &[1, 1, 1],
    &[1, 1, 4],
    &[1, 4, 1],
    &[4, 1, 1],
    &[2, 2, 2],
    &[3, 1, 4],
    &[4, 5, 3],
    &[6, 2, 5],
];

fn random_grid(shape: Shape, rng: &mut StdRng) -> PlanetGrid {
    let n = shape.len();
    let mut draw = |lo: f64, hi: f64| -> Option<Vec<f64>> {
        Some((0..n).map(|_| rng.random_range(lo..hi)).collect())
    };
    let initial = InitialFields {
        water_mass: draw(0.0, 1000.0),
        water_energy: draw(1.0e8, 1.3e9),
        air_mass: draw(0.0, 10.0),
        air_energy: draw(1.0e5, 3.0e6),
        land_mass: draw(0.0, 500.0),
        land_energy: draw(1.0e7, 1.3e8),
    };
    PlanetGrid::from_fields(shape, initial).unwrap()
}

fn engines() -> [Box<dyn GridOps>; 2] {
    [
        create_grid_ops(Backend::Reference),
        create_grid_ops(Backend::Parallel),
    ]
}

#[test]
fn stencil_matches_neighbor_sum() {
    let mut rng = StdRng::seed_from_u64(2024);
    let time_delta = 0.75;

    for dims in SHAPES {
        let shape = Shape::new(dims).unwrap();
        let template = random_grid(shape, &mut rng);

        for ops in engines() {
            let mut grid = template.clone();
            ops.compute_thermal_properties(&mut grid);
            ops.compute_chunk_temperature(&mut grid);
            ops.diffuse(&mut grid, time_delta);

            let t = grid.chunk_temperature().as_slice();
            let htc = grid.heat_transfer_coefficient().as_slice();
            let shc = grid.specific_heat_capacity().as_slice();
            for index in 0..shape.len() {
                let terms: Vec<f64> = neighbors(index, &shape)
                    .into_iter()
                    .map(|n| (t[n] - t[index]) * htc[index] * shc[index] * time_delta)
                    .collect();
                let expected: f64 = terms.iter().sum();
                // Terms may cancel, so the tolerance scales with their size
                let scale: f64 = terms.iter().map(|term| term.abs()).sum();
                let delta = grid.energy_delta().get(index);
                assert!(
                    (delta - expected).abs() <= 1e-12 * scale.max(1.0),
                    "{dims:?} #{index}: {delta} != {expected}"
                );
            }
        }
    }
}

#[test]
fn engines_agree_on_every_operator() {
    let mut rng = StdRng::seed_from_u64(7);
    let [reference, parallel] = engines();

    for dims in SHAPES {
        let shape = Shape::new(dims).unwrap();
        let mut a = random_grid(shape, &mut rng);
        let mut b = a.clone();

        for (ops, grid) in [(&reference, &mut a), (&parallel, &mut b)] {
            ops.compute_chunk_mass(grid);
            ops.compute_thermal_properties(grid);
            for _ in 0..3 {
                ops.compute_chunk_temperature(grid);
                ops.diffuse(grid, 1.0);
                ops.commit_energy_delta(grid);
            }
            ops.add_uniform_energy(grid, 42.0);
            ops.evaporate(grid, 0.05, EvaporationPolicy::Clamp);
            ops.add_carbon(grid, 1.5);
        }

        for kind in FieldKind::ALL {
            assert_eq!(a.field(kind), b.field(kind), "{} on {dims:?}", kind.name());
        }
        assert_eq!(
            reference.compute_composition(&a),
            parallel.compute_composition(&b)
        );
        for component in Component::ALL {
            assert_eq!(
                reference.reduce_to_scalar(a.energy(component)),
                parallel.reduce_to_scalar(b.energy(component))
            );
        }
    }
}

#[test]
fn reduction_matches_plain_sum() {
    let mut rng = StdRng::seed_from_u64(1);
    for dims in SHAPES {
        let shape = Shape::new(dims).unwrap();
        let grid = random_grid(shape, &mut rng);
        let field = grid.mass(Component::Water);
        let plain: f64 = field.as_slice().iter().sum();

        for ops in engines() {
            assert_relative_eq!(ops.reduce_to_scalar(field), plain, max_relative = 1e-12);
        }
    }
}

#[test]
fn neighbor_counts_follow_boundaries() {
    for dims in SHAPES {
        let shape = Shape::new(dims).unwrap();
        for index in 0..shape.len() {
            // Each real axis contributes two faces, minus those on the boundary
            let expected = 2 * shape.ndim() - boundary_faces(index, &shape);
            let found = neighbors(index, &shape).len();
            assert_eq!(found, expected, "{dims:?} #{index}");
        }
    }
}
