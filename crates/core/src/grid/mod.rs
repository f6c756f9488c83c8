//! Grid storage and topology

pub mod component;
pub mod fields;
pub mod planet_grid;
pub mod shape;
pub mod topology;

// Re-export main types
pub use component::{Component, FieldKind};
pub use fields::FieldData;
pub use planet_grid::{InitialFields, PlanetGrid};
pub use shape::Shape;
pub use topology::{boundary_faces, neighbors};
