pub mod grid;
pub mod lifecycle;
pub mod mesh;
pub mod perturb;

pub use lifecycle::{GeometryStore, TerrainMesh};
pub use mesh::{GridParams, Material, PlaneGeometry};
