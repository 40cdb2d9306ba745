pub mod camera;
pub mod gpu;
pub mod light;
pub mod terrain_buffers;
pub mod viewport;

pub use camera::Camera;
pub use gpu::GpuState;
pub use light::DirectionalLight;
pub use terrain_buffers::{GpuGeometryStore, TerrainBuffers};
