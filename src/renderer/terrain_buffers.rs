use wgpu::util::DeviceExt;

use crate::terrain::{GeometryStore, PlaneGeometry};

/// GPU copy of one terrain geometry, sized exactly to it.
pub struct TerrainBuffers {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_count: u32,
}

pub struct GpuGeometryStore<'a> {
    device: &'a wgpu::Device,
}

impl<'a> GpuGeometryStore<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl GeometryStore for GpuGeometryStore<'_> {
    type Handle = TerrainBuffers;

    fn upload(&mut self, geometry: &PlaneGeometry) -> TerrainBuffers {
        let position_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Terrain Position Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let normal_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Terrain Normal Buffer"),
                contents: bytemuck::cast_slice(&geometry.normals),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Terrain Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        TerrainBuffers {
            position_buffer,
            normal_buffer,
            index_buffer,
            vertex_count: geometry.vertex_count() as u32,
            index_count: geometry.indices.len() as u32,
        }
    }

    fn release(&mut self, handle: TerrainBuffers) {
        tracing::trace!(vertices = handle.vertex_count, "releasing terrain buffers");
        handle.position_buffer.destroy();
        handle.normal_buffer.destroy();
        handle.index_buffer.destroy();
    }
}

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

pub fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}
