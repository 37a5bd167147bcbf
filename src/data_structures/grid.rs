//! Procedural grid mesh for a subdivided rectangular plane.
//!
//! The plane lies in the XZ plane (Y = 0), centred on the origin. Vertices are
//! laid out row-major: the vertex at column `x` and row `z` lives at index
//! `z * vertices_x + x`. Every cell is split into two triangles that are
//! counter-clockwise when seen from +Y, which is the front face of the water
//! pipeline.

use anyhow::{Result, ensure};

/// A plane vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Validated dimensions and resolution of a grid plane.
///
/// Construction is the only place the resolution is checked, so a
/// `GridParams` value can always be turned into a mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridParams {
    width: f32,
    length: f32,
    vertices_x: u32,
    vertices_z: u32,
}

impl GridParams {
    /// Create grid parameters.
    ///
    /// # Arguments
    ///
    /// * `width` is the extent along X in world units
    /// * `length` is the extent along Z in world units
    /// * `vertices_x` / `vertices_z` are the vertex counts per axis, at least 2 each
    pub fn new(width: f32, length: f32, vertices_x: u32, vertices_z: u32) -> Result<Self> {
        ensure!(
            vertices_x >= 2 && vertices_z >= 2,
            "a grid needs at least 2 vertices per axis, got {vertices_x}x{vertices_z}"
        );
        ensure!(
            width.is_finite() && width > 0.0 && length.is_finite() && length > 0.0,
            "grid extents must be finite and positive, got {width}x{length}"
        );
        ensure!(
            vertices_x.checked_mul(vertices_z).is_some(),
            "{vertices_x}x{vertices_z} vertices cannot be addressed with u32 indices"
        );
        Ok(Self {
            width,
            length,
            vertices_x,
            vertices_z,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn vertices_x(&self) -> u32 {
        self.vertices_x
    }

    pub fn vertices_z(&self) -> u32 {
        self.vertices_z
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices_x as usize * self.vertices_z as usize
    }

    pub fn cell_count(&self) -> usize {
        (self.vertices_x as usize - 1) * (self.vertices_z as usize - 1)
    }

    /// Number of indices the generated mesh will contain (6 per cell).
    pub fn index_count(&self) -> usize {
        self.cell_count() * 6
    }
}

/// CPU-side vertices and indices of a grid plane.
#[derive(Clone, Debug)]
pub struct GridMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl GridMesh {
    pub fn generate(params: &GridParams) -> Self {
        Self {
            vertices: generate_vertices(params),
            indices: generate_indices(params),
        }
    }

    /// The number of indices an indexed draw of this mesh covers.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

pub fn generate_vertices(params: &GridParams) -> Vec<Vertex> {
    let (nx, nz) = (params.vertices_x, params.vertices_z);
    let step_x = params.width / (nx - 1) as f32;
    let step_z = params.length / (nz - 1) as f32;

    let mut vertices = Vec::with_capacity(params.vertex_count());
    for z in 0..nz {
        for x in 0..nx {
            let x_pos = -params.width / 2.0 + x as f32 * step_x;
            let z_pos = -params.length / 2.0 + z as f32 * step_z;
            let u = x as f32 / (nx - 1) as f32;
            let v = z as f32 / (nz - 1) as f32;
            vertices.push(Vertex {
                position: [x_pos, 0.0, z_pos],
                tex_coords: [u, v],
            });
        }
    }
    vertices
}

pub fn generate_indices(params: &GridParams) -> Vec<u32> {
    let nx = params.vertices_x;
    let (cells_x, cells_z) = (params.vertices_x - 1, params.vertices_z - 1);

    let mut indices = Vec::with_capacity(params.index_count());
    for z in 0..cells_z {
        for x in 0..cells_x {
            let bottom_left = z * nx + x;
            let bottom_right = bottom_left + 1;
            let top_left = (z + 1) * nx + x;
            let top_right = top_left + 1;

            indices.extend_from_slice(&[bottom_left, top_left, top_right]);
            indices.extend_from_slice(&[bottom_left, top_right, bottom_right]);
        }
    }
    indices
}
