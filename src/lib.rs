//! water-plane
//!
//! Renders a textured water surface with wgpu: a procedurally generated grid
//! plane is uploaded once, and every frame a constant buffer carrying the
//! animation time, wave parameters and world-view-projection matrix is
//! rewritten before a single indexed draw.
//!
//! High-level modules
//! - `camera`: projection and surface orientation matrices
//! - `config`: tunables of the scene
//! - `context`: window, surface and device state owned by the host
//! - `data_structures`: grid mesh, frame state, uniforms and textures
//! - `flow`: the sample lifecycle and the winit event loop
//! - `pipelines`: the water render pipeline and its shader
//! - `render`: the per-frame backend interface and its wgpu implementation
//! - `resources`: asset loading and GPU buffer creation
//! - `sample`: the water sample itself
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod sample;
