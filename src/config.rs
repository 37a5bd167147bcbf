//! Tunables of the water sample.

use cgmath::{Matrix4, Rad, Vector3};

use crate::data_structures::{grid::GridParams, uniform::WaveParams};

/// Everything the water sample can be configured with.
///
/// `Default` reproduces the stock scene: a 12x12 plane subdivided into
/// 100x100 vertices, tilted toward a camera 20 units away.
#[derive(Clone, Debug)]
pub struct WaterConfig {
    pub name: String,
    pub plane_width: f32,
    pub plane_length: f32,
    pub vertices_x: u32,
    pub vertices_z: u32,
    pub wave: WaveParams,
    pub clear_colour: wgpu::Color,
    /// File under `assets/`, decoded as sRGB.
    pub texture_file: String,
    /// Rotation of the plane about X, toward the camera.
    pub tilt: Rad<f32>,
    /// Translation that places the plane in front of the camera.
    pub camera_translation: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            name: "Water Plane".to_string(),
            plane_width: 12.0,
            plane_length: 12.0,
            vertices_x: 100,
            vertices_z: 100,
            wave: WaveParams::default(),
            clear_colour: wgpu::Color {
                r: 0.35,
                g: 0.35,
                b: 0.35,
                a: 1.0,
            },
            texture_file: "water.png".to_string(),
            tilt: Rad(std::f32::consts::PI * 0.15),
            camera_translation: Vector3::new(0.0, 2.0, -20.0),
            fovy: Rad(std::f32::consts::FRAC_PI_4),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl WaterConfig {
    pub fn grid_params(&self) -> anyhow::Result<GridParams> {
        GridParams::new(
            self.plane_width,
            self.plane_length,
            self.vertices_x,
            self.vertices_z,
        )
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(self.tilt)
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.camera_translation)
    }
}
