/// Per-frame constants read by the water vertex shader.
///
/// Layout matches `WaterConstants` in `water.wgsl`: a 64 byte matrix followed by
/// four scalars, 80 bytes total, which already satisfies uniform alignment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaterUniform {
    pub world_view_proj: [[f32; 4]; 4],
    pub time: f32,
    pub wave_height: f32,
    pub wave_freq: f32,
    pub wave_speed: f32,
}

/// Shape of the travelling wave displacing the plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveParams {
    pub height: f32,
    pub frequency: f32,
    pub speed: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            height: 0.3,
            frequency: 0.4,
            speed: 1.5,
        }
    }
}

impl WaterUniform {
    pub fn new(world_view_proj: cgmath::Matrix4<f32>, time: f32, wave: &WaveParams) -> Self {
        Self {
            world_view_proj: world_view_proj.into(),
            time,
            wave_height: wave.height,
            wave_freq: wave.frequency,
            wave_speed: wave.speed,
        }
    }
}
