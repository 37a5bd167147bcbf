//! Projection and surface orientation.
//!
//! Matrices follow `cgmath`'s column-vector convention and right-handed
//! coordinates (the camera looks down -Z). [`OPENGL_TO_WGPU_MATRIX`] remaps the
//! OpenGL depth range produced by `cgmath::perspective` to wgpu's `[0, 1]`.

use cgmath::{Matrix4, Rad, SquareMatrix};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Rotation the presentation engine expects to be baked into clip space.
///
/// wgpu surfaces present without pre-rotation, so the host always reports
/// `Identity`. The rotated variants are for hosts that hand rotation to the
/// application (e.g. Vulkan swapchains on rotated mobile displays).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SurfaceTransform {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl SurfaceTransform {
    /// Clip-space rotation about Z for this orientation.
    pub fn matrix(&self) -> Matrix4<f32> {
        match self {
            SurfaceTransform::Identity => Matrix4::identity(),
            SurfaceTransform::Rotate90 => Matrix4::from_angle_z(Rad(std::f32::consts::FRAC_PI_2)),
            SurfaceTransform::Rotate180 => Matrix4::from_angle_z(Rad(std::f32::consts::PI)),
            SurfaceTransform::Rotate270 => {
                Matrix4::from_angle_z(Rad(3.0 * std::f32::consts::FRAC_PI_2))
            }
        }
    }

    /// Whether width and height are swapped relative to the presented image.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, SurfaceTransform::Rotate90 | SurfaceTransform::Rotate270)
    }
}

/// Perspective projection tracking the surface aspect ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Projection for a surface presented with `transform`.
    ///
    /// A surface rotated by a quarter turn is rendered with the inverse aspect
    /// so the image has the right proportions once the pre-transform rotates it.
    pub fn adjusted_matrix(&self, transform: SurfaceTransform) -> Matrix4<f32> {
        let aspect = if transform.swaps_axes() {
            1.0 / self.aspect
        } else {
            self.aspect
        };
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, aspect, self.znear, self.zfar)
    }
}
