/// Convert one linear colour channel to the sRGB transfer curve.
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Gamma-encode the colour channels of `colour`; alpha is left linear.
pub fn colour_to_srgb(colour: wgpu::Color) -> wgpu::Color {
    wgpu::Color {
        r: linear_to_srgb(colour.r),
        g: linear_to_srgb(colour.g),
        b: linear_to_srgb(colour.b),
        a: colour.a,
    }
}
