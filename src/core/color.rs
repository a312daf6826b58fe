use nalgebra::Vector3;

/// Clamps each channel to [0, 1] ahead of 8-bit quantization.
pub fn clamp_unit(color: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}

/// Linearly remaps `value` from [min, max] onto [0, 1], clamped.
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Quantizes a clamped linear color to 8-bit channels.
pub fn to_rgb8(color: &Vector3<f32>) -> [u8; 3] {
    [
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_caps_overbright_channels() {
        let c = clamp_unit(Vector3::new(4.2, 0.5, -0.1));
        assert_eq!(c, Vector3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn remap_is_linear_inside_the_band() {
        assert!((remap(0.9975, 0.995, 1.0) - 0.5).abs() < 1e-4);
        assert_eq!(remap(0.5, 0.995, 1.0), 0.0);
        assert_eq!(remap(1.5, 0.995, 1.0), 1.0);
    }

    #[test]
    fn to_rgb8_quantizes_full_range() {
        assert_eq!(to_rgb8(&Vector3::new(1.0, 0.0, 0.5)), [255, 0, 127]);
    }
}
