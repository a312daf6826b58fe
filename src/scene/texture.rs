use crate::scene::material::TextureSample;
use image::{DynamicImage, GenericImageView};
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// An image-backed sampler. Decoding happens once, outside the per-frame
/// path; the pipeline only ever sees the `TextureSample` capability.
pub struct Texture {
    image: DynamicImage,
    width: u32,
    height: u32,
}

impl Texture {
    /// Wraps an already-decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            image,
            width,
            height,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|e| format!("Failed to load texture: {e}"))?;

        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref,
            img.width(),
            img.height()
        );

        Ok(Self::from_image(img))
    }

    /// Fetches a texel with repeat addressing on both axes.
    fn texel(&self, x: i64, y: i64) -> Vector3<f32> {
        let x = x.rem_euclid(self.width as i64) as u32;
        let y = y.rem_euclid(self.height as i64) as u32;

        let pixel = self.image.get_pixel(x, y);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

impl TextureSample for Texture {
    /// Bilinear sample with repeat addressing. Returns raw texel values:
    /// color-space conversion (and normal-map decoding) is the shader's
    /// concern, not the sampler's.
    fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        // Map to pixel coordinates; -0.5 because texel centers sit at 0.5.
        let x = uv.x * self.width as f32 - 0.5;
        let y = (1.0 - uv.y) * self.height as f32 - 0.5;

        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;

        let wx = x - x.floor();
        let wy = y - y.floor();

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let top = c00 * (1.0 - wx) + c10 * wx;
        let bottom = c01 * (1.0 - wx) + c11 * wx;
        top * (1.0 - wy) + bottom * wy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// 2x2 texture: white / black on the top row, black / white below.
    fn checker_texture() -> Texture {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([0, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 0]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        Texture::from_image(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn texel_centers_sample_exactly() {
        let texture = checker_texture();
        // UV (0.25, 0.75) is the center of the top-left texel (V points up).
        let c = texture.sample(&Vector2::new(0.25, 0.75));
        assert!((c - Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn midpoints_blend_bilinearly() {
        let texture = checker_texture();
        // Dead center of the image: equal blend of two whites and two blacks.
        let c = texture.sample(&Vector2::new(0.5, 0.5));
        assert!((c - Vector3::new(0.5, 0.5, 0.5)).norm() < 1e-5);
    }

    #[test]
    fn addressing_wraps_outside_the_unit_square() {
        let texture = checker_texture();
        let inside = texture.sample(&Vector2::new(0.25, 0.75));
        let wrapped = texture.sample(&Vector2::new(1.25, 0.75));
        let negative = texture.sample(&Vector2::new(-0.75, 0.75));
        assert!((inside - wrapped).norm() < 1e-5);
        assert!((inside - negative).norm() < 1e-5);
    }
}
