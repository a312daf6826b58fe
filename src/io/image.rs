use crate::core::color::to_rgb8;
use crate::core::framebuffer::FrameBuffer;
use image::ImageBuffer;
use log::error;
use std::path::Path;

/// Saves the framebuffer's color plane as a PNG, quantizing the clamped
/// linear values to 8-bit channels.
pub fn save_framebuffer(framebuffer: &FrameBuffer, path: &str) {
    let mut img_buf = ImageBuffer::new(framebuffer.width as u32, framebuffer.height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        if let Some(color) = framebuffer.get_pixel(x as usize, y as usize) {
            *pixel = image::Rgb(to_rgb8(&color));
        }
    }

    if let Err(e) = img_buf.save(Path::new(path)) {
        error!("Failed to save image to '{path}': {e}");
    }
}
