use atomic_float::AtomicF32;
use nalgebra::Vector3;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::Ordering;

/// Number of striped locks protecting color writes. Pixel indices hash onto
/// the stripes, trading memory for contention.
const LOCK_STRIPES: usize = 1024;

/// The per-frame color and depth planes, shared across the rasterizer's
/// worker threads: atomic depth, striped locking for color.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,

    /// Color buffer wrapped in UnsafeCell to allow interior mutability.
    /// Safety is guaranteed by `locks` and the depth test.
    color_buffer: UnsafeCell<Vec<Vector3<f32>>>,

    /// One atomic depth value per pixel.
    depth_buffer: Vec<AtomicF32>,

    locks: Vec<Mutex<()>>,
}

// Thread safety is managed manually via the atomics and the lock stripes.
unsafe impl Sync for FrameBuffer {}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;

        let mut depth_buffer = Vec::with_capacity(size);
        for _ in 0..size {
            depth_buffer.push(AtomicF32::new(f32::MAX));
        }

        let mut locks = Vec::with_capacity(LOCK_STRIPES);
        for _ in 0..LOCK_STRIPES {
            locks.push(Mutex::new(()));
        }

        Self {
            width,
            height,
            color_buffer: UnsafeCell::new(vec![Vector3::zeros(); size]),
            depth_buffer,
            locks,
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resets the color plane to the background and every depth value to the
    /// far sentinel. Must run before the first triangle of each frame.
    pub fn clear(&mut self, background: Vector3<f32>) {
        self.color_buffer.get_mut().fill(background);
        for depth in &self.depth_buffer {
            depth.store(f32::MAX, Ordering::Relaxed);
        }
    }

    /// Strict closer-wins depth test. Returns true if `new_depth` is closer
    /// than the stored value, in which case it is already written; ties keep
    /// the earlier write.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let depth_atomic = &self.depth_buffer[self.index(x, y)];

        let mut current = depth_atomic.load(Ordering::Relaxed);
        loop {
            // Also rejects NaN depths, which never compare less.
            if !(new_depth < current) {
                return false;
            }
            match depth_atomic.compare_exchange_weak(
                current,
                new_depth,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(updated) => current = updated,
            }
        }
    }

    /// Thread-safe pixel write. Should only be called after the pixel passed
    /// the depth test (or from a visualization that bypasses it).
    #[inline]
    pub fn set_pixel_safe(&self, x: usize, y: usize, color: Vector3<f32>) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        let lock_idx = idx % self.locks.len();
        let _guard = self.locks[lock_idx].lock().unwrap();

        // Holding the stripe lock makes this write exclusive.
        unsafe {
            let buffer = &mut *self.color_buffer.get();
            buffer[idx] = color;
        }
    }

    /// Reads a pixel's color. Safe once rendering of the frame is complete.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let buffer = unsafe { &*self.color_buffer.get() };
        Some(buffer[self.index(x, y)])
    }

    /// Reads a pixel's stored depth.
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)].load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(4, 4);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        fb.set_pixel_safe(1, 1, Vector3::new(1.0, 0.0, 0.0));

        fb.clear(Vector3::new(0.2, 0.2, 0.2));
        assert_eq!(fb.get_pixel(1, 1), Some(Vector3::new(0.2, 0.2, 0.2)));
        assert_eq!(fb.depth_at(1, 1), Some(f32::MAX));
    }

    #[test]
    fn depth_test_is_strictly_closer_wins() {
        let fb = FrameBuffer::new(2, 2);
        assert!(fb.depth_test_and_update(0, 0, 0.5));
        // Farther and equal values lose; ties keep the earlier write.
        assert!(!fb.depth_test_and_update(0, 0, 0.7));
        assert!(!fb.depth_test_and_update(0, 0, 0.5));
        assert!(fb.depth_test_and_update(0, 0, 0.3));
        assert_eq!(fb.depth_at(0, 0), Some(0.3));
    }

    #[test]
    fn out_of_bounds_accesses_are_rejected() {
        let fb = FrameBuffer::new(2, 2);
        assert!(!fb.depth_test_and_update(5, 0, 0.1));
        assert_eq!(fb.get_pixel(0, 9), None);
        // Writing out of bounds is a silent no-op.
        fb.set_pixel_safe(9, 9, Vector3::zeros());
    }

    #[test]
    fn nan_depth_never_passes() {
        let fb = FrameBuffer::new(1, 1);
        assert!(!fb.depth_test_and_update(0, 0, f32::NAN));
        assert_eq!(fb.depth_at(0, 0), Some(f32::MAX));
    }
}
