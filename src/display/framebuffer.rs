use super::DisplaySurface;

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;

const STRIDE: usize = WIDTH / 8;

/// 128×64, one bit per pixel, rows packed left to right.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bits: [u8; STRIDE * HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bits: [0; STRIDE * HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.bits[y * STRIDE + x / 8] & (1 << (x % 8)) != 0
    }

    pub fn lit_count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for FrameBuffer {
    fn clear(&mut self) {
        self.bits.fill(0);
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        self.bits[y * STRIDE + x / 8] |= 1 << (x % 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_screen_pixels_are_clipped() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(-1, 0);
        fb.set_pixel(0, 64);
        fb.set_pixel(128, 10);
        assert_eq!(fb.lit_count(), 0);

        fb.set_pixel(127, 63);
        assert!(fb.pixel(127, 63));
        assert_eq!(fb.lit_count(), 1);
    }

    #[test]
    fn circle_hits_cardinal_points() {
        let mut fb = FrameBuffer::new();
        fb.draw_circle(64, 32, 10);
        for (x, y) in [(74, 32), (54, 32), (64, 42), (64, 22)] {
            assert!(fb.pixel(x, y), "missing ({}, {})", x, y);
        }
        assert!(!fb.pixel(64, 32));
    }

    #[test]
    fn circle_larger_than_screen_is_clipped() {
        let mut fb = FrameBuffer::new();
        fb.draw_circle(64, 32, 80);
        // Every point of the outline lies beyond the corners.
        assert_eq!(fb.lit_count(), 0);

        fb.draw_circle(64, 32, 60);
        assert!(fb.lit_count() > 0);
    }

    #[test]
    fn xbm_is_lsb_first() {
        let mut fb = FrameBuffer::new();
        // 10 pixels wide: two bytes per row.
        let bits = [0b0000_0001, 0b0000_0010];
        fb.draw_xbm(5, 5, 10, 1, &bits);
        assert!(fb.pixel(5, 5));
        assert!(fb.pixel(14, 5));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn clear_erases_everything() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(0, 0, 8, 8);
        assert_eq!(fb.lit_count(), 64);
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }
}
