//! Monochrome visual feedback for the voice.
//!
//! Drawing goes through [`DisplaySurface`], which only needs `clear` and
//! `set_pixel`; circles, bitmaps and rectangles have default rasterizers on
//! top of those. [`FrameBuffer`] is the in-memory 128×64 implementation.

pub mod bitmaps;
mod framebuffer;
mod panel;
mod screensaver;

use std::sync::Arc;

use crate::synth::{params::VoiceParams, voice::VoiceMonitor};

pub use framebuffer::{FrameBuffer, HEIGHT, WIDTH};
pub use panel::Panel;
pub use screensaver::Screensaver;

/// A 1-bit drawing target.
pub trait DisplaySurface {
    fn clear(&mut self);

    /// Set one pixel. Coordinates outside the surface are ignored.
    fn set_pixel(&mut self, x: i32, y: i32);

    /// Midpoint circle outline.
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        if radius < 0 {
            return;
        }
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;
        while x >= y {
            for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y)] {
                self.set_pixel(cx + dx, cy + dy);
                self.set_pixel(cx - dx, cy - dy);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Blit an XBM bitmap: rows padded to whole bytes, least significant bit leftmost.
    fn draw_xbm(&mut self, x: i32, y: i32, width: i32, height: i32, bits: &[u8]) {
        let stride = ((width + 7) / 8) as usize;
        for row in 0..height {
            for col in 0..width {
                let index = row as usize * stride + col as usize / 8;
                let on = bits
                    .get(index)
                    .is_some_and(|byte| byte & (1 << (col % 8)) != 0);
                if on {
                    self.set_pixel(x + col, y + row);
                }
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for row in y..y + height {
            for col in x..x + width {
                self.set_pixel(col, row);
            }
        }
    }
}

/// Display side of one voice: the parameter page and the screensaver.
pub struct VoiceDisplay {
    monitor: VoiceMonitor,
    params: Arc<VoiceParams>,
    panel: Panel,
    screensaver: Screensaver,
}

impl VoiceDisplay {
    pub fn new(monitor: VoiceMonitor, params: Arc<VoiceParams>) -> Self {
        Self {
            monitor,
            params,
            panel: Panel::new(),
            screensaver: Screensaver::new(),
        }
    }

    pub fn display<S: DisplaySurface + ?Sized>(&self, surface: &mut S) {
        self.panel
            .draw(surface, &self.params.snapshot(), &self.monitor);
    }

    pub fn display_screensaver<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        self.screensaver
            .refresh(surface, self.monitor.gate_latched());
    }

    pub fn monitor(&self) -> &VoiceMonitor {
        &self.monitor
    }

    pub fn params(&self) -> &Arc<VoiceParams> {
        &self.params
    }
}
