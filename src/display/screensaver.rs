use super::{
    bitmaps::{FACE_ACTIVE, FACE_IDLE, GLYPH_SIZE},
    DisplaySurface,
};

/*
Screensaver
===========

A 32-bit shift register records the gate, one bit per frame. Every frame:

    1. draw a ring for each set bit 23..1 (older = larger)
    2. if the gate is latched, set bit 0 and show the active face,
       otherwise show the idle face
    3. shift left by one

Each held note therefore emits a pulse of rings that expands outward over
the next 23 frames, then scrolls off the top of the register.
*/

const CENTER_X: i32 = 64;
const CENTER_Y: i32 = 32;
const FACE_X: i32 = 40;
const FACE_Y: i32 = 8;
const BASE_RADIUS: f32 = 26.0;
const OLDEST_RING: u32 = 23;

/// Radius of the ring drawn for history bit `i`.
pub fn ring_radius(i: u32) -> i32 {
    (BASE_RADIUS + (i as f32).powf(1.3)) as i32
}

#[derive(Debug, Default, Clone)]
pub struct Screensaver {
    history: u32,
}

impl Screensaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> u32 {
        self.history
    }

    pub fn refresh<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S, gate_latched: bool) {
        surface.clear();

        for i in (1..=OLDEST_RING).rev() {
            if self.history & (1 << i) != 0 {
                surface.draw_circle(CENTER_X, CENTER_Y, ring_radius(i));
            }
        }

        let face = if gate_latched {
            self.history |= 1;
            &FACE_ACTIVE
        } else {
            &FACE_IDLE
        };
        surface.draw_xbm(FACE_X, FACE_Y, GLYPH_SIZE, GLYPH_SIZE, face);

        self.history <<= 1;
    }
}
