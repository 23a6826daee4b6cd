//! XBM glyphs, rasterized at compile time.
//!
//! Shapes are evaluated on a doubled grid (pixel centres at odd coordinates)
//! so a 48 px glyph has an exact centre at 48.

pub const GLYPH_SIZE: i32 = 48;
pub const GLYPH_BYTES: usize = (GLYPH_SIZE as usize / 8) * GLYPH_SIZE as usize;

/// Face shown while the gate latch is held.
pub static FACE_ACTIVE: [u8; GLYPH_BYTES] = rasterize(Glyph::Active);
/// Face shown while idle.
pub static FACE_IDLE: [u8; GLYPH_BYTES] = rasterize(Glyph::Idle);
/// Memory chip with a cross, shown when the wavetable could not be allocated.
pub static OUT_OF_MEMORY: [u8; GLYPH_BYTES] = rasterize(Glyph::Chip);

#[derive(Clone, Copy)]
enum Glyph {
    Active,
    Idle,
    Chip,
}

const fn rasterize(glyph: Glyph) -> [u8; GLYPH_BYTES] {
    let stride = GLYPH_SIZE as usize / 8;
    let mut bits = [0u8; GLYPH_BYTES];
    let mut y = 0;
    while y < GLYPH_SIZE {
        let mut x = 0;
        while x < GLYPH_SIZE {
            let on = match glyph {
                Glyph::Active => active_pixel(x, y),
                Glyph::Idle => idle_pixel(x, y),
                Glyph::Chip => chip_pixel(x, y),
            };
            if on {
                bits[y as usize * stride + x as usize / 8] |= 1 << (x % 8);
            }
            x += 1;
        }
        y += 1;
    }
    bits
}

const fn dist2(px: i32, py: i32, cx: i32, cy: i32) -> i32 {
    (px - cx) * (px - cx) + (py - cy) * (py - cy)
}

const fn abs(v: i32) -> i32 {
    if v < 0 {
        -v
    } else {
        v
    }
}

const fn active_pixel(x: i32, y: i32) -> bool {
    let (px, py) = (2 * x + 1, 2 * y + 1);
    let head = dist2(px, py, 48, 48);
    let ring = head >= 38 * 38 && head <= 46 * 46;
    let eyes = dist2(px, py, 32, 36) <= 64 || dist2(px, py, 64, 36) <= 64;
    let mouth = dist2(px, py, 48, 58);
    let smile = py > 62 && mouth >= 22 * 22 && mouth <= 28 * 28;
    ring || eyes || smile
}

const fn idle_pixel(x: i32, y: i32) -> bool {
    let (px, py) = (2 * x + 1, 2 * y + 1);
    let head = dist2(px, py, 48, 48);
    let ring = head >= 42 * 42 && head <= 46 * 46;
    let eyes = abs(py - 36) <= 2 && (abs(px - 32) <= 8 || abs(px - 64) <= 8);
    let mouth = abs(py - 70) <= 2 && abs(px - 48) <= 12;
    ring || eyes || mouth
}

const fn chip_pixel(x: i32, y: i32) -> bool {
    let body = x >= 4 && x <= 43 && y >= 10 && y <= 37;
    let border = body && (x <= 5 || x >= 42 || y <= 11 || y >= 36);
    let pin_column = x >= 8 && x <= 39 && x % 6 < 2;
    let pins = pin_column && ((y >= 4 && y < 10) || (y > 37 && y <= 43));
    let (u, v) = (x - 14, y - 14);
    let inside = u >= 0 && u <= 19 && v >= 0 && v <= 19;
    let cross = inside && (abs(u - v) <= 1 || abs(u + v - 19) <= 1);
    border || pins || cross
}
