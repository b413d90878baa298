use super::basics::{Frame, BLANK_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};

/// The 64x32 monochrome screen plus a flag telling whether it changed since
/// the last snapshot was taken.
pub struct Framebuffer {
    pixels: Frame,
    dirty: bool,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            pixels: BLANK_FRAME,
            dirty: false,
        }
    }

    /// Clears the entire display to black.
    pub fn clear(&mut self) {
        self.pixels = BLANK_FRAME;
        self.dirty = true;
    }

    /// XORs an 8 pixel wide sprite onto the screen at `(x, y)`, one byte per
    /// row, most significant bit leftmost. Coordinates wrap around both edges.
    ///
    /// Returns true if any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (y_off, row) in rows.iter().enumerate() {
            for x_off in 0..8 {
                if row & (0x80 >> x_off) == 0 {
                    continue;
                }
                let px = (x as usize + x_off) % SCREEN_WIDTH as usize;
                let py = (y as usize + y_off) % SCREEN_HEIGHT as usize;
                let pixel = &mut self.pixels[px][py];
                collision |= *pixel;
                *pixel = !*pixel;
                self.dirty = true;
            }
        }
        collision
    }

    pub fn get(&self, x: u8, y: u8) -> bool {
        self.pixels[x as usize % SCREEN_WIDTH as usize][y as usize % SCREEN_HEIGHT as usize]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Copies the current picture out and clears the dirty flag.
    pub fn take_snapshot(&mut self) -> Frame {
        self.dirty = false;
        self.pixels
    }

    pub fn pixels(&self) -> &Frame {
        &self.pixels
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Framebuffer::new()
    }
}
