//! 8-bit RGB image buffer produced by a render.

/// One 8-bit-per-channel RGB pixel.
pub type Rgb = [u8; 3];

const BLACK: Rgb = [0, 0, 0];

/// Dense row-major RGB image with its origin at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; width as usize * height as usize],
        }
    }

    /// Wrap row-major pixels. `pixels.len()` must equal `width * height`.
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y), or black when the coordinates are out of range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgb {
        self.index(x, y).map_or(BLACK, |i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Copy `tile` into this image with its top-left corner at (x, y).
    ///
    /// Parts of the tile that fall outside this image are clipped.
    pub fn blit(&mut self, tile: &Image, x: u32, y: u32) {
        let columns = tile.width.min(self.width.saturating_sub(x)) as usize;
        if columns == 0 {
            return;
        }

        for row in 0..tile.height.min(self.height.saturating_sub(y)) {
            let src = row as usize * tile.width as usize;
            let dst = (y + row) as usize * self.width as usize + x as usize;
            self.pixels[dst..dst + columns].copy_from_slice(&tile.pixels[src..src + columns]);
        }
    }

    /// Tightly packed RGB8 bytes, row-major (for display or saving).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}
