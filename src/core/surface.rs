use crate::error::DrawError;
use crate::math::Rgba;

/// Region of the buffer a block write actually touches after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Paintable texture: a back buffer written by strokes and a display buffer
/// refreshed only on `commit`.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    /// Row-major cells, `width * height` long
    pixels: Vec<Rgba>,
    /// Last committed state, what a renderer samples
    displayed: Vec<Rgba>,
    width: u32,
    height: u32,
    dirty: bool,
    commits: u64,
}

impl PixelSurface {
    /// Create a surface filled with white
    pub fn new(width: u32, height: u32) -> Result<Self, DrawError> {
        Self::with_base_color(width, height, Rgba::WHITE)
    }

    /// Create a surface filled with `base`
    pub fn with_base_color(width: u32, height: u32, base: Rgba) -> Result<Self, DrawError> {
        if width == 0 || height == 0 {
            return Err(DrawError::InvalidDimension { width, height });
        }

        let cells = width as usize * height as usize;
        Ok(Self {
            pixels: vec![base; cells],
            displayed: vec![base; cells],
            width,
            height,
            dirty: false,
            commits: 0,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clamp a requested block so it lies entirely inside the buffer.
    ///
    /// The origin is shifted back until the block fits; a block larger than the
    /// surface is cut down to the surface size. Returns `None` for empty blocks.
    pub fn clamp_block(&self, x: i32, y: i32, block_w: u32, block_h: u32) -> Option<BlockRect> {
        let width = block_w.min(self.width);
        let height = block_h.min(self.height);
        if width == 0 || height == 0 {
            return None;
        }

        Some(BlockRect {
            x: (x.max(0) as u32).min(self.width - width),
            y: (y.max(0) as u32).min(self.height - height),
            width,
            height,
        })
    }

    /// Fill a rectangle with a solid color. Never writes out of bounds.
    pub fn write_block(&mut self, x: i32, y: i32, block_w: u32, block_h: u32, color: Rgba) {
        let Some(rect) = self.clamp_block(x, y, block_w, block_h) else {
            return;
        };

        for row in rect.y..rect.y + rect.height {
            let start = self.index(rect.x, row);
            self.pixels[start..start + rect.width as usize].fill(color);
        }
        self.dirty = true;
    }

    /// Copy a prepared `block_w * block_h` cell buffer into the surface using
    /// the same clamp-origin policy as `write_block`. When the block had to be
    /// cut down, its top-left part is copied.
    pub fn blit(&mut self, x: i32, y: i32, block_w: u32, block_h: u32, cells: &[Rgba]) {
        if cells.len() < block_w as usize * block_h as usize {
            log::warn!(
                "blit source holds {} cells, {}x{} block needs {}",
                cells.len(),
                block_w,
                block_h,
                block_w * block_h
            );
            return;
        }
        let Some(rect) = self.clamp_block(x, y, block_w, block_h) else {
            return;
        };

        let stride = block_w as usize;
        let run = rect.width as usize;
        for dy in 0..rect.height as usize {
            let src = dy * stride;
            let dst = self.index(rect.x, rect.y + dy as u32);
            self.pixels[dst..dst + run].copy_from_slice(&cells[src..src + run]);
        }
        self.dirty = true;
    }

    /// Reset every cell to `color`
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
        self.dirty = true;
    }

    /// Push the back buffer to the display buffer. Expensive; callers rate-limit it.
    /// Returns false when nothing changed since the previous commit.
    pub fn commit(&mut self) -> bool {
        if !self.dirty {
            return false;
        }

        self.displayed.copy_from_slice(&self.pixels);
        self.dirty = false;
        self.commits += 1;
        true
    }

    /// True when writes are waiting for a commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of commits that actually copied data
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Back-buffer cell, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.in_bounds(x, y).then(|| self.pixels[self.index(x, y)])
    }

    /// Display-buffer cell, `None` outside the surface
    pub fn displayed_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.in_bounds(x, y).then(|| self.displayed[self.index(x, y)])
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Display buffer as raw RGBA8 bytes for texture upload
    pub fn display_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.displayed)
    }

    /// Count of back-buffer cells that differ from `base`
    pub fn ink_coverage(&self, base: Rgba) -> usize {
        self.pixels.iter().filter(|&&c| c != base).count()
    }

    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
