//! Rendered pixel bitmaps.

use core::fmt;

use crate::dimension::Dimension;
use crate::grid::BitGrid;

/// A rectangular grid of pixels, each either set (dark) or clear (light).
///
/// Produced by a renderer and handed to display or export code such as
/// [`crate::helper::to_image_buffer`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    dimension: Dimension,
    grid: BitGrid,
}

impl Bitmap {
    /// Creates an all-clear bitmap of the given size.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            grid: BitGrid::new(dimension.width(), dimension.height()),
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns `true` if the pixel is set. Out-of-bounds pixels are clear.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.grid.get(x, y)
    }

    /// Sets or clears one pixel. Panics if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, dark: bool) {
        self.grid.set(x, y, dark);
    }

    /// Sets every pixel of a `width` x `height` region at (`left`, `top`), clipped to the bitmap.
    pub fn set_region(&mut self, left: u32, top: u32, width: u32, height: u32) {
        self.grid.fill_rect(left, top, width, height);
    }

    /// Number of set pixels.
    pub fn count_set(&self) -> usize {
        self.grid.count_ones()
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("set", &self.count_set())
            .finish()
    }
}
