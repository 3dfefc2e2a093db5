//! Module matrix input.
//!
//! The renderer never encodes QR payloads. It consumes any type implementing [`ModuleMatrix`],
//! typically the output of an external QR encoder. [`BitMatrix`] is a small owned
//! implementation for callers that already hold module data.

use core::fmt;

use crate::error::{RenderError, Result};
use crate::grid::BitGrid;

/// A rectangular grid of dark/light modules, excluding the quiet zone.
pub trait ModuleMatrix {
    /// Width in modules.
    fn width(&self) -> u32;

    /// Height in modules.
    fn height(&self) -> u32;

    /// Returns `true` for a dark module. Coordinates outside the matrix are light.
    fn is_dark(&self, x: u32, y: u32) -> bool;
}

impl<M: ModuleMatrix + ?Sized> ModuleMatrix for &M {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        (**self).is_dark(x, y)
    }
}

/// An owned, bit-packed module matrix.
///
/// # Example
///
/// ```rust
/// use qirender::{BitMatrix, ModuleMatrix};
///
/// let m = BitMatrix::from_rows(&["#.", ".#"]).unwrap();
/// assert!(m.is_dark(0, 0));
/// assert!(!m.is_dark(1, 0));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    grid: BitGrid,
}

impl BitMatrix {
    /// Creates an all-light matrix.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: BitGrid::new(width, height),
        }
    }

    /// Builds a matrix by asking `f(x, y)` for every module.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut grid = BitGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    grid.set(x, y, true);
                }
            }
        }
        Self { grid }
    }

    /// Parses rows of text where `#` or `1` is a dark module and anything else is light.
    ///
    /// All rows must have the same, non-zero number of characters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = u32::try_from(rows.len())
            .map_err(|_| RenderError::InvalidMatrix("too many rows".to_string()))?;
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(RenderError::InvalidMatrix("no modules".to_string()));
        }
        let width = u32::try_from(width)
            .map_err(|_| RenderError::InvalidMatrix("row too long".to_string()))?;
        let mut grid = BitGrid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width as usize {
                return Err(RenderError::InvalidMatrix(format!(
                    "row {} has {} modules, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                if c == '#' || c == '1' {
                    grid.set(x as u32, y as u32, true);
                }
            }
        }
        Ok(Self { grid })
    }

    /// Sets a single module. Panics if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, dark: bool) {
        self.grid.set(x, y, dark);
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.grid.count_ones()
    }
}

impl ModuleMatrix for BitMatrix {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.grid.get(x, y)
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMatrix")
            .field("width", &self.grid.width())
            .field("height", &self.grid.height())
            .field("dark", &self.grid.count_ones())
            .finish()
    }
}
