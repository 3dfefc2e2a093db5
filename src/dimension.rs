//! Pixel and module dimensions.
//!
//! A [`Dimension`] is an immutable width/height pair used both as a hard ceiling on output
//! images and as the caller's requested output size. [`TriState`] answers yes/no questions
//! that have no meaning in some renderer modes.

use core::fmt;

use crate::error::{RenderError, Result};

/// Blank border, in modules, required on every side of a QR symbol.
pub const QUIET_ZONE: u32 = 4;

/// Smallest renderable symbol edge in modules: a version 1 symbol (21 modules) plus quiet zone.
pub const MIN_SIZE: u32 = 21 + 2 * QUIET_ZONE;

/// An immutable width/height pair, both axes strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension {
    width: u32,
    height: u32,
}

impl Dimension {
    /// A ceiling no real image can reach.
    pub const UNBOUNDED: Dimension = Dimension {
        width: u32::MAX,
        height: u32::MAX,
    };

    /// The smallest size a requested output dimension may take.
    pub const MIN: Dimension = Dimension {
        width: MIN_SIZE,
        height: MIN_SIZE,
    };

    /// Creates a dimension, rejecting a zero-length axis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qirender::Dimension;
    ///
    /// let d = Dimension::new(120, 80).unwrap();
    /// assert_eq!((d.width(), d.height()), (120, 80));
    /// assert!(Dimension::new(0, 10).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }

    // Callers guarantee both axes are positive.
    pub(crate) const fn new_unchecked(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square dimension.
    pub fn square(edge: u32) -> Result<Self> {
        Self::new(edge, edge)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `true` if either axis of `self` is strictly greater than that of `other`.
    pub fn exceeds(&self, other: &Dimension) -> bool {
        self.width > other.width || self.height > other.height
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Dimension) -> Dimension {
        Dimension {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Scales both axes, saturating at `u32::MAX`.
    pub(crate) fn scale(&self, factor: u32) -> Dimension {
        Dimension {
            width: self.width.saturating_mul(factor),
            height: self.height.saturating_mul(factor),
        }
    }

    /// Scales both axes, or `None` if either product overflows.
    pub(crate) fn checked_scale(&self, factor: u32) -> Option<Dimension> {
        Some(Dimension {
            width: self.width.checked_mul(factor)?,
            height: self.height.checked_mul(factor)?,
        })
    }

    /// Footprint of a symbol with the quiet zone added on every side.
    pub(crate) fn with_quiet_zone(width: u32, height: u32) -> Dimension {
        Dimension {
            width: width.saturating_add(2 * QUIET_ZONE),
            height: height.saturating_add(2 * QUIET_ZONE),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Three-valued logic flag for queries that are meaningless in some modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriState {
    True,
    False,
    NotApplicable,
}

impl TriState {
    /// `Some(bool)` when applicable, `None` otherwise.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::NotApplicable => None,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriState::True => "true",
            TriState::False => "false",
            TriState::NotApplicable => "n/a",
        };
        f.write_str(s)
    }
}
