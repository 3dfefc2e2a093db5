//! # qirender
//!
//! A Rust library for turning an already-encoded QR module matrix into a pixel bitmap.
//!
//! `qirender` takes the dark/light module grid produced by any QR encoder, adds the 4-module
//! quiet zone, and scales the symbol into a bitmap. Two strategies are offered: fit the symbol
//! into a requested image size, or scale it by a fixed number of pixels per module while
//! respecting a ceiling on the image size. Renderers report every property change to
//! registered listeners.
//!
//! ## Features
//!
//! - Size-fitting rendering with a pluggable fit policy and centered, non-distorting scaling.
//! - Module-size rendering with a hard ceiling on output dimensions.
//! - Synchronous change notification on five topics with old/new values.
//! - Export rendered bitmaps as in-memory image buffers, PNG files, SVGs, or console art.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qirender = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Fit a version 1 symbol into a 120x120 image:
//!
//! ```rust
//! use qirender::{BitMatrix, Dimension, Renderable, SizeFittingRenderer};
//!
//! let matrix = BitMatrix::from_fn(21, 21, |x, y| (x ^ y) & 1 == 0);
//! let mut renderer = SizeFittingRenderer::new();
//! renderer.set_requested_dimension(Dimension::square(120).unwrap()).unwrap();
//! let bitmap = renderer.render(&matrix).unwrap();
//! assert_eq!(bitmap.dimension(), Dimension::square(120).unwrap());
//! ```
//!
//! Render at 3 pixels per module and save as PNG:
//!
//! ```rust,no_run
//! use qirender::{helper::save_png, BitMatrix, ModuleSizeRenderer, Renderable};
//!
//! let matrix = BitMatrix::new(21, 21);
//! let mut renderer = ModuleSizeRenderer::new();
//! renderer.set_module_size(3).unwrap();
//! let bitmap = renderer.render(&matrix).unwrap();
//! save_png(bitmap, Some("output"), Some("qr")).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`renderer`]: The rendering strategies and their shared contract.
//! - [`events`]: Change-notification topics and the listener registry.
//! - [`helper`]: Utilities for exporting bitmaps in various formats.

#![forbid(unsafe_code)]

pub mod bitmap;
pub mod dimension;
pub mod error;
pub mod events;
mod grid;
pub mod helper;
pub mod matrix;
pub mod renderer;

pub use bitmap::Bitmap;
pub use dimension::{Dimension, TriState, MIN_SIZE, QUIET_ZONE};
pub use error::{RenderError, Result};
pub use events::{Listener, ListenerId, PropertyChange, Topic};
pub use matrix::{BitMatrix, ModuleMatrix};
pub use renderer::{
    FitContext, FitPolicy, ModuleSizeRenderer, PadToRequested, Renderable, RendererConfig,
    ShrinkToModuleGrid, SizeFittingRenderer,
};
