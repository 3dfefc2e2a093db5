//! Renderer strategies.
//!
//! Two strategies implement [`Renderable`]:
//!
//! - [`SizeFittingRenderer`]: the caller requests a total image size and the renderer derives
//!   the largest module multiple that fits, centering the symbol with padding.
//! - [`ModuleSizeRenderer`]: the caller sets pixels per module and the image size follows,
//!   rejected if it would exceed the configured ceiling.
//!
//! Both share a [`BaseRenderer`] holding the ceiling, the current result and the listener
//! registry. Mode-specific accessors return [`RenderError::Unsupported`] on the other strategy.

pub mod fitting;
pub mod module_size;

pub use fitting::{FitContext, FitPolicy, PadToRequested, ShrinkToModuleGrid, SizeFittingRenderer};
pub use module_size::ModuleSizeRenderer;

use log::debug;

use crate::bitmap::Bitmap;
use crate::dimension::{Dimension, TriState};
use crate::error::{RenderError, Result};
use crate::events::{Listener, ListenerId, Observers, PropertyChange, Topic};
use crate::matrix::ModuleMatrix;

/// Constructor-time renderer settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    /// Hard ceiling on output image size. Fixed for the renderer's lifetime.
    pub max_image_dimension: Dimension,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_image_dimension: Dimension::UNBOUNDED,
        }
    }
}

/// The capability set shared by every renderer strategy.
///
/// # Example
///
/// ```rust
/// use qirender::{BitMatrix, Dimension, Renderable, SizeFittingRenderer};
///
/// let matrix = BitMatrix::from_fn(21, 21, |x, y| (x + y) % 2 == 0);
/// let mut renderer = SizeFittingRenderer::new();
/// renderer.set_requested_dimension(Dimension::square(120).unwrap()).unwrap();
/// let bitmap = renderer.render(&matrix).unwrap();
/// assert_eq!((bitmap.width(), bitmap.height()), (120, 120));
/// ```
pub trait Renderable {
    /// Renders `matrix`, stores the bitmap as the current result and returns it.
    fn render(&mut self, matrix: &dyn ModuleMatrix) -> Result<&Bitmap>;

    fn set_requested_dimension(&mut self, dimension: Dimension) -> Result<()>;

    fn requested_dimension(&self) -> Result<Dimension>;

    fn set_module_size(&mut self, module_size: u32) -> Result<()>;

    fn module_size(&self) -> Result<u32>;

    /// Clears the result and actual dimension. Configuration is kept.
    fn reset_state(&mut self);

    fn base(&self) -> &BaseRenderer;

    fn base_mut(&mut self) -> &mut BaseRenderer;

    fn has_result(&self) -> bool {
        self.base().result().is_some()
    }

    fn result(&self) -> Option<&Bitmap> {
        self.base().result()
    }

    fn actual_dimension(&self) -> Option<Dimension> {
        self.base().actual_dimension()
    }

    fn exceeds_requested_dimension(&self) -> TriState {
        self.base().exceeds_requested_dimension()
    }

    fn max_image_dimension(&self) -> Dimension {
        self.base().max_image_dimension()
    }

    fn exceeds_max_image_dimension(&self, dimension: &Dimension) -> bool {
        self.base().exceeds_max_image_dimension(dimension)
    }

    /// Registers a listener for one topic.
    fn add_listener(&mut self, topic: Topic, listener: Listener) -> ListenerId {
        self.base_mut().observers.add(Some(topic), listener)
    }

    /// Registers a listener for every topic.
    fn add_listener_all(&mut self, listener: Listener) -> ListenerId {
        self.base_mut().observers.add(None, listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.base_mut().observers.remove(id)
    }
}

/// State shared by both strategies: the size ceiling, the current result and its listeners.
#[derive(Debug)]
pub struct BaseRenderer {
    max_image_dimension: Dimension,
    observers: Observers,
    actual_dimension: Option<Dimension>,
    exceeds_requested_dimension: TriState,
    result: Option<Bitmap>,
}

impl BaseRenderer {
    pub(crate) fn new(config: &RendererConfig, exceeds_requested_dimension: TriState) -> Self {
        Self {
            max_image_dimension: config.max_image_dimension,
            observers: Observers::new(),
            actual_dimension: None,
            exceeds_requested_dimension,
            result: None,
        }
    }

    pub fn max_image_dimension(&self) -> Dimension {
        self.max_image_dimension
    }

    pub fn exceeds_max_image_dimension(&self, dimension: &Dimension) -> bool {
        dimension.exceeds(&self.max_image_dimension)
    }

    pub fn actual_dimension(&self) -> Option<Dimension> {
        self.actual_dimension
    }

    pub fn exceeds_requested_dimension(&self) -> TriState {
        self.exceeds_requested_dimension
    }

    pub fn result(&self) -> Option<&Bitmap> {
        self.result.as_ref()
    }

    pub(crate) fn notify(&mut self, change: PropertyChange<'_>) {
        self.observers.fire(&change);
    }

    /// Replaces the result, firing actual-dimension, exceeds and result changes in that order.
    pub(crate) fn store(&mut self, bitmap: Bitmap, exceeds: TriState) -> &Bitmap {
        self.set_actual(Some(bitmap.dimension()), exceeds);
        let old = self.result.take();
        let new: &Bitmap = self.result.insert(bitmap);
        self.observers.fire(&PropertyChange::Result {
            old: old.as_ref(),
            new: Some(new),
        });
        new
    }

    /// Drops the result, returning to the "no result" state.
    pub(crate) fn clear(&mut self, exceeds: TriState) {
        self.set_actual(None, exceeds);
        let old = self.result.take();
        self.observers.fire(&PropertyChange::Result {
            old: old.as_ref(),
            new: None,
        });
    }

    fn set_actual(&mut self, actual: Option<Dimension>, exceeds: TriState) {
        let old = std::mem::replace(&mut self.actual_dimension, actual);
        self.observers.fire(&PropertyChange::ActualDimension { old, new: actual });
        let old = std::mem::replace(&mut self.exceeds_requested_dimension, exceeds);
        self.observers.fire(&PropertyChange::ExceedsRequestedDimension { old, new: exceeds });
    }
}

/// Logical footprint of `matrix` including the quiet zone.
pub(crate) fn footprint(matrix: &dyn ModuleMatrix) -> Result<Dimension> {
    if matrix.width() == 0 || matrix.height() == 0 {
        return Err(RenderError::EmptyMatrix);
    }
    Ok(Dimension::with_quiet_zone(matrix.width(), matrix.height()))
}

/// Writes `matrix` scaled by `multiple` into a clear bitmap of size `actual`, centered.
///
/// Odd leftover pixels land on the bottom/right.
pub(crate) fn paint(matrix: &dyn ModuleMatrix, multiple: u32, actual: Dimension) -> Result<Bitmap> {
    let scaled_width = matrix.width().saturating_mul(multiple);
    let scaled_height = matrix.height().saturating_mul(multiple);
    let (Some(free_x), Some(free_y)) = (
        actual.width().checked_sub(scaled_width),
        actual.height().checked_sub(scaled_height),
    ) else {
        return Err(RenderError::FitTooSmall {
            fitted: actual,
            symbol: Dimension::new(scaled_width, scaled_height)?,
        });
    };
    let left = free_x / 2;
    let top = free_y / 2;
    debug!(
        "painting {}x{} modules at {}px into {} (padding left {}, top {})",
        matrix.width(),
        matrix.height(),
        multiple,
        actual,
        left,
        top
    );

    let mut bitmap = Bitmap::new(actual);
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            if matrix.is_dark(x, y) {
                bitmap.set_region(left + x * multiple, top + y * multiple, multiple, multiple);
            }
        }
    }
    Ok(bitmap)
}
