//! Module-size strategy.

use log::{debug, warn};

use super::{footprint, paint, BaseRenderer, Renderable, RendererConfig};
use crate::bitmap::Bitmap;
use crate::dimension::{Dimension, TriState};
use crate::error::{RenderError, Result};
use crate::events::PropertyChange;
use crate::matrix::ModuleMatrix;

const MODE: &str = "module-size";

/// Pixels per module used until the caller sets one.
pub const DEFAULT_MODULE_SIZE: u32 = 4;

/// Renders at a fixed number of pixels per module.
///
/// The image size is `(width + 8) * module_size` by `(height + 8) * module_size`. A render whose
/// image would exceed the configured ceiling fails with [`RenderError::SizeExceeded`] and leaves
/// the renderer with no result.
///
/// # Example
///
/// ```rust
/// use qirender::{BitMatrix, Dimension, ModuleSizeRenderer, Renderable, RenderError};
///
/// let mut renderer = ModuleSizeRenderer::with_max_image_dimension(Dimension::square(50).unwrap());
/// renderer.set_module_size(3).unwrap();
/// let err = renderer.render(&BitMatrix::new(21, 21)).unwrap_err();
/// assert!(matches!(err, RenderError::SizeExceeded { .. }));
/// assert!(!renderer.has_result());
/// ```
#[derive(Debug)]
pub struct ModuleSizeRenderer {
    base: BaseRenderer,
    module_size: u32,
}

impl ModuleSizeRenderer {
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    pub fn with_max_image_dimension(max_image_dimension: Dimension) -> Self {
        Self::with_config(RendererConfig {
            max_image_dimension,
        })
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self {
            base: BaseRenderer::new(&config, TriState::NotApplicable),
            module_size: DEFAULT_MODULE_SIZE,
        }
    }
}

impl Default for ModuleSizeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for ModuleSizeRenderer {
    fn render(&mut self, matrix: &dyn ModuleMatrix) -> Result<&Bitmap> {
        let footprint = footprint(matrix)?;
        let scaled = footprint.checked_scale(self.module_size);
        let actual = scaled.unwrap_or_else(|| footprint.scale(self.module_size));
        let max = self.base.max_image_dimension();
        // overflow exceeds even an unbounded ceiling
        if scaled.is_none() || self.base.exceeds_max_image_dimension(&actual) {
            warn!(
                "{} footprint at {}px per module is {}, exceeding the maximum {}",
                footprint, self.module_size, actual, max
            );
            self.reset_state();
            return Err(RenderError::SizeExceeded { max, actual });
        }
        debug!(
            "scaling {} footprint by {}px per module to {}",
            footprint, self.module_size, actual
        );
        let bitmap = paint(matrix, self.module_size, actual)?;
        Ok(self.base.store(bitmap, TriState::NotApplicable))
    }

    fn set_requested_dimension(&mut self, _dimension: Dimension) -> Result<()> {
        Err(RenderError::unsupported("set_requested_dimension", MODE))
    }

    fn requested_dimension(&self) -> Result<Dimension> {
        Err(RenderError::unsupported("requested_dimension", MODE))
    }

    fn set_module_size(&mut self, module_size: u32) -> Result<()> {
        if module_size < 1 {
            return Err(RenderError::InvalidModuleSize(module_size));
        }
        if module_size == self.module_size {
            return Ok(());
        }
        let old = std::mem::replace(&mut self.module_size, module_size);
        self.base.notify(PropertyChange::ModuleSize {
            old: Some(old),
            new: Some(module_size),
        });
        self.reset_state();
        Ok(())
    }

    fn module_size(&self) -> Result<u32> {
        Ok(self.module_size)
    }

    fn reset_state(&mut self) {
        self.base.clear(TriState::NotApplicable);
    }

    fn base(&self) -> &BaseRenderer {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRenderer {
        &mut self.base
    }
}
