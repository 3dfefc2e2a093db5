//! Size-fitting strategy.

use log::debug;

use super::{footprint, paint, BaseRenderer, Renderable, RendererConfig};
use crate::bitmap::Bitmap;
use crate::dimension::{Dimension, TriState, MIN_SIZE};
use crate::error::{RenderError, Result};
use crate::events::PropertyChange;
use crate::matrix::ModuleMatrix;

const MODE: &str = "size-fitting";

/// Requested output size used until the caller sets one.
pub const DEFAULT_REQUESTED_DIMENSION: Dimension = Dimension::new_unchecked(120, 120);

/// Geometry handed to a [`FitPolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitContext {
    /// The caller's requested size, before clamping.
    pub requested: Dimension,
    /// Requested size clamped up to at least the symbol footprint.
    pub effective: Dimension,
    /// Symbol size in modules, quiet zone included.
    pub footprint: Dimension,
    /// Pixels per module.
    pub multiple: u32,
}

/// Decides the output image size once the module multiple is known.
///
/// The returned dimension must be able to hold the scaled symbol; the symbol is centered in it.
pub trait FitPolicy {
    fn fit(&self, ctx: &FitContext) -> Dimension;
}

impl<F: Fn(&FitContext) -> Dimension> FitPolicy for F {
    fn fit(&self, ctx: &FitContext) -> Dimension {
        self(ctx)
    }
}

/// Output is exactly the (clamped) requested size; slack becomes padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadToRequested;

impl FitPolicy for PadToRequested {
    fn fit(&self, ctx: &FitContext) -> Dimension {
        ctx.effective
    }
}

/// Output shrinks to the symbol footprint times the multiple; padding is the quiet zone only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShrinkToModuleGrid;

impl FitPolicy for ShrinkToModuleGrid {
    fn fit(&self, ctx: &FitContext) -> Dimension {
        ctx.footprint.scale(ctx.multiple)
    }
}

/// Renders into a caller-requested total image size.
///
/// The module multiple is the largest integer that fits the symbol (quiet zone included) into
/// the requested size on both axes. Requests smaller than the symbol are clamped up, so a
/// render never fails on geometry.
///
/// # Example
///
/// ```rust
/// use qirender::{BitMatrix, Dimension, Renderable, SizeFittingRenderer};
///
/// let mut renderer = SizeFittingRenderer::new();
/// renderer.render(&BitMatrix::new(21, 21)).unwrap();
/// assert_eq!(renderer.derived_module_size(), Some(4));
/// assert_eq!(renderer.actual_dimension(), Some(Dimension::square(120).unwrap()));
/// ```
#[derive(Debug)]
pub struct SizeFittingRenderer<P = PadToRequested> {
    base: BaseRenderer,
    requested_dimension: Dimension,
    module_size: Option<u32>,
    policy: P,
}

impl SizeFittingRenderer<PadToRequested> {
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    /// Records a maximum image dimension on the shared base.
    ///
    /// This strategy never checks it: a render always succeeds and may produce an image larger
    /// than the ceiling. Use [`crate::ModuleSizeRenderer`] when the ceiling must be enforced.
    pub fn with_max_image_dimension(max_image_dimension: Dimension) -> Self {
        Self::with_config(RendererConfig {
            max_image_dimension,
        })
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self {
            base: BaseRenderer::new(&config, TriState::False),
            requested_dimension: DEFAULT_REQUESTED_DIMENSION,
            module_size: None,
            policy: PadToRequested,
        }
    }
}

impl Default for SizeFittingRenderer<PadToRequested> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FitPolicy> SizeFittingRenderer<P> {
    /// Swaps the fit policy, keeping configuration and listeners. Any result is discarded.
    pub fn with_policy<Q: FitPolicy>(mut self, policy: Q) -> SizeFittingRenderer<Q> {
        self.reset_state();
        SizeFittingRenderer {
            base: self.base,
            requested_dimension: self.requested_dimension,
            module_size: self.module_size,
            policy,
        }
    }

    /// Module multiple chosen by the last render, if any.
    pub fn derived_module_size(&self) -> Option<u32> {
        self.module_size
    }

    fn exceeds(&self, actual: Option<Dimension>) -> TriState {
        TriState::from(actual.is_some_and(|a| a.exceeds(&self.requested_dimension)))
    }
}

impl<P: FitPolicy> Renderable for SizeFittingRenderer<P> {
    fn render(&mut self, matrix: &dyn ModuleMatrix) -> Result<&Bitmap> {
        let footprint = footprint(matrix)?;
        let effective = self.requested_dimension.max(&footprint);
        let multiple = (effective.width() / footprint.width())
            .min(effective.height() / footprint.height())
            .max(1);
        let ctx = FitContext {
            requested: self.requested_dimension,
            effective,
            footprint,
            multiple,
        };
        let actual = self.policy.fit(&ctx);
        debug!(
            "fitting {} footprint into {} (effective {}): {}px per module, actual {}",
            footprint, self.requested_dimension, effective, multiple, actual
        );
        let bitmap = paint(matrix, multiple, actual)?;

        let old = self.module_size.replace(multiple);
        self.base.notify(PropertyChange::ModuleSize {
            old,
            new: Some(multiple),
        });
        let exceeds = self.exceeds(Some(actual));
        Ok(self.base.store(bitmap, exceeds))
    }

    fn set_requested_dimension(&mut self, dimension: Dimension) -> Result<()> {
        if dimension.width() < MIN_SIZE || dimension.height() < MIN_SIZE {
            return Err(RenderError::RequestedDimensionTooSmall {
                requested: dimension,
                minimum: Dimension::MIN,
            });
        }
        if dimension == self.requested_dimension {
            return Ok(());
        }
        let old = std::mem::replace(&mut self.requested_dimension, dimension);
        self.base.notify(PropertyChange::RequestedDimension {
            old,
            new: dimension,
        });
        self.reset_state();
        Ok(())
    }

    fn requested_dimension(&self) -> Result<Dimension> {
        Ok(self.requested_dimension)
    }

    fn set_module_size(&mut self, _module_size: u32) -> Result<()> {
        Err(RenderError::unsupported("set_module_size", MODE))
    }

    fn module_size(&self) -> Result<u32> {
        Err(RenderError::unsupported("module_size", MODE))
    }

    fn reset_state(&mut self) {
        let exceeds = self.exceeds(None);
        self.base.clear(exceeds);
    }

    fn base(&self) -> &BaseRenderer {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRenderer {
        &mut self.base
    }
}
