//! Keeps a canvas sized according to a [`SizingPolicy`].
//!
//! The resizer only talks to the page through [`WindowHost`] and
//! [`CanvasTarget`], so the browser bindings and headless tests drive the
//! same code. Binding the window `resize` event (and throttling it) is left to
//! the owner, which calls [`CanvasResizer::on_window_resize`].

use log::{debug, info, warn};

use crate::config::ResizerOptions;
use crate::dimension::{self, ResizerState, SizingPolicy, Viewport};
use crate::error::{Error, Result};

pub type ResizeCallback = Box<dyn FnMut(u32, u32)>;

pub trait WindowHost {
    fn viewport(&self) -> Viewport;

    /// Hides document scrollbars, remembering what was there before.
    fn lock_scroll(&mut self) -> Result<()>;

    /// Restores whatever `lock_scroll` replaced.
    fn unlock_scroll(&mut self) -> Result<()>;
}

pub trait CanvasTarget {
    fn set_css_size(&mut self, width: f64, height: f64) -> Result<()>;

    /// Centers the canvas inside its parent and gives it a drop shadow.
    fn frame(&mut self) -> Result<()>;

    fn unframe(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Initialized,
    Destroyed,
}

/// What a call to [`CanvasResizer::on_window_resize`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeOutcome {
    pub pixels_changed: bool,
    pub css_changed: bool,
}

pub struct CanvasResizer<W, C> {
    window: W,
    canvas: Option<C>,
    options: ResizerOptions,
    state: ResizerState,
    on_resize: Option<ResizeCallback>,
    phase: Phase,
}

impl<W: WindowHost, C: CanvasTarget> CanvasResizer<W, C> {
    /// Fails if `options` names an unknown dimension or a bad scale factor.
    pub fn new(window: W, canvas: Option<C>, options: ResizerOptions) -> Result<Self> {
        let mut resizer = Self {
            window,
            canvas,
            options,
            state: ResizerState::default(),
            on_resize: None,
            phase: Phase::Created,
        };
        resizer.calculate_dimensions()?;
        Ok(resizer)
    }

    pub fn with_on_resize(mut self, callback: impl FnMut(u32, u32) + 'static) -> Self {
        self.on_resize = Some(Box::new(callback));
        self
    }

    pub fn set_on_resize(&mut self, callback: ResizeCallback) {
        self.on_resize = Some(callback);
    }

    pub fn options(&self) -> &ResizerOptions {
        &self.options
    }

    pub fn policy(&self) -> Result<SizingPolicy> {
        self.options.policy()
    }

    pub fn state(&self) -> ResizerState {
        self.state
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == Phase::Initialized
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    /// Recomputes the state from the current viewport.
    pub fn calculate_dimensions(&mut self) -> Result<ResizerState> {
        let policy = self.options.policy()?;
        let scale_factor = self.options.dimension_scale_factor;
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            return Err(Error::InvalidScaleFactor(scale_factor));
        }
        self.state = dimension::calculate(
            policy,
            self.window.viewport(),
            scale_factor,
            self.options.padding_px,
        );
        Ok(self.state)
    }

    pub fn init(&mut self) -> Result<()> {
        if self.phase != Phase::Created {
            warn!("canvas resizer initialized twice or after destroy");
            return Ok(());
        }
        if self.options.policy()?.is_fullscreen() {
            self.window.lock_scroll()?;
        }
        self.phase = Phase::Initialized;
        self.layout_canvas()?;
        info!(
            "canvas resizer ready: {}x{} px, {}x{} css",
            self.state.pixel_width, self.state.pixel_height, self.state.css_width, self.state.css_height
        );
        Ok(())
    }

    /// Supplies the canvas when it was not available at construction.
    pub fn attach(&mut self, canvas: C) -> Result<()> {
        if let Some(mut previous) = self.canvas.replace(canvas) {
            if self.is_initialized() && !self.options.policy()?.is_fullscreen() {
                previous.unframe()?;
            }
        }
        if self.is_initialized() {
            self.layout_canvas()?;
        }
        Ok(())
    }

    fn layout_canvas(&mut self) -> Result<()> {
        let fixed = !self.options.policy()?.is_fullscreen();
        let (css_width, css_height) = self.state.css_size();
        if let Some(canvas) = self.canvas.as_mut() {
            if fixed {
                canvas.frame()?;
            }
            canvas.set_css_size(css_width, css_height)?;
        }
        Ok(())
    }

    pub fn on_window_resize(&mut self) -> Result<ResizeOutcome> {
        if self.is_destroyed() {
            return Ok(ResizeOutcome::default());
        }
        let previous = self.state;
        let current = self.calculate_dimensions()?;
        let outcome = ResizeOutcome {
            pixels_changed: previous.pixel_size() != current.pixel_size(),
            css_changed: previous.css_size() != current.css_size(),
        };

        if outcome.pixels_changed {
            debug!(
                "pixel size {:?} -> {:?}",
                previous.pixel_size(),
                current.pixel_size()
            );
            if let Some(callback) = self.on_resize.as_mut() {
                callback(current.pixel_width, current.pixel_height);
            }
        }
        if outcome.css_changed {
            if let Some(canvas) = self.canvas.as_mut() {
                canvas.set_css_size(current.css_width, current.css_height)?;
            }
        }
        Ok(outcome)
    }

    /// Reverts layout changes and releases the canvas. Safe to repeat.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        if self.is_initialized() {
            match self.options.policy() {
                Ok(SizingPolicy::Fullscreen) => {
                    if let Err(err) = self.window.unlock_scroll() {
                        warn!("failed to restore document overflow: {err}");
                    }
                }
                Ok(SizingPolicy::Fixed { .. }) => {
                    if let Some(canvas) = self.canvas.as_mut() {
                        if let Err(err) = canvas.unframe() {
                            warn!("failed to clear canvas framing: {err}");
                        }
                    }
                }
                Err(_) => {}
            }
        }
        self.canvas = None;
        self.on_resize = None;
        self.phase = Phase::Destroyed;
        info!("canvas resizer destroyed");
    }
}
