//! A sketch assembled from a renderer, a resizer and an animator.
//!
//! The sketch owns its state explicitly instead of sharing free variables
//! between callbacks. Resize notifications and frames are not synchronized:
//! each frame reads the pixel size current at its start.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use log::info;

use crate::animator::{Animator, FrameScheduler};
use crate::clock::{Clock, Tick};
use crate::dimension::ResizerState;
use crate::error::Result;
use crate::resizer::{CanvasResizer, CanvasTarget, ResizeCallback, WindowHost};

/// What a renderer sees at the top of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tick: Tick,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Drawing capability; the visual algorithm lives behind this.
pub trait Renderer {
    /// Resize the backing surface and anything derived from it.
    fn resize(&mut self, pixel_width: u32, pixel_height: u32);

    fn draw(&mut self, frame: &Frame);
}

/// Sizing capability.
pub trait Resize {
    fn state(&self) -> ResizerState;
    fn set_on_resize(&mut self, callback: ResizeCallback);
    fn init(&mut self) -> Result<()>;
    fn destroy(&mut self);
}

impl<W: WindowHost, C: CanvasTarget> Resize for CanvasResizer<W, C> {
    fn state(&self) -> ResizerState {
        CanvasResizer::state(self)
    }

    fn set_on_resize(&mut self, callback: ResizeCallback) {
        CanvasResizer::set_on_resize(self, callback)
    }

    fn init(&mut self) -> Result<()> {
        CanvasResizer::init(self)
    }

    fn destroy(&mut self) {
        CanvasResizer::destroy(self)
    }
}

pub struct Sketch<R, Z, S: FrameScheduler> {
    renderer: Rc<RefCell<R>>,
    resizer: Z,
    animator: Animator<S>,
    disposed: bool,
}

impl<R, Z, S> Sketch<R, Z, S>
where
    R: Renderer + 'static,
    Z: Resize,
    S: FrameScheduler + 'static,
{
    pub fn new(renderer: R, mut resizer: Z, scheduler: S) -> Self {
        let (pixel_width, pixel_height) = resizer.state().pixel_size();
        let size = Rc::new(Cell::new((pixel_width, pixel_height)));
        let renderer = Rc::new(RefCell::new(renderer));
        renderer.borrow_mut().resize(pixel_width, pixel_height);

        resizer.set_on_resize({
            let renderer = Rc::downgrade(&renderer);
            let size = size.clone();
            Box::new(move |width, height| {
                size.set((width, height));
                if let Some(renderer) = renderer.upgrade() {
                    renderer.borrow_mut().resize(width, height);
                }
            })
        });

        let animator = {
            let renderer = Rc::downgrade(&renderer);
            let mut clock = Clock::new();
            Animator::new(scheduler, move |timestamp| {
                let (pixel_width, pixel_height) = size.get();
                let frame = Frame {
                    tick: clock.tick(timestamp),
                    pixel_width,
                    pixel_height,
                };
                if let Some(renderer) = renderer.upgrade() {
                    renderer.borrow_mut().draw(&frame);
                }
            })
        };

        Self {
            renderer,
            resizer,
            animator,
            disposed: false,
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.resizer.init()?;
        self.animator.start();
        info!("sketch started");
        Ok(())
    }

    pub fn stop(&self) {
        self.animator.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        self.renderer.borrow()
    }

    pub fn resizer(&self) -> &Z {
        &self.resizer
    }

    pub fn resizer_mut(&mut self) -> &mut Z {
        &mut self.resizer
    }

    pub fn animator(&self) -> &Animator<S> {
        &self.animator
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.animator.dispose();
        self.resizer.destroy();
        self.disposed = true;
        info!("sketch disposed");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::animator::ManualScheduler;

    #[derive(Default)]
    struct Recorder {
        sizes: Vec<(u32, u32)>,
        frames: Vec<Frame>,
    }

    impl Renderer for Recorder {
        fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
            self.sizes.push((pixel_width, pixel_height));
        }

        fn draw(&mut self, frame: &Frame) {
            self.frames.push(*frame);
        }
    }

    struct StubResizer {
        state: ResizerState,
        callback: Option<ResizeCallback>,
        inits: usize,
        destroys: usize,
    }

    impl StubResizer {
        fn new(width: u32, height: u32) -> Self {
            Self {
                state: ResizerState {
                    pixel_width: width,
                    pixel_height: height,
                    css_width: f64::from(width),
                    css_height: f64::from(height),
                },
                callback: None,
                inits: 0,
                destroys: 0,
            }
        }

        fn emit(&mut self, width: u32, height: u32) {
            if let Some(callback) = self.callback.as_mut() {
                callback(width, height);
            }
        }
    }

    impl Resize for StubResizer {
        fn state(&self) -> ResizerState {
            self.state
        }

        fn set_on_resize(&mut self, callback: ResizeCallback) {
            self.callback = Some(callback);
        }

        fn init(&mut self) -> Result<()> {
            self.inits += 1;
            Ok(())
        }

        fn destroy(&mut self) {
            self.destroys += 1;
        }
    }

    #[test]
    fn renderer_is_sized_before_the_first_frame() {
        let scheduler = ManualScheduler::new();
        let sketch = Sketch::new(Recorder::default(), StubResizer::new(320, 240), scheduler);
        assert_eq!(sketch.renderer().sizes, vec![(320, 240)]);
        assert!(sketch.renderer().frames.is_empty());
    }

    #[test]
    fn frames_see_the_latest_size() {
        let scheduler = ManualScheduler::new();
        let mut sketch =
            Sketch::new(Recorder::default(), StubResizer::new(320, 240), scheduler.clone());
        sketch.start().unwrap();
        assert_eq!(sketch.resizer().inits, 1);

        scheduler.advance(0.0);
        sketch.resizer_mut().emit(640, 480);
        scheduler.advance(16.0);

        let renderer = sketch.renderer();
        assert_eq!(renderer.sizes, vec![(320, 240), (640, 480)]);
        let seen: Vec<_> = renderer
            .frames
            .iter()
            .map(|f| (f.tick.frame, f.pixel_width, f.pixel_height, f.tick.delta_ms))
            .collect();
        assert_eq!(seen, vec![(0, 320, 240, 0.0), (1, 640, 480, 16.0)]);
    }

    #[test]
    fn dispose_tears_down_once() {
        let scheduler = ManualScheduler::new();
        let mut sketch =
            Sketch::new(Recorder::default(), StubResizer::new(10, 10), scheduler.clone());
        sketch.start().unwrap();
        sketch.dispose();
        sketch.dispose();

        assert_eq!(sketch.resizer().destroys, 1);
        assert!(!sketch.is_running());
        assert_eq!(scheduler.advance(16.0), 0);
    }
}
