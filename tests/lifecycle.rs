//! Resizer and animator lifecycles driven against a simulated page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sketch_runtime::{
    Animator, CanvasResizer, CanvasTarget, Dimension, Frame, ManualScheduler, Renderer,
    ResizerOptions, ResizerState, Result, Sketch, Viewport, WindowHost,
};

#[derive(Clone)]
struct SimWindow {
    viewport: Rc<Cell<Viewport>>,
    overflow_hidden: Rc<Cell<bool>>,
}

impl SimWindow {
    fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Rc::new(Cell::new(Viewport::new(width, height))),
            overflow_hidden: Rc::new(Cell::new(false)),
        }
    }

    fn resize_to(&self, width: f64, height: f64) {
        self.viewport.set(Viewport::new(width, height));
    }
}

impl WindowHost for SimWindow {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn lock_scroll(&mut self) -> Result<()> {
        self.overflow_hidden.set(true);
        Ok(())
    }

    fn unlock_scroll(&mut self) -> Result<()> {
        self.overflow_hidden.set(false);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SimCanvas {
    css: Rc<RefCell<Vec<(f64, f64)>>>,
}

impl CanvasTarget for SimCanvas {
    fn set_css_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.css.borrow_mut().push((width, height));
        Ok(())
    }

    fn frame(&mut self) -> Result<()> {
        Ok(())
    }

    fn unframe(&mut self) -> Result<()> {
        Ok(())
    }
}

fn counting_callback() -> (Rc<RefCell<Vec<(u32, u32)>>>, impl FnMut(u32, u32) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let recorded = calls.clone();
    (calls, move |w, h| recorded.borrow_mut().push((w, h)))
}

#[test]
fn square_canvas_in_landscape_viewport() {
    let window = SimWindow::new(1200.0, 800.0);
    let options = ResizerOptions::default()
        .with_dimension(Dimension::fixed(1080.0, 1080.0))
        .with_scale_factor(2.0)
        .with_padding_px(50.0);
    let resizer = CanvasResizer::new(window, Some(SimCanvas::default()), options).unwrap();

    assert_eq!(
        resizer.state(),
        ResizerState {
            pixel_width: 2160,
            pixel_height: 2160,
            css_width: 700.0,
            css_height: 700.0,
        }
    );
}

#[test]
fn options_from_json_build_the_same_resizer() {
    let options = ResizerOptions::from_json(
        r#"{"dimension": [1080, 1080], "dimensionScaleFactor": 2, "paddingPx": 50, "title": "x"}"#,
    )
    .unwrap();
    let resizer =
        CanvasResizer::new(SimWindow::new(1200.0, 800.0), Some(SimCanvas::default()), options)
            .unwrap();
    assert_eq!(resizer.state().pixel_size(), (2160, 2160));
    assert_eq!(resizer.state().css_size(), (700.0, 700.0));
}

#[test]
fn recalculating_without_viewport_change_is_stable() {
    let window = SimWindow::new(1024.0, 768.0);
    let mut resizer =
        CanvasResizer::new(window, Some(SimCanvas::default()), ResizerOptions::default()).unwrap();
    let first = resizer.calculate_dimensions().unwrap();
    let second = resizer.calculate_dimensions().unwrap();
    assert_eq!(first, second);
}

#[test]
fn on_resize_fires_once_per_actual_change() {
    let window = SimWindow::new(800.0, 600.0);
    let canvas = SimCanvas::default();
    let (calls, callback) = counting_callback();
    let mut resizer = CanvasResizer::new(window.clone(), Some(canvas.clone()), ResizerOptions::default())
        .unwrap()
        .with_on_resize(callback);
    resizer.init().unwrap();
    assert!(window.overflow_hidden.get());

    window.resize_to(1024.0, 768.0);
    let first = resizer.on_window_resize().unwrap();
    let second = resizer.on_window_resize().unwrap();

    assert!(first.pixels_changed && first.css_changed);
    assert!(!second.pixels_changed && !second.css_changed);
    assert_eq!(*calls.borrow(), vec![(1024, 768)]);
    assert_eq!(*canvas.css.borrow(), vec![(800.0, 600.0), (1024.0, 768.0)]);
}

#[test]
fn unchanged_viewport_never_fires() {
    let window = SimWindow::new(800.0, 600.0);
    let (calls, callback) = counting_callback();
    let mut resizer =
        CanvasResizer::new(window, Some(SimCanvas::default()), ResizerOptions::default())
            .unwrap()
            .with_on_resize(callback);
    resizer.init().unwrap();
    resizer.on_window_resize().unwrap();
    resizer.on_window_resize().unwrap();
    assert!(calls.borrow().is_empty());
}

#[test]
fn destroy_twice_is_safe() {
    let window = SimWindow::new(800.0, 600.0);
    let mut resizer =
        CanvasResizer::new(window.clone(), Some(SimCanvas::default()), ResizerOptions::default())
            .unwrap();
    resizer.init().unwrap();
    resizer.destroy();
    resizer.destroy();
    assert!(!window.overflow_hidden.get());
}

#[test]
fn animator_runs_in_order_and_stops() {
    let scheduler = ManualScheduler::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let animator = {
        let seen = seen.clone();
        Animator::new(scheduler.clone(), move |t| seen.borrow_mut().push(t))
    };
    animator.start();

    scheduler.advance(16.0);
    scheduler.advance(33.0);
    animator.stop();
    scheduler.advance(50.0);
    scheduler.advance(66.0);

    assert_eq!(*seen.borrow(), vec![16.0, 33.0]);
}

#[test]
fn animator_three_frames_three_calls() {
    let scheduler = ManualScheduler::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let animator = {
        let seen = seen.clone();
        Animator::new(scheduler.clone(), move |t| seen.borrow_mut().push(t))
    };
    animator.start();
    for t in [10.0, 26.0, 26.0] {
        assert_eq!(scheduler.advance(t), 1);
    }
    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn animator_dispose_twice_is_safe() {
    let scheduler = ManualScheduler::new();
    let animator = Animator::new(scheduler.clone(), |_| {});
    animator.start();
    animator.dispose();
    animator.dispose();
    assert_eq!(scheduler.pending(), 0);
}

#[derive(Default)]
struct Probe {
    sizes: Vec<(u32, u32)>,
    frames: Vec<(u32, u32)>,
}

impl Renderer for Probe {
    fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
        self.sizes.push((pixel_width, pixel_height));
    }

    fn draw(&mut self, frame: &Frame) {
        self.frames.push((frame.pixel_width, frame.pixel_height));
    }
}

#[test]
fn sketch_follows_window_resizes_between_frames() {
    let window = SimWindow::new(640.0, 480.0);
    let scheduler = ManualScheduler::new();
    let resizer = CanvasResizer::new(
        window.clone(),
        Some(SimCanvas::default()),
        ResizerOptions::default().with_scale_factor(2.0),
    )
    .unwrap();
    let mut sketch = Sketch::new(Probe::default(), resizer, scheduler.clone());
    sketch.start().unwrap();

    scheduler.advance(0.0);
    window.resize_to(320.0, 240.0);
    sketch.resizer_mut().on_window_resize().unwrap();
    scheduler.advance(16.0);

    assert_eq!(sketch.renderer().sizes, vec![(1280, 960), (640, 480)]);
    assert_eq!(sketch.renderer().frames, vec![(1280, 960), (640, 480)]);

    sketch.dispose();
    assert!(!window.overflow_hidden.get());
    assert_eq!(scheduler.advance(32.0), 0);
}
