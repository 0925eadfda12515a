//! Binds a [`CanvasResizer`] to the window `resize` event.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use log::{debug, error};
use web_sys::HtmlCanvasElement;

use super::dom::{browser_window, DomCanvas, DomWindow};
use super::frame::now_ms;
use crate::config::ResizerOptions;
use crate::dimension::ResizerState;
use crate::error::Result;
use crate::resizer::{CanvasResizer, ResizeCallback, WindowHost};
use crate::sketch::Resize;
use crate::throttle::{Decision, Throttle};

type Core<W> = Rc<RefCell<CanvasResizer<W, DomCanvas>>>;

/// Shared between the resizer and its listener.
struct Wiring<W> {
    core: Weak<RefCell<CanvasResizer<W, DomCanvas>>>,
    throttle: Rc<RefCell<Throttle>>,
    trailing: Rc<RefCell<Option<Timeout>>>,
    /// Set by a `destroy` that ran while the core was busy in `on_resize`.
    teardown_pending: Rc<Cell<bool>>,
}

impl<W> Clone for Wiring<W> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            throttle: self.throttle.clone(),
            trailing: self.trailing.clone(),
            teardown_pending: self.teardown_pending.clone(),
        }
    }
}

/// Canvas resizer listening to the browser window.
///
/// The viewport comes from `W`; the `resize` event always comes from the real
/// window.
pub struct WebResizer<W: WindowHost + 'static = DomWindow> {
    core: Core<W>,
    throttle: Rc<RefCell<Throttle>>,
    trailing: Rc<RefCell<Option<Timeout>>>,
    teardown_pending: Rc<Cell<bool>>,
    listener: Option<EventListener>,
}

impl WebResizer<DomWindow> {
    pub fn new(canvas: Option<HtmlCanvasElement>, options: ResizerOptions) -> Result<Self> {
        Self::with_window(DomWindow::new()?, canvas, options)
    }
}

impl<W: WindowHost + 'static> WebResizer<W> {
    pub fn with_window(
        window: W,
        canvas: Option<HtmlCanvasElement>,
        options: ResizerOptions,
    ) -> Result<Self> {
        let throttle = Throttle::new(options.throttle_ms);
        let core = CanvasResizer::new(window, canvas.map(DomCanvas::new), options)?;
        Ok(Self {
            core: Rc::new(RefCell::new(core)),
            throttle: Rc::new(RefCell::new(throttle)),
            trailing: Rc::new(RefCell::new(None)),
            teardown_pending: Rc::new(Cell::new(false)),
            listener: None,
        })
    }

    pub fn state(&self) -> ResizerState {
        self.core.borrow().state()
    }

    pub fn is_destroyed(&self) -> bool {
        self.core
            .try_borrow()
            .map(|core| core.is_destroyed())
            .unwrap_or(self.teardown_pending.get())
    }

    pub fn set_on_resize(&mut self, callback: ResizeCallback) {
        self.core.borrow_mut().set_on_resize(callback);
    }

    pub fn attach(&mut self, canvas: HtmlCanvasElement) -> Result<()> {
        self.core.borrow_mut().attach(DomCanvas::new(canvas))
    }

    pub fn calculate_dimensions(&mut self) -> Result<ResizerState> {
        self.core.borrow_mut().calculate_dimensions()
    }

    pub fn init(&mut self) -> Result<()> {
        if self.listener.is_some() {
            return Ok(());
        }
        self.core.borrow_mut().init()?;

        let wiring = Wiring {
            core: Rc::downgrade(&self.core),
            throttle: self.throttle.clone(),
            trailing: self.trailing.clone(),
            teardown_pending: self.teardown_pending.clone(),
        };
        let window = browser_window()?;
        self.listener = Some(EventListener::new(&window, "resize", move |_| {
            on_resize_event(&wiring);
        }));
        Ok(())
    }

    /// Unbinds the listener and reverts the page layout.
    ///
    /// Called from inside the resize callback, the layout is reverted as soon
    /// as that callback returns.
    pub fn destroy(&mut self) {
        self.listener.take();
        self.trailing.borrow_mut().take();
        self.throttle.borrow_mut().reset();
        match self.core.try_borrow_mut() {
            Ok(mut core) => core.destroy(),
            Err(_) => {
                debug!("resizer busy in its callback, teardown deferred");
                self.teardown_pending.set(true);
            }
        }
    }
}

impl<W: WindowHost + 'static> Drop for WebResizer<W> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<W: WindowHost + 'static> Resize for WebResizer<W> {
    fn state(&self) -> ResizerState {
        WebResizer::state(self)
    }

    fn set_on_resize(&mut self, callback: ResizeCallback) {
        WebResizer::set_on_resize(self, callback)
    }

    fn init(&mut self) -> Result<()> {
        WebResizer::init(self)
    }

    fn destroy(&mut self) {
        WebResizer::destroy(self)
    }
}

fn on_resize_event<W: WindowHost + 'static>(wiring: &Wiring<W>) {
    let decision = wiring.throttle.borrow_mut().request(now_ms());
    match decision {
        Decision::Run => recalculate(wiring),
        Decision::RunAfter(delay_ms) => {
            let deferred = wiring.clone();
            let timeout = Timeout::new(delay_ms.ceil() as u32, move || {
                deferred.throttle.borrow_mut().complete_trailing(now_ms());
                recalculate(&deferred);
            });
            *wiring.trailing.borrow_mut() = Some(timeout);
        }
        Decision::Skip => {}
    }
}

fn recalculate<W: WindowHost + 'static>(wiring: &Wiring<W>) {
    let Some(core) = wiring.core.upgrade() else {
        return;
    };
    let result = core.borrow_mut().on_window_resize();
    if let Err(err) = result {
        error!("resize failed: {err}");
    }
    if wiring.teardown_pending.replace(false) {
        core.borrow_mut().destroy();
    }
}
