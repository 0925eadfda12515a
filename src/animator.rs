//! Self-rescheduling per-frame loop.
//!
//! The loop owns at most one pending frame request. Each tick runs the
//! handler with the scheduler's timestamp and then requests the next frame,
//! so a panicking handler ends the loop instead of being retried. The loop
//! reports itself stopped while the handler runs; a handler that never
//! returns leaves it stopped and startable again.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};

pub type FrameCallback = Box<dyn FnOnce(f64)>;
pub type FrameHandler = Box<dyn FnMut(f64)>;

type SharedHandler = Rc<RefCell<FrameHandler>>;

/// Source of "run this before the next repaint" requests.
///
/// Dropping the returned handle cancels the request if it has not fired.
pub trait FrameScheduler {
    type Handle: 'static;

    fn request_frame(&self, tick: FrameCallback) -> Self::Handle;
}

struct Inner<S: FrameScheduler> {
    scheduler: S,
    handler: Option<SharedHandler>,
    pending: Option<S::Handle>,
    running: bool,
    /// Set while a handler runs; `stop` clears it so the tick does not resume.
    resume: bool,
    disposed: bool,
}

/// Handle to a frame loop. Clones drive the same loop.
pub struct Animator<S: FrameScheduler> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S: FrameScheduler> Clone for Animator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: FrameScheduler + 'static> Animator<S> {
    pub fn new(scheduler: S, handler: impl FnMut(f64) + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                scheduler,
                handler: Some(Rc::new(RefCell::new(Box::new(handler)))),
                pending: None,
                running: false,
                resume: false,
                disposed: false,
            })),
        }
    }

    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed || inner.running {
            return;
        }
        debug!("animator started");
        inner.running = true;
        request_next(&self.inner, &mut inner);
    }

    /// Cancels the next tick. A tick already running finishes normally.
    pub fn stop(&self) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.running {
                debug!("animator stopped");
            }
            inner.running = false;
            inner.resume = false;
            inner.pending.take()
        };
        drop(pending);
    }

    /// Stops the loop for good and drops the handler.
    pub fn dispose(&self) {
        self.stop();
        let handler = {
            let mut inner = self.inner.borrow_mut();
            inner.disposed = true;
            inner.handler.take()
        };
        drop(handler);
    }

    /// False while the handler itself is executing.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }
}

fn request_next<S: FrameScheduler + 'static>(cell: &Rc<RefCell<Inner<S>>>, inner: &mut Inner<S>) {
    let weak = Rc::downgrade(cell);
    let handle = inner.scheduler.request_frame(Box::new(move |timestamp| {
        if let Some(cell) = weak.upgrade() {
            tick(&cell, timestamp);
        }
    }));
    inner.pending = Some(handle);
}

fn tick<S: FrameScheduler + 'static>(cell: &Rc<RefCell<Inner<S>>>, timestamp: f64) {
    let (handler, fired) = {
        let mut inner = cell.borrow_mut();
        let fired = inner.pending.take();
        if !inner.running {
            return;
        }
        let Some(handler) = inner.handler.clone() else {
            return;
        };
        inner.running = false;
        inner.resume = true;
        (handler, fired)
    };
    drop(fired);

    // A handler that threw through JS never released its borrow.
    let Ok(mut run) = handler.try_borrow_mut() else {
        warn!("frame handler did not return from an earlier tick, loop stopped");
        cell.borrow_mut().resume = false;
        return;
    };
    // The handler may call back into this animator, so no borrow is held here.
    run(timestamp);
    drop(run);

    let mut inner = cell.borrow_mut();
    let resume = std::mem::replace(&mut inner.resume, false);
    if resume && !inner.disposed && inner.pending.is_none() {
        inner.running = true;
        request_next(cell, &mut inner);
    }
}

type Queue = RefCell<Vec<(u64, FrameCallback)>>;

/// Scheduler advanced by hand, for headless runs and tests.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<Queue>,
    next_id: Rc<Cell<u64>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<Queue>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            let removed: Vec<_> = {
                let mut queue = queue.borrow_mut();
                let (removed, kept) = queue.drain(..).partition(|(id, _)| *id == self.id);
                *queue = kept;
                removed
            };
            drop(removed);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fires every request queued so far with `timestamp`, returning how many
    /// ran. Requests made while firing wait for the next call.
    pub fn advance(&self, timestamp: f64) -> usize {
        let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn request_frame(&self, tick: FrameCallback) -> ManualHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push((id, tick));
        ManualHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}
