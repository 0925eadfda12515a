use gloo::render::{request_animation_frame, AnimationFrame};

use crate::animator::{FrameCallback, FrameScheduler};

/// `requestAnimationFrame`; dropping the handle calls `cancelAnimationFrame`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    type Handle = AnimationFrame;

    fn request_frame(&self, tick: FrameCallback) -> AnimationFrame {
        request_animation_frame(move |timestamp| tick(timestamp))
    }
}

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}
