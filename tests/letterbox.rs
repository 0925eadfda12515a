//! Letterboxing properties of the dimension calculation over a grid of
//! viewports and canvas shapes.

use sketch_runtime::dimension::calculate;
use sketch_runtime::{SizingPolicy, Viewport};

const PADDING: f64 = 50.0;

const VIEWPORTS: [(f64, f64); 6] = [
    (1920.0, 1080.0), // wide
    (1080.0, 1920.0), // tall
    (1200.0, 800.0),
    (800.0, 800.0),
    (375.0, 667.0),
    (2560.0, 1440.0),
];

const CANVASES: [(f64, f64); 5] = [
    (1080.0, 1080.0),
    (1920.0, 1080.0),
    (1080.0, 1920.0),
    (400.0, 300.0),
    (3.0, 1.0),
];

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

#[test]
fn fixed_policy_preserves_aspect_ratio() {
    for &(w, h) in &CANVASES {
        for &(vw, vh) in &VIEWPORTS {
            let state = calculate(SizingPolicy::Fixed { width: w, height: h }, Viewport::new(vw, vh), 1.0, PADDING);
            assert!(
                approx_eq(state.css_width / state.css_height, w / h, 1e-9),
                "canvas {w}x{h} in {vw}x{vh}: css {}x{}",
                state.css_width,
                state.css_height
            );
        }
    }
}

#[test]
fn fixed_policy_fits_inside_padded_viewport() {
    for &(w, h) in &CANVASES {
        for &(vw, vh) in &VIEWPORTS {
            let state = calculate(SizingPolicy::Fixed { width: w, height: h }, Viewport::new(vw, vh), 1.0, PADDING);
            let (cw, ch) = (vw - 2.0 * PADDING, vh - 2.0 * PADDING);
            assert!(state.css_width <= cw + 1e-9, "width overflow for {w}x{h} in {vw}x{vh}");
            assert!(state.css_height <= ch + 1e-9, "height overflow for {w}x{h} in {vw}x{vh}");
            assert!(
                approx_eq(state.css_width, cw, 1e-9) || approx_eq(state.css_height, ch, 1e-9),
                "no binding axis for {w}x{h} in {vw}x{vh}"
            );
        }
    }
}

#[test]
fn scale_factor_only_touches_pixels() {
    let policies = [
        SizingPolicy::Fullscreen,
        SizingPolicy::Fixed { width: 1080.0, height: 1080.0 },
        SizingPolicy::Fixed { width: 640.0, height: 360.0 },
    ];
    for policy in policies {
        for &(vw, vh) in &VIEWPORTS {
            let viewport = Viewport::new(vw, vh);
            let base = calculate(policy, viewport, 1.0, PADDING);
            let doubled = calculate(policy, viewport, 2.0, PADDING);
            assert_eq!(base.css_size(), doubled.css_size(), "{policy:?} in {vw}x{vh}");
            assert_eq!(doubled.pixel_width, base.pixel_width * 2);
            assert_eq!(doubled.pixel_height, base.pixel_height * 2);
        }
    }
}

#[test]
fn calculation_is_idempotent() {
    for &(w, h) in &CANVASES {
        for &(vw, vh) in &VIEWPORTS {
            let policy = SizingPolicy::Fixed { width: w, height: h };
            let viewport = Viewport::new(vw, vh);
            let first = calculate(policy, viewport, 1.5, PADDING);
            let second = calculate(policy, viewport, 1.5, PADDING);
            assert_eq!(first.css_width.to_bits(), second.css_width.to_bits());
            assert_eq!(first.css_height.to_bits(), second.css_height.to_bits());
            assert_eq!(first.pixel_size(), second.pixel_size());
        }
    }
}
