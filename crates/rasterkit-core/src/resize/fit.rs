//! Fit policy resolution.
//!
//! A resize is described by two windows: a crop window (the sub-rectangle of
//! the source actually read) and a bounds window (the sub-rectangle of the
//! destination actually written). Everything outside the bounds window is
//! pad. The fit policy decides both windows from the source and destination
//! extents:
//!
//! - **Stretch** ignores aspect ratio: full source to full destination.
//! - **Pad** preserves the source aspect: the scaled content is centered on
//!   the destination and the margins (split floor/ceil) receive the pad
//!   color.
//! - **Crop** preserves the destination aspect: a matching source
//!   sub-rectangle is selected and positioned by gravity.

use serde::{Deserialize, Serialize};

use crate::raster::{Color, Rect};

/// Anchor for crop-fit content selection, each axis in `[0, 1]`.
///
/// 0 keeps the top/left edge, 1 the bottom/right edge, 0.5 the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    pub x: f64,
    pub y: f64,
}

impl Gravity {
    pub const CENTER: Gravity = Gravity { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::CENTER
    }
}

/// Strategy for reconciling the source aspect ratio with a
/// differently-shaped destination.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Fit {
    /// Scale each axis independently; aspect is ignored.
    #[default]
    Stretch,
    /// Preserve source aspect; margins are filled with the given color.
    Pad(Color),
    /// Preserve destination aspect; excess source is cut, anchored by
    /// gravity.
    Crop(Gravity),
}

/// The resolved source crop window and destination bounds window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Windows {
    pub crop: Rect,
    pub bounds: Rect,
}

/// Resolve the crop and bounds windows for a resize.
///
/// A scaled dimension that matches the destination exactly degenerates that
/// axis to stretch: no pad margin, no cropped band.
pub(crate) fn resolve_windows(
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    fit: &Fit,
) -> Windows {
    let full_src = Rect::new(0, 0, src_w, src_h);
    let full_dst = Rect::new(0, 0, dst_w, dst_h);
    match fit {
        Fit::Stretch => Windows {
            crop: full_src,
            bounds: full_dst,
        },
        Fit::Pad(_) => Windows {
            crop: full_src,
            bounds: pad_bounds(src_w, src_h, dst_w, dst_h),
        },
        Fit::Crop(gravity) => Windows {
            crop: crop_window(src_w, src_h, dst_w, dst_h, *gravity),
            bounds: full_dst,
        },
    }
}

/// Destination bounds for pad fit: the largest source-aspect rectangle that
/// fits the destination, centered.
fn pad_bounds(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Rect {
    let aspect = src_w as f64 / src_h as f64;

    // Extreme aspect combinations can round a window extent to zero; the
    // content band always keeps at least one pixel.
    let w2 = ((aspect * dst_h as f64).round() as u32).max(1);
    if w2 < dst_w {
        // Content is narrower than the destination: pad left and right.
        let left = (dst_w - w2) / 2;
        return Rect::new(left, 0, w2, dst_h);
    }
    let h2 = ((dst_w as f64 / aspect).round() as u32).max(1);
    if h2 < dst_h {
        // Content is shorter than the destination: pad top and bottom.
        let top = (dst_h - h2) / 2;
        return Rect::new(0, top, dst_w, h2);
    }
    // Aspect ratios match exactly.
    Rect::new(0, 0, dst_w, dst_h)
}

/// Source crop window for crop fit: the largest destination-aspect
/// rectangle inside the source, anchored by gravity.
fn crop_window(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, gravity: Gravity) -> Rect {
    let aspect = dst_w as f64 / dst_h as f64;

    let w2 = ((src_h as f64 * aspect).round() as u32).max(1);
    if w2 < src_w {
        // Cut the sides.
        let left = (gravity.x * (src_w - w2) as f64).round() as u32;
        return Rect::new(left, 0, w2, src_h);
    }
    let h2 = ((src_w as f64 / aspect).round() as u32).max(1);
    if h2 < src_h {
        // Cut top and bottom.
        let top = (gravity.y * (src_h - h2) as f64).round() as u32;
        return Rect::new(0, top, src_w, h2);
    }
    Rect::new(0, 0, src_w, src_h)
}
