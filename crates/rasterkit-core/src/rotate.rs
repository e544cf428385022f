//! Raster rotation by an arbitrary angle.
//!
//! Rotation uses inverse mapping: every destination pixel is translated to
//! center-relative coordinates, rotated back by the negated angle, and
//! bilinearly sampled from the source lattice. Neighbors that fall outside
//! the source contribute the pad color per channel, so edges blend cleanly
//! into the padding instead of smearing.
//!
//! The destination extent depends on the fit mode: keep the source extent,
//! take a caller-supplied one, grow to the rotated bounding box so nothing
//! clips, or scale the source extent so the content covers the whole
//! frame.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::{Color, Raster, CHANNELS};

/// Angles below this are treated as no rotation.
const ANGLE_EPSILON: f64 = 1e-9;

/// Destination sizing policy for a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotateFit {
    /// Destination extent equals the source extent; corners get padded.
    #[default]
    Same,
    /// Axis-aligned bounding box of the rotated source: never clips.
    Pad,
    /// Source extent scaled by the largest normalized corner distance, so
    /// the aspect ratio is kept while nothing clips.
    Crop,
    /// Caller-specified extent.
    Custom { width: u32, height: u32 },
}

/// Rotate `src` by `radians` about its center.
///
/// Positive angles rotate counter-clockwise on screen. Pixels with no
/// source coverage receive `pad`. An angle smaller than a tiny epsilon
/// returns an identity copy at the source extent.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] for a zero custom dimension.
pub fn rotate(src: &Raster, radians: f64, fit: RotateFit, pad: Color) -> Result<Raster> {
    let (dst_w, dst_h) = match fit {
        RotateFit::Same => (src.width(), src.height()),
        RotateFit::Pad => rotated_bounds(src.width(), src.height(), radians),
        RotateFit::Crop => covering_extent(src.width(), src.height(), radians),
        RotateFit::Custom { width, height } => {
            if width == 0 || height == 0 {
                return Err(Error::InvalidGeometry { width, height });
            }
            (width, height)
        }
    };

    // Identity fast path. Pad and Crop extents reduce to the source extent
    // at angle zero, so this covers everything but a differing Custom size.
    if radians.abs() < ANGLE_EPSILON && dst_w == src.width() && dst_h == src.height() {
        return Ok(src.clone());
    }

    let mut dst = Raster::new(dst_w, dst_h)?;

    let (sin, cos) = radians.sin_cos();
    let src_w = src.width() as f64;
    let src_h = src.height() as f64;
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    for i in 0..dst_h {
        for j in 0..dst_w {
            // Inverse-rotate the destination point into source pixel space.
            let dx = j as f64 - dst_cx;
            let dy = i as f64 - dst_cy;
            let x = dx * cos - dy * sin + src_cx;
            let y = dx * sin + dy * cos + src_cy;

            let color = if x > -1.0 && x < src_w && y > -1.0 && y < src_h {
                sample_bilinear_padded(src, x, y, pad)
            } else {
                pad
            };
            dst.set_pixel(j, i, color);
        }
    }

    Ok(dst)
}

/// Axis-aligned bounding box of the four source corners rotated about the
/// center. Guarantees no clipping.
pub fn rotated_bounds(width: u32, height: u32, radians: f64) -> (u32, u32) {
    let (max_x, max_y) = rotated_corner_extents(width, height, radians);
    (
        ((2.0 * max_x).round() as u32).max(1),
        ((2.0 * max_y).round() as u32).max(1),
    )
}

/// Source extent scaled by the largest per-axis normalized distance of a
/// rotated corner from the center. Keeps the source aspect ratio while
/// still containing every rotated source pixel.
fn covering_extent(width: u32, height: u32, radians: f64) -> (u32, u32) {
    let (max_x, max_y) = rotated_corner_extents(width, height, radians);
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    let d = (max_x / half_w).max(max_y / half_h);
    (
        ((width as f64 * d).round() as u32).max(1),
        ((height as f64 * d).round() as u32).max(1),
    )
}

/// Largest |x| and |y| over the four center-relative corners after forward
/// rotation.
fn rotated_corner_extents(width: u32, height: u32, radians: f64) -> (f64, f64) {
    let (sin, cos) = radians.sin_cos();
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;

    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for (x, y) in [(half_w, half_h), (half_w, -half_h)] {
        // The forward transform is the inverse of the sampling transform.
        let rx = x * cos + y * sin;
        let ry = -x * sin + y * cos;
        max_x = max_x.max(rx.abs());
        max_y = max_y.max(ry.abs());
    }
    (max_x, max_y)
}

/// Bilinear sample on the integer lattice, substituting the pad color for
/// any neighbor outside the source. Weights are the fractional parts of
/// the coordinates.
fn sample_bilinear_padded(src: &Raster, x: f64, y: f64, pad: Color) -> Color {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let x0 = x0 as i64;
    let y0 = y0 as i64;

    let w = src.width() as i64;
    let h = src.height() as i64;
    let bytes = src.as_bytes();

    let fetch = |px: i64, py: i64, k: usize| -> f64 {
        if px >= 0 && px < w && py >= 0 && py < h {
            bytes[(py as usize * w as usize + px as usize) * CHANNELS + k] as f64
        } else {
            pad.channel(k) as f64
        }
    };

    let mut out = [0u8; CHANNELS];
    for (k, slot) in out.iter_mut().enumerate() {
        let v00 = fetch(x0, y0, k);
        let v10 = fetch(x0 + 1, y0, k);
        let v01 = fetch(x0, y0 + 1, k);
        let v11 = fetch(x0 + 1, y0 + 1, k);
        let v = v00 * (1.0 - fx) * (1.0 - fy)
            + v10 * fx * (1.0 - fy)
            + v01 * (1.0 - fx) * fy
            + v11 * fx * fy;
        *slot = v.round().clamp(0.0, 255.0) as u8;
    }
    Color::rgba(out[0], out[1], out[2], out[3])
}
