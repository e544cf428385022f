//! Raster resizing under a fit policy.
//!
//! A resize maps the source onto an arbitrary destination extent through
//! one of five interpolation kernels, reconciling mismatched aspect ratios
//! with a [`Fit`] policy:
//!
//! 1. The fit policy resolves a source crop window and a destination
//!    bounds window.
//! 2. Pad margins outside the bounds window are filled first.
//! 3. A two-pass separable resampler writes the bounds window, switching
//!    to a box-filtered variant when the shrink factor exceeds ~2x.

mod fit;
mod kernel;
mod separable;

pub use fit::{Fit, Gravity};
pub use kernel::Kernel;

use crate::error::{Error, Result};
use crate::raster::{Color, Raster};

/// Resize `src` to exactly `width x height`.
///
/// The output always has the requested extent; the fit policy decides how
/// the source content is placed inside it. The source is never mutated.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] if either dimension is zero. The
/// check runs before any allocation.
pub fn resize(src: &Raster, width: u32, height: u32, kernel: Kernel, fit: &Fit) -> Result<Raster> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidGeometry { width, height });
    }

    let windows = fit::resolve_windows(src.width(), src.height(), width, height, fit);
    let pad = match fit {
        Fit::Pad(color) => *color,
        _ => Color::TRANSPARENT,
    };

    let mut dst = Raster::new(width, height)?;
    separable::resample(src, &mut dst, kernel, windows.crop, windows.bounds, pad);
    Ok(dst)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=48, 1u32..=48)
    }

    fn kernel_strategy() -> impl Strategy<Value = Kernel> {
        prop::sample::select(Kernel::ALL.to_vec())
    }

    fn color_strategy() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(r, g, b, a)| Color::rgba(r, g, b, a))
    }

    proptest! {
        /// The output extent always equals the request, whatever the fit.
        #[test]
        fn prop_output_matches_requested_extent(
            (src_w, src_h) in dimensions_strategy(),
            (dst_w, dst_h) in dimensions_strategy(),
            kernel in kernel_strategy(),
        ) {
            let src = Raster::filled(src_w, src_h, Color::WHITE).unwrap();
            for fit in [
                Fit::Stretch,
                Fit::Pad(Color::RED),
                Fit::Crop(Gravity::CENTER),
            ] {
                let out = resize(&src, dst_w, dst_h, kernel, &fit).unwrap();
                prop_assert_eq!(out.width(), dst_w);
                prop_assert_eq!(out.height(), dst_h);
                prop_assert_eq!(
                    out.as_bytes().len(),
                    dst_w as usize * dst_h as usize * 4
                );
            }
        }

        /// Any resize of a solid raster stays solid inside the bounds
        /// window; with stretch fit that is the whole destination.
        #[test]
        fn prop_stretch_preserves_solid_color(
            (src_w, src_h) in dimensions_strategy(),
            (dst_w, dst_h) in dimensions_strategy(),
            kernel in kernel_strategy(),
            color in color_strategy(),
        ) {
            let src = Raster::filled(src_w, src_h, color).unwrap();
            let out = resize(&src, dst_w, dst_h, kernel, &Fit::Stretch).unwrap();
            for y in 0..dst_h {
                for x in 0..dst_w {
                    prop_assert_eq!(out.get_pixel(x, y), color);
                }
            }
        }

        /// Identity law: resizing to the source extent is pixel-exact.
        #[test]
        fn prop_identity_resize(
            (src_w, src_h) in dimensions_strategy(),
            kernel in kernel_strategy(),
            seed in any::<u64>(),
        ) {
            let mut src = Raster::new(src_w, src_h).unwrap();
            let mut state = seed | 1;
            for y in 0..src_h {
                for x in 0..src_w {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    let b = state.to_le_bytes();
                    src.set_pixel(x, y, Color::rgba(b[0], b[1], b[2], b[3]));
                }
            }
            let out = resize(&src, src_w, src_h, kernel, &Fit::Stretch).unwrap();
            prop_assert_eq!(out, src);
        }
    }
}
