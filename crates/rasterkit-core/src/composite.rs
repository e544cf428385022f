//! Alpha compositing of one raster onto another.
//!
//! The blend is straight-alpha over RGB only: source alpha weights the
//! color channels, but the destination alpha channel is never modified.
//! Downstream consumers rely on that non-accumulating behavior, so it is
//! kept rather than replaced with full "over" compositing.

use crate::error::Result;
use crate::raster::{Color, Raster, CHANNELS};
use crate::resize::{resize, Fit, Kernel};

/// Draw `src` onto `dst` with its top-left corner at (`left`, `top`).
///
/// Coordinates may be negative or beyond the destination; the paste window
/// is clipped on all four sides and the source read offset shifted to
/// match. A window fully outside the destination is a no-op.
///
/// When `size` is given and differs from the source extent, the source is
/// first bezier-stretched to that extent.
///
/// Per pixel: a fully opaque source copies its RGB verbatim, a fully
/// transparent source leaves the destination untouched, and anything in
/// between blends `round((src * a + dst * (255 - a)) / 255)` per RGB
/// channel. Destination alpha is preserved in all three cases.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidGeometry`] if `size` has a zero
/// dimension.
pub fn draw(
    dst: &mut Raster,
    src: &Raster,
    left: i64,
    top: i64,
    size: Option<(u32, u32)>,
) -> Result<()> {
    let resized;
    let src = match size {
        Some((w, h)) if w != src.width() || h != src.height() => {
            resized = resize(src, w, h, Kernel::Bezier, &Fit::Stretch)?;
            &resized
        }
        _ => src,
    };

    // Clip the paste window to the destination bounds.
    let mut width = src.width() as i64;
    let mut height = src.height() as i64;
    let mut src_left = 0i64;
    let mut src_top = 0i64;
    let mut left = left;
    let mut top = top;
    if left < 0 {
        width += left;
        src_left = -left;
        left = 0;
    }
    if top < 0 {
        height += top;
        src_top = -top;
        top = 0;
    }
    width = width.min(dst.width() as i64 - left);
    height = height.min(dst.height() as i64 - top);
    if width <= 0 || height <= 0 {
        return Ok(());
    }

    let src_bytes = src.as_bytes();
    let src_stride = src.width() as usize * CHANNELS;
    let dst_stride = dst.width() as usize * CHANNELS;
    let dst_bytes = dst.as_bytes_mut();

    for row in 0..height as usize {
        let mut src_pos = (src_top as usize + row) * src_stride + src_left as usize * CHANNELS;
        let mut dst_pos = (top as usize + row) * dst_stride + left as usize * CHANNELS;

        for _ in 0..width as usize {
            let alpha = src_bytes[src_pos + 3];
            match alpha {
                255 => {
                    // Opaque: copy RGB, leave destination alpha alone.
                    dst_bytes[dst_pos] = src_bytes[src_pos];
                    dst_bytes[dst_pos + 1] = src_bytes[src_pos + 1];
                    dst_bytes[dst_pos + 2] = src_bytes[src_pos + 2];
                }
                0 => {}
                a => {
                    let a = a as u32;
                    let na = 255 - a;
                    for k in 0..3 {
                        let s = src_bytes[src_pos + k] as u32;
                        let d = dst_bytes[dst_pos + k] as u32;
                        // Integer round-half-up of (s*a + d*(255-a)) / 255.
                        dst_bytes[dst_pos + k] = ((s * a + d * na + 127) / 255) as u8;
                    }
                }
            }
            src_pos += CHANNELS;
            dst_pos += CHANNELS;
        }
    }

    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn color_strategy() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(r, g, b, a)| Color::rgba(r, g, b, a))
    }

    proptest! {
        /// Compositing never touches the destination alpha channel.
        #[test]
        fn prop_destination_alpha_preserved(
            dst_color in color_strategy(),
            src_color in color_strategy(),
            left in -20i64..20,
            top in -20i64..20,
        ) {
            let mut dst = Raster::filled(16, 16, dst_color).unwrap();
            let src = Raster::filled(8, 8, src_color).unwrap();
            draw(&mut dst, &src, left, top, None).unwrap();

            for px in dst.as_bytes().chunks_exact(4) {
                prop_assert_eq!(px[3], dst_color.a);
            }
        }

        /// A fully transparent source never changes any destination byte.
        #[test]
        fn prop_transparent_source_noop(
            dst_color in color_strategy(),
            (r, g, b) in (any::<u8>(), any::<u8>(), any::<u8>()),
            left in -20i64..20,
            top in -20i64..20,
        ) {
            let mut dst = Raster::filled(16, 16, dst_color).unwrap();
            let before = dst.as_bytes().to_vec();
            let src = Raster::filled(8, 8, Color::rgba(r, g, b, 0)).unwrap();
            draw(&mut dst, &src, left, top, None).unwrap();
            prop_assert_eq!(dst.as_bytes(), &before[..]);
        }
    }
}
