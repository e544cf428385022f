//! Two-pass separable resampling.
//!
//! A 2D resize runs as two independent 1D passes: rows are interpolated
//! into an intermediate buffer first, then columns. Channels are
//! interpolated independently; there is no cross-channel coupling.
//!
//! When the destination is smaller than about half the crop window on an
//! axis, the passes run at an integer multiple of the destination extent
//! and a final box-average reduces each block to one pixel. Point sampling
//! alone would alias badly on aggressive shrinks.

use crate::raster::{Color, Raster, Rect, CHANNELS};

use super::kernel::Kernel;

/// Resample the crop window of `src` into the bounds window of `dst`,
/// padding everything outside the bounds window first.
pub(crate) fn resample(
    src: &Raster,
    dst: &mut Raster,
    kernel: Kernel,
    crop: Rect,
    bounds: Rect,
    pad: Color,
) {
    fill_border(dst, bounds, pad);

    let cw = crop.width as usize;
    let ch = crop.height as usize;
    let bw = bounds.width as usize;
    let bh = bounds.height as usize;

    // Shrink factors past ~2x widen the intermediate extents; the widened
    // result is box-reduced in the final pass.
    let w_factor = (cw / bw).max(1);
    let h_factor = (ch / bh).max(1);
    let iw = bw * w_factor;
    let ih = bh * h_factor;
    let direct = w_factor * h_factor == 1;

    // Pass 1: rows. One interpolated row per source row in the crop window.
    let src_bytes = src.as_bytes();
    let mut rows = vec![0u8; iw * ch * CHANNELS];
    for r in 0..ch {
        for j in 0..iw {
            let x = map(j, iw, cw);
            let xi = x as usize;
            let t = x - xi as f64;
            let p0 = src.offset(crop.left + xi as u32, crop.top + r as u32);
            let out = (r * iw + j) * CHANNELS;
            for k in 0..CHANNELS {
                let (x0, x1, x2, x3) = gather(src_bytes, p0 + k, CHANNELS, xi, cw);
                rows[out + k] = kernel.interpolate(x0, x1, x2, x3, t);
            }
        }
    }

    // Pass 2: columns over the intermediate rows. With no box reduction
    // pending, results land straight in the destination window.
    let mut cols = vec![0u8; if direct { 0 } else { iw * ih * CHANNELS }];
    for i in 0..ih {
        let y = map(i, ih, ch);
        let yi = y as usize;
        let t = y - yi as f64;
        for j in 0..iw {
            let p0 = (yi * iw + j) * CHANNELS;
            for k in 0..CHANNELS {
                let (x0, x1, x2, x3) = gather(&rows, p0 + k, iw * CHANNELS, yi, ch);
                let v = kernel.interpolate(x0, x1, x2, x3, t);
                if direct {
                    let pos = dst.offset(bounds.left + j as u32, bounds.top + i as u32) + k;
                    dst.as_bytes_mut()[pos] = v;
                } else {
                    cols[(i * iw + j) * CHANNELS + k] = v;
                }
            }
        }
    }
    if direct {
        return;
    }

    // Pass 3: arithmetic mean of each w_factor x h_factor block. This pass
    // needs the whole intermediate buffer, so it cannot be fused with pass 2.
    let block = (w_factor * h_factor) as f64;
    for i in 0..bh {
        for j in 0..bw {
            // u64: a block past ~16.8M samples of 255 would wrap a u32 sum.
            let mut sums = [0u64; CHANNELS];
            for bi in 0..h_factor {
                let row_pos = ((i * h_factor + bi) * iw + j * w_factor) * CHANNELS;
                for bj in 0..w_factor {
                    let pos = row_pos + bj * CHANNELS;
                    for k in 0..CHANNELS {
                        sums[k] += cols[pos + k] as u64;
                    }
                }
            }
            let pos = dst.offset(bounds.left + j as u32, bounds.top + i as u32);
            let out = dst.as_bytes_mut();
            for (k, sum) in sums.iter().enumerate() {
                out[pos + k] = (*sum as f64 / block).round() as u8;
            }
        }
    }
}

/// Fractional source position for destination index `j`, endpoint aligned:
/// index 0 maps to the first sample, the last index to the last sample. An
/// unchanged axis therefore lands on integer positions where every kernel
/// reduces to the identity.
#[inline]
fn map(j: usize, dst_len: usize, src_len: usize) -> f64 {
    if dst_len > 1 {
        j as f64 * (src_len - 1) as f64 / (dst_len - 1) as f64
    } else {
        (src_len - 1) as f64 / 2.0
    }
}

/// Gather the four kernel samples around index `xi` along one axis.
///
/// Edge samples are mirrored rather than read out of range:
/// `x(-1) = 2*x(0) - x(1)` and `x(n) = 2*x(n-1) - x(n-2)`.
#[inline]
fn gather(buf: &[u8], pos: usize, stride: usize, xi: usize, len: usize) -> (f64, f64, f64, f64) {
    let x1 = buf[pos] as f64;
    let x2 = if xi + 1 < len {
        buf[pos + stride] as f64
    } else {
        x1
    };
    let x0 = if xi > 0 {
        buf[pos - stride] as f64
    } else {
        2.0 * x1 - x2
    };
    let x3 = if xi + 2 < len {
        buf[pos + 2 * stride] as f64
    } else {
        2.0 * x2 - x1
    };
    (x0, x1, x2, x3)
}

/// Write the pad color to every destination pixel outside the bounds
/// window. Runs before resampling so content pixels are never overwritten.
/// A full-destination window skips the walk entirely.
fn fill_border(dst: &mut Raster, bounds: Rect, pad: Color) {
    let width = dst.width();
    let height = dst.height();
    if bounds.left == 0 && bounds.top == 0 && bounds.width == width && bounds.height == height {
        return;
    }
    dst.fill_rect(Rect::new(0, 0, width, bounds.top), pad);
    dst.fill_rect(
        Rect::new(0, bounds.bottom(), width, height - bounds.bottom()),
        pad,
    );
    dst.fill_rect(Rect::new(0, bounds.top, bounds.left, bounds.height), pad);
    dst.fill_rect(
        Rect::new(bounds.right(), bounds.top, width - bounds.right(), bounds.height),
        pad,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_endpoints() {
        assert_eq!(map(0, 10, 5), 0.0);
        assert_eq!(map(9, 10, 5), 4.0);
        // A 1-wide destination samples the axis center.
        assert_eq!(map(0, 1, 5), 2.0);
    }

    #[test]
    fn test_map_is_identity_for_equal_lengths() {
        for j in 0..7 {
            assert_eq!(map(j, 7, 7), j as f64);
        }
    }

    #[test]
    fn test_gather_interior() {
        let buf = [10u8, 20, 30, 40];
        let (x0, x1, x2, x3) = gather(&buf, 1, 1, 1, 4);
        assert_eq!((x0, x1, x2, x3), (10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_gather_mirrors_left_edge() {
        let buf = [10u8, 30, 50];
        let (x0, x1, x2, _) = gather(&buf, 0, 1, 0, 3);
        // x(-1) = 2*10 - 30
        assert_eq!(x0, -10.0);
        assert_eq!((x1, x2), (10.0, 30.0));
    }

    #[test]
    fn test_gather_mirrors_right_edge() {
        let buf = [10u8, 30, 50];
        let (_, x1, x2, x3) = gather(&buf, 1, 1, 1, 3);
        // x(3) = 2*50 - 30
        assert_eq!((x1, x2), (30.0, 50.0));
        assert_eq!(x3, 70.0);
    }

    #[test]
    fn test_fill_border_pads_margins_only() {
        let mut dst = Raster::new(4, 4).unwrap();
        fill_border(&mut dst, Rect::new(1, 1, 2, 2), Color::RED);

        assert_eq!(dst.get_pixel(0, 0), Color::RED);
        assert_eq!(dst.get_pixel(3, 3), Color::RED);
        assert_eq!(dst.get_pixel(0, 2), Color::RED);
        assert_eq!(dst.get_pixel(3, 1), Color::RED);
        // Interior untouched.
        assert_eq!(dst.get_pixel(1, 1), Color::TRANSPARENT);
        assert_eq!(dst.get_pixel(2, 2), Color::TRANSPARENT);
    }

    #[test]
    fn test_fill_border_full_window_is_noop() {
        let mut dst = Raster::filled(4, 4, Color::WHITE).unwrap();
        fill_border(&mut dst, Rect::new(0, 0, 4, 4), Color::RED);
        assert_eq!(dst.get_pixel(0, 0), Color::WHITE);
    }
}
