//! 3x3 binomial blur.
//!
//! A single pass of the separable 1-2-1 binomial kernel (weights summing
//! to 16). Samples beyond an edge are clamped to the nearest pixel, so
//! borders keep their overall brightness instead of darkening.

use crate::error::Result;
use crate::raster::{Color, Raster, CHANNELS};

/// Kernel weights for offsets -1, 0, 1.
const WEIGHTS: [u32; 3] = [1, 2, 1];

/// Blur `src` into a new raster. All four channels are filtered
/// independently.
///
/// # Errors
///
/// Propagates any error from allocating the destination raster.
pub fn blur(src: &Raster) -> Result<Raster> {
    let width = src.width();
    let height = src.height();
    let bytes = src.as_bytes();
    let mut out = Raster::new(width, height)?;

    let w = width as i64;
    let h = height as i64;
    for y in 0..h {
        for x in 0..w {
            let mut sums = [0u32; CHANNELS];
            for (dy, wy) in (-1..=1).zip(WEIGHTS) {
                let sy = (y + dy).clamp(0, h - 1) as usize;
                for (dx, wx) in (-1..=1).zip(WEIGHTS) {
                    let sx = (x + dx).clamp(0, w - 1) as usize;
                    let pos = (sy * width as usize + sx) * CHANNELS;
                    let weight = wy * wx;
                    for k in 0..CHANNELS {
                        sums[k] += weight * bytes[pos + k] as u32;
                    }
                }
            }
            out.set_pixel(
                x as u32,
                y as u32,
                Color::rgba(
                    ((sums[0] + 8) / 16) as u8,
                    ((sums[1] + 8) / 16) as u8,
                    ((sums[2] + 8) / 16) as u8,
                    ((sums[3] + 8) / 16) as u8,
                ),
            );
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rect;

    #[test]
    fn test_blur_preserves_solid_color() {
        let src = Raster::filled(10, 10, Color::rgb(40, 80, 120)).unwrap();
        let out = blur(&src).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(out.get_pixel(x, y), Color::rgb(40, 80, 120));
            }
        }
    }

    #[test]
    fn test_blur_cross_scenario() {
        // White raster with a red vertical line at x=15 and a red
        // horizontal line at y=15.
        let mut src = Raster::filled(40, 30, Color::WHITE).unwrap();
        src.fill_rect(Rect::new(15, 0, 1, 30), Color::RED);
        src.fill_rect(Rect::new(0, 15, 40, 1), Color::RED);

        let out = blur(&src).unwrap();

        // Corners stay white.
        for (x, y) in [(1, 1), (38, 1), (1, 28), (38, 28)] {
            assert_eq!(out.get_pixel(x, y), Color::WHITE, "corner ({x},{y})");
        }

        let assert_range = |points: &[(u32, u32)], min: u8, max: u8| {
            for &(x, y) in points {
                let c = out.get_pixel(x, y);
                assert_eq!(c.r, 255, "({x},{y})");
                assert_eq!(c.a, 255, "({x},{y})");
                for v in [c.g, c.b] {
                    assert!(
                        v > min && v < max,
                        "({x},{y}) channel {v} outside ({min},{max})"
                    );
                }
            }
        };

        // On the lines: whitish red, including the clamped edge pixels.
        assert_range(
            &[
                (0, 15),
                (1, 15),
                (8, 15),
                (20, 15),
                (38, 15),
                (39, 15),
                (15, 0),
                (15, 8),
                (15, 29),
            ],
            120,
            136,
        );

        // Near the cross center: redder.
        assert_range(&[(15, 14), (14, 15), (15, 15), (16, 15), (15, 16)], 50, 100);

        // Beside the lines: reddish white.
        assert_range(
            &[(0, 14), (8, 14), (20, 16), (14, 0), (16, 8), (14, 20)],
            185,
            195,
        );

        // Diagonal neighbors of the cross center.
        assert_range(&[(14, 14), (16, 14), (14, 16), (16, 16)], 130, 150);
    }

    #[test]
    fn test_blur_keeps_extent() {
        let src = Raster::filled(7, 3, Color::BLUE).unwrap();
        let out = blur(&src).unwrap();
        assert_eq!(out.width(), 7);
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn test_blur_single_pixel() {
        let src = Raster::filled(1, 1, Color::rgba(9, 9, 9, 200)).unwrap();
        let out = blur(&src).unwrap();
        assert_eq!(out.get_pixel(0, 0), Color::rgba(9, 9, 9, 200));
    }
}
