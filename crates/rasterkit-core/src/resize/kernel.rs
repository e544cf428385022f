//! Interpolation kernels for resampling.
//!
//! Every kernel is a pure function of four ordered samples taken at
//! positions -1, 0, 1, 2 on the source lattice, plus a fraction
//! `t in [0, 1)` between the middle pair. The result is always saturated
//! to the byte range, so overshooting kernels (bicubic, hermite) can never
//! wrap.

use serde::{Deserialize, Serialize};

/// Resampling kernel selection.
///
/// Dispatch is a plain match over variants; there is no name-based lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Kernel {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Linear blend of the two middle samples.
    #[default]
    Bilinear,
    /// 4-point cubic convolution fit.
    Bicubic,
    /// Hermite cubic through the middle pair with centered tangents.
    Hermite,
    /// Cubic Bezier with control points derived from the outer samples.
    Bezier,
}

impl Kernel {
    /// All kernels, in declaration order. Handy for exhaustive tests.
    pub const ALL: [Kernel; 5] = [
        Kernel::Nearest,
        Kernel::Bilinear,
        Kernel::Bicubic,
        Kernel::Hermite,
        Kernel::Bezier,
    ];

    /// Evaluate the kernel for one channel.
    ///
    /// `x1` and `x2` are the samples bracketing the target position;
    /// `x0` and `x3` are their outer neighbors.
    #[inline]
    pub(crate) fn interpolate(self, x0: f64, x1: f64, x2: f64, x3: f64, t: f64) -> u8 {
        match self {
            Kernel::Nearest => nearest(x1, x2, t),
            Kernel::Bilinear => bilinear(x1, x2, t),
            Kernel::Bicubic => bicubic(x0, x1, x2, x3, t),
            Kernel::Hermite => hermite(x0, x1, x2, x3, t),
            Kernel::Bezier => bezier(x0, x1, x2, x3, t),
        }
    }
}

/// Round and clamp to the byte range.
#[inline]
fn saturate(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Half-away-from-zero rounding to the nearer of the two middle samples.
#[inline]
fn nearest(x1: f64, x2: f64, t: f64) -> u8 {
    if t < 0.5 {
        x1 as u8
    } else {
        x2 as u8
    }
}

/// Linear blend. The integer-coordinate case short-circuits so callers at
/// a lattice point never depend on the far sample.
#[inline]
fn bilinear(x1: f64, x2: f64, t: f64) -> u8 {
    if t == 0.0 {
        return x1 as u8;
    }
    saturate(x1 + t * (x2 - x1))
}

/// 4-point cubic convolution through the middle pair.
#[inline]
fn bicubic(x0: f64, x1: f64, x2: f64, x3: f64, t: f64) -> u8 {
    let a0 = x3 - x2 - x0 + x1;
    let a1 = x0 - x1 - a0;
    let a2 = x2 - x0;
    let a3 = x1;
    saturate(((a0 * t + a1) * t + a2) * t + a3)
}

/// Hermite cubic with centered-difference tangents.
#[inline]
fn hermite(x0: f64, x1: f64, x2: f64, x3: f64, t: f64) -> u8 {
    let c0 = x1;
    let c1 = 0.5 * (x2 - x0);
    let c2 = x0 - 2.5 * x1 + 2.0 * x2 - 0.5 * x3;
    let c3 = 0.5 * (x3 - x0) + 1.5 * (x1 - x2);
    saturate(((c3 * t + c2) * t + c1) * t + c0)
}

/// Cubic Bezier with knots x1, x2 and control points derived from the
/// outer neighbors.
#[inline]
fn bezier(x0: f64, x1: f64, x2: f64, x3: f64, t: f64) -> u8 {
    let cp1 = x1 + (x2 - x0) / 4.0;
    let cp2 = x2 - (x3 - x1) / 4.0;
    let nt = 1.0 - t;
    let c0 = x1 * nt * nt * nt;
    let c1 = 3.0 * cp1 * nt * nt * t;
    let c2 = 3.0 * cp2 * nt * t * t;
    let c3 = x2 * t * t * t;
    saturate(c0 + c1 + c2 + c3)
}
