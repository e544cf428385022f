//! Rasterkit core - pixel resampling and geometric transform engine.
//!
//! Everything operates on [`Raster`], an owned, packed RGBA8 pixel grid.
//! The engine provides resizing under a fit policy with five interpolation
//! kernels and an anti-aliased downsampling path, rotation by an arbitrary
//! angle, alpha compositing, and a handful of pixel derivations (blur,
//! negative, crop). JPEG/PNG container handling lives in [`codec`],
//! delegated to the `image` crate; the transform core never touches
//! container bytes.
//!
//! All operations are synchronous, single-threaded, and allocate a fresh
//! destination; sources are never mutated except through explicit pixel
//! mutators and the compositor's destination argument.

pub mod blur;
pub mod codec;
pub mod composite;
pub mod error;
pub mod raster;
pub mod resize;
pub mod rotate;

pub use blur::blur;
pub use codec::{decode, encode, read_file, write_file, Format};
pub use composite::draw;
pub use error::{Error, Result};
pub use raster::{Color, Raster, Rect};
pub use resize::{resize, Fit, Gravity, Kernel};
pub use rotate::{rotate, rotated_bounds, RotateFit};
