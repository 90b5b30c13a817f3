//! Resampling of raw pixel buffers to a new width and height.
//!
//! `aa-resample` maps every destination pixel back into the source with
//! per-axis factors `src / dst` and offers three interpolation kernels:
//!
//! - [`ResampleMethod::NearestNeighbor`] copies the raw bytes of
//!   `(floor(x * fx), floor(y * fy))`. Works for every format unchanged.
//! - [`ResampleMethod::Bilinear`] blends the four surrounding pixels byte by
//!   byte and truncates the result.
//! - [`ResampleMethod::Bicubic`] runs a 4x4 cubic convolution
//!   ([`bicubic_kernel`]) per channel, centered half a pixel up-left of the
//!   scaled position, clamped to the sample range and truncated.
//!
//! Border policy:
//! - Neighbors past the last row/column replicate the edge pixel.
//! - Destination stride padding is never written.

mod bicubic;
mod bilinear;
mod nearest;
mod resample;

pub use bicubic::bicubic_kernel;
pub use resample::{ResampleMethod, resample, resample_into};
