//! Square integer-kernel convolution and Laplacian blur detection.
//!
//! Kernels are odd-sized, from 3x3 up to 99x99, and carry their own divisor,
//! threshold and edge policy (see [`Kernel`]). Every pixel format is
//! handled through its channel table, so 8-bit and 16-bit layouts share one
//! code path.
//!
//! Alpha and padding bytes are copied from the source unless
//! [`Kernel::with_process_alpha`] is enabled.
//!
//! [`detect_blur`] thresholds the strongest [`Kernel::laplacian`] response.
//! The scan strategy and cut-off live in [`BlurConfig`].

mod blur;
mod conv2d;
mod kernel;

pub use blur::{BlurConfig, BlurReport, GradientScan, detect_blur, detect_blur_with};
pub use conv2d::{convolve, convolve_into};
pub use kernel::{Kernel, MAX_KERNEL_SIZE, MIN_KERNEL_SIZE};
