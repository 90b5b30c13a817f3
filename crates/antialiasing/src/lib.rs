//! Umbrella crate for the `antialiasing` workspace.
//!
//! Re-exports the pixel buffer model ([`aa_core`]), the resamplers
//! ([`aa_resample`]) and the convolution engine with blur detection
//! ([`aa_conv`]). The usual entry points are [`resample`], [`convolve`] and
//! [`detect_blur`].

pub use aa_conv::*;
pub use aa_core::*;
pub use aa_resample::*;
