//! Pixel buffers and pixel formats shared by the resampling and convolution
//! crates.
//!
//! ## Buffers and Stride
//! Buffers use byte stride. `stride` is the distance, in bytes, between
//! adjacent row starts and is at least `width * bytes_per_pixel`. Allocated
//! buffers round the stride up to a 4-byte boundary; wrapped buffers accept
//! any stride that satisfies the minimum. Every buffer holds at least
//! `stride * height` bytes.
//!
//! ## Ownership
//! [`PixelBuffer`] owns its memory. [`PixelView`] and [`PixelViewMut`] borrow
//! externally owned bytes for zero-copy interop and never free them.
//!
//! ## Byte Layout
//! Blue is stored at the lowest offset, then green, then red, then alpha.
//! 16-bit samples are little-endian. See [`PixelFormat::channels`].
//!
//! ## Border Handling
//! [`map_index`] resolves out-of-range sample indices either by edge
//! replication or by dropping the sample.

mod border;
mod buffer;
mod color;
mod error;
mod format;
mod geom;

pub use border::{Border, map_index};
pub use buffer::{PixelBuffer, PixelView, PixelViewMut, Shape};
pub use color::{LUMA_B, LUMA_G, LUMA_R, Rgba};
pub use error::Error;
pub use format::{Channel, ChannelKind, Depth, PixelFormat};
pub use geom::{Point, Rect};
