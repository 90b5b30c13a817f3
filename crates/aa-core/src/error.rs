use crate::buffer::Shape;
use crate::format::PixelFormat;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    #[error("pixel format {format:?} is not supported by {operation}")]
    UnsupportedFormat {
        format: PixelFormat,
        operation: &'static str,
    },
    #[error("invalid kernel: {rows}x{cols} (must be square, odd, between 3 and 99)")]
    InvalidKernel { rows: usize, cols: usize },
    #[error("divisor must be non-zero")]
    InvalidDivisor,
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: Shape, actual: Shape },
    #[error("invalid stride {stride}: a row needs at least {min} bytes")]
    InvalidStride { stride: usize, min: usize },
    #[error("buffer too small: expected at least {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
