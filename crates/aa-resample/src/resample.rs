use aa_core::{Error, PixelBuffer, PixelView, PixelViewMut};

use crate::bicubic::resample_bicubic_into;
use crate::bilinear::resample_bilinear_into;
use crate::nearest::resample_nearest_into;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResampleMethod {
    #[default]
    NearestNeighbor,
    Bilinear,
    Bicubic,
}

/// Source-per-destination step along each axis.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Factors {
    pub x: f64,
    pub y: f64,
}

impl Factors {
    pub fn new(src: &PixelView<'_>, dst: &PixelViewMut<'_>) -> Self {
        Self {
            x: src.width() as f64 / dst.width() as f64,
            y: src.height() as f64 / dst.height() as f64,
        }
    }
}

/// `floor(i * factor)`, kept inside `[0, len)` against rounding drift.
#[inline]
pub(crate) fn source_index(i: usize, factor: f64, len: usize) -> usize {
    ((i as f64 * factor) as usize).min(len - 1)
}

/// Resamples `src` into the caller-allocated `dst`.
///
/// Both images must share a pixel format and have non-zero dimensions; the
/// target size is taken from `dst`. Only the pixel bytes of `dst` are
/// written, stride padding is left untouched.
pub fn resample_into(
    src: &PixelView<'_>,
    dst: &mut PixelViewMut<'_>,
    method: ResampleMethod,
) -> Result<(), Error> {
    if src.width() == 0 || src.height() == 0 {
        return Err(Error::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        });
    }
    if dst.width() == 0 || dst.height() == 0 {
        return Err(Error::InvalidDimensions {
            width: dst.width(),
            height: dst.height(),
        });
    }
    if src.format() != dst.format() {
        return Err(Error::SizeMismatch {
            expected: aa_core::Shape {
                format: src.format(),
                ..dst.shape()
            },
            actual: dst.shape(),
        });
    }

    log::debug!(
        "resample {} -> {}x{} ({method:?})",
        src.shape(),
        dst.width(),
        dst.height()
    );

    match method {
        ResampleMethod::NearestNeighbor => resample_nearest_into(src, dst),
        ResampleMethod::Bilinear => resample_bilinear_into(src, dst),
        ResampleMethod::Bicubic => resample_bicubic_into(src, dst),
    }

    Ok(())
}

/// Allocates a `width x height` buffer in the source format and resamples
/// into it.
pub fn resample(
    src: &PixelView<'_>,
    width: usize,
    height: usize,
    method: ResampleMethod,
) -> Result<PixelBuffer, Error> {
    let mut out = PixelBuffer::allocate(width, height, src.format())?;
    resample_into(src, &mut out.as_view_mut(), method)?;
    Ok(out)
}
