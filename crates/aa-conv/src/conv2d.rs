//! Generic square-kernel convolution over every pixel format.
//!
//! Border behavior: kernel cells that fall outside the image are skipped.
//! A pixel whose window is complete is divided by [`Kernel::divisor`]. A
//! clipped pixel uses the sum of its in-bounds weights instead when
//! [`Kernel::dynamic_divisor_at_edges`] is set. A zero effective divisor
//! leaves the sum undivided.
//!
//! Accumulation is done in `i64`; division truncates toward zero, then the
//! threshold is added and the result is clamped to the sample range.

use aa_core::{Border, Error, PixelBuffer, PixelView, PixelViewMut, map_index};

use crate::kernel::Kernel;

/// Convolves `src` into `dst`, which must have the same width, height and
/// format.
pub fn convolve_into(
    src: &PixelView<'_>,
    dst: &mut PixelViewMut<'_>,
    kernel: &Kernel,
) -> Result<(), Error> {
    if src.shape() != dst.shape() {
        return Err(Error::SizeMismatch {
            expected: src.shape(),
            actual: dst.shape(),
        });
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(Error::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        });
    }

    log::debug!(
        "convolve {} with {}x{} kernel (divisor {}, threshold {})",
        src.shape(),
        kernel.size(),
        kernel.size(),
        kernel.divisor(),
        kernel.threshold()
    );

    let format = src.format();
    let bpp = format.bytes_per_pixel();
    let depth = format.depth();
    let width = src.width();
    let height = src.height();
    let size = kernel.size();
    let radius = kernel.radius() as isize;
    let full_window = size * size;

    dst.for_each_row(|y, row| {
        let src_row = src.row(y);
        let top = y as isize - radius;

        for x in 0..width {
            let px = x * bpp;
            let left = x as isize - radius;

            for ch in format.channels() {
                let at = px + ch.offset;

                if !ch.is_color() && !kernel.process_alpha() {
                    row[at..at + depth.bytes()].copy_from_slice(&src_row[at..at + depth.bytes()]);
                    continue;
                }

                let mut g: i64 = 0;
                let mut div: i64 = 0;
                let mut processed = 0usize;

                for i in 0..size {
                    let Some(sy) = map_index(top + i as isize, height, Border::Skip) else {
                        continue;
                    };
                    let window_row = src.row(sy);

                    for j in 0..size {
                        let Some(sx) = map_index(left + j as isize, width, Border::Skip) else {
                            continue;
                        };

                        let k = kernel.weight(i, j) as i64;
                        div += k;
                        g += k * depth.read(window_row, sx * bpp + ch.offset) as i64;
                        processed += 1;
                    }
                }

                if processed == full_window || !kernel.dynamic_divisor_at_edges() {
                    div = kernel.divisor() as i64;
                }
                if div != 0 {
                    g /= div;
                }
                g += kernel.threshold() as i64;

                depth.write(row, at, depth.saturate(g));
            }
        }
    });

    Ok(())
}

/// Allocates a destination like `src` and convolves into it.
pub fn convolve(src: &PixelView<'_>, kernel: &Kernel) -> Result<PixelBuffer, Error> {
    let mut out = PixelBuffer::allocate(src.width(), src.height(), src.format())?;
    convolve_into(src, &mut out.as_view_mut(), kernel)?;
    Ok(out)
}
