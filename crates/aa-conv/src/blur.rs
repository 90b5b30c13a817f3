//! Blur detection from the strongest Laplacian response.
//!
//! The source is convolved with [`Kernel::laplacian`] into a working buffer
//! of the same shape, then the working buffer is scanned for its maximum
//! gradient. An image whose maximum stays below the sharp threshold is
//! reported as blurred.

use aa_core::{Error, PixelBuffer, PixelView};

use crate::conv2d::convolve;
use crate::kernel::Kernel;

/// How the maximum gradient is read back from the convolved buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GradientScan {
    /// Largest gray or color sample, divided by the sample maximum. Yields a
    /// value in `[0, 1]`.
    #[default]
    ChannelMagnitude,
    /// Reads each row as little-endian `f32` values at element indices
    /// `0, bpp, 2 * bpp, ...` below `width / bpp`, starting from `-32768`.
    /// Reproduces scores of earlier releases bit for bit.
    LegacyFloatReinterpret,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlurConfig {
    pub scan: GradientScan,
    /// An image is sharp when `max_gradient >= sharp_threshold`.
    pub sharp_threshold: f32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            scan: GradientScan::ChannelMagnitude,
            sharp_threshold: 0.1,
        }
    }
}

impl BlurConfig {
    /// Float reinterpretation scan with the `1e10` cut-off.
    pub fn legacy() -> Self {
        Self {
            scan: GradientScan::LegacyFloatReinterpret,
            sharp_threshold: 1e10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurReport {
    pub is_blurred: bool,
    pub max_gradient: f32,
}

pub fn detect_blur(src: &PixelView<'_>) -> Result<BlurReport, Error> {
    detect_blur_with(src, &BlurConfig::default())
}

pub fn detect_blur_with(src: &PixelView<'_>, cfg: &BlurConfig) -> Result<BlurReport, Error> {
    let work = convolve(src, &Kernel::laplacian())?;

    let max_gradient = match cfg.scan {
        GradientScan::ChannelMagnitude => max_channel_magnitude(&work),
        GradientScan::LegacyFloatReinterpret => max_reinterpreted_f32(&work),
    };
    // NaN never counts as sharp
    let is_blurred = !(max_gradient >= cfg.sharp_threshold);

    log::debug!(
        "blur check on {}: max gradient {max_gradient} ({:?}), blurred = {is_blurred}",
        src.shape(),
        cfg.scan
    );

    Ok(BlurReport {
        is_blurred,
        max_gradient,
    })
}

fn max_channel_magnitude(work: &PixelBuffer) -> f32 {
    let format = work.format();
    let bpp = format.bytes_per_pixel();
    let depth = format.depth();
    let view = work.as_view();
    let offsets: Vec<usize> = format
        .channels()
        .iter()
        .filter(|c| c.is_color())
        .map(|c| c.offset)
        .collect();

    let mut max = 0u32;
    for y in 0..view.height() {
        for px in view.row(y).chunks_exact(bpp) {
            for &off in &offsets {
                max = max.max(depth.read(px, off));
            }
        }
    }

    max as f32 / depth.max_value() as f32
}

fn max_reinterpreted_f32(work: &PixelBuffer) -> f32 {
    let bpp = work.format().bytes_per_pixel();
    let stride = work.stride();
    let data = work.data();

    let mut max = i16::MIN as f32;
    for y in 0..work.height() {
        let row = &data[y * stride..];
        for x in (0..work.width() / bpp).step_by(bpp) {
            let Some(bytes) = row.get(x * 4..x * 4 + 4) else {
                break;
            };
            let v = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            if v > max {
                max = v;
            }
        }
    }

    max
}

#[cfg(test)]
mod tests {
    use aa_core::{PixelBuffer, PixelFormat, PixelView};

    use super::{BlurConfig, GradientScan, detect_blur, detect_blur_with, max_reinterpreted_f32};

    fn checkerboard(width: usize, height: usize, cell: usize) -> PixelBuffer {
        let mut img = PixelBuffer::allocate(width, height, PixelFormat::Gray8).expect("valid buffer");
        let mut view = img.as_view_mut();
        for y in 0..height {
            for (x, v) in view.row_mut(y).iter_mut().enumerate() {
                *v = if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 };
            }
        }
        img
    }

    #[test]
    fn default_config() {
        let cfg = BlurConfig::default();
        assert_eq!(cfg.scan, GradientScan::ChannelMagnitude);
        assert!((cfg.sharp_threshold - 0.1).abs() < f32::EPSILON);

        let legacy = BlurConfig::legacy();
        assert_eq!(legacy.scan, GradientScan::LegacyFloatReinterpret);
        assert_eq!(legacy.sharp_threshold, 1e10);
    }

    #[test_log::test]
    fn uniform_image_is_blurred() {
        let data = vec![128u8; 8 * 8];
        let src = PixelView::wrap(&data, 8, 8, 8, PixelFormat::Gray8).expect("valid view");

        let report = detect_blur(&src).expect("detect");
        assert!(report.is_blurred);
        assert_eq!(report.max_gradient, 0.0);
    }

    #[test_log::test]
    fn hard_edges_are_sharp() {
        let img = checkerboard(16, 16, 4);

        let report = detect_blur(&img.as_view()).expect("detect");
        assert!(!report.is_blurred);
        assert_eq!(report.max_gradient, 1.0);
    }

    #[test]
    fn gentle_ramp_is_blurred() {
        // a linear ramp has zero second derivative inside the image
        let mut img = PixelBuffer::allocate(32, 8, PixelFormat::Rgb24).expect("valid buffer");
        let mut view = img.as_view_mut();
        for y in 0..8 {
            for (i, v) in view.row_mut(y).iter_mut().enumerate() {
                *v = (i / 3) as u8;
            }
        }

        let report = detect_blur(&img.as_view()).expect("detect");
        assert!(report.is_blurred, "{report:?}");
        assert!(report.max_gradient < 0.1);
    }

    #[test]
    fn alpha_is_ignored_by_channel_magnitude() {
        // opaque alpha next to transparent would give a huge response if
        // alpha were scanned
        let mut img = PixelBuffer::allocate(4, 4, PixelFormat::Argb32).expect("valid buffer");
        let mut view = img.as_view_mut();
        for y in 0..4 {
            for (i, v) in view.row_mut(y).iter_mut().enumerate() {
                if i % 4 == 3 && (i / 4 + y) % 2 == 0 {
                    *v = 255;
                }
            }
        }

        let report = detect_blur(&img.as_view()).expect("detect");
        assert!(report.is_blurred);
        assert_eq!(report.max_gradient, 0.0);
    }

    #[test]
    fn legacy_scan_on_zero_response_starts_from_floor() {
        let data = vec![9u8; 4 * 4];
        let src = PixelView::wrap(&data, 4, 4, 4, PixelFormat::Gray8).expect("valid view");

        // the all-zero working buffer reads back as 0.0
        let report = detect_blur_with(&src, &BlurConfig::legacy()).expect("detect");
        assert_eq!(report.max_gradient, 0.0);
        assert!(report.is_blurred);

        // narrower than one pixel group: nothing is read
        let tiny = vec![9u8; 4];
        let src = PixelView::wrap(&tiny, 1, 1, 4, PixelFormat::Argb32).expect("valid view");
        let report = detect_blur_with(&src, &BlurConfig::legacy()).expect("detect");
        assert_eq!(report.max_gradient, -32768.0);
        assert!(report.is_blurred);
    }

    #[test]
    fn legacy_scan_reads_little_endian_floats() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&2.5e10f32.to_le_bytes());
        let work = PixelBuffer::from_vec(8, 1, 8, PixelFormat::Gray8, data).expect("valid buffer");

        // x = 0 and x = 1 are read, x = 2 would run past the buffer
        assert_eq!(max_reinterpreted_f32(&work), 2.5e10);
    }

    #[test]
    fn legacy_scan_steps_by_pixel_size() {
        let mut data = vec![0u8; 32];
        data[..4].copy_from_slice(&(-3.0f32).to_le_bytes());
        data[4..8].copy_from_slice(&7.0f32.to_le_bytes());
        let work =
            PixelBuffer::from_vec(8, 1, 32, PixelFormat::Argb32, data).expect("valid buffer");

        // width / bpp = 2, so only element 0 is visited
        assert_eq!(max_reinterpreted_f32(&work), -3.0);
    }
}
