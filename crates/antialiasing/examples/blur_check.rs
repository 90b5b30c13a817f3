//! Example: resample an image and check it for blur.
//!
//! Loads any image the `image` crate can decode, converts it to a BGR
//! `Rgb24` buffer, runs blur detection on the input, resamples it to the
//! requested size and runs blur detection again. The resampled image is
//! written next to the input unless `--out` is given.
//!
//! Run from the workspace root:
//!   cargo run -p antialiasing --example blur_check -- --help
//!   cargo run -p antialiasing --example blur_check -- --input photo.png --width 320

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use antialiasing::{
    BlurConfig, PixelBuffer, PixelFormat, ResampleMethod, detect_blur_with, resample,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Nearest,
    Bilinear,
    Bicubic,
}

impl From<Method> for ResampleMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Nearest => ResampleMethod::NearestNeighbor,
            Method::Bilinear => ResampleMethod::Bilinear,
            Method::Bicubic => ResampleMethod::Bicubic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Resample an image and report whether it is blurred")]
struct Args {
    /// Input image path
    #[arg(long)]
    input: PathBuf,

    /// Target width; height follows the aspect ratio unless given
    #[arg(long)]
    width: usize,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long, value_enum, default_value_t = Method::Bicubic)]
    method: Method,

    /// Use the float-reinterpreting gradient scan and its 1e10 cut-off
    #[arg(long)]
    legacy_scan: bool,

    /// Output path (default: <input stem>_resampled.png next to input)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn load_bgr(path: &Path) -> Result<PixelBuffer> {
    let rgb = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgb8();
    bgr_from_rgb(&rgb).with_context(|| format!("failed to convert {}", path.display()))
}

fn bgr_from_rgb(rgb: &image::RgbImage) -> Result<PixelBuffer> {
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    anyhow::ensure!(w > 0 && h > 0, "image decoded to an empty {w}x{h} frame");

    let mut buf = PixelBuffer::allocate(w, h, PixelFormat::Rgb24)?;
    let mut view = buf.as_view_mut();
    for (y, src_row) in rgb.as_raw().chunks_exact(w * 3).enumerate() {
        for (dst, src) in view.row_mut(y).chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
            dst.copy_from_slice(&[src[2], src[1], src[0]]);
        }
    }
    Ok(buf)
}

fn save_bgr(buf: &PixelBuffer, path: &Path) -> Result<()> {
    let view = buf.as_view();
    let mut rgb = Vec::with_capacity(buf.width() * buf.height() * 3);
    for y in 0..buf.height() {
        for px in view.row(y).chunks_exact(3) {
            rgb.extend_from_slice(&[px[2], px[1], px[0]]);
        }
    }
    image::save_buffer(
        path,
        &rgb,
        buf.width() as u32,
        buf.height() as u32,
        image::ExtendedColorType::Rgb8,
    )
    .with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let src = load_bgr(&args.input)?;
    let height = args
        .height
        .unwrap_or_else(|| (args.width * src.height()).div_ceil(src.width()).max(1));

    let cfg = if args.legacy_scan {
        BlurConfig::legacy()
    } else {
        BlurConfig::default()
    };

    let before = detect_blur_with(&src.as_view(), &cfg)?;
    println!(
        "input  {}: max gradient {:.4}, blurred: {}",
        src.shape(),
        before.max_gradient,
        before.is_blurred
    );

    let t0 = Instant::now();
    let out = resample(&src.as_view(), args.width, height, args.method.into())?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let after = detect_blur_with(&out.as_view(), &cfg)?;
    println!(
        "output {}: max gradient {:.4}, blurred: {} ({elapsed_ms:.2} ms, {:?})",
        out.shape(),
        after.max_gradient,
        after.is_blurred,
        args.method
    );

    let out_path = args.out.unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        args.input.with_file_name(format!("{stem}_resampled.png"))
    });
    save_bgr(&out, &out_path)?;
    println!("wrote {}", out_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::bgr_from_rgb;

    #[test]
    fn empty_frame_is_an_error() {
        assert!(bgr_from_rgb(&image::RgbImage::new(0, 0)).is_err());
        assert!(bgr_from_rgb(&image::RgbImage::new(0, 4)).is_err());
    }

    #[test]
    fn channels_are_swapped_to_bgr() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).expect("2x1 frame");
        let buf = bgr_from_rgb(&rgb).expect("convert");
        assert_eq!(buf.as_view().row(0), &[3, 2, 1, 6, 5, 4]);
    }
}
