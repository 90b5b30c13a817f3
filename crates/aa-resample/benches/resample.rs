use aa_core::{PixelBuffer, PixelFormat};
use aa_resample::{ResampleMethod, resample_into};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn source(width: usize, height: usize, format: PixelFormat) -> PixelBuffer {
    let mut img = PixelBuffer::allocate(width, height, format).expect("valid buffer");
    let mut view = img.as_view_mut();
    for y in 0..height {
        for (i, b) in view.row_mut(y).iter_mut().enumerate() {
            *b = ((i + y * 7) % 251) as u8;
        }
    }
    img
}

fn bench_downscale_rgb24(c: &mut Criterion) {
    let src = source(1280, 1024, PixelFormat::Rgb24);
    let view = src.as_view();
    let mut dst = PixelBuffer::allocate(640, 512, PixelFormat::Rgb24).expect("valid buffer");

    for (name, method) in [
        ("resample_nearest_rgb24_1280x1024_to_640x512", ResampleMethod::NearestNeighbor),
        ("resample_bilinear_rgb24_1280x1024_to_640x512", ResampleMethod::Bilinear),
        ("resample_bicubic_rgb24_1280x1024_to_640x512", ResampleMethod::Bicubic),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                resample_into(black_box(&view), &mut dst.as_view_mut(), method)
                    .expect("same format");
            });
        });
    }
}

fn bench_upscale_gray16(c: &mut Criterion) {
    let src = source(320, 256, PixelFormat::Gray16);
    let view = src.as_view();
    let mut dst = PixelBuffer::allocate(1280, 1024, PixelFormat::Gray16).expect("valid buffer");

    c.bench_function("resample_bicubic_gray16_320x256_to_1280x1024", |b| {
        b.iter(|| {
            resample_into(
                black_box(&view),
                &mut dst.as_view_mut(),
                ResampleMethod::Bicubic,
            )
            .expect("same format");
            black_box(dst.data()[0]);
        });
    });
}

criterion_group!(benches, bench_downscale_rgb24, bench_upscale_gray16);
criterion_main!(benches);
