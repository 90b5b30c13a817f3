use aa_conv::{Kernel, convolve_into, detect_blur};
use aa_core::{PixelBuffer, PixelFormat};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn build_slanted(width: usize, height: usize, format: PixelFormat) -> PixelBuffer {
    let theta = 20.0f32.to_radians();
    let nx = theta.cos();
    let ny = theta.sin();
    let t = nx * (0.5 * width as f32) + ny * (0.5 * height as f32);
    let bpp = format.bytes_per_pixel();

    let mut img = PixelBuffer::allocate(width, height, format).expect("valid buffer");
    let mut view = img.as_view_mut();
    for y in 0..height {
        let row = view.row_mut(y);
        for x in 0..width {
            let d = nx * x as f32 + ny * y as f32 - t;
            let v = if d >= 0.0 { 255 } else { 0 };
            row[x * bpp..(x + 1) * bpp].fill(v);
        }
    }
    img
}

fn bench_laplacian_gray8(c: &mut Criterion) {
    let src = build_slanted(1280, 1024, PixelFormat::Gray8);
    let view = src.as_view();
    let mut dst = PixelBuffer::allocate(1280, 1024, PixelFormat::Gray8).expect("valid buffer");
    let kernel = Kernel::laplacian();

    c.bench_function("convolve_laplacian_gray8_1280x1024", |b| {
        b.iter(|| {
            convolve_into(black_box(&view), &mut dst.as_view_mut(), black_box(&kernel))
                .expect("same shape");
        });
    });
}

fn bench_box5_argb32(c: &mut Criterion) {
    let src = build_slanted(640, 480, PixelFormat::Argb32);
    let view = src.as_view();
    let mut dst = PixelBuffer::allocate(640, 480, PixelFormat::Argb32).expect("valid buffer");
    let kernel = Kernel::new(&[[1; 5]; 5])
        .expect("valid kernel")
        .with_dynamic_divisor_at_edges(true);

    c.bench_function("convolve_box5_argb32_640x480", |b| {
        b.iter(|| {
            convolve_into(black_box(&view), &mut dst.as_view_mut(), black_box(&kernel))
                .expect("same shape");
        });
    });
}

fn bench_detect_blur_rgb24(c: &mut Criterion) {
    let src = build_slanted(1280, 1024, PixelFormat::Rgb24);
    let view = src.as_view();

    c.bench_function("detect_blur_rgb24_1280x1024", |b| {
        b.iter(|| {
            let report = detect_blur(black_box(&view)).expect("valid image");
            black_box(report.max_gradient);
        });
    });
}

criterion_group!(
    benches,
    bench_laplacian_gray8,
    bench_box5_argb32,
    bench_detect_blur_rgb24
);
criterion_main!(benches);
