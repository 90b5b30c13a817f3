use aa_core::{PixelView, PixelViewMut};

use crate::resample::Factors;

#[derive(Debug, Clone, Copy)]
struct Tap {
    i1: usize,
    i2: usize,
    d1: f64,
    d2: f64,
}

fn tap(i: usize, factor: f64, len: usize) -> Tap {
    let o = i as f64 * factor;
    let i1 = (o as usize).min(len - 1);
    let i2 = (i1 + 1).min(len - 1);
    let d1 = o - i1 as f64;
    Tap {
        i1,
        i2,
        d1,
        d2: 1.0 - d1,
    }
}

/// Interpolates every raw byte independently.
///
/// Working on bytes instead of channels is valid because the weights are a
/// convex combination: the result for one byte never depends on its
/// neighbors, so gray, color and alpha layouts are handled alike. The
/// weighted sum is truncated, not rounded.
///
/// 16-bit formats are interpolated byte-wise as well, so low and high bytes
/// of a sample are blended separately.
pub(crate) fn resample_bilinear_into(src: &PixelView<'_>, dst: &mut PixelViewMut<'_>) {
    let bpp = src.format().bytes_per_pixel();
    let f = Factors::new(src, dst);

    let cols: Vec<Tap> = (0..dst.width())
        .map(|x| tap(x, f.x, src.width()))
        .collect();

    dst.for_each_row(|y, row| {
        let ty = tap(y, f.y, src.height());
        let r1 = src.row(ty.i1);
        let r2 = src.row(ty.i2);

        for (out, tx) in row.chunks_exact_mut(bpp).zip(cols.iter()) {
            let p1 = &r1[tx.i1 * bpp..tx.i1 * bpp + bpp];
            let p2 = &r1[tx.i2 * bpp..tx.i2 * bpp + bpp];
            let p3 = &r2[tx.i1 * bpp..tx.i1 * bpp + bpp];
            let p4 = &r2[tx.i2 * bpp..tx.i2 * bpp + bpp];

            for i in 0..bpp {
                let v = ty.d2 * (tx.d2 * p1[i] as f64 + tx.d1 * p2[i] as f64)
                    + ty.d1 * (tx.d2 * p3[i] as f64 + tx.d1 * p4[i] as f64);
                out[i] = v as u8;
            }
        }
    });
}
