use aa_core::{Border, ChannelKind, PixelView, PixelViewMut, map_index};

use crate::resample::{Factors, source_index};

/// Two-part cubic convolution kernel (a = -0.5).
pub fn bicubic_kernel(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        (1.5 * t - 2.5) * t * t + 1.0
    } else if t < 2.0 {
        ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
    } else {
        0.0
    }
}

/// 4-tap neighborhood along one axis: clamped source indices for offsets
/// `-1..=2` around `floor(i * factor - 0.5)` and the matching fractional
/// distance.
#[derive(Debug, Clone, Copy)]
struct Taps {
    idx: [usize; 4],
    frac: f64,
    nearest: usize,
}

fn taps(i: usize, factor: f64, len: usize) -> Taps {
    let o = i as f64 * factor - 0.5;
    let o1 = o.floor();
    let base = o1 as isize;

    let mut idx = [0usize; 4];
    for (k, slot) in idx.iter_mut().enumerate() {
        *slot = map_index(base + k as isize - 1, len, Border::Replicate).unwrap_or(0);
    }

    Taps {
        idx,
        frac: o - o1,
        nearest: source_index(i, factor, len),
    }
}

/// Bicubic interpolation driven by the format's channel table.
///
/// Gray, color and alpha samples are accumulated in f64 (the kernel has
/// negative lobes), clamped to the sample range and truncated. Padding bytes
/// are copied from the nearest-neighbor source pixel.
pub(crate) fn resample_bicubic_into(src: &PixelView<'_>, dst: &mut PixelViewMut<'_>) {
    let format = src.format();
    let bpp = format.bytes_per_pixel();
    let depth = format.depth();
    let max = depth.max_value() as f64;
    let channels = format.channels();
    let f = Factors::new(src, dst);

    let cols: Vec<(Taps, [f64; 4])> = (0..dst.width())
        .map(|x| {
            let t = taps(x, f.x, src.width());
            let mut w = [0.0f64; 4];
            for (m, wm) in w.iter_mut().enumerate() {
                *wm = bicubic_kernel((m as f64 - 1.0) - t.frac);
            }
            (t, w)
        })
        .collect();

    dst.for_each_row(|y, row| {
        let ty = taps(y, f.y, src.height());
        let rows = ty.idx.map(|sy| src.row(sy));
        let mut wy = [0.0f64; 4];
        for (n, wn) in wy.iter_mut().enumerate() {
            *wn = bicubic_kernel(ty.frac - (n as f64 - 1.0));
        }
        let nearest_row = src.row(ty.nearest);

        for (out, (tx, wx)) in row.chunks_exact_mut(bpp).zip(cols.iter()) {
            for ch in channels {
                if ch.kind == ChannelKind::Padding {
                    out[ch.offset] = nearest_row[tx.nearest * bpp + ch.offset];
                    continue;
                }

                let mut acc = 0.0f64;
                for (src_row, &k1) in rows.iter().zip(wy.iter()) {
                    for (&sx, &kx) in tx.idx.iter().zip(wx.iter()) {
                        let k2 = k1 * kx;
                        acc += k2 * depth.read(src_row, sx * bpp + ch.offset) as f64;
                    }
                }

                depth.write(out, ch.offset, acc.clamp(0.0, max) as u32);
            }
        }
    });
}
