use aa_core::{PixelView, PixelViewMut};

use crate::resample::{Factors, source_index};

/// Copies the raw bytes of the source pixel at
/// `(floor(x * x_factor), floor(y * y_factor))`. Format agnostic.
pub(crate) fn resample_nearest_into(src: &PixelView<'_>, dst: &mut PixelViewMut<'_>) {
    let bpp = src.format().bytes_per_pixel();
    let f = Factors::new(src, dst);

    let cols: Vec<usize> = (0..dst.width())
        .map(|x| source_index(x, f.x, src.width()) * bpp)
        .collect();

    dst.for_each_row(|y, row| {
        let src_row = src.row(source_index(y, f.y, src.height()));
        for (out, &sx) in row.chunks_exact_mut(bpp).zip(cols.iter()) {
            out.copy_from_slice(&src_row[sx..sx + bpp]);
        }
    });
}
