use core::fmt;

use crate::Error;
use crate::color::Rgba;
use crate::format::{ChannelKind, Depth, PixelFormat};
use crate::geom::{Point, Rect};

/// Width, height and format of a buffer; two buffers with equal shapes can
/// be copied into each other regardless of stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {:?}", self.width, self.height, self.format)
    }
}

/// Owned, zero-initialized pixel storage.
///
/// Memory is released when the buffer is dropped or when [`release`] is
/// called, whichever comes first. A released buffer reports a 0x0 shape and
/// every pixel access on it fails with [`Error::OutOfRange`].
///
/// [`release`]: PixelBuffer::release
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn allocate(width: usize, height: usize, format: PixelFormat) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let stride = format
            .aligned_stride(width)
            .ok_or(Error::InvalidDimensions { width, height })?;
        let len = stride
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            stride,
            format,
            data: vec![0; len],
        })
    }

    /// Adopts an existing byte vector laid out with `stride` bytes per row.
    pub fn from_vec(
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        validate_layout(width, height, stride, format, data.len())?;

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn shape(&self) -> Shape {
        Shape {
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn is_released(&self) -> bool {
        self.data.is_empty()
    }

    /// Frees the pixel memory. Calling it again is a no-op.
    pub fn release(&mut self) {
        if self.is_released() {
            return;
        }

        log::trace!(
            "releasing {} pixel buffer ({} bytes)",
            self.shape(),
            self.data.len()
        );
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
        self.stride = 0;
    }

    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> PixelViewMut<'_> {
        PixelViewMut {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: &mut self.data,
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgba, Error> {
        self.as_view().get_pixel(x, y)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> Result<(), Error> {
        self.as_view_mut().set_pixel(x, y, color)
    }

    pub fn set_pixels(&mut self, points: &[Point], color: Rgba) -> Result<(), Error> {
        self.as_view_mut().set_pixels(points, color)
    }

    pub fn sample(&self, x: usize, y: usize, channel: usize) -> Result<u16, Error> {
        self.as_view().sample(x, y, channel)
    }

    pub fn copy_to(&self, dst: &mut PixelViewMut<'_>) -> Result<(), Error> {
        self.as_view().copy_to(dst)
    }

    pub fn collect_active_pixels(&self, rect: Rect) -> Vec<Point> {
        self.as_view().collect_active_pixels(rect)
    }

    pub fn collect_values_u8(&self, points: &[Point]) -> Result<Vec<u8>, Error> {
        self.as_view().collect_values_u8(points)
    }

    pub fn collect_values_u16(&self, points: &[Point]) -> Result<Vec<u16>, Error> {
        self.as_view().collect_values_u16(points)
    }
}

/// Read-only, non-owning view over externally owned pixel bytes.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> PixelView<'a> {
    pub fn wrap(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, Error> {
        validate_layout(width, height, stride, format, data.len())?;

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn shape(&self) -> Shape {
        Shape {
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel bytes of row `y`, excluding stride padding.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.format.bytes_per_pixel()]
    }

    /// Raw bytes of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&'a [u8], Error> {
        let start = self.offset(x, y)?;
        Ok(&self.data[start..start + self.format.bytes_per_pixel()])
    }

    /// Raw value of channel `channel` (index into the format's channel table).
    pub fn sample(&self, x: usize, y: usize, channel: usize) -> Result<u16, Error> {
        let ch = self
            .format
            .channels()
            .get(channel)
            .ok_or(Error::UnsupportedFormat {
                format: self.format,
                operation: "sample channel index",
            })?;
        let px = self.pixel(x, y)?;
        Ok(self.format.depth().read(px, ch.offset) as u16)
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgba, Error> {
        let px = self.pixel(x, y)?;

        match self.format {
            PixelFormat::Gray8 => Ok(Rgba::gray(px[0])),
            PixelFormat::Rgb24 | PixelFormat::Rgb32 => Ok(Rgba::rgb(px[2], px[1], px[0])),
            PixelFormat::Argb32 => Ok(Rgba::new(px[2], px[1], px[0], px[3])),
            format @ (PixelFormat::Gray16 | PixelFormat::Rgb48 | PixelFormat::Argb64) => {
                Err(Error::UnsupportedFormat {
                    format,
                    operation: "get_pixel",
                })
            }
        }
    }

    /// Points inside `rect` (clipped to the image) whose gray or color
    /// samples are not all zero. Alpha is ignored.
    pub fn collect_active_pixels(&self, rect: Rect) -> Vec<Point> {
        let area = rect.intersect(&Rect::new(0, 0, self.width, self.height));
        let mut out = Vec::new();
        if area.is_empty() {
            return out;
        }

        let bpp = self.format.bytes_per_pixel();
        let depth = self.format.depth();
        let colors: Vec<usize> = self
            .format
            .channels()
            .iter()
            .filter(|c| c.is_color())
            .map(|c| c.offset)
            .collect();

        for y in area.y..area.bottom() {
            let row = self.row(y);
            for x in area.x..area.right() {
                let px = &row[x * bpp..(x + 1) * bpp];
                if colors.iter().any(|&off| depth.read(px, off) != 0) {
                    out.push(Point::new(x, y));
                }
            }
        }

        out
    }

    /// Packs gray values (one per point) or R, G, B triplets of 8-bit
    /// formats.
    pub fn collect_values_u8(&self, points: &[Point]) -> Result<Vec<u8>, Error> {
        if self.format.depth() != Depth::U8 {
            return Err(Error::UnsupportedFormat {
                format: self.format,
                operation: "collect_values_u8",
            });
        }

        self.collect_packed(points)
            .map(|v| v.into_iter().map(|s| s as u8).collect())
    }

    /// 16-bit counterpart of [`PixelView::collect_values_u8`].
    pub fn collect_values_u16(&self, points: &[Point]) -> Result<Vec<u16>, Error> {
        if self.format.depth() != Depth::U16 {
            return Err(Error::UnsupportedFormat {
                format: self.format,
                operation: "collect_values_u16",
            });
        }

        self.collect_packed(points)
            .map(|v| v.into_iter().map(|s| s as u16).collect())
    }

    fn collect_packed(&self, points: &[Point]) -> Result<Vec<u32>, Error> {
        let depth = self.format.depth();
        let order: &[ChannelKind] = if self.format.is_gray() {
            &[ChannelKind::Gray]
        } else {
            &[ChannelKind::Red, ChannelKind::Green, ChannelKind::Blue]
        };
        let offsets: Vec<usize> = order
            .iter()
            .filter_map(|&k| self.format.channel(k))
            .map(|c| c.offset)
            .collect();

        let mut out = Vec::with_capacity(points.len() * offsets.len());
        for p in points {
            let px = self.pixel(p.x, p.y)?;
            out.extend(offsets.iter().map(|&off| depth.read(px, off)));
        }
        Ok(out)
    }

    /// Copies pixels into `dst`, which must have the same shape. Rows are
    /// copied one by one when strides differ, `min(stride)` bytes each.
    pub fn copy_to(&self, dst: &mut PixelViewMut<'_>) -> Result<(), Error> {
        if self.shape() != dst.shape() {
            return Err(Error::SizeMismatch {
                expected: self.shape(),
                actual: dst.shape(),
            });
        }

        if self.stride == dst.stride {
            let len = self.stride * self.height;
            dst.data[..len].copy_from_slice(&self.data[..len]);
            return Ok(());
        }

        let len = self.stride.min(dst.stride);
        for y in 0..self.height {
            let s = y * self.stride;
            let d = y * dst.stride;
            dst.data[d..d + len].copy_from_slice(&self.data[s..s + len]);
        }

        Ok(())
    }

    /// Owned copy with a freshly aligned stride.
    pub fn to_buffer(&self) -> Result<PixelBuffer, Error> {
        let mut out = PixelBuffer::allocate(self.width, self.height, self.format)?;
        let row_len = self.width * self.format.bytes_per_pixel();
        let stride = out.stride;
        for y in 0..self.height {
            out.data[y * stride..y * stride + row_len].copy_from_slice(self.row(y));
        }
        Ok(out)
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfRange {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.stride + x * self.format.bytes_per_pixel())
    }
}

/// Mutable, non-owning view over externally owned pixel bytes.
#[derive(Debug)]
pub struct PixelViewMut<'a> {
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    data: &'a mut [u8],
}

impl<'a> PixelViewMut<'a> {
    pub fn wrap_mut(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, Error> {
        validate_layout(width, height, stride, format, data.len())?;

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn shape(&self) -> Shape {
        Shape {
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: self.data,
        }
    }

    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.format.bytes_per_pixel()]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.width * self.format.bytes_per_pixel()]
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgba, Error> {
        self.as_view().get_pixel(x, y)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Result<&mut [u8], Error> {
        let start = self.as_view().offset(x, y)?;
        let bpp = self.format.bytes_per_pixel();
        Ok(&mut self.data[start..start + bpp])
    }

    /// Stores `color` in the native format. Gray formats receive the luma
    /// value, 16-bit formats the 8-bit value shifted into the high byte.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> Result<(), Error> {
        let format = self.format;
        let px = self.pixel_mut(x, y)?;
        encode_pixel(format, px, color);
        Ok(())
    }

    /// Sets every in-bounds point to `color`; points outside are skipped.
    pub fn set_pixels(&mut self, points: &[Point], color: Rgba) -> Result<(), Error> {
        let format = self.format;
        for p in points {
            if p.x >= self.width || p.y >= self.height {
                continue;
            }
            let px = self.pixel_mut(p.x, p.y)?;
            encode_pixel(format, px, color);
        }
        Ok(())
    }

    /// Runs `f(y, row)` over every destination row, row bytes excluding
    /// stride padding. Rows are independent, so with the `parallel` feature
    /// they are distributed across the rayon pool.
    pub fn for_each_row<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [u8]) + Send + Sync,
    {
        let row_len = self.width * self.format.bytes_per_pixel();
        if row_len == 0 || self.height == 0 {
            return;
        }

        let stride = self.stride;
        let rows = &mut self.data[..stride * self.height];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            rows.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(y, row)| f(y, &mut row[..row_len]));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (y, row) in rows.chunks_mut(stride).enumerate() {
                f(y, &mut row[..row_len]);
            }
        }
    }
}

fn encode_pixel(format: PixelFormat, px: &mut [u8], color: Rgba) {
    let depth = format.depth();
    let luma = color.luma();

    for ch in format.channels() {
        let v = match ch.kind {
            ChannelKind::Gray => luma,
            ChannelKind::Blue => color.b,
            ChannelKind::Green => color.g,
            ChannelKind::Red => color.r,
            ChannelKind::Alpha => color.a,
            ChannelKind::Padding => continue,
        };
        let stored = match depth {
            Depth::U8 => v as u32,
            Depth::U16 => (v as u32) << 8,
        };
        depth.write(px, ch.offset, stored);
    }
}

fn validate_layout(
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    len: usize,
) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    let min = width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(Error::InvalidDimensions { width, height })?;
    if stride < min {
        return Err(Error::InvalidStride { stride, min });
    }

    let expected = stride.checked_mul(height).ok_or(Error::BufferTooSmall {
        expected: usize::MAX,
        actual: len,
    })?;
    if len < expected {
        return Err(Error::BufferTooSmall {
            expected,
            actual: len,
        });
    }

    Ok(())
}
