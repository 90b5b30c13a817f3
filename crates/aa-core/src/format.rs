//! Pixel formats and their byte layouts.
//!
//! Every format stores blue at the lowest byte offset, then green, then red,
//! with alpha (or an unused padding byte) last. 16-bit samples are
//! little-endian. Engines never hard-code offsets; they walk the channel
//! table returned by [`PixelFormat::channels`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit indexed image with a grayscale palette (index == intensity).
    Gray8,
    Gray16,
    Rgb24,
    /// 32-bit BGR with an unused fourth byte.
    Rgb32,
    Argb32,
    Rgb48,
    Argb64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    U8,
    U16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Gray,
    Blue,
    Green,
    Red,
    Alpha,
    Padding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel {
    pub kind: ChannelKind,
    /// Byte offset of the sample inside one pixel.
    pub offset: usize,
}

impl Channel {
    const fn new(kind: ChannelKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Gray or color sample, as opposed to alpha or padding.
    pub fn is_color(&self) -> bool {
        !matches!(self.kind, ChannelKind::Alpha | ChannelKind::Padding)
    }
}

const GRAY: [Channel; 1] = [Channel::new(ChannelKind::Gray, 0)];

const BGR8: [Channel; 3] = [
    Channel::new(ChannelKind::Blue, 0),
    Channel::new(ChannelKind::Green, 1),
    Channel::new(ChannelKind::Red, 2),
];

const BGRX8: [Channel; 4] = [
    Channel::new(ChannelKind::Blue, 0),
    Channel::new(ChannelKind::Green, 1),
    Channel::new(ChannelKind::Red, 2),
    Channel::new(ChannelKind::Padding, 3),
];

const BGRA8: [Channel; 4] = [
    Channel::new(ChannelKind::Blue, 0),
    Channel::new(ChannelKind::Green, 1),
    Channel::new(ChannelKind::Red, 2),
    Channel::new(ChannelKind::Alpha, 3),
];

const BGR16: [Channel; 3] = [
    Channel::new(ChannelKind::Blue, 0),
    Channel::new(ChannelKind::Green, 2),
    Channel::new(ChannelKind::Red, 4),
];

const BGRA16: [Channel; 4] = [
    Channel::new(ChannelKind::Blue, 0),
    Channel::new(ChannelKind::Green, 2),
    Channel::new(ChannelKind::Red, 4),
    Channel::new(ChannelKind::Alpha, 6),
];

impl PixelFormat {
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::Gray8,
        PixelFormat::Gray16,
        PixelFormat::Rgb24,
        PixelFormat::Rgb32,
        PixelFormat::Argb32,
        PixelFormat::Rgb48,
        PixelFormat::Argb64,
    ];

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Rgb24 => 3,
            Self::Rgb32 | Self::Argb32 => 4,
            Self::Rgb48 => 6,
            Self::Argb64 => 8,
        }
    }

    pub fn depth(self) -> Depth {
        match self {
            Self::Gray8 | Self::Rgb24 | Self::Rgb32 | Self::Argb32 => Depth::U8,
            Self::Gray16 | Self::Rgb48 | Self::Argb64 => Depth::U16,
        }
    }

    pub fn channels(self) -> &'static [Channel] {
        match self {
            Self::Gray8 | Self::Gray16 => &GRAY,
            Self::Rgb24 => &BGR8,
            Self::Rgb32 => &BGRX8,
            Self::Argb32 => &BGRA8,
            Self::Rgb48 => &BGR16,
            Self::Argb64 => &BGRA16,
        }
    }

    pub fn channel(self, kind: ChannelKind) -> Option<Channel> {
        self.channels().iter().copied().find(|c| c.kind == kind)
    }

    pub fn is_gray(self) -> bool {
        matches!(self, Self::Gray8 | Self::Gray16)
    }

    /// Smallest valid stride for `width` pixels, rounded up to 4 bytes.
    pub fn aligned_stride(self, width: usize) -> Option<usize> {
        let row = width.checked_mul(self.bytes_per_pixel())?;
        row.checked_add(3).map(|v| v & !3)
    }
}

impl Depth {
    pub fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }

    pub fn max_value(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
        }
    }

    /// Reads the sample starting at `bytes[offset]`.
    #[inline]
    pub fn read(self, bytes: &[u8], offset: usize) -> u32 {
        match self {
            Self::U8 => bytes[offset] as u32,
            Self::U16 => u16::from_le_bytes([bytes[offset], bytes[offset + 1]]) as u32,
        }
    }

    /// Writes `value` (already within range) at `bytes[offset]`.
    #[inline]
    pub fn write(self, bytes: &mut [u8], offset: usize, value: u32) {
        match self {
            Self::U8 => bytes[offset] = value as u8,
            Self::U16 => {
                let le = (value as u16).to_le_bytes();
                bytes[offset] = le[0];
                bytes[offset + 1] = le[1];
            }
        }
    }

    /// Clamps a signed accumulator into the sample range.
    #[inline]
    pub fn saturate(self, value: i64) -> u32 {
        value.clamp(0, self.max_value() as i64) as u32
    }
}
