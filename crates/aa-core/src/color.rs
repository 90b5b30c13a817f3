/// ITU-R luma weights used for every RGB to gray conversion.
pub const LUMA_R: f64 = 0.2125;
pub const LUMA_G: f64 = 0.7154;
pub const LUMA_B: f64 = 0.0721;

/// 8-bit color as exchanged with [`crate::PixelBuffer::get_pixel`] and
/// [`crate::PixelBuffer::set_pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    pub fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Weighted intensity, truncated toward zero.
    pub fn luma(&self) -> u8 {
        (LUMA_R * self.r as f64 + LUMA_G * self.g as f64 + LUMA_B * self.b as f64) as u8
    }
}
