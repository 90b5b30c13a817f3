use aa_core::Error;

pub const MIN_KERNEL_SIZE: usize = 3;
pub const MAX_KERNEL_SIZE: usize = 99;

/// Square integer convolution kernel with its normalization settings.
///
/// Weights are stored row-major; `weights()[i * size + j]` applies to the
/// source pixel at offset `(j - r, i - r)` with `r = size / 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    size: usize,
    weights: Vec<i32>,
    divisor: i32,
    threshold: i32,
    dynamic_divisor_at_edges: bool,
    process_alpha: bool,
}

impl Kernel {
    /// Builds a kernel from its rows. The divisor defaults to the sum of
    /// weights, or 1 when the weights sum to zero.
    pub fn new<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, Error> {
        let size = rows.len();
        if let Some(bad) = rows.iter().map(|r| r.as_ref().len()).find(|&c| c != size) {
            return Err(Error::InvalidKernel {
                rows: size,
                cols: bad,
            });
        }
        if !(MIN_KERNEL_SIZE..=MAX_KERNEL_SIZE).contains(&size) || size.is_multiple_of(2) {
            return Err(Error::InvalidKernel {
                rows: size,
                cols: size,
            });
        }

        let weights: Vec<i32> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        let sum: i64 = weights.iter().map(|&w| w as i64).sum();
        let divisor = match i32::try_from(sum) {
            Ok(0) | Err(_) => 1,
            Ok(s) => s,
        };

        Ok(Self {
            size,
            weights,
            divisor,
            threshold: 0,
            dynamic_divisor_at_edges: false,
            process_alpha: false,
        })
    }

    /// 3x3 Laplacian `[[0, 1, 0], [1, -4, 1], [0, 1, 0]]` with divisor 1.
    pub fn laplacian() -> Self {
        Self {
            size: 3,
            weights: vec![0, 1, 0, 1, -4, 1, 0, 1, 0],
            divisor: 1,
            threshold: 0,
            dynamic_divisor_at_edges: false,
            process_alpha: false,
        }
    }

    pub fn with_divisor(mut self, divisor: i32) -> Result<Self, Error> {
        if divisor == 0 {
            return Err(Error::InvalidDivisor);
        }
        self.divisor = divisor;
        Ok(self)
    }

    /// Constant added to every result after division.
    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    /// When set, pixels whose window is clipped by the image border are
    /// divided by the sum of the in-bounds weights instead of the divisor.
    pub fn with_dynamic_divisor_at_edges(mut self, enabled: bool) -> Self {
        self.dynamic_divisor_at_edges = enabled;
        self
    }

    /// Convolve the alpha and padding bytes too instead of copying them.
    pub fn with_process_alpha(mut self, enabled: bool) -> Self {
        self.process_alpha = enabled;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    pub fn weight(&self, row: usize, col: usize) -> i32 {
        self.weights[row * self.size + col]
    }

    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn dynamic_divisor_at_edges(&self) -> bool {
        self.dynamic_divisor_at_edges
    }

    pub fn process_alpha(&self) -> bool {
        self.process_alpha
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::laplacian()
    }
}
