use crate::raster::{Raster, Rgb};

/// Mean color and dispersion of a square block of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSimilarity {
    /// The mean of each channel, truncated.
    pub color: Rgb,

    /// Sum of squared channel deviations from the mean, divided by
    /// `3 * size * size`, truncated.
    pub score: u64,
}

/// Measure the `size × size` block anchored at `(x, y)`.
///
/// All of the arithmetic is integer arithmetic. The truncating divisions
/// decide which blocks get split, so they must not be replaced by floating
/// point without changing the resulting trees.
///
/// # Panics
/// If `size` is zero or the block reaches outside of the raster.
pub fn block_similarity(raster: &Raster, x: u32, y: u32, size: u32) -> BlockSimilarity {
    assert!(size > 0, "block size must be at least 1");

    let count = size as u64 * size as u64;

    let mut sum = [0u64; 3];
    for row in y..y + size {
        for col in x..x + size {
            let p = raster.pixel(col, row);
            sum[0] += p.red as u64;
            sum[1] += p.green as u64;
            sum[2] += p.blue as u64;
        }
    }
    let mean = sum.map(|s| s / count);

    let mut dispersion = 0u64;
    for row in y..y + size {
        for col in x..x + size {
            let p = raster.pixel(col, row);
            dispersion += mean[0].abs_diff(p.red as u64).pow(2);
            dispersion += mean[1].abs_diff(p.green as u64).pow(2);
            dispersion += mean[2].abs_diff(p.blue as u64).pow(2);
        }
    }

    BlockSimilarity {
        // Means of 8 bit values always fit in 8 bits
        color: Rgb::new(mean[0] as u8, mean[1] as u8, mean[2] as u8),
        score: dispersion / (3 * count),
    }
}
