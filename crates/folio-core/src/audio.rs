//! Frequency-band reduction for the audio analyser.

use std::ops::Range;

/// Normalized band energies, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandIntensities {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

/// Bin ranges summed into each band.
#[derive(Clone, Debug)]
pub struct BandRanges {
    pub low: Range<usize>,
    pub mid: Range<usize>,
    pub high: Range<usize>,
}

impl Default for BandRanges {
    /// Split for a 256-point FFT (128 bins).
    fn default() -> Self {
        Self {
            low: 0..8,
            mid: 8..48,
            high: 48..128,
        }
    }
}

/// Sum of the 8-bit magnitudes in `range` divided by the largest possible
/// sum for that range. Ranges are clipped to the buffer; an empty range is 0.
#[inline]
pub fn band_level(bins: &[u8], range: &Range<usize>) -> f32 {
    let end = range.end.min(bins.len());
    let start = range.start.min(end);
    let count = end - start;
    if count == 0 {
        return 0.0;
    }
    let sum: u32 = bins[start..end].iter().map(|&b| b as u32).sum();
    sum as f32 / (count as f32 * 255.0)
}

pub fn band_intensities(bins: &[u8], ranges: &BandRanges) -> BandIntensities {
    BandIntensities {
        low: band_level(bins, &ranges.low),
        mid: band_level(bins, &ranges.mid),
        high: band_level(bins, &ranges.high),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_buffer_is_zero() {
        let bins = [0u8; 128];
        assert_eq!(
            band_intensities(&bins, &BandRanges::default()),
            BandIntensities::default()
        );
    }

    #[test]
    fn saturated_buffer_is_one() {
        let bins = [255u8; 128];
        let b = band_intensities(&bins, &BandRanges::default());
        assert_eq!(b.low, 1.0);
        assert_eq!(b.mid, 1.0);
        assert_eq!(b.high, 1.0);
    }

    #[test]
    fn ranges_are_clipped_to_buffer() {
        let bins = [255u8; 10];
        // 8..10 are present, 10..48 are not
        assert_eq!(band_level(&bins, &(8..48)), 1.0);
        assert_eq!(band_level(&bins, &(48..128)), 0.0);
    }

    #[test]
    fn only_bins_in_range_count() {
        let mut bins = [0u8; 128];
        bins[0] = 255;
        bins[1] = 255;
        let b = band_intensities(&bins, &BandRanges::default());
        assert!((b.low - 2.0 / 8.0).abs() < 1e-6);
        assert_eq!(b.mid, 0.0);
    }
}
