//! Band index utilities.

/// 1-based raster band index.
///
/// The band api's use a 1-based index for bands. We use `NonZeroUsize` to
/// make it impossible to represent band index 0.
pub type BandIndex = std::num::NonZeroUsize;

/// Convenience constant for the first band (band 1).
pub const FIRST_BAND: BandIndex = std::num::NonZeroUsize::new(1).unwrap();

/// Create a band index from a 1-based band number, returns `None` for 0
pub const fn band(nr: usize) -> Option<BandIndex> {
    std::num::NonZeroUsize::new(nr)
}

/// Iterate over the band indexes of a dataset with `band_count` bands
pub fn band_indexes(band_count: usize) -> impl Iterator<Item = BandIndex> {
    (1..=band_count).filter_map(band)
}
