use std::path::PathBuf;

use crate::{BandIndex, Cell, Error, GeoTransform, Metadata, RasterSize, Result};

/// Read access to a multi band 16-bit raster dataset.
///
/// This is the contract raster format drivers consume when copying data and produce when opening files.
/// Band indexes are 1-based.
pub trait RasterDataset {
    fn raster_size(&self) -> RasterSize;
    fn band_count(&self) -> usize;
    fn geo_transform(&self) -> GeoTransform;

    /// The coordinate reference system as opaque text, empty when unknown
    fn projection(&self) -> &str;

    /// Dataset level metadata
    fn metadata(&self) -> &Metadata;
    fn band_metadata(&self, band: BandIndex) -> Result<&Metadata>;

    /// Reads a rectangular window of a band into `dst`, which must hold exactly `size.cell_count()` values.
    fn read_band_window(&self, band: BandIndex, top_left: Cell, size: RasterSize, dst: &mut [i16]) -> Result;

    /// The files that make up this dataset, empty for in-memory datasets
    fn file_list(&self) -> Vec<PathBuf>;

    /// Reads the full band
    fn read_band(&self, band: BandIndex) -> Result<Vec<i16>> {
        let size = self.raster_size();
        let mut data = vec![0; size.cell_count()];
        self.read_band_window(band, Cell::origin(), size, &mut data)?;
        Ok(data)
    }
}

/// Verifies the band index and the window against the dataset dimensions
pub fn check_band_window(
    raster_size: RasterSize,
    band_count: usize,
    band: BandIndex,
    top_left: Cell,
    size: RasterSize,
    buffer_len: usize,
) -> Result {
    if band.get() > band_count {
        return Err(Error::InvalidBand {
            index: band.get(),
            band_count,
        });
    }

    let row_end = top_left.row.checked_add(size.rows.count());
    let col_end = top_left.col.checked_add(size.cols.count());
    if !top_left.is_valid()
        || size.rows.count() < 0
        || size.cols.count() < 0
        || row_end.is_none_or(|end| end > raster_size.rows.count())
        || col_end.is_none_or(|end| end > raster_size.cols.count())
    {
        return Err(Error::InvalidArgument(format!(
            "Window at ({}, {}) with size {size} is outside of the raster {raster_size}",
            top_left.row, top_left.col
        )));
    }

    if buffer_len != size.cell_count() {
        return Err(Error::SizeMismatch {
            size1: (size.rows.count() as usize, size.cols.count() as usize),
            size2: (buffer_len, 1),
        });
    }

    Ok(())
}

/// Copies a window out of a row-major band buffer
pub fn copy_window(src: &[i16], raster_size: RasterSize, top_left: Cell, size: RasterSize, dst: &mut [i16]) {
    let src_row_len = raster_size.row_length();
    let dst_row_len = size.row_length();
    if dst_row_len == 0 {
        return;
    }

    for (row, dst_row) in dst.chunks_exact_mut(dst_row_len).enumerate() {
        let start = (top_left.row as usize + row) * src_row_len + top_left.col as usize;
        dst_row.copy_from_slice(&src[start..start + dst_row_len]);
    }
}
