use std::path::PathBuf;

use crate::{
    BandIndex, Cell, Error, GeoTransform, Metadata, RasterDataset, RasterSize, Result,
    dataset::{check_band_window, copy_window},
};

#[derive(Debug, Clone)]
struct MemBand {
    data: Vec<i16>,
    metadata: Metadata,
}

/// In-memory 16-bit raster dataset, all bands are zero initialized.
#[derive(Debug, Clone)]
pub struct MemRaster {
    size: RasterSize,
    geo_transform: GeoTransform,
    projection: String,
    metadata: Metadata,
    bands: Vec<MemBand>,
}

impl MemRaster {
    pub fn new(size: RasterSize, band_count: usize) -> Self {
        let bands = (0..band_count)
            .map(|_| MemBand {
                data: vec![0; size.cell_count()],
                metadata: Metadata::new(),
            })
            .collect();

        MemRaster {
            size,
            geo_transform: GeoTransform::identity(),
            projection: String::new(),
            metadata: Metadata::new(),
            bands,
        }
    }

    pub fn set_geo_transform(&mut self, geo_transform: GeoTransform) {
        self.geo_transform = geo_transform;
    }

    pub fn set_projection(&mut self, projection: impl Into<String>) {
        self.projection = projection.into();
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn band_metadata_mut(&mut self, band: BandIndex) -> Result<&mut Metadata> {
        Ok(&mut self.band_mut(band)?.metadata)
    }

    /// Sets every cell of the band to `value`
    pub fn fill(&mut self, band: BandIndex, value: i16) -> Result {
        self.band_mut(band)?.data.fill(value);
        Ok(())
    }

    /// Replaces the full band contents, `data` must contain a value for every cell
    pub fn write_band(&mut self, band: BandIndex, data: &[i16]) -> Result {
        self.write_band_window(band, Cell::origin(), self.size, data)
    }

    pub fn write_band_window(&mut self, band: BandIndex, top_left: Cell, size: RasterSize, src: &[i16]) -> Result {
        check_band_window(self.size, self.bands.len(), band, top_left, size, src.len())?;

        let raster_row_len = self.size.row_length();
        let window_row_len = size.row_length();
        if window_row_len == 0 {
            return Ok(());
        }

        let dst = &mut self.band_mut(band)?.data;
        for (row, src_row) in src.chunks_exact(window_row_len).enumerate() {
            let start = (top_left.row as usize + row) * raster_row_len + top_left.col as usize;
            dst[start..start + window_row_len].copy_from_slice(src_row);
        }

        Ok(())
    }

    fn band_ref(&self, band: BandIndex) -> Result<&MemBand> {
        self.bands.get(band.get() - 1).ok_or(Error::InvalidBand {
            index: band.get(),
            band_count: self.bands.len(),
        })
    }

    fn band_mut(&mut self, band: BandIndex) -> Result<&mut MemBand> {
        let band_count = self.bands.len();
        self.bands.get_mut(band.get() - 1).ok_or(Error::InvalidBand {
            index: band.get(),
            band_count,
        })
    }
}

impl RasterDataset for MemRaster {
    fn raster_size(&self) -> RasterSize {
        self.size
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }

    fn projection(&self) -> &str {
        &self.projection
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn band_metadata(&self, band: BandIndex) -> Result<&Metadata> {
        Ok(&self.band_ref(band)?.metadata)
    }

    fn read_band_window(&self, band: BandIndex, top_left: Cell, size: RasterSize, dst: &mut [i16]) -> Result {
        check_band_window(self.size, self.bands.len(), band, top_left, size, dst.len())?;
        copy_window(&self.band_ref(band)?.data, self.size, top_left, size, dst);
        Ok(())
    }

    fn file_list(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}
