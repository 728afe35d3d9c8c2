use std::path::{Path, PathBuf};

use geo::{
    BandIndex, Cell, GeoTransform, Metadata, RasterDataset, RasterSize,
    dataset::{check_band_window, copy_window},
};

use crate::{LayerKind, LcpHeader, LinearUnit, Result, header::LayerHeader, units};

/// A decoded landscape file, the pixel data of all layers is kept in memory.
///
/// Bands are numbered by the present layers in canonical order.
#[derive(Debug, Clone)]
pub struct LcpDataset {
    header: LcpHeader,
    layers: Vec<LayerKind>,
    bands: Vec<Vec<i16>>,
    metadata: Metadata,
    band_metadata: Vec<Metadata>,
    projection: String,
    files: Vec<PathBuf>,
}

impl LcpDataset {
    /// Opens a landscape file, a `.prj` file next to it provides the projection
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        crate::decoder::open(path.as_ref())
    }

    pub(crate) fn new(header: LcpHeader, bands: Vec<Vec<i16>>) -> Self {
        let layers = header.active_layers();
        debug_assert_eq!(layers.len(), bands.len());

        let band_metadata = layers
            .iter()
            .map(|kind| layer_metadata(*kind, header.layer(*kind)))
            .collect();

        LcpDataset {
            metadata: dataset_metadata(&header),
            header,
            layers,
            bands,
            band_metadata,
            projection: String::new(),
            files: Vec::new(),
        }
    }

    pub(crate) fn set_source_files(&mut self, files: Vec<PathBuf>, projection: String) {
        self.files = files;
        self.projection = projection;
    }

    pub fn header(&self) -> &LcpHeader {
        &self.header
    }

    /// The layers stored in the file, in band order
    pub fn layers(&self) -> &[LayerKind] {
        &self.layers
    }

    pub fn band_for_layer(&self, kind: LayerKind) -> Option<BandIndex> {
        let pos = self.layers.iter().position(|layer| *layer == kind)?;
        geo::band(pos + 1)
    }

    pub fn layer_for_band(&self, band: BandIndex) -> Option<LayerKind> {
        self.layers.get(band.get() - 1).copied()
    }

    pub fn latitude(&self) -> i32 {
        self.header.latitude
    }

    pub fn linear_unit(&self) -> Option<LinearUnit> {
        LinearUnit::from_code(self.header.linear_unit).ok()
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    fn band_data(&self, band: BandIndex) -> geo::Result<&[i16]> {
        self.bands.get(band.get() - 1).map(Vec::as_slice).ok_or(geo::Error::InvalidBand {
            index: band.get(),
            band_count: self.bands.len(),
        })
    }
}

fn dataset_metadata(header: &LcpHeader) -> Metadata {
    let linear_unit = match LinearUnit::from_code(header.linear_unit) {
        Ok(unit) => unit.name(),
        Err(err) => {
            log::warn!("{err}, reporting it as {}", units::UNKNOWN_UNIT_NAME);
            units::UNKNOWN_UNIT_NAME
        }
    };

    let mut metadata = Metadata::new();
    metadata.set_item("LATITUDE", header.latitude.to_string());
    metadata.set_item("LINEAR_UNIT", linear_unit);
    metadata.set_item("DESCRIPTION", header.description.as_str());
    metadata
}

fn layer_metadata(kind: LayerKind, layer: &LayerHeader) -> Metadata {
    let unit_name = match units::decode_unit(kind, layer.unit) {
        Ok(name) => name,
        Err(err) => {
            log::warn!("{err}, reporting it as {}", units::UNKNOWN_UNIT_NAME);
            units::UNKNOWN_UNIT_NAME
        }
    };

    let mut metadata = Metadata::new();
    metadata.set_item(kind.unit_key(), layer.unit.to_string());
    metadata.set_item(kind.unit_name_key(), unit_name);
    metadata.set_item(kind.metadata_key("MIN"), layer.min.to_string());
    metadata.set_item(kind.metadata_key("MAX"), layer.max.to_string());
    metadata.set_item(kind.metadata_key("NUM_CLASSES"), layer.num_classes.to_string());
    if layer.is_discrete() {
        let values: Vec<String> = layer.classes.iter().map(i32::to_string).collect();
        metadata.set_item(kind.metadata_key("VALUES"), values.join(","));
    }
    metadata.set_item(kind.metadata_key("FILE"), layer.file.as_str());
    metadata
}

impl RasterDataset for LcpDataset {
    fn raster_size(&self) -> RasterSize {
        self.header.raster_size()
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn geo_transform(&self) -> GeoTransform {
        self.header.geo_transform()
    }

    fn projection(&self) -> &str {
        &self.projection
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn band_metadata(&self, band: BandIndex) -> geo::Result<&Metadata> {
        self.band_metadata.get(band.get() - 1).ok_or(geo::Error::InvalidBand {
            index: band.get(),
            band_count: self.band_metadata.len(),
        })
    }

    fn read_band_window(&self, band: BandIndex, top_left: Cell, size: RasterSize, dst: &mut [i16]) -> geo::Result {
        let raster_size = self.raster_size();
        check_band_window(raster_size, self.bands.len(), band, top_left, size, dst.len())?;
        copy_window(self.band_data(band)?, raster_size, top_left, size, dst);
        Ok(())
    }

    fn file_list(&self) -> Vec<PathBuf> {
        self.files.clone()
    }
}
