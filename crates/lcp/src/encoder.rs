use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use byteorder::{ByteOrder, LittleEndian};
use geo::{BandIndex, Cell, GeoTransform, RasterDataset, RasterSize, Rows, band_indexes};
use tempfile::NamedTempFile;

use crate::{
    CreationOptions, EncodeSettings, Error, LcpDataset, LcpHeader, Result,
    decoder::projection_file,
    header::{DESCRIPTION_SIZE, FILE_NAME_SIZE, truncate_to_field},
    stats::{LayerStatistics, StatisticsAccumulator},
    units::layers_for_band_count,
};

/// Writes the source dataset as a landscape byte stream.
///
/// All validation and the statistics calculation happen before the first byte is written.
/// Returns the header that was written.
pub fn encode<D, W>(src: &D, options: &CreationOptions, writer: &mut W) -> Result<LcpHeader>
where
    D: RasterDataset + ?Sized,
    W: Write,
{
    let header = create_header(src, options)?;
    header.write(writer)?;
    write_pixel_data(src, &header, writer)?;
    Ok(header)
}

/// Creates a landscape file from the source dataset and returns the opened result.
///
/// The data is written to a temporary file next to the destination that is only moved in place
/// when everything succeeded. A non empty source projection is stored in a `.prj` file, a `.prj` file
/// left behind by a previous dataset at the same path is removed when the source has no projection.
pub fn create_copy<D>(path: impl AsRef<Path>, src: &D, options: &CreationOptions) -> Result<LcpDataset>
where
    D: RasterDataset + ?Sized,
{
    let path = path.as_ref();
    let header = create_header(src, options)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut lcp_file = NamedTempFile::new_in(&dir)?;
    {
        let mut writer = BufWriter::new(lcp_file.as_file_mut());
        header.write(&mut writer)?;
        write_pixel_data(src, &header, &mut writer)?;
        writer.flush()?;
    }

    let prj_file = if src.projection().is_empty() {
        None
    } else {
        let mut prj_file = NamedTempFile::new_in(&dir)?;
        prj_file.write_all(src.projection().as_bytes())?;
        prj_file.flush()?;
        Some(prj_file)
    };

    // the landscape file is persisted last, an existing landscape file is only replaced when all writes succeeded
    match prj_file {
        Some(prj_file) => {
            prj_file.persist(path.with_extension("prj")).map_err(|err| err.error)?;
            lcp_file.persist(path).map_err(|err| err.error)?;
        }
        None => {
            lcp_file.persist(path).map_err(|err| err.error)?;
            if let Some(stale_prj) = projection_file(path) {
                log::debug!("Removing projection file {} of the previous dataset", stale_prj.display());
                std::fs::remove_file(stale_prj)?;
            }
        }
    }

    log::debug!("Created landscape file {}", path.display());
    LcpDataset::open(path)
}

fn check_geometry(size: RasterSize, geo_transform: &GeoTransform) -> Result {
    if size.is_empty() {
        return Err(Error::UnsupportedGeometry(format!("empty raster {size}")));
    }

    if !geo_transform.is_axis_aligned() {
        return Err(Error::UnsupportedGeometry(format!(
            "rotated or skewed geotransforms are not supported ({:?})",
            geo_transform.coefficients()
        )));
    }

    let cell_size_valid = |cell_size: f64| cell_size.is_finite() && cell_size != 0.0;
    if !cell_size_valid(geo_transform.cell_size_x()) || !cell_size_valid(geo_transform.cell_size_y()) {
        return Err(Error::UnsupportedGeometry(format!(
            "invalid cell size ({}, {})",
            geo_transform.cell_size_x(),
            geo_transform.cell_size_y()
        )));
    }

    let origin = geo_transform.origin();
    if !origin.x().is_finite() || !origin.y().is_finite() {
        return Err(Error::UnsupportedGeometry(format!(
            "invalid origin ({}, {})",
            origin.x(),
            origin.y()
        )));
    }

    Ok(())
}

fn create_header<D: RasterDataset + ?Sized>(src: &D, options: &CreationOptions) -> Result<LcpHeader> {
    let layers = layers_for_band_count(src.band_count())?;
    let settings = EncodeSettings::from_options(options)?;
    let size = src.raster_size();
    let geo_transform = src.geo_transform();
    check_geometry(size, &geo_transform)?;

    let mut header = LcpHeader {
        latitude: settings.latitude,
        linear_unit: settings.linear_unit.code(),
        description: truncate_to_field(&settings.description, DESCRIPTION_SIZE).to_string(),
        ..Default::default()
    };
    header.set_geometry(size, &geo_transform);

    for (band, kind) in band_indexes(layers.len()).zip(layers.iter().copied()) {
        let stats = layer_statistics(src, band, &settings)?;
        log::debug!(
            "Layer {kind}: range [{}, {}], {} classes",
            stats.min,
            stats.max,
            stats.num_classes()
        );

        let file = src
            .band_metadata(band)?
            .item(&kind.metadata_key("FILE"))
            .map(|file| truncate_to_field(file, FILE_NAME_SIZE).to_string())
            .unwrap_or_default();

        let layer = header.layer_mut(kind);
        layer.present = true;
        layer.unit = settings.unit(kind).code;
        layer.min = i32::from(stats.min);
        layer.max = i32::from(stats.max);
        layer.num_classes = stats.num_classes();
        layer.classes = stats.class_values().iter().copied().map(i32::from).collect();
        layer.file = file;
    }

    Ok(header)
}

fn layer_statistics<D: RasterDataset + ?Sized>(src: &D, band: BandIndex, settings: &EncodeSettings) -> Result<LayerStatistics> {
    if !settings.calculate_stats && !settings.classify_data {
        return Ok(LayerStatistics::unknown());
    }

    let size = src.raster_size();
    let row_size = RasterSize::with_rows_cols(Rows(1), size.cols);
    let mut row = vec![0; size.row_length()];

    let mut accumulator = StatisticsAccumulator::new(settings.classify_data);
    for row_index in 0..size.rows.count() {
        src.read_band_window(band, Cell::from_row_col(row_index, 0), row_size, &mut row)?;
        accumulator.add_values(&row);
    }

    let mut stats = accumulator.finish();
    if !settings.calculate_stats {
        stats.min = 0;
        stats.max = 0;
    }

    Ok(stats)
}

/// Writes the bands interleaved by pixel, one row at a time
fn write_pixel_data<D, W>(src: &D, header: &LcpHeader, writer: &mut W) -> Result
where
    D: RasterDataset + ?Sized,
    W: Write,
{
    let size = header.raster_size();
    let band_count = src.band_count();
    let cols = size.row_length();
    let row_size = RasterSize::with_rows_cols(Rows(1), size.cols);

    let mut band_row = vec![0; cols];
    let mut interleaved = vec![0; cols * band_count];
    let mut bytes = vec![0; interleaved.len() * 2];

    for row in 0..size.rows.count() {
        for (band_offset, band) in band_indexes(band_count).enumerate() {
            src.read_band_window(band, Cell::from_row_col(row, 0), row_size, &mut band_row)?;
            for (col, value) in band_row.iter().enumerate() {
                interleaved[col * band_count + band_offset] = *value;
            }
        }

        LittleEndian::write_i16_into(&interleaved, &mut bytes);
        writer.write_all(&bytes)?;
    }

    Ok(())
}
