use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{Error, LcpDataset, LcpHeader, Result, header::HEADER_SIZE};

/// Decodes a landscape byte stream starting at the current position of the reader
pub fn decode<R: Read + Seek>(reader: &mut R) -> Result<LcpDataset> {
    let start = reader.stream_position()?;
    let stream_size = reader.seek(SeekFrom::End(0))?.saturating_sub(start);
    reader.seek(SeekFrom::Start(start))?;

    let mut reader = BufReader::new(reader);
    let header = LcpHeader::read(&mut reader)?;
    log::debug!(
        "LCP header: {} layers, size {}, cell size ({}, {})",
        header.active_layers().len(),
        header.raster_size(),
        header.cell_size_x,
        header.cell_size_y
    );

    let required_size = header.pixel_data_size()?.saturating_add(HEADER_SIZE as u64);
    if stream_size < required_size {
        return Err(Error::CorruptHeader(format!(
            "the header describes {required_size} bytes of data but the file only contains {stream_size} bytes"
        )));
    }

    let bands = read_pixel_data(&mut reader, &header)?;
    Ok(LcpDataset::new(header, bands))
}

pub(crate) fn open(path: &Path) -> Result<LcpDataset> {
    let mut dataset = decode(&mut File::open(path)?)?;

    let mut files = vec![path.to_path_buf()];
    let mut projection = String::new();
    if let Some(prj_path) = projection_file(path) {
        projection = String::from_utf8_lossy(&std::fs::read(&prj_path)?).into_owned();
        files.push(prj_path);
    }

    dataset.set_source_files(files, projection);
    Ok(dataset)
}

/// The projection file that accompanies a landscape file, if any
pub fn projection_file(path: &Path) -> Option<PathBuf> {
    ["prj", "PRJ"]
        .into_iter()
        .map(|ext| path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// Reads the band interleaved by pixel data one row at a time into a buffer per band
fn read_pixel_data(reader: &mut impl Read, header: &LcpHeader) -> Result<Vec<Vec<i16>>> {
    let size = header.raster_size();
    let band_count = header.active_layers().len();
    let cols = size.row_length();

    let mut bands: Vec<Vec<i16>> = (0..band_count).map(|_| Vec::with_capacity(size.cell_count())).collect();
    let mut row = vec![0; cols * band_count];
    for _ in 0..size.rows.count() {
        reader.read_i16_into::<LittleEndian>(&mut row)?;
        for (index, band) in bands.iter_mut().enumerate() {
            band.extend(row.iter().skip(index).step_by(band_count));
        }
    }

    Ok(bands)
}
