use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use geo::{Columns, GeoTransform, Point, RasterSize, Rows};

use crate::{Error, LayerKind, Result, stats::MAX_CLASSES};

/// Size of the fixed header, the pixel data starts right after it
pub const HEADER_SIZE: usize = 7336;
pub const FILE_NAME_SIZE: usize = 256;
pub const DESCRIPTION_SIZE: usize = 512;

const FUELS_ABSENT: i32 = 20;
const FUELS_PRESENT: i32 = 21;

const STATS_OFFSET: u64 = 44;
const LAYER_STATS_SIZE: u64 = 12 + MAX_CLASSES as u64 * 4;
const GEOMETRY_OFFSET: u64 = STATS_OFFSET + LayerKind::COUNT as u64 * LAYER_STATS_SIZE;

/// Per layer part of the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerHeader {
    pub present: bool,
    /// Unit or option code
    pub unit: i16,
    pub min: i32,
    pub max: i32,
    /// Number of distinct values, -1 (or 0) for continuous layers
    pub num_classes: i32,
    /// The distinct values of a discrete layer, at most `MAX_CLASSES`
    pub classes: Vec<i32>,
    /// Path of the file the layer was created from
    pub file: String,
}

impl LayerHeader {
    pub fn is_discrete(&self) -> bool {
        self.num_classes > 0
    }
}

/// The fixed size header of a landscape file.
///
/// Layout (little endian):
/// ```text
/// 0     i32      crown fuels flag (20 absent, 21 present)
/// 4     i32      ground fuels flag (20 absent, 21 present)
/// 8     i32      latitude
/// 12    4 x f64  west, east, south, north
/// 44    10 x     { i32 min, i32 max, i32 class count, 100 x i32 classes }
/// 4164  i32      columns
/// 4168  i32      rows
/// 4172  4 x f64  east, west, north, south
/// 4204  i32      linear unit
/// 4208  2 x f64  cell size x, cell size y (negative for north up data)
/// 4224  10 x i16 unit codes
/// 4244  10 x     256 byte source file names
/// 6804  512 byte description
/// 7316  10 x i16 layer presence flags
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LcpHeader {
    pub latitude: i32,
    pub linear_unit: i32,
    pub rows: i32,
    pub cols: i32,
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
    pub cell_size_x: f64,
    pub cell_size_y: f64,
    /// Indexed by the canonical layer order
    pub layers: [LayerHeader; LayerKind::COUNT],
    pub description: String,
}

impl LcpHeader {
    pub fn layer(&self, kind: LayerKind) -> &LayerHeader {
        &self.layers[kind.index()]
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut LayerHeader {
        &mut self.layers[kind.index()]
    }

    /// The present layers in canonical order, this is also the band order
    pub fn active_layers(&self) -> Vec<LayerKind> {
        LayerKind::ALL
            .into_iter()
            .filter(|kind| self.layer(*kind).present)
            .collect()
    }

    pub fn crown_fuels(&self) -> bool {
        LayerKind::ALL
            .iter()
            .any(|kind| kind.is_crown_fuel() && self.layer(*kind).present)
    }

    pub fn ground_fuels(&self) -> bool {
        LayerKind::ALL
            .iter()
            .any(|kind| kind.is_ground_fuel() && self.layer(*kind).present)
    }

    pub fn raster_size(&self) -> RasterSize {
        RasterSize::with_rows_cols(Rows(self.rows), Columns(self.cols))
    }

    pub fn geo_transform(&self) -> GeoTransform {
        let x = if self.cell_size_x > 0.0 { self.west } else { self.east };
        let y = if self.cell_size_y < 0.0 { self.north } else { self.south };
        GeoTransform::from_origin_and_cell_size(Point::new(x, y), self.cell_size_x, self.cell_size_y)
    }

    /// Derives the extent and cell sizes from an axis aligned transform
    pub fn set_geometry(&mut self, size: RasterSize, geo_transform: &GeoTransform) {
        let origin = geo_transform.origin();
        let x_end = origin.x() + size.cols.count() as f64 * geo_transform.cell_size_x();
        let y_end = origin.y() + size.rows.count() as f64 * geo_transform.cell_size_y();

        self.rows = size.rows.count();
        self.cols = size.cols.count();
        self.west = origin.x().min(x_end);
        self.east = origin.x().max(x_end);
        self.south = origin.y().min(y_end);
        self.north = origin.y().max(y_end);
        self.cell_size_x = geo_transform.cell_size_x();
        self.cell_size_y = geo_transform.cell_size_y();
    }

    /// Number of bytes of pixel data following the header
    pub fn pixel_data_size(&self) -> Result<u64> {
        (self.rows.max(0) as u64)
            .checked_mul(self.cols.max(0) as u64)
            .and_then(|cells| cells.checked_mul(self.active_layers().len() as u64))
            .and_then(|values| values.checked_mul(std::mem::size_of::<i16>() as u64))
            .ok_or_else(|| Error::CorruptHeader(format!("raster dimensions overflow ({} x {})", self.rows, self.cols)))
    }

    pub fn read(reader: &mut impl Read) -> Result<Self> {
        let mut buf = vec![0; HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(|err| match err.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                Error::CorruptHeader(format!("file is smaller than the {HEADER_SIZE} byte header"))
            }
            _ => Error::IOError(err),
        })?;

        Self::parse(&buf)
    }

    fn parse(buf: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(buf);
        let mut header = LcpHeader::default();

        let crown_flag = read_fuels_flag(&mut cursor, "crown")?;
        let ground_flag = read_fuels_flag(&mut cursor, "ground")?;
        header.latitude = cursor.read_i32::<LittleEndian>()?;

        // The extent is repeated after the layer statistics, that copy is used
        cursor.set_position(STATS_OFFSET);
        for (kind, layer) in LayerKind::ALL.iter().zip(header.layers.iter_mut()) {
            layer.min = cursor.read_i32::<LittleEndian>()?;
            layer.max = cursor.read_i32::<LittleEndian>()?;
            layer.num_classes = cursor.read_i32::<LittleEndian>()?;

            let mut classes = [0; MAX_CLASSES];
            cursor.read_i32_into::<LittleEndian>(&mut classes)?;
            if layer.num_classes > MAX_CLASSES as i32 {
                log::debug!("The {kind} layer reports {} classes, only {MAX_CLASSES} are stored", layer.num_classes);
            }

            if layer.num_classes > 0 {
                layer.classes = classes[..(layer.num_classes as usize).min(MAX_CLASSES)].to_vec();
            }
        }

        debug_assert_eq!(cursor.position(), GEOMETRY_OFFSET);
        header.cols = cursor.read_i32::<LittleEndian>()?;
        header.rows = cursor.read_i32::<LittleEndian>()?;
        header.east = cursor.read_f64::<LittleEndian>()?;
        header.west = cursor.read_f64::<LittleEndian>()?;
        header.north = cursor.read_f64::<LittleEndian>()?;
        header.south = cursor.read_f64::<LittleEndian>()?;
        header.linear_unit = cursor.read_i32::<LittleEndian>()?;
        header.cell_size_x = cursor.read_f64::<LittleEndian>()?;
        header.cell_size_y = cursor.read_f64::<LittleEndian>()?;

        for layer in header.layers.iter_mut() {
            layer.unit = cursor.read_i16::<LittleEndian>()?;
        }

        for layer in header.layers.iter_mut() {
            layer.file = read_fixed_string(&mut cursor, FILE_NAME_SIZE)?;
        }

        header.description = read_fixed_string(&mut cursor, DESCRIPTION_SIZE)?;

        for (kind, layer) in LayerKind::ALL.iter().zip(header.layers.iter_mut()) {
            layer.present = match cursor.read_i16::<LittleEndian>()? {
                0 => false,
                1 => true,
                flag => {
                    return Err(Error::CorruptHeader(format!("invalid presence flag {flag} for the {kind} layer")));
                }
            };
        }

        header.validate(crown_flag, ground_flag)?;
        Ok(header)
    }

    fn validate(&self, crown_flag: i32, ground_flag: i32) -> Result {
        if self.layers.iter().all(|layer| !layer.present) {
            return Err(Error::CorruptHeader("no layers are present".to_string()));
        }

        if (crown_flag == FUELS_PRESENT) != self.crown_fuels() {
            return Err(Error::CorruptHeader(format!(
                "crown fuels flag {crown_flag} does not match the present layers"
            )));
        }

        if (ground_flag == FUELS_PRESENT) != self.ground_fuels() {
            return Err(Error::CorruptHeader(format!(
                "ground fuels flag {ground_flag} does not match the present layers"
            )));
        }

        if self.rows <= 0 || self.cols <= 0 {
            return Err(Error::CorruptHeader(format!(
                "invalid raster dimensions (rows: {}, cols: {})",
                self.rows, self.cols
            )));
        }

        Ok(())
    }

    pub fn write(&self, writer: &mut impl Write) -> Result {
        writer.write_i32::<LittleEndian>(fuels_flag(self.crown_fuels()))?;
        writer.write_i32::<LittleEndian>(fuels_flag(self.ground_fuels()))?;
        writer.write_i32::<LittleEndian>(self.latitude)?;
        writer.write_f64::<LittleEndian>(self.west)?;
        writer.write_f64::<LittleEndian>(self.east)?;
        writer.write_f64::<LittleEndian>(self.south)?;
        writer.write_f64::<LittleEndian>(self.north)?;

        for layer in &self.layers {
            writer.write_i32::<LittleEndian>(layer.min)?;
            writer.write_i32::<LittleEndian>(layer.max)?;
            writer.write_i32::<LittleEndian>(layer.num_classes)?;
            for i in 0..MAX_CLASSES {
                writer.write_i32::<LittleEndian>(layer.classes.get(i).copied().unwrap_or(0))?;
            }
        }

        writer.write_i32::<LittleEndian>(self.cols)?;
        writer.write_i32::<LittleEndian>(self.rows)?;
        writer.write_f64::<LittleEndian>(self.east)?;
        writer.write_f64::<LittleEndian>(self.west)?;
        writer.write_f64::<LittleEndian>(self.north)?;
        writer.write_f64::<LittleEndian>(self.south)?;
        writer.write_i32::<LittleEndian>(self.linear_unit)?;
        writer.write_f64::<LittleEndian>(self.cell_size_x)?;
        writer.write_f64::<LittleEndian>(self.cell_size_y)?;

        for layer in &self.layers {
            writer.write_i16::<LittleEndian>(layer.unit)?;
        }

        for layer in &self.layers {
            write_fixed_string(writer, &layer.file, FILE_NAME_SIZE)?;
        }

        write_fixed_string(writer, &self.description, DESCRIPTION_SIZE)?;

        for layer in &self.layers {
            writer.write_i16::<LittleEndian>(i16::from(layer.present))?;
        }

        Ok(())
    }
}

const fn fuels_flag(present: bool) -> i32 {
    if present { FUELS_PRESENT } else { FUELS_ABSENT }
}

fn read_fuels_flag(reader: &mut impl Read, name: &str) -> Result<i32> {
    let flag = reader.read_i32::<LittleEndian>()?;
    if flag != FUELS_ABSENT && flag != FUELS_PRESENT {
        return Err(Error::CorruptHeader(format!("invalid {name} fuels flag {flag}")));
    }

    Ok(flag)
}

/// Longest prefix of `value` that fits a NUL terminated field of `size` bytes without splitting a character
pub fn truncate_to_field(value: &str, size: usize) -> &str {
    let mut len = value.len().min(size.saturating_sub(1));
    while !value.is_char_boundary(len) {
        len -= 1;
    }
    &value[..len]
}

fn read_fixed_string(reader: &mut impl Read, size: usize) -> Result<String> {
    let mut buf = vec![0; size];
    reader.read_exact(&mut buf)?;
    let len = buf.iter().position(|&b| b == 0).unwrap_or(size);
    Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
}

fn write_fixed_string(writer: &mut impl Write, value: &str, size: usize) -> Result {
    let value = truncate_to_field(value, size);
    writer.write_all(value.as_bytes())?;
    writer.write_all(&vec![0; size - value.len()])?;
    Ok(())
}
