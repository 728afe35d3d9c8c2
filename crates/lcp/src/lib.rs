//! Reading and writing of FARSITE/FlamMap landscape (`.lcp`) files.
//!
//! A landscape file stores up to ten 16-bit layers describing terrain, surface fuels and
//! canopy fuels on a regular grid, preceded by a fixed size header with the layer statistics,
//! unit codes and the geometry.

#![warn(clippy::unwrap_used)]

pub type Result<T = ()> = std::result::Result<T, Error>;

mod dataset;
mod decoder;
mod encoder;
mod error;
mod header;
mod layer;
mod options;
mod stats;
mod units;

#[doc(inline)]
pub use dataset::LcpDataset;
pub use decoder::{decode, projection_file};
pub use encoder::{create_copy, encode};
#[doc(inline)]
pub use error::Error;
pub use header::{DESCRIPTION_SIZE, FILE_NAME_SIZE, HEADER_SIZE, LayerHeader, LcpHeader};
#[doc(inline)]
pub use layer::LayerKind;
pub use options::{CreationOptions, EncodeSettings};
pub use stats::{Classification, LayerStatistics, MAX_CLASSES, StatisticsAccumulator};
pub use units::{
    LinearUnit, UNKNOWN_UNIT_NAME, Unit, UnitEntry, VALID_BAND_COUNTS, decode_unit, default_unit, layers_for_band_count,
    resolve_unit, unit_table,
};
