#![warn(clippy::unwrap_used)]

pub type Result<T = ()> = std::result::Result<T, Error>;

mod array;
mod bandindex;
mod cell;
pub mod dataset;
mod error;
mod geotransform;
mod memraster;
mod metadata;
mod rastersize;

pub use array::{Columns, Rows};
#[doc(inline)]
pub use bandindex::{BandIndex, FIRST_BAND, band, band_indexes};
#[doc(inline)]
pub use cell::Cell;
#[doc(inline)]
pub use dataset::RasterDataset;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use geotransform::GeoTransform;
#[doc(inline)]
pub use memraster::MemRaster;
#[doc(inline)]
pub use metadata::Metadata;
#[doc(inline)]
pub use rastersize::RasterSize;

pub type Point<T = f64> = geo_types::Point<T>;
