use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Raster dimensions do not match ({}x{}) <-> ({}x{})", .size1.0, .size1.1, .size2.0, .size2.1)]
    SizeMismatch {
        size1: (usize, usize),
        size2: (usize, usize),
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid band index {index} (band count: {band_count})")]
    InvalidBand { index: usize, band_count: usize },
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}
