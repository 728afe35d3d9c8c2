use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Corrupt LCP header: {0}")]
    CorruptHeader(String),
    #[error("Unsupported band count {0}, LCP files contain 5, 7, 8 or 10 bands")]
    UnsupportedBandCount(usize),
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("Missing required creation option: {0}")]
    MissingRequiredOption(&'static str),
    #[error("Invalid value '{value}' for creation option {option}: {reason}")]
    InvalidOptionValue {
        option: &'static str,
        value: String,
        reason: String,
    },
    #[error("Unknown value '{value}' for creation option {option}")]
    UnknownUnitOption { option: &'static str, value: String },
    #[error("Unknown code {code} for {field}")]
    UnknownUnitCode { field: &'static str, code: i32 },
    #[error("Raster error: {0}")]
    Geo(#[from] geo::Error),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}
