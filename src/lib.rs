pub use geo;
pub use lcp;
