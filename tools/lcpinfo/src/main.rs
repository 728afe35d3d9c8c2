use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use geo::{Metadata, RasterDataset, band_indexes};
use lcp::LcpDataset;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[clap(name = "lcpinfo", about = "Print information about a landscape (.lcp) file")]
pub struct Opt {
    pub input: PathBuf,

    /// Only print the raster geometry and the layers
    #[arg(long = "no-metadata")]
    pub no_metadata: bool,
}

fn print_metadata(metadata: &Metadata, indent: &str) {
    for (key, value) in metadata.iter() {
        println!("{indent}{key}={value}");
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let ds = LcpDataset::open(&opt.input).with_context(|| format!("Failed to open {}", opt.input.display()))?;
    log::debug!("Opened {} with {} bands", opt.input.display(), ds.band_count());

    println!("Driver: LCP/FARSITE v.4 Landscape File (.lcp)");
    println!("Files:");
    for file in ds.file_list() {
        println!("  {}", file.display());
    }

    let size = ds.raster_size();
    println!("Size is {}, {}", size.cols, size.rows);

    let gt = ds.geo_transform().coefficients();
    println!("Origin = ({}, {})", gt[0], gt[3]);
    println!("Pixel Size = ({}, {})", gt[1], gt[5]);
    if ds.projection().is_empty() {
        println!("Coordinate System is unknown");
    } else {
        println!("Coordinate System is:\n{}", ds.projection());
    }

    if !opt.no_metadata {
        println!("Metadata:");
        print_metadata(ds.metadata(), "  ");
    }

    for band in band_indexes(ds.band_count()) {
        let layer = ds.layer_for_band(band).map(|kind| kind.name()).unwrap_or("unknown");
        println!("Band {band} Type=Int16, Layer={layer}");
        if !opt.no_metadata {
            println!("  Metadata:");
            print_metadata(ds.band_metadata(band)?, "    ");
        }
    }

    Ok(())
}
