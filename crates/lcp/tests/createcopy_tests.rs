#[cfg(test)]
mod tests {
    use std::path::Path;

    use approx::assert_relative_eq;
    use geo::{BandIndex, Columns, GeoTransform, MemRaster, RasterDataset, RasterSize, Rows, band, band_indexes};
    use lcp::{CreationOptions, Error, LcpDataset, Result, VALID_BAND_COUNTS};
    use rand::rngs::StdRng;
    use rand::{Rng as _, SeedableRng};
    use tempfile::TempDir;

    const PROJECTION: &str = r#"PROJCS["WGS 84 / UTM zone 11N",GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["latitude_of_origin",0],PARAMETER["central_meridian",-117],PARAMETER["scale_factor",0.9996],PARAMETER["false_easting",500000],PARAMETER["false_northing",0],UNIT["metre",1]]"#;

    fn test_size() -> RasterSize {
        RasterSize::with_rows_cols(Rows(10), Columns(20))
    }

    fn test_transform() -> GeoTransform {
        GeoTransform::new([500000.0, 30.0, 0.0, 4100000.0, 0.0, -30.0])
    }

    fn nth_band(nr: usize) -> BandIndex {
        band(nr).expect("band numbers start at 1")
    }

    fn zero_raster(band_count: usize) -> MemRaster {
        let mut ras = MemRaster::new(test_size(), band_count);
        ras.set_geo_transform(test_transform());
        ras
    }

    fn random_raster(band_count: usize) -> Result<MemRaster> {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut ras = zero_raster(band_count);
        for band in band_indexes(band_count) {
            let data: Vec<i16> = (0..test_size().cell_count()).map(|_| rng.random()).collect();
            ras.write_band(band, &data)?;
        }
        Ok(ras)
    }

    fn options(extra: &[(&str, &str)]) -> CreationOptions {
        let mut options = CreationOptions::from(&[("LATITUDE", "0"), ("LINEAR_UNIT", "METER")]);
        for (name, value) in extra {
            options.set(name, value);
        }
        options
    }

    fn dir_is_empty(dir: &Path) -> Result<bool> {
        Ok(std::fs::read_dir(dir)?.next().is_none())
    }

    fn assert_same_bands(expected: &dyn RasterDataset, actual: &dyn RasterDataset) -> Result {
        assert_eq!(expected.band_count(), actual.band_count());
        assert_eq!(expected.raster_size(), actual.raster_size());
        for band in band_indexes(expected.band_count()) {
            assert_eq!(expected.read_band(band)?, actual.read_band(band)?, "band {band}");
        }
        Ok(())
    }

    #[test_log::test]
    fn roundtrip_supported_band_counts() -> Result {
        let tmp = TempDir::new()?;

        for band_count in VALID_BAND_COUNTS {
            let src = random_raster(band_count)?;
            let path = tmp.path().join(format!("landscape_{band_count}.lcp"));

            let created = lcp::create_copy(&path, &src, &options(&[]))?;
            assert_same_bands(&src, &created)?;

            let reopened = LcpDataset::open(&path)?;
            assert_same_bands(&src, &reopened)?;
            assert_relative_eq!(reopened.geo_transform(), test_transform());
            assert_eq!(reopened.layers(), lcp::layers_for_band_count(band_count)?);
        }

        Ok(())
    }

    #[test]
    fn unsupported_band_counts() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");

        for band_count in [0, 1, 2, 3, 4, 6, 9, 11] {
            let src = zero_raster(band_count);
            match lcp::create_copy(&path, &src, &options(&[])) {
                Err(Error::UnsupportedBandCount(count)) => assert_eq!(count, band_count),
                other => panic!("Unexpected result for {band_count} bands: {other:?}"),
            }
        }

        assert!(dir_is_empty(tmp.path())?);
        Ok(())
    }

    #[test]
    fn unknown_unit_option_creates_no_file() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");

        let result = lcp::create_copy(&path, &zero_raster(5), &options(&[("ELEVATION_UNIT", "FURLONG")]));
        assert!(matches!(result, Err(Error::UnknownUnitOption { option: "ELEVATION_UNIT", .. })));
        assert!(!path.exists());
        assert!(dir_is_empty(tmp.path())?);
        Ok(())
    }

    #[test]
    fn required_options() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");
        let src = zero_raster(5);

        let no_latitude = CreationOptions::from(&[("LINEAR_UNIT", "METER")]);
        assert!(matches!(
            lcp::create_copy(&path, &src, &no_latitude),
            Err(Error::MissingRequiredOption("LATITUDE"))
        ));

        let no_unit = CreationOptions::from(&[("LATITUDE", "10")]);
        assert!(matches!(
            lcp::create_copy(&path, &src, &no_unit),
            Err(Error::MissingRequiredOption("LINEAR_UNIT"))
        ));

        assert!(matches!(
            lcp::create_copy(&path, &src, &options(&[("LATITUDE", "-91")])),
            Err(Error::InvalidOptionValue { option: "LATITUDE", .. })
        ));

        assert!(dir_is_empty(tmp.path())?);
        Ok(())
    }

    #[test]
    fn latitude_and_linear_unit() -> Result {
        let tmp = TempDir::new()?;

        let ds = lcp::create_copy(tmp.path().join("meters.lcp"), &zero_raster(8), &options(&[]))?;
        assert_eq!(ds.metadata().item("LATITUDE"), Some("0"));
        assert_eq!(ds.metadata().item("LINEAR_UNIT"), Some("Meters"));

        let ds = lcp::create_copy(
            tmp.path().join("feet.lcp"),
            &zero_raster(8),
            &options(&[("LATITUDE", "45"), ("LINEAR_UNIT", "FOOT")]),
        )?;
        assert_eq!(ds.metadata().item("LATITUDE"), Some("45"));
        assert_eq!(ds.metadata().item("LINEAR_UNIT"), Some("Feet"));
        assert_eq!(ds.latitude(), 45);
        Ok(())
    }

    #[test]
    fn crown_bulk_density_unit() -> Result {
        let tmp = TempDir::new()?;
        let ds = lcp::create_copy(
            tmp.path().join("landscape.lcp"),
            &zero_raster(8),
            &options(&[("CBD_UNIT", "KG_PER_CUBIC_METER_X_100")]),
        )?;

        let name = ds.band_metadata(nth_band(8))?.item("CBD_UNIT_NAME").unwrap_or_default();
        assert!(name.eq_ignore_ascii_case("kg/m^3 x 100"));
        Ok(())
    }

    #[test]
    fn unit_options_for_every_layer() -> Result {
        let cases: [(&[(&str, &str)], usize, &str, &str); 13] = [
            (&[("ELEVATION_UNIT", "FEET")], 1, "ELEVATION_UNIT_NAME", "Feet"),
            (&[("ELEVATION_UNIT", "METERS")], 1, "ELEVATION_UNIT_NAME", "Meters"),
            (&[("SLOPE_UNIT", "PERCENT")], 2, "SLOPE_UNIT_NAME", "Percent"),
            (&[("SLOPE_UNIT", "DEGREES")], 2, "SLOPE_UNIT_NAME", "Degrees"),
            (&[("ASPECT_UNIT", "GRASS_CATEGORIES")], 3, "ASPECT_UNIT_NAME", "Grass categories"),
            (&[("ASPECT_UNIT", "GRASS_DEGREES")], 3, "ASPECT_UNIT_NAME", "Grass degrees"),
            (&[("ASPECT_UNIT", "AZIMUTH_DEGREES")], 3, "ASPECT_UNIT_NAME", "Azimuth degrees"),
            (&[("FUEL_MODEL_OPTION", "CUSTOM_AND_FILE")], 4, "FUEL_MODEL_OPTION_DESC", "custom models AND conversion file needed"),
            (&[("CANOPY_COV_UNIT", "CATEGORIES")], 5, "CANOPY_COV_UNIT_NAME", "Categories (0-4)"),
            (&[("CANOPY_HT_UNIT", "FEET_X_10")], 6, "CANOPY_HT_UNIT_NAME", "Feet x 10"),
            (&[("CBH_UNIT", "METERS")], 7, "CBH_UNIT_NAME", "Meters"),
            (&[("DUFF_UNIT", "TONS_PER_ACRE_X_10")], 9, "DUFF_UNIT_NAME", "t/ac"),
            (&[("CWD_OPTION", "FILE")], 10, "CWD_OPTION_DESC", "coarse woody profile file needed"),
        ];

        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");
        let src = zero_raster(10);
        for (extra, band_nr, key, expected) in cases {
            let ds = lcp::create_copy(&path, &src, &options(extra))?;
            assert_eq!(ds.band_metadata(nth_band(band_nr))?.item(key), Some(expected), "{extra:?}");
        }

        // defaults
        let ds = lcp::create_copy(&path, &src, &options(&[]))?;
        assert_eq!(ds.band_metadata(nth_band(9))?.item("DUFF_UNIT_NAME"), Some("Mg/ha"));
        assert_eq!(ds.band_metadata(nth_band(8))?.item("CBD_UNIT"), Some("3"));
        assert_eq!(ds.band_metadata(nth_band(5))?.item("CANOPY_COV_UNIT_NAME"), Some("Percent"));
        Ok(())
    }

    #[test]
    fn description() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");

        let ds = lcp::create_copy(&path, &zero_raster(5), &options(&[("DESCRIPTION", "Test landscape file")]))?;
        assert_eq!(ds.metadata().item("DESCRIPTION"), Some("Test landscape file"));

        let long_description = "d".repeat(1000);
        let ds = lcp::create_copy(&path, &zero_raster(5), &options(&[("DESCRIPTION", long_description.as_str())]))?;
        assert_eq!(ds.description(), &long_description[..511]);
        Ok(())
    }

    #[test]
    fn class_threshold() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");
        let cell_count = test_size().cell_count();

        let mut src = zero_raster(5);
        let hundred: Vec<i16> = (0..cell_count).map(|i| (i % 100) as i16).collect();
        let hundred_and_one: Vec<i16> = (0..cell_count).map(|i| (i % 101) as i16).collect();
        src.write_band(nth_band(1), &hundred)?;
        src.write_band(nth_band(2), &hundred_and_one)?;

        let ds = lcp::create_copy(&path, &src, &options(&[]))?;

        let elevation = ds.band_metadata(nth_band(1))?;
        assert_eq!(elevation.item("ELEVATION_NUM_CLASSES"), Some("100"));
        assert_eq!(elevation.item("ELEVATION_VALUES").map(|v| v.split(',').count()), Some(100));
        assert_eq!(elevation.item("ELEVATION_MIN"), Some("0"));
        assert_eq!(elevation.item("ELEVATION_MAX"), Some("99"));

        let slope = ds.band_metadata(nth_band(2))?;
        assert_eq!(slope.item("SLOPE_NUM_CLASSES"), Some("-1"));
        assert!(!slope.contains("SLOPE_VALUES"));
        assert_eq!(slope.item("SLOPE_MAX"), Some("100"));

        // constant layer
        let aspect = ds.band_metadata(nth_band(3))?;
        assert_eq!(aspect.item("ASPECT_NUM_CLASSES"), Some("1"));
        assert_eq!(aspect.item("ASPECT_VALUES"), Some("0"));
        Ok(())
    }

    #[test]
    fn negative_values() -> Result {
        let tmp = TempDir::new()?;
        let mut src = zero_raster(5);
        for band in band_indexes(5) {
            src.fill(band, -9999)?;
        }

        let ds = lcp::create_copy(tmp.path().join("landscape.lcp"), &src, &options(&[]))?;
        assert_same_bands(&src, &ds)?;
        assert_eq!(ds.band_metadata(nth_band(4))?.item("FUEL_MODEL_MIN"), Some("-9999"));
        Ok(())
    }

    #[test]
    fn unsupported_geometry() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");

        let mut rotated = zero_raster(5);
        rotated.set_geo_transform(GeoTransform::new([500000.0, 30.0, 1.5, 4100000.0, 1.5, -30.0]));
        assert!(matches!(
            lcp::create_copy(&path, &rotated, &options(&[])),
            Err(Error::UnsupportedGeometry(_))
        ));

        let mut nan_cell_size = zero_raster(5);
        nan_cell_size.set_geo_transform(GeoTransform::new([0.0, f64::NAN, 0.0, 0.0, 0.0, -30.0]));
        assert!(matches!(
            lcp::create_copy(&path, &nan_cell_size, &options(&[])),
            Err(Error::UnsupportedGeometry(_))
        ));

        assert!(dir_is_empty(tmp.path())?);
        Ok(())
    }

    #[test]
    fn south_up_transform() -> Result {
        let tmp = TempDir::new()?;
        let transform = GeoTransform::new([-120.0, 0.5, 0.0, 35.0, 0.0, 0.25]);
        let mut src = random_raster(5)?;
        src.set_geo_transform(transform);

        let ds = lcp::create_copy(tmp.path().join("landscape.lcp"), &src, &options(&[]))?;
        assert_relative_eq!(ds.geo_transform(), transform);
        assert_same_bands(&src, &ds)?;
        Ok(())
    }

    #[test]
    fn projection_file() -> Result {
        let tmp = TempDir::new()?;

        let without_prj = tmp.path().join("no_projection.lcp");
        let ds = lcp::create_copy(&without_prj, &zero_raster(5), &options(&[]))?;
        assert_eq!(ds.file_list(), vec![without_prj.clone()]);
        assert!(ds.projection().is_empty());

        let with_prj = tmp.path().join("projection.lcp");
        let mut src = zero_raster(5);
        src.set_projection(PROJECTION);
        let ds = lcp::create_copy(&with_prj, &src, &options(&[]))?;
        assert_eq!(ds.file_list(), vec![with_prj.clone(), with_prj.with_extension("prj")]);
        assert_eq!(ds.projection(), PROJECTION);

        let reopened = LcpDataset::open(&with_prj)?;
        assert_eq!(reopened.file_list().len(), 2);
        assert_eq!(reopened.projection(), PROJECTION);
        Ok(())
    }

    #[test_log::test]
    fn overwrite_without_projection_removes_projection_file() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");

        let mut projected = zero_raster(5);
        projected.set_projection(r#"LOCAL_CS["old"]"#);
        lcp::create_copy(&path, &projected, &options(&[]))?;
        assert!(path.with_extension("prj").is_file());

        let ds = lcp::create_copy(&path, &zero_raster(5), &options(&[]))?;
        assert!(ds.projection().is_empty());
        assert_eq!(ds.file_list(), vec![path.clone()]);
        assert!(!path.with_extension("prj").exists());

        let reopened = LcpDataset::open(&path)?;
        assert!(reopened.projection().is_empty());
        assert_eq!(reopened.file_list().len(), 1);
        Ok(())
    }

    #[test]
    fn failed_projection_write_keeps_existing_file() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");

        let original = zero_raster(5);
        lcp::create_copy(&path, &original, &options(&[]))?;
        std::fs::create_dir(path.with_extension("prj"))?;

        let mut src = random_raster(5)?;
        src.set_projection(PROJECTION);
        assert!(matches!(
            lcp::create_copy(&path, &src, &options(&[])),
            Err(Error::IOError(_))
        ));

        let reopened = LcpDataset::open(&path)?;
        assert_same_bands(&original, &reopened)?;
        assert!(reopened.projection().is_empty());
        // no temporary files are left behind
        assert_eq!(std::fs::read_dir(tmp.path())?.count(), 2);
        Ok(())
    }

    #[test]
    fn source_file_metadata_is_preserved() -> Result {
        let tmp = TempDir::new()?;
        let first = lcp::create_copy(tmp.path().join("first.lcp"), &zero_raster(5), &options(&[]))?;

        let mut src = zero_raster(5);
        src.band_metadata_mut(nth_band(1))?.set_item("ELEVATION_FILE", "/data/dem.asc");
        let second = lcp::create_copy(tmp.path().join("second.lcp"), &src, &options(&[]))?;
        assert_eq!(second.band_metadata(nth_band(1))?.item("ELEVATION_FILE"), Some("/data/dem.asc"));

        // a decoded dataset can be copied again
        let third = lcp::create_copy(tmp.path().join("third.lcp"), &first, &options(&[("LATITUDE", "33")]))?;
        assert_same_bands(&first, &third)?;
        assert_eq!(third.metadata().item("LATITUDE"), Some("33"));
        Ok(())
    }

    #[test]
    fn create_in_new_directory() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("sub").join("dir").join("landscape.lcp");
        let ds = lcp::create_copy(&path, &zero_raster(7), &options(&[]))?;
        assert_eq!(ds.band_count(), 7);
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn corrupt_files() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");
        lcp::create_copy(&path, &zero_raster(5), &options(&[]))?;
        let valid = std::fs::read(&path)?;

        let corrupt_path = tmp.path().join("corrupt.lcp");
        let mut bytes = valid.clone();
        bytes[0..4].copy_from_slice(&7i32.to_le_bytes());
        std::fs::write(&corrupt_path, &bytes)?;
        assert!(matches!(LcpDataset::open(&corrupt_path), Err(Error::CorruptHeader(_))));

        std::fs::write(&corrupt_path, &valid[..1000])?;
        assert!(matches!(LcpDataset::open(&corrupt_path), Err(Error::CorruptHeader(_))));

        std::fs::write(&corrupt_path, &valid[..valid.len() - 2])?;
        assert!(matches!(LcpDataset::open(&corrupt_path), Err(Error::CorruptHeader(_))));

        assert!(matches!(
            LcpDataset::open(tmp.path().join("missing.lcp")),
            Err(Error::IOError(_))
        ));
        Ok(())
    }

    #[test_log::test]
    fn unknown_unit_code_is_reported() -> Result {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("landscape.lcp");
        lcp::create_copy(&path, &zero_raster(5), &options(&[]))?;

        // the unit codes start at offset 4224, one i16 per layer
        let mut bytes = std::fs::read(&path)?;
        let slope_unit_offset = 4224 + 2;
        bytes[slope_unit_offset..slope_unit_offset + 2].copy_from_slice(&42i16.to_le_bytes());
        std::fs::write(&path, &bytes)?;

        let ds = LcpDataset::open(&path)?;
        let slope = ds.band_metadata(nth_band(2))?;
        assert_eq!(slope.item("SLOPE_UNIT"), Some("42"));
        assert_eq!(slope.item("SLOPE_UNIT_NAME"), Some("Unknown"));
        Ok(())
    }

    #[test]
    fn encode_to_stream() -> Result {
        let src = random_raster(10)?;
        let mut cursor = std::io::Cursor::new(Vec::new());
        let header = lcp::encode(&src, &options(&[("DESCRIPTION", "in memory")]), &mut cursor)?;
        assert!(header.crown_fuels());
        assert!(header.ground_fuels());

        cursor.set_position(0);
        let ds = lcp::decode(&mut cursor)?;
        assert_same_bands(&src, &ds)?;
        assert_eq!(ds.description(), "in memory");
        assert!(ds.file_list().is_empty());
        Ok(())
    }
}
