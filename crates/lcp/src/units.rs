use crate::{Error, LayerKind, Result};

/// A unit (or option) code with its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub code: i16,
    pub name: &'static str,
}

/// Registry entry: the code stored in the header, the name reported in the metadata
/// and the creation option tokens that select it.
#[derive(Debug)]
pub struct UnitEntry {
    pub code: i16,
    pub name: &'static str,
    pub tokens: &'static [&'static str],
}

impl UnitEntry {
    const fn unit(&self) -> Unit {
        Unit {
            code: self.code,
            name: self.name,
        }
    }
}

const fn entry(code: i16, name: &'static str, tokens: &'static [&'static str]) -> UnitEntry {
    UnitEntry { code, name, tokens }
}

static ELEVATION_UNITS: [UnitEntry; 2] = [
    entry(0, "Meters", &["METERS", "METER"]),
    entry(1, "Feet", &["FEET", "FOOT"]),
];

static SLOPE_UNITS: [UnitEntry; 2] = [entry(0, "Degrees", &["DEGREES"]), entry(1, "Percent", &["PERCENT"])];

static ASPECT_UNITS: [UnitEntry; 3] = [
    entry(0, "Grass categories", &["GRASS_CATEGORIES"]),
    entry(1, "Grass degrees", &["GRASS_DEGREES"]),
    entry(2, "Azimuth degrees", &["AZIMUTH_DEGREES"]),
];

static FUEL_MODEL_OPTIONS: [UnitEntry; 4] = [
    entry(0, "no custom models AND no conversion file needed", &["NO_CUSTOM_AND_NO_FILE"]),
    entry(1, "custom models BUT no conversion file needed", &["CUSTOM_AND_NO_FILE"]),
    entry(2, "no custom models BUT conversion file needed", &["NO_CUSTOM_AND_FILE"]),
    entry(3, "custom models AND conversion file needed", &["CUSTOM_AND_FILE"]),
];

static CANOPY_COVER_UNITS: [UnitEntry; 2] = [
    entry(0, "Categories (0-4)", &["CATEGORIES"]),
    entry(1, "Percent", &["PERCENT"]),
];

// Shared by canopy height and crown base height
static HEIGHT_UNITS: [UnitEntry; 4] = [
    entry(1, "Meters", &["METERS"]),
    entry(2, "Feet", &["FEET"]),
    entry(3, "Meters x 10", &["METERS_X_10"]),
    entry(4, "Feet x 10", &["FEET_X_10"]),
];

static BULK_DENSITY_UNITS: [UnitEntry; 5] = [
    entry(1, "kg/m^3", &["KG_PER_CUBIC_METER"]),
    entry(2, "lb/ft^3", &["POUND_PER_CUBIC_FOOT"]),
    entry(3, "kg/m^3 x 100", &["KG_PER_CUBIC_METER_X_100"]),
    entry(4, "lb/ft^3 x 1000", &["POUND_PER_CUBIC_FOOT_X_1000"]),
    entry(5, "tons/acre x 100", &["TONS_PER_ACRE_X_100"]),
];

// The stored values are scaled by 10 but the reported names are not
static DUFF_UNITS: [UnitEntry; 2] = [
    entry(1, "Mg/ha", &["MG_PER_HECTARE_X_10"]),
    entry(2, "t/ac", &["TONS_PER_ACRE_X_10"]),
];

static COARSE_WOODY_OPTIONS: [UnitEntry; 2] = [
    entry(0, "no coarse woody profile file", &["NO_FILE"]),
    entry(1, "coarse woody profile file needed", &["FILE"]),
];

/// Name reported for codes that are not part of the registry
pub const UNKNOWN_UNIT_NAME: &str = "Unknown";

/// All the units that can be selected for a layer
pub fn unit_table(kind: LayerKind) -> &'static [UnitEntry] {
    match kind {
        LayerKind::Elevation => &ELEVATION_UNITS,
        LayerKind::Slope => &SLOPE_UNITS,
        LayerKind::Aspect => &ASPECT_UNITS,
        LayerKind::FuelModel => &FUEL_MODEL_OPTIONS,
        LayerKind::CanopyCover => &CANOPY_COVER_UNITS,
        LayerKind::CanopyHeight | LayerKind::CrownBaseHeight => &HEIGHT_UNITS,
        LayerKind::CrownBulkDensity => &BULK_DENSITY_UNITS,
        LayerKind::Duff => &DUFF_UNITS,
        LayerKind::CoarseWoody => &COARSE_WOODY_OPTIONS,
    }
}

/// The unit used when no creation option selects one
pub fn default_unit(kind: LayerKind) -> Unit {
    let code = match kind {
        LayerKind::Elevation | LayerKind::Slope | LayerKind::FuelModel | LayerKind::CoarseWoody => 0,
        LayerKind::CanopyCover | LayerKind::Duff => 1,
        LayerKind::Aspect => 2,
        LayerKind::CanopyHeight | LayerKind::CrownBaseHeight | LayerKind::CrownBulkDensity => 3,
    };

    Unit {
        code,
        name: lookup_code(unit_table(kind), code).unwrap_or(UNKNOWN_UNIT_NAME),
    }
}

/// Resolves a creation option token (e.g. `FEET_X_10`, `azimuth degrees`) to the unit code of the layer
pub fn resolve_unit(kind: LayerKind, token: &str) -> Result<Unit> {
    lookup_token(unit_table(kind), token)
        .map(UnitEntry::unit)
        .ok_or_else(|| Error::UnknownUnitOption {
            option: kind.option_name(),
            value: token.to_string(),
        })
}

/// Maps a unit code read from a header to its display name
pub fn decode_unit(kind: LayerKind, code: i16) -> Result<&'static str> {
    lookup_code(unit_table(kind), code).ok_or(Error::UnknownUnitCode {
        field: kind.option_name(),
        code: code as i32,
    })
}

fn token_matches(candidate: &str, token: &str) -> bool {
    token.trim().replace(' ', "_").eq_ignore_ascii_case(candidate)
}

fn lookup_token(table: &'static [UnitEntry], token: &str) -> Option<&'static UnitEntry> {
    table
        .iter()
        .find(|entry| entry.tokens.iter().any(|candidate| token_matches(candidate, token)))
}

fn lookup_code(table: &'static [UnitEntry], code: i16) -> Option<&'static str> {
    table.iter().find(|entry| entry.code == code).map(|entry| entry.name)
}

/// Unit of the ground coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinearUnit {
    #[default]
    Meters,
    Feet,
}

impl LinearUnit {
    pub const OPTION_NAME: &'static str = "LINEAR_UNIT";

    pub fn resolve(token: &str) -> Result<Self> {
        if ["METER", "METERS"].iter().any(|candidate| token_matches(candidate, token)) {
            Ok(LinearUnit::Meters)
        } else if ["FOOT", "FEET"].iter().any(|candidate| token_matches(candidate, token)) {
            Ok(LinearUnit::Feet)
        } else {
            Err(Error::InvalidOptionValue {
                option: Self::OPTION_NAME,
                value: token.to_string(),
                reason: "expected METER or FOOT".to_string(),
            })
        }
    }

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(LinearUnit::Meters),
            1 => Ok(LinearUnit::Feet),
            _ => Err(Error::UnknownUnitCode {
                field: Self::OPTION_NAME,
                code,
            }),
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            LinearUnit::Meters => 0,
            LinearUnit::Feet => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LinearUnit::Meters => "Meters",
            LinearUnit::Feet => "Feet",
        }
    }
}

impl std::fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub const VALID_BAND_COUNTS: [usize; 4] = [5, 7, 8, 10];

static FIVE_LAYERS: [LayerKind; 5] = [
    LayerKind::Elevation,
    LayerKind::Slope,
    LayerKind::Aspect,
    LayerKind::FuelModel,
    LayerKind::CanopyCover,
];

static SEVEN_LAYERS: [LayerKind; 7] = [
    LayerKind::Elevation,
    LayerKind::Slope,
    LayerKind::Aspect,
    LayerKind::FuelModel,
    LayerKind::CanopyCover,
    LayerKind::CanopyHeight,
    LayerKind::CrownBaseHeight,
];

static EIGHT_LAYERS: [LayerKind; 8] = [
    LayerKind::Elevation,
    LayerKind::Slope,
    LayerKind::Aspect,
    LayerKind::FuelModel,
    LayerKind::CanopyCover,
    LayerKind::CanopyHeight,
    LayerKind::CrownBaseHeight,
    LayerKind::CrownBulkDensity,
];

/// The layers, in canonical order, stored by a file with the given number of bands
pub fn layers_for_band_count(band_count: usize) -> Result<&'static [LayerKind]> {
    match band_count {
        5 => Ok(&FIVE_LAYERS),
        7 => Ok(&SEVEN_LAYERS),
        8 => Ok(&EIGHT_LAYERS),
        10 => Ok(&LayerKind::ALL),
        _ => Err(Error::UnsupportedBandCount(band_count)),
    }
}
