/// The thematic layers of a landscape file.
///
/// The declaration order is the canonical order: it defines the layout of the header
/// tables, the interleaving of the pixel data and the band numbering of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Elevation,
    Slope,
    Aspect,
    FuelModel,
    CanopyCover,
    CanopyHeight,
    CrownBaseHeight,
    CrownBulkDensity,
    Duff,
    CoarseWoody,
}

impl LayerKind {
    pub const COUNT: usize = 10;

    pub const ALL: [LayerKind; LayerKind::COUNT] = [
        LayerKind::Elevation,
        LayerKind::Slope,
        LayerKind::Aspect,
        LayerKind::FuelModel,
        LayerKind::CanopyCover,
        LayerKind::CanopyHeight,
        LayerKind::CrownBaseHeight,
        LayerKind::CrownBulkDensity,
        LayerKind::Duff,
        LayerKind::CoarseWoody,
    ];

    /// Position of the layer in the canonical order
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            LayerKind::Elevation => "elevation",
            LayerKind::Slope => "slope",
            LayerKind::Aspect => "aspect",
            LayerKind::FuelModel => "fuel model",
            LayerKind::CanopyCover => "canopy cover",
            LayerKind::CanopyHeight => "canopy height",
            LayerKind::CrownBaseHeight => "crown base height",
            LayerKind::CrownBulkDensity => "crown bulk density",
            LayerKind::Duff => "duff",
            LayerKind::CoarseWoody => "coarse woody",
        }
    }

    /// Prefix of the band metadata keys describing this layer
    pub const fn metadata_prefix(self) -> &'static str {
        match self {
            LayerKind::Elevation => "ELEVATION",
            LayerKind::Slope => "SLOPE",
            LayerKind::Aspect => "ASPECT",
            LayerKind::FuelModel => "FUEL_MODEL",
            LayerKind::CanopyCover => "CANOPY_COV",
            LayerKind::CanopyHeight => "CANOPY_HT",
            LayerKind::CrownBaseHeight => "CBH",
            LayerKind::CrownBulkDensity => "CBD",
            LayerKind::Duff => "DUFF",
            LayerKind::CoarseWoody => "CWD",
        }
    }

    /// Name of the creation option that selects the unit (or option) code of this layer
    pub const fn option_name(self) -> &'static str {
        match self {
            LayerKind::Elevation => "ELEVATION_UNIT",
            LayerKind::Slope => "SLOPE_UNIT",
            LayerKind::Aspect => "ASPECT_UNIT",
            LayerKind::FuelModel => "FUEL_MODEL_OPTION",
            LayerKind::CanopyCover => "CANOPY_COV_UNIT",
            LayerKind::CanopyHeight => "CANOPY_HT_UNIT",
            LayerKind::CrownBaseHeight => "CBH_UNIT",
            LayerKind::CrownBulkDensity => "CBD_UNIT",
            LayerKind::Duff => "DUFF_UNIT",
            LayerKind::CoarseWoody => "CWD_OPTION",
        }
    }

    /// Fuel model and coarse woody layers carry an option code instead of a measurement unit
    pub const fn has_option_code(self) -> bool {
        matches!(self, LayerKind::FuelModel | LayerKind::CoarseWoody)
    }

    pub const fn is_mandatory(self) -> bool {
        (self as usize) < LayerKind::CanopyHeight as usize
    }

    pub const fn is_crown_fuel(self) -> bool {
        matches!(
            self,
            LayerKind::CanopyHeight | LayerKind::CrownBaseHeight | LayerKind::CrownBulkDensity
        )
    }

    pub const fn is_ground_fuel(self) -> bool {
        matches!(self, LayerKind::Duff | LayerKind::CoarseWoody)
    }

    /// Metadata key holding the unit or option code (e.g. `SLOPE_UNIT`, `FUEL_MODEL_OPTION`)
    pub fn unit_key(self) -> String {
        if self.has_option_code() {
            format!("{}_OPTION", self.metadata_prefix())
        } else {
            format!("{}_UNIT", self.metadata_prefix())
        }
    }

    /// Metadata key holding the display name of the unit or option code
    pub fn unit_name_key(self) -> String {
        if self.has_option_code() {
            format!("{}_OPTION_DESC", self.metadata_prefix())
        } else {
            format!("{}_UNIT_NAME", self.metadata_prefix())
        }
    }

    /// Metadata key for one of the statistics fields (`MIN`, `MAX`, `NUM_CLASSES`, `VALUES`, `FILE`)
    pub fn metadata_key(self, field: &str) -> String {
        format!("{}_{field}", self.metadata_prefix())
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
