use std::collections::BTreeSet;

/// Maximum number of distinct values for a layer to be considered discrete
pub const MAX_CLASSES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The sorted distinct values of the layer
    Discrete(Vec<i16>),
    Continuous,
    /// Classification was not requested
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStatistics {
    pub min: i16,
    pub max: i16,
    pub classification: Classification,
}

impl LayerStatistics {
    /// Statistics written when neither the range nor the classes are calculated
    pub fn unknown() -> Self {
        LayerStatistics {
            min: 0,
            max: 0,
            classification: Classification::Unclassified,
        }
    }

    /// Class count as stored in the header, -1 for continuous or unclassified layers
    pub fn num_classes(&self) -> i32 {
        match &self.classification {
            Classification::Discrete(values) => values.len() as i32,
            Classification::Continuous | Classification::Unclassified => -1,
        }
    }

    pub fn class_values(&self) -> &[i16] {
        match &self.classification {
            Classification::Discrete(values) => values,
            Classification::Continuous | Classification::Unclassified => &[],
        }
    }
}

/// Single pass min/max and distinct value tracking of a layer.
///
/// The distinct set never grows beyond `MAX_CLASSES + 1` entries, once it does the layer is continuous.
#[derive(Debug, Clone)]
pub struct StatisticsAccumulator {
    range: Option<(i16, i16)>,
    distinct: BTreeSet<i16>,
    continuous: bool,
    classify: bool,
}

impl StatisticsAccumulator {
    pub fn new(classify: bool) -> Self {
        StatisticsAccumulator {
            range: None,
            distinct: BTreeSet::new(),
            continuous: false,
            classify,
        }
    }

    pub fn add_values(&mut self, values: &[i16]) {
        for &value in values {
            self.range = match self.range {
                Some((min, max)) => Some((min.min(value), max.max(value))),
                None => Some((value, value)),
            };

            if self.classify && !self.continuous {
                self.distinct.insert(value);
                if self.distinct.len() > MAX_CLASSES {
                    self.continuous = true;
                    self.distinct.clear();
                }
            }
        }
    }

    pub fn finish(self) -> LayerStatistics {
        let (min, max) = self.range.unwrap_or((0, 0));
        let classification = if !self.classify {
            Classification::Unclassified
        } else if self.continuous {
            Classification::Continuous
        } else {
            Classification::Discrete(self.distinct.into_iter().collect())
        };

        LayerStatistics { min, max, classification }
    }
}
