use crate::{Error, LayerKind, Result, Unit, units};

pub const LATITUDE: &str = "LATITUDE";
pub const LINEAR_UNIT: &str = units::LinearUnit::OPTION_NAME;
pub const DESCRIPTION: &str = "DESCRIPTION";
pub const CALCULATE_STATS: &str = "CALCULATE_STATS";
pub const CLASSIFY_DATA: &str = "CLASSIFY_DATA";

/// Creation options as a list of NAME=VALUE pairs, names are case insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationOptions {
    options: Vec<(String, String)>,
}

impl CreationOptions {
    pub fn new() -> Self {
        CreationOptions::default()
    }

    /// Parses `NAME=VALUE` strings, strings without a `=` are rejected
    pub fn from_strings<I, S>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = CreationOptions::new();
        for option in options {
            let option = option.as_ref();
            match option.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => result.set(name.trim(), value),
                _ => {
                    return Err(Error::InvalidOptionValue {
                        option: "creation option",
                        value: option.to_string(),
                        reason: "expected NAME=VALUE".to_string(),
                    });
                }
            }
        }

        Ok(result)
    }

    /// Builder style variant of `set`
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Sets the value of an option, replacing a previous value with the same name
    pub fn set(&mut self, name: &str, value: &str) {
        match self.options.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.options.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for CreationOptions {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut options = CreationOptions::new();
        for (name, value) in iter {
            options.set(name, value);
        }
        options
    }
}

impl From<&[(&str, &str)]> for CreationOptions {
    fn from(options: &[(&str, &str)]) -> Self {
        options.iter().copied().collect()
    }
}

impl<const N: usize> From<&[(&str, &str); N]> for CreationOptions {
    fn from(options: &[(&str, &str); N]) -> Self {
        options.iter().copied().collect()
    }
}

/// The validated creation options used to synthesize a header
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub latitude: i32,
    pub linear_unit: units::LinearUnit,
    pub description: String,
    /// Unit code per layer, in canonical order
    pub units: [Unit; LayerKind::COUNT],
    pub calculate_stats: bool,
    pub classify_data: bool,
}

impl EncodeSettings {
    pub fn from_options(options: &CreationOptions) -> Result<Self> {
        let latitude = parse_latitude(options.get(LATITUDE).ok_or(Error::MissingRequiredOption(LATITUDE))?)?;
        let linear_unit = units::LinearUnit::resolve(options.get(LINEAR_UNIT).ok_or(Error::MissingRequiredOption(LINEAR_UNIT))?)?;

        let mut layer_units = LayerKind::ALL.map(units::default_unit);
        for kind in LayerKind::ALL {
            if let Some(token) = options.get(kind.option_name()) {
                layer_units[kind.index()] = units::resolve_unit(kind, token)?;
            }
        }

        let calculate_stats = parse_bool_option(options, CALCULATE_STATS)?;
        let classify_data = parse_bool_option(options, CLASSIFY_DATA)?;

        for (name, value) in options.iter() {
            if !is_known_option(name) {
                log::warn!("Ignoring unsupported LCP creation option {name}={value}");
            }
        }

        Ok(EncodeSettings {
            latitude,
            linear_unit,
            description: options.get(DESCRIPTION).unwrap_or_default().to_string(),
            units: layer_units,
            calculate_stats,
            classify_data,
        })
    }

    pub fn unit(&self, kind: LayerKind) -> Unit {
        self.units[kind.index()]
    }
}

fn is_known_option(name: &str) -> bool {
    [LATITUDE, LINEAR_UNIT, DESCRIPTION, CALCULATE_STATS, CLASSIFY_DATA]
        .into_iter()
        .chain(LayerKind::ALL.iter().map(|kind| kind.option_name()))
        .any(|known| known.eq_ignore_ascii_case(name))
}

fn parse_latitude(value: &str) -> Result<i32> {
    let latitude = value.trim().parse::<i32>().map_err(|err| Error::InvalidOptionValue {
        option: LATITUDE,
        value: value.to_string(),
        reason: err.to_string(),
    })?;

    if !(-90..=90).contains(&latitude) {
        return Err(Error::InvalidOptionValue {
            option: LATITUDE,
            value: value.to_string(),
            reason: "latitude must be in the range [-90, 90]".to_string(),
        });
    }

    Ok(latitude)
}

fn parse_bool_option(options: &CreationOptions, name: &'static str) -> Result<bool> {
    let Some(value) = options.get(name) else {
        return Ok(true);
    };

    match value.trim().to_ascii_uppercase().as_str() {
        "YES" | "TRUE" | "ON" | "1" => Ok(true),
        "NO" | "FALSE" | "OFF" | "0" => Ok(false),
        _ => Err(Error::InvalidOptionValue {
            option: name,
            value: value.to_string(),
            reason: "expected a boolean value (YES/NO)".to_string(),
        }),
    }
}
