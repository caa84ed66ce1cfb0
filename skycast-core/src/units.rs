//! Temperature and speed conversion plus descriptive bucketing.

use serde::Serialize;

use crate::model::UnitSystem;

const MPS_TO_MPH: f64 = 2.236_936;

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn mps_to_mph(speed: f64) -> f64 {
    speed * MPS_TO_MPH
}

pub fn mph_to_mps(speed: f64) -> f64 {
    speed / MPS_TO_MPH
}

/// Normalize a temperature expressed in `unit` to Celsius.
pub fn to_celsius(temp: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => temp,
        UnitSystem::Imperial => fahrenheit_to_celsius(temp),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    VeryCold,
    Cold,
    Mild,
    Warm,
    Hot,
    VeryHot,
    Extreme,
    Unknown,
}

impl TemperatureBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryCold => "Very cold",
            Self::Cold => "Cold",
            Self::Mild => "Mild",
            Self::Warm => "Warm",
            Self::Hot => "Hot",
            Self::VeryHot => "Very hot",
            Self::Extreme => "Extreme",
            Self::Unknown => "...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityBand {
    VeryDry,
    Dry,
    Comfortable,
    Humid,
    VeryHumid,
    Unknown,
}

impl HumidityBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryDry => "Very dry",
            Self::Dry => "Dry",
            Self::Comfortable => "Comfortable",
            Self::Humid => "Humid",
            Self::VeryHumid => "Very humid",
            Self::Unknown => "...",
        }
    }
}

/// Bucket a temperature. Thresholds are evaluated in Celsius with half-open
/// `[lower, upper)` bands.
pub fn classify_temperature_band(temp: Option<f64>, unit: UnitSystem) -> TemperatureBand {
    let Some(temp) = temp.filter(|t| !t.is_nan()) else {
        return TemperatureBand::Unknown;
    };

    let c = to_celsius(temp, unit);

    if c < 15.0 {
        TemperatureBand::VeryCold
    } else if c < 20.0 {
        TemperatureBand::Cold
    } else if c < 25.0 {
        TemperatureBand::Mild
    } else if c < 30.0 {
        TemperatureBand::Warm
    } else if c < 35.0 {
        TemperatureBand::Hot
    } else if c < 40.0 {
        TemperatureBand::VeryHot
    } else {
        TemperatureBand::Extreme
    }
}

pub fn classify_humidity_band(pct: Option<u8>) -> HumidityBand {
    match pct {
        None => HumidityBand::Unknown,
        Some(p) if p < 30 => HumidityBand::VeryDry,
        Some(p) if p < 50 => HumidityBand::Dry,
        Some(p) if p < 70 => HumidityBand::Comfortable,
        Some(p) if p < 85 => HumidityBand::Humid,
        Some(_) => HumidityBand::VeryHumid,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::N => "↑",
            Self::NE => "↗",
            Self::E => "→",
            Self::SE => "↘",
            Self::S => "↓",
            Self::SW => "↙",
            Self::W => "←",
            Self::NW => "↖",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

/// Eight-point compass sector for a wind bearing in degrees.
pub fn wind_direction(degrees: Option<u16>) -> Option<CompassPoint> {
    const POINTS: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    let deg = f64::from(degrees? % 360);
    let index = (deg / 45.0).round() as usize % POINTS.len();
    Some(POINTS[index])
}
