//! Mapping from provider icon codes and free-text descriptions to display symbols.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSymbol {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Wind,
    Unknown,
}

impl ConditionSymbol {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁️",
            Self::Rain => "🌧️",
            Self::Drizzle => "🌦️",
            Self::Thunderstorm => "⛈️",
            Self::Snow => "❄️",
            Self::Mist => "🌫️",
            Self::Wind => "💨",
            Self::Unknown => "🌈",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Wind => "Windy",
            Self::Unknown => "Unknown",
        }
    }
}

/// Keyword groups in priority order. English and Indonesian words in one
/// group are synonyms.
const KEYWORDS: &[(&[&str], ConditionSymbol)] = &[
    (&["clear", "cerah"], ConditionSymbol::Clear),
    (&["rain", "hujan"], ConditionSymbol::Rain),
    (&["drizzle", "gerimis"], ConditionSymbol::Drizzle),
    (&["thunder", "petir"], ConditionSymbol::Thunderstorm),
    (&["snow", "salju"], ConditionSymbol::Snow),
    (&["cloud", "awan"], ConditionSymbol::Cloudy),
    (&["mist", "fog", "kabut"], ConditionSymbol::Mist),
    (&["wind", "angin"], ConditionSymbol::Wind),
];

/// Classify a condition for display. Never fails: anything unrecognized
/// yields [`ConditionSymbol::Unknown`].
pub fn classify(icon: Option<&str>, description: Option<&str>) -> ConditionSymbol {
    description
        .and_then(symbol_from_description)
        .or_else(|| icon.and_then(symbol_from_icon))
        .unwrap_or(ConditionSymbol::Unknown)
}

fn symbol_from_description(description: &str) -> Option<ConditionSymbol> {
    let lower = description.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map(|(_, symbol)| *symbol)
}

fn symbol_from_icon(icon: &str) -> Option<ConditionSymbol> {
    let prefix = icon.trim().get(..2)?;

    match prefix {
        "01" => Some(ConditionSymbol::Clear),
        "02" => Some(ConditionSymbol::PartlyCloudy),
        "03" | "04" => Some(ConditionSymbol::Cloudy),
        "09" | "10" => Some(ConditionSymbol::Rain),
        "11" => Some(ConditionSymbol::Thunderstorm),
        "13" => Some(ConditionSymbol::Snow),
        "50" => Some(ConditionSymbol::Mist),
        _ => None,
    }
}
