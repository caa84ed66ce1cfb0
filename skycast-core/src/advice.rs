//! Practical tips derived from the current conditions.

use serde::Serialize;

use crate::{
    model::{ConditionCategory, UnitSystem, WeatherSnapshot},
    units::{mph_to_mps, to_celsius},
};

const HOT_C: f64 = 35.0;
const COOL_C: f64 = 20.0;
const STRONG_WIND_MPS: f64 = 8.0;
const LOW_VISIBILITY_M: u32 = 2_000;
const HUMID_PCT: u8 = 80;
const DRY_PCT: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    SeekShade,
    WearJacket,
    BringUmbrella,
    AvoidOpenAreas,
    DressWarm,
    StrongWind,
    LowVisibility,
    Humid,
    DryAir,
    Pleasant,
}

impl Advice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::SeekShade => "🏖️ Avoid the heat and find some shade",
            Self::WearJacket => "🧥 Wear a jacket or warm clothes",
            Self::BringUmbrella => "☔ Bring an umbrella or raincoat",
            Self::AvoidOpenAreas => "⚡ Stay away from open areas and metal objects",
            Self::DressWarm => "❄️ Dress warmly and take care outside",
            Self::StrongWind => "💨 Strong wind, watch out for flying objects",
            Self::LowVisibility => "🚗 Drive carefully and turn your lights on",
            Self::Humid => "💦 Humid air, wear breathable clothing",
            Self::DryAir => "🧴 Dry air, use moisturizer",
            Self::Pleasant => "🌤️ Nice weather, enjoy your day!",
        }
    }
}

pub fn advise(snapshot: &WeatherSnapshot) -> Vec<Advice> {
    let mut advice = Vec::new();

    let temp_c = to_celsius(snapshot.temp, snapshot.unit);
    if temp_c > HOT_C {
        advice.push(Advice::SeekShade);
    } else if temp_c < COOL_C {
        advice.push(Advice::WearJacket);
    }

    match snapshot.condition {
        ConditionCategory::Rain | ConditionCategory::Drizzle => advice.push(Advice::BringUmbrella),
        ConditionCategory::Thunderstorm => advice.push(Advice::AvoidOpenAreas),
        ConditionCategory::Snow => advice.push(Advice::DressWarm),
        _ => {}
    }

    let wind_mps = match snapshot.unit {
        UnitSystem::Metric => snapshot.wind_speed,
        UnitSystem::Imperial => mph_to_mps(snapshot.wind_speed),
    };
    if wind_mps > STRONG_WIND_MPS {
        advice.push(Advice::StrongWind);
    }

    if snapshot.visibility < LOW_VISIBILITY_M {
        advice.push(Advice::LowVisibility);
    }

    if snapshot.humidity > HUMID_PCT {
        advice.push(Advice::Humid);
    } else if snapshot.humidity < DRY_PCT {
        advice.push(Advice::DryAir);
    }

    if advice.is_empty() {
        advice.push(Advice::Pleasant);
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            name: "Bandung".into(),
            country: Some("ID".into()),
            coord: None,
            unit: UnitSystem::Metric,
            temp: 24.0,
            feels_like: 25.0,
            temp_min: 22.0,
            temp_max: 26.0,
            humidity: 55,
            pressure: 1012,
            visibility: 10_000,
            wind_speed: 2.0,
            wind_deg: Some(90),
            condition: ConditionCategory::Clear,
            description: "cerah".into(),
            icon: Some("01d".into()),
            dt: 0,
            sunrise: None,
            sunset: None,
        }
    }

    #[test]
    fn pleasant_when_nothing_stands_out() {
        assert_eq!(advise(&snapshot()), vec![Advice::Pleasant]);
    }

    #[test]
    fn stormy_hot_humid_day() {
        let s = WeatherSnapshot {
            temp: 36.0,
            humidity: 90,
            wind_speed: 9.5,
            visibility: 1_500,
            condition: ConditionCategory::Thunderstorm,
            ..snapshot()
        };

        assert_eq!(
            advise(&s),
            vec![
                Advice::SeekShade,
                Advice::AvoidOpenAreas,
                Advice::StrongWind,
                Advice::LowVisibility,
                Advice::Humid,
            ]
        );
    }

    #[test]
    fn imperial_values_are_normalized() {
        // 59°F is 15°C; 15 mph is under 8 m/s.
        let s = WeatherSnapshot {
            unit: UnitSystem::Imperial,
            temp: 59.0,
            wind_speed: 15.0,
            humidity: 20,
            condition: ConditionCategory::Drizzle,
            ..snapshot()
        };

        assert_eq!(advise(&s), vec![Advice::WearJacket, Advice::BringUmbrella, Advice::DryAir]);
    }

    #[test]
    fn imperial_hot_day() {
        // 100°F is about 37.8°C
        let s = WeatherSnapshot { unit: UnitSystem::Imperial, temp: 100.0, wind_speed: 5.0, ..snapshot() };
        assert_eq!(advise(&s), vec![Advice::SeekShade]);
    }
}
