//! Plausible stand-in weather used whenever the live provider is unusable.
//!
//! Everything is generated in metric and converted as the very last step, so
//! `feels_like`, `temp_min` and `temp_max` stay consistent with `temp` in
//! either unit system. Randomness and the wall clock are injected so tests
//! can pin both.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    model::{ConditionCategory, ForecastEntry, UnitSystem, WeatherSnapshot},
    units::{celsius_to_fahrenheit, mps_to_mph},
};

pub const FORECAST_DAYS: usize = 5;
pub const SECONDS_PER_DAY: i64 = 86_400;

const TEMP_RANGE_C: (u32, u32) = (28, 32);
const HUMIDITY_RANGE: (u32, u32) = (70, 89);
const WIND_SPEED_RANGE_MPS: (f64, f64) = (2.0, 7.0);
const FEELS_LIKE_OFFSET_C: f64 = 3.0;
const MIN_MAX_SPREAD_C: f64 = 2.0;
const PRESSURE_HPA: u32 = 1010;
const VISIBILITY_M: u32 = 10_000;
const SUNRISE_OFFSET_S: i64 = -36_000;
const SUNSET_OFFSET_S: i64 = -18_000;

/// Source of "now" for generated timestamps.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The draws the generator needs.
pub trait RandomSource: Send {
    /// Uniform integer in `[low, high]`.
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32;
    /// Uniform float in `[low, high)`.
    fn float_range(&mut self, low: f64, high: f64) -> f64;
    /// Uniform index in `[0, len)`; `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RandomSource for SeededRandom {
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.0.gen_range(low..=high)
    }

    fn float_range(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[derive(Debug)]
struct SyntheticCondition {
    category: ConditionCategory,
    description_id: &'static str,
    description_en: &'static str,
    icon: &'static str,
}

impl SyntheticCondition {
    const fn new(
        category: ConditionCategory,
        description_id: &'static str,
        description_en: &'static str,
        icon: &'static str,
    ) -> Self {
        Self { category, description_id, description_en, icon }
    }

    fn description(&self, lang: &str) -> &'static str {
        if lang.eq_ignore_ascii_case("en") { self.description_en } else { self.description_id }
    }
}

const CLEAR: SyntheticCondition =
    SyntheticCondition::new(ConditionCategory::Clear, "cerah", "clear sky", "01d");
const CLOUDS: SyntheticCondition =
    SyntheticCondition::new(ConditionCategory::Clouds, "berawan", "few clouds", "02d");
const RAIN: SyntheticCondition =
    SyntheticCondition::new(ConditionCategory::Rain, "hujan ringan", "light rain", "10d");
const THUNDERSTORM: SyntheticCondition =
    SyntheticCondition::new(ConditionCategory::Thunderstorm, "badai petir", "thunderstorm", "11d");
const SNOW: SyntheticCondition =
    SyntheticCondition::new(ConditionCategory::Snow, "salju", "snow", "13d");

static CURRENT_CONDITIONS: [SyntheticCondition; 5] = [CLEAR, CLOUDS, RAIN, THUNDERSTORM, SNOW];
static FORECAST_CONDITIONS: [SyntheticCondition; 3] = [CLEAR, CLOUDS, RAIN];

pub struct SyntheticGenerator {
    rng: Mutex<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
    lang: String,
}

impl fmt::Debug for SyntheticGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticGenerator")
            .field("clock", &self.clock)
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new(SeededRandom::from_entropy(), SystemClock)
    }
}

impl SyntheticGenerator {
    pub fn new(rng: impl RandomSource + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
            clock: Arc::new(clock),
            lang: "id".to_string(),
        }
    }

    /// Language used for condition descriptions: `en` for English, anything
    /// else falls back to Indonesian.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current conditions for `city`, expressed in `unit`.
    pub fn current(&self, city: &str, unit: UnitSystem) -> WeatherSnapshot {
        let now = self.clock.now().timestamp();

        let (temp, humidity, condition, wind_speed, wind_deg) = {
            let mut rng = self.rng();
            let temp = f64::from(rng.int_inclusive(TEMP_RANGE_C.0, TEMP_RANGE_C.1));
            let humidity = rng.int_inclusive(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1);
            let condition = &CURRENT_CONDITIONS[rng.index(CURRENT_CONDITIONS.len())];
            let wind_speed = rng.float_range(WIND_SPEED_RANGE_MPS.0, WIND_SPEED_RANGE_MPS.1);
            let wind_deg = rng.int_inclusive(0, 359);
            (temp, humidity, condition, wind_speed, wind_deg)
        };

        let metric = WeatherSnapshot {
            name: city.to_string(),
            country: None,
            coord: None,
            unit: UnitSystem::Metric,
            temp,
            feels_like: temp + FEELS_LIKE_OFFSET_C,
            temp_min: temp - MIN_MAX_SPREAD_C,
            temp_max: temp + MIN_MAX_SPREAD_C,
            humidity: humidity.min(100) as u8,
            pressure: PRESSURE_HPA,
            visibility: VISIBILITY_M,
            wind_speed,
            wind_deg: Some(wind_deg as u16),
            condition: condition.category.clone(),
            description: condition.description(&self.lang).to_string(),
            icon: Some(condition.icon.to_string()),
            dt: now,
            sunrise: Some(now + SUNRISE_OFFSET_S),
            sunset: Some(now + SUNSET_OFFSET_S),
        };

        snapshot_in_unit(metric, unit)
    }

    /// Five daily entries starting one day after "now".
    pub fn forecast(&self, unit: UnitSystem) -> Vec<ForecastEntry> {
        let now = self.clock.now().timestamp();
        let mut rng = self.rng();

        (1..=FORECAST_DAYS as i64)
            .map(|day| {
                let base = f64::from(rng.int_inclusive(TEMP_RANGE_C.0, TEMP_RANGE_C.1));
                let condition = &FORECAST_CONDITIONS[rng.index(FORECAST_CONDITIONS.len())];
                let humidity = rng.int_inclusive(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1);

                let metric = ForecastEntry {
                    dt: now + day * SECONDS_PER_DAY,
                    temp_day: base,
                    temp_min: base - MIN_MAX_SPREAD_C,
                    temp_max: base + MIN_MAX_SPREAD_C,
                    humidity: humidity.min(100) as u8,
                    condition: condition.category.clone(),
                    description: condition.description(&self.lang).to_string(),
                    icon: condition.icon.to_string(),
                    wind_speed: None,
                };

                entry_in_unit(metric, unit)
            })
            .collect()
    }
}

fn snapshot_in_unit(mut snapshot: WeatherSnapshot, unit: UnitSystem) -> WeatherSnapshot {
    if unit == UnitSystem::Imperial {
        snapshot.temp = celsius_to_fahrenheit(snapshot.temp);
        snapshot.feels_like = celsius_to_fahrenheit(snapshot.feels_like);
        snapshot.temp_min = celsius_to_fahrenheit(snapshot.temp_min);
        snapshot.temp_max = celsius_to_fahrenheit(snapshot.temp_max);
        snapshot.wind_speed = mps_to_mph(snapshot.wind_speed);
    }
    snapshot.unit = unit;
    snapshot
}

fn entry_in_unit(mut entry: ForecastEntry, unit: UnitSystem) -> ForecastEntry {
    if unit == UnitSystem::Imperial {
        entry.temp_day = celsius_to_fahrenheit(entry.temp_day);
        entry.temp_min = celsius_to_fahrenheit(entry.temp_min);
        entry.temp_max = celsius_to_fahrenheit(entry.temp_max);
        entry.wind_speed = entry.wind_speed.map(mps_to_mph);
    }
    entry
}
