use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use skycast_core::{
    DataSource, ForecastEntry, WeatherBundle, advise, classify,
    units::{classify_humidity_band, classify_temperature_band, wind_direction},
};

pub fn dashboard(out: &mut impl Write, bundle: &WeatherBundle, favorite: bool) -> io::Result<()> {
    let s = &bundle.snapshot;
    let unit = bundle.unit;
    let deg = unit.temperature_symbol();

    let place = match &s.country {
        Some(country) => format!("{}, {}", s.name, country),
        None => s.name.clone(),
    };
    let star = if favorite { " ★" } else { "" };
    let sample = match bundle.source {
        DataSource::Live => "",
        DataSource::Synthetic => "  (sample data)",
    };
    writeln!(out, "{place}{star}{sample}")?;
    writeln!(out, "{}  ·  updated {}", full_date(s.dt), time_of_day(Some(s.dt)))?;
    writeln!(out)?;

    let symbol = classify(s.icon.as_deref(), Some(s.description.as_str()));
    writeln!(
        out,
        "{}  {:.1}{deg}  {} ({})",
        symbol.glyph(),
        s.temp,
        s.condition,
        s.description
    )?;
    writeln!(
        out,
        "Feels like {:.1}{deg} · min {:.1}{deg} · max {:.1}{deg} · {}",
        s.feels_like,
        s.temp_min,
        s.temp_max,
        classify_temperature_band(Some(s.temp), unit).label()
    )?;
    writeln!(
        out,
        "Humidity {}% ({}) · Pressure {} hPa · Visibility {:.1} km",
        s.humidity,
        classify_humidity_band(Some(s.humidity)).label(),
        s.pressure,
        f64::from(s.visibility) / 1000.0
    )?;

    let direction = wind_direction(s.wind_deg)
        .map(|p| format!(" {} {}", p.arrow(), p.as_str()))
        .unwrap_or_default();
    writeln!(out, "Wind {:.1} {}{direction}", s.wind_speed, unit.speed_symbol())?;
    writeln!(
        out,
        "Sunrise {} · Sunset {}",
        time_of_day(s.sunrise),
        time_of_day(s.sunset)
    )?;

    writeln!(out)?;
    writeln!(out, "Tips:")?;
    for tip in advise(s) {
        writeln!(out, "  {}", tip.message())?;
    }

    writeln!(out)?;
    writeln!(out, "{}-day forecast:", bundle.forecast.len())?;
    for entry in &bundle.forecast {
        forecast_line(out, entry, deg)?;
    }

    Ok(())
}

fn forecast_line(out: &mut impl Write, entry: &ForecastEntry, deg: &str) -> io::Result<()> {
    let symbol = classify(Some(entry.icon.as_str()), Some(entry.description.as_str()));
    writeln!(
        out,
        "  {:<4} {}  {:>3.0}{deg}  {:.0}° / {:.0}°  {:>3}%  {}",
        short_day(entry.dt),
        symbol.glyph(),
        entry.temp_day,
        entry.temp_min,
        entry.temp_max,
        entry.humidity,
        entry.description
    )
}

fn local(ts: i64) -> Option<DateTime<Local>> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&Local))
}

fn short_day(ts: i64) -> String {
    local(ts).map_or_else(|| "...".to_string(), |dt| dt.format("%a").to_string())
}

fn full_date(ts: i64) -> String {
    local(ts).map_or_else(|| "...".to_string(), |dt| dt.format("%A, %-d %B %Y").to_string())
}

fn time_of_day(ts: Option<i64>) -> String {
    ts.and_then(local)
        .map_or_else(|| "...".to_string(), |dt| dt.format("%H:%M").to_string())
}
