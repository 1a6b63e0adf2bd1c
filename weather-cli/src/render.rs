//! Human-readable output.

use chrono::NaiveDate;
use weather_core::{CityWeather, CurrentConditions, ForecastDay, Location, WeatherData};

fn location_line(loc: &Location) -> String {
    format!("{}, {} ({}, {})", loc.name, loc.country, loc.lat, loc.lon)
}

fn or_dash(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

/// `Sun 01 Jun` for ISO dates, anything else verbatim.
fn day_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%a %d %b").to_string(),
        Err(_) => date.to_string(),
    }
}

fn current_line(now: &CurrentConditions) -> String {
    format!(
        "Now: {}°C (feels like {}°C), {}, humidity {}%, wind {} km/h {}\n",
        or_dash(now.temp_c, 1),
        or_dash(now.feelslike_c, 1),
        now.condition.as_deref().unwrap_or("-"),
        or_dash(now.humidity, 0),
        or_dash(now.wind_kph, 1),
        now.wind_dir.as_deref().unwrap_or(""),
    )
}

fn day_line(day: &ForecastDay) -> String {
    format!(
        "{}  {:>5}°C / {:>5}°C  rain {:>3}%  {}\n",
        day_label(&day.date),
        or_dash(day.mintemp_c, 1),
        or_dash(day.maxtemp_c, 1),
        or_dash(day.chance_of_rain, 0),
        day.condition.as_deref().unwrap_or(""),
    )
}

pub fn forecast(data: &WeatherData) -> String {
    let mut out = data.location().map(|loc| location_line(&loc)).unwrap_or_default();
    if let Some(localtime) = data.localtime().filter(|t| !t.is_empty()) {
        out.push_str(&format!("  local time {localtime}"));
    }
    out.push('\n');

    if let Some(now) = data.current() {
        out.push_str(&current_line(&now));
    }

    for day in data.days() {
        out.push_str(&day_line(&day));
    }

    out
}

pub fn city_weather(result: &CityWeather) -> String {
    let mut out = format!("Location: {}\n", location_line(&result.location));
    out.push_str(&forecast(&result.weather));
    out
}

pub fn locations(cities: &[Location]) -> String {
    if cities.is_empty() {
        return "No matching cities.\n".to_string();
    }

    cities
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>2}. {}\n", i + 1, location_line(c)))
        .collect()
}
