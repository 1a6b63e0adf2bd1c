use serde::{Deserialize, Serialize};
use serde_json::Value;

fn text(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

/// A place identified by name, country and coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Field-for-field projection of an upstream place object.
    ///
    /// Absent, `null` or mistyped fields become empty strings and `0.0`.
    pub fn project(obj: &Value) -> Self {
        Self {
            name: text(obj, "name").unwrap_or_default(),
            country: text(obj, "country").unwrap_or_default(),
            lat: number(obj, "lat").unwrap_or_default(),
            lon: number(obj, "lon").unwrap_or_default(),
        }
    }
}

/// Forecast body exactly as decoded from `forecast.json`.
///
/// The payload is never reshaped; serializing it gives back what upstream sent.
/// The accessors below are read-only views that tolerate missing or oddly
/// typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherData(Value);

impl WeatherData {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `None` when the body has no `location` object.
    pub fn location(&self) -> Option<Location> {
        self.0.get("location").filter(|v| v.is_object()).map(Location::project)
    }

    pub fn localtime(&self) -> Option<String> {
        self.0.get("location").and_then(|loc| text(loc, "localtime"))
    }

    pub fn current(&self) -> Option<CurrentConditions> {
        let cur = self.0.get("current").filter(|v| v.is_object())?;
        Some(CurrentConditions {
            temp_c: number(cur, "temp_c"),
            feelslike_c: number(cur, "feelslike_c"),
            condition: cur.get("condition").and_then(|c| text(c, "text")),
            humidity: number(cur, "humidity"),
            wind_kph: number(cur, "wind_kph"),
            wind_dir: text(cur, "wind_dir"),
        })
    }

    /// Entries of `forecast.forecastday`; empty when absent.
    pub fn days(&self) -> Vec<ForecastDay> {
        self.0
            .pointer("/forecast/forecastday")
            .and_then(Value::as_array)
            .map(|days| days.iter().map(ForecastDay::project).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub temp_c: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub condition: Option<String>,
    pub humidity: Option<f64>,
    pub wind_kph: Option<f64>,
    pub wind_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastDay {
    /// Upstream date string, normally `YYYY-MM-DD`.
    pub date: String,
    pub mintemp_c: Option<f64>,
    pub maxtemp_c: Option<f64>,
    pub chance_of_rain: Option<f64>,
    pub condition: Option<String>,
}

impl ForecastDay {
    fn project(entry: &Value) -> Self {
        let day = entry.get("day");
        let day_number = |key: &str| day.and_then(|d| number(d, key));
        Self {
            date: text(entry, "date").unwrap_or_default(),
            mintemp_c: day_number("mintemp_c"),
            maxtemp_c: day_number("maxtemp_c"),
            chance_of_rain: day_number("daily_chance_of_rain"),
            condition: day.and_then(|d| d.get("condition")).and_then(|c| text(c, "text")),
        }
    }
}

/// Forecast together with the location derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeather {
    pub weather: WeatherData,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_tolerates_null_and_mistyped_fields() {
        let loc = Location::project(&json!({
            "name": "Odd", "country": null, "lat": "1.5", "region": 3
        }));
        assert_eq!(loc, Location { name: "Odd".into(), ..Default::default() });
    }

    #[test]
    fn project_reads_integer_coordinates() {
        let loc = Location::project(&json!({ "name": "Hanoi", "lat": 21, "lon": 105 }));
        assert_eq!(loc.lat, 21.0);
        assert_eq!(loc.lon, 105.0);
    }

    #[test]
    fn weather_data_serializes_verbatim() {
        let raw = r#"{"location":{"name":"Hanoi","lat":21,"lon":105},"current":{"temp_c":null,"humidity":62.5},"zzz":[1,"a"]}"#;
        let data: WeatherData = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&data).unwrap(), raw);
    }

    #[test]
    fn location_requires_object() {
        assert!(WeatherData::new(json!({ "current": {} })).location().is_none());
        assert!(WeatherData::new(json!({ "location": null })).location().is_none());
        assert!(WeatherData::new(json!([1, 2])).location().is_none());
    }

    #[test]
    fn current_view_is_lenient() {
        let data = WeatherData::new(json!({
            "location": {},
            "current": { "temp_c": null, "humidity": 62.5, "condition": { "text": "Mist" } }
        }));
        let cur = data.current().expect("current present");
        assert_eq!(cur.temp_c, None);
        assert_eq!(cur.humidity, Some(62.5));
        assert_eq!(cur.condition.as_deref(), Some("Mist"));
    }

    #[test]
    fn days_view_keeps_unparsed_dates() {
        let data = WeatherData::new(json!({
            "forecast": { "forecastday": [
                { "date": "tomorrow", "day": { "maxtemp_c": 30, "daily_chance_of_rain": null } },
                { "day": "broken" }
            ] }
        }));
        let days = data.days();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "tomorrow");
        assert_eq!(days[0].maxtemp_c, Some(30.0));
        assert_eq!(days[0].chance_of_rain, None);
        assert_eq!(days[1], ForecastDay::default());
    }

    #[test]
    fn days_empty_without_forecast() {
        assert!(WeatherData::new(json!({ "location": {} })).days().is_empty());
    }
}
