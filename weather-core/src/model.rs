use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    display::{self, ConditionIcon},
    error::ValidationError,
};

pub const DEFAULT_COUNTRY: &str = "XX";
pub const DEFAULT_CONDITION: &str = "Clear";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "°c" | "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "°f" | "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(ValidationError::UnknownUnit(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindUnit {
    #[default]
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
    #[serde(rename = "m/s")]
    MetersPerSecond,
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::KilometersPerHour => "km/h",
            WindUnit::MilesPerHour => "mph",
            WindUnit::MetersPerSecond => "m/s",
        }
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindUnit {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "km/h" | "kmh" | "kph" => Ok(WindUnit::KilometersPerHour),
            "mph" => Ok(WindUnit::MilesPerHour),
            "m/s" | "mps" => Ok(WindUnit::MetersPerSecond),
            _ => Err(ValidationError::UnknownWindUnit(value.to_string())),
        }
    }
}

/// A recorded weather card.
///
/// Field names on disk follow the camelCase layout of the persisted array,
/// e.g. `createdAt`, `feelsLike`, `windUnit`. Absent optionals are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCard {
    pub id: i64,
    pub created_at: i64,
    pub city: String,
    pub country: String,
    pub unit: TemperatureUnit,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    pub wind_unit: WindUnit,
}

impl WeatherCard {
    pub fn icon(&self) -> ConditionIcon {
        display::derive_icon(&self.condition)
    }

    pub fn elapsed_label(&self, now: DateTime<Utc>) -> String {
        display::derive_elapsed_label(self.created_at, now.timestamp_millis())
    }

    /// `23°C`, `-3.5°F`.
    pub fn temperature_label(&self) -> String {
        format!("{}{}", self.temperature, self.unit)
    }

    pub fn feels_like_label(&self) -> Option<String> {
        self.feels_like.map(|t| format!("{t}{}", self.unit))
    }

    pub fn wind_label(&self) -> Option<String> {
        self.wind_speed.map(|speed| format!("{speed} {}", self.wind_unit))
    }
}

/// Loosely-typed form input for a new card. Every field is a raw string;
/// blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInput {
    pub city: Option<String>,
    pub country: Option<String>,
    pub unit: Option<String>,
    pub temperature: Option<String>,
    pub feels_like: Option<String>,
    pub condition: Option<String>,
    pub humidity: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_unit: Option<String>,
}

impl CardInput {
    /// Input carrying only the two required fields.
    pub fn new(city: impl Into<String>, temperature: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            temperature: Some(temperature.into()),
            ..Self::default()
        }
    }

    /// Parse every field, then construct the card. Nothing is built unless
    /// all fields are valid.
    pub(crate) fn build(&self, id: i64, created_at: i64) -> Result<WeatherCard, ValidationError> {
        let city = field(&self.city).ok_or(ValidationError::MissingCity)?;
        let temperature = field(&self.temperature)
            .ok_or(ValidationError::MissingTemperature)
            .and_then(|raw| parse_number("temperature", raw))?;

        let unit = field(&self.unit)
            .map(str::parse::<TemperatureUnit>)
            .transpose()?
            .unwrap_or_default();
        let wind_unit = field(&self.wind_unit)
            .map(str::parse::<WindUnit>)
            .transpose()?
            .unwrap_or_default();

        let feels_like = field(&self.feels_like)
            .map(|raw| parse_number("feels like", raw))
            .transpose()?;

        let humidity = field(&self.humidity).map(parse_humidity).transpose()?;

        let wind_speed = field(&self.wind_speed)
            .map(|raw| {
                let speed = parse_number("wind speed", raw)?;
                if speed < 0.0 {
                    return Err(ValidationError::NegativeWindSpeed(raw.to_string()));
                }
                Ok(speed)
            })
            .transpose()?;

        Ok(WeatherCard {
            id,
            created_at,
            city: city.to_string(),
            country: field(&self.country).unwrap_or(DEFAULT_COUNTRY).to_string(),
            unit,
            temperature,
            feels_like,
            condition: field(&self.condition).unwrap_or(DEFAULT_CONDITION).to_string(),
            humidity,
            wind_speed,
            wind_unit,
        })
    }
}

fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(name: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber { field: name, value: raw.to_string() })
}

fn parse_humidity(raw: &str) -> Result<u8, ValidationError> {
    let value = parse_number("humidity", raw)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::HumidityOutOfRange(raw.to_string()));
    }
    Ok(value.round() as u8)
}
