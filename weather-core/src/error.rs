use thiserror::Error;

/// Why an `add` was rejected. The collection is never touched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("City is required")]
    MissingCity,

    #[error("Temperature is required")]
    MissingTemperature,

    #[error("Invalid {field} '{value}': expected a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Humidity must be between 0 and 100, got '{0}'")]
    HumidityOutOfRange(String),

    #[error("Wind speed cannot be negative, got '{0}'")]
    NegativeWindSpeed(String),

    #[error("Unknown temperature unit '{0}'. Supported units: °C, °F.")]
    UnknownUnit(String),

    #[error("Unknown wind unit '{0}'. Supported units: km/h, mph, m/s.")]
    UnknownWindUnit(String),

    #[error("No card id is left after {0}; remove or clear cards first")]
    IdsExhausted(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No card with id {id}")]
pub struct NotFoundError {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ValidationError::InvalidNumber { field: "temperature", value: "warm".into() };
        assert_eq!(err.to_string(), "Invalid temperature 'warm': expected a number");

        let err = NotFoundError { id: 42 };
        assert_eq!(err.to_string(), "No card with id 42");
    }
}
