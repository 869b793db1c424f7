use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown place type: {value}")]
    UnknownPlaceType { value: String },

    #[error("Missing slot: {slot}")]
    MissingSlotError { slot: String },

    #[error("Invalid value for slot {slot}: {value}")]
    InvalidSlotValueError { slot: String, value: String },

    #[error("No reverse geocode match for {latitude},{longitude}")]
    ReverseGeocodeMiss { latitude: f64, longitude: f64 },

    #[error("Malformed provider response: {message}")]
    MalformedResponseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid config value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ActionError>;
