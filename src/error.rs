//! Error types for flight path and solar window calculations.

/// Result type alias for operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating a flight or computing its solar geometry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Latitude outside -90..=90 degrees (or NaN).
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },

    /// Longitude outside -180..=180 degrees (or NaN).
    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },

    /// Flight duration must be at least one minute.
    #[error("invalid flight duration {minutes} min (must be positive)")]
    InvalidDuration { minutes: u32 },

    #[error("invalid engine configuration: {message}")]
    InvalidConfig { message: String },

    /// Departure plus duration does not fit in the supported calendar range.
    #[error("arrival time out of range: departure {departure} plus {minutes} min")]
    ArrivalOutOfRange {
        departure: chrono::DateTime<chrono::Utc>,
        minutes: u32,
    },

    /// Source and destination are antipodal, so no unique great circle joins them.
    #[error("source and destination are antipodal; the great-circle path is undefined")]
    AntipodalEndpoints,

    /// The solar ephemeris could not produce a value.
    #[error("ephemeris failure: {message}")]
    Ephemeris { message: String },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}
