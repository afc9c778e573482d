use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::windows::CIVIL_TWILIGHT_ALTITUDE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidLatitude {
                value: self.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidLongitude {
                value: self.longitude,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRequest {
    pub source: GeoPoint,
    pub destination: GeoPoint,
    pub departure: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl FlightRequest {
    /// Builds a validated request. The departure may be given in any time zone.
    pub fn new<Tz: TimeZone>(
        source: GeoPoint,
        destination: GeoPoint,
        departure: &DateTime<Tz>,
        duration_minutes: u32,
    ) -> Result<Self> {
        let request = Self {
            source,
            destination,
            departure: departure.with_timezone(&Utc),
            duration_minutes,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        self.destination.validate()?;
        if self.duration_minutes == 0 {
            return Err(Error::InvalidDuration {
                minutes: self.duration_minutes,
            });
        }
        self.arrival()?;
        Ok(())
    }

    /// Departure plus the flight duration.
    pub fn arrival(&self) -> Result<DateTime<Utc>> {
        self.departure
            .checked_add_signed(Duration::minutes(self.duration_minutes as i64))
            .ok_or(Error::ArrivalOutOfRange {
                departure: self.departure,
                minutes: self.duration_minutes,
            })
    }

    pub fn direction(&self) -> FlightDirection {
        FlightDirection::between(self.source, self.destination)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlightDirection {
    WestToEast,
    EastToWest,
}

impl FlightDirection {
    /// Overall sense of travel, judged by longitude alone.
    pub fn between(source: GeoPoint, destination: GeoPoint) -> Self {
        if destination.longitude > source.longitude {
            FlightDirection::WestToEast
        } else {
            FlightDirection::EastToWest
        }
    }

    /// Coarse heading used by the cardinal heading model.
    pub fn cardinal_heading(&self) -> f64 {
        match self {
            FlightDirection::WestToEast => 90.0,
            FlightDirection::EastToWest => 270.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub fraction: f64,
    pub point: GeoPoint,
    pub instant: DateTime<Utc>,
}

impl PathSample {
    /// Clock time at this sample rendered in the given zone, e.g. `"19:45 BST"`.
    pub fn time_label<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.instant.with_timezone(tz).format("%H:%M %Z").to_string()
    }
}

/// Intermediate quantities of the declination/equation-of-time solar model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    pub day_of_year: u32,
    pub declination: f64,
    pub equation_of_time: f64,
    pub local_solar_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarAngles {
    pub altitude_degrees: f64,
    pub azimuth_degrees: f64,
}

/// Sunrise, solar noon and sunset of one solar day at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SunTimes {
    Regular {
        sunrise: DateTime<Utc>,
        solar_noon: DateTime<Utc>,
        sunset: DateTime<Utc>,
    },
    /// Sun stays above the horizon for the whole day.
    AllDay { solar_noon: DateTime<Utc> },
    /// Sun stays below the horizon for the whole day.
    AllNight { solar_noon: DateTime<Utc> },
}

impl SunTimes {
    pub fn solar_noon(&self) -> DateTime<Utc> {
        match self {
            SunTimes::Regular { solar_noon, .. }
            | SunTimes::AllDay { solar_noon }
            | SunTimes::AllNight { solar_noon } => *solar_noon,
        }
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        match self {
            SunTimes::Regular { sunrise, .. } => Some(*sunrise),
            _ => None,
        }
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        match self {
            SunTimes::Regular { sunset, .. } => Some(*sunset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarObservation {
    pub sample: PathSample,
    pub altitude_degrees: f64,
    pub azimuth_degrees: f64,
    pub sun_times: SunTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwilightPhase {
    Sunrise,
    Sunset,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisibilityWindow {
    pub start: Option<PathSample>,
    pub end: Option<PathSample>,
}

impl VisibilityWindow {
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Elapsed flight time between the first and last qualifying sample.
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.end?.instant - self.start?.instant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewingWindows {
    pub sunrise: VisibilityWindow,
    pub sunset: VisibilityWindow,
}

impl ViewingWindows {
    pub fn window(&self, phase: TwilightPhase) -> &VisibilityWindow {
        match phase {
            TwilightPhase::Sunrise => &self.sunrise,
            TwilightPhase::Sunset => &self.sunset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left (port)"),
            Side::Right => f.write_str("right (starboard)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecommendation {
    pub sunrise: Side,
    pub sunset: Side,
}

/// Count of twilight samples with the sun on each side of the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideTally {
    pub left: u32,
    pub right: u32,
}

impl SideTally {
    pub fn record(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }

    /// Side with the higher count. Ties, including the empty tally, go to the right.
    pub fn side(&self) -> Side {
        if self.left > self.right {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn confidence(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.left.abs_diff(self.right) as f64 / total as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeightedSeatRecommendation {
    pub sunrise: SideTally,
    pub sunset: SideTally,
}

impl WeightedSeatRecommendation {
    pub fn combined(&self) -> SideTally {
        SideTally {
            left: self.sunrise.left + self.sunset.left,
            right: self.sunrise.right + self.sunset.right,
        }
    }

    pub fn recommended_side(&self) -> Side {
        self.combined().side()
    }

    pub fn confidence(&self) -> f64 {
        self.combined().confidence()
    }

    pub fn as_seat_recommendation(&self) -> SeatRecommendation {
        SeatRecommendation {
            sunrise: self.sunrise.side(),
            sunset: self.sunset.side(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleTiming {
    /// `departure + i × interval`
    #[default]
    FixedCadence,
    /// `departure + (i / N) × duration`
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingModel {
    /// 90° for west-to-east flights, 270° otherwise.
    #[default]
    Cardinal,
    /// Great-circle heading at each sample.
    GreatCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStrategy {
    #[default]
    Weighted,
    Bearing,
    FixedAzimuth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sample_interval_minutes: u32,
    pub twilight_altitude_degrees: f64,
    pub sample_timing: SampleTiming,
    pub heading_model: HeadingModel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_interval_minutes: 5,
            twilight_altitude_degrees: CIVIL_TWILIGHT_ALTITUDE,
            sample_timing: SampleTiming::FixedCadence,
            heading_model: HeadingModel::Cardinal,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_minutes == 0 {
            return Err(Error::InvalidConfig {
                message: "sample_interval_minutes must be positive".to_string(),
            });
        }
        if !(self.twilight_altitude_degrees > 0.0 && self.twilight_altitude_degrees <= 90.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "twilight_altitude_degrees must be in (0, 90], got {}",
                    self.twilight_altitude_degrees
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightAnalysis {
    pub request: FlightRequest,
    pub direction: FlightDirection,
    pub bearing_degrees: f64,
    pub observations: Vec<SolarObservation>,
    pub windows: ViewingWindows,
    pub seat: SeatRecommendation,
    pub weighted_seat: WeightedSeatRecommendation,
}

impl FlightAnalysis {
    pub fn samples(&self) -> impl Iterator<Item = &PathSample> + '_ {
        self.observations.iter().map(|o| &o.sample)
    }

    pub fn has_viewing_opportunity(&self) -> bool {
        !self.windows.sunrise.is_empty() || !self.windows.sunset.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointNames {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPlaceNames {
    pub sunrise: EndpointNames,
    pub sunset: EndpointNames,
}
