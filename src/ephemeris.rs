//! Solar ephemeris contract and the default low-precision implementation.
//!
//! The engine only needs two things from an ephemeris: where the sun is in
//! the sky at an instant, and when the surrounding solar day's sunrise, noon
//! and sunset happen. Any algorithm satisfying [`Ephemeris`] can be plugged in.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::angles::{self, HorizonCrossing, SUNRISE_ALTITUDE};
use crate::error::{Error, Result};
use crate::types::{GeoPoint, SolarAngles, SunTimes};

pub trait Ephemeris {
    fn solar_position(&self, instant: DateTime<Utc>, point: GeoPoint) -> Result<SolarAngles>;

    /// Sunrise, solar noon and sunset of the solar day whose noon is nearest `instant`.
    fn sun_times(&self, instant: DateTime<Utc>, point: GeoPoint) -> Result<SunTimes>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn solar_position(&self, instant: DateTime<Utc>, point: GeoPoint) -> Result<SolarAngles> {
        (**self).solar_position(instant, point)
    }

    fn sun_times(&self, instant: DateTime<Utc>, point: GeoPoint) -> Result<SunTimes> {
        (**self).sun_times(instant, point)
    }
}

/// Declination / equation-of-time model, good to roughly a degree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateEphemeris;

impl ApproximateEphemeris {
    pub fn new() -> Self {
        Self
    }
}

fn hours(h: f64) -> Duration {
    Duration::milliseconds((h * 3_600_000.0).round() as i64)
}

fn solar_noon_on(day: NaiveDate, longitude: f64) -> Option<(DateTime<Utc>, u32)> {
    let n = day.ordinal();
    let offset = angles::solar_time_offset(longitude, angles::equation_of_time(n));
    let midnight = day.and_time(NaiveTime::MIN).and_utc();
    Some((midnight.checked_add_signed(hours(12.0 - offset))?, n))
}

fn out_of_range(instant: DateTime<Utc>) -> Error {
    Error::Ephemeris {
        message: format!("sun times around {instant} fall outside the supported calendar range"),
    }
}

impl Ephemeris for ApproximateEphemeris {
    fn solar_position(&self, instant: DateTime<Utc>, point: GeoPoint) -> Result<SolarAngles> {
        point.validate()?;
        let pos = angles::solar_position(point.latitude, point.longitude, &instant);
        if !pos.altitude.is_finite() || !pos.azimuth.is_finite() {
            return Err(Error::Ephemeris {
                message: format!("non-finite solar position at {instant} for {point:?}"),
            });
        }
        Ok(pos.into())
    }

    fn sun_times(&self, instant: DateTime<Utc>, point: GeoPoint) -> Result<SunTimes> {
        point.validate()?;
        let date = instant.date_naive();
        let (solar_noon, n) = [date.pred_opt(), Some(date), date.succ_opt()]
            .into_iter()
            .flatten()
            .filter_map(|day| solar_noon_on(day, point.longitude))
            .min_by_key(|(noon, _)| (instant - *noon).num_milliseconds().abs())
            .ok_or_else(|| Error::Ephemeris {
                message: format!("no calendar day around {instant}"),
            })?;

        let decl = angles::solar_declination(n);
        Ok(
            match angles::crossing_hour_angle(point.latitude, decl, SUNRISE_ALTITUDE) {
                HorizonCrossing::At(h) => {
                    let half_day = hours(h / angles::DEGREES_PER_HOUR);
                    SunTimes::Regular {
                        sunrise: solar_noon
                            .checked_sub_signed(half_day)
                            .ok_or_else(|| out_of_range(instant))?,
                        solar_noon,
                        sunset: solar_noon
                            .checked_add_signed(half_day)
                            .ok_or_else(|| out_of_range(instant))?,
                    }
                }
                HorizonCrossing::AlwaysAbove => SunTimes::AllDay { solar_noon },
                HorizonCrossing::NeverReaches => SunTimes::AllNight { solar_noon },
            },
        )
    }
}
