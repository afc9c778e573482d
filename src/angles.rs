use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::types::{SolarAngles, SolarPosition};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Apparent altitude of the sun's upper limb at sunrise and sunset, refraction included.
pub const SUNRISE_ALTITUDE: f64 = -0.833;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn day_of_year<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    dt.with_timezone(&Utc).ordinal()
}

/// Fractional hours since UTC midnight.
pub fn utc_hours<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    utc.hour() as f64
        + utc.minute() as f64 / 60.0
        + (utc.second() as f64 + utc.nanosecond() as f64 / 1e9) / 3600.0
}

fn intermediate_angle_b(n: u32) -> f64 {
    deg_to_rad((n as f64 - 1.0) * (360.0 / 365.0))
}

/// Equation of time in minutes.
pub fn equation_of_time(n: u32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075 + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

pub fn solar_declination(n: u32) -> f64 {
    EARTH_AXIAL_TILT * deg_to_rad(360.0 * ((284 + n) as f64 / 365.0)).sin()
}

/// Hours to add to UTC to obtain local apparent solar time.
pub fn solar_time_offset(longitude: f64, eot: f64) -> f64 {
    (4.0 * longitude + eot) / 60.0
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn solar_altitude(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

/// Azimuth clockwise from true north, in [0, 360).
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    normalize_angle(rad_to_deg(sin_az.atan2(cos_az)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonCrossing {
    /// Hour angle in degrees, symmetric about solar noon.
    At(f64),
    AlwaysAbove,
    NeverReaches,
}

/// Hour angle at which the sun passes through `altitude` on a day with the given declination.
pub fn crossing_hour_angle(latitude: f64, declination: f64, altitude: f64) -> HorizonCrossing {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let numerator = deg_to_rad(altitude).sin() - lat_rad.sin() * dec_rad.sin();
    let denominator = lat_rad.cos() * dec_rad.cos();
    if denominator.abs() < 1e-12 {
        // at the poles the sun circles at constant altitude
        return if numerator < 0.0 {
            HorizonCrossing::AlwaysAbove
        } else {
            HorizonCrossing::NeverReaches
        };
    }
    let cos_h = numerator / denominator;
    if cos_h <= -1.0 {
        HorizonCrossing::AlwaysAbove
    } else if cos_h >= 1.0 {
        HorizonCrossing::NeverReaches
    } else {
        HorizonCrossing::At(rad_to_deg(cos_h.acos()))
    }
}

pub fn solar_position<Tz: TimeZone>(latitude: f64, longitude: f64, dt: &DateTime<Tz>) -> SolarPosition {
    let n = day_of_year(dt);
    let eot = equation_of_time(n);
    let decl = solar_declination(n);
    let lst = (utc_hours(dt) + solar_time_offset(longitude, eot)).rem_euclid(24.0);
    let ha = hour_angle(lst);
    let zenith = solar_zenith_angle(latitude, decl, ha);
    SolarPosition {
        day_of_year: n,
        declination: decl,
        equation_of_time: eot,
        local_solar_time: lst,
        hour_angle: ha,
        zenith,
        altitude: solar_altitude(zenith),
        azimuth: solar_azimuth(latitude, decl, ha),
    }
}

impl From<SolarPosition> for SolarAngles {
    fn from(pos: SolarPosition) -> Self {
        Self {
            altitude_degrees: pos.altitude,
            azimuth_degrees: pos.azimuth,
        }
    }
}
