pub mod angles;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod geocode;
pub mod geodesy;
pub mod path;
pub mod seat;
pub mod types;
pub mod windows;

pub use angles::{
    crossing_hour_angle, day_of_year, deg_to_rad, equation_of_time, hour_angle, normalize_angle,
    rad_to_deg, solar_altitude, solar_azimuth, solar_declination, solar_position,
    solar_time_offset, solar_zenith_angle, HorizonCrossing, DEGREES_PER_HOUR, EARTH_AXIAL_TILT,
    SUNRISE_ALTITUDE,
};

pub use engine::SolarGeometryEngine;
pub use ephemeris::{ApproximateEphemeris, Ephemeris};
pub use error::{Error, Result};

pub use geocode::{
    annotate_windows, GeocodeError, NominatimConfig, NominatimGeocoder, ReverseGeocoder,
    UNKNOWN_LOCATION,
};

pub use geodesy::{distance_km, final_bearing, initial_bearing, GreatCircle};
pub use path::sample_path;
pub use seat::{
    recommend_seat_by_bearing, recommend_seat_by_fixed_azimuth, recommend_seat_weighted,
    relative_angle, sun_side,
};
pub use windows::{classify_windows, observe, twilight_phase, CIVIL_TWILIGHT_ALTITUDE};

pub use types::{
    EndpointNames, EngineConfig, FlightAnalysis, FlightDirection, FlightRequest, GeoPoint,
    HeadingModel, PathSample, SampleTiming, SeatRecommendation, SeatStrategy, Side, SideTally,
    SolarAngles, SolarObservation, SolarPosition, SunTimes, TwilightPhase, ViewingWindows,
    VisibilityWindow, WeightedSeatRecommendation, WindowPlaceNames,
};
