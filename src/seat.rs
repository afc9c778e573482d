//! Seat-side recommendation strategies.
//!
//! Three rules are kept side by side:
//!
//! - [`recommend_seat_weighted`] tallies, for every twilight sample, which side of the nose the
//!   sun is on. This is the primary strategy.
//! - [`recommend_seat_by_bearing`] looks only at the initial great-circle bearing.
//! - [`recommend_seat_by_fixed_azimuth`] compares the bearing against a sun fixed due east at
//!   sunrise and due west at sunset.

use crate::angles::normalize_angle;
use crate::geodesy::{initial_bearing, GreatCircle};
use crate::types::{
    FlightAnalysis, FlightDirection, GeoPoint, HeadingModel, SeatRecommendation, SeatStrategy, Side,
    SolarObservation, TwilightPhase, WeightedSeatRecommendation,
};
use crate::windows::twilight_phase;

const SUNRISE_AZIMUTH: f64 = 90.0;
const SUNSET_AZIMUTH: f64 = 270.0;

/// Clockwise angle from the aircraft's nose to a target azimuth, in [0, 360).
pub fn relative_angle(target_azimuth: f64, heading: f64) -> f64 {
    normalize_angle(target_azimuth - heading + 360.0)
}

/// Side of a sun at `relative` degrees from the nose. Dead ahead and dead astern count as left.
pub fn sun_side(relative: f64) -> Side {
    if relative > 0.0 && relative < 180.0 {
        Side::Right
    } else {
        Side::Left
    }
}

/// Sunrise is on the left when heading into the eastern half of the compass
/// (`0 <= bearing < 180`); sunset is always the opposite side.
pub fn recommend_seat_by_bearing(source: GeoPoint, destination: GeoPoint) -> SeatRecommendation {
    let bearing = initial_bearing(source, destination);
    let sunrise = if (0.0..180.0).contains(&bearing) {
        Side::Left
    } else {
        Side::Right
    };
    SeatRecommendation {
        sunrise,
        sunset: sunrise.opposite(),
    }
}

fn fixed_azimuth_side(relative: f64) -> Side {
    if relative == 180.0 {
        // directly behind
        Side::Right
    } else {
        sun_side(relative)
    }
}

pub fn recommend_seat_by_fixed_azimuth(source: GeoPoint, destination: GeoPoint) -> SeatRecommendation {
    let bearing = initial_bearing(source, destination);
    SeatRecommendation {
        sunrise: fixed_azimuth_side(relative_angle(SUNRISE_AZIMUTH, bearing)),
        sunset: fixed_azimuth_side(relative_angle(SUNSET_AZIMUTH, bearing)),
    }
}

/// Tallies sun side over every observation that falls in a sunrise or sunset window.
///
/// An antipodal or otherwise undefined arc falls back to the cardinal heading.
pub fn recommend_seat_weighted(
    observations: &[SolarObservation],
    source: GeoPoint,
    destination: GeoPoint,
    heading_model: HeadingModel,
    threshold_degrees: f64,
) -> WeightedSeatRecommendation {
    let direction = FlightDirection::between(source, destination);
    let arc = match heading_model {
        HeadingModel::GreatCircle => GreatCircle::new(source, destination).ok(),
        HeadingModel::Cardinal => None,
    };

    let mut tally = WeightedSeatRecommendation::default();
    for obs in observations {
        let Some(phase) = twilight_phase(obs, threshold_degrees) else {
            continue;
        };
        let heading = match &arc {
            Some(arc) => arc.heading_at(obs.sample.fraction),
            None => direction.cardinal_heading(),
        };
        let side = sun_side(relative_angle(obs.azimuth_degrees, heading));
        match phase {
            TwilightPhase::Sunrise => tally.sunrise.record(side),
            TwilightPhase::Sunset => tally.sunset.record(side),
        }
    }
    tally
}

impl FlightAnalysis {
    /// Recommendation under the chosen strategy.
    pub fn seat_for(&self, strategy: SeatStrategy) -> SeatRecommendation {
        match strategy {
            SeatStrategy::Weighted => self.weighted_seat.as_seat_recommendation(),
            SeatStrategy::Bearing => self.seat,
            SeatStrategy::FixedAzimuth => {
                recommend_seat_by_fixed_azimuth(self.request.source, self.request.destination)
            }
        }
    }
}
