use chrono::{DateTime, TimeZone, Utc};
use solar_seat::seat::*;
use solar_seat::{
    GeoPoint, HeadingModel, PathSample, SideTally, Side, SolarObservation, SunTimes,
    WeightedSeatRecommendation,
};

fn p(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 22, h, m, 0).unwrap()
}

fn sun(instant: DateTime<Utc>, altitude: f64, azimuth: f64) -> SolarObservation {
    SolarObservation {
        sample: PathSample {
            fraction: 0.5,
            point: p(20.0, 5.0),
            instant,
        },
        altitude_degrees: altitude,
        azimuth_degrees: azimuth,
        sun_times: SunTimes::Regular {
            sunrise: at(6, 0),
            solar_noon: at(12, 0),
            sunset: at(18, 0),
        },
    }
}

// ── Relative angle / side ──

#[test]
fn test_relative_angle_wraps() {
    assert_eq!(relative_angle(90.0, 90.0), 0.0);
    assert_eq!(relative_angle(270.0, 90.0), 180.0);
    assert_eq!(relative_angle(10.0, 350.0), 20.0);
    assert_eq!(relative_angle(350.0, 10.0), 340.0);
}

#[test]
fn test_sun_side_boundaries() {
    assert_eq!(sun_side(0.0), Side::Left);
    assert_eq!(sun_side(0.5), Side::Right);
    assert_eq!(sun_side(179.5), Side::Right);
    assert_eq!(sun_side(180.0), Side::Left);
    assert_eq!(sun_side(300.0), Side::Left);
}

// ── Bearing rule ──

#[test]
fn test_bearing_rule_due_north_is_left_for_sunrise() {
    let seat = recommend_seat_by_bearing(p(0.0, 0.0), p(10.0, 0.0));
    assert_eq!(seat.sunrise, Side::Left);
    assert_eq!(seat.sunset, Side::Right);
}

#[test]
fn test_bearing_rule_due_south_is_right_for_sunrise() {
    let seat = recommend_seat_by_bearing(p(10.0, 0.0), p(0.0, 0.0));
    assert_eq!(seat.sunrise, Side::Right);
    assert_eq!(seat.sunset, Side::Left);
}

#[test]
fn test_bearing_rule_sides_always_opposite() {
    let routes = [
        (p(51.47, -0.46), p(40.64, -73.78)),
        (p(40.64, -73.78), p(51.47, -0.46)),
        (p(-33.9, 151.2), p(1.35, 103.99)),
        (p(35.5, 139.8), p(37.6, -122.4)),
    ];
    for (a, b) in routes {
        let seat = recommend_seat_by_bearing(a, b);
        assert_eq!(seat.sunset, seat.sunrise.opposite());
    }
}

#[test]
fn test_bearing_rule_westbound_transatlantic() {
    let seat = recommend_seat_by_bearing(p(51.4706, -0.4619), p(40.6413, -73.7781));
    assert_eq!(seat.sunrise, Side::Right);
    assert_eq!(seat.sunset, Side::Left);
}

// ── Fixed azimuth rule ──

#[test]
fn test_fixed_azimuth_due_east() {
    let seat = recommend_seat_by_fixed_azimuth(p(0.0, 0.0), p(0.0, 10.0));
    assert_eq!(seat.sunrise, Side::Left);
    assert_eq!(seat.sunset, Side::Right);
}

#[test]
fn test_fixed_azimuth_due_west() {
    let seat = recommend_seat_by_fixed_azimuth(p(0.0, 10.0), p(0.0, 0.0));
    assert_eq!(seat.sunrise, Side::Right);
    assert_eq!(seat.sunset, Side::Left);
}

#[test]
fn test_fixed_azimuth_due_north() {
    let seat = recommend_seat_by_fixed_azimuth(p(0.0, 0.0), p(10.0, 0.0));
    assert_eq!(seat.sunrise, Side::Right);
    assert_eq!(seat.sunset, Side::Left);
}

// ── Tally ──

#[test]
fn test_tally_majority_and_confidence() {
    let tally = SideTally { left: 3, right: 1 };
    assert_eq!(tally.side(), Side::Left);
    assert_eq!(tally.total(), 4);
    assert_eq!(tally.confidence(), 0.5);
}

#[test]
fn test_tally_tie_goes_right() {
    assert_eq!(SideTally { left: 2, right: 2 }.side(), Side::Right);
    assert_eq!(SideTally { left: 2, right: 2 }.confidence(), 0.0);
}

#[test]
fn test_empty_tally() {
    let tally = SideTally::default();
    assert_eq!(tally.side(), Side::Right);
    assert_eq!(tally.confidence(), 0.0);
}

#[test]
fn test_confidence_bounds() {
    for left in 0..6 {
        for right in 0..6 {
            let c = SideTally { left, right }.confidence();
            assert!((0.0..=1.0).contains(&c), "left={} right={} confidence={}", left, right, c);
        }
    }
    assert_eq!(SideTally { left: 0, right: 7 }.confidence(), 1.0);
}

#[test]
fn test_combined_tally() {
    let rec = WeightedSeatRecommendation {
        sunrise: SideTally { left: 4, right: 0 },
        sunset: SideTally { left: 1, right: 2 },
    };
    assert_eq!(rec.combined(), SideTally { left: 5, right: 2 });
    assert_eq!(rec.recommended_side(), Side::Left);
    let seat = rec.as_seat_recommendation();
    assert_eq!(seat.sunrise, Side::Left);
    assert_eq!(seat.sunset, Side::Right);
}

// ── Weighted rule ──

#[test]
fn test_weighted_eastbound_cardinal() {
    let observations = [
        sun(at(6, 30), 2.0, 70.0),   // sunrise, ahead-left
        sun(at(6, 40), 3.0, 110.0),  // sunrise, ahead-right
        sun(at(6, 50), 4.0, 75.0),   // sunrise, ahead-left
        sun(at(17, 40), 3.0, 290.0), // sunset, behind-left
        sun(at(9, 0), 35.0, 120.0),  // too high
    ];
    let rec = recommend_seat_weighted(
        &observations,
        p(20.0, 0.0),
        p(20.0, 10.0),
        HeadingModel::Cardinal,
        6.0,
    );
    assert_eq!(rec.sunrise, SideTally { left: 2, right: 1 });
    assert_eq!(rec.sunset, SideTally { left: 1, right: 0 });
    assert_eq!(rec.recommended_side(), Side::Left);
}

#[test]
fn test_weighted_ignores_polar_days() {
    let mut obs = sun(at(6, 30), 2.0, 70.0);
    obs.sun_times = SunTimes::AllDay {
        solar_noon: at(12, 0),
    };
    let rec = recommend_seat_weighted(&[obs], p(20.0, 0.0), p(20.0, 10.0), HeadingModel::Cardinal, 6.0);
    assert_eq!(rec, WeightedSeatRecommendation::default());
    assert_eq!(rec.confidence(), 0.0);
}

#[test]
fn test_weighted_heading_models_differ_on_meridian_flight() {
    // Due north along a meridian: the cardinal model calls this east-to-west (270°).
    let observations = [sun(at(6, 30), 1.0, 100.0)];
    let cardinal = recommend_seat_weighted(
        &observations,
        p(0.0, 0.0),
        p(10.0, 0.0),
        HeadingModel::Cardinal,
        6.0,
    );
    let great_circle = recommend_seat_weighted(
        &observations,
        p(0.0, 0.0),
        p(10.0, 0.0),
        HeadingModel::GreatCircle,
        6.0,
    );
    assert_eq!(cardinal.sunrise, SideTally { left: 1, right: 0 });
    assert_eq!(great_circle.sunrise, SideTally { left: 0, right: 1 });
}

#[test]
fn test_weighted_threshold_respected() {
    let observations = [sun(at(17, 30), 8.0, 280.0)];
    let narrow = recommend_seat_weighted(&observations, p(20.0, 10.0), p(20.0, 0.0), HeadingModel::Cardinal, 6.0);
    let wide = recommend_seat_weighted(&observations, p(20.0, 10.0), p(20.0, 0.0), HeadingModel::Cardinal, 10.0);
    assert_eq!(narrow.sunset.total(), 0);
    assert_eq!(wide.sunset, SideTally { left: 0, right: 1 });
}
