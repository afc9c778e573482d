use solar_seat::geodesy::*;
use solar_seat::{Error, GeoPoint};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn p(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

/// Smallest absolute difference between two compass directions.
fn angular_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

const LHR: (f64, f64) = (51.4706, -0.4619);
const JFK: (f64, f64) = (40.6413, -73.7781);

// ── Bearings ──

#[test]
fn test_cardinal_bearings() {
    assert_approx!(initial_bearing(p(0.0, 0.0), p(10.0, 0.0)), 0.0, 1e-9);
    assert_approx!(initial_bearing(p(0.0, 0.0), p(0.0, 10.0)), 90.0, 1e-9);
    assert_approx!(initial_bearing(p(10.0, 0.0), p(0.0, 0.0)), 180.0, 1e-9);
    assert_approx!(initial_bearing(p(0.0, 10.0), p(0.0, 0.0)), 270.0, 1e-9);
}

#[test]
fn test_heathrow_to_jfk_is_westbound() {
    let b = initial_bearing(p(LHR.0, LHR.1), p(JFK.0, JFK.1));
    assert_approx!(b, 288.0, 1.0);
}

#[test]
fn test_bearing_always_normalized() {
    let pairs = [
        (p(51.5, -0.5), p(-33.9, 151.2)),
        (p(-33.9, 151.2), p(51.5, -0.5)),
        (p(35.5, 139.8), p(37.6, -122.4)),
        (p(64.1, -21.9), p(-54.8, -68.3)),
    ];
    for (a, b) in pairs {
        let bearing = initial_bearing(a, b);
        assert!((0.0..360.0).contains(&bearing), "bearing={}", bearing);
    }
}

#[test]
fn test_final_bearing_on_meridian() {
    assert_approx!(angular_diff(final_bearing(p(-10.0, 20.0), p(30.0, 20.0)), 0.0), 0.0, 1e-9);
}

// ── Distance ──

#[test]
fn test_heathrow_jfk_distance() {
    assert_approx!(distance_km(p(LHR.0, LHR.1), p(JFK.0, JFK.1)), 5540.0, 20.0);
}

#[test]
fn test_quarter_of_equator() {
    let quarter = std::f64::consts::FRAC_PI_2 * MEAN_EARTH_RADIUS_KM;
    assert_approx!(distance_km(p(0.0, 0.0), p(0.0, 90.0)), quarter, 1e-6);
}

// ── GreatCircle ──

#[test]
fn test_endpoints_exact() {
    let arc = GreatCircle::new(p(LHR.0, LHR.1), p(JFK.0, JFK.1)).unwrap();
    assert_eq!(arc.point_at(0.0), p(LHR.0, LHR.1));
    assert_eq!(arc.point_at(1.0), p(JFK.0, JFK.1));
}

#[test]
fn test_equatorial_arc_stays_on_equator() {
    let arc = GreatCircle::new(p(0.0, 0.0), p(0.0, 90.0)).unwrap();
    for i in 0..=10 {
        let q = arc.point_at(i as f64 / 10.0);
        assert_approx!(q.latitude, 0.0, 1e-9);
        assert_approx!(q.longitude, 9.0 * i as f64, 1e-9);
    }
}

#[test]
fn test_high_latitude_arc_bows_poleward() {
    let arc = GreatCircle::new(p(60.0, -30.0), p(60.0, 150.0)).unwrap();
    let mid = arc.point_at(0.5);
    assert!(mid.latitude > 60.0, "mid latitude={}", mid.latitude);
    assert_approx!(mid.latitude, 90.0, 1e-6);
}

#[test]
fn test_transatlantic_midpoint_north_of_both_airports() {
    let arc = GreatCircle::new(p(LHR.0, LHR.1), p(JFK.0, JFK.1)).unwrap();
    let mid = arc.point_at(0.5);
    assert!(mid.latitude > LHR.0, "mid latitude={}", mid.latitude);
    assert_approx!(mid.latitude, 52.2, 0.1);
    assert_approx!(mid.longitude, -41.3, 0.1);
}

#[test]
fn test_equal_fractions_equal_distances() {
    let a = p(LHR.0, LHR.1);
    let b = p(JFK.0, JFK.1);
    let arc = GreatCircle::new(a, b).unwrap();
    let total = distance_km(a, b);
    for i in 1..10 {
        let f = i as f64 / 10.0;
        assert_approx!(distance_km(a, arc.point_at(f)), total * f, 1e-3);
    }
}

#[test]
fn test_crossing_antimeridian() {
    let arc = GreatCircle::new(p(35.5, 139.8), p(37.6, -122.4)).unwrap();
    for i in 0..=20 {
        let q = arc.point_at(i as f64 / 20.0);
        assert!(q.validate().is_ok(), "{:?}", q);
        // Tokyo to San Francisco never dips south of the endpoints' band.
        assert!(q.latitude > 35.0, "{:?}", q);
    }
}

#[test]
fn test_antipodal_endpoints_rejected() {
    let err = GreatCircle::new(p(0.0, 0.0), p(0.0, 180.0)).unwrap_err();
    assert!(matches!(err, Error::AntipodalEndpoints));
}

#[test]
fn test_heading_along_meridian() {
    let arc = GreatCircle::new(p(-20.0, 10.0), p(40.0, 10.0)).unwrap();
    for f in [0.0, 0.25, 0.5, 0.9, 1.0] {
        assert_approx!(angular_diff(arc.heading_at(f), 0.0), 0.0, 1e-6);
    }
}
