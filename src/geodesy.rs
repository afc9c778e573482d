//! Spherical-earth great-circle helpers.

use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg};
use crate::error::{Error, Result};
use crate::types::GeoPoint;

pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this central angle (radians) two points are treated as identical.
const COINCIDENT_EPSILON: f64 = 1e-12;

type Vector3 = [f64; 3];

fn to_unit_vector(p: GeoPoint) -> Vector3 {
    let lat = deg_to_rad(p.latitude);
    let lon = deg_to_rad(p.longitude);
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn from_unit_vector(v: Vector3) -> GeoPoint {
    GeoPoint {
        latitude: rad_to_deg(v[2].atan2(v[0].hypot(v[1]))),
        longitude: rad_to_deg(v[1].atan2(v[0])),
    }
}

fn dot(a: &Vector3, b: &Vector3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Angle subtended at the earth's centre, in radians (haversine form).
pub fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = deg_to_rad(a.latitude);
    let phi2 = deg_to_rad(b.latitude);
    let d_phi = deg_to_rad(b.latitude - a.latitude);
    let d_lambda = deg_to_rad(b.longitude - a.longitude);
    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    MEAN_EARTH_RADIUS_KM * central_angle(a, b)
}

/// Initial great-circle bearing from `a` towards `b`, clockwise from true north in [0, 360).
pub fn initial_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = deg_to_rad(a.latitude);
    let phi2 = deg_to_rad(b.latitude);
    let d_lambda = deg_to_rad(b.longitude - a.longitude);
    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    normalize_angle(rad_to_deg(y.atan2(x)))
}

/// Bearing on arrival at `b` when flying the great circle from `a`.
pub fn final_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    normalize_angle(initial_bearing(b, a) + 180.0)
}

/// The great circle arc joining two points, parameterised by fraction of distance.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircle {
    source: GeoPoint,
    destination: GeoPoint,
    a: Vector3,
    b: Vector3,
    angle: f64,
}

impl GreatCircle {
    /// Fails only for antipodal endpoints, where infinitely many great circles exist.
    pub fn new(source: GeoPoint, destination: GeoPoint) -> Result<Self> {
        let a = to_unit_vector(source);
        let b = to_unit_vector(destination);
        let angle = dot(&a, &b).clamp(-1.0, 1.0).acos();
        if angle > COINCIDENT_EPSILON && angle.sin() < 1e-9 {
            return Err(Error::AntipodalEndpoints);
        }
        Ok(Self {
            source,
            destination,
            a,
            b,
            angle,
        })
    }

    pub fn source(&self) -> GeoPoint {
        self.source
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// Central angle of the whole arc in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_degenerate(&self) -> bool {
        self.angle <= COINCIDENT_EPSILON
    }

    /// Point at `fraction` of the way along the arc (spherical linear interpolation).
    ///
    /// Fractions 0 and 1 return the endpoints exactly.
    pub fn point_at(&self, fraction: f64) -> GeoPoint {
        if fraction <= 0.0 || self.is_degenerate() {
            return self.source;
        }
        if fraction >= 1.0 {
            return self.destination;
        }
        let sin_angle = self.angle.sin();
        let wa = ((1.0 - fraction) * self.angle).sin() / sin_angle;
        let wb = (fraction * self.angle).sin() / sin_angle;
        from_unit_vector([
            wa * self.a[0] + wb * self.b[0],
            wa * self.a[1] + wb * self.b[1],
            wa * self.a[2] + wb * self.b[2],
        ])
    }

    /// True course at `fraction` along the arc.
    pub fn heading_at(&self, fraction: f64) -> f64 {
        if fraction >= 1.0 {
            return final_bearing(self.source, self.destination);
        }
        initial_bearing(self.point_at(fraction), self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint {
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn test_unit_vector_round_trip_keeps_longitude_sign() {
        let q = from_unit_vector(to_unit_vector(p(-33.9, -151.2)));
        assert!((q.latitude + 33.9).abs() < 1e-9);
        assert!((q.longitude + 151.2).abs() < 1e-9);
    }

    #[test]
    fn test_antipodes_rejected() {
        assert!(matches!(
            GreatCircle::new(p(10.0, 20.0), p(-10.0, -160.0)),
            Err(Error::AntipodalEndpoints)
        ));
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let gc = GreatCircle::new(p(51.5, -0.5), p(51.5, -0.5)).unwrap();
        assert!(gc.is_degenerate());
        assert_eq!(gc.point_at(0.5), p(51.5, -0.5));
    }
}
