//! Geodesic computations on the WGS-84 ellipsoid.
//!
//! Distances and bearings are computed with Vincenty's inverse formula, which is
//! accurate to well below a millimeter for the short baselines found between a
//! localized device and nearby content.

/// WGS-84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS-84 semi-minor axis in meters.
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Convergence threshold for the longitude iteration (radians).
const CONVERGENCE_EPSILON: f64 = 1e-12;
/// Upper bound on Vincenty iterations before giving up.
const MAX_ITERATIONS: usize = 1000;

/// A point on the ellipsoid surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Surface distance to `other` in meters.
    #[must_use]
    pub fn distance_to(self, other: GeoPoint) -> f64 {
        distance(self, other)
    }

    /// Initial bearing towards `other` in degrees clockwise from north.
    #[must_use]
    pub fn initial_bearing_to(self, other: GeoPoint) -> f64 {
        initial_bearing(self, other)
    }
}

/// Result of the inverse geodesic problem.
struct Inverse {
    distance: f64,
    /// Forward azimuth at the start point, radians.
    azimuth: f64,
}

/// Ellipsoidal surface distance between two points in meters.
///
/// Coincident points yield `0.0`. NaN coordinates propagate to a NaN result.
#[must_use]
pub fn distance(from: GeoPoint, to: GeoPoint) -> f64 {
    inverse(from, to).distance
}

/// Initial bearing from `from` to `to`, in degrees within `[0, 360)`.
///
/// The bearing is undefined for coincident points and is returned as NaN.
#[must_use]
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let azimuth = inverse(from, to).azimuth;
    (azimuth.to_degrees() + 360.0) % 360.0
}

/// Wrap a longitude difference into `(-180, 180]` degrees.
#[must_use]
pub fn wrap_longitude_delta(delta: f64) -> f64 {
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Vincenty's inverse formula.
///
/// Near-antipodal points may fail to converge; the last iterate is used and a
/// warning is logged. That value is finite but only approximate: for
/// `(0, 0)` to `(0, 180)` it is about 19 903 593 m against a true geodesic of
/// about 20 003 931 m.
#[allow(clippy::many_single_char_names, clippy::similar_names)]
fn inverse(from: GeoPoint, to: GeoPoint) -> Inverse {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let l = (to.longitude - from.longitude).to_radians();

    // Reduced latitudes.
    let tan_u1 = (1.0 - WGS84_F) * phi1.tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;
    let tan_u2 = (1.0 - WGS84_F) * phi2.tan();
    let cos_u2 = 1.0 / (1.0 + tan_u2 * tan_u2).sqrt();
    let sin_u2 = tan_u2 * cos_u2;

    let mut lambda = l;
    let mut sin_lambda;
    let mut cos_lambda;
    let mut sin_sigma;
    let mut cos_sigma;
    let mut sigma;
    let mut cos_sq_alpha;
    let mut cos_2sigma_m;
    let mut iterations = 0;

    loop {
        sin_lambda = lambda.sin();
        cos_lambda = lambda.cos();

        let sin_sq_sigma = (cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2);
        if sin_sq_sigma == 0.0 {
            // Coincident points.
            return Inverse {
                distance: 0.0,
                azimuth: f64::NAN,
            };
        }

        sin_sigma = sin_sq_sigma.sqrt();
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0.
        cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        iterations += 1;
        // NaN never compares as converged, so bail out explicitly.
        if lambda.is_nan() || (lambda - previous).abs() <= CONVERGENCE_EPSILON {
            break;
        }
        if iterations >= MAX_ITERATIONS {
            tracing::warn!(?from, ?to, "vincenty formula failed to converge");
            break;
        }
    }

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = b
        * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let distance = WGS84_B * a * (sigma - delta_sigma);
    let azimuth = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);

    Inverse { distance, azimuth }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_coincident_points() {
        let p = GeoPoint::new(47.467_800_061_333_21, 19.025_000_497_036_224);
        assert!(distance(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_one_degree_along_equator() {
        let d = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111_319.490_793).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_distance_one_degree_along_meridian() {
        let d = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 110_574.388_558).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(48.756_116_769_726_326, 8.545_642_707_899_97);
        let b = GeoPoint::new(48.756_199_139_851_65, 8.545_727_117_939_203);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_nan_propagates() {
        let d = distance(GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(1.0, 1.0));
        assert!(d.is_nan());
    }

    #[test]
    fn test_initial_bearing_cardinal_directions() {
        let origin = GeoPoint::new(10.0, 10.0);
        let north = origin.initial_bearing_to(GeoPoint::new(10.001, 10.0));
        let east = origin.initial_bearing_to(GeoPoint::new(10.0, 10.001));
        let south = origin.initial_bearing_to(GeoPoint::new(9.999, 10.0));
        let west = origin.initial_bearing_to(GeoPoint::new(10.0, 9.999));

        assert!(north.abs() < 1e-6 || (north - 360.0).abs() < 1e-6, "north {north}");
        assert!((east - 90.0).abs() < 0.01, "east {east}");
        assert!((south - 180.0).abs() < 1e-6, "south {south}");
        assert!((west - 270.0).abs() < 0.01, "west {west}");
    }

    #[test]
    fn test_distance_near_antipodal_does_not_fail() {
        let origin = GeoPoint::new(0.0, 0.0);
        for target in [
            GeoPoint::new(0.0, 180.0),
            GeoPoint::new(0.0, 179.7),
            GeoPoint::new(0.5, 179.7),
        ] {
            let d = distance(origin, target);
            assert!(d.is_finite(), "{target:?}: {d}");
            assert!((19_800_000.0..20_100_000.0).contains(&d), "{target:?}: {d}");
        }

        let d = distance(GeoPoint::new(10.0, 0.0), GeoPoint::new(-10.0, 179.9));
        assert!((19_800_000.0..20_100_000.0).contains(&d), "{d}");
    }

    #[test]
    fn test_initial_bearing_coincident_is_nan() {
        let p = GeoPoint::new(1.0, 2.0);
        assert!(initial_bearing(p, p).is_nan());
    }

    #[test]
    fn test_wrap_longitude_delta() {
        assert!((wrap_longitude_delta(10.0) - 10.0).abs() < 1e-12);
        assert!((wrap_longitude_delta(-10.0) + 10.0).abs() < 1e-12);
        assert!((wrap_longitude_delta(350.0) + 10.0).abs() < 1e-12);
        assert!((wrap_longitude_delta(-350.0) - 10.0).abs() < 1e-12);
        assert!((wrap_longitude_delta(180.0) - 180.0).abs() < 1e-12);
        assert!((wrap_longitude_delta(-180.0) - 180.0).abs() < 1e-12);
    }
}
