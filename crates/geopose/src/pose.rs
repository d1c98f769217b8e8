//! Geodetic pose type as delivered by localization and content-discovery services.

use glam::DQuat;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::geodesy::GeoPoint;

/// Quaternions with a smaller norm have no usable inverse.
pub(crate) const MIN_ORIENTATION_NORM: f64 = 1e-12;

/// A geodetic position with an orientation in a fixed world frame.
///
/// Deserializes from the `pose` object of a GeoPose record:
///
/// ```json
/// {
///     "latitude": 47.46780006133321,
///     "longitude": 19.025000497036224,
///     "ellipsoidHeight": -1,
///     "quaternion": [-0.5604, -0.7208, 0.1677, 0.3716]
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeodeticPose {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Height above the WGS-84 ellipsoid in meters.
    ///
    /// Services have been observed to send `"undefined"` here, so anything that
    /// is not a number is read as `None`.
    #[serde(default, deserialize_with = "lenient_height")]
    pub ellipsoid_height: Option<f64>,
    /// Orientation quaternion.
    ///
    /// Older service versions send `[x, y, z, w]`, newer ones `{"x", "y", "z", "w"}`.
    #[serde(rename = "quaternion", deserialize_with = "quaternion_array_or_object")]
    pub orientation: DQuat,
}

impl GeodeticPose {
    /// Create a pose.
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        ellipsoid_height: Option<f64>,
        orientation: DQuat,
    ) -> Self {
        Self {
            latitude,
            longitude,
            ellipsoid_height,
            orientation,
        }
    }

    /// The surface point under this pose.
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// The ellipsoid height, if it is a finite number.
    #[must_use]
    pub fn ellipsoid_height(&self) -> Option<f64> {
        self.ellipsoid_height.filter(|h| h.is_finite())
    }

    /// Check that latitude, longitude, and orientation are usable.
    ///
    /// Relativization itself propagates NaN rather than failing, so callers
    /// that want to reject bad input do so here.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidCoordinate {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidCoordinate {
                field: "longitude",
                value: self.longitude,
            });
        }
        let norm = self.orientation.length();
        if !norm.is_finite() || norm < MIN_ORIENTATION_NORM {
            return Err(Error::InvalidOrientation { norm });
        }
        Ok(())
    }
}

/// Accept numbers, numeric strings, and `null`; everything else becomes `None`.
fn lenient_height<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Height {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Height>::deserialize(deserializer)? {
        Some(Height::Number(h)) => Some(h),
        Some(Height::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Height::Other(_)) | None => None,
    })
}

/// Accept a quaternion either as an `[x, y, z, w]` array or as an object.
///
/// Objects may carry extra keys, which are ignored.
pub(crate) fn quaternion_array_or_object<'de, D>(
    deserializer: D,
) -> std::result::Result<DQuat, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Components {
        x: f64,
        y: f64,
        z: f64,
        w: f64,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quaternion {
        Array([f64; 4]),
        Object(Components),
    }

    Ok(match Quaternion::deserialize(deserializer)? {
        Quaternion::Array([x, y, z, w]) => DQuat::from_xyzw(x, y, z, w),
        Quaternion::Object(Components { x, y, z, w }) => DQuat::from_xyzw(x, y, z, w),
    })
}
