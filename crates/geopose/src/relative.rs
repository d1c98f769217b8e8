//! Relativization of a target GeoPose against a reference GeoPose.
//!
//! The reference is normally the pose of the camera at the time of the latest
//! localization; the target is the pose of a piece of discovered content.

use glam::{DQuat, DVec3};

use crate::error::{Error, Result};
use crate::euler::{EulerAngles, quat_to_euler};
use crate::frames::{geo_to_engine, geo_to_engine_rotation};
use crate::geodesy::{self, GeoPoint, wrap_longitude_delta};
use crate::pose::{GeodeticPose, MIN_ORIENTATION_NORM};

/// A target pose expressed relative to a reference, in engine axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeTransform {
    /// Offset in meters (x east, y up, z south).
    pub position: DVec3,
    /// Unit rotation of the target relative to the reference.
    pub orientation: DQuat,
}

/// Signed East-North-Up offset of `target` from `reference` in meters.
///
/// The planar components are surface distances from the reference to two
/// auxiliary points, one on the reference meridian at the target latitude and
/// one on the reference parallel at the target longitude. The height component
/// is zero when either ellipsoid height is missing or not a number.
#[must_use]
pub fn enu_offset(reference: &GeodeticPose, target: &GeodeticPose) -> DVec3 {
    let origin = reference.point();
    let along_meridian = GeoPoint::new(target.latitude, reference.longitude);
    let along_parallel = GeoPoint::new(reference.latitude, target.longitude);

    let north = geodesy::distance(origin, along_meridian)
        * signum_or_zero(target.latitude - reference.latitude);
    let east = geodesy::distance(origin, along_parallel)
        * signum_or_zero(wrap_longitude_delta(target.longitude - reference.longitude));

    let up = match (reference.ellipsoid_height(), target.ellipsoid_height()) {
        (Some(from), Some(to)) => to - from,
        _ => {
            tracing::warn!(
                reference = ?reference.ellipsoid_height,
                target = ?target.ellipsoid_height,
                "ellipsoid height unavailable, using zero vertical offset"
            );
            0.0
        }
    };

    DVec3::new(east, north, up)
}

/// Offset of `target` from `reference` in engine axes.
///
/// Returns `{x: dx, y: dz, z: dy}` where `dx` is the signed east offset, `dz`
/// the height difference, and `dy` the signed north-south offset with the
/// engine's forward flip applied (positive when the target is south of the
/// reference). Invalid coordinates propagate as NaN.
#[must_use]
pub fn compute_relative_position(reference: &GeodeticPose, target: &GeodeticPose) -> DVec3 {
    geo_to_engine(enu_offset(reference, target))
}

/// Rotation taking the reference orientation onto the target orientation.
///
/// Both orientations are read in the same world frame and the result is
/// `target * reference⁻¹`, normalized.
///
/// # Errors
///
/// Returns [`Error::InvalidOrientation`] if the reference orientation has zero
/// norm or the product cannot be normalized.
pub fn compute_relative_orientation(
    reference: &GeodeticPose,
    target: &GeodeticPose,
) -> Result<DQuat> {
    let reference_inverse = invert(reference.orientation)?;
    let relative = target.orientation * reference_inverse;

    let norm = relative.length();
    if !norm.is_finite() || norm < MIN_ORIENTATION_NORM {
        return Err(Error::InvalidOrientation { norm });
    }
    Ok(relative / norm)
}

/// [`compute_relative_orientation`] as pitch, yaw, and roll.
pub fn compute_relative_euler_angles(
    reference: &GeodeticPose,
    target: &GeodeticPose,
) -> Result<EulerAngles> {
    compute_relative_orientation(reference, target).map(quat_to_euler)
}

/// Position and orientation of `target` relative to `reference`, in engine axes.
pub fn relative_transform(
    reference: &GeodeticPose,
    target: &GeodeticPose,
) -> Result<RelativeTransform> {
    let orientation = compute_relative_orientation(reference, target)?;
    Ok(RelativeTransform {
        position: compute_relative_position(reference, target),
        orientation: geo_to_engine_rotation(orientation),
    })
}

/// Full quaternion inverse (conjugate over squared norm).
fn invert(q: DQuat) -> Result<DQuat> {
    let norm = q.length();
    if !norm.is_finite() || norm < MIN_ORIENTATION_NORM {
        return Err(Error::InvalidOrientation { norm });
    }
    Ok(q.conjugate() / (norm * norm))
}

/// Like `f64::signum` but zero stays zero and NaN stays NaN.
fn signum_or_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value.signum() }
}
