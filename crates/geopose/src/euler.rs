//! Quaternion to pitch/yaw/roll extraction.
//!
//! The axis mapping here is not the textbook ZYX Tait-Bryan one. Placement code
//! downstream expects exactly this convention, so the formulas must not be
//! swapped for a generic conversion routine.

use std::f64::consts::FRAC_PI_2;

use glam::DQuat;

/// Fraction of the squared norm beyond which the pose is treated as gimbal-locked.
const SINGULARITY_THRESHOLD: f64 = 0.499_995;

/// Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Convert a quaternion to pitch, yaw, and roll.
///
/// The quaternion must be unit length. Only the singularity test is scaled by
/// the squared norm; the general branch assumes a unit quaternion and gives
/// wrong angles (or NaN pitch) otherwise.
#[must_use]
pub fn quat_to_euler(q: DQuat) -> EulerAngles {
    let DQuat { x, y, z, w } = q;

    let test = x * w - y * z;
    let unit = x * x + y * y + z * z + w * w;

    if test > SINGULARITY_THRESHOLD * unit {
        // North pole.
        return EulerAngles {
            pitch: FRAC_PI_2,
            yaw: 2.0 * y.atan2(x),
            roll: 0.0,
        };
    }
    if test < -SINGULARITY_THRESHOLD * unit {
        // South pole.
        return EulerAngles {
            pitch: -FRAC_PI_2,
            yaw: 2.0 * y.atan2(x),
            roll: 0.0,
        };
    }

    EulerAngles {
        pitch: (2.0 * (x * z - w * y)).asin(),
        yaw: (2.0 * (x * w + y * z)).atan2(1.0 - 2.0 * (z * z + w * w)),
        roll: (2.0 * (x * y + z * w)).atan2(1.0 - 2.0 * (y * y + z * z)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_north_pole_singularity() {
        // x·w - y·z = 0.25 + 0.25 = 0.5 with unit norm.
        let q = DQuat::from_xyzw(0.5, 0.5, -0.5, 0.5);
        let angles = quat_to_euler(q);

        assert!((angles.pitch - FRAC_PI_2).abs() < EPS);
        assert!(angles.roll.abs() < EPS);
        assert!((angles.yaw - 2.0 * 0.5f64.atan2(0.5)).abs() < EPS);
        assert!((angles.yaw - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_north_pole_pure_x() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let angles = quat_to_euler(DQuat::from_xyzw(s, 0.0, 0.0, s));

        assert!((angles.pitch - FRAC_PI_2).abs() < EPS);
        assert!(angles.yaw.abs() < EPS);
        assert!(angles.roll.abs() < EPS);
    }

    #[test]
    fn test_south_pole_singularity() {
        let q = DQuat::from_xyzw(-0.5, 0.5, 0.5, 0.5);
        let angles = quat_to_euler(q);

        assert!((angles.pitch + FRAC_PI_2).abs() < EPS);
        assert!(angles.roll.abs() < EPS);
        assert!((angles.yaw - 2.0 * 0.5f64.atan2(-0.5)).abs() < EPS);
    }

    #[test]
    fn test_singularity_scales_with_norm() {
        // Same rotation as the north pole case, scaled by 3.
        let q = DQuat::from_xyzw(1.5, 1.5, -1.5, 1.5);
        let angles = quat_to_euler(q);
        assert!((angles.pitch - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_general_branch_formulas() {
        let q = DQuat::from_xyzw(0.1, 0.2, 0.3, 0.9).normalize();
        let DQuat { x, y, z, w } = q;
        let angles = quat_to_euler(q);

        assert!((angles.pitch - (2.0 * (x * z - w * y)).asin()).abs() < EPS);
        assert!(
            (angles.yaw - (2.0 * (x * w + y * z)).atan2(1.0 - 2.0 * (z * z + w * w))).abs() < EPS
        );
        assert!(
            (angles.roll - (2.0 * (x * y + z * w)).atan2(1.0 - 2.0 * (y * y + z * z))).abs() < EPS
        );
    }

    #[test]
    fn test_general_branch_needs_unit_quaternion() {
        let q = DQuat::from_xyzw(0.1, 0.2, 0.3, 0.9).normalize();
        let unit = quat_to_euler(q);

        let scaled = quat_to_euler(q * 2.0);
        assert!(scaled.pitch.is_nan());

        let renormalized = quat_to_euler((q * 2.0).normalize());
        assert!((renormalized.pitch - unit.pitch).abs() < EPS);
        assert!((renormalized.yaw - unit.yaw).abs() < EPS);
        assert!((renormalized.roll - unit.roll).abs() < EPS);
    }

    #[test]
    fn test_identity() {
        let angles = quat_to_euler(DQuat::IDENTITY);
        assert!(angles.pitch.abs() < EPS);
        // With w = 1 the yaw term is atan2(0, -1).
        assert!((angles.yaw - std::f64::consts::PI).abs() < EPS);
        assert!(angles.roll.abs() < EPS);
    }
}
