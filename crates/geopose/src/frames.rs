//! Axis remapping between geodesic East-North-Up and the engine frame.
//!
//! The engine frame is right-handed, Y-up, with the camera looking down -Z:
//!
//! - `engine.x = geo.x` (east)
//! - `engine.y = geo.z` (up)
//! - `engine.z = -geo.y` (south)
//!
//! The remap is a proper rotation (-90° about X), so quaternions convert by
//! conjugation and handedness is preserved.

use std::f64::consts::FRAC_PI_2;

use glam::{DQuat, DVec3};

/// Rotation taking geodesic axes onto engine axes.
fn geo_to_engine_basis() -> DQuat {
    DQuat::from_rotation_x(-FRAC_PI_2)
}

/// Convert an East-North-Up vector into the engine frame.
#[must_use]
pub fn geo_to_engine(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, -v.y)
}

/// Convert an engine-frame vector back into East-North-Up.
#[must_use]
pub fn engine_to_geo(v: DVec3) -> DVec3 {
    DVec3::new(v.x, -v.z, v.y)
}

/// Express a rotation given in East-North-Up axes in engine axes.
#[must_use]
pub fn geo_to_engine_rotation(q: DQuat) -> DQuat {
    let basis = geo_to_engine_basis();
    (basis * q * basis.conjugate()).normalize()
}

/// Express a rotation given in engine axes in East-North-Up axes.
#[must_use]
pub fn engine_to_geo_rotation(q: DQuat) -> DQuat {
    let basis = geo_to_engine_basis();
    (basis.conjugate() * q * basis).normalize()
}
