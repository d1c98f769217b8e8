//! Convert geodetic GeoPoses into camera-relative transforms.
//!
//! A localization service reports where the device camera is on the globe, and a
//! content-discovery service reports where nearby content is. This crate turns
//! each content GeoPose into an offset and rotation relative to the camera,
//! expressed in the axes of a Y-up, -Z-forward 3D engine.
//!
//! # Design principles
//!
//! - **Pure**: every operation is a function of its inputs, with no I/O and no state
//! - **Engine-agnostic**: produces numbers only; placing entities is left to callers
//! - **Lenient input**: tolerates the defects real services send (e.g. `"undefined"` heights)
//!
//! # Example
//!
//! ```ignore
//! use geopose::{LocalizationResponse, compute_relative_position};
//!
//! let response: LocalizationResponse = serde_json::from_str(&body)?;
//! let camera = response.camera_pose();
//! for record in &response.scrs {
//!     let offset = compute_relative_position(camera, record.content.pose());
//! }
//! ```

pub mod discovery;
mod error;
pub mod euler;
pub mod frames;
pub mod geodesy;
mod pose;
mod relative;

pub use discovery::{ContentPlacement, LocalizationResponse, Placements, SpatialContentRecord};
pub use error::{Error, Result};
pub use euler::{EulerAngles, quat_to_euler};
pub use frames::{engine_to_geo, engine_to_geo_rotation, geo_to_engine, geo_to_engine_rotation};
pub use geodesy::GeoPoint;
pub use pose::GeodeticPose;
pub use relative::{
    RelativeTransform, compute_relative_euler_angles, compute_relative_orientation,
    compute_relative_position, enu_offset, relative_transform,
};
