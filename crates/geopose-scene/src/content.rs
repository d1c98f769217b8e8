//! Scene helpers built on top of [`SceneBuilder`].

use geopose::{ContentPlacement, RelativeTransform};
use glam::{Quat, Vec3};

use crate::builder::{LightKind, Rgb, SceneBuilder, Shape};

/// Scale of the marker at the origin of the debug axes.
const ORIGIN_MARKER_SCALE: Vec3 = Vec3::splat(0.01);

/// Handles of the debug axis markers.
#[derive(Debug, Clone, Copy)]
pub struct Axes<H> {
    pub x: H,
    pub y: H,
    pub z: H,
    pub origin: H,
}

/// Add small markers at +X (red box), +Y (green sphere), +Z (blue cone), and the origin.
pub fn add_axes<B: SceneBuilder>(builder: &mut B) -> Axes<B::Handle> {
    let x = builder.create_object(Shape::Box, Rgb::RED);
    builder.set_local_transform(x, Vec3::X, Quat::IDENTITY);

    let y = builder.create_object(Shape::Sphere, Rgb::GREEN);
    builder.set_local_transform(y, Vec3::Y, Quat::IDENTITY);

    let z = builder.create_object(Shape::Cone, Rgb::BLUE);
    builder.set_local_transform(z, Vec3::Z, Quat::IDENTITY);

    let origin = builder.create_object(Shape::Box, Rgb::RED);
    builder.set_local_scale(origin, ORIGIN_MARKER_SCALE);

    Axes { x, y, z, origin }
}

/// Add a white directional light.
pub fn add_light<B: SceneBuilder>(builder: &mut B) -> B::Handle {
    builder.create_light(LightKind::Directional, Rgb::WHITE)
}

/// Engine-precision translation and rotation for a relative transform.
#[must_use]
pub fn local_transform(transform: &RelativeTransform) -> (Vec3, Quat) {
    (
        transform.position.as_vec3(),
        transform.orientation.as_quat().normalize(),
    )
}

/// Create a placeholder for `placement` and move it into position.
pub fn place_content<B: SceneBuilder>(builder: &mut B, placement: &ContentPlacement) -> B::Handle {
    let handle = builder.create_placeholder(&placement.keywords);
    let (translation, rotation) = local_transform(&placement.transform);
    builder.set_local_transform(handle, translation, rotation);

    tracing::debug!(
        id = %placement.id,
        title = %placement.title,
        ?translation,
        "placed content"
    );
    handle
}
