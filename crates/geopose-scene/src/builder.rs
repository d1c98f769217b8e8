//! The scene-builder capability.
//!
//! Anything that can create renderable entities and move them around can
//! display discovered content. Engines plug in by implementing [`SceneBuilder`].

use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};

/// Uniform scale applied to generic shape objects.
pub const OBJECT_SCALE: Vec3 = Vec3::splat(0.1);
/// Scale of content placeholders.
pub const PLACEHOLDER_SCALE: Vec3 = Vec3::new(0.1, 0.2, 0.3);

/// A linear RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Primitive shapes a builder can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Box,
    Capsule,
    Cone,
    Cylinder,
    Plane,
    Sphere,
}

/// Error returned when a string does not name a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShapeError(String);

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape '{}'", self.0)
    }
}

impl std::error::Error for ParseShapeError {}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(Shape::Box),
            "capsule" => Ok(Shape::Capsule),
            "cone" => Ok(Shape::Cone),
            "cylinder" => Ok(Shape::Cylinder),
            "plane" => Ok(Shape::Plane),
            "sphere" => Ok(Shape::Sphere),
            _ => Err(ParseShapeError(s.to_string())),
        }
    }
}

/// Kinds of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    #[default]
    Directional,
    Point,
    Spot,
}

/// Creates and positions renderable entities.
///
/// Newly created entities sit at the local origin with unit scale and no
/// rotation unless a provided method says otherwise.
pub trait SceneBuilder {
    /// Reference to a created entity.
    type Handle: Copy;

    /// Create a unit-sized primitive.
    fn create_shape(&mut self, shape: Shape, color: Rgb) -> Self::Handle;

    /// Create a light source.
    fn create_light(&mut self, kind: LightKind, color: Rgb) -> Self::Handle;

    /// Set the position and rotation of an entity relative to its parent.
    fn set_local_transform(&mut self, handle: Self::Handle, translation: Vec3, rotation: Quat);

    /// Set the scale of an entity relative to its parent.
    fn set_local_scale(&mut self, handle: Self::Handle, scale: Vec3);

    /// Create a unit box.
    fn create_box(&mut self, color: Rgb) -> Self::Handle {
        self.create_shape(Shape::Box, color)
    }

    /// Create a small sample object of the given shape.
    fn create_object(&mut self, shape: Shape, color: Rgb) -> Self::Handle {
        let handle = self.create_shape(shape, color);
        self.set_local_scale(handle, OBJECT_SCALE);
        handle
    }

    /// Create a placeholder for discovered content.
    ///
    /// A keyword naming a shape selects that shape; otherwise a box is used.
    /// The colour follows the first keyword with a known colour.
    fn create_placeholder(&mut self, keywords: &[String]) -> Self::Handle {
        let shape = keywords
            .iter()
            .find_map(|k| k.parse::<Shape>().ok())
            .unwrap_or(Shape::Box);
        let handle = self.create_shape(shape, placeholder_color(keywords));
        self.set_local_scale(handle, PLACEHOLDER_SCALE);
        handle
    }
}

/// Colour used for a placeholder with the given keywords.
#[must_use]
pub fn placeholder_color(keywords: &[String]) -> Rgb {
    keywords
        .iter()
        .find_map(|k| match k.as_str() {
            "place" => Some(Rgb::new(0.2, 0.6, 1.0)),
            "text" => Some(Rgb::new(1.0, 0.85, 0.2)),
            "other" => Some(Rgb::new(0.9, 0.3, 0.6)),
            _ => None,
        })
        .unwrap_or(Rgb::WHITE)
}


#[cfg(test)]
mod tests {
    use super::recording::{Kind, RecordingBuilder};
    use super::*;

    #[test]
    fn test_parse_shape() {
        assert_eq!("box".parse::<Shape>(), Ok(Shape::Box));
        assert_eq!(" Sphere ".parse::<Shape>(), Ok(Shape::Sphere));
        assert_eq!("cone".parse::<Shape>(), Ok(Shape::Cone));
        let err = "teapot".parse::<Shape>().unwrap_err();
        assert_eq!(err.to_string(), "unknown shape 'teapot'");
    }

    #[test]
    fn test_create_object_is_scaled() {
        let mut builder = RecordingBuilder::default();
        let handle = builder.create_object(Shape::Cylinder, Rgb::RED);

        let entity = &builder.entities[handle];
        assert_eq!(entity.kind, Kind::Shape(Shape::Cylinder, Rgb::RED));
        assert_eq!(entity.scale, OBJECT_SCALE);
    }

    #[test]
    fn test_placeholder_defaults_to_box() {
        let mut builder = RecordingBuilder::default();
        let handle = builder.create_placeholder(&[]);

        let entity = &builder.entities[handle];
        assert_eq!(entity.kind, Kind::Shape(Shape::Box, Rgb::WHITE));
        assert_eq!(entity.scale, PLACEHOLDER_SCALE);
    }

    #[test]
    fn test_placeholder_uses_keywords() {
        let mut builder = RecordingBuilder::default();
        let keywords = vec!["text".to_string(), "sphere".to_string()];
        let handle = builder.create_placeholder(&keywords);

        assert_eq!(
            builder.entities[handle].kind,
            Kind::Shape(Shape::Sphere, placeholder_color(&keywords))
        );
        assert_eq!(placeholder_color(&keywords), Rgb::new(1.0, 0.85, 0.2));
    }
}
