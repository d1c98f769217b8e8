//! Scene-builder capability for visualizing discovered content.
//!
//! The pose math in `geopose` only produces numbers. This crate turns those
//! numbers into entities through the [`SceneBuilder`] trait, so the same
//! placement code works with any engine that implements it. A Bevy adapter,
//! [`BevySceneBuilder`], is provided.
//!
//! # Example
//!
//! ```ignore
//! fn spawn_content(mut scene: BevySceneBuilder, placements: Res<ContentPlacements>) {
//!     add_light(&mut scene);
//!     for placement in &placements.0 {
//!         place_content(&mut scene, placement);
//!     }
//! }
//! ```

mod bevy_builder;
mod builder;
mod content;

pub use bevy_builder::{BevySceneBuilder, SceneObject};
pub use builder::{
    LightKind, OBJECT_SCALE, PLACEHOLDER_SCALE, ParseShapeError, Rgb, SceneBuilder, Shape,
    placeholder_color,
};
pub use content::{Axes, add_axes, add_light, local_transform, place_content};
