//! [`SceneBuilder`] adapter for Bevy.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::builder::{LightKind, Rgb, SceneBuilder, Shape};

/// Marker for entities created through the scene builder.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneObject;

/// A system parameter that builds scene entities with Bevy commands.
///
/// Entities are spawned through [`Commands`], so they become visible to
/// queries once the system's commands are applied.
#[derive(SystemParam)]
pub struct BevySceneBuilder<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::linear_rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Unit-sized mesh for a shape, centered on the origin.
fn shape_mesh(shape: Shape) -> Mesh {
    match shape {
        Shape::Box => Mesh::from(Cuboid::new(1.0, 1.0, 1.0)),
        Shape::Capsule => Mesh::from(Capsule3d::new(0.25, 0.5)),
        Shape::Cone => Mesh::from(Cone {
            radius: 0.5,
            height: 1.0,
        }),
        Shape::Cylinder => Mesh::from(Cylinder::new(0.5, 1.0)),
        Shape::Plane => Mesh::from(Plane3d::default()),
        Shape::Sphere => Mesh::from(Sphere::new(0.5)),
    }
}

impl SceneBuilder for BevySceneBuilder<'_, '_> {
    type Handle = Entity;

    fn create_shape(&mut self, shape: Shape, color: Rgb) -> Entity {
        let mesh = self.meshes.add(shape_mesh(shape));
        let material = self.materials.add(StandardMaterial {
            base_color: color.into(),
            ..default()
        });

        self.commands
            .spawn((
                SceneObject,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::default(),
            ))
            .id()
    }

    fn create_light(&mut self, kind: LightKind, color: Rgb) -> Entity {
        let color = Color::from(color);
        let mut entity = self.commands.spawn((SceneObject, Transform::default()));
        match kind {
            LightKind::Directional => entity.insert(DirectionalLight {
                color,
                ..default()
            }),
            LightKind::Point => entity.insert(PointLight {
                color,
                ..default()
            }),
            LightKind::Spot => entity.insert(SpotLight {
                color,
                ..default()
            }),
        };
        entity.id()
    }

    fn set_local_transform(&mut self, handle: Entity, translation: Vec3, rotation: Quat) {
        self.commands
            .entity(handle)
            .entry::<Transform>()
            .and_modify(move |mut transform| {
                transform.translation = translation;
                transform.rotation = rotation;
            });
    }

    fn set_local_scale(&mut self, handle: Entity, scale: Vec3) {
        self.commands
            .entity(handle)
            .entry::<Transform>()
            .and_modify(move |mut transform| transform.scale = scale);
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::builder::PLACEHOLDER_SCALE;
    use crate::content::add_axes;

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world
    }

    fn spawn_placeholder(mut scene: BevySceneBuilder) -> Entity {
        let entity = scene.create_placeholder(&["place".to_string()]);
        scene.set_local_transform(entity, Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.5));
        entity
    }

    fn spawn_axes_and_light(mut scene: BevySceneBuilder) {
        add_axes(&mut scene);
        scene.create_light(LightKind::Point, Rgb::WHITE);
    }

    #[test]
    fn test_placeholder_entity() {
        let mut world = world();
        let entity = world.run_system_once(spawn_placeholder).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::from_rotation_y(0.5));
        assert_eq!(transform.scale, PLACEHOLDER_SCALE);

        assert!(world.get::<Mesh3d>(entity).is_some());
        assert!(world.get::<SceneObject>(entity).is_some());
        assert_eq!(world.resource::<Assets<Mesh>>().len(), 1);
        assert_eq!(world.resource::<Assets<StandardMaterial>>().len(), 1);
    }

    #[test]
    fn test_shape_meshes_are_unit_sized() {
        for shape in [
            Shape::Box,
            Shape::Capsule,
            Shape::Cone,
            Shape::Cylinder,
            Shape::Sphere,
        ] {
            let mesh = shape_mesh(shape);
            let positions = mesh
                .attribute(Mesh::ATTRIBUTE_POSITION)
                .and_then(|values| values.as_float3())
                .unwrap();
            let (min, max) = positions.iter().map(|&p| Vec3::from(p)).fold(
                (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
                |(min, max), p| (min.min(p), max.max(p)),
            );
            let size = max - min;
            assert!(size.y > 0.9 && size.y <= 1.0 + 1e-5, "{shape:?}: {size}");
            assert!(size.max_element() <= 1.0 + 1e-5, "{shape:?}: {size}");
        }
    }

    #[test]
    fn test_axes_and_light() {
        let mut world = world();
        world.run_system_once(spawn_axes_and_light).unwrap();

        let mut objects = world.query_filtered::<Entity, With<SceneObject>>();
        assert_eq!(objects.iter(&world).count(), 5);

        let mut lights = world.query::<&PointLight>();
        assert_eq!(lights.iter(&world).count(), 1);
    }
}
