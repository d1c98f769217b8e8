//! Debug UI showing the camera pose, region and placed content.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use geopose::{ContentPlacement, EulerAngles, GeodeticPose, quat_to_euler};

use crate::content::DiscoveredContent;
use crate::region::RegionState;

/// Plugin for debug UI overlay.
pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(EguiPrimaryContextPass, debug_ui_system);
    }
}

fn debug_ui_system(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    content: Res<DiscoveredContent>,
    region: Res<RegionState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
        .unwrap_or(0.0);

    egui::Window::new("Debug")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps:.0}"));
            ui.separator();

            match content.camera.as_ref() {
                Some(camera) => render_camera(ui, camera),
                None => {
                    ui.label("Camera: not localized");
                }
            }
            if let Some(ref error) = content.error {
                ui.colored_label(egui::Color32::RED, error);
            }

            if region.is_loading {
                ui.label("Region: looking up...");
            } else if let Some(ref location) = region.location {
                ui.label(format!("Region: {}", location.region_code));
            } else if let Some(ref error) = region.error {
                ui.colored_label(egui::Color32::RED, format!("Region: {error}"));
            }

            ui.separator();
            ui.label(format!(
                "Content: {} placed, {} skipped",
                content.placements.len(),
                content.skipped
            ));
            egui::ScrollArea::vertical()
                .max_height(300.0)
                .show(ui, |ui| {
                    for placement in &content.placements {
                        ui.label(placement_label(placement));
                    }
                });
        });

    Ok(())
}

fn render_camera(ui: &mut egui::Ui, camera: &GeodeticPose) {
    ui.label(format!(
        "Camera: {:.6}, {:.6}",
        camera.latitude, camera.longitude
    ));
    match camera.ellipsoid_height() {
        Some(height) => ui.label(format!("Height: {height:.2} m")),
        None => ui.label("Height: unknown"),
    };
    match camera_angles(camera) {
        Some(angles) => ui.label(format!(
            "Pitch {:.1}°, yaw {:.1}°, roll {:.1}°",
            angles.pitch.to_degrees(),
            angles.yaw.to_degrees(),
            angles.roll.to_degrees()
        )),
        None => ui.label("Orientation: invalid"),
    };
}

/// Pitch, yaw and roll of the camera, if its orientation is usable.
fn camera_angles(camera: &GeodeticPose) -> Option<EulerAngles> {
    camera.validate().ok()?;
    Some(quat_to_euler(camera.orientation.normalize()))
}

/// One-line summary of a placement.
fn placement_label(placement: &ContentPlacement) -> String {
    let p = placement.transform.position;
    let title = if placement.title.is_empty() {
        placement.id.as_str()
    } else {
        placement.title.as_str()
    };
    format!(
        "{title}: {:.1} m ({:.2}, {:.2}, {:.2})",
        placement.distance(),
        p.x,
        p.y,
        p.z
    )
}

#[cfg(test)]
mod tests {
    use geopose::RelativeTransform;
    use glam::{DQuat, DVec3};

    use super::*;

    fn placement(title: &str) -> ContentPlacement {
        ContentPlacement {
            id: "abc".to_string(),
            title: title.to_string(),
            kind: "placeholder".to_string(),
            keywords: Vec::new(),
            url: String::new(),
            transform: RelativeTransform {
                position: DVec3::new(3.0, 0.0, -4.0),
                orientation: DQuat::IDENTITY,
            },
        }
    }

    #[test]
    fn test_placement_label() {
        assert_eq!(
            placement_label(&placement("ELMU")),
            "ELMU: 5.0 m (3.00, 0.00, -4.00)"
        );
    }

    #[test]
    fn test_camera_angles_normalize_orientation() {
        let q = DQuat::from_xyzw(0.1, 0.2, 0.3, 0.9).normalize();
        let unit = camera_angles(&GeodeticPose::new(47.5, 19.0, None, q)).unwrap();
        let scaled = camera_angles(&GeodeticPose::new(47.5, 19.0, None, q * 2.0)).unwrap();

        assert!(scaled.pitch.is_finite());
        assert!((scaled.pitch - unit.pitch).abs() < 1e-12);
        assert!((scaled.yaw - unit.yaw).abs() < 1e-12);
        assert!((scaled.roll - unit.roll).abs() < 1e-12);
    }

    #[test]
    fn test_camera_angles_reject_zero_orientation() {
        let camera = GeodeticPose::new(47.5, 19.0, None, DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert!(camera_angles(&camera).is_none());
    }

    #[test]
    fn test_placement_label_falls_back_to_id() {
        assert!(placement_label(&placement("")).starts_with("abc: "));
    }
}
