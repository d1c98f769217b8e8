//! Loading a localization response and spawning its content.

use std::path::Path;

use bevy::prelude::*;
use geopose::{ContentPlacement, GeodeticPose, LocalizationResponse};
use geopose_scene::{BevySceneBuilder, add_axes, add_light, place_content};

use crate::launch_params::LaunchParams;

/// Plugin that places discovered content around the camera at startup.
pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DiscoveredContent>()
            .add_systems(Startup, (load_content, spawn_content).chain());
    }
}

/// The camera pose and content placements of the loaded response.
#[derive(Resource, Debug, Default)]
pub struct DiscoveredContent {
    pub camera: Option<GeodeticPose>,
    pub placements: Vec<ContentPlacement>,
    /// Records that could not be placed.
    pub skipped: usize,
    pub error: Option<String>,
}

impl DiscoveredContent {
    /// Relativize every content record of a localization response.
    fn from_json(json: &str) -> Result<Self, String> {
        let response: LocalizationResponse =
            serde_json::from_str(json).map_err(|e| format!("invalid localization response: {e}"))?;
        let placements = response.placements().map_err(|e| e.to_string())?;

        Ok(Self {
            camera: Some(*response.camera_pose()),
            placements: placements.placements,
            skipped: placements.skipped,
            error: None,
        })
    }

    fn from_file(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Read the response named on the command line, if any.
pub(crate) fn load_content(params: Res<LaunchParams>, mut content: ResMut<DiscoveredContent>) {
    let Some(path) = params.response.as_deref() else {
        tracing::info!("no localization response given, showing an empty scene");
        return;
    };

    match DiscoveredContent::from_file(path) {
        Ok(loaded) => {
            tracing::info!(
                path = %path.display(),
                placed = loaded.placements.len(),
                skipped = loaded.skipped,
                "loaded localization response"
            );
            *content = loaded;
        }
        Err(e) => {
            tracing::error!("{e}");
            content.error = Some(e);
        }
    }
}

fn spawn_content(
    params: Res<LaunchParams>,
    content: Res<DiscoveredContent>,
    mut scene: BevySceneBuilder,
) {
    add_light(&mut scene);
    if params.show_axes {
        add_axes(&mut scene);
    }
    for placement in &content.placements {
        place_content(&mut scene, placement);
    }
}
