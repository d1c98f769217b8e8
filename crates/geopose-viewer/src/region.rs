//! Background lookup of the region code for the camera position.

use bevy::prelude::*;
use geopose_locate::{DeviceLocation, FixedPosition, GeoPosition, ReverseGeocoder};

use crate::async_runtime::TaskSpawner;
use crate::content::{DiscoveredContent, load_content};
use crate::launch_params::LaunchParams;

/// Plugin for the optional region lookup.
pub struct RegionPlugin;

impl Plugin for RegionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RegionState>()
            .add_systems(Startup, start_region_lookup.after(load_content))
            .add_systems(Update, poll_region_result);
    }
}

/// State of the region lookup.
#[derive(Resource)]
pub struct RegionState {
    pub location: Option<DeviceLocation>,
    pub is_loading: bool,
    pub error: Option<String>,
    result_rx: async_channel::Receiver<Result<DeviceLocation, String>>,
    result_tx: async_channel::Sender<Result<DeviceLocation, String>>,
}

impl Default for RegionState {
    fn default() -> Self {
        let (result_tx, result_rx) = async_channel::bounded(1);
        Self {
            location: None,
            is_loading: false,
            error: None,
            result_rx,
            result_tx,
        }
    }
}

impl RegionState {
    /// Start resolving the region of `position`.
    pub fn start_request(
        &mut self,
        position: GeoPosition,
        geocoder: ReverseGeocoder,
        spawner: &TaskSpawner<'_, '_>,
    ) {
        if self.is_loading {
            return;
        }

        self.is_loading = true;
        self.error = None;

        let tx = self.result_tx.clone();
        spawner.spawn(async move {
            let source = FixedPosition::new(position);
            let result = geopose_locate::locate(&source, &geocoder)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(result).await;
        });
    }

    fn apply(&mut self, result: Result<DeviceLocation, String>) {
        self.is_loading = false;
        match result {
            Ok(location) => {
                self.location = Some(location);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "region lookup failed");
                self.location = None;
                self.error = Some(e);
            }
        }
    }
}

fn start_region_lookup(
    params: Res<LaunchParams>,
    content: Res<DiscoveredContent>,
    mut state: ResMut<RegionState>,
    spawner: TaskSpawner,
) {
    if !params.reverse_geocode {
        return;
    }
    let Some(camera) = content.camera.as_ref() else {
        state.error = Some("no camera pose to look up".to_string());
        return;
    };

    let mut geocoder = ReverseGeocoder::new();
    if let Some(url) = params.geocoder_url.as_deref() {
        geocoder = geocoder.with_base_url(url);
    }
    state.start_request(
        GeoPosition::new(camera.latitude, camera.longitude),
        geocoder,
        &spawner,
    );
}

fn poll_region_result(mut state: ResMut<RegionState>) {
    while let Ok(result) = state.result_rx.try_recv() {
        state.apply(result);
    }
}
