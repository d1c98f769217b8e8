//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use std::path::PathBuf;

use bevy::prelude::*;

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Default)]
pub struct LaunchParams {
    /// Localization response (with content records) to place around the camera.
    pub response: Option<PathBuf>,
    /// Whether to show the debug axis markers at the origin.
    pub show_axes: bool,
    /// Whether to look up the region code of the camera position.
    pub reverse_geocode: bool,
    /// Nominatim-compatible server for region lookups.
    pub geocoder_url: Option<String>,
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(about = "Place discovered GeoPose content around a localized camera")]
    struct CliArgs {
        /// Localization response JSON containing the camera pose and content records.
        #[arg(long)]
        response: Option<PathBuf>,

        /// Show axis markers at +X, +Y and +Z.
        #[arg(long)]
        axes: bool,

        /// Look up the region code of the camera position.
        #[arg(long)]
        reverse_geocode: bool,

        /// Nominatim-compatible server used for region lookups.
        #[arg(long)]
        geocoder_url: Option<String>,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();
        LaunchParams {
            response: args.response,
            show_axes: args.axes,
            reverse_geocode: args.reverse_geocode,
            geocoder_url: args.geocoder_url,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_args() {
            let args = CliArgs::try_parse_from([
                "geopose-viewer",
                "--response",
                "scene.json",
                "--axes",
                "--geocoder-url",
                "http://localhost:8080",
            ])
            .unwrap();
            assert_eq!(args.response, Some(PathBuf::from("scene.json")));
            assert!(args.axes);
            assert!(!args.reverse_geocode);
            assert_eq!(args.geocoder_url.as_deref(), Some("http://localhost:8080"));
        }

        #[test]
        fn test_parse_no_args() {
            let args = CliArgs::try_parse_from(["geopose-viewer"]).unwrap();
            assert!(args.response.is_none());
            assert!(!args.axes);
        }
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams {
            show_axes: true,
            ..LaunchParams::default()
        }
    }
}
