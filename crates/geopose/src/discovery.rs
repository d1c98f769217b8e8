//! Wire types for localization and spatial-content-discovery responses.
//!
//! A localization response carries the GeoPose of the device camera and the
//! spatial content records (SCRs) found around it. Two generations of the
//! service are understood: the original one with `ecef`/`pose` pairs and
//! array quaternions, and the newer one with `ecefPose` objects, flat content
//! GeoPoses, and object quaternions.

use glam::{DQuat, DVec3};
use serde::Deserialize;

use crate::error::Result;
use crate::pose::{GeodeticPose, quaternion_array_or_object};
use crate::relative::{RelativeTransform, relative_transform};

/// Response of a localization request.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizationResponse {
    /// GeoPose of the camera at the time of localization.
    pub geopose: LocalizationRecord,
    /// Content discovered around the camera.
    #[serde(default)]
    pub scrs: Vec<SpatialContentRecord>,
}

/// The localized camera GeoPose.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizationRecord {
    #[serde(default)]
    pub accuracy: Option<Accuracy>,
    #[serde(default, alias = "ecefPose")]
    pub ecef: Option<EcefPose>,
    #[serde(default)]
    pub id: String,
    pub pose: GeodeticPose,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Reported localization accuracy. Negative values mean "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Accuracy {
    pub orientation: f64,
    pub position: f64,
}

/// Earth-centered, earth-fixed position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawEcefPose")]
pub struct EcefPose {
    /// Position in meters.
    pub position: DVec3,
    pub orientation: DQuat,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEcefPose {
    Flat {
        #[serde(deserialize_with = "quaternion_array_or_object")]
        quaternion: DQuat,
        x: f64,
        y: f64,
        z: f64,
    },
    Nested {
        #[serde(deserialize_with = "quaternion_array_or_object")]
        orientation: DQuat,
        position: Xyz,
    },
}

#[derive(Deserialize)]
struct Xyz {
    x: f64,
    y: f64,
    z: f64,
}

impl From<RawEcefPose> for EcefPose {
    fn from(raw: RawEcefPose) -> Self {
        match raw {
            RawEcefPose::Flat {
                quaternion,
                x,
                y,
                z,
            } => Self {
                position: DVec3::new(x, y, z),
                orientation: quaternion,
            },
            RawEcefPose::Nested {
                orientation,
                position: Xyz { x, y, z },
            } => Self {
                position: DVec3::new(x, y, z),
                orientation,
            },
        }
    }
}

/// Service timestamp: an HTTP date or ISO string, or Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

/// A spatial content record.
#[derive(Debug, Clone, Deserialize)]
pub struct SpatialContentRecord {
    pub content: Content,
    pub id: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// The payload of a spatial content record.
#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub description: String,
    pub geopose: ContentGeoPose,
    #[serde(rename = "ecefPose", default)]
    pub ecef_pose: Option<EcefPose>,
    pub id: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub refs: Vec<ContentRef>,
    #[serde(default)]
    pub title: String,
    /// Content type, e.g. `placeholder`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

impl Content {
    /// The geodetic pose of this content.
    #[must_use]
    pub fn pose(&self) -> &GeodeticPose {
        self.geopose.pose()
    }
}

/// Content GeoPose, either nested with an ECEF twin or flat.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentGeoPose {
    Nested {
        pose: GeodeticPose,
        #[serde(default)]
        ecef: Option<EcefPose>,
    },
    Flat(GeodeticPose),
}

impl ContentGeoPose {
    #[must_use]
    pub fn pose(&self) -> &GeodeticPose {
        match self {
            ContentGeoPose::Nested { pose, .. } | ContentGeoPose::Flat(pose) => pose,
        }
    }
}

/// A link to an external resource attached to content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentRef {
    #[serde(rename = "contentType", default)]
    pub content_type: String,
    #[serde(default)]
    pub url: String,
}

/// Content positioned relative to the localized camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPlacement {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub keywords: Vec<String>,
    pub url: String,
    /// Transform relative to the camera, in engine axes.
    pub transform: RelativeTransform,
}

impl ContentPlacement {
    /// Relativize `record` against the camera pose `reference`.
    ///
    /// # Errors
    ///
    /// Fails if the record's pose has unusable coordinates or either
    /// orientation cannot be inverted.
    pub fn relative_to(reference: &GeodeticPose, record: &SpatialContentRecord) -> Result<Self> {
        let content = &record.content;
        let target = content.pose();
        target.validate()?;

        Ok(Self {
            id: content.id.clone(),
            title: content.title.clone(),
            kind: content.kind.clone(),
            keywords: content.keywords.clone(),
            url: content.url.clone(),
            transform: relative_transform(reference, target)?,
        })
    }

    /// Straight-line distance from the camera in meters.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.transform.position.length()
    }
}

/// Outcome of placing every record of a response.
#[derive(Debug, Clone, Default)]
pub struct Placements {
    pub placements: Vec<ContentPlacement>,
    /// Records dropped because their pose was unusable.
    pub skipped: usize,
}

impl LocalizationResponse {
    /// The localized camera pose.
    #[must_use]
    pub fn camera_pose(&self) -> &GeodeticPose {
        &self.geopose.pose
    }

    /// Relativize all content records against the camera pose.
    ///
    /// Individual records that cannot be placed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Fails if the camera pose itself is unusable.
    pub fn placements(&self) -> Result<Placements> {
        let reference = self.camera_pose();
        reference.validate()?;

        let mut result = Placements::default();
        for record in &self.scrs {
            match ContentPlacement::relative_to(reference, record) {
                Ok(placement) => result.placements.push(placement),
                Err(e) => {
                    tracing::warn!(id = %record.id, error = %e, "skipping content record");
                    result.skipped += 1;
                }
            }
        }

        tracing::debug!(
            placed = result.placements.len(),
            skipped = result.skipped,
            "placed content records"
        );
        Ok(result)
    }
}
