//! Sources of the device's geographic position.

use std::future::Future;
use std::pin::Pin;

use crate::error::{Error, Result};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Future type for position requests.
pub type PositionFuture<'a> = Pin<Box<dyn Future<Output = Result<GeoPosition>> + Send + 'a>>;

/// Something that can report where the device is.
///
/// Requests are one-shot: no retries and no cancellation.
pub trait PositionSource: Send + Sync {
    /// Resolve the current position.
    fn current_position(&self) -> PositionFuture<'_>;
}

/// A position source that always reports the same position.
///
/// Useful on platforms without positioning hardware and for development.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    position: GeoPosition,
}

impl FixedPosition {
    #[must_use]
    pub fn new(position: GeoPosition) -> Self {
        Self { position }
    }
}

impl PositionSource for FixedPosition {
    fn current_position(&self) -> PositionFuture<'_> {
        let position = self.position;
        Box::pin(async move { Ok(position) })
    }
}

/// A position source that is never available.
#[derive(Debug, Clone)]
pub struct NoPosition {
    reason: String,
}

impl NoPosition {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PositionSource for NoPosition {
    fn current_position(&self) -> PositionFuture<'_> {
        let reason = self.reason.clone();
        Box::pin(async move { Err(Error::Unavailable { reason }) })
    }
}
