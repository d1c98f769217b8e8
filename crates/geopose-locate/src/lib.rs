//! Device location with a region code.
//!
//! Localization and content-discovery services are partitioned by region, so
//! before the first request a client needs to know roughly where it is. This
//! crate resolves the device position through a [`PositionSource`] and turns it
//! into a country-level region code with a [`ReverseGeocoder`].
//!
//! Lookups are one-shot request/response exchanges: there are no retries, and
//! a failure is reported to the caller as a rejection reason.

mod error;
mod geocoder;
mod position;

pub use error::{Error, Result};
pub use geocoder::ReverseGeocoder;
pub use position::{FixedPosition, GeoPosition, NoPosition, PositionFuture, PositionSource};

/// Where the device is, and which region that falls in.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Upper-case ISO 3166-1 alpha-2 country code.
    pub region_code: String,
}

/// Resolve the device position and its region code.
///
/// # Errors
///
/// Returns [`Error::Unavailable`] if the source has no position, or an HTTP
/// or response error from the geocoder.
pub async fn locate<S>(source: &S, geocoder: &ReverseGeocoder) -> Result<DeviceLocation>
where
    S: PositionSource + ?Sized,
{
    let position = source.current_position().await?;
    let region_code = geocoder.region_code(position).await?;

    tracing::info!(
        latitude = position.latitude,
        longitude = position.longitude,
        region_code = %region_code,
        "resolved device location"
    );

    Ok(DeviceLocation {
        latitude: position.latitude,
        longitude: position.longitude,
        region_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::tests::block_on;

    #[test]
    fn test_locate_unavailable_skips_geocoder() {
        let geocoder = ReverseGeocoder::new().with_base_url("http://127.0.0.1:9");
        let result = block_on(locate(&NoPosition::new("denied"), &geocoder));
        assert_eq!(
            result,
            Err(Error::Unavailable {
                reason: "denied".to_string()
            })
        );
    }
}
