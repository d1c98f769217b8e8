//! Reverse geocoding of positions into region codes.
//!
//! Talks to an OpenStreetMap Nominatim-compatible `/reverse` endpoint.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::position::GeoPosition;

/// Base URL of the public Nominatim instance.
const BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// User agent for API requests (required by the Nominatim usage policy).
const USER_AGENT: &str = "geopose-locate/0.1 (https://github.com/OpenArCloud/geopose-relativizer)";

/// Country-level zoom; finer levels are not needed for a region code.
const COUNTRY_ZOOM: u8 = 3;

/// Reverse geocoding client.
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    http: reqwest::Client,
    base_url: String,
}

impl ReverseGeocoder {
    /// Create a geocoder against the public Nominatim instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Use a custom HTTP client.
    #[must_use]
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Use a different Nominatim-compatible server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the reverse lookup for `position`.
    fn reverse_url(&self, position: GeoPosition) -> String {
        format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2&zoom={COUNTRY_ZOOM}",
            self.base_url, position.latitude, position.longitude
        )
    }

    /// Look up the upper-case ISO 3166-1 country code for `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no country code.
    pub async fn region_code(&self, position: GeoPosition) -> Result<String> {
        let url = self.reverse_url(position);
        tracing::debug!(url = %url, "reverse geocoding");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| Error::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body: ReverseResponse = response.json().await.map_err(|e| Error::InvalidResponse {
            url: url.clone(),
            detail: e.to_string(),
        })?;

        region_from_response(body).map_err(|detail| Error::InvalidResponse { url, detail })
    }
}

impl Default for ReverseGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

/// The parts of a Nominatim reverse response we use.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
    /// Set instead of an address when nothing was found (e.g. open sea).
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Address {
    #[serde(default)]
    country_code: Option<String>,
}

fn region_from_response(response: ReverseResponse) -> std::result::Result<String, String> {
    if let Some(error) = response.error {
        return Err(error);
    }
    response
        .address
        .and_then(|a| a.country_code)
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| "no country code in response".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> std::result::Result<String, String> {
        region_from_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_region_from_response() {
        let json = r#"{
            "place_id": 282000,
            "lat": "47.4678",
            "lon": "19.025",
            "display_name": "Magyarország",
            "address": {"country": "Magyarország", "country_code": "hu"}
        }"#;
        assert_eq!(parse(json), Ok("HU".to_string()));
    }

    #[test]
    fn test_region_missing_country_code() {
        assert!(parse(r#"{"address": {"country": "Nowhere"}}"#).is_err());
        assert!(parse(r#"{"address": {"country_code": " "}}"#).is_err());
        assert!(parse("{}").is_err());
    }

    #[test]
    fn test_region_error_response() {
        assert_eq!(
            parse(r#"{"error": "Unable to geocode"}"#),
            Err("Unable to geocode".to_string())
        );
    }

    #[test]
    fn test_reverse_url() {
        let geocoder = ReverseGeocoder::new().with_base_url("http://localhost:8080/");
        assert_eq!(
            geocoder.reverse_url(GeoPosition::new(47.5, 19.0)),
            "http://localhost:8080/reverse?lat=47.5&lon=19&format=jsonv2&zoom=3"
        );
    }

    #[test]
    fn test_default_base_url() {
        let geocoder = ReverseGeocoder::default();
        assert!(geocoder.base_url.starts_with("https://"));
    }
}
