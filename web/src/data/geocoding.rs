use serde::Deserialize;
use shared_types::GeoPoint;
use tracing::{debug, error, instrument, warn};

use super::config::SourceConfig;
use super::error::SourceError;

/// Nominatim search response entry.
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    lat: String,
    lon: String,
}

/// Accepts `06103` and `06103-1234`, returning the five-digit part.
pub fn normalize_postal_code(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let zip = raw.split_once('-').map_or(raw, |(head, _)| head);
    (zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit())).then_some(zip)
}

/// Resolves a US postal code to the center point Nominatim reports for it.
#[instrument(skip(config))]
pub async fn locate_postal_code(config: &SourceConfig, raw: &str) -> Result<GeoPoint, SourceError> {
    let zip = normalize_postal_code(raw).ok_or_else(|| SourceError::InvalidPostalCode(raw.to_string()))?;
    let url = format!(
        "{}?postalcode={}&country=us&format=json&limit=1",
        config.geocoder_url,
        urlencoding::encode(zip)
    );

    let response: Vec<NominatimResponse> = reqwest::Client::new()
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, zip, "Geocoding request failed");
            e
        })?
        .error_for_status()?
        .json()
        .await?;

    let Some(first) = response.first() else {
        warn!(zip, "Postal code not found by geocoder");
        return Err(SourceError::NotFound(zip.to_string()));
    };

    let point = match (first.lat.parse::<f64>(), first.lon.parse::<f64>()) {
        (Ok(lat), Ok(long)) => GeoPoint::new(lat, long),
        _ => return Err(SourceError::NotFound(zip.to_string())),
    };
    debug!(zip, lat = point.lat, long = point.long, "Geocoded postal code");
    Ok(point)
}
