use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize, Clone)]
pub struct ReverseGeocode {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub label: String,
}

#[derive(Debug, Deserialize, Default)]
struct UpstreamAddress {
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct UpstreamReverse {
    display_name: Option<String>,
    address: Option<UpstreamAddress>,
}

fn geocoder_base_url() -> String {
    std::env::var("NOMINATIM_URL")
        .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string())
}

fn geocoder_user_agent() -> String {
    std::env::var("GEOCODER_USER_AGENT").unwrap_or_else(|_| "whereabouts/0.1".to_string())
}

pub async fn reverse_geocode_upstream(lat: f64, lon: f64) -> Result<ReverseGeocode, ()> {
    let base_url = geocoder_base_url();
    let url = format!("{}/reverse", base_url.trim_end_matches('/'));
    let lat_param = lat.to_string();
    let lon_param = lon.to_string();

    let client = reqwest::Client::new();
    let resp = match client
        .get(&url)
        .query(&[
            ("format", "json"),
            ("lat", lat_param.as_str()),
            ("lon", lon_param.as_str()),
            ("zoom", "18"),
            ("addressdetails", "1"),
        ])
        .header("User-Agent", geocoder_user_agent())
        .header("Accept-Language", "en-US")
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!("📍 Reverse geocode upstream unreachable: {}", e);
            return Err(());
        }
    };

    if !resp.status().is_success() {
        warn!("📍 Reverse geocode upstream non-OK: {}", resp.status());
        return Err(());
    }

    let parsed: UpstreamReverse = match resp.json().await {
        Ok(data) => data,
        Err(e) => {
            warn!("📍 Reverse geocode upstream JSON parse failed: {}", e);
            return Err(());
        }
    };

    let label = short_label(&parsed);
    Ok(ReverseGeocode {
        latitude: lat,
        longitude: lon,
        display_name: parsed.display_name.unwrap_or_default(),
        label,
    })
}

/// Short place label: a preferred address field when the response carries one,
/// otherwise the first comma-separated segment of the display name.
fn short_label(parsed: &UpstreamReverse) -> String {
    if let Some(address) = parsed.address.as_ref() {
        let preferred = [&address.road, &address.city, &address.town, &address.village]
            .into_iter()
            .find_map(|field| field.as_deref().map(str::trim).filter(|s| !s.is_empty()));
        if let Some(name) = preferred {
            return name.to_string();
        }
    }

    parsed
        .display_name
        .as_deref()
        .and_then(|d| d.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown location".to_string())
}
