use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;

use crate::services::geocode_service;

#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

pub async fn reverse_geocode(Query(query): Query<ReverseGeocodeQuery>) -> impl IntoResponse {
    let coords = match (query.lat, query.lon) {
        (Some(lat), Some(lon))
            if lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0 =>
        {
            (lat, lon)
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "invalid_coordinates" })),
            )
                .into_response()
        }
    };

    match geocode_service::reverse_geocode_upstream(coords.0, coords.1).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(_) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "error": "bad_gateway" })),
        )
            .into_response(),
    }
}
