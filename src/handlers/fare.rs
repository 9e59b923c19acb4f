use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::utils::fare::{estimate_fare, format_distance, format_fare};
use crate::utils::geo::{haversine_distance, Coordinate};
use crate::AppState;

pub const SUCCESS_MESSAGE: &str = "Fare calculated successfully";

/// A validated fare request.
#[derive(Debug, Clone, PartialEq)]
pub struct FareRequest {
    pub pickup: Coordinate,
    pub dropoff: String,
}

impl FareRequest {
    /// Validate a raw JSON body of the form `{"pickup": [lon, lat], "dropoff": "..."}`.
    ///
    /// The pickup is checked first, so a body missing both fields is reported
    /// as an invalid pickup.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let pickup = parse_pickup(body.get("pickup")).ok_or(AppError::InvalidPickup)?;

        let dropoff = match body.get("dropoff") {
            Some(Value::String(address)) if !address.is_empty() => address.clone(),
            _ => return Err(AppError::InvalidDropoff),
        };

        Ok(Self { pickup, dropoff })
    }
}

fn parse_pickup(value: Option<&Value>) -> Option<Coordinate> {
    match value?.as_array()?.as_slice() {
        [lon, lat] => Some(Coordinate::new(lon.as_f64()?, lat.as_f64()?)),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub message: String,
    pub dropoff: String,
    pub distance_km: String,
    pub estimated_fare: String,
}

impl FareResponse {
    pub fn new(dropoff: String, distance_km: f64, fare: f64, currency_symbol: &str) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            dropoff,
            distance_km: format_distance(distance_km),
            estimated_fare: format_fare(currency_symbol, fare),
        }
    }
}

/// Estimate the fare from a pickup coordinate to a dropoff address
pub async fn calculate_fare(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<FareResponse>> {
    // An unreadable body carries no pickup
    let body = payload
        .map(|Json(body)| body)
        .unwrap_or_else(|rejection| {
            tracing::debug!(error = %rejection, "Fare request body is not JSON");
            Value::Null
        });

    let request = FareRequest::from_json(&body)?;

    let place = state.geocoder.forward(&request.dropoff).await?;

    let distance_km = haversine_distance(request.pickup, place.coordinates);
    let fare = estimate_fare(distance_km);

    tracing::info!(
        pickup = ?request.pickup,
        dropoff = %place.display_name,
        distance_km = distance_km,
        fare = fare,
        "Fare calculated"
    );

    Ok(Json(FareResponse::new(
        place.display_name,
        distance_km,
        fare,
        &state.config.currency_symbol,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let body = json!({ "pickup": [-0.1870, 5.6037], "dropoff": "Kaneshie, Accra" });
        let request = FareRequest::from_json(&body).unwrap();

        assert_eq!(request.pickup, Coordinate::new(-0.1870, 5.6037));
        assert_eq!(request.dropoff, "Kaneshie, Accra");
    }

    #[test]
    fn test_integer_coordinates_are_accepted() {
        let body = json!({ "pickup": [0, 5], "dropoff": "Osu" });
        let request = FareRequest::from_json(&body).unwrap();
        assert_eq!(request.pickup, Coordinate::new(0.0, 5.0));
    }

    #[test]
    fn test_invalid_pickup_shapes() {
        let bodies = [
            json!({ "dropoff": "Osu" }),
            json!({ "pickup": null, "dropoff": "Osu" }),
            json!({ "pickup": [], "dropoff": "Osu" }),
            json!({ "pickup": [1.0], "dropoff": "Osu" }),
            json!({ "pickup": [1.0, 2.0, 3.0], "dropoff": "Osu" }),
            json!({ "pickup": ["-0.18", "5.60"], "dropoff": "Osu" }),
            json!({ "pickup": { "lon": 1.0, "lat": 2.0 }, "dropoff": "Osu" }),
            json!({ "pickup": "-0.18,5.60", "dropoff": "Osu" }),
            json!([[-0.18, 5.60], "Osu"]),
            Value::Null,
        ];
        for body in bodies {
            let err = FareRequest::from_json(&body).unwrap_err();
            assert!(matches!(err, AppError::InvalidPickup), "{body}");
        }
    }

    #[test]
    fn test_invalid_dropoff() {
        let bodies = [
            json!({ "pickup": [0.0, 0.0] }),
            json!({ "pickup": [0.0, 0.0], "dropoff": 42 }),
            json!({ "pickup": [0.0, 0.0], "dropoff": "" }),
            json!({ "pickup": [0.0, 0.0], "dropoff": null }),
            json!({ "pickup": [0.0, 0.0], "dropoff": ["Osu"] }),
        ];
        for body in bodies {
            let err = FareRequest::from_json(&body).unwrap_err();
            assert!(matches!(err, AppError::InvalidDropoff), "{body}");
        }
    }

    #[test]
    fn test_pickup_is_checked_first() {
        let body = json!({ "pickup": [1.0], "dropoff": 42 });
        let err = FareRequest::from_json(&body).unwrap_err();
        assert!(matches!(err, AppError::InvalidPickup));
    }

    #[test]
    fn test_fare_response_serialize() {
        let response = FareResponse::new("Osu, Accra, Ghana".to_string(), 1.6001, 8.2, "₵");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["message"], "Fare calculated successfully");
        assert_eq!(json["dropoff"], "Osu, Accra, Ghana");
        assert_eq!(json["distance_km"], "1.60 km");
        assert_eq!(json["estimated_fare"], "₵8.20");
    }
}
