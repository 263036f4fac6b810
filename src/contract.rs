use geojson::FeatureCollection;
use log::debug;
use serde::{Deserialize, Serialize};

use saferoute_core::Error as CoreError;
use saferoute_core::prelude::*;

use crate::Error;

/// Safety point as sent by map consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// One of `safe`, `caution`, `danger`
    pub safety_level: String,
    /// Marker radius in meters, ignored by routing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl SafetyPoint {
    /// Validates the point into a zone. Unnamed points are labeled by their
    /// node id.
    pub fn to_zone(&self, index: ZoneIndex) -> Result<SafetyZone, CoreError> {
        let coordinate = Coordinate::new(self.lat, self.lng)
            .map_err(|e| CoreError::InvalidInput(format!("safety point {index}: {e}")))?;
        let safety_level: SafetyLevel = self.safety_level.parse()?;
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| RouteNodeId::Zone(index).to_string());

        let zone = SafetyZone::new(name, coordinate, safety_level);
        match self.radius {
            Some(radius) => zone.with_display_radius(radius),
            None => Ok(zone),
        }
    }
}

/// Routing request: start and end as `[lat, lng]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeRouteRequest {
    pub start: [f64; 2],
    pub end: [f64; 2],
    #[serde(default)]
    pub safety_points: Vec<SafetyPoint>,
}

impl SafeRouteRequest {
    /// Validates every coordinate and level before any graph is built
    pub fn to_core(&self) -> Result<(Coordinate, Coordinate, Vec<SafetyZone>), CoreError> {
        let start = Coordinate::new(self.start[0], self.start[1])
            .map_err(|e| CoreError::InvalidInput(format!("start: {e}")))?;
        let end = Coordinate::new(self.end[0], self.end[1])
            .map_err(|e| CoreError::InvalidInput(format!("end: {e}")))?;
        let zones = self
            .safety_points
            .iter()
            .enumerate()
            .map(|(index, point)| point.to_zone(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((start, end, zones))
    }
}

/// Routing response. `path` is `null` when no route exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeRouteResponse {
    pub path: Option<Vec<String>>,
    pub total_weight: Option<f64>,
    pub distance_km: Option<f64>,
    /// Visited coordinates as `[lat, lng]`
    pub coordinates: Option<Vec<[f64; 2]>>,
}

impl SafeRouteResponse {
    pub fn no_route() -> Self {
        Self {
            path: None,
            total_weight: None,
            distance_km: None,
            coordinates: None,
        }
    }
}

impl From<Option<SafeRoute>> for SafeRouteResponse {
    fn from(route: Option<SafeRoute>) -> Self {
        match route {
            Some(route) => Self {
                path: Some(route.id_strings()),
                total_weight: Some(route.total_weight()),
                distance_km: Some(route.distance_km()),
                coordinates: Some(
                    route
                        .coordinates()
                        .iter()
                        .map(|c| [c.lat(), c.lng()])
                        .collect(),
                ),
            },
            None => Self::no_route(),
        }
    }
}

/// Safest path as a list of node ids, or `None` if no route exists.
///
/// `start` and `end` are `(lat, lng)` tuples.
///
/// # Errors
///
/// Returns [`Error::Routing`] for out-of-range coordinates or unknown safety levels.
pub fn calculate_safe_route(
    start: (f64, f64),
    end: (f64, f64),
    safety_points: &[SafetyPoint],
) -> Result<Option<Vec<String>>, Error> {
    let request = SafeRouteRequest {
        start: [start.0, start.1],
        end: [end.0, end.1],
        safety_points: safety_points.to_vec(),
    };
    let response = route_request(&RouteScorer::default(), &request)?;
    Ok(response.path)
}

/// # Errors
///
/// Returns [`Error::Routing`] if validation or routing fails.
pub fn route_request(
    scorer: &RouteScorer,
    request: &SafeRouteRequest,
) -> Result<SafeRouteResponse, Error> {
    let (start, end, zones) = request.to_core()?;
    let route = scorer.compute_safest_route(start, end, &zones)?;

    debug!(
        "Routed {start} -> {end} over {} safety points: {:?}",
        zones.len(),
        route.as_ref().map(SafeRoute::id_strings)
    );

    Ok(route.into())
}

/// Route as `GeoJSON`, `None` if no route exists
///
/// # Errors
///
/// Returns [`Error::Routing`] if validation or routing fails.
pub fn route_geojson(
    scorer: &RouteScorer,
    request: &SafeRouteRequest,
) -> Result<Option<FeatureCollection>, Error> {
    let (start, end, zones) = request.to_core()?;
    let route = scorer.compute_safest_route(start, end, &zones)?;
    Ok(route.map(|route| route.to_geojson()))
}

/// JSON in, JSON out
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed input, [`Error::Routing`] for invalid values.
pub fn route_json(scorer: &RouteScorer, request: &str) -> Result<String, Error> {
    let request: SafeRouteRequest = serde_json::from_str(request)?;
    let response = route_request(scorer, &request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64, level: &str) -> SafetyPoint {
        SafetyPoint {
            lat,
            lng,
            name: None,
            safety_level: level.to_string(),
            radius: None,
        }
    }

    fn direct_path() -> Option<Vec<String>> {
        Some(vec!["start".to_string(), "end".to_string()])
    }

    #[test]
    fn deserializes_consumer_payload() {
        let request: SafeRouteRequest = serde_json::from_str(
            r#"{
                "start": [28.6139, 77.2090],
                "end": [28.6129, 77.2295],
                "safety_points": [
                    {"lat": 28.6129, "lng": 77.2295, "name": "India Gate",
                     "safety_level": "safe", "radius": 100},
                    {"lat": 28.6280, "lng": 77.2137, "safety_level": "caution"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.safety_points.len(), 2);
        assert_eq!(request.safety_points[0].radius, Some(100.0));
        assert_eq!(request.safety_points[1].name, None);

        let (_, _, zones) = request.to_core().unwrap();
        assert_eq!(zones[0].name, "India Gate");
        assert_eq!(zones[1].name, "safety_1");
        assert_eq!(zones[1].safety_level, SafetyLevel::Caution);
    }

    #[test]
    fn safety_points_default_to_empty() {
        let request: SafeRouteRequest =
            serde_json::from_str(r#"{"start": [0.0, 0.0], "end": [1.0, 1.0]}"#).unwrap();
        assert!(request.safety_points.is_empty());
    }

    #[test]
    fn calculate_safe_route_matches_contract() {
        let path = calculate_safe_route(
            (28.6139, 77.2090),
            (28.6129, 77.2295),
            &[point(28.6280, 77.2137, "danger")],
        )
        .unwrap();

        assert_eq!(path, direct_path());
    }

    #[test]
    fn invalid_points_are_client_errors() {
        let (start, end) = ((0.0, 0.0), (1.0, 1.0));

        let unknown = [point(0.5, 0.5, "unknown")];
        let err = calculate_safe_route(start, end, &unknown).unwrap_err();
        assert!(err.is_client_error());

        let out_of_range = [point(95.0, 0.5, "safe")];
        let err = calculate_safe_route(start, end, &out_of_range).unwrap_err();
        assert!(err.to_string().contains("safety point 0"));

        let err = calculate_safe_route((0.0, 200.0), (1.0, 1.0), &[]).unwrap_err();
        assert!(err.to_string().contains("start"));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let mut bad = point(0.5, 0.5, "safe");
        bad.radius = Some(-5.0);
        assert!(bad.to_zone(0).is_err());
    }

    #[test]
    fn response_serializes_null_path_for_no_route() {
        let json = serde_json::to_value(SafeRouteResponse::no_route()).unwrap();
        assert_eq!(json["path"], serde_json::Value::Null);
    }

    #[test]
    fn route_json_round_trip() {
        let scorer = RouteScorer::default();
        let output = route_json(
            &scorer,
            r#"{"start": [28.6139, 77.2090], "end": [28.6129, 77.2295], "safety_points": []}"#,
        )
        .unwrap();

        let response: SafeRouteResponse = serde_json::from_str(&output).unwrap();
        assert_eq!(response.path, direct_path());
        assert_eq!(
            response.coordinates,
            Some(vec![[28.6139, 77.2090], [28.6129, 77.2295]])
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = route_json(&RouteScorer::default(), "{\"start\": [1.0]}").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn geojson_is_produced_for_routes() {
        let request = SafeRouteRequest {
            start: [28.6139, 77.2090],
            end: [28.6129, 77.2295],
            safety_points: vec![point(28.6280, 77.2137, "danger")],
        };
        let collection = route_geojson(&RouteScorer::default(), &request)
            .unwrap()
            .unwrap();
        assert_eq!(collection.features.len(), 3);
    }
}
