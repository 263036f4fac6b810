use rayon::prelude::*;
use saferoute_core::RouteScorer;

use crate::{Error, SafeRouteRequest, SafeRouteResponse, contract::route_request};

/// Routes independent requests in parallel.
///
/// Results keep the order of `requests`. A failing request does not affect
/// the others.
pub fn calculate_safe_routes(
    scorer: &RouteScorer,
    requests: &[SafeRouteRequest],
) -> Vec<Result<SafeRouteResponse, Error>> {
    requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            route_request(scorer, request).inspect_err(|e| {
                log::warn!("Routing failed for request {index}: {e}");
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SafetyPoint;

    fn request(start: [f64; 2], end: [f64; 2], level: &str) -> SafeRouteRequest {
        SafeRouteRequest {
            start,
            end,
            safety_points: vec![SafetyPoint {
                lat: 28.6280,
                lng: 77.2137,
                name: Some("Connaught Place".to_string()),
                safety_level: level.to_string(),
                radius: Some(150.0),
            }],
        }
    }

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let requests = vec![
            request([28.6139, 77.2090], [28.6129, 77.2295], "danger"),
            request([28.6139, 77.2090], [28.6129, 77.2295], "bogus"),
            request([28.6562, 77.2410], [28.5535, 77.2588], "safe"),
        ];

        let results = calculate_safe_routes(&RouteScorer::default(), &requests);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().is_err_and(Error::is_client_error));
        assert!(results[2].is_ok());

        let single = route_request(&RouteScorer::default(), &requests[2]).unwrap();
        assert_eq!(results[2].as_ref().unwrap(), &single);
    }
}
