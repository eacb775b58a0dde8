use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_tours::{segment::InvalidPolyline, tour::Tour};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value::Point};
use serde::Serialize;
use serde_json::json;

use crate::{error::ApiError, state::AppState, tours::tour::TourPath};

#[derive(Serialize)]
pub struct TourRouteResponse(GeoJson);

impl IntoResponse for TourRouteResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Cached route of the tour as GeoJSON: one point per stop and one line per
/// segment. Reads the cache only, a tour without a route has no lines.
/// Stops and route come from the same read of the tour.
pub async fn tour_route_handler(
    Path(path): Path<TourPath>,
    State(state): State<Arc<AppState>>,
) -> Result<TourRouteResponse, ApiError> {
    let tour = state.tours.tour(path.tour_id)?;

    let features = route_features(&tour)
        .map_err(|error| ApiError::InternalServerError(error.to_string()))?;

    Ok(TourRouteResponse(GeoJson::FeatureCollection(
        FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        },
    )))
}

fn route_features(tour: &Tour) -> Result<Vec<Feature>, InvalidPolyline> {
    let mut features = tour
        .stops
        .iter()
        .map(|stop| Feature {
            geometry: Some(Geometry::new(Point(vec![
                stop.location.longitude,
                stop.location.latitude,
            ]))),
            properties: Some(properties(json!({
                "kind": "stop",
                "order": stop.order,
                "location_id": stop.location.id,
                "name": stop.location.name,
            }))),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    if let Some(route_data) = &tour.route_data {
        for segment in &route_data.segments {
            let path = segment.path()?;

            features.push(Feature {
                geometry: Some(Geometry::from(&path)),
                properties: Some(properties(json!({
                    "kind": "segment",
                    "segment_index": segment.segment_index,
                    "origin": segment.origin.name,
                    "destination": segment.destination.name,
                    "distance": segment.distance,
                    "duration": segment.duration,
                }))),
                ..Default::default()
            });
        }
    }

    Ok(features)
}

fn properties(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(object) => object,
        _ => JsonObject::new(),
    }
}

#[cfg(test)]
mod tests {
    use campus_directions::Waypoint;
    use campus_tours::{
        location::Location, route_data::RouteData, segment::Segment, tour::TourStop,
    };
    use jiff::Timestamp;

    use super::*;

    fn location(id: i64, name: &str, latitude: f64, longitude: f64) -> Location {
        Location {
            id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: String::new(),
            latitude,
            longitude,
            address: String::new(),
            category: String::new(),
            historical_info: String::new(),
        }
    }

    fn tour() -> Tour {
        Tour {
            id: 1,
            owner_id: 1,
            name: String::from("Tour"),
            description: String::new(),
            stops: vec![
                TourStop {
                    order: 1,
                    location: location(1, "Tech Tower", 33.7756, -84.3985),
                },
                TourStop {
                    order: 2,
                    location: location(2, "Bobby Dodd Stadium", 33.7726, -84.392),
                },
            ],
            route_data: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_stops_only_without_route() {
        let features = route_features(&tour()).unwrap();

        assert_eq!(features.len(), 2);
        let properties = features[1].properties.as_ref().unwrap();
        assert_eq!(properties["kind"], "stop");
        assert_eq!(properties["order"], 2);
    }

    #[test]
    fn test_segment_lines() {
        let mut tour = tour();
        tour.route_data = Some(RouteData::new(
            tour.waypoints(),
            vec![Segment {
                segment_index: 0,
                origin: Waypoint::new(1, "Tech Tower", 33.7756, -84.3985),
                destination: Waypoint::new(2, "Bobby Dodd Stadium", 33.7726, -84.392),
                distance: String::from("0.4 mi"),
                duration: String::from("8 mins"),
                polyline: String::new(),
                steps: vec![],
            }],
        ));

        let features = route_features(&tour).unwrap();

        assert_eq!(features.len(), 3);
        let segment = &features[2];
        assert_eq!(
            segment.properties.as_ref().unwrap()["destination"],
            "Bobby Dodd Stadium"
        );
        assert!(matches!(
            segment.geometry.as_ref().unwrap().value,
            geojson::Value::LineString(ref coordinates) if coordinates.len() == 2
        ));
    }
}
