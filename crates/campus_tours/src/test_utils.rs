use std::sync::Arc;

use campus_directions::{DirectionsError, DirectionsProvider, Step, WalkingDirections, Waypoint};
use jiff::Timestamp;
use parking_lot::Mutex;

use crate::{
    location::{Location, NewLocation},
    route_data::RouteData,
    segment::Segment,
    storage::TourStore,
};

const CAMPUS: [(&str, &str, f64, f64); 4] = [
    ("Tech Tower", "tech-tower", 33.7756, -84.3985),
    ("Bobby Dodd Stadium", "bobby-dodd-stadium", 33.7726, -84.3920),
    ("Klaus Advanced Computing Building", "klaus", 33.7771, -84.3960),
    ("Student Center", "student-center", 33.7744, -84.3987),
];

#[derive(Default)]
struct MockState {
    calls: Vec<(i64, i64)>,
    failures: Vec<(i64, i64)>,
    hangs: Vec<(i64, i64)>,
    dropped: usize,
    query_params: Vec<(String, String)>,
}

/// Counts a hanging call as dropped once its future goes away.
struct DropCounter(Arc<Mutex<MockState>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.lock().dropped += 1;
    }
}

/// Directions provider that records every call. Chosen pairs fail with a
/// gateway timeout, others never answer.
#[derive(Clone, Default)]
pub struct MockDirections {
    state: Arc<Mutex<MockState>>,
}

impl MockDirections {
    pub fn fail_between(self, origin_id: i64, destination_id: i64) -> Self {
        self.state.lock().failures.push((origin_id, destination_id));
        self
    }

    pub fn hang_between(self, origin_id: i64, destination_id: i64) -> Self {
        self.state.lock().hangs.push((origin_id, destination_id));
        self
    }

    /// Calls to hanging pairs whose future was dropped.
    pub fn dropped_calls(&self) -> usize {
        self.state.lock().dropped
    }

    /// `(origin_id, destination_id)` of every call, in call order.
    pub fn calls(&self) -> Vec<(i64, i64)> {
        self.state.lock().calls.clone()
    }

    /// `origin` and `destination` query values of every call.
    pub fn query_params(&self) -> Vec<(String, String)> {
        self.state.lock().query_params.clone()
    }
}

impl DirectionsProvider for MockDirections {
    async fn walking_directions(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<WalkingDirections, DirectionsError> {
        let pair = (origin.location_id, destination.location_id);

        let (fails, hangs) = {
            let mut state = self.state.lock();
            state.calls.push(pair);
            state
                .query_params
                .push((origin.to_query_param(), destination.to_query_param()));

            (state.failures.contains(&pair), state.hangs.contains(&pair))
        };

        if hangs {
            let _counter = DropCounter(Arc::clone(&self.state));
            std::future::pending::<()>().await;
        }

        if fails {
            return Err(DirectionsError::Http {
                status: 504,
                message: String::from("Gateway Timeout"),
            });
        }

        Ok(WalkingDirections {
            distance: String::from("0.3 mi"),
            duration: String::from("6 mins"),
            polyline: format!("polyline-{}-{}", pair.0, pair.1),
            steps: vec![Step {
                distance: String::from("0.3 mi"),
                duration: String::from("6 mins"),
                instruction: format!("Walk to <b>{}</b>", destination.name),
                polyline: String::new(),
            }],
        })
    }
}

/// Waypoints with ids `1..=4`, matching [`seed_campus`] on an empty store.
pub fn campus_waypoints() -> Vec<Waypoint> {
    CAMPUS
        .iter()
        .enumerate()
        .map(|(index, (name, _, lat, lng))| Waypoint::new(index as i64 + 1, *name, *lat, *lng))
        .collect()
}

pub fn seed_campus(store: &TourStore) -> Vec<Location> {
    CAMPUS
        .iter()
        .map(|(name, slug, latitude, longitude)| {
            let (location, _) = store
                .upsert_location(&NewLocation {
                    name: name.to_string(),
                    slug: slug.to_string(),
                    description: String::new(),
                    latitude: *latitude,
                    longitude: *longitude,
                    address: String::new(),
                    category: String::new(),
                    historical_info: String::new(),
                })
                .unwrap();
            location
        })
        .collect()
}

pub fn test_route_data() -> RouteData {
    let waypoints = campus_waypoints();

    RouteData {
        segments: vec![Segment {
            segment_index: 0,
            origin: waypoints[0].clone(),
            destination: waypoints[1].clone(),
            distance: String::from("0.4 mi"),
            duration: String::from("8 mins"),
            polyline: String::from("_p~iF~ps|U_ulLnnqC"),
            steps: vec![],
        }],
        waypoints: waypoints[..2].to_vec(),
        computed_at: Timestamp::from_second(1_700_000_000).unwrap(),
    }
}
