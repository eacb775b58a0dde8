use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    directions_error::DirectionsError,
    directions_provider::DirectionsProvider,
    walking_directions::{Step, WalkingDirections},
    waypoint::Waypoint,
};

pub const GOOGLE_DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const WALKING_MODE: &str = "walking";

const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
const BASE_URL_ENV_VAR: &str = "CAMPUS_DIRECTIONS_URL";
const TIMEOUT_ENV_VAR: &str = "CAMPUS_DIRECTIONS_TIMEOUT";

#[derive(Deserialize, Default)]
struct TextValue {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct EncodedPolyline {
    #[serde(default)]
    points: String,
}

#[derive(Deserialize)]
struct DirectionsStep {
    #[serde(default)]
    distance: TextValue,
    #[serde(default)]
    duration: TextValue,
    #[serde(default)]
    html_instructions: String,
    #[serde(default)]
    polyline: EncodedPolyline,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    #[serde(default)]
    distance: TextValue,
    #[serde(default)]
    duration: TextValue,
    #[serde(default)]
    steps: Vec<DirectionsStep>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    overview_polyline: EncodedPolyline,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

impl DirectionsResponse {
    /// Only the first leg of the first route is kept, alternate routes are
    /// discarded.
    fn into_walking_directions(self) -> Result<WalkingDirections, DirectionsError> {
        if self.status != "OK" {
            return Err(DirectionsError::Rejected {
                status: self.status,
                message: self.error_message,
            });
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(DirectionsError::NoRoute)?;
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or(DirectionsError::NoRoute)?;

        Ok(WalkingDirections {
            distance: leg.distance.text,
            duration: leg.duration.text,
            polyline: route.overview_polyline.points,
            steps: leg
                .steps
                .into_iter()
                .map(|step| Step {
                    distance: step.distance.text,
                    duration: step.duration.text,
                    instruction: step.html_instructions,
                    polyline: step.polyline.points,
                })
                .collect(),
        })
    }
}

#[derive(Clone)]
pub struct GoogleDirectionsClientParams {
    /// A missing key is not an error until a request is attempted.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GoogleDirectionsClientParams {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GOOGLE_DIRECTIONS_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GoogleDirectionsClientParams {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if api_key.is_none() {
            warn!("{API_KEY_ENV_VAR} is not set, tour routes will not be computed");
        }

        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .unwrap_or_else(|_| GOOGLE_DIRECTIONS_API_URL.to_string());

        let timeout = match std::env::var(TIMEOUT_ENV_VAR) {
            Ok(value) => match value.parse::<jiff::SignedDuration>() {
                Ok(duration) => duration.unsigned_abs(),
                Err(error) => {
                    warn!("Invalid {TIMEOUT_ENV_VAR} value {value:?}: {error}, using default");
                    DEFAULT_TIMEOUT
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };

        Self {
            api_key,
            base_url,
            timeout,
        }
    }
}

pub struct GoogleDirectionsClient {
    params: GoogleDirectionsClientParams,
    client: reqwest::Client,
}

impl GoogleDirectionsClient {
    pub fn new(params: GoogleDirectionsClientParams) -> Result<Self, DirectionsError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    pub fn has_credential(&self) -> bool {
        self.params.api_key.is_some()
    }

    async fn fetch(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<WalkingDirections, DirectionsError> {
        let api_key = self
            .params
            .api_key
            .as_deref()
            .ok_or(DirectionsError::ConfigurationMissing)?;

        debug!(
            "GoogleDirectionsApi: Requesting route from {} to {}",
            origin, destination
        );

        // Errors keep no url, it carries the key.
        let response = self
            .client
            .get(&self.params.base_url)
            .query(&directions_query(origin, destination, api_key))
            .send()
            .await
            .map_err(|error| DirectionsError::Request(error.without_url()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Http { status, message });
        }

        let payload: DirectionsResponse = response
            .json()
            .await
            .map_err(|error| DirectionsError::Request(error.without_url()))?;

        payload.into_walking_directions()
    }
}

impl DirectionsProvider for GoogleDirectionsClient {
    async fn walking_directions(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<WalkingDirections, DirectionsError> {
        self.fetch(origin, destination).await
    }
}

fn directions_query(
    origin: &Waypoint,
    destination: &Waypoint,
    api_key: &str,
) -> [(&'static str, String); 4] {
    [
        ("origin", origin.to_query_param()),
        ("destination", destination.to_query_param()),
        ("mode", WALKING_MODE.to_string()),
        ("key", api_key.to_string()),
    ]
}
