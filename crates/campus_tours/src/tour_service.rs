use std::sync::Arc;

use campus_directions::{DirectionsProvider, Waypoint};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    route_cache::{RecomputeOutcome, RouteCache},
    segment_assembler::SegmentAssembler,
    storage::{StoreError, TourPage, TourStore},
    tour::Tour,
};

#[derive(Debug, Error)]
pub enum TourError {
    #[error("A tour needs at least one location")]
    EmptyStops,

    #[error("Unknown location ids: {0:?}")]
    UnknownLocations(Vec<i64>),

    #[error("Tour {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct NewTour {
    pub owner_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Stops in visiting order. The same location may appear more than once.
    pub location_ids: Vec<i64>,
}

/// Full replacement of a tour's editable fields, stops included.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct TourReplacement {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
pub struct TourDetailsUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Creates and edits tours, keeping their cached route in step with the stop
/// list.
pub struct TourService<P> {
    store: Arc<TourStore>,
    route_cache: RouteCache<P>,
}

impl<P: DirectionsProvider> TourService<P> {
    pub fn new(store: Arc<TourStore>, assembler: SegmentAssembler<P>) -> Self {
        Self {
            route_cache: RouteCache::new(store.clone(), assembler),
            store,
        }
    }

    pub fn store(&self) -> &Arc<TourStore> {
        &self.store
    }

    /// Creates the tour, then computes its route. A route failure leaves the
    /// tour without a route, it never fails the creation. Neither does a
    /// storage failure while writing the route, the tour is already saved.
    pub async fn create_tour(&self, new_tour: NewTour) -> Result<Tour, TourError> {
        let waypoints = self.resolve_waypoints(&new_tour.location_ids)?;

        let tour_id = self.store.insert_tour(
            new_tour.owner_id,
            &new_tour.name,
            &new_tour.description,
            &new_tour.location_ids,
        )?;
        info!(
            "Created tour {} '{}' with {} stops",
            tour_id,
            new_tour.name,
            waypoints.len()
        );

        self.refresh_route(tour_id, waypoints).await;

        self.tour(tour_id)
    }

    /// Replaces name, description and stops.
    ///
    /// The route is recomputed when the ordered location ids differ from the
    /// current ones. With an unchanged stop list only the details are written
    /// and an existing cached route is kept as is; a missing route is retried.
    pub async fn replace_tour(
        &self,
        tour_id: i64,
        replacement: TourReplacement,
    ) -> Result<Tour, TourError> {
        let waypoints = self.resolve_waypoints(&replacement.location_ids)?;
        let current = self.tour(tour_id)?;

        if current.location_ids() == replacement.location_ids {
            debug!("Tour {}: stop list unchanged", tour_id);

            self.store.update_tour_details(
                tour_id,
                Some(&replacement.name),
                Some(&replacement.description),
            )?;

            if current.route_data.is_none() && waypoints.len() > 1 {
                self.refresh_route(tour_id, waypoints).await;
            }

            return self.tour(tour_id);
        }

        if !self.store.replace_tour(
            tour_id,
            &replacement.name,
            &replacement.description,
            &replacement.location_ids,
        )? {
            return Err(TourError::NotFound(tour_id));
        }

        self.refresh_route(tour_id, waypoints).await;

        self.tour(tour_id)
    }

    /// Name and description only. Never touches the cached route.
    pub fn update_details(
        &self,
        tour_id: i64,
        update: TourDetailsUpdate,
    ) -> Result<Tour, TourError> {
        if !self.store.update_tour_details(
            tour_id,
            update.name.as_deref(),
            update.description.as_deref(),
        )? {
            return Err(TourError::NotFound(tour_id));
        }

        self.tour(tour_id)
    }

    pub fn delete_tour(&self, tour_id: i64) -> Result<(), TourError> {
        if !self.store.delete_tour(tour_id)? {
            return Err(TourError::NotFound(tour_id));
        }

        info!("Deleted tour {}", tour_id);
        Ok(())
    }

    pub fn tour(&self, tour_id: i64) -> Result<Tour, TourError> {
        self.store.tour(tour_id)?.ok_or(TourError::NotFound(tour_id))
    }

    pub fn tours(
        &self,
        owner_id: Option<i64>,
        limit: u32,
        offset: u64,
    ) -> Result<TourPage, TourError> {
        Ok(self.store.tours(owner_id, limit, offset)?)
    }

    /// Recomputes the route from the tour's current stops.
    pub async fn recompute_route(&self, tour_id: i64) -> Result<RecomputeOutcome, TourError> {
        let tour = self.tour(tour_id)?;

        Ok(self
            .route_cache
            .recompute(tour_id, tour.waypoints())
            .await?)
    }

    /// Runs after the stops are committed, so nothing here fails the request.
    async fn refresh_route(&self, tour_id: i64, waypoints: Vec<Waypoint>) {
        if let Err(error) = self.route_cache.recompute(tour_id, waypoints).await {
            error!("Tour {}: route not stored: {}", tour_id, error);
        }
    }

    fn resolve_waypoints(&self, location_ids: &[i64]) -> Result<Vec<Waypoint>, TourError> {
        if location_ids.is_empty() {
            return Err(TourError::EmptyStops);
        }

        let locations = self.store.locations_by_ids(location_ids)?;

        let mut unknown = location_ids
            .iter()
            .copied()
            .filter(|location_id| !locations.contains_key(location_id))
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            unknown.dedup();
            return Err(TourError::UnknownLocations(unknown));
        }

        Ok(location_ids
            .iter()
            .map(|location_id| locations[location_id].waypoint())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use campus_directions::{GoogleDirectionsClient, GoogleDirectionsClientParams};

    use super::*;
    use crate::{
        location::Location,
        segment_assembler::AssemblyMode,
        test_utils::{MockDirections, seed_campus},
    };

    fn service(provider: MockDirections) -> (TourService<MockDirections>, Vec<Location>) {
        let store = Arc::new(TourStore::in_memory().unwrap());
        let locations = seed_campus(&store);

        (
            TourService::new(
                store,
                SegmentAssembler::new(provider, AssemblyMode::Sequential),
            ),
            locations,
        )
    }

    fn new_tour(location_ids: Vec<i64>) -> NewTour {
        NewTour {
            owner_id: 1,
            name: String::from("Campus highlights"),
            description: String::new(),
            location_ids,
        }
    }

    #[tokio::test]
    async fn test_create_single_stop_tour_has_no_route() {
        let provider = MockDirections::default();
        let (service, locations) = service(provider.clone());

        let tour = service
            .create_tour(new_tour(vec![locations[0].id]))
            .await
            .unwrap();

        assert_eq!(tour.stops.len(), 1);
        assert_eq!(tour.route_data, None);
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_two_stop_tour() {
        let provider = MockDirections::default();
        let (service, locations) = service(provider.clone());

        let tour = service
            .create_tour(new_tour(vec![locations[0].id, locations[1].id]))
            .await
            .unwrap();

        assert_eq!(
            provider.query_params(),
            vec![(
                String::from("33.7756,-84.3985"),
                String::from("33.7726,-84.392")
            )]
        );

        let route = tour.route_data.unwrap();
        assert_eq!(route.segments.len(), 1);
        assert_eq!(route.segments[0].segment_index, 0);
        assert_eq!(route.segments[0].origin.location_id, locations[0].id);
        assert_eq!(route.segments[0].destination.location_id, locations[1].id);
    }

    #[tokio::test]
    async fn test_route_write_failure_keeps_tour() {
        let provider = MockDirections::default();
        let (service, locations) = service(provider.clone());
        service
            .store()
            .execute_batch(
                "CREATE TRIGGER reject_route BEFORE UPDATE OF route_data ON tours
                 WHEN NEW.route_data IS NOT NULL
                 BEGIN SELECT RAISE(ABORT, 'route writes disabled'); END;",
            )
            .unwrap();

        let tour = service
            .create_tour(new_tour(vec![locations[0].id, locations[1].id]))
            .await
            .unwrap();
        assert_eq!(tour.route_data, None);
        assert_eq!(provider.calls(), vec![(locations[0].id, locations[1].id)]);

        let tour = service
            .replace_tour(
                tour.id,
                TourReplacement {
                    name: String::from("Reversed"),
                    description: String::new(),
                    location_ids: vec![locations[1].id, locations[0].id],
                },
            )
            .await
            .unwrap();
        assert_eq!(tour.name, "Reversed");
        assert_eq!(tour.location_ids(), vec![locations[1].id, locations[0].id]);
        assert_eq!(tour.route_data, None);
    }

    #[tokio::test]
    async fn test_create_without_credential_keeps_tour() {
        let store = Arc::new(TourStore::in_memory().unwrap());
        let locations = seed_campus(&store);
        let client = GoogleDirectionsClient::new(GoogleDirectionsClientParams {
            api_key: None,
            base_url: String::from("http://127.0.0.1:9/maps/api/directions/json"),
            ..Default::default()
        })
        .unwrap();
        let service = TourService::new(
            store,
            SegmentAssembler::new(client, AssemblyMode::Sequential),
        );

        let tour = service
            .create_tour(new_tour(vec![locations[0].id, locations[1].id]))
            .await
            .unwrap();

        assert_eq!(tour.stops.len(), 2);
        assert_eq!(tour.route_data, None);
    }

    #[tokio::test]
    async fn test_timeout_mid_tour_stores_nothing() {
        let provider = MockDirections::default().fail_between(2, 3);
        let (service, locations) = service(provider.clone());

        let tour = service
            .create_tour(new_tour(vec![
                locations[0].id,
                locations[1].id,
                locations[2].id,
            ]))
            .await
            .unwrap();

        assert_eq!(provider.calls(), vec![(1, 2), (2, 3)]);
        assert_eq!(tour.route_data, None);
        assert_eq!(service.store().route_data_blob(tour.id).unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_empty_and_unknown_locations() {
        let (service, locations) = service(MockDirections::default());

        let error = service.create_tour(new_tour(vec![])).await.unwrap_err();
        assert!(matches!(error, TourError::EmptyStops));

        let error = service
            .create_tour(new_tour(vec![locations[0].id, 42, 43]))
            .await
            .unwrap_err();
        assert!(matches!(error, TourError::UnknownLocations(ids) if ids == vec![42, 43]));

        assert_eq!(service.tours(None, 10, 0).unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_details_update_keeps_route_bytes() {
        let provider = MockDirections::default();
        let (service, locations) = service(provider.clone());
        let tour = service
            .create_tour(new_tour(vec![
                locations[0].id,
                locations[1].id,
                locations[2].id,
            ]))
            .await
            .unwrap();
        let before = service.store().route_data_blob(tour.id).unwrap();
        assert!(before.is_some());

        let updated = service
            .update_details(
                tour.id,
                TourDetailsUpdate {
                    name: Some(String::from("Renamed")),
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Renamed");

        let replaced = service
            .replace_tour(
                tour.id,
                TourReplacement {
                    name: String::from("Renamed again"),
                    description: String::from("Same stops"),
                    location_ids: tour.location_ids(),
                },
            )
            .await
            .unwrap();
        assert_eq!(replaced.name, "Renamed again");

        assert_eq!(service.store().route_data_blob(tour.id).unwrap(), before);
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_reorder_recomputes_route() {
        let provider = MockDirections::default();
        let (service, locations) = service(provider.clone());
        let tour = service
            .create_tour(new_tour(vec![
                locations[0].id,
                locations[1].id,
                locations[2].id,
            ]))
            .await
            .unwrap();

        let replaced = service
            .replace_tour(
                tour.id,
                TourReplacement {
                    name: tour.name.clone(),
                    description: tour.description.clone(),
                    location_ids: vec![locations[2].id, locations[0].id, locations[1].id],
                },
            )
            .await
            .unwrap();

        assert!(replaced.has_contiguous_stops());
        assert_eq!(provider.calls()[2..].to_vec(), vec![(3, 1), (1, 2)]);

        let route = replaced.route_data.unwrap();
        assert_eq!(
            route
                .segments
                .iter()
                .map(|segment| (segment.origin.location_id, segment.destination.location_id))
                .collect::<Vec<_>>(),
            vec![(3, 1), (1, 2)]
        );
    }

    #[tokio::test]
    async fn test_unchanged_stops_retry_missing_route() {
        let provider = MockDirections::default().fail_between(1, 2);
        let (service, locations) = service(provider.clone());
        let tour = service
            .create_tour(new_tour(vec![locations[0].id, locations[1].id]))
            .await
            .unwrap();
        assert_eq!(tour.route_data, None);

        let replaced = service
            .replace_tour(
                tour.id,
                TourReplacement {
                    name: tour.name.clone(),
                    description: tour.description.clone(),
                    location_ids: tour.location_ids(),
                },
            )
            .await
            .unwrap();

        assert_eq!(replaced.route_data, None);
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tour() {
        let (service, locations) = service(MockDirections::default());

        assert!(matches!(
            service.delete_tour(99).unwrap_err(),
            TourError::NotFound(99)
        ));
        assert!(matches!(
            service
                .update_details(99, TourDetailsUpdate::default())
                .unwrap_err(),
            TourError::NotFound(99)
        ));
        assert!(matches!(
            service
                .replace_tour(
                    99,
                    TourReplacement {
                        name: String::from("x"),
                        description: String::new(),
                        location_ids: vec![locations[0].id],
                    }
                )
                .await
                .unwrap_err(),
            TourError::NotFound(99)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_recompute_is_not_found() {
        let (service, locations) = service(MockDirections::default());
        let tour = service
            .create_tour(new_tour(vec![locations[0].id, locations[1].id]))
            .await
            .unwrap();

        service.delete_tour(tour.id).unwrap();

        assert!(matches!(
            service.recompute_route(tour.id).await.unwrap_err(),
            TourError::NotFound(_)
        ));
    }
}
