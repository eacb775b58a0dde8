use std::sync::Arc;

use campus_directions::{DirectionsProvider, Waypoint};
use tracing::{error, info, warn};

use crate::{
    route_data::RouteData,
    route_error::{RouteError, RouteErrorKind},
    segment_assembler::SegmentAssembler,
    storage::{StoreError, TourStore},
    waypoint_sequence::{ValidatedSequence, validate_waypoints},
};

/// What a recompute left in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeOutcome {
    Cached { segments: usize },

    /// Fewer than two stops, nothing to route.
    NoRoute,

    /// The route could not be computed and the cache was cleared.
    Failed(RouteErrorKind),
}

/// Owns the cached route of every tour.
///
/// Route failures stop here: they are logged, the cache is left absent and
/// the caller carries on. Only storage errors are returned.
pub struct RouteCache<P> {
    store: Arc<TourStore>,
    assembler: SegmentAssembler<P>,
}

impl<P: DirectionsProvider> RouteCache<P> {
    pub fn new(store: Arc<TourStore>, assembler: SegmentAssembler<P>) -> Self {
        Self { store, assembler }
    }

    pub fn assembler(&self) -> &SegmentAssembler<P> {
        &self.assembler
    }

    pub async fn recompute(
        &self,
        tour_id: i64,
        waypoints: Vec<Waypoint>,
    ) -> Result<RecomputeOutcome, StoreError> {
        let sequence = match validate_waypoints(waypoints) {
            Ok(ValidatedSequence::Routable(sequence)) => sequence,
            Ok(ValidatedSequence::SingleStop(_)) | Err(RouteError::EmptySequence) => {
                self.clear(tour_id)?;
                return Ok(RecomputeOutcome::NoRoute);
            }
            Err(error) => return self.fail(tour_id, error),
        };

        match self.assembler.assemble(&sequence).await {
            Ok(segments) => {
                let count = segments.len();
                let route_data = RouteData::new(sequence.into_waypoints(), segments);
                self.store.set_route_data(tour_id, Some(&route_data))?;

                info!("Cached route for tour {} ({} segments)", tour_id, count);

                Ok(RecomputeOutcome::Cached { segments: count })
            }
            Err(error) => self.fail(tour_id, error),
        }
    }

    pub fn clear(&self, tour_id: i64) -> Result<(), StoreError> {
        self.store.set_route_data(tour_id, None)?;
        Ok(())
    }

    /// Cached route, if any. Never calls the directions provider.
    pub fn read(&self, tour_id: i64) -> Result<Option<RouteData>, StoreError> {
        self.store.route_data(tour_id)
    }

    fn fail(&self, tour_id: i64, error: RouteError) -> Result<RecomputeOutcome, StoreError> {
        let kind = error.kind();
        match kind {
            RouteErrorKind::ConfigurationMissing => {
                warn!("Route for tour {} not computed: {}", tour_id, error)
            }
            _ => error!(
                "Route for tour {} not computed ({}): {}",
                tour_id, kind, error
            ),
        }

        self.clear(tour_id)?;
        Ok(RecomputeOutcome::Failed(kind))
    }
}
