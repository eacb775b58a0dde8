use std::str::FromStr;

use campus_directions::DirectionsProvider;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{route_error::RouteError, segment::Segment, waypoint_sequence::WaypointSequence};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMode {
    /// One directions call at a time, in stop order.
    #[default]
    Sequential,

    /// Every pair in flight at once. The first failure drops the calls still
    /// pending.
    Concurrent,
}

impl FromStr for AssemblyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(AssemblyMode::Sequential),
            "concurrent" => Ok(AssemblyMode::Concurrent),
            other => Err(format!(
                "Unknown assembly mode '{other}', expected 'sequential' or 'concurrent'"
            )),
        }
    }
}

/// Turns a validated sequence of waypoints into one segment per consecutive
/// pair. Either every segment is returned or none is.
pub struct SegmentAssembler<P> {
    provider: P,
    mode: AssemblyMode,
}

impl<P: DirectionsProvider> SegmentAssembler<P> {
    pub fn new(provider: P, mode: AssemblyMode) -> Self {
        Self { provider, mode }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn mode(&self) -> AssemblyMode {
        self.mode
    }

    pub async fn assemble(&self, sequence: &WaypointSequence) -> Result<Vec<Segment>, RouteError> {
        debug!(
            "SegmentAssembler: assembling {} segments ({:?})",
            sequence.segment_count(),
            self.mode
        );

        match self.mode {
            AssemblyMode::Sequential => self.assemble_sequential(sequence).await,
            AssemblyMode::Concurrent => self.assemble_concurrent(sequence).await,
        }
    }

    async fn assemble_sequential(
        &self,
        sequence: &WaypointSequence,
    ) -> Result<Vec<Segment>, RouteError> {
        let mut segments = Vec::with_capacity(sequence.segment_count());

        for (segment_index, origin, destination) in sequence.pairs() {
            let directions = self
                .provider
                .walking_directions(origin, destination)
                .await
                .map_err(|error| RouteError::directions(segment_index, origin, destination, error))?;

            segments.push(Segment::from_directions(
                segment_index,
                origin.clone(),
                destination.clone(),
                directions,
            ));
        }

        Ok(segments)
    }

    async fn assemble_concurrent(
        &self,
        sequence: &WaypointSequence,
    ) -> Result<Vec<Segment>, RouteError> {
        let calls = sequence
            .pairs()
            .map(|(segment_index, origin, destination)| async move {
                let directions = self
                    .provider
                    .walking_directions(origin, destination)
                    .await
                    .map_err(|error| {
                        RouteError::directions(segment_index, origin, destination, error)
                    })?;

                Ok::<_, RouteError>(Segment::from_directions(
                    segment_index,
                    origin.clone(),
                    destination.clone(),
                    directions,
                ))
            });

        try_join_all(calls).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        route_error::RouteErrorKind,
        test_utils::{MockDirections, campus_waypoints},
        waypoint_sequence::{ValidatedSequence, validate_waypoints},
    };

    fn sequence(count: usize) -> WaypointSequence {
        match validate_waypoints(campus_waypoints().into_iter().take(count).collect()) {
            Ok(ValidatedSequence::Routable(sequence)) => sequence,
            other => panic!("expected a routable sequence, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sequential_calls_each_pair_in_order() {
        let provider = MockDirections::default();
        let assembler = SegmentAssembler::new(provider.clone(), AssemblyMode::Sequential);

        let segments = assembler.assemble(&sequence(4)).await.unwrap();

        assert_eq!(provider.calls(), vec![(1, 2), (2, 3), (3, 4)]);
        assert_eq!(
            segments
                .iter()
                .map(|segment| (
                    segment.segment_index,
                    segment.origin.location_id,
                    segment.destination.location_id
                ))
                .collect::<Vec<_>>(),
            vec![(0, 1, 2), (1, 2, 3), (2, 3, 4)]
        );
        assert_eq!(segments[1].polyline, "polyline-2-3");
    }

    #[tokio::test]
    async fn test_sequential_stops_at_first_failure() {
        let provider = MockDirections::default().fail_between(2, 3);
        let assembler = SegmentAssembler::new(provider.clone(), AssemblyMode::Sequential);

        let error = assembler.assemble(&sequence(4)).await.unwrap_err();

        assert_eq!(error.segment_index(), Some(1));
        assert_eq!(error.kind(), RouteErrorKind::TransportFailure);
        assert_eq!(provider.calls(), vec![(1, 2), (2, 3)]);
    }

    #[tokio::test]
    async fn test_concurrent_keeps_origin_order() {
        let provider = MockDirections::default();
        let assembler = SegmentAssembler::new(provider.clone(), AssemblyMode::Concurrent);

        let segments = assembler.assemble(&sequence(4)).await.unwrap();

        assert_eq!(provider.calls().len(), 3);
        assert_eq!(
            segments
                .iter()
                .map(|segment| segment.segment_index)
                .collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(segments[2].destination.location_id, 4);
    }

    #[tokio::test]
    async fn test_concurrent_failure_returns_no_segments() {
        let provider = MockDirections::default().fail_between(3, 4);
        let assembler = SegmentAssembler::new(provider, AssemblyMode::Concurrent);

        let error = assembler.assemble(&sequence(4)).await.unwrap_err();

        assert_eq!(error.segment_index(), Some(2));
    }

    #[tokio::test]
    async fn test_concurrent_failure_drops_pending_calls() {
        let provider = MockDirections::default()
            .hang_between(1, 2)
            .hang_between(2, 3)
            .fail_between(3, 4);
        let assembler = SegmentAssembler::new(provider.clone(), AssemblyMode::Concurrent);

        let error = tokio::time::timeout(Duration::from_secs(5), assembler.assemble(&sequence(4)))
            .await
            .expect("assembly waited on pending calls")
            .unwrap_err();

        assert_eq!(error.segment_index(), Some(2));
        assert_eq!(provider.calls(), vec![(1, 2), (2, 3), (3, 4)]);
        assert_eq!(provider.dropped_calls(), 2);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            "Concurrent".parse::<AssemblyMode>(),
            Ok(AssemblyMode::Concurrent)
        );
        assert_eq!(
            "sequential".parse::<AssemblyMode>(),
            Ok(AssemblyMode::Sequential)
        );
        assert!("parallel".parse::<AssemblyMode>().is_err());
    }
}
