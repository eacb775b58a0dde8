use std::sync::Arc;

use campus_directions::{GoogleDirectionsClient, GoogleDirectionsClientParams};
use campus_tours::{
    route_cache::RecomputeOutcome,
    segment_assembler::{AssemblyMode, SegmentAssembler},
    storage::TourStore,
    tour_service::TourService,
};
use clap::Args;
use tracing::{info, warn};

#[derive(Args)]
pub struct RecomputeArgs {
    #[arg(short, long)]
    tour_id: i64,

    /// Request all segments at once instead of one after the other
    #[arg(short, long)]
    concurrent: bool,
}

pub async fn run(args: RecomputeArgs, store: Arc<TourStore>) -> Result<(), anyhow::Error> {
    let mode = if args.concurrent {
        AssemblyMode::Concurrent
    } else {
        AssemblyMode::Sequential
    };
    let client = GoogleDirectionsClient::new(GoogleDirectionsClientParams::from_env())?;
    let service = TourService::new(store, SegmentAssembler::new(client, mode));

    match service.recompute_route(args.tour_id).await? {
        RecomputeOutcome::Cached { segments } => {
            info!("Tour {}: cached {} segments", args.tour_id, segments)
        }
        RecomputeOutcome::NoRoute => {
            info!("Tour {} has fewer than two stops, no route", args.tour_id)
        }
        RecomputeOutcome::Failed(kind) => {
            warn!("Tour {}: route not computed ({})", args.tour_id, kind)
        }
    }

    Ok(())
}
