use std::time::Duration;

use campus_directions::{GoogleDirectionsClient, GoogleDirectionsClientParams, Waypoint};
use campus_tours::{
    route_data::RouteData,
    segment_assembler::{AssemblyMode, SegmentAssembler},
    waypoint_sequence::{ValidatedSequence, validate_waypoints},
};
use clap::Args;
use indicatif::ProgressBar;
use tracing::info;

use crate::parsers::{self, StopArg};

#[derive(Args)]
pub struct RouteArgs {
    /// Stop as "lat,lng" or "lat,lng,name", repeated in visiting order
    #[arg(short, long = "stop", value_parser = parsers::parse_stop, required = true)]
    stops: Vec<StopArg>,

    /// Timeout of each directions call (e.g., "10s", "PT5S")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// Request all segments at once instead of one after the other
    #[arg(short, long)]
    concurrent: bool,
}

pub async fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let sequence = match validate_waypoints(waypoints_from_stops(&args.stops))? {
        ValidatedSequence::SingleStop(waypoint) => {
            info!("Single stop {}, nothing to route", waypoint);
            return Ok(());
        }
        ValidatedSequence::Routable(sequence) => sequence,
    };

    let mut params = GoogleDirectionsClientParams::from_env();
    if let Some(timeout) = args.timeout {
        params.timeout = timeout.unsigned_abs();
    }

    let mode = if args.concurrent {
        AssemblyMode::Concurrent
    } else {
        AssemblyMode::Sequential
    };
    let assembler = SegmentAssembler::new(GoogleDirectionsClient::new(params)?, mode);

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!(
        "Requesting {} segments",
        sequence.segment_count()
    ));

    let segments = assembler.assemble(&sequence).await;
    spinner.finish_and_clear();

    let route_data = RouteData::new(sequence.into_waypoints(), segments?);
    println!("{}", serde_json::to_string_pretty(&route_data)?);

    Ok(())
}

fn waypoints_from_stops(stops: &[StopArg]) -> Vec<Waypoint> {
    stops
        .iter()
        .enumerate()
        .map(|(index, stop)| {
            let location_id = index as i64 + 1;
            let name = stop
                .name
                .clone()
                .unwrap_or_else(|| format!("Stop {location_id}"));

            Waypoint::new(location_id, name, stop.lat, stop.lng)
        })
        .collect()
}
