use std::path::PathBuf;

use campus_tours::{location::NewLocation, storage::TourStore};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::file_utils::read_json_files;

#[derive(Args)]
pub struct SeedArgs {
    /// JSON file with an array of locations, or a folder of such files
    #[arg(short, long)]
    input: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub updated: usize,
}

pub fn run(args: SeedArgs, store: &TourStore) -> Result<(), anyhow::Error> {
    info!("Seeding campus locations from {:?}", args.input);

    let paths = if args.input.is_file() {
        vec![args.input]
    } else {
        read_json_files(&args.input)?
    };

    let mut locations = Vec::new();
    for path in paths {
        let file = std::fs::File::open(&path)?;
        let batch: Vec<NewLocation> = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|error| anyhow::anyhow!("{}: {}", path.display(), error))?;
        debug!("{} locations in {}", batch.len(), path.display());
        locations.extend(batch);
    }

    let bar = ProgressBar::new(locations.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let report = seed_locations(store, &locations, |location, created| {
        bar.set_message(location.name.clone());
        bar.inc(1);
        debug!(
            "{} location: {}",
            if created { "Created" } else { "Updated" },
            location.name
        );
    })?;

    bar.finish_and_clear();
    info!(
        "Seeding complete! Created {}, Updated {}",
        report.created, report.updated
    );

    Ok(())
}

/// Upserts every location by slug.
pub fn seed_locations(
    store: &TourStore,
    locations: &[NewLocation],
    mut on_location: impl FnMut(&NewLocation, bool),
) -> Result<SeedReport, anyhow::Error> {
    let mut report = SeedReport::default();

    for location in locations {
        let (_, created) = store.upsert_location(location)?;
        if created {
            report.created += 1;
        } else {
            report.updated += 1;
        }
        on_location(location, created);
    }

    Ok(report)
}
