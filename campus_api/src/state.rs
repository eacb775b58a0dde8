use std::sync::Arc;

use campus_directions::GoogleDirectionsClient;
use campus_tours::{
    guide::{GuideConfig, TourGuide},
    segment_assembler::{AssemblyMode, SegmentAssembler},
    storage::TourStore,
    tour_service::TourService,
};
use tracing::info;

use crate::config::ApiConfig;

pub struct AppState {
    pub tours: Arc<TourService<GoogleDirectionsClient>>,
    pub guide: TourGuide<GoogleDirectionsClient>,
}

impl AppState {
    pub fn new(
        store: Arc<TourStore>,
        directions: GoogleDirectionsClient,
        assembly_mode: AssemblyMode,
        guide_config: GuideConfig,
    ) -> Self {
        let tours = Arc::new(TourService::new(
            store,
            SegmentAssembler::new(directions, assembly_mode),
        ));

        Self {
            guide: TourGuide::new(guide_config, tours.clone()),
            tours,
        }
    }

    pub fn from_config(config: ApiConfig) -> Result<Self, anyhow::Error> {
        info!("Opening database {}", config.database_path.display());
        let store = Arc::new(TourStore::open(&config.database_path)?);
        let directions = GoogleDirectionsClient::new(config.directions)?;
        if directions.has_credential() {
            info!(
                "Walking routes enabled ({:?} assembly)",
                config.assembly_mode
            );
        }

        Ok(Self::new(
            store,
            directions,
            config.assembly_mode,
            config.guide,
        ))
    }
}
