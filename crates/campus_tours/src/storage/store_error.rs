use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid route data for tour {tour_id}: {source}")]
    RouteData {
        tour_id: i64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: jiff::Error,
    },
}
