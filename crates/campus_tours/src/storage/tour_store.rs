use std::path::Path;

use fxhash::FxHashMap;
use jiff::Timestamp;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use tracing::debug;

use crate::{
    location::{Location, NewLocation},
    route_data::RouteData,
    tour::{Tour, TourStop, TourSummary},
};

use super::{schema::init_schema, store_error::StoreError};

const LOCATION_COLUMNS: &str =
    "id, name, slug, description, latitude, longitude, address, category, historical_info";

/// SQLite backed storage for locations, tours and their cached routes.
///
/// The connection sits behind a mutex that is only held for the duration of a
/// single method call, never across an await point.
pub struct TourStore {
    db: Mutex<Connection>,
}

pub struct TourPage {
    pub tours: Vec<TourSummary>,
    pub total: usize,
}

struct TourRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: String,
    route_data: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TourStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Connection::open(path)?;
        init_schema(&db)?;

        Ok(Self { db: Mutex::new(db) })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let db = Connection::open_in_memory()?;
        init_schema(&db)?;

        Ok(Self { db: Mutex::new(db) })
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        Ok(self.db.lock().execute_batch(sql)?)
    }

    /// Inserts the location or updates the one with the same slug. Returns the
    /// stored location and whether it was created.
    pub fn upsert_location(&self, location: &NewLocation) -> Result<(Location, bool), StoreError> {
        let mut db = self.db.lock();
        let tx = db.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM locations WHERE slug = ?1",
                params![location.slug],
                |row| row.get(0),
            )
            .optional()?;

        let (id, created) = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE locations SET name = ?1, description = ?2, latitude = ?3, longitude = ?4,
                     address = ?5, category = ?6, historical_info = ?7 WHERE id = ?8",
                    params![
                        location.name,
                        location.description,
                        location.latitude,
                        location.longitude,
                        location.address,
                        location.category,
                        location.historical_info,
                        id
                    ],
                )?;
                (id, false)
            }
            None => {
                tx.execute(
                    "INSERT INTO locations (name, slug, description, latitude, longitude, address,
                     category, historical_info) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        location.name,
                        location.slug,
                        location.description,
                        location.latitude,
                        location.longitude,
                        location.address,
                        location.category,
                        location.historical_info
                    ],
                )?;
                (tx.last_insert_rowid(), true)
            }
        };

        let stored = tx.query_row(
            &format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1"),
            params![id],
            |row| location_from_row(row, 0),
        )?;
        tx.commit()?;

        Ok((stored, created))
    }

    pub fn locations(&self) -> Result<Vec<Location>, StoreError> {
        let db = self.db.lock();
        let mut stmt = db.prepare(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations ORDER BY name, id"
        ))?;

        let locations = stmt
            .query_map([], |row| location_from_row(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations)
    }

    pub fn location(&self, location_id: i64) -> Result<Option<Location>, StoreError> {
        let db = self.db.lock();
        let location = db
            .query_row(
                &format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1"),
                params![location_id],
                |row| location_from_row(row, 0),
            )
            .optional()?;

        Ok(location)
    }

    /// Locations keyed by id. Unknown ids are simply missing from the map.
    pub fn locations_by_ids(
        &self,
        location_ids: &[i64],
    ) -> Result<FxHashMap<i64, Location>, StoreError> {
        let db = self.db.lock();
        let mut stmt = db.prepare_cached(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1"
        ))?;

        let mut locations = FxHashMap::default();
        for &location_id in location_ids {
            if locations.contains_key(&location_id) {
                continue;
            }

            if let Some(location) = stmt
                .query_row(params![location_id], |row| location_from_row(row, 0))
                .optional()?
            {
                locations.insert(location_id, location);
            }
        }

        Ok(locations)
    }

    /// Creates a tour with its stops ordered `1..=n` and no cached route.
    pub fn insert_tour(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        location_ids: &[i64],
    ) -> Result<i64, StoreError> {
        let now = Timestamp::now().to_string();

        let mut db = self.db.lock();
        let tx = db.transaction()?;

        tx.execute(
            "INSERT INTO tours (owner_id, name, description, route_data, created_at, updated_at)
             VALUES (?1, ?2, ?3, NULL, ?4, ?4)",
            params![owner_id, name, description, now],
        )?;
        let tour_id = tx.last_insert_rowid();
        insert_stops(&tx, tour_id, location_ids)?;
        tx.commit()?;

        debug!(
            "TourStore: created tour {} with {} stops",
            tour_id,
            location_ids.len()
        );

        Ok(tour_id)
    }

    /// Replaces name, description and the whole stop list in one transaction.
    /// The cached route is cleared along with the old stops. Returns `false`
    /// when the tour does not exist.
    pub fn replace_tour(
        &self,
        tour_id: i64,
        name: &str,
        description: &str,
        location_ids: &[i64],
    ) -> Result<bool, StoreError> {
        let now = Timestamp::now().to_string();

        let mut db = self.db.lock();
        let tx = db.transaction()?;

        let updated = tx.execute(
            "UPDATE tours SET name = ?1, description = ?2, route_data = NULL, updated_at = ?3
             WHERE id = ?4",
            params![name, description, now, tour_id],
        )?;
        if updated == 0 {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM tour_stops WHERE tour_id = ?1",
            params![tour_id],
        )?;
        insert_stops(&tx, tour_id, location_ids)?;
        tx.commit()?;

        Ok(true)
    }

    /// Updates the given fields only. Stops and cached route are left alone.
    pub fn update_tour_details(
        &self,
        tour_id: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool, StoreError> {
        let now = Timestamp::now().to_string();

        let db = self.db.lock();
        let updated = db.execute(
            "UPDATE tours SET name = COALESCE(?1, name), description = COALESCE(?2, description),
             updated_at = ?3 WHERE id = ?4",
            params![name, description, now, tour_id],
        )?;

        Ok(updated > 0)
    }

    /// Deletes the tour. Its stops and cached route go with it.
    pub fn delete_tour(&self, tour_id: i64) -> Result<bool, StoreError> {
        let db = self.db.lock();
        let deleted = db.execute("DELETE FROM tours WHERE id = ?1", params![tour_id])?;

        Ok(deleted > 0)
    }

    pub fn tour(&self, tour_id: i64) -> Result<Option<Tour>, StoreError> {
        let (row, stops) = {
            let db = self.db.lock();

            let row = db
                .query_row(
                    "SELECT id, owner_id, name, description, route_data, created_at, updated_at
                     FROM tours WHERE id = ?1",
                    params![tour_id],
                    |row| {
                        Ok(TourRow {
                            id: row.get(0)?,
                            owner_id: row.get(1)?,
                            name: row.get(2)?,
                            description: row.get(3)?,
                            route_data: row.get(4)?,
                            created_at: row.get(5)?,
                            updated_at: row.get(6)?,
                        })
                    },
                )
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            let mut stmt = db.prepare_cached(
                "SELECT s.stop_order, l.id, l.name, l.slug, l.description, l.latitude, l.longitude,
                 l.address, l.category, l.historical_info
                 FROM tour_stops s JOIN locations l ON l.id = s.location_id
                 WHERE s.tour_id = ?1 ORDER BY s.stop_order",
            )?;
            let stops = stmt
                .query_map(params![tour_id], |row| {
                    Ok(TourStop {
                        order: row.get(0)?,
                        location: location_from_row(row, 1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            (row, stops)
        };

        let route_data = row
            .route_data
            .as_deref()
            .map(|blob| parse_route_data(row.id, blob))
            .transpose()?;

        Ok(Some(Tour {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            stops,
            route_data,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        }))
    }

    /// Most recent tours first, optionally restricted to one owner.
    pub fn tours(
        &self,
        owner_id: Option<i64>,
        limit: u32,
        offset: u64,
    ) -> Result<TourPage, StoreError> {
        let db = self.db.lock();

        let total: i64 = db.query_row(
            "SELECT COUNT(*) FROM tours WHERE ?1 IS NULL OR owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;

        let mut stmt = db.prepare(
            "SELECT t.id, t.owner_id, t.name, t.description, t.route_data IS NOT NULL, t.updated_at,
             (SELECT COUNT(*) FROM tour_stops s WHERE s.tour_id = t.id)
             FROM tours t WHERE ?1 IS NULL OR t.owner_id = ?1
             ORDER BY t.id DESC LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt
            .query_map(params![owner_id, limit, offset], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i64>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);
        drop(db);

        let tours = rows
            .into_iter()
            .map(
                |(id, owner_id, name, description, has_route, updated_at, stop_count)| {
                    Ok(TourSummary {
                        id,
                        owner_id,
                        name,
                        description,
                        stop_count: stop_count as usize,
                        has_route,
                        updated_at: parse_timestamp(&updated_at)?,
                    })
                },
            )
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(TourPage {
            tours,
            total: total as usize,
        })
    }

    /// Stores or clears the cached route. Returns `false` when the tour no
    /// longer exists.
    pub fn set_route_data(
        &self,
        tour_id: i64,
        route_data: Option<&RouteData>,
    ) -> Result<bool, StoreError> {
        let blob = route_data
            .map(RouteData::to_blob)
            .transpose()
            .map_err(|source| StoreError::RouteData { tour_id, source })?;

        let db = self.db.lock();
        let updated = db.execute(
            "UPDATE tours SET route_data = ?1 WHERE id = ?2",
            params![blob, tour_id],
        )?;

        Ok(updated > 0)
    }

    pub fn route_data(&self, tour_id: i64) -> Result<Option<RouteData>, StoreError> {
        self.route_data_blob(tour_id)?
            .map(|blob| parse_route_data(tour_id, &blob))
            .transpose()
    }

    /// Raw JSON of the cached route, exactly as stored.
    pub fn route_data_blob(&self, tour_id: i64) -> Result<Option<String>, StoreError> {
        let db = self.db.lock();
        let blob: Option<Option<String>> = db
            .query_row(
                "SELECT route_data FROM tours WHERE id = ?1",
                params![tour_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(blob.flatten())
    }
}

fn insert_stops(tx: &Transaction, tour_id: i64, location_ids: &[i64]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO tour_stops (tour_id, location_id, stop_order) VALUES (?1, ?2, ?3)",
    )?;

    for (index, location_id) in location_ids.iter().enumerate() {
        stmt.execute(params![tour_id, location_id, (index + 1) as u32])?;
    }

    Ok(())
}

fn location_from_row(row: &Row, offset: usize) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        slug: row.get(offset + 2)?,
        description: row.get(offset + 3)?,
        latitude: row.get(offset + 4)?,
        longitude: row.get(offset + 5)?,
        address: row.get(offset + 6)?,
        category: row.get(offset + 7)?,
        historical_info: row.get(offset + 8)?,
    })
}

fn parse_route_data(tour_id: i64, blob: &str) -> Result<RouteData, StoreError> {
    RouteData::from_blob(blob).map_err(|source| StoreError::RouteData { tour_id, source })
}

fn parse_timestamp(value: &str) -> Result<Timestamp, StoreError> {
    value.parse::<Timestamp>().map_err(|source| StoreError::Timestamp {
        value: value.to_string(),
        source,
    })
}
