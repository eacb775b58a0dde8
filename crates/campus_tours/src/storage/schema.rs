use rusqlite::Connection;

pub(crate) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS locations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            address TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            historical_info TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS tours (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            -- Cached RouteData as JSON, NULL when absent
            route_data TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tour_stops (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tour_id INTEGER NOT NULL REFERENCES tours(id) ON DELETE CASCADE,
            location_id INTEGER NOT NULL REFERENCES locations(id),
            stop_order INTEGER NOT NULL,
            UNIQUE (tour_id, stop_order)
        );

        CREATE INDEX IF NOT EXISTS idx_tours_owner ON tours(owner_id);
        CREATE INDEX IF NOT EXISTS idx_tour_stops_tour ON tour_stops(tour_id);
        "#,
    )
}
