//! SQLite store backend.
//!
//! The production deployment fronts a shared database; a single SQLite file
//! carries the same two-table schema and is what tests and local runs use.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use parcel_core::{GeoPoint, LocationId, PackageRecord, SimTime};
use parcel_spatial::{LocationKind, LocationRecord};

use crate::store::Store;
use crate::{StoreError, StoreResult};

/// Tables the simulator reads.  `check_tables` reports the first missing one.
const REQUIRED_TABLES: [&str; 2] = ["locations", "active_packages"];

/// A store backed by one SQLite database file.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// Opening never fails on a missing schema — that is `check_tables`'s
    /// job, so bootstrap can poll for it.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self { conn: Connection::open_in_memory()? })
    }

    // ── Seeding (tests and demo runs only) ────────────────────────────────

    /// Create both tables.  Idempotent.
    pub fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS locations (
                 id   INTEGER PRIMARY KEY,
                 name TEXT    NOT NULL,
                 kind TEXT    NOT NULL,
                 lat  REAL    NOT NULL,
                 lon  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS active_packages (
                 package_id   TEXT    PRIMARY KEY,
                 simulator_id TEXT    NOT NULL,
                 origin       INTEGER NOT NULL,
                 destination  INTEGER NOT NULL,
                 recorded_at  INTEGER NOT NULL
             );
             CREATE INDEX IF NOT EXISTS active_packages_by_simulator
                 ON active_packages (simulator_id);",
        )?;
        Ok(())
    }

    pub fn insert_location(&self, rec: &LocationRecord) -> StoreResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO locations (id, name, kind, lat, lon) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        stmt.execute(rusqlite::params![
            rec.id.0,
            rec.name,
            rec.kind.as_str(),
            rec.pos.lat as f64,
            rec.pos.lon as f64,
        ])?;
        Ok(())
    }

    pub fn insert_package(&self, simulator_id: &str, rec: &PackageRecord) -> StoreResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO active_packages \
             (package_id, simulator_id, origin, destination, recorded_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        stmt.execute(rusqlite::params![
            rec.package_id,
            simulator_id,
            rec.origin.0,
            rec.destination.0,
            rec.recorded_at.0,
        ])?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn check_tables(&self) -> StoreResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )?;
        for table in REQUIRED_TABLES {
            let present = stmt
                .query_row([table], |_| Ok(()))
                .optional()?
                .is_some();
            if !present {
                return Err(StoreError::SchemaNotReady { missing: table });
            }
        }
        Ok(())
    }

    fn current_time(&self) -> StoreResult<SimTime> {
        let secs: i64 = self
            .conn
            .query_row("SELECT CAST(strftime('%s', 'now') AS INTEGER)", [], |row| {
                row.get(0)
            })?;
        Ok(SimTime(secs))
    }

    fn locations(&self) -> StoreResult<Vec<LocationRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, kind, lat, lon FROM locations ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, name, label, lat, lon) = row?;
            let kind = LocationKind::parse(&label)
                .ok_or(StoreError::UnknownKind { id, label })?;
            out.push(LocationRecord {
                id: LocationId(id as u32),
                name,
                kind,
                pos: GeoPoint::new(lat as f32, lon as f32),
            });
        }
        Ok(out)
    }

    fn active_packages(&self, simulator_id: &str) -> StoreResult<Vec<PackageRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT package_id, origin, destination, recorded_at \
             FROM active_packages WHERE simulator_id = ?1 ORDER BY package_id",
        )?;

        let rows = stmt.query_map([simulator_id], |row| {
            Ok(PackageRecord {
                package_id:  row.get(0)?,
                origin:      LocationId(row.get::<_, i64>(1)? as u32),
                destination: LocationId(row.get::<_, i64>(2)? as u32),
                recorded_at: SimTime(row.get(3)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }
}
