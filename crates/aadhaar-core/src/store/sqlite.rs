//! SQLite-backed record store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, ToSql};
use tracing::{debug, info};

use super::{RecordStore, Result};
use crate::error::StoreError;
use crate::models::record::{CandidateRecord, PersistedRecord, RecordUpdate, ValidatedRecord};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS aadhaar_records (
         id            INTEGER PRIMARY KEY AUTOINCREMENT,
         identifier    TEXT NOT NULL UNIQUE,
         virtual_id    TEXT,
         name          TEXT NOT NULL,
         name_tamil    TEXT,
         guardian_name TEXT,
         date_of_birth TEXT,
         gender        TEXT,
         address       TEXT,
         locality      TEXT,
         post_office   TEXT,
         sub_district  TEXT,
         district      TEXT,
         state         TEXT,
         pincode       TEXT,
         phone         TEXT,
         created_at    TEXT NOT NULL,
         updated_at    TEXT
     );
     CREATE INDEX IF NOT EXISTS idx_aadhaar_identifier ON aadhaar_records(identifier);
     CREATE INDEX IF NOT EXISTS idx_aadhaar_virtual_id ON aadhaar_records(virtual_id);
     CREATE INDEX IF NOT EXISTS idx_aadhaar_created_at ON aadhaar_records(created_at);";

const COLUMNS: &str = "id, identifier, virtual_id, name, name_tamil, guardian_name, \
     date_of_birth, gender, address, locality, post_office, sub_district, district, state, \
     pincode, phone, created_at, updated_at";

/// Records persisted in a single SQLite table.
///
/// The connection sits behind a [`Mutex`]; uniqueness of `identifier` is
/// enforced by the table's `UNIQUE` constraint.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        info!("Opened record database at {}", path.display());
        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Backend("connection lock poisoned".to_string()))
    }
}

fn find(conn: &Connection, identifier: &str) -> Result<Option<PersistedRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM aadhaar_records WHERE identifier = ?1");
    Ok(conn
        .query_row(&sql, params![identifier], row_to_record)
        .optional()?)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PersistedRecord> {
    let gender: Option<String> = row.get(7)?;
    Ok(PersistedRecord {
        id: row.get(0)?,
        record: CandidateRecord {
            identifier: row.get(1)?,
            virtual_id: row.get(2)?,
            name: row.get(3)?,
            name_tamil: row.get(4)?,
            guardian_name: row.get(5)?,
            date_of_birth: row.get(6)?,
            gender: gender.and_then(|g| g.parse().ok()),
            address: row.get(8)?,
            locality: row.get(9)?,
            post_office: row.get(10)?,
            sub_district: row.get(11)?,
            district: row.get(12)?,
            state: row.get(13)?,
            pincode: row.get(14)?,
            phone: row.get(15)?,
        },
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl RecordStore for SqliteStore {
    fn find_by_key(&self, identifier: &str) -> Result<Option<PersistedRecord>> {
        let conn = self.lock()?;
        find(&conn, identifier)
    }

    fn create(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        let conn = self.lock()?;
        let r = record.record();
        let created_at = Utc::now();

        let inserted = conn.execute(
            "INSERT INTO aadhaar_records (identifier, virtual_id, name, name_tamil, guardian_name,
                 date_of_birth, gender, address, locality, post_office, sub_district, district,
                 state, pincode, phone, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                r.identifier,
                r.virtual_id,
                r.name,
                r.name_tamil,
                r.guardian_name,
                r.date_of_birth,
                r.gender.map(|g| g.as_str()),
                r.address,
                r.locality,
                r.post_office,
                r.sub_district,
                r.district,
                r.state,
                r.pincode,
                r.phone,
                created_at,
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::DuplicateKey(r.identifier.clone()));
            }
            Err(e) => return Err(e.into()),
        }

        let id = conn.last_insert_rowid();
        info!("Created record {} (id {})", r.identifier, id);

        Ok(PersistedRecord {
            id,
            record: r.clone(),
            created_at,
            updated_at: None,
        })
    }

    fn update_by_key(
        &self,
        identifier: &str,
        update: &RecordUpdate,
    ) -> Result<Option<PersistedRecord>> {
        let conn = self.lock()?;
        let assignments = update.assignments();
        let updated_at: DateTime<Utc> = Utc::now();

        let mut set_clauses: Vec<String> = assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
            .collect();
        set_clauses.push(format!("updated_at = ?{}", assignments.len() + 1));
        let sql = format!(
            "UPDATE aadhaar_records SET {} WHERE identifier = ?{}",
            set_clauses.join(", "),
            assignments.len() + 2
        );

        let mut values: Vec<&dyn ToSql> = assignments
            .iter()
            .map(|(_, value)| value as &dyn ToSql)
            .collect();
        values.push(&updated_at);
        values.push(&identifier);

        debug!("Updating {} with {} fields", identifier, assignments.len());
        let changed = conn.execute(&sql, values.as_slice())?;
        if changed == 0 {
            return Ok(None);
        }

        info!("Updated record {}", identifier);
        find(&conn, identifier)
    }

    fn delete_by_key(&self, identifier: &str) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM aadhaar_records WHERE identifier = ?1",
            params![identifier],
        )?;
        Ok(removed > 0)
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<PersistedRecord>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {COLUMNS} FROM aadhaar_records ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
        );
        // SQLite takes signed limits; anything past i64::MAX means "all"
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![limit, offset], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}
