//! Record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist addressable records and their state/country lookups.
//! - Route `location` through the spatial port on write and read.
//! - Provide distance-filtered listing backed by `st_distance`.
//!
//! # Invariants
//! - Write paths call `AddressableRecord::validate()` before SQL mutations.
//! - `location` is encoded and decoded by the injected `SpatialStore`, the
//!   same store that builds the distance predicate.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::geo::coordinates::Coordinates;
use crate::model::record::{AddressableRecord, NamedRef, RecordId, RecordValidationError};
use crate::spatial::{SpatialError, SpatialStore, StorageValue, WktPointStore};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const RECORD_SELECT_SQL: &str = "SELECT
    r.uuid,
    r.name,
    r.firstname,
    r.lastname,
    r.address,
    r.address2,
    r.city,
    r.postcode,
    r.state_id,
    s.name AS state_name,
    r.country_id,
    c.name AS country_name,
    r.phone,
    r.fax,
    r.toll_free,
    r.lat,
    r.lon,
    r.location
FROM records r
LEFT JOIN states s ON s.id = r.state_id
LEFT JOIN countries c ON c.id = r.country_id";

const LOCATION_COLUMN: &str = "r.location";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Spatial(SpatialError),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Spatial(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Spatial(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SpatialError> for RepoError {
    fn from(value: SpatialError) -> Self {
        Self::Spatial(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for addressable records.
pub trait RecordRepository {
    /// Returns the state/region row named `name`, creating it if needed.
    fn create_state(&self, name: &str) -> RepoResult<NamedRef>;
    /// Returns the country row named `name`, creating it if needed.
    fn create_country(&self, name: &str) -> RepoResult<NamedRef>;
    fn create_record(&self, record: &AddressableRecord) -> RepoResult<RecordId>;
    fn update_record(&self, record: &AddressableRecord) -> RepoResult<()>;
    fn get_record(&self, id: RecordId) -> RepoResult<Option<AddressableRecord>>;
    /// Lists records ordered by `updated_at DESC, uuid ASC`.
    fn list_records(&self) -> RepoResult<Vec<AddressableRecord>>;
    /// Lists records whose stored point lies closer than `distance` to
    /// `point`, nearest first. Distance is in the spatial store's unit.
    fn list_within_distance(
        &self,
        point: Coordinates,
        distance: f64,
    ) -> RepoResult<Vec<AddressableRecord>>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn, S = WktPointStore> {
    conn: &'conn Connection,
    spatial: S,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_spatial_store(conn, WktPointStore)
    }
}

impl<'conn, S: SpatialStore> SqliteRecordRepository<'conn, S> {
    pub fn with_spatial_store(conn: &'conn Connection, spatial: S) -> Self {
        Self { conn, spatial }
    }

    fn upsert_named(&self, table: &'static str, name: &str) -> RepoResult<NamedRef> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::InvalidData(format!(
                "{table}.name cannot be empty"
            )));
        }

        self.conn.execute(
            &format!("INSERT OR IGNORE INTO {table} (name) VALUES (?1);"),
            [name],
        )?;
        let id: i64 = self.conn.query_row(
            &format!("SELECT id FROM {table} WHERE name = ?1;"),
            [name],
            |row| row.get(0),
        )?;

        Ok(NamedRef::new(id, name))
    }

    fn encode_location(&self, record: &AddressableRecord) -> RepoResult<Option<String>> {
        match record.location.as_deref().filter(|value| !value.is_empty()) {
            Some(value) => Ok(Some(self.spatial.encode_location(value)?.into_inner())),
            None => Ok(None),
        }
    }

    fn collect_records(
        &self,
        mut rows: rusqlite::Rows<'_>,
    ) -> RepoResult<Vec<AddressableRecord>> {
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(self.parse_record_row(row)?);
        }
        Ok(records)
    }

    fn parse_record_row(&self, row: &Row<'_>) -> RepoResult<AddressableRecord> {
        let uuid_text: String = row.get("uuid")?;
        let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in records.uuid"))
        })?;

        let location = match row.get::<_, Option<String>>("location")? {
            Some(stored) => {
                let stored = StorageValue::new(stored);
                let Some(decoded) = self.spatial.decode_location(&stored) else {
                    return Err(RepoError::InvalidData(format!(
                        "invalid point literal `{stored}` in records.location"
                    )));
                };
                Some(decoded)
            }
            None => None,
        };

        let record = AddressableRecord {
            uuid,
            name: row.get("name")?,
            firstname: row.get("firstname")?,
            lastname: row.get("lastname")?,
            address: row.get("address")?,
            address2: row.get("address2")?,
            city: row.get("city")?,
            postcode: row.get("postcode")?,
            state: named_ref(row, "state_id", "state_name")?,
            country: named_ref(row, "country_id", "country_name")?,
            phone: row.get("phone")?,
            fax: row.get("fax")?,
            toll_free: row.get("toll_free")?,
            lat: row.get("lat")?,
            lon: row.get("lon")?,
            location,
        };
        record.validate()?;
        Ok(record)
    }
}

impl<S: SpatialStore> RecordRepository for SqliteRecordRepository<'_, S> {
    fn create_state(&self, name: &str) -> RepoResult<NamedRef> {
        self.upsert_named("states", name)
    }

    fn create_country(&self, name: &str) -> RepoResult<NamedRef> {
        self.upsert_named("countries", name)
    }

    fn create_record(&self, record: &AddressableRecord) -> RepoResult<RecordId> {
        record.validate()?;
        let location = self.encode_location(record)?;

        self.conn.execute(
            "INSERT INTO records (
                uuid,
                name,
                firstname,
                lastname,
                address,
                address2,
                city,
                postcode,
                state_id,
                country_id,
                phone,
                fax,
                toll_free,
                lat,
                lon,
                location
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                record.uuid.to_string(),
                record.name.as_deref(),
                record.firstname.as_deref(),
                record.lastname.as_deref(),
                record.address.as_deref(),
                record.address2.as_deref(),
                record.city.as_deref(),
                record.postcode.as_deref(),
                record.state.as_ref().map(|state| state.id),
                record.country.as_ref().map(|country| country.id),
                record.phone.as_deref(),
                record.fax.as_deref(),
                record.toll_free.as_deref(),
                record.lat,
                record.lon,
                location,
            ],
        )?;

        Ok(record.uuid)
    }

    fn update_record(&self, record: &AddressableRecord) -> RepoResult<()> {
        record.validate()?;
        let location = self.encode_location(record)?;

        let changed = self.conn.execute(
            "UPDATE records
             SET
                name = ?1,
                firstname = ?2,
                lastname = ?3,
                address = ?4,
                address2 = ?5,
                city = ?6,
                postcode = ?7,
                state_id = ?8,
                country_id = ?9,
                phone = ?10,
                fax = ?11,
                toll_free = ?12,
                lat = ?13,
                lon = ?14,
                location = ?15,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?16;",
            params![
                record.name.as_deref(),
                record.firstname.as_deref(),
                record.lastname.as_deref(),
                record.address.as_deref(),
                record.address2.as_deref(),
                record.city.as_deref(),
                record.postcode.as_deref(),
                record.state.as_ref().map(|state| state.id),
                record.country.as_ref().map(|country| country.id),
                record.phone.as_deref(),
                record.fax.as_deref(),
                record.toll_free.as_deref(),
                record.lat,
                record.lon,
                location,
                record.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.uuid));
        }

        Ok(())
    }

    fn get_record(&self, id: RecordId) -> RepoResult<Option<AddressableRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE r.uuid = ?1;"))?;

        stmt.query_row(params![id.to_string()], |row| Ok(self.parse_record_row(row)))
            .optional()?
            .transpose()
    }

    fn list_records(&self) -> RepoResult<Vec<AddressableRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL} ORDER BY r.updated_at DESC, r.uuid ASC;"
        ))?;
        let rows = stmt.query([])?;
        self.collect_records(rows)
    }

    fn list_within_distance(
        &self,
        point: Coordinates,
        distance: f64,
    ) -> RepoResult<Vec<AddressableRecord>> {
        let predicate = self
            .spatial
            .within_distance(LOCATION_COLUMN, point, distance)?;

        let sql = format!(
            "{RECORD_SELECT_SQL}
             WHERE {}
             ORDER BY st_distance({LOCATION_COLUMN}, ?) ASC, r.uuid ASC;",
            predicate.sql
        );
        let mut bind_values: Vec<Value> = predicate.params;
        bind_values.push(Value::Text(self.spatial.encode_point(point).into_inner()));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query(params_from_iter(bind_values))?;
        self.collect_records(rows)
    }
}

fn named_ref(row: &Row<'_>, id_column: &str, name_column: &str) -> RepoResult<Option<NamedRef>> {
    let id: Option<i64> = row.get(id_column)?;
    let name: Option<String> = row.get(name_column)?;
    Ok(id.zip(name).map(|(id, name)| NamedRef::new(id, name)))
}
