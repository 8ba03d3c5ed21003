use addressable_core::db::migrations::latest_version;
use addressable_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "records");
    assert_table_exists(&conn, "states");
    assert_table_exists(&conn, "countries");
}

#[test]
fn opened_connections_expose_spatial_functions() {
    let conn = open_db_in_memory().unwrap();
    let distance: f64 = conn
        .query_row(
            "SELECT st_distance('POINT(1 1)', 'POINT(4 5)');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!((distance - 5.0).abs() < 1e-12);
}

#[test]
fn lookup_deletes_use_child_key_indexes() {
    let conn = open_db_in_memory().unwrap();

    for (column, index) in [
        ("state_id", "idx_records_state_id"),
        ("country_id", "idx_records_country_id"),
    ] {
        let plan: String = conn
            .query_row(
                &format!("EXPLAIN QUERY PLAN SELECT uuid FROM records WHERE {column} = 1;"),
                [],
                |row| row.get(3),
            )
            .unwrap();
        assert!(plan.contains(index), "unexpected plan for {column}: {plan}");
    }

    conn.execute_batch(
        "INSERT INTO states (id, name) VALUES (1, 'OR');
         INSERT INTO records (uuid, state_id) VALUES ('r-1', 1);
         DELETE FROM states WHERE id = 1;",
    )
    .unwrap();
    let state_id: Option<i64> = conn
        .query_row("SELECT state_id FROM records WHERE uuid = 'r-1';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(state_id, None);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("addressable.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "records");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("record store schema version 999 is newer than supported"));
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
