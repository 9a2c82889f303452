//! Embedded SQL migrations and runner.
//!
//! The schema is declared statically here (no runtime reflection): the
//! `planets` table keyed by `id` plus a non-unique secondary index on
//! `name`. A `schema_migrations` table tracks which versions have been
//! applied, so running the bootstrap against an existing database is a
//! no-op.

use rusqlite::Connection;

use crate::error::{Error, Result};

/// V1: the planets table and its name index.
///
/// `id` is the primary key (a uuid for locally created records). The index
/// on `name` is deliberately non-unique: multiple planets may share a name
/// and are never deduplicated.
const V1_PLANETS: &str = r#"
CREATE TABLE planets (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    terrain    TEXT NOT NULL,
    climate    TEXT NOT NULL,
    film_count INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_planets_name ON planets(name);
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_PLANETS)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::storage(format!("Failed to create schema_migrations: {e}")))?;

    for &(version, sql) in MIGRATIONS {
        let already: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )?;

        if already {
            continue;
        }

        let tx = conn.unchecked_transaction()?;

        tx.execute_batch(sql)
            .map_err(|e| Error::storage(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )?;

        tx.commit()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        // second call is a no-op
        run_migrations(&conn).unwrap();
    }

    #[test]
    fn planets_table_and_index_created() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let table: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='planets'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(table);

        let index: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_planets_name'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(index);
    }

    #[test]
    fn name_index_is_not_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute_batch(
            "INSERT INTO planets (id, name, terrain, climate, film_count)
             VALUES ('a', 'Naboo', 'plains', 'temperate', 4),
                    ('b', 'Naboo', 'swamps', 'temperate', 4);",
        )
        .unwrap();
    }
}
