//! Planet store operations.
//!
//! Each function is one logical round trip against the keyed backend:
//! put by primary key, get by primary key, delete by primary key, full
//! scan, or exact-match query against the name index. A missing record is
//! a defined empty outcome (`None`), never an error.

use rusqlite::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::planet::Planet;

fn from_row(row: &Row) -> rusqlite::Result<Planet> {
    Ok(Planet {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        terrain: row.get(2)?,
        climate: row.get(3)?,
        film_count: row.get(4)?,
    })
}

/// Insert a fully populated planet record (full-row put).
///
/// The caller is responsible for having assigned an id and film count; a
/// draft without an id is rejected before touching the backend.
pub fn insert_planet(conn: &Connection, planet: &Planet) -> Result<()> {
    let id = planet
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::storage("refusing to insert planet without an id"))?;

    conn.execute(
        "INSERT INTO planets (id, name, terrain, climate, film_count)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, planet.name, planet.terrain, planet.climate, planet.film_count],
    )?;

    Ok(())
}

/// Get a planet by id.
pub fn get_planet(conn: &Connection, id: &str) -> Result<Option<Planet>> {
    let result = conn.query_row(
        "SELECT id, name, terrain, climate, film_count FROM planets WHERE id = ?1",
        [id],
        from_row,
    );
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a planet by id, returning the deleted record.
///
/// A single statement, so under concurrent deletes of the same id exactly
/// one caller receives the record. Deleting an absent id yields `None`;
/// the operation is idempotent with respect to "record no longer exists".
pub fn delete_planet(conn: &Connection, id: &str) -> Result<Option<Planet>> {
    let result = conn.query_row(
        "DELETE FROM planets WHERE id = ?1
         RETURNING id, name, terrain, climate, film_count",
        [id],
        from_row,
    );
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List planets, optionally restricted to an exact name match.
///
/// A present, non-empty filter queries the name index for every record
/// whose name equals the filter; otherwise the full table is scanned.
/// Order is unspecified.
pub fn list_planets(conn: &Connection, name_filter: Option<&str>) -> Result<Vec<Planet>> {
    match name_filter.filter(|n| !n.is_empty()) {
        Some(name) => {
            let mut stmt = conn.prepare(
                "SELECT id, name, terrain, climate, film_count FROM planets WHERE name = ?1",
            )?;
            let rows = stmt
                .query_map([name], from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT id, name, terrain, climate, film_count FROM planets")?;
            let rows = stmt
                .query_map([], from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        }
    }
}
