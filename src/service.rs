//! Planet service: the orchestration layer over the store and the remote
//! catalog.
//!
//! The create path is the only place the two backends couple: the film
//! count is fetched from the catalog *before* any write is attempted, so a
//! persisted record's count always reflects a successful lookup made during
//! its own creation. A failed lookup aborts the create with nothing
//! written. Read paths go straight to one backend or the other.

use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::db::{self, DbPool};
use crate::error::{Error, Result};
use crate::planet::{Planet, PlanetDraft};

/// Repository facade combining the keyed planet store and the remote
/// catalog client.
///
/// Cheap to clone; clones share the connection pool and the HTTP client.
#[derive(Clone)]
pub struct PlanetService {
    db: DbPool,
    catalog: CatalogClient,
}

impl PlanetService {
    pub fn new(db: DbPool, catalog: CatalogClient) -> Self {
        Self { db, catalog }
    }

    /// Build a service from configuration: catalog client with the
    /// configured base URL and timeout, over an already initialized pool.
    pub fn from_config(db: DbPool, config: &Config) -> Self {
        let catalog = CatalogClient::new(
            config.catalog.base_url.clone(),
            Duration::from_secs(config.catalog.timeout_secs),
        );
        Self::new(db, catalog)
    }

    /// Create a planet from a draft, enriched with its remote film count.
    ///
    /// Sequencing contract:
    /// 1. a fresh 128-bit random id is generated;
    /// 2. the film count is fetched from the remote catalog and awaited;
    /// 3. a lookup failure aborts the create — no write is attempted and
    ///    the `Remote` error propagates;
    /// 4. the completed record is written, then re-read by id, and the
    ///    canonical persisted value is returned.
    pub async fn create(&self, draft: PlanetDraft) -> Result<Planet> {
        let id = Uuid::new_v4().to_string();

        let film_count = match self.catalog.film_count(&draft.name).await {
            Ok(count) => count,
            Err(e) => {
                warn!(name = %draft.name, error = %e, "Film count lookup failed; aborting create");
                return Err(e);
            }
        };

        let planet = Planet {
            id: Some(id.clone()),
            name: draft.name,
            terrain: draft.terrain,
            climate: draft.climate,
            film_count,
        };

        let conn = db::get_conn(&self.db)?;
        db::planets::insert_planet(&conn, &planet)?;

        let persisted = db::planets::get_planet(&conn, &id)?
            .ok_or_else(|| Error::Internal(format!("planet {id} missing after write")))?;

        info!(id = %id, name = %persisted.name, film_count, "Created planet");
        Ok(persisted)
    }

    /// Get a planet by id. `None` is the defined empty outcome.
    pub fn get(&self, id: &str) -> Result<Option<Planet>> {
        let conn = db::get_conn(&self.db)?;
        db::planets::get_planet(&conn, id)
    }

    /// Delete a planet by id, returning the deleted record if it existed.
    pub fn delete(&self, id: &str) -> Result<Option<Planet>> {
        let conn = db::get_conn(&self.db)?;
        let deleted = db::planets::delete_planet(&conn, id)?;
        if deleted.is_some() {
            info!(id = %id, "Deleted planet");
        }
        Ok(deleted)
    }

    /// List stored planets, optionally restricted to an exact name match.
    pub fn list(&self, name_filter: Option<&str>) -> Result<Vec<Planet>> {
        let conn = db::get_conn(&self.db)?;
        db::planets::list_planets(&conn, name_filter)
    }

    /// Fetch one page of the remote catalog as transient records.
    ///
    /// Bypasses the store entirely; nothing is cached or persisted.
    pub async fn fetch_remote_page(&self, page: u32) -> Result<Vec<Planet>> {
        self.catalog.fetch_page(page).await
    }
}
