//! Remote catalog client and raw-record transformation.
//!
//! [`CatalogClient`] wraps the external film-catalog HTTP service. Two
//! operations exist: fetching one page of planets translated into the local
//! record shape, and looking up how many films a named planet appears in.
//! Transport failures, non-success statuses, and unparseable bodies surface
//! as [`Error::Remote`]; an empty or match-less result set is a defined
//! outcome, never an error.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::planet::Planet;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Catalog API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogPage {
    /// Absent or null `results` is treated the same as an empty page.
    #[serde(default)]
    results: Option<Vec<RawPlanet>>,
}

/// One raw planet record as the remote catalog serves it.
#[derive(Debug, Deserialize)]
struct RawPlanet {
    #[serde(default)]
    name: String,
    #[serde(default)]
    terrain: String,
    #[serde(default)]
    climate: String,
    /// Reference URL of the record; its first digit run is the remote id.
    #[serde(default)]
    url: String,
    /// Film references. Only the length matters locally.
    #[serde(default)]
    films: Option<Vec<serde_json::Value>>,
}

impl RawPlanet {
    /// Translate a raw catalog record into the local record shape.
    ///
    /// The resulting planet is transient: it is never written to the store,
    /// and its id is absent when the reference URL carries no digit run.
    fn into_planet(self) -> Planet {
        Planet {
            id: extract_id(&self.url),
            name: self.name,
            terrain: self.terrain,
            climate: self.climate,
            film_count: self.films.map(|f| f.len() as u32).unwrap_or(0),
        }
    }
}

/// Extract the first run of decimal digits from a reference URL.
///
/// `"https://swapi.svc/api/planets/42/"` yields `Some("42")`; a URL with no
/// digits yields `None` (never an empty string).
fn extract_id(url: &str) -> Option<String> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"));
    re.find(url).map(|m| m.as_str().to_string())
}

/// Client-side film-count scan over a search result set.
///
/// The remote search may return fuzzy/substring matches; only an entry whose
/// name equals `name` case-insensitively *and exactly* counts. No match, or
/// a match without a film list, degrades to 0.
fn film_count_in(results: &[RawPlanet], name: &str) -> u32 {
    // Full Unicode case folding, not just ASCII.
    let wanted = name.to_lowercase();
    results
        .iter()
        .find(|p| p.name.to_lowercase() == wanted)
        .and_then(|p| p.films.as_ref())
        .map(|films| films.len() as u32)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the remote planet/film catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client against `base_url` with the given request timeout.
    ///
    /// The core carries no retry or backoff; the timeout is the only
    /// request-level protection.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client with the default 30-second timeout.
    pub fn with_default_timeout(base_url: impl Into<String>) -> Self {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Fetch one page of the remote catalog, translated into local records.
    ///
    /// Issues exactly one request carrying `page=<page>`. An absent, null,
    /// or empty `results` collection yields an empty Vec.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Planet>> {
        let url = format!("{}/planets/", self.base_url);
        debug!(url = %url, page, "Fetching remote catalog page");

        let page_param = page.to_string();
        let body: CatalogPage = self.get(&url, &[("page", page_param.as_str())]).await?;

        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(RawPlanet::into_planet)
            .collect())
    }

    /// Look up the number of films `name` appears in.
    ///
    /// Issues one search request and scans the (possibly fuzzy) result set
    /// client-side for an exact, case-insensitive name match. Returns 0 when
    /// nothing matches or the matched entry has no film list.
    pub async fn film_count(&self, name: &str) -> Result<u32> {
        let url = format!("{}/planets/", self.base_url);
        debug!(url = %url, name, "Searching remote catalog for film count");

        let body: CatalogPage = self.get(&url, &[("search", name)]).await?;

        Ok(film_count_in(&body.results.unwrap_or_default(), name))
    }

    /// Execute a GET request and parse the JSON body.
    async fn get<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::remote(format!("catalog request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::remote(format!(
                "catalog returned status {status} for {url}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| Error::remote(format!("failed to parse catalog response: {e}")))
    }
}
