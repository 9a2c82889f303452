//! Planet route handlers.
//!
//! The dispatch layer stays thin: request-shape checks and status-code
//! mapping live here, everything else is delegated to [`PlanetService`].

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::Error;
use crate::planet::PlanetDraft;
use crate::server::error::AppError;
use crate::service::PlanetService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemotePageQuery {
    /// Accepted as raw text: a non-numeric or out-of-range value silently
    /// defaults to page 1 rather than failing the request.
    pub page: Option<String>,
}

/// GET /planets?name=<filter>
pub async fn list_planets(
    State(service): State<PlanetService>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let planets = service.list(query.name.as_deref())?;
    Ok(Json(planets))
}

/// POST /planets
pub async fn create_planet(
    State(service): State<PlanetService>,
    Json(draft): Json<PlanetDraft>,
) -> Result<impl IntoResponse, AppError> {
    if draft.name.is_empty() {
        return Err(Error::Validation("name is required".into()).into());
    }

    let planet = service.create(draft).await?;
    let location = format!(
        "/planets/{}",
        planet.id.as_deref().unwrap_or_default()
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(planet),
    ))
}

/// GET /planets/remote?page=<n>
pub async fn remote_planets(
    State(service): State<PlanetService>,
    Query(query): Query<RemotePageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = normalize_page(query.page.as_deref());
    let planets = service.fetch_remote_page(page).await?;
    Ok(Json(planets))
}

/// GET /planets/:id
pub async fn get_planet(
    State(service): State<PlanetService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match service.get(&id)? {
        Some(planet) => Ok(Json(planet)),
        None => Err(Error::not_found("planet", id).into()),
    }
}

/// DELETE /planets/:id
pub async fn delete_planet(
    State(service): State<PlanetService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match service.delete(&id)? {
        Some(planet) => Ok(Json(planet)),
        None => Err(Error::not_found("planet", id).into()),
    }
}

/// Normalize a raw page parameter: anything that is not a positive integer
/// silently becomes page 1.
fn normalize_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.parse::<u32>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}
