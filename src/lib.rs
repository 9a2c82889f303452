//! Planetarium - planet catalog service
//!
//! Maintains planet records in a keyed store and enriches newly created
//! records with a film-appearance count fetched from a remote catalog
//! before the first write. Also exposes a read-through view onto pages of
//! the remote catalog, translated into the local record shape.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod planet;
pub mod server;
pub mod service;

pub use error::{Error, Result};
pub use planet::{Planet, PlanetDraft};
