//! Planet domain model.
//!
//! A [`Planet`] either lives in the keyed store (in which case `id` is always
//! a non-empty string assigned at creation) or is a transient value produced
//! from a remote catalog page (in which case `id` is derived from the remote
//! reference URL and may be absent). Records are never mutated after
//! creation; there is no update operation.

use serde::{Deserialize, Serialize};

/// One planet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Primary key. `None` only for transient remote records whose reference
    /// URL carries no numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name; also the non-unique secondary lookup key. Multiple
    /// stored planets may share a name.
    pub name: String,
    pub terrain: String,
    pub climate: String,
    /// Number of film appearances, fetched from the remote catalog at
    /// creation time (0 when the source has no film list).
    #[serde(default)]
    pub film_count: u32,
}

/// The caller-supplied shape of a planet before creation. The id and film
/// count are filled in by the enrichment pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetDraft {
    pub name: String,
    #[serde(default)]
    pub terrain: String,
    #[serde(default)]
    pub climate: String,
}
