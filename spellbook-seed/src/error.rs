//! Error types for spellbook-seed
//!
//! Every variant is fatal to the run: nothing here is retried or downgraded to
//! a warning. The abort wrappers carry how far the run got before stopping,
//! since rows written before the failure stay committed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of row a store write was creating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Spell,
    Class,
    Subclass,
    SpellClassLink,
    SpellSubclassLink,
    CasterProgression,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Spell => "spell",
            EntityKind::Class => "class",
            EntityKind::Subclass => "subclass",
            EntityKind::SpellClassLink => "spell/class link",
            EntityKind::SpellSubclassLink => "spell/subclass link",
            EntityKind::CasterProgression => "caster progression row",
        };
        f.write_str(name)
    }
}

/// Ingestion pipeline error
#[derive(Debug, Error)]
pub enum IngestError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {}: {source}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog bytes are not a JSON array of spell objects
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    /// Two records in one catalog share an index
    #[error("Duplicate spell index in catalog: {0}")]
    DuplicateSpellIndex(String),

    /// An insert was rejected by the store
    #[error("Failed to write {entity} '{key}': {source}")]
    StoreWrite {
        entity: EntityKind,
        key: String,
        #[source]
        source: sqlx::Error,
    },
}

impl IngestError {
    /// `map_err` adapter tagging a store error with what was being written
    pub(crate) fn store_write(
        entity: EntityKind,
        key: impl Into<String>,
    ) -> impl FnOnce(sqlx::Error) -> Self {
        let key = key.into();
        move |source| IngestError::StoreWrite { entity, key, source }
    }
}

/// Spell ingestion stopped part way
#[derive(Debug, Error)]
#[error("Ingestion aborted after {ingested} spells: {source}")]
pub struct IngestAbort {
    /// Spells fully ingested (row plus links) before the failure
    pub ingested: usize,
    #[source]
    pub source: IngestError,
}

/// Caster progression seeding stopped part way
#[derive(Debug, Error)]
#[error("Seeding aborted after {full} full and {pact} pact rows: {source}")]
pub struct SeedAbort {
    pub full: usize,
    pub pact: usize,
    #[source]
    pub source: IngestError,
}
