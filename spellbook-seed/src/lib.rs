//! spellbook-seed library interface
//!
//! Loads a spell catalog into the normalized store and seeds the caster
//! progression tables. Exposed as a library for integration testing.

pub mod catalog;
pub mod db;
pub mod error;
pub mod services;

pub use crate::catalog::{load_catalog, parse_catalog, NameRef, SpellRecord};
pub use crate::error::{EntityKind, IngestAbort, IngestError, SeedAbort};
pub use crate::services::normalization_cache::NormalizationCache;
pub use crate::services::progression_seeder::{seed_caster_progression, SeedSummary};
pub use crate::services::spell_ingestor::{ingest, IngestSummary, SpellIngestor};
