//! Loader services
//!
//! - [`normalization_cache`]: per-run name → id mapping for classes and subclasses
//! - [`spell_ingestor`]: persists spells and their class/subclass links
//! - [`progression_seeder`]: writes the static caster progression tables

pub mod normalization_cache;
pub mod progression_seeder;
pub mod spell_ingestor;
