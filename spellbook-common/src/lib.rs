//! # Spellbook Common Library
//!
//! Shared code for the spellbook loader and lookup service including:
//! - Database bootstrap, migrations and row models
//! - Typed entity identifiers
//! - Configuration loading
//! - Caster spell-slot progression tables

pub mod config;
pub mod db;
pub mod error;
pub mod progression;

pub use error::{Error, Result};
pub use progression::{CasterType, SpellSlots};
