//! HTTP API handlers for spellbook-api

pub mod classes;
pub mod health;
pub mod progression;
pub mod spells;
pub mod stats;

pub use classes::{spells_by_class, spells_by_subclass};
pub use health::health_routes;
pub use progression::get_caster_progression;
pub use spells::{concentration_spells, get_spell, spells_by_level};
pub use stats::get_stats;
