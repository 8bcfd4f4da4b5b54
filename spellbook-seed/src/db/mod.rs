//! Store writes for the loader
//!
//! Every write goes through a single `SqliteConnection` so the pipeline issues
//! one statement at a time, in order. Entity inserts are upserts on the
//! natural key and return the row id, which makes a re-run against an already
//! loaded store reuse existing rows instead of duplicating them.

pub mod entities;
pub mod progression;
pub mod spells;
