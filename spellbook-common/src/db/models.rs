//! Database models
//!
//! Surrogate keys are wrapped in per-table newtypes so a class id can never be
//! bound where a subclass or spell id is expected.

use crate::progression::SpellSlots;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Row id of `spells`
    SpellId
);
entity_id!(
    /// Row id of `classes`
    ClassId
);
entity_id!(
    /// Row id of `subclasses`
    SubclassId
);

/// Full spell row as stored
#[derive(Debug, Clone, FromRow)]
pub struct SpellRow {
    pub id: SpellId,
    pub spell_index: String,
    pub name: String,
    pub range: String,
    pub material: String,
    pub ritual: bool,
    pub duration: String,
    pub concentration: bool,
    pub casting_time: String,
    pub level: i64,
    pub attack_type: String,
    pub school: Option<Json<Value>>,
    pub description: Json<Vec<String>>,
    pub higher_level: Json<Vec<String>>,
    pub components: Json<Vec<String>>,
    pub damage: Option<Json<Value>>,
    pub url: String,
}

/// (name, url) pair used by every listing lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SpellSummary {
    pub name: String,
    pub url: String,
}

/// One caster level of one archetype
#[derive(Debug, Clone, FromRow)]
pub struct CasterProgressionRow {
    pub caster_type: String,
    pub caster_level: i64,
    pub slots: Json<SpellSlots>,
}
