//! Caster spell-slot progression tables
//!
//! Static fifth-edition slot progressions for the two caster archetypes.
//! These tables are hand-specified reference data, independent of the spell
//! catalog, and are written to `caster_progression` by the seeder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Spell-slot level → number of slots available
pub type SpellSlots = BTreeMap<u8, u8>;

/// Highest caster level covered by the tables
pub const MAX_CASTER_LEVEL: u8 = 20;

/// Caster archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    /// Full casters (wizard, cleric, druid, ...)
    Full,
    /// Pact magic casters (warlock)
    Pact,
}

impl CasterType {
    /// Seeding order
    pub const ALL: [CasterType; 2] = [CasterType::Full, CasterType::Pact];

    /// Value stored in `caster_progression.caster_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            CasterType::Full => "full",
            CasterType::Pact => "pact",
        }
    }

    fn table(&self) -> &'static [&'static [(u8, u8)]] {
        match self {
            CasterType::Full => &FULL_CASTER_SLOTS,
            CasterType::Pact => &PACT_CASTER_SLOTS,
        }
    }
}

impl fmt::Display for CasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(CasterType::Full),
            // Pact magic rows were historically labelled by the warlock class
            "pact" | "warlock" => Ok(CasterType::Pact),
            other => Err(Error::InvalidInput(format!("Unknown caster type: {}", other))),
        }
    }
}

/// Slots available to `caster_type` at `caster_level`
///
/// Returns `None` for levels outside `1..=20`.
pub fn slots_for(caster_type: CasterType, caster_level: u8) -> Option<SpellSlots> {
    if caster_level == 0 || caster_level > MAX_CASTER_LEVEL {
        return None;
    }

    let row = caster_type.table()[usize::from(caster_level) - 1];
    Some(row.iter().copied().collect())
}

/// Full caster slots, index 0 = caster level 1
const FULL_CASTER_SLOTS: [&[(u8, u8)]; 20] = [
    &[(1, 2)],
    &[(1, 3)],
    &[(1, 4), (2, 2)],
    &[(1, 4), (2, 3)],
    &[(1, 4), (2, 3), (3, 2)],
    &[(1, 4), (2, 3), (3, 3)],
    &[(1, 4), (2, 3), (3, 3), (4, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 2)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1), (9, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 1), (7, 1), (8, 1), (9, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 2), (7, 1), (8, 1), (9, 1)],
    &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 2), (7, 2), (8, 1), (9, 1)],
];

/// Pact magic slots: all slots share the single highest slot level
const PACT_CASTER_SLOTS: [&[(u8, u8)]; 20] = [
    &[(1, 1)],
    &[(1, 2)],
    &[(2, 2)],
    &[(2, 2)],
    &[(3, 2)],
    &[(3, 2)],
    &[(4, 2)],
    &[(4, 2)],
    &[(5, 2)],
    &[(5, 2)],
    &[(5, 3)],
    &[(5, 3)],
    &[(5, 3)],
    &[(5, 3)],
    &[(5, 3)],
    &[(5, 3)],
    &[(5, 4)],
    &[(5, 4)],
    &[(5, 4)],
    &[(5, 4)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_caster_level_5_first_level_slots() {
        let slots = slots_for(CasterType::Full, 5).unwrap();
        assert_eq!(slots.get(&1), Some(&4));
        assert_eq!(slots.get(&3), Some(&2));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_pact_caster_level_3_second_level_slots() {
        let slots = slots_for(CasterType::Pact, 3).unwrap();
        assert_eq!(slots.get(&2), Some(&2));
        assert_eq!(slots.get(&1), None);
    }

    #[test]
    fn test_levels_outside_table_have_no_slots() {
        assert!(slots_for(CasterType::Full, 0).is_none());
        assert!(slots_for(CasterType::Pact, 21).is_none());
    }

    #[test]
    fn test_full_caster_slot_counts_never_decrease() {
        for level in 2..=MAX_CASTER_LEVEL {
            let prev = slots_for(CasterType::Full, level - 1).unwrap();
            let cur = slots_for(CasterType::Full, level).unwrap();
            for (slot_level, count) in &prev {
                assert!(
                    cur.get(slot_level).copied().unwrap_or(0) >= *count,
                    "level {} lost slots at slot level {}",
                    level,
                    slot_level
                );
            }
        }
    }

    #[test]
    fn test_pact_caster_has_single_slot_level() {
        for level in 1..=MAX_CASTER_LEVEL {
            assert_eq!(slots_for(CasterType::Pact, level).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_caster_type_parse() {
        assert_eq!("full".parse::<CasterType>().unwrap(), CasterType::Full);
        assert_eq!("Pact".parse::<CasterType>().unwrap(), CasterType::Pact);
        assert_eq!("warlock".parse::<CasterType>().unwrap(), CasterType::Pact);
        assert!("half".parse::<CasterType>().is_err());
    }

    #[test]
    fn test_slots_serialize_as_json_object() {
        let slots = slots_for(CasterType::Full, 3).unwrap();
        let json = serde_json::to_string(&slots).unwrap();
        assert_eq!(json, r#"{"1":4,"2":2}"#);
    }
}
