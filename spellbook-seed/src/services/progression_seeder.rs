//! Caster progression seeding
//!
//! Writes one `caster_progression` row per caster level for each archetype,
//! full casters first. The data comes from the static tables in
//! `spellbook_common::progression`, never from the spell catalog.

use spellbook_common::progression::{slots_for, CasterType, MAX_CASTER_LEVEL};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::db::progression::upsert_caster_progression;
use crate::error::{EntityKind, IngestError, SeedAbort};

/// Rows written per archetype
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub full: usize,
    pub pact: usize,
}

impl SeedSummary {
    fn record(&mut self, caster_type: CasterType) {
        match caster_type {
            CasterType::Full => self.full += 1,
            CasterType::Pact => self.pact += 1,
        }
    }
}

/// Seed both progression tables, stopping at the first failed row
///
/// Rows written before a failure stay committed; their counts travel with
/// the returned [`SeedAbort`].
pub async fn seed_caster_progression(
    conn: &mut SqliteConnection,
) -> Result<SeedSummary, SeedAbort> {
    let mut summary = SeedSummary::default();

    for caster_type in CasterType::ALL {
        for caster_level in 1..=MAX_CASTER_LEVEL {
            let Some(slots) = slots_for(caster_type, caster_level) else {
                continue;
            };

            upsert_caster_progression(&mut *conn, caster_type, caster_level, &slots)
                .await
                .map_err(|source| SeedAbort {
                    full: summary.full,
                    pact: summary.pact,
                    source: IngestError::StoreWrite {
                        entity: EntityKind::CasterProgression,
                        key: format!("{}/{}", caster_type, caster_level),
                        source,
                    },
                })?;

            debug!("Seeded {} caster level {}", caster_type, caster_level);
            summary.record(caster_type);
        }
    }

    info!(
        "Seeded caster progression: {} full rows, {} pact rows",
        summary.full, summary.pact
    );

    Ok(summary)
}
