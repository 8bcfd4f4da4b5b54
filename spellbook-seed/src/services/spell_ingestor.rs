//! Spell ingestion
//!
//! Walks the catalog in input order. For each record: write the spell row,
//! resolve every distinct class and subclass name through the run's
//! [`NormalizationCache`], then write one link row per distinct reference.
//! Links left over from an earlier load whose class or subclass the record no
//! longer names are removed.
//!
//! The run is fail-fast and not transactional: the first failure stops it,
//! and the spells written before that point stay committed. Re-running the
//! same catalog against the same store is safe because every write is an
//! upsert on its natural key.

use spellbook_common::db::SpellId;
use sqlx::SqliteConnection;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::catalog::{NameRef, SpellRecord};
use crate::db::spells;
use crate::error::{EntityKind, IngestAbort, IngestError};
use crate::services::normalization_cache::{natural_key, NormalizationCache};

/// Totals for a completed ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Spells written together with all their links
    pub spells: usize,
    /// Distinct class names resolved
    pub classes: usize,
    /// Distinct subclass names resolved
    pub subclasses: usize,
    /// Spell/class link rows created
    pub class_links: usize,
    /// Spell/subclass link rows created
    pub subclass_links: usize,
    /// Stale link rows removed from spells loaded by an earlier run
    pub pruned_links: usize,
}

/// Single ingestion run over one connection
pub struct SpellIngestor<'c> {
    conn: &'c mut SqliteConnection,
    cache: NormalizationCache,
    seen_indexes: HashSet<String>,
    summary: IngestSummary,
}

impl<'c> SpellIngestor<'c> {
    /// Start a run with an empty cache
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            conn,
            cache: NormalizationCache::new(),
            seen_indexes: HashSet::new(),
            summary: IngestSummary::default(),
        }
    }

    /// Ingest one record: spell row, then class links, then subclass links
    pub async fn ingest_record(&mut self, record: &SpellRecord) -> Result<SpellId, IngestError> {
        if !self.seen_indexes.insert(record.index.clone()) {
            return Err(IngestError::DuplicateSpellIndex(record.index.clone()));
        }

        let spell_id = spells::upsert_spell(&mut *self.conn, record)
            .await
            .map_err(IngestError::store_write(EntityKind::Spell, &record.index))?;

        let mut class_ids = Vec::with_capacity(record.classes.len());
        for name in distinct_names(&record.classes) {
            let class_id = self.cache.resolve_class(&mut *self.conn, name).await?;
            class_ids.push(class_id);
            let created = spells::link_spell_to_class(&mut *self.conn, spell_id, class_id)
                .await
                .map_err(IngestError::store_write(
                    EntityKind::SpellClassLink,
                    format!("{}/{}", record.index, natural_key(name)),
                ))?;
            if created {
                self.summary.class_links += 1;
            }
        }

        let mut subclass_ids = Vec::with_capacity(record.subclasses.len());
        for name in distinct_names(&record.subclasses) {
            let subclass_id = self.cache.resolve_subclass(&mut *self.conn, name).await?;
            subclass_ids.push(subclass_id);
            let created = spells::link_spell_to_subclass(&mut *self.conn, spell_id, subclass_id)
                .await
                .map_err(IngestError::store_write(
                    EntityKind::SpellSubclassLink,
                    format!("{}/{}", record.index, natural_key(name)),
                ))?;
            if created {
                self.summary.subclass_links += 1;
            }
        }

        let pruned = spells::prune_spell_class_links(&mut *self.conn, spell_id, &class_ids)
            .await
            .map_err(IngestError::store_write(EntityKind::SpellClassLink, &record.index))?
            + spells::prune_spell_subclass_links(&mut *self.conn, spell_id, &subclass_ids)
                .await
                .map_err(IngestError::store_write(
                    EntityKind::SpellSubclassLink,
                    &record.index,
                ))?;
        if pruned > 0 {
            debug!("Removed {} stale links of spell '{}'", pruned, record.index);
            self.summary.pruned_links += pruned as usize;
        }

        self.summary.spells += 1;
        debug!(
            "Ingested spell '{}' ({} classes, {} subclasses)",
            record.index,
            record.classes.len(),
            record.subclasses.len()
        );

        Ok(spell_id)
    }

    /// Ingest records in order, stopping at the first failure
    pub async fn run(mut self, records: &[SpellRecord]) -> Result<IngestSummary, IngestAbort> {
        for record in records {
            if let Err(source) = self.ingest_record(record).await {
                return Err(IngestAbort {
                    ingested: self.summary.spells,
                    source,
                });
            }
        }

        self.summary.classes = self.cache.class_count();
        self.summary.subclasses = self.cache.subclass_count();

        info!(
            "Ingested {} spells ({} classes, {} subclasses, {} class links, {} subclass links, {} stale links removed)",
            self.summary.spells,
            self.summary.classes,
            self.summary.subclasses,
            self.summary.class_links,
            self.summary.subclass_links,
            self.summary.pruned_links
        );

        Ok(self.summary)
    }
}

/// Ingest `records` into the store reachable through `conn`
///
/// Builds a fresh [`NormalizationCache`] for the run and drops it afterwards.
pub async fn ingest(
    conn: &mut SqliteConnection,
    records: &[SpellRecord],
) -> Result<IngestSummary, IngestAbort> {
    SpellIngestor::new(conn).run(records).await
}

/// Names in list order with case-insensitive repeats removed
fn distinct_names(refs: &[NameRef]) -> Vec<&str> {
    let mut seen = HashSet::new();
    refs.iter()
        .map(|r| r.name.as_str())
        .filter(|name| seen.insert(natural_key(name)))
        .collect()
}
