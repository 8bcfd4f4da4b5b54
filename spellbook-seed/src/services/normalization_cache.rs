//! Per-run class/subclass name resolution
//!
//! Spell records name their classes and subclasses inline. The cache turns
//! each distinct name into exactly one persisted entity and remembers its id
//! for the rest of the run, so later references cost no store access.
//!
//! Names are case-folded before lookup: "Wizard" and "wizard" are the same
//! entity, and the cache key is the folded name, never the display name.

use spellbook_common::db::{ClassId, SubclassId};
use sqlx::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use crate::db::entities;
use crate::error::{EntityKind, IngestError};

/// Natural key of a class or subclass display name
pub fn natural_key(display_name: &str) -> String {
    display_name.to_lowercase()
}

/// URL-style path stored alongside a class
pub fn class_url(natural_key: &str) -> String {
    format!("api/classes/{}", natural_key)
}

/// URL-style path stored alongside a subclass
pub fn subclass_url(natural_key: &str) -> String {
    format!("api/subclasses/{}", natural_key)
}

/// Name → id mappings for one pipeline run
///
/// Owned by a single ingestion run and dropped with it. Resolution takes
/// `&mut self`, so two first-sight resolutions of the same name can never
/// race each other.
#[derive(Debug, Default)]
pub struct NormalizationCache {
    classes: HashMap<String, ClassId>,
    subclasses: HashMap<String, SubclassId>,
}

impl NormalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a class display name to its id, creating the class on first sight
    ///
    /// A failed insert leaves no cache entry behind; resolving the same name
    /// again attempts the insert again.
    pub async fn resolve_class(
        &mut self,
        conn: &mut SqliteConnection,
        display_name: &str,
    ) -> Result<ClassId, IngestError> {
        let key = natural_key(display_name);
        if let Some(id) = self.classes.get(&key) {
            return Ok(*id);
        }

        let id = entities::upsert_class(conn, &key, display_name, &class_url(&key))
            .await
            .map_err(IngestError::store_write(EntityKind::Class, &key))?;

        debug!("Class '{}' -> {}", key, id);
        self.classes.insert(key, id);
        Ok(id)
    }

    /// Resolve a subclass display name to its id, creating the subclass on first sight
    pub async fn resolve_subclass(
        &mut self,
        conn: &mut SqliteConnection,
        display_name: &str,
    ) -> Result<SubclassId, IngestError> {
        let key = natural_key(display_name);
        if let Some(id) = self.subclasses.get(&key) {
            return Ok(*id);
        }

        let id = entities::upsert_subclass(conn, &key, display_name, &subclass_url(&key))
            .await
            .map_err(IngestError::store_write(EntityKind::Subclass, &key))?;

        debug!("Subclass '{}' -> {}", key, id);
        self.subclasses.insert(key, id);
        Ok(id)
    }

    /// Cached class id for `display_name`, without touching the store
    pub fn cached_class(&self, display_name: &str) -> Option<ClassId> {
        self.classes.get(&natural_key(display_name)).copied()
    }

    /// Cached subclass id for `display_name`, without touching the store
    pub fn cached_subclass(&self, display_name: &str) -> Option<SubclassId> {
        self.subclasses.get(&natural_key(display_name)).copied()
    }

    /// Distinct class names resolved this run
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Distinct subclass names resolved this run
    pub fn subclass_count(&self) -> usize {
        self.subclasses.len()
    }
}
