//! Row counts for the loaded tables

use serde::Serialize;
use sqlx::SqlitePool;

/// Tables reported by the stats lookup, in display order
const REPORTED_TABLES: [&str; 6] = [
    "spells",
    "classes",
    "subclasses",
    "spell_classes",
    "spell_subclasses",
    "caster_progression",
];

/// Row count of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub name: &'static str,
    pub row_count: i64,
}

/// Count rows of every catalog table
pub async fn table_counts(pool: &SqlitePool) -> sqlx::Result<Vec<TableCount>> {
    let mut counts = Vec::with_capacity(REPORTED_TABLES.len());

    for name in REPORTED_TABLES {
        // Table names come from the fixed list above, never from a request
        let row_count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", name))
            .fetch_one(pool)
            .await?;

        counts.push(TableCount { name, row_count });
    }

    Ok(counts)
}
