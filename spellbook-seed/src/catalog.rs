//! Spell catalog decoding
//!
//! The catalog is a JSON array of spell objects. Decoding checks shape only:
//! semantic problems such as an out-of-range level surface later, when the
//! store rejects the row.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::error::IngestError;

/// Reference to a class or subclass by display name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameRef {
    pub name: String,
}

/// One spell object from the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpellRecord {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub higher_level: Vec<String>,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub ritual: bool,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub casting_time: String,
    pub level: i64,
    #[serde(default)]
    pub attack_type: String,
    /// Carried through to the store verbatim
    #[serde(default)]
    pub damage: Value,
    /// Carried through to the store verbatim
    #[serde(default)]
    pub school: Value,
    #[serde(default)]
    pub classes: Vec<NameRef>,
    #[serde(default)]
    pub subclasses: Vec<NameRef>,
    #[serde(default)]
    pub url: String,
}

/// Decode catalog bytes into records, preserving input order
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<SpellRecord>, IngestError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and decode a catalog file
pub fn load_catalog(path: &Path) -> Result<Vec<SpellRecord>, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_catalog(&bytes)?;
    info!("Decoded {} spells from {}", records.len(), path.display());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_record_uses_defaults() {
        let records =
            parse_catalog(br#"[{"index":"fireball","name":"Fireball","level":3}]"#).unwrap();

        assert_eq!(records.len(), 1);
        let spell = &records[0];
        assert_eq!(spell.index, "fireball");
        assert_eq!(spell.level, 3);
        assert!(spell.desc.is_empty());
        assert!(spell.classes.is_empty());
        assert!(!spell.ritual);
        assert_eq!(spell.damage, Value::Null);
        assert_eq!(spell.url, "");
    }

    #[test]
    fn test_parse_full_record() {
        let json = br#"[{
            "index": "acid-arrow",
            "name": "Acid Arrow",
            "desc": ["A shimmering green arrow streaks toward a target."],
            "higher_level": ["The damage increases by 1d4."],
            "range": "90 feet",
            "components": ["V", "S", "M"],
            "material": "Powdered rhubarb leaf and an adder's stomach.",
            "ritual": false,
            "duration": "Instantaneous",
            "concentration": false,
            "casting_time": "1 action",
            "level": 2,
            "attack_type": "ranged",
            "damage": {"damage_type": {"index": "acid", "name": "Acid"}},
            "school": {"index": "evocation", "name": "Evocation"},
            "classes": [{"name": "Wizard"}],
            "subclasses": [{"name": "Lore"}, {"name": "Land"}],
            "url": "/api/spells/acid-arrow",
            "updated_at": "2024-01-01T00:00:00Z"
        }]"#;

        let records = parse_catalog(json).unwrap();
        let spell = &records[0];
        assert_eq!(spell.components, vec!["V", "S", "M"]);
        assert_eq!(spell.school["index"], "evocation");
        assert_eq!(spell.damage["damage_type"]["name"], "Acid");
        assert_eq!(spell.subclasses.len(), 2);
        assert_eq!(spell.subclasses[1].name, "Land");
    }

    #[test]
    fn test_parse_preserves_order() {
        let records = parse_catalog(
            br#"[{"index":"b","name":"B","level":1},{"index":"a","name":"A","level":0}]"#,
        )
        .unwrap();
        let indexes: Vec<_> = records.iter().map(|r| r.index.as_str()).collect();
        assert_eq!(indexes, ["b", "a"]);
    }

    #[test]
    fn test_negative_level_is_not_a_shape_error() {
        let records = parse_catalog(br#"[{"index":"x","name":"X","level":-1}]"#).unwrap();
        assert_eq!(records[0].level, -1);
    }

    #[test]
    fn test_malformed_catalogs_rejected() {
        let inputs: [&[u8]; 5] = [
            b"not json",
            br#"{"index":"x","name":"X","level":1}"#,
            br#"[{"name":"No Index","level":1}]"#,
            br#"[{"index":"x","name":"X","level":"three"}]"#,
            br#"[1, 2, 3]"#,
        ];

        for bad in inputs {
            let err = parse_catalog(bad).unwrap_err();
            assert!(matches!(err, IngestError::MalformedCatalog(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_load_catalog_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("spells.json");
        std::fs::write(&path, br#"[{"index":"light","name":"Light","level":0}]"#).unwrap();

        let records = load_catalog(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Light");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/spells.json")).unwrap_err();
        match err {
            IngestError::CatalogRead { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/spells.json"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
