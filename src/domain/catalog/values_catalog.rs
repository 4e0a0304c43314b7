//! ValuesCatalog - the read-only list of values offered by the wizard.
//!
//! The catalog is loaded once at startup, either from the bundled YAML
//! document or from an operator-supplied YAML/JSON file. Any load failure is
//! fatal: the wizard cannot run without a catalog.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::foundation::ValueId;

use super::{ValueCategory, ValueEntry};

const BUILTIN_VALUES_YAML: &str = include_str!("builtin_values.yaml");

static BUILTIN: Lazy<Result<ValuesCatalog, CatalogError>> =
    Lazy::new(|| ValuesCatalog::from_yaml_str(BUILTIN_VALUES_YAML));

/// Errors raised while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Catalog contains no values")]
    Empty,

    #[error("Duplicate value id in catalog: {0}")]
    DuplicateId(ValueId),

    #[error("Invalid catalog entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Failed to read catalog file: {0}")]
    Io(String),
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    category: ValueCategory,
}

/// Immutable, ordered catalog of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesCatalog {
    entries: Vec<ValueEntry>,
    index: HashMap<ValueId, usize>,
}

impl ValuesCatalog {
    /// Builds a catalog from entries, enforcing id uniqueness.
    pub fn from_entries(entries: Vec<ValueEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(entry.id().clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Returns the bundled default catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        BUILTIN.clone()
    }

    /// Parses a YAML sequence of `{id, name, description, category}` records.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEntry> =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Parses a JSON array of `{id, name, description, category}` records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Loads a catalog file; `.json` files are parsed as JSON, anything else as YAML.
    pub async fn load_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    fn from_raw(raw: Vec<RawEntry>) -> Result<Self, CatalogError> {
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                let id = ValueId::new(r.id).map_err(|e| CatalogError::InvalidEntry {
                    index,
                    reason: e.to_string(),
                })?;
                ValueEntry::new(id, r.name, r.description, r.category).map_err(|e| {
                    CatalogError::InvalidEntry {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    /// Returns every entry in catalog order.
    pub fn list(&self) -> &[ValueEntry] {
        &self.entries
    }

    pub fn get(&self, id: &ValueId) -> Option<&ValueEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &ValueId) -> bool {
        self.index.contains_key(id)
    }

    /// Catalog position of an id; used to keep derived lists in display order.
    pub fn position(&self, id: &ValueId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Entries of one category, in catalog order.
    pub fn by_category(&self, category: ValueCategory) -> Vec<&ValueEntry> {
        self.entries
            .iter()
            .filter(|e| e.category() == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn id(s: &str) -> ValueId {
        ValueId::new(s).unwrap()
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = ValuesCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.list()[0].id().as_str(), "honesty");
    }

    #[test]
    fn builtin_catalog_covers_every_category() {
        let catalog = ValuesCatalog::builtin().unwrap();
        for category in ValueCategory::all() {
            assert_eq!(catalog.by_category(*category).len(), 4, "{:?}", category);
        }
    }

    #[test]
    fn get_finds_entry_by_id() {
        let catalog = ValuesCatalog::builtin().unwrap();
        let entry = catalog.get(&id("compassion")).unwrap();
        assert_eq!(entry.name(), "Compassion");
        assert_eq!(entry.category(), ValueCategory::Relationship);
        assert!(catalog.get(&id("telepathy")).is_none());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let yaml = r#"
- { id: zeta, name: Zeta, category: personal }
- { id: alpha, name: Alpha, category: societal }
"#;
        let catalog = ValuesCatalog::from_yaml_str(yaml).unwrap();
        let ids: Vec<_> = catalog.list().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(catalog.position(&id("alpha")), Some(1));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
- { id: honesty, name: Honesty, category: personal }
- { id: honesty, name: Honesty again, category: personal }
"#;
        assert_eq!(
            ValuesCatalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateId(id("honesty")))
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(ValuesCatalog::from_json_str("[]"), Err(CatalogError::Empty));
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        let json = r#"[{"id": "faith", "name": "Faith", "category": "spiritual"}]"#;
        assert!(matches!(
            ValuesCatalog::from_json_str(json),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn invalid_id_reports_entry_index() {
        let json = r#"[
            {"id": "ok", "name": "Ok", "category": "personal"},
            {"id": "Not Ok", "name": "Bad", "category": "personal"}
        ]"#;
        assert!(matches!(
            ValuesCatalog::from_json_str(json),
            Err(CatalogError::InvalidEntry { index: 1, .. })
        ));
    }

    #[tokio::test]
    async fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": "kindness", "name": "Kindness", "category": "relationship"}}]"#
        )
        .unwrap();

        let catalog = ValuesCatalog::load_file(file.path()).await.unwrap();
        assert!(catalog.contains(&id("kindness")));
    }

    #[tokio::test]
    async fn load_file_reports_missing_file() {
        let result = ValuesCatalog::load_file("/nonexistent/catalog.yaml").await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
