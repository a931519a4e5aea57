//! Project → client lookup table.
//!
//! Loaded from a Toggl projects JSON export: an array of objects with
//! `name` and `client_name` fields. Used during emission to resolve the
//! Clockify `Client` column.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors loading a projects file.
#[derive(Debug, Error)]
pub enum ProjectMapError {
    #[error("failed to read projects file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid projects JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ProjectRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    client_name: String,
}

/// Read-only mapping from project name to client name.
#[derive(Debug, Default)]
pub struct ProjectMap {
    map: HashMap<String, String>,
}

impl ProjectMap {
    /// Loads the mapping from a projects JSON file.
    pub fn load(path: &Path) -> Result<Self, ProjectMapError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Parses the mapping from a reader. Records without a name are ignored.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ProjectMapError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        let records: Vec<ProjectRecord> = serde_json::from_str(&buf)?;

        let map = records
            .into_iter()
            .filter(|record| !record.name.is_empty())
            .map(|record| (record.name, record.client_name))
            .collect();
        Ok(Self { map })
    }

    /// Looks up the client for a project name.
    #[must_use]
    pub fn client_for(&self, project: &str) -> Option<&str> {
        self.map.get(project).map(String::as_str)
    }

    /// Number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn maps_project_to_client() {
        let json = r#"[
            {"name": "Acme Website", "client_name": "Acme Corp"},
            {"name": "Internal", "client_name": ""}
        ]"#;
        let map = ProjectMap::from_reader(Cursor::new(json)).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.client_for("Acme Website"), Some("Acme Corp"));
        assert_eq!(map.client_for("Internal"), Some(""));
        assert_eq!(map.client_for("Missing"), None);
    }

    #[test]
    fn skips_unnamed_records() {
        let json = r#"[
            {"client_name": "Orphan Client"},
            {"name": "", "client_name": "Also Orphan"},
            {"name": "Real", "client_name": "Client"}
        ]"#;
        let map = ProjectMap::from_reader(Cursor::new(json)).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.client_for("Real"), Some("Client"));
    }

    #[test]
    fn missing_client_name_defaults_to_empty() {
        let json = r#"[{"name": "Solo"}]"#;
        let map = ProjectMap::from_reader(Cursor::new(json)).unwrap();
        assert_eq!(map.client_for("Solo"), Some(""));
    }

    #[test]
    fn rejects_invalid_json() {
        let result = ProjectMap::from_reader(Cursor::new("{not json"));
        assert!(matches!(result, Err(ProjectMapError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, r#"[{"name": "P", "client_name": "C"}]"#).unwrap();

        let map = ProjectMap::load(&path).unwrap();
        assert_eq!(map.client_for("P"), Some("C"));

        assert!(matches!(
            ProjectMap::load(&dir.path().join("missing.json")),
            Err(ProjectMapError::Io(_))
        ));
    }
}
