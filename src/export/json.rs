//! JSON import/export of the tracked catalog.
//! Saves and loads problems together with their schedules and tags.

use crate::error::Result;
use crate::models::Problem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Everything written to an export file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub exported_at: DateTime<Utc>,
    pub problems: Vec<Problem>,
}

impl Catalog {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self {
            exported_at: Utc::now(),
            problems,
        }
    }
}

/// Exports the catalog to a JSON file at the specified path.
pub fn export_json_to_path(catalog: &Catalog, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(catalog)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    log::info!(
        "Exported {} problems to '{}'",
        catalog.problems.len(),
        path.display()
    );
    Ok(())
}

/// Imports a catalog from a JSON file.
/// Fails if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: &Path) -> Result<Catalog> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let catalog: Catalog = serde_json::from_str(&contents)?;

    log::info!(
        "Read {} problems from '{}'",
        catalog.problems.len(),
        path.display()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecallError;
    use crate::models::problem::parse_tags;
    use crate::models::sm2;
    use std::fs;

    fn create_test_catalog() -> Catalog {
        let mut two_sum = Problem::new("Two Sum", 1, sm2::initialize(None));
        two_sum.url = "https://leetcode.com/problems/two-sum/".to_string();
        two_sum.tags = parse_tags("array,hashmap");

        let mut lru = Problem::new("LRU Cache", 4, sm2::initialize(Some(2.1)));
        lru.notes = "linked list + map".to_string();

        Catalog::new(vec![two_sum, lru])
    }

    #[test]
    fn test_export_json_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        export_json_to_path(&create_test_catalog(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Two Sum\""));
        assert!(written.contains("\"ease_factor\""));
    }

    #[test]
    fn test_import_json() {
        let json_content = r#"{
  "exported_at": "2024-06-01T12:00:00Z",
  "problems": [
    {
      "name": "Climbing Stairs",
      "difficulty": 1,
      "schedule": {
        "interval": 6,
        "ease_factor": 2.6,
        "last_reviewed": "2024-05-26T12:00:00Z",
        "next_review": "2024-06-01T12:00:00Z"
      },
      "tags": [{ "name": "dp" }]
    }
  ]
}"#;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        fs::write(&path, json_content).unwrap();

        let catalog = import_json(&path).unwrap();
        assert_eq!(catalog.problems.len(), 1);

        let problem = &catalog.problems[0];
        assert_eq!(problem.name, "Climbing Stairs");
        assert_eq!(problem.url, "");
        assert_eq!(problem.schedule.interval, 6);
        assert_eq!(problem.tag_names(), vec!["dp"]);
    }

    #[test]
    fn test_export_then_import_keeps_schedules() {
        let original = create_test_catalog();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        export_json_to_path(&original, &path).unwrap();
        let imported = import_json(&path).unwrap();

        assert_eq!(imported.problems, original.problems);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json(Path::new("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(RecallError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(RecallError::Json(_))));
    }
}
