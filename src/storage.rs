//! Filename → line persistence, one JSON file as the key/value store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::Line;

#[derive(Default, Serialize, Deserialize)]
struct StoreFile {
    lines: BTreeMap<String, Line>,
}

/// Durable store for completed annotations, read in bulk once per session
/// and upserted one entry at a time. A missing or broken store never fails
/// the caller: reads degrade to empty, writes degrade to in-memory-only.
pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Bulk read of every persisted line.
    pub fn load_all(&self) -> BTreeMap<String, Line> {
        if !self.path.exists() {
            return BTreeMap::new();
        }
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                warn!("line store {} unreadable: {err}", self.path.display());
                return BTreeMap::new();
            }
        };
        match serde_json::from_str::<StoreFile>(&data) {
            Ok(file) => file.lines,
            Err(err) => {
                warn!(
                    "line store {} corrupted, starting empty: {err}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }

    /// Upserts one entry, durable before return. On write failure the
    /// annotation stays usable in memory for the session; it just will not
    /// survive a reload.
    pub fn save_one(&self, file_name: &str, line: Line) {
        let mut lines = self.load_all();
        lines.insert(file_name.to_owned(), line);
        match serde_json::to_string_pretty(&StoreFile { lines }) {
            Ok(data) => {
                if let Err(err) = std::fs::write(&self.path, data) {
                    warn!("could not persist line for {file_name}: {err}");
                }
            }
            Err(err) => warn!("could not serialize line store: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn line(x: f32, y: f32) -> Line {
        Line::new(Point::new(0.0, 0.0), Point::new(x, y))
    }

    fn store_in(dir: &tempfile::TempDir) -> LineStore {
        LineStore::new(dir.path().join("lines.json"))
    }

    #[test]
    fn load_all_on_missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load_all().is_empty());
    }

    #[test]
    fn save_then_fresh_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).save_one("a.png", line(10.0, 10.0));

        let reloaded = store_in(&dir).load_all();
        assert_eq!(reloaded.get("a.png"), Some(&line(10.0, 10.0)));
    }

    #[test]
    fn save_one_keeps_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_one("a.png", line(1.0, 1.0));
        store.save_one("b.png", line(2.0, 2.0));

        let all = store.load_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get("a.png"), Some(&line(1.0, 1.0)));
    }

    #[test]
    fn saving_the_same_pair_twice_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_one("a.png", line(5.0, 5.0));
        let before = store.load_all();
        store.save_one("a.png", line(5.0, 5.0));
        assert_eq!(store.load_all(), before);
    }

    #[test]
    fn corrupted_store_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(LineStore::new(&path).load_all().is_empty());
    }
}
