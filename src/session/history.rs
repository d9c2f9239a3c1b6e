use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::mode::FocusMode;

const HISTORY_FILE: &str = "history.json";
const LEGACY_HISTORY_FILE: &str = "sessions.json";

/// One completed focus session. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub mode: FocusMode,
    pub start_time: u64,
    pub duration_seconds: u64,
    pub tracks: Vec<String>,
}

impl SessionRecord {
    pub fn new(mode: FocusMode, start_time: u64, tracks: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mode,
            start_time,
            duration_seconds: mode.duration_seconds(),
            tracks,
        }
    }
}

pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub trait HistoryStore: Send {
    fn load(&self) -> std::io::Result<Option<Vec<SessionRecord>>>;
    fn save(&mut self, records: &[SessionRecord]) -> std::io::Result<()>;
    /// Records persisted under the pre-rename location, if any.
    fn load_legacy(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
        Ok(None)
    }
}

/// Whole-file JSON persistence in the platform data directory. Writes are
/// wholesale on every change; there is no cross-instance locking.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn open_default() -> color_eyre::Result<Self> {
        Ok(Self::new(crate::util::paths::data_dir()?))
    }

    fn read(&self, name: &str) -> std::io::Result<Option<Vec<SessionRecord>>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)?;
        match serde_json::from_str(&data) {
            Ok(records) => Ok(Some(records)),
            Err(e) => {
                warn!("discarding unreadable history file {name}: {e}");
                Ok(None)
            }
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
        self.read(HISTORY_FILE)
    }

    fn load_legacy(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
        self.read(LEGACY_HISTORY_FILE)
    }

    fn save(&mut self, records: &[SessionRecord]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let data = serde_json::to_string_pretty(records)?;
        std::fs::write(self.dir.join(HISTORY_FILE), data)
    }
}

/// In-memory log of completed sessions, newest first, flushed to the store
/// on every change.
pub struct SessionHistory {
    records: Vec<SessionRecord>,
    store: Box<dyn HistoryStore>,
}

impl SessionHistory {
    /// Hydrates from the store. When only the legacy file exists its
    /// records are adopted and re-persisted under the current name.
    pub fn load(mut store: Box<dyn HistoryStore>) -> Self {
        let records = match store.load() {
            Ok(Some(records)) => records,
            Ok(None) => match store.load_legacy() {
                Ok(Some(legacy)) => {
                    info!("migrating {} legacy session records", legacy.len());
                    if let Err(e) = store.save(&legacy) {
                        warn!("failed to persist migrated history: {e}");
                    }
                    legacy
                }
                Ok(None) => Vec::new(),
                Err(e) => {
                    warn!("failed to read legacy history: {e}");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("failed to read history: {e}");
                Vec::new()
            }
        };

        Self { records, store }
    }

    pub fn record(&mut self, record: SessionRecord) {
        self.records.insert(0, record);
        if let Err(e) = self.store.save(&self.records) {
            warn!("failed to persist history: {e}");
        }
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Store double keyed like the file store, shared across "restarts".
    #[derive(Default, Clone)]
    struct MemoryStore {
        files: Arc<Mutex<HashMap<&'static str, String>>>,
    }

    impl MemoryStore {
        fn put(&self, name: &'static str, records: &[SessionRecord]) {
            self.files
                .lock()
                .unwrap()
                .insert(name, serde_json::to_string(records).unwrap());
        }

        fn get(&self, name: &str) -> Option<Vec<SessionRecord>> {
            self.files
                .lock()
                .unwrap()
                .get(name)
                .map(|data| serde_json::from_str(data).unwrap())
        }
    }

    impl HistoryStore for MemoryStore {
        fn load(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
            Ok(self.get("history.json"))
        }

        fn load_legacy(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
            Ok(self.get("sessions.json"))
        }

        fn save(&mut self, records: &[SessionRecord]) -> std::io::Result<()> {
            self.put("history.json", records);
            Ok(())
        }
    }

    fn record(title: &str) -> SessionRecord {
        SessionRecord::new(FocusMode::Light, 1_700_000_000_000, vec![title.to_string()])
    }

    #[test]
    fn records_round_trip_in_order() {
        let store = MemoryStore::default();
        let mut history = SessionHistory::load(Box::new(store.clone()));
        for title in ["NIGHT_DRIVE", "VOID_ECHO", "PULSE_WIDTH"] {
            history.record(record(title));
        }

        let reloaded = SessionHistory::load(Box::new(store));
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.records(), history.records());
        // Newest first.
        assert_eq!(reloaded.records()[0].tracks, vec!["PULSE_WIDTH"]);
    }

    #[test]
    fn record_carries_configured_duration() {
        let r = record("NIGHT_DRIVE");
        assert_eq!(r.duration_seconds, 900);
        assert_eq!(r.mode, FocusMode::Light);
    }

    #[test]
    fn legacy_file_is_migrated_not_dropped() {
        let store = MemoryStore::default();
        store.put("sessions.json", &[record("VOID_ECHO")]);

        let history = SessionHistory::load(Box::new(store.clone()));
        assert_eq!(history.len(), 1);
        // Re-persisted under the current name.
        assert!(store.get("history.json").is_some());
    }

    #[test]
    fn current_file_wins_over_legacy() {
        let store = MemoryStore::default();
        store.put("sessions.json", &[record("OLD")]);
        store.put("history.json", &[record("NEW"), record("NEWER")]);

        let history = SessionHistory::load(Box::new(store));
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].tracks, vec!["NEW"]);
    }

    #[test]
    fn empty_store_hydrates_empty() {
        let history = SessionHistory::load(Box::new(MemoryStore::default()));
        assert!(history.is_empty());
    }
}
