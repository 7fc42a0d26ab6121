// the high score lives in a small YAML key-value file so other values can
// share it later; the score itself is stored as a decimal string
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::log;

pub const HIGH_SCORE_KEY: &str = "snake-highscore";

pub trait HighScoreStore {
    /// Stored high score, 0 when absent or unreadable.
    fn load(&self) -> u32;
    /// Fire and forget, failures are logged and otherwise ignored.
    fn store(&self, high_score: u32);
}

pub struct FileHighScoreStore {
    file_path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_yaml_ng::from_str(&content)
                .map_err(|e| format!("Failed to parse data file: {}", e)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(format!("Failed to read data file: {}", err)),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        let content = serde_yaml_ng::to_string(entries)
            .map_err(|e| format!("Failed to serialize data file: {}", e))?;
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write data file: {}", e))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        match self.read_entries() {
            Ok(entries) => entries
                .get(HIGH_SCORE_KEY)
                .and_then(|value| parse_high_score(value))
                .unwrap_or(0),
            Err(e) => {
                log!("{}, starting with high score 0", e);
                0
            }
        }
    }

    fn store(&self, high_score: u32) {
        // keep whatever else lives in the file, start over if it is corrupt
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(HIGH_SCORE_KEY.to_string(), high_score.to_string());
        if let Err(e) = self.write_entries(&entries) {
            log!("{}, high score {} kept in memory only", e, high_score);
        }
    }
}

/// Session-only store with no file behind it. The file store already keeps
/// the high score in memory when its file cannot be written.
#[derive(Default)]
pub struct MemoryHighScoreStore {
    value: RefCell<Option<String>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: &str) -> Self {
        Self {
            value: RefCell::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.raw()
            .as_deref()
            .and_then(parse_high_score)
            .unwrap_or(0)
    }

    fn store(&self, high_score: u32) {
        *self.value.borrow_mut() = Some(high_score.to_string());
    }
}

fn parse_high_score(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
