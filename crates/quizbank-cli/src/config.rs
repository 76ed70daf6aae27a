//! Preferences file loading.
//!
//! The core never sees configuration; this is strictly a CLI concern. A
//! missing file means defaults, a malformed file is a warning plus
//! defaults, never a crash.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Where the question bank JSON lives.
    pub data_file: PathBuf,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/quizbank.json"),
        }
    }
}

/// Loads preferences from `path`, falling back to defaults.
pub fn load(path: &Path) -> Preferences {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("no preferences file at {}, using defaults", path.display());
            return Preferences::default();
        }
        Err(e) => {
            tracing::warn!("could not read {}: {e}; using defaults", path.display());
            return Preferences::default();
        }
    };

    match toml::from_str(&raw) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!("malformed preferences in {}: {e}; using defaults", path.display());
            Preferences::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load(&dir.path().join("quizbank.toml"));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn data_file_is_read_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizbank.toml");
        std::fs::write(&path, "data_file = \"elsewhere/bank.json\"\n").unwrap();
        assert_eq!(load(&path).data_file, PathBuf::from("elsewhere/bank.json"));
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizbank.toml");
        std::fs::write(&path, "data_file = [not toml").unwrap();
        assert_eq!(load(&path), Preferences::default());
    }
}
