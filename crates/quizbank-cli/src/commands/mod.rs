//! CLI subcommand implementations.

use std::path::Path;

use anyhow::Result;

use quizbank_core::engine::Engine;
use quizbank_core::model::QuestionBank;
use quizbank_storage::JsonBankStore;

use crate::{config, sample};

pub mod exec;
pub mod init;
pub mod repl;

/// Loads preferences and the stored bank, then wires up the engine.
///
/// A missing data file seeds the sample bank; a corrupt one is reported
/// and the session starts empty rather than refusing to run.
pub(crate) fn bootstrap(config_path: &Path) -> Result<Engine> {
    let prefs = config::load(config_path);
    let store = JsonBankStore::new(&prefs.data_file);

    let bank = match store.load() {
        Ok(Some(bank)) => bank,
        Ok(None) => {
            tracing::info!(
                "no data file at {}, starting with sample data",
                prefs.data_file.display()
            );
            sample::sample_bank()
        }
        Err(e) => {
            tracing::warn!(
                "could not load {}: {e}; starting with an empty bank",
                prefs.data_file.display()
            );
            QuestionBank::default()
        }
    };

    Ok(Engine::new(bank, Box::new(store)))
}
