//! The `quizbank init` command: starter preferences and sample data.

use std::path::Path;

use anyhow::{Context, Result};

use quizbank_core::store::BankStore;
use quizbank_storage::JsonBankStore;

use crate::{config, sample};

const SAMPLE_CONFIG: &str = r#"# quizbank preferences

# Where the question bank is stored.
data_file = "data/quizbank.json"
"#;

pub fn execute(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("{} already exists, skipping.", config_path.display());
    } else {
        std::fs::write(config_path, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!("Created {}", config_path.display());
    }

    let prefs = config::load(config_path);
    if prefs.data_file.exists() {
        println!("{} already exists, skipping.", prefs.data_file.display());
    } else {
        let store = JsonBankStore::new(&prefs.data_file);
        store
            .save(&sample::sample_bank())
            .with_context(|| format!("failed to write {}", prefs.data_file.display()))?;
        println!("Created {} with sample data", prefs.data_file.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: quizbank");
    println!("  2. Type 'help' at the prompt for the command list");

    Ok(())
}
