//! One-shot command execution, the scriptable surface.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::render;

pub fn execute(config_path: &Path, line: &str) -> Result<()> {
    let mut engine = super::bootstrap(config_path)?;

    let outcome = engine
        .execute(line)
        .map_err(|e| anyhow!("{e}"))?;

    println!("{}", outcome.feedback);
    if outcome.refresh_view {
        println!("{}", render::view_table(&engine.filtered()));
    }

    Ok(())
}
