//! The interactive session: read a line, execute, report.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::render;

pub fn execute(config_path: &Path) -> Result<()> {
    let mut engine = super::bootstrap(config_path)?;

    println!("Welcome to quizbank. Type 'help' for the command list, 'exit' to leave.");
    println!("{}", render::view_table(&engine.filtered()));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF behaves like exit.
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match engine.execute(input) {
            Ok(outcome) => {
                println!("{}", outcome.feedback);
                if outcome.refresh_view {
                    println!("{}", render::view_table(&engine.filtered()));
                }
                if outcome.exit {
                    break;
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
