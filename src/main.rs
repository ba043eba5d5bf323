//! # comparefiles CLI
//!
//! Command-line interface for finding identical and similar files.
//!
//! ## Usage
//! ```bash
//! comparefiles --identical .txt
//! comparefiles --similar .md --directory ~/notes --sort --algorithm token_set_ratio
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
