use clap::Parser;
use datesort::cli::{Cli, run_cli};
use datesort::output::OutputFormatter;
use std::env;
use std::process;

fn main() {
    let _cli = Cli::parse();

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            OutputFormatter::error(&format!("getting working directory: {}", e));
            process::exit(1);
        }
    };

    if let Err(e) = run_cli(&cwd) {
        OutputFormatter::error(&e.to_string());
        process::exit(1);
    }
}
