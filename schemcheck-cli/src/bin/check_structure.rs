//! check-structure - verify the folder layout of a KiCad project.

#[path = "../logging.rs"]
mod logging;

use clap::error::ErrorKind;
use clap::Parser;
use schemcheck::check_production_folder;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "check-structure")]
#[command(about = "Validate expected KiCad project folder structure", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root to validate
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
}

fn main() {
    let cli = parse_args();
    logging::init();
    tracing::debug!(root = %cli.root.display(), "Checking project structure");

    match check_production_folder(&cli.root) {
        Some(problem) => {
            println!("{}", problem);
            process::exit(1);
        }
        None => process::exit(0),
    }
}

/// Usage errors exit with 1, matching check-schematic.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    }
}
