//! Example: load a schematic once and run every check that needs no spreadsheet.
//! Run with: cargo run --example run_check [path/to/file.kicad_sch]

use schemcheck::{parse_schematic, Check, CheckKind, CheckOptions, SchemCheckCore};
use std::path::Path;

fn main() -> Result<(), schemcheck::SchemCheckError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/messy_design.kicad_sch".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example run_check [path/to/file.kicad_sch]");
        std::process::exit(1);
    }

    let schematic = parse_schematic(path)?;
    let options = CheckOptions::default();
    let mut total = 0;

    for kind in CheckKind::ALL.into_iter().filter(|k| !k.needs_catalog()) {
        let report = SchemCheckCore::build_check(kind, &options)?.run(&schematic);
        println!("[{}] {}: {} violation(s)", kind.flag(), kind, report.count());
        for line in report.messages() {
            println!("    {}", line);
        }
        total += report.count();
    }

    if total > 0 {
        std::process::exit(1);
    }
    Ok(())
}
