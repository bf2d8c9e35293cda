//! check-schematic - KiCad schematic metadata checks for CI pipelines.

mod logging;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use schemcheck::{
    CheckKind, CheckOptions, SchemCheckCore, SchemCheckError, ViolationReport,
    DEFAULT_PART_NUMBER_FIELD,
};
use std::path::{Path, PathBuf};
use std::process;

const EXIT_OK: i32 = 0;
/// Violations found, or the tool was invoked incorrectly.
const EXIT_FAILURE: i32 = 1;
/// The schematic or spreadsheet could not be read.
const EXIT_INPUT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "check-schematic")]
#[command(about = "Check KiCad schematic metadata (values, part numbers, revision, tool version)", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the .kicad_sch schematic to check
    #[arg(short, long, value_name = "FILE", required_unless_present = "list_checks")]
    schematic: Option<PathBuf>,

    /// Check to run: v (values), p (part numbers), t (TODO markers),
    /// k (tool version), r (revision), s (standard parts)
    #[arg(short = 'c', long, value_name = "TYPE", required_unless_present = "list_checks")]
    check_type: Option<CheckKind>,

    /// Standard parts spreadsheet (.xlsx/.xls/.ods), required for check type s
    #[arg(short = 'x', long, value_name = "FILE", env = "SCHEMCHECK_STANDARD_PARTS")]
    standard_parts_excel: Option<PathBuf>,

    /// Symbol property that holds the manufacturer part number
    #[arg(
        long,
        value_name = "NAME",
        default_value = DEFAULT_PART_NUMBER_FIELD,
        env = "SCHEMCHECK_PART_NUMBER_FIELD"
    )]
    part_number_field: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// List the available checks and exit
    #[arg(long)]
    list_checks: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One line per violation plus a summary line
    Human,
    /// JSON report for tooling
    Json,
    /// GitHub Actions annotations
    Github,
}

fn main() {
    let cli = parse_args();
    logging::init();

    if cli.list_checks {
        handle_list_checks();
        process::exit(EXIT_OK);
    }

    let (Some(schematic), Some(kind)) = (cli.schematic, cli.check_type) else {
        eprintln!("Error: both --schematic and --check-type are required");
        process::exit(EXIT_FAILURE);
    };

    let options = CheckOptions {
        standard_parts: cli.standard_parts_excel,
        part_number_field: cli.part_number_field,
        ..Default::default()
    };

    process::exit(handle_check(&schematic, kind, &options, &cli.format));
}

/// Usage errors exit with 1 like any other configuration problem, instead
/// of clap's default of 2, which is reserved for unreadable input.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_FAILURE,
            };
            let _ = e.print();
            process::exit(code);
        }
    }
}

fn handle_check(path: &Path, kind: CheckKind, options: &CheckOptions, format: &OutputFormat) -> i32 {
    tracing::debug!(
        schematic = %path.display(),
        check = %kind,
        standard_parts = ?options.standard_parts,
        part_number_field = %options.part_number_field,
        "Resolved check options"
    );
    match SchemCheckCore::run_check(path, kind, options) {
        Ok(report) => {
            for note in &report.notes {
                eprintln!("{}", note);
            }
            output_report(path, &report, format);
            if report.is_clean() {
                EXIT_OK
            } else {
                EXIT_FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            tracing::debug!(config = e.is_config(), "Check could not run");
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &SchemCheckError) -> i32 {
    if error.is_config() {
        EXIT_FAILURE
    } else {
        EXIT_INPUT_ERROR
    }
}

fn output_report(path: &Path, report: &ViolationReport, format: &OutputFormat) {
    match format {
        OutputFormat::Human => output_human(report),
        OutputFormat::Json => output_json(path, report),
        OutputFormat::Github => output_github(path, report),
    }
}

fn output_human(report: &ViolationReport) {
    for line in report.messages() {
        println!("{}", line);
    }
    print_summary(report);
}

fn print_summary(report: &ViolationReport) {
    if !report.is_clean() {
        println!("Found {} errors in schematic.", report.count());
    }
}

fn output_json(path: &Path, report: &ViolationReport) {
    let output = serde_json::json!({
        "file": path.display().to_string(),
        "check": report.check,
        "count": report.count(),
        "violations": report.violations,
    });
    println!("{:#}", output);
}

fn output_github(path: &Path, report: &ViolationReport) {
    for line in report.messages() {
        println!(
            "::error file={},title=schematic {}::{}",
            path.display(),
            report.check,
            line.replace('\n', " ")
        );
    }
    print_summary(report);
}

fn handle_list_checks() {
    println!("Available checks:\n");
    for kind in CheckKind::ALL {
        println!("  {}  {}", kind.flag(), kind.id());
        println!("     {}", kind.description());
        if kind.needs_catalog() {
            println!("     Requires --standard-parts-excel");
        }
        println!();
    }
}
