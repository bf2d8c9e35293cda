//! Check dispatch shared by the command-line tools.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::catalog::StandardPartsCatalog;
use crate::checks::tool_version::{DEFAULT_GENERATOR, DEFAULT_GENERATOR_VERSIONS};
use crate::checks::{
    Check, CheckKind, PartNumberPresenceCheck, RevisionFormatCheck, StandardPartsCheck,
    TodoMarkerCheck, ToolVersionCheck, ValueFormatCheck, ViolationReport,
};
use crate::parser::kicad::{KicadParseError, KicadParser};

pub const DEFAULT_PART_NUMBER_FIELD: &str = "Part_Number";

#[derive(Debug, thiserror::Error)]
pub enum SchemCheckError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
    #[error("{0}")]
    UnsupportedFormat(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchemCheckError {
    /// Configuration errors come from how the tool was invoked, not from
    /// the files it was pointed at.
    pub fn is_config(&self) -> bool {
        matches!(self, SchemCheckError::Config(_))
    }
}

impl From<KicadParseError> for SchemCheckError {
    fn from(e: KicadParseError) -> Self {
        match e {
            KicadParseError::Io(io) => SchemCheckError::Io(io),
            KicadParseError::UnsupportedFormat(msg) => SchemCheckError::UnsupportedFormat(msg),
            other => SchemCheckError::Parse(other.to_string()),
        }
    }
}

impl From<calamine::Error> for SchemCheckError {
    fn from(e: calamine::Error) -> Self {
        SchemCheckError::Spreadsheet(e.to_string())
    }
}

/// Settings for a check run.
#[derive(Clone, Debug)]
pub struct CheckOptions {
    /// Spreadsheet with the standard parts list; required by `StandardParts`.
    pub standard_parts: Option<PathBuf>,
    pub part_number_field: String,
    pub expected_generator: String,
    pub generator_versions: Range<f64>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            standard_parts: None,
            part_number_field: DEFAULT_PART_NUMBER_FIELD.to_string(),
            expected_generator: DEFAULT_GENERATOR.to_string(),
            generator_versions: DEFAULT_GENERATOR_VERSIONS,
        }
    }
}

pub struct SchemCheckCore;

impl SchemCheckCore {
    /// Build the check for `kind`. The standard parts check loads its
    /// catalog here, so a missing or unreadable spreadsheet is reported
    /// before the schematic is read.
    pub fn build_check(
        kind: CheckKind,
        options: &CheckOptions,
    ) -> Result<Box<dyn Check>, SchemCheckError> {
        let field = options.part_number_field.clone();
        let check: Box<dyn Check> = match kind {
            CheckKind::Values => Box::new(ValueFormatCheck),
            CheckKind::PartNumbers => Box::new(PartNumberPresenceCheck::new(field)),
            CheckKind::Todo => Box::new(TodoMarkerCheck::new(field)),
            CheckKind::ToolVersion => Box::new(ToolVersionCheck::new(
                options.expected_generator.clone(),
                options.generator_versions.clone(),
            )),
            CheckKind::Revision => Box::new(RevisionFormatCheck),
            CheckKind::StandardParts => {
                let path = options.standard_parts.as_deref().ok_or_else(|| {
                    SchemCheckError::Config(
                        "the standard parts check needs a spreadsheet (--standard-parts-excel)"
                            .to_string(),
                    )
                })?;
                let catalog = StandardPartsCatalog::load(path)?;
                Box::new(StandardPartsCheck::new(catalog, field))
            }
        };
        Ok(check)
    }

    /// Load `path` and run a single check over it.
    pub fn run_check(
        path: &Path,
        kind: CheckKind,
        options: &CheckOptions,
    ) -> Result<ViolationReport, SchemCheckError> {
        let check = Self::build_check(kind, options)?;
        let document = KicadParser::parse_schematic(path)?;

        tracing::debug!(check = %kind, file = %path.display(), "Running check");
        let report = check.run(&document);
        tracing::info!(check = %kind, violations = report.count(), "Check finished");
        Ok(report)
    }
}
