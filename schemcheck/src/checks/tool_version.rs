use std::ops::Range;

use crate::checks::{Check, CheckKind, ViolationReport};
use crate::parser::schema::SchematicDocument;

pub const DEFAULT_GENERATOR: &str = "eeschema";
pub const DEFAULT_GENERATOR_VERSIONS: Range<f64> = 9.0..10.0;

/// The schematic must have been saved by the expected editor release, so
/// that everyone on the project reads and writes the same file format.
pub struct ToolVersionCheck {
    generator: String,
    versions: Range<f64>,
}

impl ToolVersionCheck {
    pub fn new(generator: impl Into<String>, versions: Range<f64>) -> Self {
        Self {
            generator: generator.into(),
            versions,
        }
    }
}

impl Default for ToolVersionCheck {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATOR, DEFAULT_GENERATOR_VERSIONS)
    }
}

impl Check for ToolVersionCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::ToolVersion
    }

    fn run(&self, document: &SchematicDocument) -> ViolationReport {
        let mut report = ViolationReport::new(self.kind());

        let generator = document.generator.as_deref().unwrap_or("<none>");
        if generator != self.generator {
            report.add(
                None,
                format!(
                    "Schematic generator is '{}', expected '{}'.",
                    generator, self.generator
                ),
            );
            return report;
        }

        let raw = document.generator_version.as_deref().map(str::trim);
        match raw.map(|v| (v, v.parse::<f64>())) {
            None => report.add(
                None,
                "Schematic generator version not found; save it with KiCad 9.".to_string(),
            ),
            Some((v, Err(_))) => report.add(
                None,
                format!("Schematic generator version '{}' is not a number.", v),
            ),
            Some((v, Ok(version))) if !self.versions.contains(&version) => report.add(
                None,
                format!(
                    "Schematic generator version {} is outside the supported range [{}, {}).",
                    v, self.versions.start, self.versions.end
                ),
            ),
            Some(_) => {}
        }

        report
    }
}
