//! Metadata checks over a loaded schematic.
//!
//! Each check is an independent pass over [`SchematicDocument`] that
//! produces a [`ViolationReport`]. Checks hold their configuration (part
//! number field, catalog, expected tool) but no state between runs, so
//! running a check twice on the same document yields the same report.

pub mod part_numbers;
pub mod patterns;
pub mod revision;
pub mod standard_parts;
pub mod todo;
pub mod tool_version;
pub mod values;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::parser::schema::SchematicDocument;

pub use part_numbers::PartNumberPresenceCheck;
pub use revision::RevisionFormatCheck;
pub use standard_parts::StandardPartsCheck;
pub use todo::TodoMarkerCheck;
pub use tool_version::ToolVersionCheck;
pub use values::ValueFormatCheck;

/// The available checks, selected on the command line by a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    Values,
    PartNumbers,
    Todo,
    ToolVersion,
    Revision,
    StandardParts,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::Values,
        CheckKind::PartNumbers,
        CheckKind::Todo,
        CheckKind::ToolVersion,
        CheckKind::Revision,
        CheckKind::StandardParts,
    ];

    pub fn flag(self) -> char {
        match self {
            CheckKind::Values => 'v',
            CheckKind::PartNumbers => 'p',
            CheckKind::Todo => 't',
            CheckKind::ToolVersion => 'k',
            CheckKind::Revision => 'r',
            CheckKind::StandardParts => 's',
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            CheckKind::Values => "values",
            CheckKind::PartNumbers => "part-numbers",
            CheckKind::Todo => "todo",
            CheckKind::ToolVersion => "tool-version",
            CheckKind::Revision => "revision",
            CheckKind::StandardParts => "standard-parts",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CheckKind::Values => "Component values use engineering notation (10k, 4.7u, 2.2Meg)",
            CheckKind::PartNumbers => "Components valued N/A carry a non-empty part number",
            CheckKind::Todo => "No TODO values or TODO part numbers remain",
            CheckKind::ToolVersion => "Schematic was saved by eeschema 9.x",
            CheckKind::Revision => "Title block revision has the form <major>.<minor>",
            CheckKind::StandardParts => "Part numbers appear in the standard parts spreadsheet",
        }
    }

    /// Whether the check needs the standard parts spreadsheet.
    pub fn needs_catalog(self) -> bool {
        matches!(self, CheckKind::StandardParts)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check type '{0}' (expected one of v, p, t, k, r, s)")]
pub struct UnknownCheckKind(pub String);

impl FromStr for CheckKind {
    type Err = UnknownCheckKind;

    /// Accepts the single-letter flag or the long id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| {
                s.eq_ignore_ascii_case(kind.id())
                    || (s.len() == 1 && s.starts_with(kind.flag()))
            })
            .ok_or_else(|| UnknownCheckKind(s.to_string()))
    }
}

/// One failed expectation, usually tied to a component reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub check_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub message: String,
}

/// Ordered violations from one check run, plus notes meant for the
/// diagnostic stream rather than the primary output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationReport {
    pub check: CheckKind,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ViolationReport {
    pub fn new(check: CheckKind) -> Self {
        Self {
            check,
            violations: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn add(&mut self, reference: Option<&str>, message: String) {
        self.violations.push(Violation {
            check_id: self.check.id().to_string(),
            reference: reference.map(str::to_string),
            message,
        });
    }

    pub fn note(&mut self, note: String) {
        self.notes.push(note);
    }

    pub fn count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }
}

pub trait Check: Send + Sync {
    fn kind(&self) -> CheckKind;

    fn run(&self, document: &SchematicDocument) -> ViolationReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_flag_and_id() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.flag().to_string().parse::<CheckKind>(), Ok(kind));
            assert_eq!(kind.id().parse::<CheckKind>(), Ok(kind));
        }
        assert_eq!("S".parse::<CheckKind>(), Err(UnknownCheckKind("S".to_string())));
        assert!("x".parse::<CheckKind>().is_err());
        assert!("".parse::<CheckKind>().is_err());
        assert!("vp".parse::<CheckKind>().is_err());
    }

    #[test]
    fn test_report_counts() {
        let mut report = ViolationReport::new(CheckKind::Todo);
        assert!(report.is_clean());
        report.add(Some("U1"), "Component U1 has a TODO value.".to_string());
        report.note("checked 1 component".to_string());
        assert_eq!(report.count(), 1);
        assert_eq!(report.violations[0].check_id, "todo");
        assert_eq!(report.messages().collect::<Vec<_>>(), ["Component U1 has a TODO value."]);
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = ViolationReport::new(CheckKind::StandardParts);
        report.add(Some("U2"), "bad".to_string());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["check"], "standard-parts");
        assert_eq!(json["violations"][0]["reference"], "U2");
        assert!(json.get("notes").is_none());
    }
}
