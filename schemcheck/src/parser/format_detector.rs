//! KiCad schematic format detection.
//!
//! Modern S-expression schematics are routed to [`KicadParser`]. Legacy
//! `EESchema` text files (KiCad 4 and 5) are recognised so that the error
//! names the format instead of failing deep in the S-expression reader.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::kicad::{KicadParseError, KicadParser};
use crate::parser::schema::SchematicDocument;

static FORMAT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(version\s+(\d+)\)").expect("valid format version regex"));

/// KiCad schematic file format generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KicadVersion {
    /// KiCad 4/5 `EESchema` text format
    Legacy,
    Modern6,
    Modern7,
    Modern8,
    Modern9,
}

impl KicadVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            KicadVersion::Legacy => "KiCad 4/5 (legacy)",
            KicadVersion::Modern6 => "KiCad 6",
            KicadVersion::Modern7 => "KiCad 7",
            KicadVersion::Modern8 => "KiCad 8",
            KicadVersion::Modern9 => "KiCad 9",
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, KicadVersion::Legacy)
    }
}

/// Detect the schematic format from file content.
pub fn detect_format(content: &str) -> Option<KicadVersion> {
    let trimmed = content.trim_start();

    if trimmed.starts_with("EESchema Schematic File Version") {
        return Some(KicadVersion::Legacy);
    }

    if trimmed.starts_with("(kicad_sch") {
        return Some(modern_version(content));
    }

    None
}

/// Map the `(version YYYYMMDD)` date code to a release. Files without a
/// readable code are treated as KiCad 6, the oldest S-expression release.
fn modern_version(content: &str) -> KicadVersion {
    let code = FORMAT_VERSION
        .captures(content)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0);

    if code >= 20250114 {
        KicadVersion::Modern9
    } else if code >= 20231120 {
        KicadVersion::Modern8
    } else if code >= 20230121 {
        KicadVersion::Modern7
    } else {
        KicadVersion::Modern6
    }
}

/// Read a schematic file and parse it with the loader for its format.
pub fn detect_and_parse_schematic(path: &Path) -> Result<SchematicDocument, KicadParseError> {
    let content = std::fs::read_to_string(path)?;

    let version = detect_format(&content).ok_or_else(|| {
        KicadParseError::InvalidFormat(format!(
            "{} is not a KiCad schematic (expected a (kicad_sch header)",
            path.display()
        ))
    })?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(file = %filename, format = version.as_str(), "Detected schematic format");

    if version.is_legacy() {
        return Err(KicadParseError::UnsupportedFormat(format!(
            "{} uses the {} format; open and save it in KiCad 6 or later",
            filename,
            version.as_str()
        )));
    }

    KicadParser::parse_schematic_str(&content, &filename)
}
