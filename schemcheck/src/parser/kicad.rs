//! KiCad schematic loader.
//!
//! Reads modern S-expression schematics (`.kicad_sch`, KiCad 6 and later)
//! into a [`SchematicDocument`]. Only the data the metadata checks need is
//! extracted:
//!
//! - `(generator "eeschema")` and `(generator_version "9.0")`
//! - `(title_block ... (rev "1.2"))`
//! - top-level `(symbol ...)` instances with their `(property "KEY" "VALUE")`
//!   entries and the `(dnp yes|no)` attribute
//!
//! Symbol definitions nested under `(lib_symbols ...)` are library data, not
//! placed components, and are skipped.

use std::collections::HashMap;
use std::path::Path;
use crate::parser::schema::*;
use crate::parser::sexp::{ParseError, SExp, SExpParser};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KicadParseError {
    #[error("S-expression parse error: {0}")]
    SExpParse(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid schematic format: {0}")]
    InvalidFormat(String),
    #[error("Unsupported schematic format: {0}")]
    UnsupportedFormat(String),
    #[error("Missing required field: {0}")]
    MissingField(String),
}

pub struct KicadParser;

impl KicadParser {
    /// Load a schematic file, rejecting formats this loader cannot read.
    pub fn parse_schematic(path: &Path) -> Result<SchematicDocument, KicadParseError> {
        crate::parser::format_detector::detect_and_parse_schematic(path)
    }

    /// Parse schematic text in the S-expression format.
    pub fn parse_schematic_str(
        content: &str,
        filename: &str,
    ) -> Result<SchematicDocument, KicadParseError> {
        let root = SExpParser::new(content).parse()?;

        match root.tag() {
            Some("kicad_sch") => {}
            Some(other) => {
                return Err(KicadParseError::InvalidFormat(format!(
                    "Expected kicad_sch, found {}",
                    other
                )))
            }
            None => {
                return Err(KicadParseError::InvalidFormat(
                    "Expected kicad_sch root".to_string(),
                ))
            }
        }

        let mut document = SchematicDocument {
            filename: filename.to_string(),
            version: root.string_value("version").map(str::to_string),
            generator: root.string_value("generator").map(str::to_string),
            generator_version: root.string_value("generator_version").map(str::to_string),
            title_block_revision: root
                .child("title_block")
                .and_then(|tb| tb.string_value("rev"))
                .map(str::to_string),
            components: Vec::new(),
            source: content.to_string(),
        };

        for item in root.children("symbol") {
            match Self::parse_symbol(item) {
                Ok(component) => document.components.push(component),
                Err(e) => tracing::warn!("Skipping symbol in {}: {}", filename, e),
            }
        }

        tracing::debug!(
            file = filename,
            components = document.components.len(),
            generator = ?document.generator,
            "Loaded schematic"
        );

        Ok(document)
    }

    fn parse_symbol(sexp: &SExp) -> Result<Component, KicadParseError> {
        let lib_id = sexp
            .string_value("lib_id")
            .ok_or_else(|| KicadParseError::MissingField("lib_id".to_string()))?
            .to_string();

        // (property "KEY" "VALUE" (at ...) (effects ...))
        let mut properties = HashMap::new();
        for prop in sexp.children("property") {
            if let (Some(key), Some(val)) = (prop.atom_at(1), prop.atom_at(2)) {
                properties.insert(key.to_string(), val.to_string());
            }
        }

        let reference = properties
            .get("Reference")
            .cloned()
            .ok_or_else(|| KicadParseError::MissingField(format!("Reference for {}", lib_id)))?;
        let value = properties.get("Value").cloned().unwrap_or_default();
        let dnp = sexp.string_value("dnp").map(LooseValue::from);

        Ok(Component {
            reference,
            value,
            lib_id,
            properties,
            dnp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"(kicad_sch
  (version 20250114)
  (generator "eeschema")
  (generator_version "9.0")
  (uuid "0d0e3c2a-3f5b-4b8e-9a51-7a2f0b1c9d10")
  (paper "A4")
  (title_block (title "Sensor board") (date "2025-03-02") (rev "1.3"))
  (lib_symbols
    (symbol "Device:R" (property "Reference" "R" (at 0 0 0)) (property "Value" "R" (at 0 0 0)))
  )
  (symbol (lib_id "Device:R") (at 100 50 0) (unit 1) (in_bom yes) (on_board yes) (dnp no)
    (uuid "5c1d1c4e-0d55-4f44-9d2b-3b1a7f7e2a01")
    (property "Reference" "R1" (at 102 48 0))
    (property "Value" "10k" (at 102 52 0))
  )
  (symbol (lib_id "MCU:STM32") (at 140 80 0) (unit 1) (dnp yes)
    (uuid "5c1d1c4e-0d55-4f44-9d2b-3b1a7f7e2a02")
    (property "Reference" "U1" (at 140 70 0))
    (property "Value" "N/A" (at 140 90 0))
    (property "Part_Number" "" (at 140 92 0))
  )
)"#;

    #[test]
    fn test_parse_metadata() {
        let doc = KicadParser::parse_schematic_str(SAMPLE, "sample.kicad_sch").unwrap();
        assert_eq!(doc.version.as_deref(), Some("20250114"));
        assert_eq!(doc.generator.as_deref(), Some("eeschema"));
        assert_eq!(doc.generator_version.as_deref(), Some("9.0"));
        assert_eq!(doc.title_block_revision.as_deref(), Some("1.3"));
        assert_eq!(doc.source, SAMPLE);
    }

    #[test]
    fn test_lib_symbols_are_not_components() {
        let doc = KicadParser::parse_schematic_str(SAMPLE, "sample.kicad_sch").unwrap();
        let refs: Vec<_> = doc.components.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(refs, ["R1", "U1"]);
    }

    #[test]
    fn test_symbol_properties_and_dnp() {
        let doc = KicadParser::parse_schematic_str(SAMPLE, "sample.kicad_sch").unwrap();
        let r1 = &doc.components[0];
        assert_eq!(r1.value, "10k");
        assert_eq!(r1.lib_id, "Device:R");
        assert_eq!(r1.property("Part_Number"), None);
        assert!(!r1.is_dnp());

        let u1 = &doc.components[1];
        assert_eq!(u1.property("Part_Number"), Some(""));
        assert!(u1.is_dnp());
    }

    #[test]
    fn test_symbol_without_reference_is_skipped() {
        let content = r#"(kicad_sch (version 20250114)
          (symbol (lib_id "Device:C") (property "Value" "100n")))"#;
        let doc = KicadParser::parse_schematic_str(content, "t.kicad_sch").unwrap();
        assert!(doc.components.is_empty());
    }

    #[test]
    fn test_rejects_other_roots() {
        let err = KicadParser::parse_schematic_str("(kicad_pcb (version 1))", "b.kicad_pcb")
            .unwrap_err();
        assert!(matches!(err, KicadParseError::InvalidFormat(_)));
    }
}
