use crate::checks::patterns::{find_raw_revision, is_revision};
use crate::checks::{Check, CheckKind, ViolationReport};
use crate::parser::schema::SchematicDocument;

/// The title block revision must read `<major>.<minor>`, e.g. `1.2`.
pub struct RevisionFormatCheck;

/// The title block revision, or failing that the first `(rev "...")` in
/// the raw file text. Empty values count as missing.
pub fn resolve_revision(document: &SchematicDocument) -> Option<&str> {
    document
        .title_block_revision
        .as_deref()
        .filter(|rev| !rev.is_empty())
        .or_else(|| find_raw_revision(&document.source))
        .filter(|rev| !rev.is_empty())
}

impl Check for RevisionFormatCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Revision
    }

    fn run(&self, document: &SchematicDocument) -> ViolationReport {
        let mut report = ViolationReport::new(self.kind());
        let revision = resolve_revision(document);

        report.note(format!("Revision value: {:?}", revision.unwrap_or("<none>")));

        match revision {
            None => report.add(None, "Revision value not found in schematic.".to_string()),
            Some(rev) if !is_revision(rev) => report.add(
                None,
                format!("Revision '{}' does not match <major>.<minor>.", rev),
            ),
            Some(_) => {}
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_title_block(rev: Option<&str>) -> SchematicDocument {
        SchematicDocument {
            title_block_revision: rev.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_well_formed_revision() {
        let report = RevisionFormatCheck.run(&with_title_block(Some("1.0")));
        assert!(report.is_clean());
        assert_eq!(report.notes, ["Revision value: \"1.0\""]);
    }

    #[test]
    fn test_malformed_revision() {
        let report = RevisionFormatCheck.run(&with_title_block(Some("12.3.4")));
        assert_eq!(
            report.messages().collect::<Vec<_>>(),
            ["Revision '12.3.4' does not match <major>.<minor>."]
        );
    }

    #[test]
    fn test_missing_revision_is_distinct() {
        let report = RevisionFormatCheck.run(&with_title_block(None));
        assert_eq!(
            report.messages().collect::<Vec<_>>(),
            ["Revision value not found in schematic."]
        );
        assert_eq!(report.notes, ["Revision value: \"<none>\""]);

        let empty = RevisionFormatCheck.run(&with_title_block(Some("")));
        assert_eq!(empty.violations, report.violations);
    }

    #[test]
    fn test_falls_back_to_raw_text() {
        let doc = SchematicDocument {
            title_block_revision: Some(String::new()),
            source: "(kicad_sch (sheet_instances (path \"/\" (rev \"3.1\"))))".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_revision(&doc), Some("3.1"));
        assert!(RevisionFormatCheck.run(&doc).is_clean());
    }

    #[test]
    fn test_title_block_wins_over_raw_text() {
        let doc = SchematicDocument {
            title_block_revision: Some("2.0".to_string()),
            source: "(rev \"bad\")".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_revision(&doc), Some("2.0"));
    }

    #[test]
    fn test_raw_text_with_escaped_quote_is_read_whole() {
        let doc = SchematicDocument {
            source: r#"(kicad_sch (rev "1.2\"b"))"#.to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_revision(&doc), Some(r#"1.2\"b"#));
        let report = RevisionFormatCheck.run(&doc);
        assert_eq!(
            report.messages().collect::<Vec<_>>(),
            [r#"Revision '1.2\"b' does not match <major>.<minor>."#]
        );
    }
}
