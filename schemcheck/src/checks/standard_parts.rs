use crate::catalog::StandardPartsCatalog;
use crate::checks::patterns::{is_excluded_category, TODO};
use crate::checks::{Check, CheckKind, ViolationReport};
use crate::parser::schema::SchematicDocument;

/// Every populated, non-passive component must use a part number from the
/// standard parts catalog. `TODO` part numbers are pending, not errors.
pub struct StandardPartsCheck {
    catalog: StandardPartsCatalog,
    field: String,
}

impl StandardPartsCheck {
    pub fn new(catalog: StandardPartsCatalog, field: impl Into<String>) -> Self {
        Self {
            catalog,
            field: field.into(),
        }
    }
}

impl Check for StandardPartsCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::StandardParts
    }

    fn run(&self, document: &SchematicDocument) -> ViolationReport {
        let mut report = ViolationReport::new(self.kind());

        for component in &document.components {
            let reference = component.reference.as_str();
            if is_excluded_category(reference) || component.is_dnp() {
                continue;
            }

            match component.property(&self.field) {
                None | Some("") => report.add(
                    Some(reference),
                    format!("Component {} is missing a Part Number.", reference),
                ),
                Some(TODO) => {}
                Some(pn) if self.catalog.contains(pn) => {}
                Some(pn) => report.add(
                    Some(reference),
                    format!("Component {} has non-standard part number: '{}'", reference, pn),
                ),
            }
        }

        tracing::info!(
            catalog = self.catalog.len(),
            violations = report.count(),
            "Standard parts check finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{Component, LooseValue};

    fn document(components: Vec<Component>) -> SchematicDocument {
        SchematicDocument {
            components,
            ..Default::default()
        }
    }

    fn check(parts: &[&str]) -> StandardPartsCheck {
        StandardPartsCheck::new(parts.iter().copied().collect(), "Part_Number")
    }

    #[test]
    fn test_empty_catalog_flags_real_part_number() {
        let doc = document(vec![Component::new("U1", "N/A").with_property("Part_Number", "LM358DR")]);
        let report = check(&[]).run(&doc);
        assert_eq!(
            report.messages().collect::<Vec<_>>(),
            ["Component U1 has non-standard part number: 'LM358DR'"]
        );
    }

    #[test]
    fn test_todo_part_numbers_never_fail() {
        let doc = document(vec![Component::new("U1", "N/A").with_property("Part_Number", "TODO")]);
        assert!(check(&[]).run(&doc).is_clean());
        assert!(check(&["LM358DR"]).run(&doc).is_clean());
    }

    #[test]
    fn test_dnp_components_never_fail() {
        let doc = document(vec![
            Component::new("U1", "N/A").with_dnp(LooseValue::Bool(true)),
            Component::new("U2", "N/A").with_dnp("DNP").with_property("Part_Number", "XYZ"),
            Component::new("U3", "N/A").with_property("DNP", "yes"),
            Component::new("U4", "N/A").with_property("DNP", "1").with_property("Part_Number", ""),
        ]);
        assert!(check(&[]).run(&doc).is_clean());
    }

    #[test]
    fn test_missing_empty_and_unknown() {
        let doc = document(vec![
            Component::new("U1", "N/A"),
            Component::new("U2", "N/A").with_property("Part_Number", ""),
            Component::new("U3", "N/A").with_property("Part_Number", "lm358dr"),
            Component::new("U4", "N/A").with_property("Part_Number", "LM358DR"),
            Component::new("Q1", "BSS138").with_dnp("no"),
        ]);
        let report = check(&["LM358DR"]).run(&doc);
        assert_eq!(
            report.messages().collect::<Vec<_>>(),
            [
                "Component U1 is missing a Part Number.",
                "Component U2 is missing a Part Number.",
                "Component U3 has non-standard part number: 'lm358dr'",
                "Component Q1 is missing a Part Number.",
            ]
        );
    }

    #[test]
    fn test_excluded_categories_skipped() {
        let doc = document(vec![
            Component::new("R1", "10k"),
            Component::new("C4", "100n").with_property("Part_Number", "not-in-catalog"),
            Component::new("SW1", "N/A"),
            Component::new("#FLG01", "PWR_FLAG"),
        ]);
        assert!(check(&[]).run(&doc).is_clean());
    }
}
