use crate::checks::patterns::{is_excluded_category, NOT_APPLICABLE};
use crate::checks::{Check, CheckKind, ViolationReport};
use crate::parser::schema::SchematicDocument;

/// Components valued `N/A` must name their part through the part number
/// property instead. Passives, connectors and similar are exempt.
pub struct PartNumberPresenceCheck {
    field: String,
}

impl PartNumberPresenceCheck {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

impl Check for PartNumberPresenceCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::PartNumbers
    }

    fn run(&self, document: &SchematicDocument) -> ViolationReport {
        let mut report = ViolationReport::new(self.kind());

        for component in &document.components {
            if is_excluded_category(&component.reference) || component.value != NOT_APPLICABLE {
                continue;
            }
            match component.property(&self.field) {
                Some(pn) if !pn.is_empty() => {}
                _ => report.add(
                    Some(&component.reference),
                    format!("Component {} is missing a Part Number.", component.reference),
                ),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Component;

    fn run(components: Vec<Component>) -> ViolationReport {
        let doc = SchematicDocument {
            components,
            ..Default::default()
        };
        PartNumberPresenceCheck::new("Part_Number").run(&doc)
    }

    #[test]
    fn test_missing_and_empty_part_numbers() {
        let report = run(vec![
            Component::new("U1", "N/A"),
            Component::new("U2", "N/A").with_property("Part_Number", ""),
            Component::new("U3", "N/A").with_property("Part_Number", "STM32F411CEU6"),
        ]);
        assert_eq!(
            report.messages().collect::<Vec<_>>(),
            [
                "Component U1 is missing a Part Number.",
                "Component U2 is missing a Part Number.",
            ]
        );
    }

    #[test]
    fn test_only_not_applicable_values_are_checked() {
        let report = run(vec![Component::new("U1", "LM358"), Component::new("Q1", "BSS138")]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_excluded_categories_skipped() {
        let report = run(vec![
            Component::new("R1", "N/A"),
            Component::new("J2", "N/A"),
            Component::new("TP1", "N/A"),
            Component::new("#PWR01", "N/A"),
        ]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_custom_field_name() {
        let doc = SchematicDocument {
            components: vec![Component::new("U1", "N/A").with_property("MPN", "LM358DR")],
            ..Default::default()
        };
        assert!(PartNumberPresenceCheck::new("MPN").run(&doc).is_clean());
        assert_eq!(PartNumberPresenceCheck::new("Part_Number").run(&doc).count(), 1);
    }
}
