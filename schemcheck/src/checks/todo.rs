use crate::checks::patterns::TODO;
use crate::checks::{Check, CheckKind, ViolationReport};
use crate::parser::schema::SchematicDocument;

/// Flags `TODO` placeholders left in values and part numbers. A component
/// with both counts twice.
pub struct TodoMarkerCheck {
    field: String,
}

impl TodoMarkerCheck {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

impl Check for TodoMarkerCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Todo
    }

    fn run(&self, document: &SchematicDocument) -> ViolationReport {
        let mut report = ViolationReport::new(self.kind());

        for component in &document.components {
            let reference = component.reference.as_str();
            if component.value == TODO {
                report.add(
                    Some(reference),
                    format!("Component {} has a TODO value.", reference),
                );
            }
            if component.property(&self.field) == Some(TODO) {
                report.add(
                    Some(reference),
                    format!("Component {} has a TODO part number.", reference),
                );
            }
        }

        report
    }
}
