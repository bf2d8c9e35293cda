use crate::checks::patterns::{is_diode, is_led_color, is_power_flag, is_valid_value, NOT_APPLICABLE};
use crate::checks::{Check, CheckKind, ViolationReport};
use crate::parser::schema::SchematicDocument;

/// Values must be numbers in engineering notation (`10k`, `4.7u`, `2.2Meg`).
///
/// `N/A` values are left to the part number checks, power and flag symbols
/// are skipped, and LEDs may carry a colour name instead of a number.
pub struct ValueFormatCheck;

impl Check for ValueFormatCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Values
    }

    fn run(&self, document: &SchematicDocument) -> ViolationReport {
        let mut report = ViolationReport::new(self.kind());

        for component in &document.components {
            let (reference, value) = (component.reference.as_str(), component.value.as_str());

            if value == NOT_APPLICABLE || is_power_flag(reference) {
                continue;
            }
            if is_diode(reference) && is_led_color(value) {
                continue;
            }
            if !is_valid_value(value) {
                report.add(
                    Some(reference),
                    format!("Component {} has invalid value: '{}'", reference, value),
                );
            }
        }

        report
    }
}
