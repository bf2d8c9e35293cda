use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// A loosely typed attribute value, as found in schematic files and in
/// tool-generated component dumps (`true`, `1`, `"yes"`, `"DNP"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl LooseValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            LooseValue::Bool(b) => *b,
            LooseValue::Int(i) => *i == 1,
            LooseValue::Text(s) => text_is_truthy(s),
        }
    }
}

impl From<&str> for LooseValue {
    fn from(s: &str) -> Self {
        LooseValue::Text(s.to_string())
    }
}

impl From<bool> for LooseValue {
    fn from(b: bool) -> Self {
        LooseValue::Bool(b)
    }
}

fn text_is_truthy(s: &str) -> bool {
    let s = s.trim();
    ["yes", "true", "1", "dnp"]
        .iter()
        .any(|accepted| s.eq_ignore_ascii_case(accepted))
}

/// Normalise an optional flag to a tri-state: `None` when absent,
/// otherwise whether the value reads as set.
pub fn normalize_flag(value: Option<&LooseValue>) -> Option<bool> {
    value.map(LooseValue::is_truthy)
}

/// One placed symbol instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub reference: String,   // R1, C1, #PWR03
    pub value: String,       // 10k, N/A, TODO
    #[serde(default)]
    pub lib_id: String,      // Device:R
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnp: Option<LooseValue>,
}

impl Component {
    pub fn new(reference: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            value: value.into(),
            lib_id: String::new(),
            properties: HashMap::new(),
            dnp: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_dnp(mut self, dnp: impl Into<LooseValue>) -> Self {
        self.dnp = Some(dnp.into());
        self
    }

    /// `None` when the property is absent, `Some("")` when present but empty.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// The `dnp` attribute wins when present; the `DNP` property is only
    /// consulted when the attribute is absent.
    pub fn is_dnp(&self) -> bool {
        normalize_flag(self.dnp.as_ref())
            .or_else(|| self.property("DNP").map(text_is_truthy))
            .unwrap_or(false)
    }
}

/// A loaded schematic: document metadata plus its components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchematicDocument {
    pub filename: String,
    /// File format date code, e.g. `20250114`.
    pub version: Option<String>,
    pub generator: Option<String>,
    pub generator_version: Option<String>,
    pub title_block_revision: Option<String>,
    pub components: Vec<Component>,
    /// Raw file text, kept for checks that fall back to text scanning.
    #[serde(skip)]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_normalization() {
        assert_eq!(normalize_flag(None), None);
        assert_eq!(normalize_flag(Some(&LooseValue::Bool(true))), Some(true));
        assert_eq!(normalize_flag(Some(&LooseValue::Bool(false))), Some(false));
        assert_eq!(normalize_flag(Some(&LooseValue::Int(1))), Some(true));
        assert_eq!(normalize_flag(Some(&LooseValue::Int(0))), Some(false));
        for text in ["yes", "YES", "True", "1", "dnp", "DNP"] {
            assert_eq!(normalize_flag(Some(&LooseValue::from(text))), Some(true), "{text}");
        }
        for text in ["no", "false", "0", "", "maybe"] {
            assert_eq!(normalize_flag(Some(&LooseValue::from(text))), Some(false), "{text}");
        }
    }

    #[test]
    fn test_property_absent_vs_empty() {
        let c = Component::new("U1", "N/A").with_property("Part_Number", "");
        assert_eq!(c.property("Part_Number"), Some(""));
        assert_eq!(c.property("Manufacturer"), None);
    }

    #[test]
    fn test_dnp_attribute_takes_precedence() {
        let attr_only = Component::new("U1", "N/A").with_dnp("yes");
        assert!(attr_only.is_dnp());

        let prop_only = Component::new("U2", "N/A").with_property("DNP", "dnp");
        assert!(prop_only.is_dnp());

        let attr_clear = Component::new("U3", "N/A")
            .with_dnp(false)
            .with_property("DNP", "yes");
        assert!(!attr_clear.is_dnp());

        assert!(!Component::new("U4", "N/A").is_dnp());
    }

    #[test]
    fn test_component_from_json() {
        let json = r#"{"reference":"U7","value":"N/A","properties":{"Part_Number":"LM358"},"dnp":1}"#;
        let c: Component = serde_json::from_str(json).unwrap();
        assert_eq!(c.dnp, Some(LooseValue::Int(1)));
        assert!(c.is_dnp());
        assert_eq!(c.property("Part_Number"), Some("LM358"));
    }
}
