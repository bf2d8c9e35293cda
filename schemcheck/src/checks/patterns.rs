//! Reference, value and revision patterns shared by the checks.
//!
//! All patterns are compiled once on first use and never change afterwards.

use std::sync::LazyLock;

use regex::Regex;

pub const NOT_APPLICABLE: &str = "N/A";
pub const TODO: &str = "TODO";

/// Colour names accepted as the value of an LED (`D<n>`) instead of a number.
pub const LED_COLORS: [&str; 9] = [
    "RED", "GREEN", "BLUE", "WHITE", "YELLOW", "ORANGE", "AMBER", "IR", "UV",
];

// Start-anchored only, so `#PWR01a` is still a power symbol.
static POWER_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:PWR|FLG)\d+").expect("valid power flag regex"));

static DIODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^D\d+[a-z]?$").expect("valid diode regex"));

/// Passives, jumpers, switches, headers and test points.
static EXCLUDED_CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:R|C|L|JP|SW|J|TP)\d+[a-z]?$").expect("valid excluded category regex")
});

// Anchored at the end only: leading text before a valid number is accepted.
static VALUE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\d.]+(?:p|n|u|m|k|Meg|M|G)?\s*$").expect("valid value format regex")
});

static REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("valid revision regex"));

// Quoted string body with backslash escapes, as the S-expression reader reads it.
static RAW_REVISION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\(rev\s+"((?:[^"\\]|\\.)*)"\)"#).expect("valid raw revision regex")
});

static PART_NUMBER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*part[ _]?number\s*$").expect("valid part number header regex")
});

pub fn is_power_flag(reference: &str) -> bool {
    POWER_FLAG.is_match(reference)
}

pub fn is_diode(reference: &str) -> bool {
    DIODE.is_match(reference)
}

/// Components in these categories never need a part number.
pub fn is_excluded_category(reference: &str) -> bool {
    EXCLUDED_CATEGORY.is_match(reference) || is_power_flag(reference)
}

pub fn is_valid_value(value: &str) -> bool {
    VALUE_FORMAT.is_match(value)
}

pub fn is_led_color(value: &str) -> bool {
    LED_COLORS.contains(&value)
}

pub fn is_revision(value: &str) -> bool {
    REVISION.is_match(value)
}

/// First `(rev "...")` value in raw schematic text, escapes left as written.
pub fn find_raw_revision(source: &str) -> Option<&str> {
    RAW_REVISION
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_part_number_header(header: &str) -> bool {
    PART_NUMBER_HEADER.is_match(header)
}
