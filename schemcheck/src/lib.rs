//! schemcheck - metadata lint checks for KiCad schematics
//!
//! This library loads KiCad schematics and checks the conventions a
//! hardware team relies on before a design goes to manufacture: component
//! values in engineering notation, part numbers present and drawn from the
//! standard parts list, no leftover TODO markers, the expected editor
//! version, and a well-formed title block revision.
//!
//! # Quick Start
//!
//! ```no_run
//! use schemcheck::{CheckKind, CheckOptions, SchemCheckCore};
//! use std::path::Path;
//!
//! let report = SchemCheckCore::run_check(
//!     Path::new("design.kicad_sch"),
//!     CheckKind::Values,
//!     &CheckOptions::default(),
//! ).unwrap();
//!
//! for line in report.messages() {
//!     println!("{}", line);
//! }
//! ```
//!
//! # Checks
//!
//! - **Values** (`v`): engineering notation, LED colours allowed on diodes
//! - **Part numbers** (`p`): `N/A`-valued parts name a part number
//! - **TODO markers** (`t`): no `TODO` values or part numbers
//! - **Tool version** (`k`): saved by eeschema 9.x
//! - **Revision** (`r`): title block revision is `<major>.<minor>`
//! - **Standard parts** (`s`): part numbers come from the approved spreadsheet

pub mod catalog;
pub mod checks;
pub mod core;
pub mod parser;
pub mod structure;

// Re-export main types
pub use crate::catalog::StandardPartsCatalog;
pub use crate::checks::{Check, CheckKind, Violation, ViolationReport};
pub use crate::core::{CheckOptions, SchemCheckCore, SchemCheckError, DEFAULT_PART_NUMBER_FIELD};
pub use crate::parser::kicad::KicadParser;
pub use crate::parser::schema::{Component, LooseValue, SchematicDocument};
pub use crate::structure::check_production_folder;

/// Parse a schematic file (convenience wrapper).
pub fn parse_schematic(path: &std::path::Path) -> Result<SchematicDocument, SchemCheckError> {
    Ok(KicadParser::parse_schematic(path)?)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Check, CheckKind, CheckOptions, Component, SchemCheckCore, SchemCheckError,
        SchematicDocument, StandardPartsCatalog, Violation, ViolationReport,
    };
}
