pub mod format_detector;
pub mod kicad;
pub mod schema;
pub mod sexp;

// Re-export for convenience
pub use format_detector::{detect_and_parse_schematic, detect_format, KicadVersion};
pub use kicad::{KicadParseError, KicadParser};
pub use schema::*;
pub use sexp::{ParseError, SExp, SExpParser};
