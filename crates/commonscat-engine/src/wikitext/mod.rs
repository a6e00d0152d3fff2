//! # Wikitext Template Parsing
//!
//! Cursor-based extraction of `{{template}}` invocations from article text.
//! Only what marker detection and composite augmentation need is modelled:
//! template names, parameters, nesting, and byte spans. Everything else in
//! the article is opaque text.
//!
//! ## Modules
//!
//! - **`types`**: `Template` and `Param`
//! - **`kinds`**: delimiters for templates, arguments, links, comments
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with absolute positions
//! - **`parser`**: `parse_templates()` with the `try_parse_*` helpers
//! - **`names`**: `normalize_name()`, the canonical comparison form

pub mod cursor;
pub mod kinds;
pub mod names;
pub mod parser;
pub mod span;
pub mod types;

pub use names::normalize_name;
pub use parser::parse_templates;
pub use span::Span;
pub use types::{Param, Template};
