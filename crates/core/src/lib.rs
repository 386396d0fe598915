//! prcs-core: parsing layer for PRCS project data.
//!
//! Turns the text handed over by the command wrapper into typed records:
//!
//! - [`lexer::tokenize`] -- descriptor text to tokens
//! - [`parser::parse`] -- tokens to generic [`Node`] trees
//! - [`Descriptor`] -- property mapping and typed accessors over the tree
//! - [`VersionIdentifier`] -- `<major>.<minor>` version ids
//! - [`parse_info_records`] -- `info` listing lines to [`VersionSummary`]
//!
//! Nothing here touches the filesystem or spawns processes.

pub mod ast;
pub mod descriptor;
pub mod error;
pub mod info;
pub mod lexer;
pub mod parser;
pub mod version;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::Node;
pub use descriptor::{Descriptor, FileEntry, ProjectVersionInfo};
pub use error::{Error, FormatError, LexError, ParseError, SchemaError};
pub use info::{parse_info_records, VersionSummary};
pub use version::VersionIdentifier;
