//! # terramod_schema
//!
//! Provider schema normalization for terramod.
//!
//! Loads a `terraform providers schema -json` export, flattens one resource
//! type's nested block definition into a canonical attribute/block tree,
//! and renders the line-oriented textual context consumed by the
//! instruction composer.
//!
//! Extraction is pure and deterministic: given the same document, the same
//! summary comes out, with attributes and blocks in the document's own
//! enumeration order and computed-only attributes dropped.

pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod render;

pub use document::{
    AttributeSpec, BlockTypeSpec, ProviderSchema, ResourceSchema, SchemaBlock, SchemaDocument,
};
pub use error::{SchemaError, SchemaResult};
pub use extract::SchemaExtractor;
pub use models::{Attribute, BlockNode, SchemaSummary};
pub use render::render_context;
