//! Canonical normalized representation of a resource schema.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaResult;

/// One schema field surfaced as a module variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub required: bool,
}

/// One nestable configuration block.
///
/// Forms a tree rooted at the resource's top-level block; nesting depth
/// matches the source schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockNode {
    pub name: String,
    pub min_items: u64,
    pub attributes: Vec<Attribute>,
    pub blocks: Vec<BlockNode>,
}

/// Full normalized representation of one resource type.
///
/// Produced once per run by the extractor and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaSummary {
    pub arguments: Vec<Attribute>,
    pub block_tree: Vec<BlockNode>,
}

impl SchemaSummary {
    /// Read a persisted summary from disk.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        debug!("Reading schema summary from {:?}", path);

        let content = fs::read_to_string(path)?;
        let summary = serde_json::from_str(&content)?;
        Ok(summary)
    }

    /// Persist the summary as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> SchemaResult<()> {
        let path = path.as_ref();
        debug!("Writing schema summary to {:?}", path);

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
