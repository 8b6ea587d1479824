//! Typed model of a `terraform providers schema -json` export.
//!
//! Only the parts the generator consumes are modeled; everything else in
//! the export is ignored during deserialization. Attribute and block
//! enumeration order follows the document itself, which is why the maps
//! are `IndexMap` rather than hash maps.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::SchemaResult;

/// Root of a provider schema export.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub provider_schemas: IndexMap<String, ProviderSchema>,
}

/// Schema section for a single provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSchema {
    #[serde(default)]
    pub resource_schemas: IndexMap<String, ResourceSchema>,
}

/// Schema for a single resource type.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSchema {
    pub block: SchemaBlock,
}

/// A nested configuration block definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaBlock {
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeSpec>,
    #[serde(default)]
    pub block_types: IndexMap<String, BlockTypeSpec>,
}

/// A single attribute declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeSpec {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
}

/// A nested block type declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockTypeSpec {
    pub block: SchemaBlock,
    #[serde(default)]
    pub min_items: u64,
}

impl SchemaDocument {
    /// Load a schema document from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        debug!("Loading schema document from {:?}", path);

        let content = fs::read_to_string(path)?;
        let document = serde_json::from_str(&content)?;
        Ok(document)
    }

    /// Registry key under which a provider's schemas are stored,
    /// e.g. `registry.terraform.io/hashicorp/azurerm`.
    pub fn registry_key(supplier: &str, name: &str) -> String {
        format!("registry.terraform.io/{}/{}", supplier, name)
    }
}
