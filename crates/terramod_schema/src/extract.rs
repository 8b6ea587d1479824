//! Schema tree extraction.
//!
//! Flattens a provider's nested schema block into the canonical
//! attribute/block representation consumed by the renderer and the
//! instruction composer.

use tracing::debug;

use crate::document::{SchemaBlock, SchemaDocument};
use crate::error::{SchemaError, SchemaResult};
use crate::models::{Attribute, BlockNode, SchemaSummary};

/// Extractor for normalized resource schemas.
pub struct SchemaExtractor;

impl SchemaExtractor {
    /// Extract the normalized summary for one resource type.
    ///
    /// `provider_key` is the registry key as emitted by the schema export,
    /// e.g. `registry.terraform.io/hashicorp/azurerm`.
    pub fn extract(
        document: &SchemaDocument,
        provider_key: &str,
        resource_type: &str,
    ) -> SchemaResult<SchemaSummary> {
        let provider = document
            .provider_schemas
            .get(provider_key)
            .ok_or_else(|| SchemaError::ProviderNotFound(provider_key.to_string()))?;

        let resource = provider
            .resource_schemas
            .get(resource_type)
            .ok_or_else(|| SchemaError::ResourceNotFound(resource_type.to_string()))?;

        debug!("Extracting schema tree for {}", resource_type);

        let (arguments, block_tree) = Self::parse_block(&resource.block);
        Ok(SchemaSummary {
            arguments,
            block_tree,
        })
    }

    // Depth-first descent over a block definition. Attributes that are
    // computed and not required are server-assigned, never user-settable,
    // and are dropped here.
    fn parse_block(block: &SchemaBlock) -> (Vec<Attribute>, Vec<BlockNode>) {
        let mut attributes = Vec::new();
        for (name, attr) in &block.attributes {
            if !attr.required && attr.computed {
                continue;
            }
            attributes.push(Attribute {
                name: name.clone(),
                required: attr.required,
            });
        }

        let mut blocks = Vec::new();
        for (name, block_type) in &block.block_types {
            let (child_attributes, child_blocks) = Self::parse_block(&block_type.block);
            blocks.push(BlockNode {
                name: name.clone(),
                min_items: block_type.min_items,
                attributes: child_attributes,
                blocks: child_blocks,
            });
        }

        (attributes, blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDER_KEY: &str = "registry.terraform.io/hashicorp/azurerm";

    fn sample_document() -> SchemaDocument {
        let json = r#"{
            "provider_schemas": {
                "registry.terraform.io/hashicorp/azurerm": {
                    "resource_schemas": {
                        "azurerm_storage_account": {
                            "block": {
                                "attributes": {
                                    "name": {"required": true},
                                    "location": {"required": true},
                                    "account_tier": {"optional": true},
                                    "id": {"computed": true},
                                    "primary_blob_endpoint": {"computed": true, "optional": false}
                                },
                                "block_types": {
                                    "identity": {
                                        "block": {
                                            "attributes": {
                                                "type": {"required": true},
                                                "identity_ids": {"optional": true},
                                                "principal_id": {"computed": true}
                                            },
                                            "block_types": {}
                                        },
                                        "min_items": 0
                                    },
                                    "network_rules": {
                                        "block": {
                                            "attributes": {
                                                "default_action": {"required": true}
                                            },
                                            "block_types": {
                                                "private_link_access": {
                                                    "block": {
                                                        "attributes": {
                                                            "endpoint_resource_id": {"required": true}
                                                        }
                                                    }
                                                }
                                            }
                                        },
                                        "min_items": 1
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }"#;

        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_excludes_computed_only_attributes() {
        let document = sample_document();
        let summary =
            SchemaExtractor::extract(&document, PROVIDER_KEY, "azurerm_storage_account").unwrap();

        let names: Vec<&str> = summary.arguments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name", "location", "account_tier"]);

        // Computed attribute nested in a block is excluded too.
        let identity = &summary.block_tree[0];
        let nested: Vec<&str> = identity.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(nested, vec!["type", "identity_ids"]);
    }

    #[test]
    fn test_extract_recurses_into_nested_blocks() {
        let document = sample_document();
        let summary =
            SchemaExtractor::extract(&document, PROVIDER_KEY, "azurerm_storage_account").unwrap();

        assert_eq!(summary.block_tree.len(), 2);

        let network_rules = &summary.block_tree[1];
        assert_eq!(network_rules.name, "network_rules");
        assert_eq!(network_rules.min_items, 1);
        assert_eq!(network_rules.blocks.len(), 1);
        assert_eq!(network_rules.blocks[0].name, "private_link_access");
        // min_items defaults to 0 when the document omits it.
        assert_eq!(network_rules.blocks[0].min_items, 0);
    }

    #[test]
    fn test_extract_preserves_required_flag() {
        let document = sample_document();
        let summary =
            SchemaExtractor::extract(&document, PROVIDER_KEY, "azurerm_storage_account").unwrap();

        assert!(summary.arguments[0].required);
        assert!(!summary.arguments[2].required);
    }

    #[test]
    fn test_extract_unknown_resource_type() {
        let document = sample_document();
        let err =
            SchemaExtractor::extract(&document, PROVIDER_KEY, "azurerm_route_server").unwrap_err();

        match err {
            SchemaError::ResourceNotFound(resource_type) => {
                assert_eq!(resource_type, "azurerm_route_server");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extract_unknown_provider() {
        let document = sample_document();
        let err = SchemaExtractor::extract(
            &document,
            "registry.terraform.io/hashicorp/aws",
            "aws_instance",
        )
        .unwrap_err();

        assert!(matches!(err, SchemaError::ProviderNotFound(_)));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let document = sample_document();
        let first =
            SchemaExtractor::extract(&document, PROVIDER_KEY, "azurerm_storage_account").unwrap();
        let second =
            SchemaExtractor::extract(&document, PROVIDER_KEY, "azurerm_storage_account").unwrap();

        assert_eq!(first, second);
    }
}
