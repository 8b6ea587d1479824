//! Context rendering.
//!
//! Serializes a [`SchemaSummary`](crate::models::SchemaSummary) into the
//! line-oriented textual summary shared verbatim by every instruction
//! payload. All three generation requests must see the identical view of
//! the schema, so this is rendered once per run and reused.

use crate::models::{BlockNode, SchemaSummary};

/// Render the shared schema context for a resource type.
pub fn render_context(resource_type: &str, summary: &SchemaSummary) -> String {
    let mut out = format!(
        "You are generating Terraform code for resource {}.\nArguments:\n",
        resource_type
    );

    for argument in &summary.arguments {
        let required = if argument.required { "required" } else { "optional" };
        out.push_str(&format!("- {} ({})\n", argument.name, required));
    }

    out.push_str("\nNested Block Tree:\n");
    out.push_str(&render_block_tree(&summary.block_tree, 0).join("\n"));
    out
}

fn render_block_tree(blocks: &[BlockNode], indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for block in blocks {
        lines.push(format!(
            "{}- {} (min_items={})",
            "  ".repeat(indent),
            block.name,
            block.min_items
        ));
        for attribute in &block.attributes {
            let required = if attribute.required { "required" } else { "optional" };
            lines.push(format!(
                "{}- {} ({})",
                "  ".repeat(indent + 1),
                attribute.name,
                required
            ));
        }
        if !block.blocks.is_empty() {
            lines.extend(render_block_tree(&block.blocks, indent + 1));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attribute;

    fn sample_summary() -> SchemaSummary {
        SchemaSummary {
            arguments: vec![
                Attribute {
                    name: "name".to_string(),
                    required: true,
                },
                Attribute {
                    name: "tags".to_string(),
                    required: false,
                },
            ],
            block_tree: vec![BlockNode {
                name: "site_config".to_string(),
                min_items: 1,
                attributes: vec![Attribute {
                    name: "always_on".to_string(),
                    required: false,
                }],
                blocks: vec![BlockNode {
                    name: "cors".to_string(),
                    min_items: 0,
                    attributes: vec![Attribute {
                        name: "allowed_origins".to_string(),
                        required: true,
                    }],
                    blocks: vec![],
                }],
            }],
        }
    }

    #[test]
    fn test_render_shape() {
        let rendered = render_context("azurerm_linux_web_app", &sample_summary());

        let expected = "You are generating Terraform code for resource azurerm_linux_web_app.\n\
Arguments:\n\
- name (required)\n\
- tags (optional)\n\
\n\
Nested Block Tree:\n\
- site_config (min_items=1)\n\
  - always_on (optional)\n\
  - cors (min_items=0)\n\
    - allowed_origins (required)";

        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let summary = sample_summary();
        assert_eq!(
            render_context("azurerm_linux_web_app", &summary),
            render_context("azurerm_linux_web_app", &summary)
        );
    }

    #[test]
    fn test_render_empty_block_tree() {
        let summary = SchemaSummary {
            arguments: vec![Attribute {
                name: "name".to_string(),
                required: true,
            }],
            block_tree: vec![],
        };

        let rendered = render_context("azurerm_resource_group", &summary);
        assert!(rendered.ends_with("Nested Block Tree:\n"));
    }
}
