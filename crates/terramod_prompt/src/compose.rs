//! Instruction payload composition.
//!
//! Builds the three fully-specified instruction payloads (variables, main,
//! outputs) handed to the generation backend. The backend cannot be
//! trusted to coordinate across independent requests, so every rule the
//! artifacts must agree on (naming, typing, optionality, formatting) is
//! spelled out literally in each payload, and the resolved naming token is
//! embedded in both the main and outputs instructions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::naming::display_name;

/// The three generated artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Variables,
    Main,
    Outputs,
}

impl ArtifactKind {
    /// Target file name for this artifact.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Variables => "variables.tf",
            Self::Main => "main.tf",
            Self::Outputs => "outputs.tf",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variables => write!(f, "variables"),
            Self::Main => write!(f, "main"),
            Self::Outputs => write!(f, "outputs"),
        }
    }
}

/// A structured request for the generation backend.
///
/// Immutable once built; carries no state across pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionPayload {
    pub kind: ArtifactKind,
    /// Generator persona line, sent as the system message.
    pub role: String,
    /// Fully-enumerated instruction text.
    pub task: String,
    /// One-line output contract.
    pub expected_output: String,
}

/// The three payloads for one resource type's module.
#[derive(Debug, Clone)]
pub struct ModulePayloads {
    pub variables: InstructionPayload,
    pub main: InstructionPayload,
    pub outputs: InstructionPayload,
}

/// Composer for the three instruction payloads.
pub struct InstructionComposer<'a> {
    provider_name: &'a str,
    resource_type: &'a str,
    naming_token: &'a str,
    context: &'a str,
    doc_text: Option<&'a str>,
}

impl<'a> InstructionComposer<'a> {
    /// Create a composer for one resource type.
    ///
    /// `context` is the rendered schema context, shared verbatim across all
    /// three payloads. `naming_token` is the pre-resolved local identifier.
    pub fn new(
        provider_name: &'a str,
        resource_type: &'a str,
        naming_token: &'a str,
        context: &'a str,
    ) -> Self {
        Self {
            provider_name,
            resource_type,
            naming_token,
            context,
            doc_text: None,
        }
    }

    /// Attach reference documentation text used as the description source.
    pub fn with_documentation(mut self, doc_text: &'a str) -> Self {
        self.doc_text = Some(doc_text);
        self
    }

    /// Build the payload for one artifact kind.
    pub fn compose(&self, kind: ArtifactKind) -> InstructionPayload {
        debug!("Composing {} payload for {}", kind, self.resource_type);
        match kind {
            ArtifactKind::Variables => InstructionPayload {
                kind,
                role: "Terraform Variables Generator: you generate clean, accurate Terraform \
                       variable definitions based on schema structure and exact documentation."
                    .to_string(),
                task: self.variables_task(),
                expected_output: "Clean variables.tf with exact schema and literal description match."
                    .to_string(),
            },
            ArtifactKind::Main => InstructionPayload {
                kind,
                role: "Terraform Main Generator: you create a valid main.tf file referencing \
                       variables correctly."
                    .to_string(),
                task: self.main_task(),
                expected_output: "Valid main.tf file only.".to_string(),
            },
            ArtifactKind::Outputs => InstructionPayload {
                kind,
                role: "Terraform Outputs Generator: you generate helpful Terraform outputs for \
                       users to use in other modules."
                    .to_string(),
                task: self.outputs_task(),
                expected_output: "Terraform outputs.tf only.".to_string(),
            },
        }
    }

    /// Build all three payloads.
    pub fn compose_all(&self) -> ModulePayloads {
        ModulePayloads {
            variables: self.compose(ArtifactKind::Variables),
            main: self.compose(ArtifactKind::Main),
            outputs: self.compose(ArtifactKind::Outputs),
        }
    }

    fn documentation_section(&self) -> String {
        match self.doc_text {
            Some(doc) => format!(
                "Use the documentation below to extract the exact description text for each \
                 argument and block.\n\n\
                 --- START DOCUMENTATION ---\n\
                 {}\n\
                 --- END DOCUMENTATION ---\n",
                doc
            ),
            None => "No documentation excerpt is available. Write concise, factual descriptions \
                     derived from the argument and block names.\n"
                .to_string(),
        }
    }

    fn variables_task(&self) -> String {
        format!(
            "{context}\n\n\
             {documentation}\n\
             Instructions for generating variables.tf:\n\
             \n\
             1. VARIABLE INCLUSION:\n\
             \x20  - Generate a valid `variables.tf` file\n\
             \x20  - Include ALL variables from the schema, both required and optional\n\
             \x20  - Do NOT include the Timeouts block as a variable\n\
             \n\
             2. VARIABLE TYPES:\n\
             \x20  - Use the correct Terraform type for each variable based on the schema\n\
             \x20  - For simple types: use `string`, `number`, `bool`\n\
             \x20  - For nested structures: use `object({{...}})` or `list(object({{...}}))`\n\
             \x20  - For maps: use `map(string)`, `map(object({{...}}))`, etc.\n\
             \x20  - For lists: use `list(string)`, `list(object({{...}}))`, etc.\n\
             \x20  - Composite shapes must mirror the Nested Block Tree exactly\n\
             \n\
             3. DEFAULT VALUES:\n\
             \x20  - All optional variables MUST have a default value\n\
             \x20  - Required variables must NOT have a default value\n\
             \x20  - Default values by type:\n\
             \x20    * Optional string variables: `default = null`\n\
             \x20    * Optional number variables: `default = null`\n\
             \x20    * Optional bool variables: `default = null`\n\
             \x20    * Optional object variables: `default = {{}}`\n\
             \x20    * Optional map variables: `default = {{}}`\n\
             \x20    * Optional list variables: `default = []`\n\
             \n\
             4. OBJECT AND MAP DEFINITIONS:\n\
             \x20  - When defining `object()` types, wrap each property with `optional()` if that \
             property does not require input\n\
             \x20  - Example: `object({{name = string, location = optional(string), tags = \
             optional(map(string))}})`\n\
             \x20  - For nested objects, apply `optional()` consistently at each nesting level\n\
             \n\
             5. DESCRIPTIONS:\n\
             \x20  - Every variable MUST have a `description` property\n\
             \x20  - Copy the description text EXACTLY from the documentation\n\
             \x20  - The `description` property MUST be the LAST property in each variable block\n\
             \x20  - For simple variables (string, number, bool, simple lists): use single-line \
             or standard multi-line descriptions\n\
             \x20  - For complex variables (objects, maps with multiple properties): use \
             extensive descriptions with the format:\n\
             \x20    description = <<DESCRIPTION\n\
             \x20    [Main description from the documentation]\n\
             \x20    Properties:\n\
             \x20    - property_name: description of this property\n\
             \x20    - nested_property: description of nested property\n\
             \x20    DESCRIPTION\n\
             \x20  - The markers `<<DESCRIPTION` and `DESCRIPTION` are LITERAL text to be used\n\
             \n\
             6. FORMATTING:\n\
             \x20  - Use consistent indentation (2 spaces per level)\n\
             \x20  - Place each variable in a separate `variable` block\n\
             \x20  - Order variables logically: required variables first, then optional variables\n\
             \x20  - Do NOT include any comments in the code\n\
             \n\
             7. OUTPUT REQUIREMENTS:\n\
             \x20  - Output ONLY raw Terraform HCL code\n\
             \x20  - Do NOT wrap the output in markdown code blocks (no ```, no backticks)\n\
             \x20  - Do NOT include any commentary, explanations, or extra text\n\
             \x20  - The output should be ready to write directly to a .tf file",
            context = self.context,
            documentation = self.documentation_section()
        )
    }

    fn main_task(&self) -> String {
        format!(
            "{context}\n\n\
             Generate a valid Terraform `main.tf` file that creates the resource \
             {resource_type}.\n\
             \n\
             Instructions for generating main.tf:\n\
             \n\
             1. RESOURCE DEFINITION:\n\
             \x20  - Create a single resource block for the resource type\n\
             \x20  - Do NOT include a provider block or provider configuration\n\
             \x20  - Do NOT include the Timeouts block\n\
             \n\
             2. RESOURCE NAMING:\n\
             \x20  - The resource label (local identifier after the resource type) MUST be \
             exactly `{token}`\n\
             \x20  - This is the conventional abbreviation for {display}; do NOT invent a \
             different label\n\
             \x20  - The resource declaration must read:\n\
             \x20    resource \"{resource_type}\" \"{token}\" {{ ... }}\n\
             \n\
             3. VARIABLE REFERENCES:\n\
             \x20  - Reference all simple arguments (strings, numbers, bools, simple lists) \
             using `var.variable_name`\n\
             \x20  - For required arguments: directly use `var.variable_name`\n\
             \x20  - For optional arguments with defaults: use `var.variable_name` (Terraform \
             will use the default if not provided)\n\
             \n\
             4. DYNAMIC BLOCKS:\n\
             \x20  - Use `dynamic` blocks ONLY for properties listed in the Nested Block Tree\n\
             \x20  - Do NOT use dynamic blocks for simple arguments\n\
             \x20  - Each dynamic block must use the exact block name from the schema\n\
             \n\
             5. DYNAMIC BLOCK SYNTAX:\n\
             \x20  - Use `for_each` with implicit iterators\n\
             \x20  - The iterator name MUST match the block name (implicit iterator pattern)\n\
             \x20  - Do NOT create custom iterator names\n\
             \x20  - Access values using `block_name.value` syntax\n\
             \x20  - Example:\n\
             \x20    dynamic \"identity\" {{\n\
             \x20      for_each = var.identity != null ? [var.identity] : []\n\
             \x20      content {{\n\
             \x20        type = identity.value.type\n\
             \x20        identity_ids = identity.value.identity_ids\n\
             \x20      }}\n\
             \x20    }}\n\
             \n\
             6. NESTED DYNAMIC BLOCKS:\n\
             \x20  - When nesting dynamic blocks, each level accesses its parent via \
             `parent_block_name.value`\n\
             \x20  - Do NOT use `var.*` to access variables inside nested content blocks\n\
             \x20  - Access parent dynamic block properties only via the iterator value \
             reference\n\
             \x20  - Example:\n\
             \x20    dynamic \"site_config\" {{\n\
             \x20      for_each = var.site_config != null ? [var.site_config] : []\n\
             \x20      content {{\n\
             \x20        dynamic \"cors\" {{\n\
             \x20          for_each = site_config.value.cors != null ? \
             [site_config.value.cors] : []\n\
             \x20          content {{\n\
             \x20            allowed_origins = cors.value.allowed_origins\n\
             \x20          }}\n\
             \x20        }}\n\
             \x20      }}\n\
             \x20    }}\n\
             \n\
             7. CONTENT BLOCKS:\n\
             \x20  - Do NOT use content{{}} blocks at the root resource level\n\
             \x20  - Content blocks should ONLY appear inside dynamic blocks\n\
             \x20  - The content block defines the structure of each iteration in a dynamic \
             block\n\
             \n\
             8. CONDITIONAL LOGIC:\n\
             \x20  - For optional blocks, use conditional expressions in for_each:\n\
             \x20    for_each = var.block_name != null ? [var.block_name] : []\n\
             \x20  - For optional lists that may be empty:\n\
             \x20    for_each = var.block_list != null ? var.block_list : []\n\
             \x20  - This ensures the block is only created when the variable is provided\n\
             \x20  - IMPORTANT: Do NOT combine both `!= null` AND `length() > 0` checks - \
             choose ONE based on the default value\n\
             \n\
             9. FORMATTING:\n\
             \x20  - Use consistent indentation (2 spaces per level)\n\
             \x20  - Place simple arguments before dynamic blocks\n\
             \x20  - Order arguments alphabetically within each section for consistency\n\
             \x20  - Do NOT include any comments in the code\n\
             \n\
             10. OUTPUT REQUIREMENTS:\n\
             \x20   - Output ONLY valid Terraform HCL code\n\
             \x20   - Do NOT wrap the output in markdown code blocks (no ```, no backticks)\n\
             \x20   - Do NOT include any commentary, explanations, or extra text\n\
             \x20   - The output should be ready to write directly to a .tf file",
            context = self.context,
            resource_type = self.resource_type,
            token = self.naming_token,
            display = display_name(self.provider_name, self.resource_type)
        )
    }

    fn outputs_task(&self) -> String {
        format!(
            "Generate an outputs.tf file for the resource {resource_type}.\n\
             \n\
             Instructions for generating outputs.tf:\n\
             \n\
             1. OUTPUT CONTENT:\n\
             \x20  - Create a SINGLE output that exposes the resource ID\n\
             \x20  - The output name should be: `id`\n\
             \x20  - The output value should reference: `{resource_type}.{token}.id`\n\
             \n\
             2. RESOURCE REFERENCE:\n\
             \x20  - The resource reference MUST use the label `{token}`, the same local \
             identifier used in main.tf\n\
             \x20  - Do NOT invent a different label\n\
             \n\
             3. OUTPUT STRUCTURE:\n\
             \x20  - Include a `description` property in the output block\n\
             \x20  - The description must be: \"The ID of the {display}\"\n\
             \x20  - Example:\n\
             \x20    output \"id\" {{\n\
             \x20      description = \"The ID of the {display}\"\n\
             \x20      value       = {resource_type}.{token}.id\n\
             \x20    }}\n\
             \n\
             4. FORMATTING:\n\
             \x20  - Use consistent indentation (2 spaces per level)\n\
             \x20  - Align the `description` and `value` properties for readability\n\
             \x20  - Do NOT include any comments in the code\n\
             \n\
             5. OUTPUT REQUIREMENTS:\n\
             \x20  - Output ONLY valid Terraform HCL code\n\
             \x20  - Do NOT wrap the output in markdown code blocks (no ```, no backticks)\n\
             \x20  - Do NOT include any commentary, explanations, or extra text\n\
             \x20  - The output should be ready to write directly to a .tf file",
            resource_type = self.resource_type,
            token = self.naming_token,
            display = display_name(self.provider_name, self.resource_type)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_composer<'a>(context: &'a str, doc: Option<&'a str>) -> InstructionComposer<'a> {
        let composer =
            InstructionComposer::new("azurerm", "azurerm_storage_account", "st", context);
        match doc {
            Some(doc) => composer.with_documentation(doc),
            None => composer,
        }
    }

    #[test]
    fn test_token_embedded_in_main_and_outputs() {
        let payloads = sample_composer("CONTEXT", None).compose_all();

        assert!(payloads
            .main
            .task
            .contains("resource \"azurerm_storage_account\" \"st\""));
        assert!(payloads
            .outputs
            .task
            .contains("azurerm_storage_account.st.id"));
    }

    #[test]
    fn test_context_shared_by_variables_and_main() {
        let payloads = sample_composer("CONTEXT-SENTINEL", None).compose_all();

        assert!(payloads.variables.task.starts_with("CONTEXT-SENTINEL"));
        assert!(payloads.main.task.starts_with("CONTEXT-SENTINEL"));
    }

    #[test]
    fn test_variables_task_excludes_timeouts_block() {
        let payload = sample_composer("CONTEXT", None).compose(ArtifactKind::Variables);
        assert!(payload
            .task
            .contains("Do NOT include the Timeouts block as a variable"));
    }

    #[test]
    fn test_documentation_embedded_verbatim() {
        let doc = "`name` - (Required) The name of the storage account.";
        let payload = sample_composer("CONTEXT", Some(doc)).compose(ArtifactKind::Variables);

        assert!(payload.task.contains(doc));
        assert!(payload.task.contains("--- START DOCUMENTATION ---"));
    }

    #[test]
    fn test_missing_documentation_degrades() {
        let payload = sample_composer("CONTEXT", None).compose(ArtifactKind::Variables);
        assert!(payload
            .task
            .contains("No documentation excerpt is available"));
    }

    #[test]
    fn test_outputs_description_uses_display_name() {
        let payload = sample_composer("CONTEXT", None).compose(ArtifactKind::Outputs);
        assert!(payload.task.contains("The ID of the Storage Account"));
    }

    #[test]
    fn test_every_payload_forbids_fencing() {
        for payload in [
            sample_composer("CONTEXT", None).compose(ArtifactKind::Variables),
            sample_composer("CONTEXT", None).compose(ArtifactKind::Main),
            sample_composer("CONTEXT", None).compose(ArtifactKind::Outputs),
        ] {
            assert!(payload.task.contains("no ```, no backticks"));
            assert!(payload.task.contains("2 spaces"));
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ArtifactKind::Variables.file_name(), "variables.tf");
        assert_eq!(ArtifactKind::Main.file_name(), "main.tf");
        assert_eq!(ArtifactKind::Outputs.file_name(), "outputs.tf");
    }
}
