//! Version-pinning declaration.
//!
//! The `terraform.tf` artifact is the one file that never goes through the
//! generation backend: it is built directly from the provider identity
//! supplied to the run.

/// Render the version-pinning block for a provider.
pub fn render_versions_block(supplier: &str, name: &str, version: &str) -> String {
    format!(
        r#"terraform {{
  required_version = "~> 1.8"
  required_providers {{
    {name} = {{
      source  = "{supplier}/{name}"
      version = "~> {version}"
    }}
  }}
}}
"#,
        supplier = supplier,
        name = name,
        version = version
    )
}
