//! export-schema command - Export a provider schema document.
//!
//! Writes a minimal root configuration into a temporary directory, runs
//! `terraform init` and `terraform providers schema -json` there, and
//! captures the schema document to a file the other commands consume.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::process::Command;
use tracing::debug;

#[derive(Args)]
pub struct ExportSchemaArgs {
    /// Provider supplier (registry namespace), e.g. hashicorp
    pub supplier: String,

    /// Provider name, e.g. azurerm
    pub provider: String,

    /// Provider version, e.g. 4.37.0
    pub version: String,

    /// Output file (defaults to <provider>_<version>_schema.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: ExportSchemaArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}_{}_schema.json", args.provider, args.version))
    });

    let workdir = tempfile::tempdir().context("Failed to create temporary working directory")?;

    let root_config = format!(
        r#"terraform {{
  required_providers {{
    {name} = {{
      source  = "{supplier}/{name}"
      version = "{version}"
    }}
  }}
}}

provider "{name}" {{
  features {{}}
}}
"#,
        supplier = args.supplier,
        name = args.provider,
        version = args.version
    );

    fs::write(workdir.path().join("main.tf"), root_config)?;
    debug!("Temporary provider configuration at {:?}", workdir.path());

    println!("👉 Running 'terraform init'...");
    let status = Command::new("terraform")
        .arg("init")
        .current_dir(workdir.path())
        .status()
        .await
        .context("Failed to run terraform init (is terraform on PATH?)")?;
    if !status.success() {
        anyhow::bail!(
            "terraform init failed for {}/{} {}",
            args.supplier,
            args.provider,
            args.version
        );
    }

    println!("👉 Exporting provider schema...");
    let result = Command::new("terraform")
        .args(["providers", "schema", "-json"])
        .current_dir(workdir.path())
        .output()
        .await
        .context("Failed to run terraform providers schema")?;
    if !result.status.success() {
        anyhow::bail!(
            "terraform providers schema failed: {}",
            String::from_utf8_lossy(&result.stderr)
        );
    }

    fs::write(&output, &result.stdout)
        .with_context(|| format!("Failed to write schema document {}", output.display()))?;

    println!("✅ Schema export completed: {}", output.display());
    Ok(())
}
