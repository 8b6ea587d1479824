//! extract command - Normalize one resource type's schema.
//!
//! Loads the exported schema document, extracts the resource type's
//! normalized summary to schemas/<resource_type>.json and downloads the
//! matching documentation page to wiki/.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terramod_schema::{SchemaDocument, SchemaExtractor};

use crate::docs;

#[derive(Args)]
pub struct ExtractArgs {
    /// Provider supplier (registry namespace), e.g. hashicorp
    pub supplier: String,

    /// Provider name, e.g. azurerm
    pub provider: String,

    /// Provider version, e.g. 4.37.0
    pub version: String,

    /// Resource type, e.g. azurerm_storage_account
    pub resource_type: String,

    /// Schema document file (defaults to <provider>_<version>_schema.json)
    #[arg(long)]
    pub schema_file: Option<PathBuf>,

    /// Skip downloading the documentation page
    #[arg(long)]
    pub skip_docs: bool,
}

pub async fn execute(args: ExtractArgs) -> Result<()> {
    println!("🔍 Extracting schema for resource: {}", args.resource_type);

    let schema_path = args.schema_file.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}_{}_schema.json", args.provider, args.version))
    });

    let document = SchemaDocument::from_file(&schema_path)
        .with_context(|| format!("Failed to load schema document {}", schema_path.display()))?;

    let provider_key = SchemaDocument::registry_key(&args.supplier, &args.provider);
    let summary = SchemaExtractor::extract(&document, &provider_key, &args.resource_type)?;

    info!(
        "Extracted {} arguments and {} top-level blocks for {}",
        summary.arguments.len(),
        summary.block_tree.len(),
        args.resource_type
    );

    fs::create_dir_all("schemas")?;
    let summary_path = Path::new("schemas").join(format!("{}.json", args.resource_type));
    summary.save(&summary_path)?;
    println!("📂 Schema summary written to: {}", summary_path.display());

    if !args.skip_docs {
        match docs::fetch_resource_doc(
            &args.supplier,
            &args.provider,
            &args.version,
            &args.resource_type,
        )
        .await
        {
            Ok(markdown) => {
                fs::create_dir_all("wiki")?;
                let doc_path =
                    Path::new("wiki").join(docs::doc_file_name(&args.provider, &args.resource_type));
                fs::write(&doc_path, markdown)?;
                println!("📂 Saved documentation to: {}", doc_path.display());
            }
            Err(e) => {
                println!("⚠️  Failed to download documentation: {:#}", e);
            }
        }
    }

    Ok(())
}
