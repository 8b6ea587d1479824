//! generate command - Generate a validated module for one resource type.
//!
//! Runs the full pipeline: schema summary → rendered context → three
//! instruction payloads → concurrent backend generation → sanitation →
//! consistency check → module directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use terramod_llm::{GenerationOrchestrator, LlmAdapter, TextGenerator};
use terramod_module::{
    render_versions_block, sanitize, ConsistencyChecker, ModuleArtifacts, ModuleWriter,
};
use terramod_prompt::{resolve_naming_token, ArtifactKind, InstructionComposer};
use terramod_schema::{render_context, SchemaDocument, SchemaExtractor, SchemaSummary};

use crate::docs;

#[derive(Args)]
pub struct GenerateArgs {
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

    /// Module output tree
    #[arg(short, long, default_value = "modules")]
    pub output_dir: PathBuf,

    /// Skip the documentation lookup entirely
    #[arg(long)]
    pub skip_docs: bool,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let resource_type = args.resource_type.clone();

    let summary = load_summary(&args)?;
    let doc_text = load_documentation(&args).await;

    let context = render_context(&resource_type, &summary);
    let naming_token = resolve_naming_token(&args.provider, &resource_type)?;

    let composer =
        InstructionComposer::new(&args.provider, &resource_type, &naming_token, &context);
    let composer = match doc_text.as_deref() {
        Some(doc) => composer.with_documentation(doc),
        None => composer,
    };
    let payloads = composer.compose_all();

    let backend = build_backend()?;

    println!("🤖 Generating module artifacts for {}...", resource_type);
    let outcome = GenerationOrchestrator::generate_all(backend.as_ref(), &payloads).await;

    // All three requests have completed; collect sanitized artifacts and
    // per-kind failures before surfacing anything.
    let mut failures: Vec<String> = outcome
        .failures
        .iter()
        .map(|(kind, error)| format!("{}: {}", kind.file_name(), error))
        .collect();

    let mut clean_artifact = |kind: ArtifactKind| -> Option<String> {
        let artifact = outcome.artifact(kind)?;
        match sanitize(&artifact.raw_text) {
            Ok(text) => Some(text),
            Err(e) => {
                failures.push(format!("{}: {}", kind.file_name(), e));
                None
            }
        }
    };

    let variables = clean_artifact(ArtifactKind::Variables);
    let main = clean_artifact(ArtifactKind::Main);
    let outputs = clean_artifact(ArtifactKind::Outputs);

    // A disagreeing main/outputs pair never reaches the module tree.
    if let (Some(main_text), Some(outputs_text)) = (&main, &outputs) {
        ConsistencyChecker::check(main_text, outputs_text, &resource_type)
            .with_context(|| format!("Consistency validation failed for {}", resource_type))?;
    }

    let artifacts = ModuleArtifacts {
        variables,
        main,
        outputs,
        versions: render_versions_block(&args.supplier, &args.provider, &args.version),
    };

    let writer = ModuleWriter::new(&args.output_dir);
    let module_dir = writer
        .write(&resource_type, &artifacts)
        .with_context(|| format!("Failed to write module for {}", resource_type))?;

    if failures.is_empty() {
        println!("✅ Module generated: {}", module_dir.display());
        Ok(())
    } else {
        println!("❌ Generation incomplete for {}:", resource_type);
        for failure in &failures {
            println!("   - {}", failure);
        }
        anyhow::bail!(
            "Generation failed for {} ({} artifact(s))",
            resource_type,
            failures.len()
        )
    }
}

// Prefer the summary persisted by `extract`; fall back to extracting
// straight from the schema document.
fn load_summary(args: &GenerateArgs) -> Result<SchemaSummary> {
    let summary_path = Path::new("schemas").join(format!("{}.json", args.resource_type));
    if summary_path.is_file() {
        return SchemaSummary::from_file(&summary_path)
            .with_context(|| format!("Failed to read {}", summary_path.display()));
    }

    let schema_path = args.schema_file.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}_{}_schema.json", args.provider, args.version))
    });
    let document = SchemaDocument::from_file(&schema_path)
        .with_context(|| format!("Failed to load schema document {}", schema_path.display()))?;

    let provider_key = SchemaDocument::registry_key(&args.supplier, &args.provider);
    let summary = SchemaExtractor::extract(&document, &provider_key, &args.resource_type)
        .with_context(|| format!("Schema extraction failed for {}", args.resource_type))?;
    Ok(summary)
}

// Use a previously downloaded page when available, otherwise fetch it.
// Absence only degrades description quality.
async fn load_documentation(args: &GenerateArgs) -> Option<String> {
    if args.skip_docs {
        return None;
    }

    let doc_path = Path::new("wiki").join(docs::doc_file_name(&args.provider, &args.resource_type));
    if doc_path.is_file() {
        match fs::read_to_string(&doc_path) {
            Ok(text) => return Some(text),
            Err(e) => println!("⚠️  Failed to read {}: {}", doc_path.display(), e),
        }
    }

    match docs::fetch_resource_doc(
        &args.supplier,
        &args.provider,
        &args.version,
        &args.resource_type,
    )
    .await
    {
        Ok(text) => Some(text),
        Err(e) => {
            println!("⚠️  Proceeding without documentation: {:#}", e);
            None
        }
    }
}

// The workspace settings file wins when present; otherwise the backend is
// configured from environment variables alone.
fn build_backend() -> Result<Box<dyn TextGenerator>> {
    let workspace = std::env::current_dir()?;
    let adapter = if workspace.join(".terramod").join("settings.json").is_file() {
        LlmAdapter::from_settings(&workspace)?
    } else {
        LlmAdapter::from_env()?
    };
    Ok(Box::new(adapter))
}
