//! CLI command definitions.
//!
//! Each subcommand maps to one stage of the module generation toolchain:
//! exporting the raw provider schema, extracting one resource type's
//! normalized summary, and generating the module itself.

use clap::{Parser, Subcommand};

pub mod export_schema;
pub mod extract;
pub mod generate;

/// terramod - schema-accurate Terraform module generation
#[derive(Parser)]
#[command(name = "terramod")]
#[command(version, about = "terramod - schema-accurate Terraform module generation")]
#[command(long_about = r#"
terramod turns a Terraform provider's machine-readable resource schema into
ready-to-use module files (variables.tf, main.tf, outputs.tf, terraform.tf),
synthesized by an LLM backend under strict, literal instructions and
validated for cross-artifact consistency before anything is written.

WORKFLOWS:
  export-schema → Export a provider's full schema document via terraform
  extract       → Normalize one resource type's schema and fetch its docs
  generate      → Generate and validate the module for one resource type

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Schema error
  4 - Generation backend error
  5 - Consistency/validation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a provider schema document using the terraform CLI
    #[command(name = "export-schema")]
    ExportSchema(export_schema::ExportSchemaArgs),

    /// Extract one resource type's normalized schema summary
    Extract(extract::ExtractArgs),

    /// Generate a validated module for one resource type
    Generate(generate::GenerateArgs),
}
