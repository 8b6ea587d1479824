//! # terramod_prompt
//!
//! Instruction payload composition for terramod.
//!
//! Builds the three correlated instruction payloads (variables, main,
//! outputs) from the rendered schema context plus optional reference
//! documentation. The generation backend offers no determinism guarantee,
//! so the payloads leave it no choices: every naming, typing, optionality
//! and formatting rule is stated literally, and the resource's local
//! identifier is resolved in-process ([`naming`]) and embedded in both the
//! main and outputs instructions.

pub mod compose;
pub mod error;
pub mod naming;

pub use compose::{ArtifactKind, InstructionComposer, InstructionPayload, ModulePayloads};
pub use error::{PromptError, PromptResult};
pub use naming::{display_name, resolve_naming_token, short_name};
