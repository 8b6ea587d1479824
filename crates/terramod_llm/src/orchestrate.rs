//! Generation orchestration.
//!
//! Dispatches the three instruction payloads concurrently and collects
//! every result before any failure is surfaced. The requests share no
//! conversation state; cross-artifact agreement is the composer's and the
//! consistency check's job, not the backend's.

use tracing::{info, warn};

use terramod_prompt::{ArtifactKind, ModulePayloads};

use crate::backend::TextGenerator;
use crate::error::{LlmError, LlmResult};

/// Raw text produced by the backend for one artifact kind.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub raw_text: String,
}

/// Collected results of one three-request generation round.
///
/// Successes and failures are kept side by side so a failed artifact never
/// suppresses the diagnostics (or the writing) of the others.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub artifacts: Vec<GeneratedArtifact>,
    pub failures: Vec<(ArtifactKind, LlmError)>,
}

impl GenerationOutcome {
    /// True when all three artifacts were generated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Look up a successfully generated artifact by kind.
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Aggregate failure as an error, listing every failed kind.
    pub fn to_error(&self) -> LlmError {
        let details: Vec<String> = self
            .failures
            .iter()
            .map(|(kind, error)| format!("{}: {}", kind.file_name(), error))
            .collect();
        LlmError::Generation(details.join("; "))
    }
}

/// Orchestrator for the three correlated generation requests.
pub struct GenerationOrchestrator;

impl GenerationOrchestrator {
    /// Dispatch all three payloads and wait for every result.
    ///
    /// The requests run concurrently but independently; the suspension
    /// point is "all three completed (or failed)".
    pub async fn generate_all(
        backend: &dyn TextGenerator,
        payloads: &ModulePayloads,
    ) -> GenerationOutcome {
        info!("Dispatching generation requests for all three artifacts");

        let (variables, main, outputs) = tokio::join!(
            backend.generate(&payloads.variables),
            backend.generate(&payloads.main),
            backend.generate(&payloads.outputs),
        );

        let mut outcome = GenerationOutcome {
            artifacts: Vec::new(),
            failures: Vec::new(),
        };

        for (kind, result) in [
            (ArtifactKind::Variables, variables),
            (ArtifactKind::Main, main),
            (ArtifactKind::Outputs, outputs),
        ] {
            match result {
                Ok(raw_text) => outcome.artifacts.push(GeneratedArtifact { kind, raw_text }),
                Err(error) => {
                    warn!("Generation failed for {}: {}", kind.file_name(), error);
                    outcome.failures.push((kind, error));
                }
            }
        }

        outcome
    }

    /// Dispatch all three payloads, failing on any incomplete result.
    pub async fn generate_all_strict(
        backend: &dyn TextGenerator,
        payloads: &ModulePayloads,
    ) -> LlmResult<GenerationOutcome> {
        let outcome = Self::generate_all(backend, payloads).await;
        if outcome.is_complete() {
            Ok(outcome)
        } else {
            Err(outcome.to_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;
    use terramod_prompt::InstructionComposer;

    fn sample_payloads() -> ModulePayloads {
        InstructionComposer::new("azurerm", "azurerm_storage_account", "st", "CONTEXT")
            .compose_all()
    }

    #[tokio::test]
    async fn test_all_three_dispatched() {
        let backend = MockGenerator::new()
            .respond_with(ArtifactKind::Variables, "variable \"name\" {}")
            .respond_with(ArtifactKind::Main, "resource {}")
            .respond_with(ArtifactKind::Outputs, "output \"id\" {}");

        let outcome = GenerationOrchestrator::generate_all(&backend, &sample_payloads()).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.artifacts.len(), 3);
        assert_eq!(backend.captured_payloads().len(), 3);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_suppress_others() {
        let backend = MockGenerator::new()
            .respond_with(ArtifactKind::Variables, "variable \"name\" {}")
            .fail_with(ArtifactKind::Main, "rate limited")
            .respond_with(ArtifactKind::Outputs, "output \"id\" {}");

        let outcome = GenerationOrchestrator::generate_all(&backend, &sample_payloads()).await;

        assert!(!outcome.is_complete());
        assert_eq!(outcome.artifacts.len(), 2);
        assert!(outcome.artifact(ArtifactKind::Variables).is_some());
        assert!(outcome.artifact(ArtifactKind::Main).is_none());

        let message = outcome.to_error().to_string();
        assert!(message.contains("main.tf"));
        assert!(message.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_backend_receives_distinct_payloads() {
        let mut backend = crate::backend::MockTextGenerator::new();
        backend
            .expect_generate()
            .times(3)
            .returning(|payload| Ok(format!("generated for {}", payload.kind)));

        let outcome = GenerationOrchestrator::generate_all(&backend, &sample_payloads()).await;

        assert!(outcome.is_complete());
        assert_eq!(
            outcome.artifact(ArtifactKind::Main).unwrap().raw_text,
            "generated for main"
        );
        assert_eq!(
            outcome.artifact(ArtifactKind::Outputs).unwrap().raw_text,
            "generated for outputs"
        );
    }

    #[tokio::test]
    async fn test_strict_mode_fails_on_partial_results() {
        let backend = MockGenerator::new()
            .respond_with(ArtifactKind::Variables, "variable \"name\" {}")
            .fail_with(ArtifactKind::Main, "boom")
            .fail_with(ArtifactKind::Outputs, "boom");

        let result =
            GenerationOrchestrator::generate_all_strict(&backend, &sample_payloads()).await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("main.tf"));
        assert!(message.contains("outputs.tf"));
    }
}
