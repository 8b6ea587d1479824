//! Cross-artifact consistency validation.
//!
//! The three artifacts are generated by independent backend requests, so
//! nothing upstream guarantees they agree on the resource's local
//! identifier. This check is the pipeline's only defense: it extracts the
//! naming token from both the main and outputs artifacts and refuses to
//! let a disagreeing pair reach the module directory.

use regex::Regex;
use tracing::debug;

use crate::error::{ModuleError, ModuleResult};

/// Validator for the main/outputs artifact pair.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Check one sanitized main/outputs pair for the given resource type.
    ///
    /// Returns the agreed naming token on success.
    pub fn check(
        main_text: &str,
        outputs_text: &str,
        resource_type: &str,
    ) -> ModuleResult<String> {
        let main_token = Self::resource_label(main_text, resource_type)?;
        let outputs_token = Self::output_reference(outputs_text, resource_type)?;

        if main_token != outputs_token {
            return Err(ModuleError::NamingMismatch {
                resource_type: resource_type.to_string(),
                main: main_token,
                outputs: outputs_token,
            });
        }

        debug!(
            "Consistency check passed for {} (token '{}')",
            resource_type, main_token
        );
        Ok(main_token)
    }

    // The label of the single resource declaration in main.tf.
    fn resource_label(main_text: &str, resource_type: &str) -> ModuleResult<String> {
        let pattern = format!(
            r#"resource\s+"{}"\s+"([A-Za-z0-9][A-Za-z0-9_-]*)""#,
            regex::escape(resource_type)
        );
        let re = Regex::new(&pattern).expect("resource pattern is valid");

        let labels: Vec<String> = re
            .captures_iter(main_text)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect();

        match labels.len() {
            1 => Ok(labels.into_iter().next().expect("one label")),
            0 => Err(ModuleError::Structural(format!(
                "expected exactly one resource \"{}\" block in main.tf, found none",
                resource_type
            ))),
            n => Err(ModuleError::Structural(format!(
                "expected exactly one resource \"{}\" block in main.tf, found {}",
                resource_type, n
            ))),
        }
    }

    // The token referenced by the single `id` output in outputs.tf.
    fn output_reference(outputs_text: &str, resource_type: &str) -> ModuleResult<String> {
        let output_re = Regex::new(r#"output\s+"id"\s*\{"#).expect("output pattern is valid");
        let count = output_re.find_iter(outputs_text).count();
        if count != 1 {
            return Err(ModuleError::Structural(format!(
                "expected exactly one output \"id\" in outputs.tf, found {}",
                count
            )));
        }

        let pattern = format!(
            r#"{}\.([A-Za-z0-9][A-Za-z0-9_-]*)\.id"#,
            regex::escape(resource_type)
        );
        let re = Regex::new(&pattern).expect("reference pattern is valid");

        re.captures(outputs_text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ModuleError::TokenNotFound {
                resource_type: resource_type.to_string(),
                artifact: "outputs.tf".to_string(),
            })
    }
}
