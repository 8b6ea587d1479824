//! # terramod_module
//!
//! Artifact sanitation, consistency validation and module writing for
//! terramod.
//!
//! Everything downstream of the generation backend lives here: stripping
//! the formatting debris the backend leaks despite its instructions,
//! enforcing that the main and outputs artifacts agree on the resource's
//! local identifier, and persisting the four module files atomically.

pub mod consistency;
pub mod error;
pub mod sanitize;
pub mod versions;
pub mod writer;

pub use consistency::ConsistencyChecker;
pub use error::{ModuleError, ModuleResult};
pub use sanitize::sanitize;
pub use versions::render_versions_block;
pub use writer::{ModuleArtifacts, ModuleWriter};
