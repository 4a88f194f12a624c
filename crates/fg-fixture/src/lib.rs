//! Synthesizes Go composite literals ("fixtures") for struct types found by
//! static analysis of package sources.

pub mod options;
pub mod primitives;
pub mod render;
pub mod synth;

use std::path::Path;

use fg_core::error::Result;
use fg_core::module::{ModuleLocator, SourceFrontend};
use fg_core::random::RandomSource;

pub use options::{FieldFailurePolicy, SynthesisOptions};
pub use primitives::ScalarKind;
pub use synth::{FixtureSynthesizer, Scope};

/// Generate a literal for the struct `name` declared in the package at `dir`.
///
/// Failing to parse the package or find the struct is fatal; failures inside
/// individual fields are handled per [`SynthesisOptions::field_failure`].
pub fn generate(
    dir: &Path,
    name: &str,
    frontend: &dyn SourceFrontend,
    locator: &dyn ModuleLocator,
    rng: &mut dyn RandomSource,
    options: SynthesisOptions,
) -> Result<String> {
    let module = frontend.parse_module(dir)?;
    let record = module.find_record(name)?;
    let scope = Scope::from_module(&module, options.alias_collision);
    FixtureSynthesizer::new(frontend, locator, rng, options).record_fixture(&record, &scope)
}
