use fg_core::module::AliasCollisionPolicy;
use serde::{Deserialize, Serialize};

/// What the record literal loop does when one field cannot be synthesized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFailurePolicy {
    /// Log the failure and leave the field out of the literal.
    #[default]
    Skip,
    /// Fail the enclosing value.
    Abort,
}

/// Bounds and policies for one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Exclusive upper bound for signed integers.
    pub max_int: u64,
    /// Upper bound on array and map entries; at least one is always emitted.
    pub max_elements: usize,
    /// Exclusive upper bound on generated string length.
    pub max_string_len: usize,
    /// Maximum number of nested struct literals.
    pub max_depth: usize,
    pub field_failure: FieldFailurePolicy,
    pub alias_collision: AliasCollisionPolicy,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            max_int: 1_000_000,
            max_elements: 3,
            max_string_len: 20,
            max_depth: 5,
            field_failure: FieldFailurePolicy::Skip,
            alias_collision: AliasCollisionPolicy::LastWriterWins,
        }
    }
}
