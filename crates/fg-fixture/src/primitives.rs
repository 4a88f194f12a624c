//! Random literals for Go's scalar kinds.
//!
//! Every kind except `int`, `bool` and `string` is wrapped in a conversion
//! such as `int8(12)` so the literal keeps its width when pasted back into Go
//! source.

use fg_core::random::RandomSource;
use strum_macros::{Display, EnumIter, EnumString};

use crate::options::SynthesisOptions;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    #[strum(serialize = "string")]
    Text,
}

impl ScalarKind {
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

pub fn literal(kind: ScalarKind, rng: &mut dyn RandomSource, options: &SynthesisOptions) -> String {
    let max_int = options.max_int;
    match kind {
        ScalarKind::Int => rng.next_below(max_int).to_string(),
        ScalarKind::Int8 => format!("int8({})", rng.next_below(max_int.min(1 << 7))),
        ScalarKind::Int16 => format!("int16({})", rng.next_below(max_int.min(1 << 15))),
        ScalarKind::Int32 => format!("int32({})", rng.next_below(max_int.min(1 << 31))),
        ScalarKind::Int64 => format!("int64({})", rng.next_below(max_int.min(1 << 63))),
        ScalarKind::Uint => format!("uint({})", rng.next_u32()),
        ScalarKind::Uint8 => format!("uint8({})", rng.next_u32() as u8),
        ScalarKind::Uint16 => format!("uint16({})", rng.next_u32() as u16),
        ScalarKind::Uint32 => format!("uint32({})", rng.next_u32()),
        ScalarKind::Uint64 => format!("uint64({})", rng.next_u64()),
        ScalarKind::Float32 => {
            let value = (rng.next_unit() as f32).min(1.0 - f32::EPSILON);
            format!("float32({})", unit_decimal(f64::from(value)))
        }
        ScalarKind::Float64 => format!("float64({})", unit_decimal(rng.next_unit())),
        ScalarKind::Bool => rng.next_bool().to_string(),
        ScalarKind::Text => text(rng, options.max_string_len),
    }
}

/// Six decimal places, truncated so a draw just under 1 never prints as 1.
fn unit_decimal(value: f64) -> String {
    let micros = ((value * 1e6).floor() as u64).min(999_999);
    format!("0.{micros:06}")
}

/// A double-quoted run of ASCII letters, shorter than `max_len`.
fn text(rng: &mut dyn RandomSource, max_len: usize) -> String {
    let len = rng.next_below(max_len as u64) as usize;
    let mut out = String::with_capacity(len + 2);
    out.push('"');
    for _ in 0..len {
        let idx = rng.next_below(LETTERS.len() as u64) as usize;
        out.push(LETTERS[idx] as char);
    }
    out.push('"');
    out
}
