//! This crate generates the pow2 and log2 lookup tables of a logarithmic number system datapath,
//! as SystemVerilog case-statement modules or as memory initialisation listings.
//!
//! # Introduction
//!
//! A logarithmic number system (LNS) datapath converts between the linear and the log domain with
//! two small tables: `2^x` and `log2(1 + x)`, both over `x ∈ [0, 1)`. Given an input width and an
//! output width, this crate computes, for every representable input, the function value with an
//! exact fixed-point kernel, rounds it to the output width (round to nearest, ties to even), and
//! renders the table. Along the way it reports which entries were rounded up and which collide
//! with an earlier entry ("overlaps").
//!
//! Two further table kinds, `Pow2Delta` and `Log2Delta`, store only a scaled and biased
//! difference between the rounded value and the input, which needs 3 bits less per entry. Every
//! delta code is decoded again at generation time and checked to give back the rounded value
//! exactly.
//!
//! # Usage
//!
//! ```
//! use lns_lut::{TableKind, TableSpec};
//!
//! let spec = TableSpec::new(TableKind::Pow2, 2, 4);
//! let table = lns_lut::generate(&spec).unwrap();
//! assert_eq!(table.artifacts[0].name, "Pow2LUT_2x4.sv");
//! assert!(table.artifacts[0].contents.contains("      2'b10: out = 4'b0111; // round\n"));
//! assert_eq!(table.summary.entries, 4);
//! ```
//!
//! The `lutgen` binary wraps this in a command line tool; see `lutgen --help`.

pub mod error;
mod fixed;
mod round;
mod overlap;
mod eval;
mod table;

pub use error::{Error, Result};
pub use fixed::Fixed;
pub use round::{RoundDecision, Rounded, round_to};
pub use overlap::OverlapTracker;
pub use eval::{
  DELTA_BIAS,
  DELTA_SHIFT,
  DeltaExpansion,
  Evaluator,
  Expansion,
  Function,
  decode_delta,
  default_precision,
  encode_delta,
};
pub use table::{
  Artifact,
  Generated,
  MAX_IN_BITS,
  MAX_OUT_BITS,
  MAX_PRECISION_BITS,
  Params,
  Summary,
  TableKind,
  TableSpec,
  generate,
  generate_to_string,
};

#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x100} else {0x1000};
