//! Evaluation of one table entry: the function value at high precision, its rounding, and the
//! strings that end up in the emitted table.

use core::ops::Range;

use log::trace;

use crate::Fixed;
use crate::error::{Error, Result};
use crate::overlap::OverlapTracker;
use crate::round::{Rounded, round_to};

/// The delta encoding of a rounded entry, and its invertibility check.
mod delta;

pub use delta::{DELTA_BIAS, DELTA_SHIFT, DeltaExpansion, decode_delta, encode_delta};

/// The functions tabulated over `x ∈ [0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
  /// `2^x`, in `[1, 2)`.
  Pow2,
  /// `log2(1 + x)`, in `[0, 1)`. The hardware feeds this table a mantissa already normalised to
  /// `[1, 2)`, with the leading 1 dropped.
  Log2,
}

impl Function {
  /// The function at `x`, truncated to the precision of `x`.
  pub fn apply(self, x: &Fixed) -> Result<Fixed> {
    match self {
      Function::Pow2 => x.exp2(),
      Function::Log2 => (x + Fixed::one(x.frac_bits())).log2(),
    }
  }

  /// The rounding indicator emitted with an entry, set only where `2^-out_bits` was actually
  /// added (`applied`).
  ///
  /// For `Log2` the indicator is dropped in the lower half of the domain, and in the upper half
  /// it is kept only where the rounded fraction is all zeros; that is, only where rounding up
  /// carried into the integer bit and `log2(1 + x)` became `1.0`.
  fn round_flag(self, index: u64, in_bits: u32, post_round: &str, applied: bool) -> bool {
    match self {
      Function::Pow2 => applied,
      Function::Log2 => {
        let upper_half = index >= (1u64 << in_bits) >> 1;
        applied && upper_half && post_round.bytes().all(|b| b == b'0')
      },
    }
  }

  /// `2^x` stays below 2 on `[0, 1)` and the `Pow2` table has no integer bit, so a rounding that
  /// carries out of the fraction is undone: the entry saturates at the all-ones code instead of
  /// wrapping around to `1.0`. `Log2` keeps its carry, which the round flag reports.
  fn settle(self, rounded: Rounded) -> Rounded {
    let carried = rounded.value.integer_part() != rounded.exact.integer_part();
    if self == Function::Pow2 && rounded.applied && carried {
      let value = rounded.exact.clone();
      Rounded { value, applied: false, ..rounded }
    } else {
      rounded
    }
  }
}

/// The default internal precision: four times the widest width involved, so that the guard,
/// round, and sticky bits are always available and the input is never truncated.
pub fn default_precision(in_bits: u32, out_bits: u32) -> u32 {
  4 * in_bits.max(out_bits)
}

/// One entry of a `Pow2` or `Log2` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
  pub index: u64,
  /// The index as an `in_bits`-wide binary literal.
  pub input: String,
  /// The first `out_bits` fraction bits of the function value, before rounding.
  pub pre_round: String,
  /// The first `out_bits` fraction bits of the function value, after rounding.
  pub post_round: String,
  /// The decision of the rounding analysis (whether or not rounding is enabled).
  pub round_up: bool,
  /// The rounding indicator to emit, see [`Function::round_flag`]. Never set when rounding is
  /// disabled, or where a `Pow2` entry saturated.
  pub round_flag: bool,
  /// Whether `post_round` was already emitted by a lower index of the same table.
  pub overlap: bool,
}

/// Evaluates the entries of a table of `function` from `in_bits` to `out_bits`.
#[derive(Clone, Debug)]
pub struct Evaluator {
  function: Function,
  in_bits: u32,
  out_bits: u32,
  precision: u32,
  rounding: bool,
}

impl Evaluator {
  /// An evaluator with the [default precision](default_precision) and rounding enabled.
  pub fn new(function: Function, in_bits: u32, out_bits: u32) -> Self {
    Self {
      function,
      in_bits,
      out_bits,
      precision: default_precision(in_bits, out_bits),
      rounding: true,
    }
  }

  /// Override the internal precision (fraction bits of every intermediate value).
  pub fn with_precision(mut self, precision: u32) -> Self {
    self.precision = precision;
    self
  }

  /// Enable or disable rounding; when disabled, every entry is truncated.
  pub fn with_rounding(mut self, rounding: bool) -> Self {
    self.rounding = rounding;
    self
  }

  pub fn function(&self) -> Function { self.function }
  pub fn in_bits(&self) -> u32 { self.in_bits }
  pub fn out_bits(&self) -> u32 { self.out_bits }
  pub fn precision(&self) -> u32 { self.precision }
  pub fn rounding(&self) -> bool { self.rounding }

  /// All the indices of the table, in emission order. `in_bits` must be below 64.
  pub fn domain(&self) -> Range<u64> {
    0 .. 1u64 << self.in_bits
  }

  /// The input value of entry `index`, `index / 2^in_bits`, at the internal precision.
  pub fn input(&self, index: u64) -> Result<Fixed> {
    if self.in_bits > self.precision {
      return Err(Error::PrecisionInsufficient { requested: self.in_bits, available: self.precision })
    }
    Ok(Fixed::from_ratio(index, self.in_bits, self.precision))
  }

  /// `index` as an `in_bits`-wide binary literal.
  pub fn input_literal(&self, index: u64) -> String {
    format!("{index:0w$b}", w = self.in_bits as usize)
  }

  /// The function value of entry `index` and its rounding to `out_bits`, as emitted by a table
  /// without integer bits (a `Pow2` carry to 2.0 saturates). This does not touch any overlap
  /// state, and can be called for any index in any order.
  pub fn evaluate(&self, index: u64) -> Result<Rounded> {
    Ok(self.function.settle(self.evaluate_unbounded(index)?))
  }

  /// As [`Self::evaluate`], but keeping any carry into the integer part. The delta tables encode
  /// the integer part too, so they round this way.
  pub fn evaluate_unbounded(&self, index: u64) -> Result<Rounded> {
    let x = self.input(index)?;
    let y = self.function.apply(&x)?;
    round_to(&y, self.out_bits, self.rounding)
  }

  /// Entry `index` of the table, with its output code recorded in `tracker`.
  pub fn expand(&self, index: u64, tracker: &mut OverlapTracker) -> Result<Expansion> {
    let rounded = self.evaluate(index)?;
    let pre_round = rounded.exact.fraction_string(self.out_bits)?;
    let post_round = rounded.value.fraction_string(self.out_bits)?;
    let round_up = rounded.decision.round_up();
    let overlap = tracker.record_and_check(&post_round);
    let round_flag = self.function.round_flag(index, self.in_bits, &post_round, rounded.applied);
    trace!(
      "{:?} {index}: {} -> {pre_round} -> {post_round} ({:?})",
      self.function, rounded.exact, rounded.decision,
    );
    Ok(Expansion {
      index,
      input: self.input_literal(index),
      pre_round,
      post_round,
      round_up,
      round_flag,
      overlap,
    })
  }
}
