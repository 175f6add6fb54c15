//! Round to nearest, ties to even, for a fixed-point value cut to a number of fraction bits.
//!
//! Let's say we have a bit string that we want to round at the `|`
//!
//! ```text
//!   0.010101|011011 -> round to nearest = down    -> 0.010101
//!   0.010101|111011 -> round to nearest = up      -> 0.010110
//!   0.010101|100000 -> tied, round to even = up   -> 0.010110
//!   0.010100|100000 -> tied, round to even = down -> 0.010100
//! ```
//!
//! Call the lsb of the kept bits `keep`, the first bit afterwards `guard`, the one after that
//! `round`, and the OR of all the remaining bits `sticky`. Then
//!
//! ```text
//!   keep | guard | round | sticky | result
//!   x    | 0     | x     | x      | round down
//!   0    | 1     | 0     | 0      | tie, round down to even
//!   1    | 1     | 0     | 0      | tie, round up to even
//!   x    | 1     | 1     | x      | round up
//!   x    | 1     | x     | 1      | round up
//! ```
//!
//! Every table kind rounds through [`RoundDecision`]; nothing else in the crate decides
//! whether to round up.

use crate::Fixed;
use crate::error::{Error, Result};

/// The bits around a rounding position, and the decision they imply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoundDecision {
  /// The least significant kept bit.
  pub keep: bool,
  /// The first dropped bit.
  pub guard: bool,
  /// The second dropped bit.
  pub round: bool,
  /// Whether any further dropped bit is 1.
  pub sticky: bool,
}

impl RoundDecision {
  pub fn new(keep: bool, guard: bool, round: bool, sticky: bool) -> Self {
    Self { keep, guard, round, sticky }
  }

  /// Look at the bits of `x` around fraction bit `out_bits`, i.e. for rounding `x` to `out_bits`
  /// fraction bits.
  ///
  /// Fails if `out_bits` is 0 (there is no kept bit to tie-break on), or if `x` does not hold at
  /// least `out_bits + 2` fraction bits (the guard and round bits must exist).
  pub fn analyze(x: &Fixed, out_bits: u32) -> Result<Self> {
    if out_bits == 0 {
      return Err(Error::Configuration("cannot round to 0 fraction bits".into()))
    }
    if out_bits + 2 > x.frac_bits() {
      return Err(Error::PrecisionInsufficient { requested: out_bits + 2, available: x.frac_bits() })
    }
    Ok(Self {
      keep: x.fraction_bit(out_bits - 1)?,
      guard: x.fraction_bit(out_bits)?,
      round: x.fraction_bit(out_bits + 1)?,
      sticky: x.any_fraction_bit_from(out_bits + 2),
    })
  }

  #[inline]
  pub fn round_down(&self) -> bool {
    !self.guard || (!self.keep && self.guard && !self.round && !self.sticky)
  }

  #[inline]
  pub fn round_up(&self) -> bool {
    !self.round_down()
  }
}

/// A value rounded to a number of fraction bits.
#[derive(Clone, Debug)]
pub struct Rounded {
  /// The value before rounding.
  pub exact: Fixed,
  /// The value after rounding, still with the precision of `exact`: the bits below the rounding
  /// position are left as they were, and are dropped by whoever reads the first `out_bits`.
  pub value: Fixed,
  pub decision: RoundDecision,
  /// Whether `2^-out_bits` was actually added (the decision said so, and rounding is enabled).
  pub applied: bool,
}

/// Round `x` to `out_bits` fraction bits: add `2^-out_bits` if the [`RoundDecision`] says to
/// round up and `enabled` is set, else leave it be (i.e. truncate).
pub fn round_to(x: &Fixed, out_bits: u32, enabled: bool) -> Result<Rounded> {
  let decision = RoundDecision::analyze(x, out_bits)?;
  let applied = enabled && decision.round_up();
  let value = if applied { x + Fixed::ulp(out_bits, x.frac_bits()) } else { x.clone() };
  Ok(Rounded { exact: x.clone(), value, decision, applied })
}
