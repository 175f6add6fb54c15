use super::*;

use core::fmt::{Debug, Display};
use malachite::base::num::arithmetic::traits::Abs;
use malachite::base::num::logic::traits::{BitAccess, SignificantBits};

/// Renders `integer.fraction` in binary, with every fraction bit of the precision. The integer
/// part is `floor(self)` (with a `-` if negative), and the fraction is the two's complement
/// fraction, so `integer + fraction` is always the value.
impl Display for Fixed {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let integer = self.integer_part();
    let sign = if integer < Integer::ZERO {"-"} else {""};
    let magnitude = (&integer).abs();
    let width = (&magnitude).significant_bits().max(1);
    let integer: String = (0 .. width).rev()
      .map(|k| if magnitude.get_bit(k) {'1'} else {'0'})
      .collect();
    if self.frac_bits == 0 {
      write!(f, "{sign}{integer}")
    } else {
      write!(f, "{sign}{integer}.{}", self.fraction_digits(self.frac_bits))
    }
  }
}

impl Debug for Fixed {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Fixed")
      .field("value", &format_args!("{self}"))
      .field("frac_bits", &self.frac_bits)
      .finish()
  }
}
