use super::*;

use malachite::base::num::basic::traits::One;

impl Fixed {
  /// The value `scaled / 2^frac_bits`, exactly.
  pub fn from_scaled(scaled: Integer, frac_bits: u32) -> Self {
    Self { scaled, frac_bits }
  }

  /// The integer `n`, held with `frac_bits` fraction bits.
  pub fn from_int(n: i64, frac_bits: u32) -> Self {
    Self { scaled: Integer::from(n) << u64::from(frac_bits), frac_bits }
  }

  /// The ratio `numerator / 2^width`, truncated to `frac_bits` fraction bits.
  ///
  /// This is how a table index `i` becomes the input value `i / 2^in_bits`.
  pub fn from_ratio(numerator: u64, width: u32, frac_bits: u32) -> Self {
    let scaled = (Integer::from(numerator) << u64::from(frac_bits)) >> u64::from(width);
    Self { scaled, frac_bits }
  }

  pub fn zero(frac_bits: u32) -> Self {
    Self { scaled: Integer::ZERO, frac_bits }
  }

  pub fn one(frac_bits: u32) -> Self {
    Self { scaled: Integer::ONE << u64::from(frac_bits), frac_bits }
  }

  /// The weight of fraction bit `n - 1`, i.e. `2^-n`, with `frac_bits` fraction bits. This is 0
  /// if `n > frac_bits`.
  pub fn ulp(n: u32, frac_bits: u32) -> Self {
    Self::one(frac_bits) >> n
  }

  /// Number of fraction bits.
  #[inline]
  pub fn frac_bits(&self) -> u32 {
    self.frac_bits
  }

  /// The underlying integer, i.e. `self × 2^frac_bits`.
  #[inline]
  pub fn scaled(&self) -> &Integer {
    &self.scaled
  }

  pub fn into_scaled(self) -> Integer {
    self.scaled
  }

  pub fn is_zero(&self) -> bool {
    self.scaled == Integer::ZERO
  }

  pub fn is_negative(&self) -> bool {
    self.scaled < Integer::ZERO
  }

  /// Re-express `self` with `frac_bits` fraction bits. Widening is exact; narrowing drops the
  /// low bits, i.e. truncates toward negative infinity.
  pub fn cast(&self, frac_bits: u32) -> Self {
    let scaled = if frac_bits >= self.frac_bits {
      &self.scaled << u64::from(frac_bits - self.frac_bits)
    } else {
      &self.scaled >> u64::from(self.frac_bits - frac_bits)
    };
    Self { scaled, frac_bits }
  }
}
