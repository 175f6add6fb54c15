use super::*;

use malachite::base::num::logic::traits::BitAccess;

impl Fixed {
  /// Fraction bit `pos` (0 is the bit directly after the radix point). For negative values this
  /// is the bit of the two's complement representation.
  ///
  /// Fails if `pos` is not within the precision of `self`.
  pub fn fraction_bit(&self, pos: u32) -> Result<bool> {
    if pos >= self.frac_bits {
      return Err(Error::PrecisionInsufficient { requested: pos + 1, available: self.frac_bits })
    }
    Ok(self.scaled.get_bit(u64::from(self.frac_bits - 1 - pos)))
  }

  /// Whether any fraction bit at position `pos` or beyond is 1. Positions beyond the precision
  /// are all 0.
  pub fn any_fraction_bit_from(&self, pos: u32) -> bool {
    let low = u64::from(self.frac_bits.saturating_sub(pos));
    low != 0 && (&self.scaled >> low) << low != self.scaled
  }

  /// The first `n` fraction bits, most significant first, as a string of `0`s and `1`s. This
  /// truncates: nothing beyond bit `n - 1` is looked at.
  ///
  /// Fails if `n` is greater than the precision of `self`.
  ///
  /// ```
  /// # use lns_lut::Fixed;
  /// let x = Fixed::from_ratio(0b1011, 4, 8);
  /// assert_eq!(x.fraction_string(3).unwrap(), "101");
  /// assert!(x.fraction_string(9).is_err());
  /// ```
  pub fn fraction_string(&self, n: u32) -> Result<String> {
    if n > self.frac_bits {
      return Err(Error::PrecisionInsufficient { requested: n, available: self.frac_bits })
    }
    Ok(self.fraction_digits(n))
  }

  /// As [`Self::fraction_string`], with `n` already checked against the precision.
  pub(super) fn fraction_digits(&self, n: u32) -> String {
    debug_assert!(n <= self.frac_bits);
    (0 .. n)
      .map(|pos| self.scaled.get_bit(u64::from(self.frac_bits - 1 - pos)))
      .map(|bit| if bit {'1'} else {'0'})
      .collect()
  }

  /// `floor(self)`.
  pub fn integer_part(&self) -> Integer {
    &self.scaled >> u64::from(self.frac_bits)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fraction_bits() {
    // 0.1011_0001
    let x = Fixed::from_scaled(Integer::from(0b1011_0001), 8);
    let bits: Vec<bool> = (0 .. 8).map(|k| x.fraction_bit(k).unwrap()).collect();
    assert_eq!(bits, [true, false, true, true, false, false, false, true]);
    assert!(matches!(
      x.fraction_bit(8),
      Err(Error::PrecisionInsufficient { requested: 9, available: 8 }),
    ));
  }

  #[test]
  fn sticky() {
    let x = Fixed::from_scaled(Integer::from(0b1011_0001), 8);
    assert!(x.any_fraction_bit_from(7));
    assert!(x.any_fraction_bit_from(4));
    assert!(!x.any_fraction_bit_from(8));
    assert!(!x.any_fraction_bit_from(100));
    let x = Fixed::from_scaled(Integer::from(0b1011_0000), 8);
    assert!(!x.any_fraction_bit_from(4));
    assert!(x.any_fraction_bit_from(3));
  }

  #[test]
  fn fraction_string() {
    let x = Fixed::from_scaled(Integer::from(0b1_0110), 4);  // 1.0110
    assert_eq!(x.fraction_string(4).unwrap(), "0110");
    assert_eq!(x.fraction_string(2).unwrap(), "01");
    assert_eq!(x.fraction_string(0).unwrap(), "");
    assert!(matches!(
      x.fraction_string(5),
      Err(Error::PrecisionInsufficient { requested: 5, available: 4 }),
    ));
  }

  #[test]
  fn negative_two_complement() {
    // -0.25 = ...1.11 in two's complement
    let x = Fixed::from_scaled(Integer::from(-1), 2);
    assert_eq!(x.fraction_string(2).unwrap(), "11");
    assert_eq!(x.integer_part(), Integer::from(-1));
  }
}
