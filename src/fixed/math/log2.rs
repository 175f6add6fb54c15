use super::*;

use malachite::base::num::logic::traits::SignificantBits;

impl Fixed {
  /// `log2(self)`, truncated to the precision of `self`. Fails if `self` is not positive.
  ///
  /// Exact when `self` is a power of two.
  ///
  /// ```
  /// # use lns_lut::Fixed;
  /// let x = Fixed::from_ratio(3, 1, 12);  // 1.5
  /// assert_eq!(x.log2().unwrap().to_string(), "0.100101011100");
  /// ```
  pub fn log2(&self) -> Result<Fixed> {
    let w = working_precision("log2", self.frac_bits)?;
    let v = self.cast(w).scaled;
    if v <= Integer::ZERO {
      return Err(Error::Domain { op: "log2", value: self.to_string() })
    }

    // Normalise v = m × 2^e with m ∈ [1, 2). Then log2(v) = e + ln(m) / ln(2).
    let e = (&v).significant_bits() as i64 - 1 - i64::from(w);
    let m = if e >= 0 { v >> e.unsigned_abs() } else { v << e.unsigned_abs() };

    // With z = (m - 1) / (m + 1) ∈ [0, 1/3),
    //
    //   ln(m) = 2 × atanh(z) = 2 × Σ_{k≥0} z^(2k+1) / (2k+1)
    //
    // which gains more than 3 bits per term.
    let one = Integer::power_of_2(u64::from(w));
    let z = ((&m - &one) << u64::from(w)) / (&m + &one);
    let z2 = (&z * &z) >> u64::from(w);
    let mut sum = Integer::ZERO;
    let mut power = z;
    let mut k = 1u64;
    loop {
      let term = &power / Integer::from(k);
      if term == Integer::ZERO { break }
      sum += term;
      power = (power * &z2) >> u64::from(w);
      k += 2;
    }
    let ln_m = sum << 1u64;

    let scaled = (Integer::from(e) << u64::from(w)) + (ln_m << u64::from(w)) / ln2_scaled(w);
    Ok(Fixed::from_scaled(scaled, w).cast(self.frac_bits))
  }
}
