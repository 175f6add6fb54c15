use super::*;

/// Beyond this, `2^x` would not be a reasonable number of bits to materialise.
const MAX_SHIFT: u64 = 1 << 16;

impl Fixed {
  /// `2^self`, truncated to the precision of `self`.
  ///
  /// Exact when `self` is an integer (that is, whenever the true result is representable).
  ///
  /// ```
  /// # use lns_lut::Fixed;
  /// let x = Fixed::from_ratio(1, 1, 16);  // 0.5
  /// assert_eq!(x.exp2().unwrap().to_string(), "1.0110101000001001");  // √2
  /// ```
  pub fn exp2(&self) -> Result<Fixed> {
    // Split x into its integer part n and fractional part f ∈ [0, 1): then 2^x = 2^f × 2^n, and
    // the 2^n is just a shift.
    //
    // 2^f in turn is e^y with y = f × ln 2 ∈ [0, ln 2), where the Taylor series
    //
    //   e^y = Σ_{k≥0} y^k / k!
    //
    // converges by more than one bit per term. Each term is obtained from the previous one as
    // term × y / k, truncating at the working precision.
    let w = working_precision("exp2", self.frac_bits)?;
    let x = self.cast(w).scaled;
    let n = &x >> u64::from(w);
    let f = &x - (&n << u64::from(w));

    let shift = i64::try_from(&n).ok()
      .filter(|n| n.unsigned_abs() <= MAX_SHIFT)
      .ok_or_else(|| Error::Domain { op: "exp2", value: self.to_string() })?;

    let one = Integer::power_of_2(u64::from(w));
    let y = (f * ln2_scaled(w)) >> u64::from(w);
    let mut sum = one.clone();
    let mut term = one;
    let mut k = 1u64;
    loop {
      term = ((term * &y) >> u64::from(w)) / Integer::from(k);
      if term == Integer::ZERO { break }
      sum += &term;
      k += 1;
    }

    let scaled = if shift >= 0 { sum << shift.unsigned_abs() } else { sum >> shift.unsigned_abs() };
    Ok(Fixed::from_scaled(scaled, w).cast(self.frac_bits))
  }
}
