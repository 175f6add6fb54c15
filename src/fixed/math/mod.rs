use super::*;

use malachite::base::num::arithmetic::traits::PowerOf2;

/// `2^x`.
mod exp2;

/// `log2(x)`.
mod log2;

/// Extra fraction bits carried through the series evaluations, on top of the precision of the
/// argument. Every series below truncates each term, so the accumulated error is a small number
/// of units in the last place of the *working* precision; 32 guard bits put that error far below
/// anything the final truncation can see.
const GUARD_BITS: u32 = 32;

/// The precision the series of `op` run at for an argument with `frac_bits` fraction bits.
fn working_precision(op: &str, frac_bits: u32) -> Result<u32> {
  frac_bits.checked_add(GUARD_BITS).ok_or_else(|| Error::Configuration(format!(
    "{op} cannot run at {frac_bits} fraction bits",
  )))
}

/// ln 2 with `frac_bits` fraction bits, as a scaled integer, truncated.
///
/// Uses the series
///
///   ln 2 = Σ_{k≥1} 1 / (k × 2^k)
///
/// which gains one bit per term. Every term is truncated, so the result is at most `frac_bits`
/// units of the last place below the true value.
fn ln2_scaled(frac_bits: u32) -> Integer {
  let one = Integer::power_of_2(u64::from(frac_bits));
  let mut sum = Integer::ZERO;
  let mut k = 1u64;
  loop {
    let term = (&one >> k) / Integer::from(k);
    if term == Integer::ZERO { break }
    sum += term;
    k += 1;
  }
  sum
}
