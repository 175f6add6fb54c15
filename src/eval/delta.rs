use super::*;

/// The difference between the rounded value and the input is scaled by `2^DELTA_SHIFT` before
/// being cut to `out_bits - DELTA_SHIFT` fraction bits, so the code keeps the full resolution of
/// the rounded value with fewer bits.
pub const DELTA_SHIFT: u32 = 3;

/// Subtracted from the scaled difference before it is cut to the code width.
pub const DELTA_BIAS: i64 = 7;

/// One entry of a `Pow2Delta` or `Log2Delta` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaExpansion {
  pub index: u64,
  /// The index as an `in_bits`-wide binary literal.
  pub input: String,
  /// The first `out_bits` fraction bits of the rounded function value.
  pub rounded: String,
  /// The `out_bits - DELTA_SHIFT` fraction bits of the delta code.
  pub delta: String,
}

/// The delta code of `rounded` relative to `cur`, with `code_bits` fraction bits:
///
/// ```text
///   ((rounded - cur) << DELTA_SHIFT), cut to code_bits fraction bits, minus DELTA_BIAS
/// ```
pub fn encode_delta(rounded: &Fixed, cur: &Fixed, code_bits: u32) -> Fixed {
  let delta = (rounded - cur) << DELTA_SHIFT;
  delta.cast(code_bits) - Fixed::from_int(DELTA_BIAS, code_bits)
}

/// The value a delta `code` stands for relative to `cur`, with the precision of `cur`; the exact
/// inverse of [`encode_delta`] whenever the code lost nothing.
pub fn decode_delta(code: &Fixed, cur: &Fixed) -> Fixed {
  let frac_bits = cur.frac_bits();
  ((code.cast(frac_bits) + Fixed::from_int(DELTA_BIAS, frac_bits)) >> DELTA_SHIFT) + cur
}

/// Check that `code` decodes back to exactly `rounded`.
fn verify(index: u64, rounded: &Fixed, code: &Fixed, cur: &Fixed) -> Result<()> {
  let recovered = decode_delta(code, cur);
  if &recovered == rounded {
    Ok(())
  } else {
    Err(Error::DeltaInvertibility {
      index,
      rounded: rounded.to_string(),
      recovered: recovered.to_string(),
    })
  }
}

impl Evaluator {
  /// Width of the delta codes, `out_bits - DELTA_SHIFT`. Fails if that leaves no bits at all.
  pub fn delta_bits(&self) -> Result<u32> {
    if self.out_bits <= DELTA_SHIFT {
      return Err(Error::Configuration(format!(
        "delta tables need at least {} output bits, got {}", DELTA_SHIFT + 1, self.out_bits,
      )))
    }
    Ok(self.out_bits - DELTA_SHIFT)
  }

  /// Entry `index` of the delta table.
  ///
  /// The rounded value `y` is taken at `out_bits` fraction bits with its integer part, so a `Pow2`
  /// entry that rounds up to 2.0 is encoded as 2.0 (see [`Evaluator::evaluate_unbounded`]). The
  /// input `cur = index / 2^in_bits` is taken at the same precision. The code is
  /// [`encode_delta`] of the two, and every code is decoded again and compared against `y` bit for bit before it is returned; a
  /// mismatch is a [`Error::DeltaInvertibility`].
  pub fn expand_delta(&self, index: u64) -> Result<DeltaExpansion> {
    let code_bits = self.delta_bits()?;
    let rounded = self.evaluate_unbounded(index)?;

    let y = rounded.value.cast(self.out_bits);
    let cur = Fixed::from_ratio(index, self.in_bits, self.out_bits);
    let code = encode_delta(&y, &cur, code_bits);
    verify(index, &y, &code, &cur)?;

    let delta = code.fraction_string(code_bits)?;
    trace!("{:?} delta {index}: {y} - {cur} -> {code} ({delta})", self.function);
    Ok(DeltaExpansion {
      index,
      input: self.input_literal(index),
      rounded: rounded.value.fraction_string(self.out_bits)?,
      delta,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn expand_all(evaluator: &Evaluator) -> Vec<DeltaExpansion> {
    evaluator.domain().map(|i| evaluator.expand_delta(i).unwrap()).collect()
  }

  #[test]
  fn pow2_2x4() {
    let entries = expand_all(&Evaluator::new(Function::Pow2, 2, 4));
    let rows: Vec<_> = entries.iter()
      .map(|e| (e.input.as_str(), e.rounded.as_str(), e.delta.as_str()))
      .collect();
    assert_eq!(rows, [
      ("00", "0000", "0"),
      ("01", "0011", "1"),
      ("10", "0111", "1"),
      ("11", "1011", "1"),
    ]);
  }

  #[test]
  fn log2_2x4() {
    let entries = expand_all(&Evaluator::new(Function::Log2, 2, 4));
    let rows: Vec<_> = entries.iter()
      .map(|e| (e.rounded.as_str(), e.delta.as_str()))
      .collect();
    assert_eq!(rows, [("0000", "0"), ("0101", "1"), ("1001", "1"), ("1101", "1")]);
  }

  #[test]
  fn pow2_carry_to_two() {
    // 2^(253/256) and up round to 2.0 at 4 bits; the delta code keeps the integer bit
    let evaluator = Evaluator::new(Function::Pow2, 8, 4);
    for index in 253 .. 256 {
      let e = evaluator.expand_delta(index).unwrap();
      assert_eq!(e.rounded, "0000", "{e:?}");
      assert_eq!(e.delta, "1", "{e:?}");
    }
    // cur = 0.1111 for all three; 2.0 - 0.1111 = 1.0001, times 8 = 1000.1, minus 7 = 1.1
    let two = Fixed::from_int(2, 4);
    let cur = Fixed::from_ratio(253, 8, 4);
    assert_eq!(cur, Fixed::from_ratio(15, 4, 4));
    let code = encode_delta(&two, &cur, 1);
    assert_eq!(code, Fixed::from_ratio(0b11, 1, 1));
    assert_eq!(decode_delta(&code, &cur), two);
  }

  /// Every entry of every small delta table decodes back to its rounded value.
  #[test]
  fn invertible_exhaustive() {
    for in_bits in 1 ..= 8 {
      for out_bits in 4 ..= 16 {
        for function in [Function::Pow2, Function::Log2] {
          let evaluator = Evaluator::new(function, in_bits, out_bits);
          for index in evaluator.domain() {
            let entry = evaluator.expand_delta(index);
            assert!(entry.is_ok(), "{function:?} {in_bits}x{out_bits} {index}: {entry:?}");
            assert_eq!(entry.unwrap().delta.len() as u32, out_bits - DELTA_SHIFT);
          }
        }
      }
    }
  }

  #[test]
  fn encode_decode() {
    // y = 1.0111, cur = 0.1000: y - cur = 0.1111, times 8 = 111.1, minus 7 = 0.1
    let y = Fixed::from_ratio(0b10111, 4, 4);
    let cur = Fixed::from_ratio(1, 1, 4);
    let code = encode_delta(&y, &cur, 1);
    assert_eq!(code, Fixed::from_ratio(1, 1, 1));
    assert_eq!(decode_delta(&code, &cur), y);
  }

  #[test]
  fn corrupted_code_is_rejected() {
    let y = Fixed::from_ratio(0b10111, 4, 4);
    let cur = Fixed::from_ratio(1, 1, 4);
    let code = encode_delta(&y, &cur, 1) + Fixed::from_ratio(1, 1, 1);
    match verify(5, &y, &code, &cur) {
      Err(Error::DeltaInvertibility { index, rounded, recovered }) => {
        assert_eq!(index, 5);
        assert_eq!(rounded, "1.0111");
        assert_eq!(recovered, "1.1000");
      },
      other => panic!("{other:?}"),
    }
  }

  #[test]
  fn too_narrow() {
    let evaluator = Evaluator::new(Function::Log2, 4, 3);
    assert!(matches!(evaluator.delta_bits(), Err(Error::Configuration(_))));
    assert!(matches!(evaluator.expand_delta(0), Err(Error::Configuration(_))));
    assert_eq!(Evaluator::new(Function::Log2, 4, 4).delta_bits().unwrap(), 1);
  }
}
