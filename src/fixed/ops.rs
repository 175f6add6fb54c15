use super::*;

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Shl, Shr, Sub, SubAssign};

impl Fixed {
  /// `a + b` with the precision of `a`. `b` is [cast](Fixed::cast) to that precision first, so
  /// if `b` has more fraction bits than `a` its extra bits are dropped before adding.
  fn add_kernel(a: &Fixed, b: &Fixed) -> Fixed {
    let b = b.cast(a.frac_bits);
    Fixed { scaled: &a.scaled + b.scaled, frac_bits: a.frac_bits }
  }

  /// `a - b` with the precision of `a`; same rules as [`Self::add_kernel`].
  fn sub_kernel(a: &Fixed, b: &Fixed) -> Fixed {
    let b = b.cast(a.frac_bits);
    Fixed { scaled: &a.scaled - b.scaled, frac_bits: a.frac_bits }
  }

  /// `self` and `other` as integers scaled by the same power of two.
  fn aligned(&self, other: &Fixed) -> (Integer, Integer) {
    let frac_bits = self.frac_bits.max(other.frac_bits);
    (self.cast(frac_bits).scaled, other.cast(frac_bits).scaled)
  }
}

/// Helper macro for implementing operators for all combinations of value and reference
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident, $kernel:ident) => {
    impl $trait<Fixed> for Fixed {
      type Output = Fixed;

      #[inline]
      fn $name(self, rhs: Fixed) -> Self::Output { Fixed::$kernel(&self, &rhs) }
    }

    impl $trait<&Fixed> for Fixed {
      type Output = Fixed;

      #[inline]
      fn $name(self, rhs: &Fixed) -> Self::Output { Fixed::$kernel(&self, rhs) }
    }

    impl $trait<Fixed> for &Fixed {
      type Output = Fixed;

      #[inline]
      fn $name(self, rhs: Fixed) -> Self::Output { Fixed::$kernel(self, &rhs) }
    }

    impl $trait<&Fixed> for &Fixed {
      type Output = Fixed;

      #[inline]
      fn $name(self, rhs: &Fixed) -> Self::Output { Fixed::$kernel(self, rhs) }
    }

    impl $trait_assign<Fixed> for Fixed {
      #[inline]
      fn $name_assign(&mut self, rhs: Fixed) { *self = Fixed::$kernel(self, &rhs) }
    }

    impl $trait_assign<&Fixed> for Fixed {
      #[inline]
      fn $name_assign(&mut self, rhs: &Fixed) { *self = Fixed::$kernel(self, rhs) }
    }
  }
}

mk_ops!{Add, AddAssign, add, add_assign, add_kernel}
mk_ops!{Sub, SubAssign, sub, sub_assign, sub_kernel}

// Shifts move the value, not the radix point: `x << n` is `x × 2^n` (exact) and `x >> n` is
// `x / 2^n` truncated to the precision of `x`.

impl Shl<u32> for Fixed {
  type Output = Fixed;

  #[inline]
  fn shl(self, n: u32) -> Self::Output {
    Fixed { scaled: self.scaled << u64::from(n), frac_bits: self.frac_bits }
  }
}

impl Shl<u32> for &Fixed {
  type Output = Fixed;

  #[inline]
  fn shl(self, n: u32) -> Self::Output {
    Fixed { scaled: &self.scaled << u64::from(n), frac_bits: self.frac_bits }
  }
}

impl Shr<u32> for Fixed {
  type Output = Fixed;

  #[inline]
  fn shr(self, n: u32) -> Self::Output {
    Fixed { scaled: self.scaled >> u64::from(n), frac_bits: self.frac_bits }
  }
}

impl Shr<u32> for &Fixed {
  type Output = Fixed;

  #[inline]
  fn shr(self, n: u32) -> Self::Output {
    Fixed { scaled: &self.scaled >> u64::from(n), frac_bits: self.frac_bits }
  }
}

// Equality and ordering compare values, so `0.1000 == 0.1` even though the precisions differ.

impl PartialEq for Fixed {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Fixed {}

impl PartialOrd for Fixed {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Fixed {
  fn cmp(&self, other: &Self) -> Ordering {
    if self.frac_bits == other.frac_bits {
      self.scaled.cmp(&other.scaled)
    } else {
      let (a, b) = self.aligned(other);
      a.cmp(&b)
    }
  }
}
