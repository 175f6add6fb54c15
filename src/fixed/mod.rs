//! This module and its submodules contain an arbitrary-precision, signed, binary fixed-point
//! number, which is the only numeric type used to compute table entries.
//!
//! A [`Fixed`] is a big integer `scaled` together with a number of fraction bits `frac_bits`; its
//! value is `scaled / 2^frac_bits`. The integer part is unbounded, so additions, subtractions and
//! left shifts are always exact; the only operations that can lose information are right shifts
//! and [casts](Fixed::cast) to fewer fraction bits, which both truncate toward negative infinity.
//! This is the same behaviour as a hardware register that simply drops the low bits, and it is
//! what makes the rounding step in [`crate::round`] the single place where rounding happens.
//!
//! Some notation used in the comments:
//!
//!   - **Fraction bit `k`**: the `k`-th bit after the radix point, numbered from 0. Fraction bit
//!     0 has weight `2^-1`, fraction bit `k` has weight `2^-(k+1)`.
//!   - **Precision**: the number of fraction bits `frac_bits`.

use malachite::Integer;
use malachite::base::num::basic::traits::Zero;

use crate::error::{Error, Result};

/// A signed binary fixed-point number with an arbitrary number of fraction bits.
///
/// ```
/// # use lns_lut::Fixed;
/// let x = Fixed::from_ratio(3, 2, 8);  // 3/4 with 8 fraction bits
/// assert_eq!(x.to_string(), "0.11000000");
/// assert_eq!((&x << 1).to_string(), "1.10000000");
/// ```
#[derive(Clone)]
pub struct Fixed {
  scaled: Integer,
  frac_bits: u32,
}

/// Constructors, accessors, casts.
mod basics;

/// Arithmetic and shift operators, comparison.
mod ops;

/// Extraction of individual bits and bit strings.
mod bits;

/// Binary rendering.
mod fmt;

/// `exp2` and `log2` kernels.
mod math;
