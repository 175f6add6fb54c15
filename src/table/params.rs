use core::fmt::Display;

/// The scalar parameters of a table, as consumed by the descriptor preprocessor. Rendered as
/// `NAME=value` lines; they are plain integers and are never evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
  pub bits_in: u32,
  pub bits_out: u32,
  /// `2^bits_in`.
  pub lut_entries: u64,
  /// Width of one entry as emitted.
  pub lut_width: u32,
  /// Read latency: 0 for the case-statement module, 1 for the memory form.
  pub lut_cycles: u32,
}

impl Params {
  pub fn pairs(&self) -> [(&'static str, u64); 5] {
    [
      ("BITS_IN", self.bits_in.into()),
      ("BITS_OUT", self.bits_out.into()),
      ("LUT_ENTRIES", self.lut_entries),
      ("LUT_WIDTH", self.lut_width.into()),
      ("LUT_CYCLES", self.lut_cycles.into()),
    ]
  }
}

impl Display for Params {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for (name, value) in self.pairs() {
      writeln!(f, "{name}={value}")?;
    }
    Ok(())
  }
}
