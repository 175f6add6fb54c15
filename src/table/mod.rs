//! Generation of whole tables: one pass over the domain per [`TableSpec`], rendered into named
//! [`Artifact`]s.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::eval::{DELTA_SHIFT, Evaluator, Function};
use crate::overlap::OverlapTracker;

/// Case-statement modules.
mod emit;

/// Memory listings and the modules that load them.
mod mem;

/// Scalar parameters handed to the descriptor preprocessor.
mod params;

pub use params::Params;

/// Widest supported input: a table has `2^in_bits` entries.
pub const MAX_IN_BITS: u32 = 24;

/// Widest supported output.
pub const MAX_OUT_BITS: u32 = 64;

/// Largest internal precision accepted as an override; four times the default for the widest
/// output.
pub const MAX_PRECISION_BITS: u32 = 16 * MAX_OUT_BITS;

/// The four kinds of table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
  Pow2,
  Pow2Delta,
  Log2,
  Log2Delta,
}

impl TableKind {
  /// Every kind, in generation order.
  pub const ALL: [TableKind; 4] = [
    TableKind::Pow2,
    TableKind::Pow2Delta,
    TableKind::Log2,
    TableKind::Log2Delta,
  ];

  pub fn function(self) -> Function {
    match self {
      TableKind::Pow2 | TableKind::Pow2Delta => Function::Pow2,
      TableKind::Log2 | TableKind::Log2Delta => Function::Log2,
    }
  }

  pub fn is_delta(self) -> bool {
    matches!(self, TableKind::Pow2Delta | TableKind::Log2Delta)
  }

  /// Prefix of the name of the case-statement module.
  pub fn module_prefix(self) -> &'static str {
    match self {
      TableKind::Pow2 => "Pow2LUT",
      TableKind::Pow2Delta => "Pow2DeltaLUT",
      TableKind::Log2 => "Log2LUT",
      TableKind::Log2Delta => "Log2DeltaLUT",
    }
  }
}

/// Everything that determines one table. Built with [`TableSpec::new`] and the `with_*` methods,
/// and checked with [`TableSpec::validate`] before anything is computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSpec {
  kind: TableKind,
  in_bits: u32,
  out_bits: u32,
  memory: bool,
  rounding: bool,
  precision_bits: Option<u32>,
}

impl TableSpec {
  /// A case-statement table with rounding enabled and the default precision.
  pub fn new(kind: TableKind, in_bits: u32, out_bits: u32) -> Self {
    Self { kind, in_bits, out_bits, memory: false, rounding: true, precision_bits: None }
  }

  /// Emit a memory listing (and the module that loads it) instead of a case statement. Delta
  /// tables have no memory form and ignore this.
  pub fn with_memory(mut self, memory: bool) -> Self {
    self.memory = memory;
    self
  }

  pub fn with_rounding(mut self, rounding: bool) -> Self {
    self.rounding = rounding;
    self
  }

  /// Override the internal precision, see [`crate::default_precision`].
  pub fn with_precision(mut self, precision_bits: Option<u32>) -> Self {
    self.precision_bits = precision_bits;
    self
  }

  pub fn kind(&self) -> TableKind { self.kind }
  pub fn in_bits(&self) -> u32 { self.in_bits }
  pub fn out_bits(&self) -> u32 { self.out_bits }
  pub fn rounding(&self) -> bool { self.rounding }
  pub fn precision_bits(&self) -> Option<u32> { self.precision_bits }

  /// Whether the table is emitted in memory form.
  pub fn memory(&self) -> bool {
    self.memory && !self.kind.is_delta()
  }

  /// Check the widths, and the precision override against them.
  pub fn validate(&self) -> Result<()> {
    if self.in_bits == 0 || self.in_bits > MAX_IN_BITS {
      return Err(Error::Configuration(format!(
        "input width must be between 1 and {MAX_IN_BITS}, got {}", self.in_bits,
      )))
    }
    if self.out_bits == 0 || self.out_bits > MAX_OUT_BITS {
      return Err(Error::Configuration(format!(
        "output width must be between 1 and {MAX_OUT_BITS}, got {}", self.out_bits,
      )))
    }
    if self.kind.is_delta() {
      self.evaluator().delta_bits()?;
    }
    if let Some(precision) = self.precision_bits {
      if precision > MAX_PRECISION_BITS {
        return Err(Error::Configuration(format!(
          "precision must be at most {MAX_PRECISION_BITS} fraction bits, got {precision}",
        )))
      }
      // The input must fit, and rounding needs the guard and round bits
      let requested = self.in_bits.max(self.out_bits + 2);
      if precision < requested {
        return Err(Error::PrecisionInsufficient { requested, available: precision })
      }
    }
    Ok(())
  }

  /// The evaluator for the entries of this table.
  pub fn evaluator(&self) -> Evaluator {
    let evaluator = Evaluator::new(self.kind.function(), self.in_bits, self.out_bits)
      .with_rounding(self.rounding);
    match self.precision_bits {
      Some(precision) => evaluator.with_precision(precision),
      None => evaluator,
    }
  }

  /// Width of one table entry: the output bits, plus the round flag for `Log2`, minus the
  /// [`DELTA_SHIFT`] for the delta kinds.
  pub fn output_width(&self) -> u32 {
    match self.kind {
      TableKind::Pow2 => self.out_bits,
      TableKind::Log2 => self.out_bits + 1,
      TableKind::Pow2Delta | TableKind::Log2Delta => self.out_bits.saturating_sub(DELTA_SHIFT),
    }
  }

  /// `<prefix>_<in>x<out>`, the name of the case-statement module.
  pub fn module_name(&self) -> String {
    format!("{}_{}x{}", self.kind.module_prefix(), self.in_bits, self.out_bits)
  }

  pub fn params(&self) -> Params {
    Params {
      bits_in: self.in_bits,
      bits_out: self.out_bits,
      lut_entries: 1u64 << self.in_bits,
      lut_width: self.output_width(),
      lut_cycles: if self.memory() {1} else {0},
    }
  }
}

/// One entry, ready to render: the input literal, the output bits, and its annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
  input: String,
  bits: String,
  overlap: bool,
  round: bool,
}

impl Row {
  /// The trailing comment of the case arm.
  fn annotation(&self) -> &'static str {
    match (self.overlap, self.round) {
      (true, true) => " // overlap + round",
      (true, false) => " // overlap",
      (false, true) => " // round",
      (false, false) => "",
    }
  }
}

/// Counts over one generation pass. Overlaps and rounds are only tracked for the `Pow2` and
/// `Log2` kinds; they are 0 for the delta kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
  pub entries: u64,
  /// Entries whose output code was already emitted by a lower index.
  pub overlaps: u64,
  /// Entries annotated as rounded.
  pub rounded: u64,
}

/// A named piece of generated text: a `.sv` module or a `.hex` memory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
  pub name: String,
  pub contents: String,
}

impl Artifact {
  /// Write the artifact to `dir/name`, replacing any existing file.
  pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(&self.name);
    std::fs::write(&path, &self.contents)?;
    info!("Wrote {}", path.display());
    Ok(path)
  }
}

/// The result of one generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
  pub artifacts: Vec<Artifact>,
  pub summary: Summary,
}

/// Evaluate every entry of `spec`, in index order.
fn rows(spec: &TableSpec) -> Result<Vec<Row>> {
  let evaluator = spec.evaluator();
  let mut tracker = OverlapTracker::new();
  evaluator.domain().map(|index| -> Result<Row> {
    if spec.kind.is_delta() {
      let e = evaluator.expand_delta(index)?;
      Ok(Row { input: e.input, bits: e.delta, overlap: false, round: false })
    } else {
      let e = evaluator.expand(index, &mut tracker)?;
      let bits = match spec.kind.function() {
        Function::Pow2 => e.post_round,
        Function::Log2 => format!("{}{}", u8::from(e.round_flag), e.post_round),
      };
      Ok(Row { input: e.input, bits, overlap: e.overlap, round: e.round_flag })
    }
  }).collect()
}

/// Generate the table described by `spec`.
///
/// Returns the case-statement module, or in memory form the memory listing followed by the module
/// that loads it. All text is built in memory, so on error nothing has been produced.
pub fn generate(spec: &TableSpec) -> Result<Generated> {
  spec.validate()?;
  debug!("Generating {} ({spec:?})", spec.module_name());
  let rows = rows(spec)?;

  let summary = Summary {
    entries: rows.len() as u64,
    overlaps: rows.iter().filter(|r| r.overlap).count() as u64,
    rounded: rows.iter().filter(|r| r.round).count() as u64,
  };
  debug!(
    "{}: {} entries, {} overlaps, {} rounded",
    spec.module_name(), summary.entries, summary.overlaps, summary.rounded,
  );

  let artifacts = if spec.memory() {
    vec![
      Artifact { name: mem::listing_name(spec), contents: mem::listing(&rows) },
      Artifact { name: format!("{}.sv", mem::module_name(spec)), contents: mem::module(spec) },
    ]
  } else {
    let name = spec.module_name();
    let contents = emit::module(&name, spec.in_bits, spec.output_width(), &rows);
    vec![Artifact { name: format!("{name}.sv"), contents }]
  };
  Ok(Generated { artifacts, summary })
}

/// The contents of every artifact of [`generate`], concatenated.
pub fn generate_to_string(spec: &TableSpec) -> Result<String> {
  let table = generate(spec)?;
  Ok(table.artifacts.into_iter().map(|a| a.contents).collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds() {
    assert_eq!(TableKind::ALL.map(TableKind::module_prefix), [
      "Pow2LUT", "Pow2DeltaLUT", "Log2LUT", "Log2DeltaLUT",
    ]);
    assert_eq!(TableKind::Log2Delta.function(), Function::Log2);
    assert!(TableKind::Pow2Delta.is_delta() && !TableKind::Log2.is_delta());
  }

  #[test]
  fn validate() {
    assert!(TableSpec::new(TableKind::Pow2, 2, 4).validate().is_ok());
    assert!(TableSpec::new(TableKind::Pow2Delta, 2, 4).validate().is_ok());
    for spec in [
      TableSpec::new(TableKind::Pow2, 0, 4),
      TableSpec::new(TableKind::Pow2, 4, 0),
      TableSpec::new(TableKind::Log2, MAX_IN_BITS + 1, 4),
      TableSpec::new(TableKind::Log2, 4, MAX_OUT_BITS + 1),
      TableSpec::new(TableKind::Log2Delta, 4, 3),
    ] {
      assert!(matches!(spec.validate(), Err(Error::Configuration(_))), "{spec:?}");
      assert!(matches!(generate(&spec), Err(Error::Configuration(_))), "{spec:?}");
    }
  }

  #[test]
  fn output_width() {
    assert_eq!(TableSpec::new(TableKind::Pow2, 6, 10).output_width(), 10);
    assert_eq!(TableSpec::new(TableKind::Log2, 6, 10).output_width(), 11);
    assert_eq!(TableSpec::new(TableKind::Pow2Delta, 6, 10).output_width(), 7);
    assert_eq!(TableSpec::new(TableKind::Log2Delta, 6, 10).output_width(), 7);
  }

  #[test]
  fn memory_only_for_plain_kinds() {
    assert!(TableSpec::new(TableKind::Log2, 2, 4).with_memory(true).memory());
    assert!(!TableSpec::new(TableKind::Log2Delta, 2, 4).with_memory(true).memory());
    let table = generate(&TableSpec::new(TableKind::Pow2Delta, 2, 4).with_memory(true)).unwrap();
    let names: Vec<_> = table.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Pow2DeltaLUT_2x4.sv"]);
  }

  #[test]
  fn pow2_2x4() {
    let table = generate(&TableSpec::new(TableKind::Pow2, 2, 4)).unwrap();
    assert_eq!(table.artifacts.len(), 1);
    assert_eq!(table.artifacts[0].name, "Pow2LUT_2x4.sv");
    let expected = "
module Pow2LUT_2x4
  (input [1:0] in,
   output logic [3:0] out);

  always_comb begin
    case (in)
      2'b00: out = 4'b0000;
      2'b01: out = 4'b0011;
      2'b10: out = 4'b0111; // round
      2'b11: out = 4'b1011; // round
      default: out = 4'bxxxx;
    endcase
  end
endmodule
";
    assert_eq!(table.artifacts[0].contents, expected);
    assert_eq!(table.artifacts[0].contents.lines().count(), 15);
    assert_eq!(table.summary, Summary { entries: 4, overlaps: 0, rounded: 2 });
  }

  #[test]
  fn pow2_2x4_arms() {
    let text = generate_to_string(&TableSpec::new(TableKind::Pow2, 2, 4)).unwrap();
    let arms: Vec<_> = text.lines().filter(|l| l.starts_with("      2'b")).collect();
    assert_eq!(arms.len(), 4);
    assert!(arms.iter().all(|l| l[8 ..].starts_with(": out = 4'b")));
    assert_eq!(text.lines().filter(|l| l.trim_start().starts_with("default:")).count(), 1);
  }

  #[test]
  fn log2_2x4() {
    let text = generate_to_string(&TableSpec::new(TableKind::Log2, 2, 4)).unwrap();
    assert!(text.starts_with("\nmodule Log2LUT_2x4\n  (input [1:0] in,\n   output logic [4:0] out);\n"));
    for arm in [
      "      2'b00: out = 5'b00000;\n",
      "      2'b01: out = 5'b00101;\n",
      "      2'b10: out = 5'b01001;\n",
      "      2'b11: out = 5'b01101;\n",
      "      default: out = 5'bxxxxx;\n",
    ] {
      assert!(text.contains(arm), "{arm}");
    }
  }

  #[test]
  fn log2_carry() {
    let table = generate(&TableSpec::new(TableKind::Log2, 6, 4)).unwrap();
    let text = &table.artifacts[0].contents;
    assert!(text.contains("      6'b111110: out = 5'b10000; // overlap + round\n"));
    assert!(text.contains("      6'b111111: out = 5'b10000; // overlap + round\n"));
    assert_eq!(table.summary.rounded, 2);
  }

  #[test]
  fn pow2_carry_8x4() {
    // The last entries round to 2.0: the plain table saturates, the delta table keeps the carry
    let table = generate(&TableSpec::new(TableKind::Pow2, 8, 4)).unwrap();
    let text = &table.artifacts[0].contents;
    for input in ["11111101", "11111110", "11111111"] {
      assert!(text.contains(&format!("      8'b{input}: out = 4'b1111; // overlap\n")), "{input}");
    }
    let text = generate_to_string(&TableSpec::new(TableKind::Pow2Delta, 8, 4)).unwrap();
    for input in ["11111101", "11111110", "11111111"] {
      assert!(text.contains(&format!("      8'b{input}: out = 1'b1;\n")), "{input}");
    }
  }

  #[test]
  fn overlaps_3x2() {
    let table = generate(&TableSpec::new(TableKind::Pow2, 3, 2)).unwrap();
    assert_eq!(table.summary.entries, 8);
    assert_eq!(table.summary.overlaps, 4);
    let text = &table.artifacts[0].contents;
    assert!(text.contains("      3'b000: out = 2'b00;\n"));
    assert!(text.contains("      3'b001: out = 2'b00; // overlap"));
  }

  #[test]
  fn delta_2x4() {
    let text = generate_to_string(&TableSpec::new(TableKind::Pow2Delta, 2, 4)).unwrap();
    let expected = "
module Pow2DeltaLUT_2x4
  (input [1:0] in,
   output logic [0:0] out);

  always_comb begin
    case (in)
      2'b00: out = 1'b0;
      2'b01: out = 1'b1;
      2'b10: out = 1'b1;
      2'b11: out = 1'b1;
      default: out = 1'bx;
    endcase
  end
endmodule
";
    assert_eq!(text, expected);
    let text = generate_to_string(&TableSpec::new(TableKind::Log2Delta, 2, 4)).unwrap();
    assert!(text.starts_with("\nmodule Log2DeltaLUT_2x4\n"));
    assert!(!text.contains("//"));
  }

  #[test]
  fn memory_2x4() {
    let table = generate(&TableSpec::new(TableKind::Log2, 2, 4).with_memory(true)).unwrap();
    let names: Vec<_> = table.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["log2_2x4.hex", "Log2Mem_2x4.sv"]);
    assert_eq!(table.artifacts[0].contents, "00000\n00101\n01001\n01101\n");
    assert!(table.artifacts[1].contents.contains("$readmemb(\"log2_2x4.hex\", mem);"));
  }

  #[test]
  fn precision_override() {
    let spec = TableSpec::new(TableKind::Pow2, 8, 8).with_precision(Some(6));
    assert!(matches!(
      spec.validate(),
      Err(Error::PrecisionInsufficient { requested: 10, available: 6 }),
    ));
    assert!(matches!(generate(&spec), Err(Error::PrecisionInsufficient { .. })));
    let spec = TableSpec::new(TableKind::Log2, 12, 4).with_precision(Some(11));
    assert!(matches!(
      spec.validate(),
      Err(Error::PrecisionInsufficient { requested: 12, available: 11 }),
    ));
    for precision in [MAX_PRECISION_BITS + 1, u32::MAX] {
      let spec = TableSpec::new(TableKind::Pow2, 2, 4).with_precision(Some(precision));
      assert!(matches!(spec.validate(), Err(Error::Configuration(_))), "{precision}");
      assert!(matches!(generate(&spec), Err(Error::Configuration(_))), "{precision}");
    }
    assert!(TableSpec::new(TableKind::Pow2, 2, 4).with_precision(Some(6)).validate().is_ok());
    let spec = TableSpec::new(TableKind::Pow2, 2, 4).with_precision(Some(64));
    assert_eq!(
      generate_to_string(&spec).unwrap(),
      generate_to_string(&TableSpec::new(TableKind::Pow2, 2, 4)).unwrap(),
    );
  }

  #[test]
  fn rounding_disabled() {
    let spec = TableSpec::new(TableKind::Pow2, 2, 4).with_rounding(false);
    let text = generate_to_string(&spec).unwrap();
    assert!(text.contains("      2'b10: out = 4'b0110;\n"));
    assert!(!text.contains("// round"));
  }

  #[test]
  fn write_to() {
    let dir = std::env::temp_dir().join(format!("lns-lut-write-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let artifact = Artifact { name: "t.hex".into(), contents: "01\n".into() };
    let path = artifact.write_to(&dir).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "01\n");
    std::fs::remove_dir_all(&dir).unwrap();
    assert!(matches!(artifact.write_to(&dir), Err(Error::Io(_))));
  }
}
