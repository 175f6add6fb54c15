use super::*;

fn prefix(kind: TableKind) -> (&'static str, &'static str) {
  match kind.function() {
    Function::Pow2 => ("pow2", "Pow2Mem"),
    Function::Log2 => ("log2", "Log2Mem"),
  }
}

/// `pow2_<in>x<out>.hex` or `log2_<in>x<out>.hex`.
pub(super) fn listing_name(spec: &TableSpec) -> String {
  format!("{}_{}x{}.hex", prefix(spec.kind).0, spec.in_bits, spec.out_bits)
}

/// `Pow2Mem_<in>x<out>` or `Log2Mem_<in>x<out>`.
pub(super) fn module_name(spec: &TableSpec) -> String {
  format!("{}_{}x{}", prefix(spec.kind).1, spec.in_bits, spec.out_bits)
}

/// One line of bits per row, in index order, for `$readmemb`.
pub(super) fn listing(rows: &[Row]) -> String {
  rows.iter().flat_map(|row| [row.bits.as_str(), "\n"]).collect()
}

/// A module holding the listing in a memory and reading it combinationally.
pub(super) fn module(spec: &TableSpec) -> String {
  let width = spec.output_width();
  let mut text = emit::header(&module_name(spec), spec.in_bits, width);
  text.push_str(&format!(
    "\n  logic [{}:0] mem[0:(2**{})-1];\n\n  initial begin\n    $readmemb(\"{}\", mem);\n  end\n",
    width - 1,
    spec.in_bits,
    listing_name(spec),
  ));
  text.push_str("\n  always_comb begin\n    out = mem[in];\n  end\nendmodule\n");
  text
}
