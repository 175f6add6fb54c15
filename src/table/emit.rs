use super::*;

/// Port list shared by every generated module.
pub(super) fn header(name: &str, in_bits: u32, width: u32) -> String {
  format!(
    "\nmodule {name}\n  (input [{}:0] in,\n   output logic [{}:0] out);\n",
    in_bits - 1,
    width - 1,
  )
}

/// A combinational case statement with one arm per row, and an all-`x` default arm.
pub(super) fn module(name: &str, in_bits: u32, width: u32, rows: &[Row]) -> String {
  let mut text = header(name, in_bits, width);
  text.push_str("\n  always_comb begin\n    case (in)\n");
  for row in rows {
    text.push_str(&format!(
      "      {in_bits}'b{}: out = {width}'b{};{}\n",
      row.input, row.bits, row.annotation(),
    ));
  }
  text.push_str(&format!("      default: out = {width}'b{};\n", "x".repeat(width as usize)));
  text.push_str("    endcase\n  end\nendmodule\n");
  text
}
