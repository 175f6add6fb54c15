//! lutgen - generate the pow2 and log2 lookup tables of an LNS datapath

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, builder::BoolishValueParser};
use flexi_logger::Logger;
use log::{error, info};

use lns_lut::{Error, TableKind, TableSpec};

/// Generates pow2 and log2 tables for log-linear conversions
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  /// Bits for input
  #[arg(long = "bits_in", short = 'i', value_name = "BITS")]
  bits_in: u32,

  /// Bits for output
  #[arg(long = "bits_out", short = 'o', value_name = "BITS")]
  bits_out: u32,

  /// Generate the pow2 table
  #[arg(long, value_name = "BOOL", num_args = 0..=1, default_value_t = false, default_missing_value = "true",
    action = ArgAction::Set, value_parser = BoolishValueParser::new())]
  pow: bool,

  /// Generate the log2 table
  #[arg(long, value_name = "BOOL", num_args = 0..=1, default_value_t = false, default_missing_value = "true",
    action = ArgAction::Set, value_parser = BoolishValueParser::new())]
  log: bool,

  /// Generate the pow2 delta table
  #[arg(long = "pow_delta", value_name = "BOOL", num_args = 0..=1, default_value_t = false,
    default_missing_value = "true", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
  pow_delta: bool,

  /// Generate the log2 delta table
  #[arg(long = "log_delta", value_name = "BOOL", num_args = 0..=1, default_value_t = false,
    default_missing_value = "true", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
  log_delta: bool,

  /// Generate memory listings (and the modules loading them) for the pow2 and log2 tables
  #[arg(long, value_name = "BOOL", num_args = 0..=1, default_value_t = false, default_missing_value = "true",
    action = ArgAction::Set, value_parser = BoolishValueParser::new())]
  mem: bool,

  /// Print to stdout only
  #[arg(long, value_name = "BOOL", num_args = 0..=1, default_value_t = false, default_missing_value = "true",
    action = ArgAction::Set, value_parser = BoolishValueParser::new())]
  str: bool,

  /// Round to nearest even; if false, truncate
  #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set,
    value_parser = BoolishValueParser::new())]
  round: bool,

  /// Fraction bits of the internal computations [default: 4 × max(bits_in, bits_out)]
  #[arg(long, value_name = "BITS")]
  precision: Option<u32>,

  /// Directory for the generated files
  #[arg(long = "out_dir", value_name = "DIR", default_value = ".")]
  out_dir: PathBuf,

  /// Print the parameters of the selected tables instead of generating them
  #[arg(long)]
  params: bool,

  /// Logging filter, e.g. `debug` or `lns_lut=trace`; RUST_LOG takes precedence
  #[arg(long = "log_level", value_name = "SPEC", default_value = "info")]
  log_level: String,
}

impl Args {
  /// The selected kinds, in generation order.
  fn kinds(&self) -> Vec<TableKind> {
    TableKind::ALL.into_iter()
      .filter(|kind| match kind {
        TableKind::Pow2 => self.pow,
        TableKind::Pow2Delta => self.pow_delta,
        TableKind::Log2 => self.log,
        TableKind::Log2Delta => self.log_delta,
      })
      .collect()
  }

  fn spec(&self, kind: TableKind) -> TableSpec {
    TableSpec::new(kind, self.bits_in, self.bits_out)
      .with_memory(self.mem)
      .with_rounding(self.round)
      .with_precision(self.precision)
  }
}

fn run(args: &Args) -> anyhow::Result<()> {
  let kinds = args.kinds();
  if kinds.is_empty() {
    return Err(Error::Configuration(
      "no table selected; pass at least one of --pow, --log, --pow_delta, --log_delta".into(),
    ).into())
  }

  for kind in kinds {
    let spec = args.spec(kind);
    let name = spec.module_name();

    if args.params {
      spec.validate().with_context(|| format!("Invalid parameters for {name}"))?;
      print!("# {name}\n{}", spec.params());
      continue
    }

    let table = lns_lut::generate(&spec).with_context(|| format!("Failed to generate {name}"))?;
    let summary = table.summary;
    info!(
      "{name}: {} entries, {} overlaps, {} rounded",
      summary.entries, summary.overlaps, summary.rounded,
    );

    for artifact in &table.artifacts {
      if args.str {
        println!("{}", artifact.contents);
      } else {
        artifact.write_to(&args.out_dir)
          .with_context(|| format!("Failed to write {} to {}", artifact.name, args.out_dir.display()))?;
      }
    }
  }
  Ok(())
}

fn main() -> ExitCode {
  let args = Args::parse();

  let _logger = match Logger::try_with_env_or_str(&args.log_level)
    .and_then(|logger| logger.log_to_stderr().start())
  {
    Ok(handle) => handle,
    Err(e) => {
      eprintln!("lutgen: logger initialization failed with {e}");
      return ExitCode::FAILURE
    },
  };

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e:#}");
      ExitCode::FAILURE
    },
  }
}
