//! Error type shared by every stage of table generation.

use thiserror::Error;

/// Everything that can stop the generation of a table. None of these are recoverable: all
/// computations are deterministic, so the same input fails the same way every time.
#[derive(Error, Debug)]
pub enum Error {
  /// The requested widths or table selection are invalid; generation does not start.
  #[error("Invalid configuration: {0}")]
  Configuration(String),

  /// A bit position beyond the precision held by a fixed-point value was needed.
  #[error("Insufficient precision: needed {requested} fraction bits, only {available} available")]
  PrecisionInsufficient { requested: u32, available: u32 },

  /// Decoding a delta code did not give back the rounded value it was computed from.
  #[error("Delta code for index {index} is not invertible: rounded {rounded}, recovered {recovered}")]
  DeltaInvertibility { index: u64, rounded: String, recovered: String },

  /// A transcendental kernel was evaluated outside of its domain.
  #[error("{op} is undefined for {value}")]
  Domain { op: &'static str, value: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
