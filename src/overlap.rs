//! Bookkeeping of the output codes already emitted by one table.

use std::collections::HashSet;

/// The set of output codes emitted so far by a single table-generation pass.
///
/// Each pass owns its own tracker, so tables never see each other's codes. The tracker only
/// drives the `// overlap` annotations; it never changes a table's contents.
#[derive(Clone, Debug, Default)]
pub struct OverlapTracker {
  seen: HashSet<String>,
}

impl OverlapTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns whether `code` was already emitted, and records it.
  pub fn record_and_check(&mut self, code: &str) -> bool {
    if self.seen.contains(code) {
      true
    } else {
      self.seen.insert(code.to_owned());
      false
    }
  }

  /// Number of distinct codes seen.
  pub fn len(&self) -> usize {
    self.seen.len()
  }

  pub fn is_empty(&self) -> bool {
    self.seen.is_empty()
  }

  pub fn clear(&mut self) {
    self.seen.clear()
  }
}
