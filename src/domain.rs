//! Domain models used by the backend: per-session exercise storage.

use std::time::Instant;

use crate::engine::Exercise;

/// Everything one learner session owns. Exercises are generated lazily,
/// then kept until the learner explicitly asks for new ones.
#[derive(Clone, Debug)]
pub struct Session {
  pub exercise: Option<Exercise>,
  pub recap: Option<Vec<Exercise>>,
  /// Last time any request touched this session; drives idle eviction.
  pub last_access: Instant,
}

impl Session {
  pub fn new() -> Self {
    Self { exercise: None, recap: None, last_access: Instant::now() }
  }
}

impl Default for Session {
  fn default() -> Self { Self::new() }
}
