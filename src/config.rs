//! Loading lesson configuration (engine constants + display labels) from TOML.
//!
//! See `LessonConfig`, `EngineSettings` and `Labels` for the expected schema:
//!
//! ```toml
//! [engine]
//! operand_min = -5
//! operand_max = 5
//! tolerance = 1e-4
//! recap_len = 5
//! modulus_decimals = 2
//! session_idle_secs = 1800
//! max_sessions = 500
//!
//! [labels]
//! correct = "Correct"
//! incorrect = "Wrong"
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::engine::exercise::{OperandRange, OPERAND_MAX, OPERAND_MIN, RECAP_LEN};
use crate::engine::verify::{FieldKind, TOLERANCE};

/// Decimal places shown for the expected modulus.
pub const MODULUS_DECIMALS: u32 = 3;
/// Beyond this, rounding to `10^decimals` no longer fits an f64.
pub const MAX_MODULUS_DECIMALS: u32 = 15;
/// Sessions untouched for this long are dropped.
pub const SESSION_IDLE_SECS: u64 = 60 * 60;
/// Upper bound on sessions held in memory.
pub const MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read { path: String, source: std::io::Error },
  #[error("failed to parse TOML: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("operand range is empty: min {min} > max {max}")]
  InvalidRange { min: i32, max: i32 },
  #[error("tolerance must be a positive finite number, got {0}")]
  InvalidTolerance(f64),
  #[error("recap_len must be at least 1")]
  InvalidRecapLen,
  #[error("modulus_decimals must be at most 15, got {0}")]
  InvalidModulusDecimals(u32),
  #[error("session_idle_secs and max_sessions must be at least 1")]
  InvalidSessionLimits,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct LessonConfig {
  #[serde(default)]
  pub engine: EngineSettings,
  #[serde(default)]
  pub labels: Labels,
}

/// Fixed design constants of the exercise engine, overridable from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
  pub operand_min: i32,
  pub operand_max: i32,
  pub tolerance: f64,
  pub recap_len: usize,
  pub modulus_decimals: u32,
  pub session_idle_secs: u64,
  pub max_sessions: usize,
}

impl Default for EngineSettings {
  fn default() -> Self {
    Self {
      operand_min: OPERAND_MIN,
      operand_max: OPERAND_MAX,
      tolerance: TOLERANCE,
      recap_len: RECAP_LEN,
      modulus_decimals: MODULUS_DECIMALS,
      session_idle_secs: SESSION_IDLE_SECS,
      max_sessions: MAX_SESSIONS,
    }
  }
}

impl EngineSettings {
  pub fn operand_range(&self) -> OperandRange {
    OperandRange { min: self.operand_min, max: self.operand_max }
  }

  pub fn session_idle(&self) -> Duration {
    Duration::from_secs(self.session_idle_secs)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.operand_min > self.operand_max {
      return Err(ConfigError::InvalidRange { min: self.operand_min, max: self.operand_max });
    }
    if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
      return Err(ConfigError::InvalidTolerance(self.tolerance));
    }
    if self.recap_len == 0 {
      return Err(ConfigError::InvalidRecapLen);
    }
    if self.modulus_decimals > MAX_MODULUS_DECIMALS {
      return Err(ConfigError::InvalidModulusDecimals(self.modulus_decimals));
    }
    if self.session_idle_secs == 0 || self.max_sessions == 0 {
      return Err(ConfigError::InvalidSessionLimits);
    }
    Ok(())
  }
}

/// User-facing wording. Defaults are the Romanian lesson texts.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Labels {
  pub correct: String,
  pub incorrect: String,
  pub yes: String,
  pub no: String,
  pub real_number_required: String,
  pub sum: String,
  pub product: String,
  pub modulus: String,
  pub conjugate: String,
  pub linear_combination: String,
}

impl Default for Labels {
  fn default() -> Self {
    Self {
      correct: "Corect".into(),
      incorrect: "Greșit".into(),
      yes: "Da".into(),
      no: "Nu".into(),
      real_number_required: "Modulul trebuie introdus ca număr real (ex. 2.236)".into(),
      sum: "z1+z2".into(),
      product: "z1*z2".into(),
      modulus: "|z1|".into(),
      conjugate: "Conjugatul lui z2".into(),
      linear_combination: "2z1+3z2".into(),
    }
  }
}

impl Labels {
  pub fn field(&self, field: FieldKind) -> &str {
    match field {
      FieldKind::Sum => &self.sum,
      FieldKind::Product => &self.product,
      FieldKind::Modulus => &self.modulus,
      FieldKind::Conjugate => &self.conjugate,
      FieldKind::LinearCombination => &self.linear_combination,
    }
  }
}

/// Parse and validate a TOML document.
pub fn parse_lesson_config(s: &str) -> Result<LessonConfig, ConfigError> {
  let cfg: LessonConfig = toml::from_str(s)?;
  cfg.engine.validate()?;
  Ok(cfg)
}

fn read_lesson_config(path: &str) -> Result<LessonConfig, ConfigError> {
  let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
  parse_lesson_config(&s)
}

/// Attempt to load `LessonConfig` from LESSON_CONFIG_PATH. On any error, returns None.
pub fn load_lesson_config_from_env() -> Option<LessonConfig> {
  let path = std::env::var("LESSON_CONFIG_PATH").ok()?;
  match read_lesson_config(&path) {
    Ok(cfg) => {
      info!(target: "complex_lesson", %path, "Loaded lesson config (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "complex_lesson", %path, error = %e, "Failed to load lesson config; using defaults");
      None
    }
  }
}
