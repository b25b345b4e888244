//! Exercise generation: two random Gaussian-integer operands and every
//! answer the exercise page asks for.

use num_complex::Complex64;
use rand::Rng;

/// Default inclusive bounds for each operand component.
pub const OPERAND_MIN: i32 = -3;
pub const OPERAND_MAX: i32 = 3;
/// Number of independent exercises in a recap set.
pub const RECAP_LEN: usize = 3;

/// Coefficients of the linear-combination question `2*z1 + 3*z2`.
const LIN_COEFF_Z1: f64 = 2.0;
const LIN_COEFF_Z2: f64 = 3.0;

/// Inclusive integer range operand components are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandRange {
  pub min: i32,
  pub max: i32,
}

impl Default for OperandRange {
  fn default() -> Self {
    Self { min: OPERAND_MIN, max: OPERAND_MAX }
  }
}

impl OperandRange {
  fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Complex64 {
    Complex64::new(
      rng.gen_range(self.min..=self.max) as f64,
      rng.gen_range(self.min..=self.max) as f64,
    )
  }
}

/// Immutable exercise bundle. Built once, then only read.
#[derive(Clone, Debug, PartialEq)]
pub struct Exercise {
  pub z1: Complex64,
  pub z2: Complex64,
  pub sum: Complex64,
  pub product: Complex64,
  pub modulus: f64,
  pub conjugate: Complex64,
  pub linear_combination: Complex64,
}

impl Exercise {
  /// Derive every answer from the two operands.
  pub fn from_operands(z1: Complex64, z2: Complex64) -> Self {
    Self {
      z1,
      z2,
      sum: z1 + z2,
      product: z1 * z2,
      modulus: z1.norm(),
      conjugate: z2.conj(),
      linear_combination: z1 * LIN_COEFF_Z1 + z2 * LIN_COEFF_Z2,
    }
  }
}

/// Draw an exercise from the given RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, range: OperandRange) -> Exercise {
  let z1 = range.draw(rng);
  let z2 = range.draw(rng);
  Exercise::from_operands(z1, z2)
}

/// Draw an exercise from the thread-local RNG.
pub fn generate(range: OperandRange) -> Exercise {
  generate_with(&mut rand::thread_rng(), range)
}

/// Ordered recap set of `len` independent exercises.
pub fn generate_recap(range: OperandRange, len: usize) -> Vec<Exercise> {
  let mut rng = rand::thread_rng();
  (0..len).map(|_| generate_with(&mut rng, range)).collect()
}
