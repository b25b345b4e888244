//! Grading one answer field against an exercise.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::exercise::Exercise;
use super::format::{format_complex, format_modulus};
use super::parse::{parse_answer, parse_real};

/// Default absolute tolerance for `|answer - expected|`.
pub const TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
  Sum,
  Product,
  Modulus,
  Conjugate,
  LinearCombination,
}

impl FieldKind {
  pub const ALL: [FieldKind; 5] = [
    FieldKind::Sum,
    FieldKind::Product,
    FieldKind::Modulus,
    FieldKind::Conjugate,
    FieldKind::LinearCombination,
  ];

  fn expected_complex(self, ex: &Exercise) -> Option<Complex64> {
    match self {
      FieldKind::Sum => Some(ex.sum),
      FieldKind::Product => Some(ex.product),
      FieldKind::Conjugate => Some(ex.conjugate),
      FieldKind::LinearCombination => Some(ex.linear_combination),
      FieldKind::Modulus => None,
    }
  }

  /// Canonical text of the expected answer.
  pub fn expected_text(self, ex: &Exercise, modulus_decimals: u32) -> String {
    match self.expected_complex(ex) {
      Some(z) => format_complex(z),
      None => format_modulus(ex.modulus, modulus_decimals),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  Correct,
  Incorrect,
  Unparseable,
}

/// Grade `input` for `field`. `None` means the field was left blank and
/// must not be reported at all.
pub fn verify(field: FieldKind, input: &str, ex: &Exercise, tolerance: f64) -> Option<Verdict> {
  if input.trim().is_empty() {
    return None;
  }
  let distance = match field.expected_complex(ex) {
    Some(expected) => parse_answer(input).map(|z| (z - expected).norm()),
    None => parse_real(input).map(|x| (x - ex.modulus).abs()),
  };
  Some(match distance {
    Ok(d) if d < tolerance => Verdict::Correct,
    Ok(_) => Verdict::Incorrect,
    Err(_) => Verdict::Unparseable,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn worked() -> Exercise {
    Exercise::from_operands(Complex64::new(2.0, 3.0), Complex64::new(1.0, -4.0))
  }

  #[test]
  fn worked_example_end_to_end() {
    let ex = worked();
    assert_eq!(verify(FieldKind::Sum, "3-1i", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Sum, "3-i", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Product, "14 - 5i", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Conjugate, "1+4i", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::LinearCombination, "7-6i", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Modulus, "3.605551275", &ex, TOLERANCE), Some(Verdict::Correct));
    // 3.606 is the display value, not within 1e-6 of sqrt(13)
    assert_eq!(verify(FieldKind::Modulus, "3,606", &ex, TOLERANCE), Some(Verdict::Incorrect));

    assert_eq!(FieldKind::Sum.expected_text(&ex, 3), "3-1i");
    assert_eq!(FieldKind::Product.expected_text(&ex, 3), "14-5i");
    assert_eq!(FieldKind::Modulus.expected_text(&ex, 3), "3.606");
    assert_eq!(FieldKind::Conjugate.expected_text(&ex, 3), "1+4i");
    assert_eq!(FieldKind::LinearCombination.expected_text(&ex, 3), "7-6i");
  }

  #[test]
  fn tolerance_boundary() {
    let ex = worked();
    assert_eq!(verify(FieldKind::Sum, "3.0000009-1i", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Sum, "3.0000011-1i", &ex, TOLERANCE), Some(Verdict::Incorrect));
    let m = ex.modulus;
    assert_eq!(verify(FieldKind::Modulus, &format!("{}", m + 0.9e-6), &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Modulus, &format!("{}", m + 1.1e-6), &ex, TOLERANCE), Some(Verdict::Incorrect));
  }

  #[test]
  fn blank_input_yields_no_verdict() {
    let ex = worked();
    for field in FieldKind::ALL {
      assert_eq!(verify(field, "", &ex, TOLERANCE), None);
      assert_eq!(verify(field, "   ", &ex, TOLERANCE), None);
    }
  }

  #[test]
  fn garbage_is_unparseable_not_incorrect() {
    let ex = worked();
    assert_eq!(verify(FieldKind::Product, "abc", &ex, TOLERANCE), Some(Verdict::Unparseable));
    assert_eq!(verify(FieldKind::Modulus, "sqrt13", &ex, TOLERANCE), Some(Verdict::Unparseable));
  }

  #[test]
  fn zero_answer_can_be_correct() {
    let ex = Exercise::from_operands(Complex64::new(1.0, 1.0), Complex64::new(-1.0, -1.0));
    assert_eq!(verify(FieldKind::Sum, "0", &ex, TOLERANCE), Some(Verdict::Correct));
    assert_eq!(verify(FieldKind::Sum, "0+0i", &ex, TOLERANCE), Some(Verdict::Correct));
  }
}
