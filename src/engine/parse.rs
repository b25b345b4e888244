//! Free-text answer parsing.
//!
//! Answers are normalized first (whitespace removed, display unit `i` mapped
//! to the literal token `j`) and then read as a complex literal:
//!
//! ```text
//! literal := [ "(" ] body [ ")" ]
//! body    := [sign] number
//!          | [sign] [number] j
//!          | [sign] number (+|-) [number] j
//! number  := digits [ "." digits ] [ exponent ] | "." digits [ exponent ]
//! ```
//!
//! A missing coefficient before `j` means 1, so `1+i` reads as `1+1i`.

use num_complex::Complex64;
use thiserror::Error;

/// Imaginary-unit letter used on screen.
const DISPLAY_UNIT: char = 'i';
/// Token the literal reader understands.
const LITERAL_UNIT: char = 'j';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("empty answer")]
  Empty,
  #[error("not a valid number: {0}")]
  Malformed(String),
  #[error("number is not finite: {0}")]
  NonFinite(String),
}

/// Parse a complex answer such as `" 2 + 3i "`, `-i`, `(1.5-2i)` or `4`.
pub fn parse_answer(input: &str) -> Result<Complex64, ParseError> {
  let normalized: String = input
    .trim()
    .chars()
    .filter(|c| !c.is_whitespace())
    .map(|c| if c == DISPLAY_UNIT { LITERAL_UNIT } else { c })
    .collect();
  if normalized.is_empty() {
    return Err(ParseError::Empty);
  }
  let z = read_literal(&normalized).ok_or_else(|| ParseError::Malformed(input.trim().to_string()))?;
  if !(z.re.is_finite() && z.im.is_finite()) {
    return Err(ParseError::NonFinite(input.trim().to_string()));
  }
  Ok(z)
}

/// Parse a real answer (modulus field). Accepts `,` as decimal separator.
pub fn parse_real(input: &str) -> Result<f64, ParseError> {
  let s = input.trim().replace(',', ".");
  if s.is_empty() {
    return Err(ParseError::Empty);
  }
  let x: f64 = s.parse().map_err(|_| ParseError::Malformed(input.trim().to_string()))?;
  if !x.is_finite() {
    return Err(ParseError::NonFinite(input.trim().to_string()));
  }
  Ok(x)
}

fn read_literal(s: &str) -> Option<Complex64> {
  let body = match (s.strip_prefix('('), s.ends_with(')')) {
    (Some(rest), true) => &rest[..rest.len() - 1],
    (None, false) => s,
    _ => return None,
  };
  let mut cur = Cursor { s: body.as_bytes(), pos: 0 };

  let sign = cur.sign().unwrap_or(1.0);
  let first = cur.number();

  if cur.unit() {
    // Pure imaginary: [sign][number]j
    let im = sign * first.unwrap_or(1.0);
    return cur.at_end().then(|| Complex64::new(0.0, im));
  }

  let re = sign * first?;
  if cur.at_end() {
    return Some(Complex64::new(re, 0.0));
  }

  // Both parts: the separator sign is mandatory here.
  let im_sign = cur.sign()?;
  let coeff = cur.number().unwrap_or(1.0);
  if !cur.unit() || !cur.at_end() {
    return None;
  }
  Some(Complex64::new(re, im_sign * coeff))
}

struct Cursor<'a> {
  s: &'a [u8],
  pos: usize,
}

impl<'a> Cursor<'a> {
  fn peek(&self) -> Option<u8> { self.s.get(self.pos).copied() }

  fn at_end(&self) -> bool { self.pos == self.s.len() }

  fn sign(&mut self) -> Option<f64> {
    match self.peek()? {
      b'+' => { self.pos += 1; Some(1.0) }
      b'-' => { self.pos += 1; Some(-1.0) }
      _ => None,
    }
  }

  fn unit(&mut self) -> bool {
    match self.peek() {
      Some(c) if c == LITERAL_UNIT as u8 || c == LITERAL_UNIT.to_ascii_uppercase() as u8 => {
        self.pos += 1;
        true
      }
      _ => false,
    }
  }

  fn digits(&mut self) -> usize {
    let start = self.pos;
    while matches!(self.peek(), Some(b'0'..=b'9')) {
      self.pos += 1;
    }
    self.pos - start
  }

  /// Unsigned decimal number with optional fraction and exponent.
  /// Leaves the cursor untouched when no number starts here.
  fn number(&mut self) -> Option<f64> {
    let start = self.pos;
    let mut mantissa = self.digits();
    if self.peek() == Some(b'.') {
      self.pos += 1;
      mantissa += self.digits();
    }
    if mantissa == 0 {
      self.pos = start;
      return None;
    }
    if matches!(self.peek(), Some(b'e' | b'E')) {
      let before_exp = self.pos;
      self.pos += 1;
      if matches!(self.peek(), Some(b'+' | b'-')) {
        self.pos += 1;
      }
      if self.digits() == 0 {
        // "1e" is not an exponent; let the caller reject the stray 'e'.
        self.pos = before_exp;
      }
    }
    std::str::from_utf8(&self.s[start..self.pos]).ok()?.parse().ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::engine::format::format_complex;

  fn c(re: f64, im: f64) -> Complex64 { Complex64::new(re, im) }

  #[test]
  fn tolerates_whitespace() {
    assert_eq!(parse_answer(" 2 + 3i "), Ok(c(2.0, 3.0)));
    assert_eq!(parse_answer("2+3i"), Ok(c(2.0, 3.0)));
    assert_eq!(parse_answer("\t3 -\n1i"), Ok(c(3.0, -1.0)));
  }

  #[test]
  fn reads_every_literal_shape() {
    assert_eq!(parse_answer("4"), Ok(c(4.0, 0.0)));
    assert_eq!(parse_answer("-4.5"), Ok(c(-4.5, 0.0)));
    assert_eq!(parse_answer("3i"), Ok(c(0.0, 3.0)));
    assert_eq!(parse_answer("-i"), Ok(c(0.0, -1.0)));
    assert_eq!(parse_answer("i"), Ok(c(0.0, 1.0)));
    assert_eq!(parse_answer("1+i"), Ok(c(1.0, 1.0)));
    assert_eq!(parse_answer("1-i"), Ok(c(1.0, -1.0)));
    assert_eq!(parse_answer("(1.5-2i)"), Ok(c(1.5, -2.0)));
    assert_eq!(parse_answer(".5+5.i"), Ok(c(0.5, 5.0)));
    assert_eq!(parse_answer("1e1-2e-1i"), Ok(c(10.0, -0.2)));
    assert_eq!(parse_answer("2+3j"), Ok(c(2.0, 3.0)));
    assert_eq!(parse_answer("2+3J"), Ok(c(2.0, 3.0)));
  }

  #[test]
  fn rejects_garbage() {
    assert_eq!(parse_answer(""), Err(ParseError::Empty));
    assert_eq!(parse_answer("   "), Err(ParseError::Empty));
    for bad in ["abc", "2+i+3", "2+3", "3i+2", "1e+i", "(1+2i", "1+2i)", "--1", "+", ".", "1..2", "inf", "nan", "2*i"] {
      assert!(matches!(parse_answer(bad), Err(ParseError::Malformed(_))), "{bad} should fail");
    }
  }

  #[test]
  fn inverts_the_formatter_on_integer_grid() {
    for re in -10..=10 {
      for im in -10..=10 {
        let z = c(re as f64, im as f64);
        assert_eq!(parse_answer(&format_complex(z)), Ok(z));
      }
    }
  }

  #[test]
  fn real_answers_accept_comma() {
    assert_eq!(parse_real("2.236"), Ok(2.236));
    assert_eq!(parse_real(" 2,236 "), Ok(2.236));
    assert_eq!(parse_real("5"), Ok(5.0));
    assert_eq!(parse_real(""), Err(ParseError::Empty));
    assert!(matches!(parse_real("sqrt(5)"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse_real("1,2,3"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse_real("inf"), Err(ParseError::NonFinite(_))));
  }
}
