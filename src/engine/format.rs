//! Canonical rendering of complex numbers, e.g. `3+4i`, `3-4i`, `0+0i`.

use num_complex::Complex64;

/// Render a real component: integers without a decimal point, everything
/// else as the shortest decimal that round-trips.
pub fn format_real(x: f64) -> String {
  // -0.0 + 0.0 == +0.0, so negative zero never leaks a sign.
  let x = x + 0.0;
  // f64's Display already drops the ".0" of integral values.
  format!("{}", x)
}

/// `<re>+<im>i` for non-negative imaginary parts, `<re><im>i` otherwise
/// (the imaginary part carries its own minus sign).
pub fn format_complex(z: Complex64) -> String {
  let re = format_real(z.re);
  let im = z.im + 0.0;
  if im >= 0.0 {
    format!("{}+{}i", re, format_real(im))
  } else {
    format!("{}{}i", re, format_real(im))
  }
}

/// Modulus as shown next to a verdict: rounded to `decimals` places.
pub fn format_modulus(x: f64, decimals: u32) -> String {
  let factor = 10f64.powi(decimals as i32);
  format_real((x * factor).round() / factor)
}
