//! Data behind the complex-plane figure: which points to mark, which
//! vectors to draw from the origin, the operation lines under the figure
//! and a symmetric axis limit. Drawing is left to the client.

use num_complex::Complex64;
use serde::Serialize;

use crate::engine::format_complex;

/// Smallest half-width of the visible square.
pub const MIN_AXIS_LIMIT: f64 = 1.5;

#[derive(Clone, Copy, Debug)]
pub struct PlaneRequest {
  pub z1: Complex64,
  pub z2: Complex64,
  pub show_sum: bool,
  pub show_product: bool,
  pub show_vectors: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlanePoint {
  pub label: String,
  pub re: f64,
  pub im: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlaneView {
  pub points: Vec<PlanePoint>,
  /// Arrows from the origin, one per point, when vectors are enabled.
  pub vectors: Vec<[f64; 2]>,
  pub operations: Vec<String>,
  pub limit: f64,
}

pub fn plane_view(req: &PlaneRequest) -> PlaneView {
  let mut values = vec![req.z1];
  // z2 = 0 is treated as "not entered"
  if req.z2 != Complex64::new(0.0, 0.0) {
    values.push(req.z2);
  }
  let mut operations = Vec::new();
  if values.len() > 1 {
    if req.show_sum {
      let s = req.z1 + req.z2;
      operations.push(format!("z1 + z2 = {}", format_complex(s)));
      values.push(s);
    }
    if req.show_product {
      let p = req.z1 * req.z2;
      operations.push(format!("z1 * z2 = {}", format_complex(p)));
      values.push(p);
    }
  }

  let limit = values
    .iter()
    .flat_map(|z| [z.re.abs(), z.im.abs()])
    .fold(MIN_AXIS_LIMIT, f64::max);

  let points = values
    .iter()
    .enumerate()
    .map(|(i, z)| PlanePoint { label: format!("z_{} = {}", i, format_complex(*z)), re: z.re, im: z.im })
    .collect();
  let vectors = if req.show_vectors { values.iter().map(|z| [z.re, z.im]).collect() } else { Vec::new() };

  PlaneView { points, vectors, operations, limit }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn req(z1: (f64, f64), z2: (f64, f64)) -> PlaneRequest {
    PlaneRequest {
      z1: Complex64::new(z1.0, z1.1),
      z2: Complex64::new(z2.0, z2.1),
      show_sum: true,
      show_product: true,
      show_vectors: true,
    }
  }

  #[test]
  fn zero_z2_shows_only_z1() {
    let v = plane_view(&req((1.0, 1.0), (0.0, 0.0)));
    assert_eq!(v.points.len(), 1);
    assert_eq!(v.points[0].label, "z_0 = 1+1i");
    assert!(v.operations.is_empty());
    assert_eq!(v.limit, MIN_AXIS_LIMIT);
  }

  #[test]
  fn sum_and_product_are_added_in_order() {
    let v = plane_view(&req((2.0, 3.0), (1.0, -4.0)));
    let labels: Vec<_> = v.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["z_0 = 2+3i", "z_1 = 1-4i", "z_2 = 3-1i", "z_3 = 14-5i"]);
    assert_eq!(v.operations, ["z1 + z2 = 3-1i", "z1 * z2 = 14-5i"]);
    assert_eq!(v.vectors.len(), 4);
    assert_eq!(v.limit, 14.0);
  }

  #[test]
  fn toggles_are_respected() {
    let mut r = req((2.0, 3.0), (1.0, -4.0));
    r.show_sum = false;
    r.show_vectors = false;
    let v = plane_view(&r);
    assert_eq!(v.points.len(), 3);
    assert_eq!(v.operations, ["z1 * z2 = 14-5i"]);
    assert!(v.vectors.is_empty());
  }
}
