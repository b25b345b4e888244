//! Complex-number exercise engine.
//!
//! Pure, synchronous building blocks used by the service layer:
//!   - `format`   : canonical text rendering of complex values
//!   - `parse`    : free-text answers -> complex / real values
//!   - `exercise` : random operands + derived correct answers
//!   - `verify`   : tolerance-based grading of a single answer field

pub mod exercise;
pub mod format;
pub mod parse;
pub mod verify;

pub use exercise::{generate, generate_recap, Exercise};
pub use format::format_complex;
pub use verify::{verify, FieldKind, Verdict};
