//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Grading an answer sheet against the session's exercise
//!   - Formatting the "show steps" solution
//!   - Listing and grading the recap set
//!   - Building the complex-plane view

use num_complex::Complex64;
use tracing::{debug, info, instrument};

use crate::config::{EngineSettings, Labels};
use crate::engine::{format_complex, verify, Exercise, FieldKind, Verdict};
use crate::plane::{plane_view, PlaneRequest, PlaneView};
use crate::protocol::*;
use crate::state::{AppState, SessionError};

#[instrument(level = "info", skip(state, sheet), fields(%session_id))]
pub async fn grade_answers(
  state: &AppState,
  session_id: &str,
  sheet: &AnswerSheet,
  show_steps: bool,
) -> Result<GradeOut, SessionError> {
  let ex = state.exercise_for(session_id).await?;
  let rows = grade_sheet(&ex, sheet, &state.engine, &state.labels);
  let correct = rows.iter().filter(|r| r.verdict == Verdict::Correct).count();
  info!(target: "exercise", %session_id, attempted = rows.len(), correct, "Answers graded");
  let steps = show_steps.then(|| solution_steps(&ex, state.engine.modulus_decimals));
  Ok(GradeOut { rows, steps })
}

/// One row per attempted field, in page order. Blank fields produce no row.
pub fn grade_sheet(ex: &Exercise, sheet: &AnswerSheet, engine: &EngineSettings, labels: &Labels) -> Vec<AnswerRowOut> {
  FieldKind::ALL
    .iter()
    .filter_map(|&field| {
      let verdict = verify(field, sheet.get(field), ex, engine.tolerance)?;
      debug!(target: "exercise", ?field, ?verdict, "Field graded");
      Some(AnswerRowOut {
        field,
        title: labels.field(field).to_string(),
        verdict,
        label: verdict_label(field, verdict, labels).to_string(),
        expected: field.expected_text(ex, engine.modulus_decimals),
      })
    })
    .collect()
}

/// Unparseable complex answers read as plain "incorrect"; an unparseable
/// modulus gets the real-number guidance instead.
fn verdict_label(field: FieldKind, verdict: Verdict, labels: &Labels) -> &str {
  match (field, verdict) {
    (_, Verdict::Correct) => &labels.correct,
    (FieldKind::Modulus, Verdict::Unparseable) => &labels.real_number_required,
    _ => &labels.incorrect,
  }
}

pub fn solution_steps(ex: &Exercise, modulus_decimals: u32) -> StepsOut {
  StepsOut {
    z1: format_complex(ex.z1),
    z2: format_complex(ex.z2),
    sum: FieldKind::Sum.expected_text(ex, modulus_decimals),
    product: FieldKind::Product.expected_text(ex, modulus_decimals),
    modulus: FieldKind::Modulus.expected_text(ex, modulus_decimals),
    conjugate: FieldKind::Conjugate.expected_text(ex, modulus_decimals),
    linear_combination: FieldKind::LinearCombination.expected_text(ex, modulus_decimals),
  }
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn recap_items(state: &AppState, session_id: &str) -> Result<Vec<RecapItemOut>, SessionError> {
  Ok(to_recap_items(&state.recap_for(session_id).await?))
}

pub fn to_recap_items(set: &[Exercise]) -> Vec<RecapItemOut> {
  set
    .iter()
    .enumerate()
    .map(|(i, ex)| RecapItemOut { index: i + 1, z1: format_complex(ex.z1), z2: format_complex(ex.z2) })
    .collect()
}

#[instrument(level = "info", skip(state, answers), fields(%session_id, answered = answers.len()))]
pub async fn grade_recap(
  state: &AppState,
  session_id: &str,
  answers: &[RecapAnswer],
) -> Result<Vec<RecapRowOut>, SessionError> {
  let set = state.recap_for(session_id).await?;
  let rows = grade_recap_set(&set, answers, &state.engine, &state.labels);
  info!(target: "exercise", %session_id, exercises = rows.len(), "Recap graded");
  Ok(rows)
}

/// Answers are matched to exercises by position; missing entries count as blank.
pub fn grade_recap_set(
  set: &[Exercise],
  answers: &[RecapAnswer],
  engine: &EngineSettings,
  labels: &Labels,
) -> Vec<RecapRowOut> {
  let blank = RecapAnswer::default();
  set
    .iter()
    .enumerate()
    .map(|(i, ex)| {
      let a = answers.get(i).unwrap_or(&blank);
      let one = |field: FieldKind, input: &str| {
        verify(field, input, ex, engine.tolerance).map(|verdict| RecapVerdictOut {
          verdict,
          label: if verdict == Verdict::Correct { labels.yes.clone() } else { labels.no.clone() },
          expected: field.expected_text(ex, engine.modulus_decimals),
        })
      };
      RecapRowOut {
        index: i + 1,
        sum: one(FieldKind::Sum, &a.sum),
        product: one(FieldKind::Product, &a.product),
      }
    })
    .collect()
}

#[instrument(level = "debug", skip(input))]
pub fn do_plane(input: &PlaneIn) -> PlaneView {
  plane_view(&PlaneRequest {
    z1: Complex64::new(input.re1, input.im1),
    z2: Complex64::new(input.re2, input.im2),
    show_sum: input.show_sum,
    show_product: input.show_product,
    show_vectors: input.show_vectors,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::LessonConfig;

  fn worked() -> Exercise {
    Exercise::from_operands(Complex64::new(2.0, 3.0), Complex64::new(1.0, -4.0))
  }

  fn sheet(sum: &str, product: &str, modulus: &str, conjugate: &str, lin: &str) -> AnswerSheet {
    AnswerSheet {
      sum: sum.into(),
      product: product.into(),
      modulus: modulus.into(),
      conjugate: conjugate.into(),
      linear_combination: lin.into(),
    }
  }

  #[test]
  fn full_sheet_is_graded_in_page_order() {
    let ex = worked();
    let rows = grade_sheet(&ex, &sheet("3-i", "14+5i", "3.6055512754", "1+4i", "7-6i"), &EngineSettings::default(), &Labels::default());
    let fields: Vec<_> = rows.iter().map(|r| r.field).collect();
    assert_eq!(fields, FieldKind::ALL);
    assert_eq!(rows[0].label, "Corect");
    assert_eq!(rows[0].expected, "3-1i");
    assert_eq!(rows[1].verdict, Verdict::Incorrect);
    assert_eq!(rows[1].label, "Greșit");
    assert_eq!(rows[1].expected, "14-5i");
    assert_eq!(rows[2].verdict, Verdict::Correct);
    assert_eq!(rows[2].expected, "3.606");
    assert_eq!(rows[4].expected, "7-6i");
  }

  #[test]
  fn blank_fields_produce_no_rows() {
    let rows = grade_sheet(&worked(), &sheet("", " ", "", "1+4i", ""), &EngineSettings::default(), &Labels::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field, FieldKind::Conjugate);
  }

  #[test]
  fn unparseable_labels() {
    let rows = grade_sheet(&worked(), &sheet("three", "", "rad 13", "", ""), &EngineSettings::default(), &Labels::default());
    assert_eq!(rows[0].verdict, Verdict::Unparseable);
    assert_eq!(rows[0].label, "Greșit");
    assert_eq!(rows[1].verdict, Verdict::Unparseable);
    assert_eq!(rows[1].label, Labels::default().real_number_required);
  }

  #[test]
  fn steps_cover_every_field() {
    let steps = solution_steps(&worked(), 3);
    assert_eq!(
      steps,
      StepsOut {
        z1: "2+3i".into(),
        z2: "1-4i".into(),
        sum: "3-1i".into(),
        product: "14-5i".into(),
        modulus: "3.606".into(),
        conjugate: "1+4i".into(),
        linear_combination: "7-6i".into(),
      }
    );
  }

  #[test]
  fn recap_matches_answers_by_position() {
    let set = vec![worked(), Exercise::from_operands(Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0))];
    let answers = vec![
      RecapAnswer { sum: "3-1i".into(), product: "0".into() },
    ];
    let rows = grade_recap_set(&set, &answers, &EngineSettings::default(), &Labels::default());
    assert_eq!(rows.len(), 2);
    let sum = rows[0].sum.as_ref().expect("sum row");
    assert_eq!((sum.verdict, sum.label.as_str()), (Verdict::Correct, "Da"));
    let product = rows[0].product.as_ref().expect("product row");
    assert_eq!((product.label.as_str(), product.expected.as_str()), ("Nu", "14-5i"));
    assert!(rows[1].sum.is_none() && rows[1].product.is_none());
    assert_eq!(rows[1].index, 2);
  }

  #[test]
  fn unparseable_recap_answer_is_reported_as_no() {
    let set = vec![worked()];
    let answers = vec![RecapAnswer { sum: "trei minus i".into(), product: "14-5i".into() }];
    let rows = grade_recap_set(&set, &answers, &EngineSettings::default(), &Labels::default());
    let sum = rows[0].sum.as_ref().expect("unparseable answers still get a row");
    assert_eq!(sum.verdict, Verdict::Unparseable);
    assert_eq!(sum.label, "Nu");
    assert_eq!(sum.expected, "3-1i");
    let product = rows[0].product.as_ref().expect("product row");
    assert_eq!((product.verdict, product.label.as_str()), (Verdict::Correct, "Da"));
  }

  #[tokio::test]
  async fn grading_uses_the_cached_exercise() {
    let state = AppState::with_config(LessonConfig::default());
    let id = state.create_session().await;
    let ex = state.exercise_for(&id).await.expect("exercise");
    let answer = format_complex(ex.sum);
    let out = grade_answers(&state, &id, &AnswerSheet { sum: answer, ..Default::default() }, true)
      .await
      .expect("graded");
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].verdict, Verdict::Correct);
    assert_eq!(out.steps.expect("steps").z1, format_complex(ex.z1));
  }

  #[tokio::test]
  async fn unknown_session_is_reported() {
    let state = AppState::with_config(LessonConfig::default());
    assert!(grade_answers(&state, "missing", &AnswerSheet::default(), false).await.is_err());
    assert!(recap_items(&state, "missing").await.is_err());
  }
}
