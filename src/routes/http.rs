//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Query, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::lesson::{lesson_text, theory, LESSON_TEX, LESSON_TITLE, TEXT_FILE_NAME, TEX_FILE_NAME};
use crate::logic::*;
use crate::protocol::*;
use crate::state::{AppState, SessionError};

impl IntoResponse for SessionError {
  fn into_response(self) -> Response {
    warn!(target: "complex_lesson", error = %self, "Request for unknown session");
    (StatusCode::NOT_FOUND, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_post_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let session_id = state.create_session().await;
  Json(SessionOut { session_id })
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_get_exercise(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Result<Json<ExerciseOut>, SessionError> {
  let ex = state.exercise_for(&q.session_id).await?;
  info!(target: "exercise", session = %q.session_id, "HTTP exercise served");
  Ok(Json(to_out(&ex)))
}

#[instrument(level = "info", skip(state), fields(%body.session_id))]
pub async fn http_post_new_exercise(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionQuery>,
) -> Result<Json<ExerciseOut>, SessionError> {
  let ex = state.new_exercise(&body.session_id).await?;
  Ok(Json(to_out(&ex)))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, show_steps = body.show_steps))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswersIn>,
) -> Result<Json<GradeOut>, SessionError> {
  let out = grade_answers(&state, &body.session_id, &body.answers, body.show_steps).await?;
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_get_recap(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Result<Json<RecapOut>, SessionError> {
  let items = recap_items(&state, &q.session_id).await?;
  Ok(Json(RecapOut { items }))
}

#[instrument(level = "info", skip(state), fields(%body.session_id))]
pub async fn http_post_new_recap(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionQuery>,
) -> Result<Json<RecapOut>, SessionError> {
  let set = state.new_recap(&body.session_id).await?;
  Ok(Json(RecapOut { items: to_recap_items(&set) }))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, answered = body.answers.len()))]
pub async fn http_post_recap_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RecapAnswersIn>,
) -> Result<Json<RecapResultOut>, SessionError> {
  let rows = grade_recap(&state, &body.session_id, &body.answers).await?;
  Ok(Json(RecapResultOut { rows }))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_plane(Json(body): Json<PlaneIn>) -> impl IntoResponse {
  Json(do_plane(&body))
}

#[instrument(level = "info")]
pub async fn http_get_lesson() -> impl IntoResponse {
  Json(LessonOut { title: LESSON_TITLE, sections: theory() })
}

#[instrument(level = "info")]
pub async fn http_get_lesson_tex() -> impl IntoResponse {
  download("text/x-tex; charset=utf-8", TEX_FILE_NAME, LESSON_TEX.to_string())
}

#[instrument(level = "info")]
pub async fn http_get_lesson_txt() -> impl IntoResponse {
  download("text/plain; charset=utf-8", TEXT_FILE_NAME, lesson_text())
}

fn download(mime: &str, file_name: &str, body: String) -> impl IntoResponse {
  (
    [
      (header::CONTENT_TYPE, mime.to_string()),
      (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
    ],
    body,
  )
}
