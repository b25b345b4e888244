//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument, warn};

use crate::lesson::{theory, LESSON_TITLE};
use crate::logic::*;
use crate::protocol::{to_out, ClientWsMessage, ServerWsMessage};
use crate::state::{AppState, SessionError};
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "complex_lesson", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "complex_lesson", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply = handle_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(reply)).await {
          error!(target: "complex_lesson", error = %e, "WS send error");
          break;
        }
      }
      Message::Close(_) => break,
      // Pings are answered by axum before they reach us.
      _ => {}
    }
  }
  info!(target: "complex_lesson", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
async fn handle_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "complex_lesson", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => {
      warn!(target: "complex_lesson", error = %e, payload = %trunc_for_log(txt, 200), "WS invalid message");
      ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }
    }
  };
  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let reply = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::NewSession => Ok(ServerWsMessage::Session { session_id: state.create_session().await }),

    ClientWsMessage::GetExercise { session_id } => state
      .exercise_for(&session_id)
      .await
      .map(|ex| ServerWsMessage::Exercise { exercise: to_out(&ex) }),

    ClientWsMessage::NewExercise { session_id } => state
      .new_exercise(&session_id)
      .await
      .map(|ex| ServerWsMessage::Exercise { exercise: to_out(&ex) }),

    ClientWsMessage::SubmitAnswers { session_id, answers, show_steps } => grade_answers(state, &session_id, &answers, show_steps)
      .await
      .map(ServerWsMessage::AnswerResult),

    ClientWsMessage::GetRecap { session_id } => recap_items(state, &session_id)
      .await
      .map(|items| ServerWsMessage::Recap { items }),

    ClientWsMessage::NewRecap { session_id } => state
      .new_recap(&session_id)
      .await
      .map(|set| ServerWsMessage::Recap { items: to_recap_items(&set) }),

    ClientWsMessage::SubmitRecap { session_id, answers } => grade_recap(state, &session_id, &answers)
      .await
      .map(|rows| ServerWsMessage::RecapResult { rows }),

    ClientWsMessage::Plane(input) => Ok(ServerWsMessage::Plane(do_plane(&input))),

    ClientWsMessage::Lesson => Ok(ServerWsMessage::Lesson { title: LESSON_TITLE, sections: theory() }),
  };
  reply.unwrap_or_else(|e: SessionError| ServerWsMessage::Error { message: e.to_string() })
}
