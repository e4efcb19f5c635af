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
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "shengjing_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "shengjing_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(reply)).await {
          error!(target: "shengjing_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "shengjing_backend", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "shengjing_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Align(req) => {
      match do_align(&req) {
        Ok(out) => {
          tracing::info!(target: "reader", strategy = %out.strategy, syllables = out.syllables.len(), "WS align served");
          ServerWsMessage::Aligned(out)
        }
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::Split(req) => ServerWsMessage::Split(do_split(&req)),

    ClientWsMessage::Visibility(req) => ServerWsMessage::Visibility(do_visibility(state, &req)),

    ClientWsMessage::Annotate(req) => ServerWsMessage::Annotated(do_annotate(state, &req)),

    ClientWsMessage::Chapter { book, chapter, level } => {
      match chapter_at_level(state, &book, chapter, level).await {
        Some(annotated) => {
          tracing::info!(target: "reader", %book, chapter, reading_level = %annotated.level, "WS chapter served");
          ServerWsMessage::Chapter(annotated)
        }
        None => ServerWsMessage::Error { message: format!("unknown chapter: {book} {chapter}") },
      }
    }
  }
}
