use crate::domain::Input;
use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{ClientMessage, ServerMessage, StartDto};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::ids::conn_id;
use crate::use_cases::{GameHost, SessionError};

use axum::{
    Json,
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::SinkExt;
use std::sync::Arc;
use tokio::sync::OwnedSemaphorePermit;
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes why a driver connection ended so the close frame matches.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    #[allow(dead_code)]
    Session(SessionError),
    Worker,
    InvalidInput,
    Unsupported,
    Cheated,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

impl From<SessionError> for NetError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Cheated => NetError::Cheated,
            other => NetError::Session(other),
        }
    }
}

impl NetError {
    fn close_frame(&self) -> Option<CloseFrame> {
        let (code, reason) = match self {
            // The peer is gone or the frame could not be written; nothing to tell it.
            NetError::Ws(_) => return None,
            NetError::InvalidInput => (close_code::POLICY, "invalid argument"),
            NetError::Unsupported => (close_code::UNSUPPORTED, "text frames only"),
            NetError::Cheated => (close_code::POLICY, "checksum mismatch"),
            NetError::Serialization(_) | NetError::Session(_) | NetError::Worker => {
                (close_code::ERROR, "internal error")
            }
        };
        Some(CloseFrame {
            code,
            reason: reason.into(),
        })
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    // One driver at a time; the running session is left untouched.
    let Some(permit) = state.host.try_claim() else {
        info!("rejected second driver connection");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "resource exhausted".to_string(),
            }),
        )
            .into_response();
    };

    let host = state.host.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, host, permit))
}

async fn handle_socket(mut socket: WebSocket, host: Arc<GameHost>, permit: OwnedSemaphorePermit) {
    let span = info_span!("conn", conn_id = conn_id(), level_id = %host.level_id());

    async move {
        info!("driver connected");
        let result = run_session(&mut socket, &host).await;
        // Tear down before the slot is released so the next driver starts clean.
        let teardown = host.clone();
        if tokio::task::spawn_blocking(move || teardown.close()).await.is_err() {
            error!("session teardown worker failed");
        }

        match result {
            Ok(()) => info!("driver disconnected"),
            Err(e) => {
                warn!(error = ?e, "driver session ended with error");
                if let Some(frame) = e.close_frame() {
                    let _ = socket.send(Message::Close(Some(frame))).await;
                }
                let _ = SinkExt::close(&mut socket).await;
            }
        }
        drop(permit);
    }
    .instrument(span)
    .await
}

async fn run_session(socket: &mut WebSocket, host: &Arc<GameHost>) -> Result<(), NetError> {
    let opener = host.clone();
    let start = tokio::task::spawn_blocking(move || opener.open())
        .await
        .map_err(|_| NetError::Worker)??;
    let bytes = send_message(socket, &ServerMessage::Start(StartDto::from(start))).await?;
    debug!(bytes, "start sent");

    let mut ticks: u64 = 0;
    while let Some(incoming) = socket.recv().await {
        match incoming? {
            Message::Text(text) => {
                let ClientMessage::Input(dto) =
                    serde_json::from_str::<ClientMessage>(&text).map_err(|e| {
                        warn!(error = %e, len = text.len(), "malformed input frame");
                        NetError::InvalidInput
                    })?;

                let input = Input::from(&dto);
                let worker = host.clone();
                let report =
                    tokio::task::spawn_blocking(move || worker.process_input(&dto.checksum, &input))
                        .await
                        .map_err(|_| NetError::Worker)??;
                ticks += 1;
                debug!(ticks, animation = ?report.animation, "input applied");

                if let Some(dialog) = report.dialog {
                    send_message(socket, &ServerMessage::Dialog(dialog.into())).await?;
                }
                if report.checkpoint {
                    info!(ticks, "checkpoint reached");
                }
            }
            Message::Binary(_) => return Err(NetError::Unsupported),
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => break,
        }
    }

    debug!(ticks, "input stream finished");
    Ok(())
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}
