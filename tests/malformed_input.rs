mod support;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

async fn close_code_after(frame: Message) -> Option<CloseCode> {
    let base_url = support::ensure_server();
    let mut ws = support::connect_driver(base_url).await;

    match ws.next().await {
        Some(Ok(Message::Text(text))) => assert!(text.as_str().contains("\"Start\"")),
        other => panic!("expected start message, got {other:?}"),
    }

    ws.send(frame).await.expect("send frame");
    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Close(frame)) => return frame.map(|f| f.code),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
    None
}

// Both cases share one server and its single driver slot, so they run in sequence.
#[tokio::test]
async fn bad_frames_end_the_session() {
    let base_url = support::ensure_server();

    let code = close_code_after(Message::Text(String::new().into())).await;
    assert_eq!(code, Some(CloseCode::Policy));
    support::wait_for_status(base_url, |s| s["connected"] == false).await;

    let code = close_code_after(Message::Text(r#"{"type":"Input","data":{}}"#.into())).await;
    assert_eq!(code, Some(CloseCode::Policy));
    support::wait_for_status(base_url, |s| s["connected"] == false).await;

    let code = close_code_after(Message::Binary(vec![1, 2, 3].into())).await;
    assert_eq!(code, Some(CloseCode::Unsupported));
    let status = support::wait_for_status(base_url, |s| s["connected"] == false).await;
    assert_eq!(status["cheated"], false);
}
