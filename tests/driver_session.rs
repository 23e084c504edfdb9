mod support;

use futures::{SinkExt, StreamExt};
use platformer_server::domain::dialog::MirrorProvider;
use platformer_server::domain::{Engine, Input, Key};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

fn input_frame(checksum: &str, keys: &[&str]) -> Message {
    let payload = serde_json::json!({
        "type": "Input",
        "data": {
            "checksum": checksum,
            "keys_pressed": keys,
            "new_keys_pressed": [],
        }
    });
    Message::Text(payload.to_string().into())
}

// One sequential flow: the server hosts a single session at a time.
#[tokio::test]
async fn driver_plays_to_win_then_forged_checksum_is_rejected() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    support::wait_for_status(base_url, |s| {
        s["connected"] == false && s["won"] == false && s["cheated"] == false
    })
    .await;

    let mut ws = support::connect_driver(base_url).await;

    let start: serde_json::Value = match ws.next().await {
        Some(Ok(Message::Text(text))) => serde_json::from_str(text.as_str()).expect("start json"),
        other => panic!("expected start message, got {other:?}"),
    };
    assert_eq!(start["type"], "Start");
    assert_eq!(start["data"]["level_id"], support::LEVEL_ID);
    let snapshot = start["data"]["snapshot"].as_str().expect("snapshot string");

    // A second driver is turned away while the first one plays.
    match connect_async(support::ws_url(base_url)).await {
        Err(tokio_tungstenite::tungstenite::Error::Http(response)) => {
            assert_eq!(response.status().as_u16(), 429);
        }
        Err(e) => panic!("unexpected connect error: {e}"),
        Ok(_) => panic!("second driver should be rejected"),
    }

    // Replica kept in lockstep with the host, exactly as a real driver would.
    let mut replica = Engine::from_snapshot(
        &support::scenario_level(),
        &MirrorProvider,
        snapshot.as_bytes(),
    )
    .expect("replica from start snapshot");
    let walk = Input::holding(&[Key::D]);

    for _ in 0..200 {
        let checksum = replica.checksum().expect("replica checksum");
        ws.send(input_frame(&checksum, &["D"])).await.expect("send input");
        replica.update(&walk);
        if replica.win {
            break;
        }
    }
    assert!(replica.win, "replica should reach the win state");

    support::wait_for_status(base_url, |s| s["won"] == true).await;

    let inventory: serde_json::Value = client
        .get(format!("{base_url}/inventory"))
        .send()
        .await
        .expect("inventory request")
        .json()
        .await
        .expect("inventory json");
    assert_eq!(inventory["items"][0]["name"], "gem");
    assert_eq!(inventory["items"][0]["important"], true);

    let checkpoints = std::fs::read_dir(support::snapshots_dir())
        .expect("snapshots dir")
        .count();
    assert!(checkpoints >= 1);

    ws.send(input_frame(&"0".repeat(64), &[]))
        .await
        .expect("send forged input");

    let mut close_code = None;
    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Close(frame)) => {
                close_code = frame.map(|f| f.code);
                break;
            }
            Ok(_) => continue,
            Err(_) => break,
        }
    }
    assert_eq!(close_code, Some(CloseCode::Policy));

    let status = support::wait_for_status(base_url, |s| s["connected"] == false).await;
    assert_eq!(status["cheated"], true);

    // The cached inventory survives the torn-down session.
    let inventory: serde_json::Value = client
        .get(format!("{base_url}/inventory"))
        .send()
        .await
        .expect("inventory request")
        .json()
        .await
        .expect("inventory json");
    assert_eq!(inventory["items"].as_array().map(Vec::len), Some(1));
}
