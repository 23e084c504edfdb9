// Shared primitives for one-time server bootstrapping across integration tests.
#![allow(dead_code)]

use platformer_server::ServerConfig;
use platformer_server::domain::LevelDescription;
use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const LEVEL_ID: &str = "scenario";

// Spawn, a damage-2 spike and one important item on a solid floor.
pub fn scenario_level_json() -> String {
    let mut tiles = vec![".".repeat(60); 9];
    tiles.push("#".repeat(60));
    serde_json::json!({
        "id": LEVEL_ID,
        "tile_width": 32,
        "tile_height": 32,
        "tiles": tiles,
        "objects": [
            { "name": "spawn", "type": "player-spawn", "x": 64, "y": 256,
              "width": 32, "height": 32 },
            { "name": "spike", "type": "spike", "x": 128, "y": 256, "width": 32, "height": 32,
              "properties": { "damage": "2" } },
            { "name": "gem", "type": "item", "x": 192, "y": 256, "width": 32, "height": 32,
              "properties": { "important": "true" } }
        ]
    })
    .to_string()
}

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();
// Level and snapshot directories live as long as the test binary.
static DATA_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();

pub fn scenario_level() -> LevelDescription {
    serde_json::from_str(&scenario_level_json()).expect("scenario level json")
}

pub fn snapshots_dir() -> PathBuf {
    data_dir().join("snapshots")
}

fn data_dir() -> PathBuf {
    DATA_DIR
        .get_or_init(|| {
            let dir = tempfile::tempdir().expect("test data dir");
            let levels = dir.path().join("levels");
            std::fs::create_dir_all(&levels).expect("levels dir");
            std::fs::write(levels.join(format!("{LEVEL_ID}.json")), scenario_level_json())
                .expect("write level");
            dir
        })
        .path()
        .to_path_buf()
}

fn test_config() -> ServerConfig {
    let dir = data_dir();
    ServerConfig {
        port: 0,
        level_id: LEVEL_ID.to_string(),
        levels_dir: dir.join("levels"),
        snapshots_dir: dir.join("snapshots"),
        llm_proxy_url: None,
        team_token: String::new(),
        llm_timeout: Duration::from_secs(1),
    }
}

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let config = test_config();
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                platformer_server::run(listener, config)
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

pub fn ws_url(base_url: &str) -> String {
    format!("{}/ws", base_url.replacen("http://", "ws://", 1))
}

pub type Driver = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

// Connect as the driver, retrying while the previous session still holds the slot.
pub async fn connect_driver(base_url: &str) -> Driver {
    for _ in 0..100 {
        match tokio_tungstenite::connect_async(ws_url(base_url)).await {
            Ok((ws, _)) => return ws,
            Err(tokio_tungstenite::tungstenite::Error::Http(response))
                if response.status().as_u16() == 429 =>
            {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Err(e) => panic!("driver failed to connect: {e}"),
        }
    }
    panic!("driver slot never freed");
}

// Poll `/status` until `done` accepts it; the driver socket gives no per-tick acks.
pub async fn wait_for_status(
    base_url: &str,
    done: impl Fn(&serde_json::Value) -> bool,
) -> serde_json::Value {
    let client = reqwest::Client::new();
    for _ in 0..200 {
        let status: serde_json::Value = client
            .get(format!("{base_url}/status"))
            .send()
            .await
            .expect("status request")
            .json()
            .await
            .expect("status json");
        if done(&status) {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("status never reached the expected state");
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
