// Wire protocol DTOs and conversions for the driver WebSocket.

use crate::domain::dialog::DialogState;
use crate::domain::{Input, Key};
use crate::use_cases::SessionStart;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::{Deserialize, Serialize};

/// Messages the server sends to the connected driver.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Sent once, right after the upgrade.
    Start(StartDto),
    // Sent after every tick while an NPC dialog is open.
    Dialog(DialogStateDto),
}

/// Messages the driver sends to the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    Input(InputDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct StartDto {
    pub level_id: String,
    /// Snapshot JSON; its SHA-256 is the checksum of the first input.
    pub snapshot: String,
}

impl From<SessionStart> for StartDto {
    fn from(start: SessionStart) -> Self {
        Self {
            level_id: start.level_id,
            snapshot: String::from_utf8_lossy(&start.snapshot).into_owned(),
        }
    }
}

/// One tick of driver input, tagged with the checksum of the state it saw.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDto {
    pub checksum: String,
    #[serde(default)]
    pub keys_pressed: Vec<String>,
    #[serde(default)]
    pub new_keys_pressed: Vec<String>,
}

// Unknown key names are dropped rather than rejected.
fn known_keys(names: &[String]) -> Vec<Key> {
    names
        .iter()
        .filter_map(|name| {
            let de: StrDeserializer<'_, ValueError> = name.as_str().into_deserializer();
            Key::deserialize(de).ok()
        })
        .collect()
}

impl From<&InputDto> for Input {
    fn from(dto: &InputDto) -> Self {
        Input::new(known_keys(&dto.keys_pressed), known_keys(&dto.new_keys_pressed))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DialogStateDto {
    pub finished: bool,
    pub gave_item: bool,
    pub text: String,
}

impl From<DialogState> for DialogStateDto {
    fn from(state: DialogState) -> Self {
        Self {
            finished: state.finished,
            gave_item: state.gave_item,
            text: state.text,
        }
    }
}
