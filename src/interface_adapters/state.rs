use crate::use_cases::GameHost;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // The single session host shared by the websocket and query routes.
    pub host: Arc<GameHost>,
}
