// Network adapter modules: the driver websocket and the read-only HTTP queries.

pub mod client;
pub mod query;

pub use client::ws_handler;
pub use query::{inventory_handler, status_handler};
