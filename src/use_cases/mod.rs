// Use cases layer: the session workflow around the authoritative engine.

pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use session::{GameHost, HostStatus, SessionError, SessionStart};
