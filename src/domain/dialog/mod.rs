// Turn-based NPC conversations that can gate item rewards.

pub mod mirror;
pub mod password;
pub mod riddle;
pub mod scripted;

pub use mirror::MirrorDialog;
pub use password::PasswordDialog;
pub use riddle::RiddleDialog;
pub use scripted::ScriptedDialog;

use crate::domain::ports::PasswordBackend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Observable result of a conversation so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    /// No further input is accepted once set.
    pub finished: bool,
    /// The NPC hands over its reward item.
    pub gave_item: bool,
    pub text: String,
}

/// Contract shared by every conversation backend.
pub trait Dialog: Send {
    /// Resets the visible text to the opening line.
    fn greeting(&mut self);
    /// Consumes one line typed by the player.
    fn feed(&mut self, text: &str);
    fn state(&self) -> &DialogState;
    /// Overwrites the state, used by replicas following an authoritative host.
    fn set_state(&mut self, state: DialogState);
}

/// Maps the `dialog` property of a level NPC to a conversation.
pub trait DialogProvider {
    fn get(&self, id: &str) -> Option<Box<dyn Dialog>>;
}

/// Dialogs available on the authoritative host.
#[derive(Clone, Default)]
pub struct StandardProvider {
    password_backend: Option<Arc<dyn PasswordBackend>>,
}

impl StandardProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_password_backend(mut self, backend: Arc<dyn PasswordBackend>) -> Self {
        self.password_backend = Some(backend);
        self
    }
}

impl DialogProvider for StandardProvider {
    fn get(&self, id: &str) -> Option<Box<dyn Dialog>> {
        match id {
            "slonik" => Some(Box::new(ScriptedDialog::new(
                "Hello, I'm SLONIK! Tell me the magic word.",
                "PROH",
            ))),
            "wise-tree" => Some(Box::new(RiddleDialog::wise_tree())),
            "oracle" | "oracle-masked" => {
                let backend = self.password_backend.clone()?;
                Some(Box::new(PasswordDialog::new(
                    "I guard the password. Try to make me say it.",
                    id == "oracle-masked",
                    backend,
                )))
            }
            _ => None,
        }
    }
}

/// Dialogs for a replica: every NPC mirrors the host's state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorProvider;

impl DialogProvider for MirrorProvider {
    fn get(&self, _id: &str) -> Option<Box<dyn Dialog>> {
        Some(Box::new(MirrorDialog::default()))
    }
}
