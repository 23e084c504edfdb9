use super::{Dialog, DialogState};
use crate::domain::ports::PasswordBackend;
use std::sync::Arc;

/// Password game against a remote text generator.
///
/// Every line is first checked as a password; if it is not the password it is
/// forwarded as a prompt and the reply is shown. Backend failures are appended
/// to the text so the player can retry.
pub struct PasswordDialog {
    intro: String,
    mask_input: bool,
    backend: Arc<dyn PasswordBackend>,
    state: DialogState,
}

impl PasswordDialog {
    pub fn new(
        intro: impl Into<String>,
        mask_input: bool,
        backend: Arc<dyn PasswordBackend>,
    ) -> Self {
        Self {
            intro: intro.into(),
            mask_input,
            backend,
            state: DialogState::default(),
        }
    }

    fn append_line(&mut self, line: &str) {
        self.state.text.push_str(line);
        self.state.text.push('\n');
    }
}

impl Dialog for PasswordDialog {
    fn greeting(&mut self) {
        self.state.text = self.intro.clone();
    }

    fn feed(&mut self, text: &str) {
        let shown = if self.mask_input {
            "*".repeat(text.chars().count())
        } else {
            text.to_string()
        };
        self.state.text = format!("> {shown}\n");

        match self.backend.check_password(text) {
            Ok(true) => {
                self.append_line("You defeated me!!!");
                self.state.gave_item = true;
                self.state.finished = true;
                return;
            }
            Ok(false) => {}
            Err(e) => self.append_line(&format!("Error: {e}")),
        }

        match self.backend.generate(text) {
            Ok(reply) => self.append_line(&reply),
            Err(e) => self.append_line(&format!("Error: {e}")),
        }
    }

    fn state(&self) -> &DialogState {
        &self.state
    }

    fn set_state(&mut self, state: DialogState) {
        self.state = state;
    }
}
