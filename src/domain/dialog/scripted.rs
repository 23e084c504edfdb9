use super::{Dialog, DialogState};

/// Fixed greeting with a single accepted answer.
#[derive(Debug, Clone)]
pub struct ScriptedDialog {
    greet: String,
    answer: String,
    state: DialogState,
}

impl ScriptedDialog {
    pub fn new(greet: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            greet: greet.into(),
            answer: answer.into(),
            state: DialogState::default(),
        }
    }
}

impl Dialog for ScriptedDialog {
    fn greeting(&mut self) {
        self.state.text = self.greet.clone();
    }

    fn feed(&mut self, text: &str) {
        self.state.text.push_str(&format!("\nYou said: {text}"));
        if text.trim().eq_ignore_ascii_case(&self.answer) {
            self.state.text.push_str("\nThat's the one. Take this.");
            self.state.gave_item = true;
            self.state.finished = true;
        }
    }

    fn state(&self) -> &DialogState {
        &self.state
    }

    fn set_state(&mut self, state: DialogState) {
        self.state = state;
    }
}
