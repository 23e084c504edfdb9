use super::{Dialog, DialogState};

/// Replica-side dialog: input is handled by the host, state arrives over the wire.
#[derive(Debug, Clone, Default)]
pub struct MirrorDialog {
    state: DialogState,
}

impl Dialog for MirrorDialog {
    fn greeting(&mut self) {}

    fn feed(&mut self, _text: &str) {}

    fn state(&self) -> &DialogState {
        &self.state
    }

    fn set_state(&mut self, state: DialogState) {
        self.state = state;
    }
}
