use super::{Dialog, DialogState};

const MODULO: i64 = 31337;

const WISE_TREE_TARGET: [i64; 17] = [
    1837, 14688, 26533, 18612, 26274, 9840, 11452, 19408, 19989, 9381, 9839, 14074, 14090, 845,
    8078, 31049, 1,
];

const REACTION: &str = "My honest reaction to that information:";

/// Accepts the one phrase whose polynomial hash matches `target`.
#[derive(Debug, Clone)]
pub struct RiddleDialog {
    target: Vec<i64>,
    state: DialogState,
}

impl RiddleDialog {
    pub fn new(target: Vec<i64>) -> Self {
        Self {
            target,
            state: DialogState::default(),
        }
    }

    pub fn wise_tree() -> Self {
        Self::new(WISE_TREE_TARGET.to_vec())
    }
}

/// Coefficients of `prod_i (x - c_i - 256 * i)` modulo 31337, lowest degree first.
pub fn poly_hash(text: &str) -> Vec<i64> {
    text.bytes()
        .enumerate()
        .fold(vec![1], |poly, (i, c)| {
            let root = -(c as i64) - ((i as i64) << 8);
            poly_mul(&poly, &[root.rem_euclid(MODULO), 1])
        })
}

fn poly_mul(a: &[i64], b: &[i64]) -> Vec<i64> {
    let mut out = vec![0; a.len() + b.len() - 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            out[i + j] = (out[i + j] + ca * cb).rem_euclid(MODULO);
        }
    }
    out
}

impl Dialog for RiddleDialog {
    fn greeting(&mut self) {
        self.state.text = "I am a wise tree. What do you want to know?".to_string();
    }

    fn feed(&mut self, text: &str) {
        if poly_hash(text) == self.target {
            self.state.text = format!("{REACTION} wise");
            self.state.gave_item = true;
            self.state.finished = true;
            return;
        }
        self.state.text = format!("{REACTION} bruh");
    }

    fn state(&self) -> &DialogState {
        &self.state
    }

    fn set_state(&mut self, state: DialogState) {
        self.state = state;
    }
}
