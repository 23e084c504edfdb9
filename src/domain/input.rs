// Keyboard state consumed by one engine tick.

use serde::{Deserialize, Serialize};

/// Keys the simulation reacts to. Anything else is dropped at the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    #[serde(rename = "0")]
    Digit0,
    #[serde(rename = "1")]
    Digit1,
    #[serde(rename = "2")]
    Digit2,
    #[serde(rename = "3")]
    Digit3,
    #[serde(rename = "4")]
    Digit4,
    #[serde(rename = "5")]
    Digit5,
    #[serde(rename = "6")]
    Digit6,
    #[serde(rename = "7")]
    Digit7,
    #[serde(rename = "8")]
    Digit8,
    #[serde(rename = "9")]
    Digit9,
    Space,
    Comma,
    Period,
    Slash,
    Escape,
    Enter,
    Backspace,
    Up,
    Down,
}

impl Key {
    /// Character typed into a dialog for this key, if it is printable.
    pub fn rune(self) -> Option<char> {
        use Key::*;
        let c = match self {
            A => 'A',
            B => 'B',
            C => 'C',
            D => 'D',
            E => 'E',
            F => 'F',
            G => 'G',
            H => 'H',
            I => 'I',
            J => 'J',
            K => 'K',
            L => 'L',
            M => 'M',
            N => 'N',
            O => 'O',
            P => 'P',
            Q => 'Q',
            R => 'R',
            S => 'S',
            T => 'T',
            U => 'U',
            V => 'V',
            W => 'W',
            X => 'X',
            Y => 'Y',
            Z => 'Z',
            Digit0 => '0',
            Digit1 => '1',
            Digit2 => '2',
            Digit3 => '3',
            Digit4 => '4',
            Digit5 => '5',
            Digit6 => '6',
            Digit7 => '7',
            Digit8 => '8',
            Digit9 => '9',
            Space => ' ',
            Comma => ',',
            Period => '.',
            Slash => '?',
            Escape | Enter | Backspace | Up | Down => return None,
        };
        Some(c)
    }
}

/// Held keys plus the keys that went down on this tick, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub pressed: Vec<Key>,
    #[serde(default)]
    pub new_pressed: Vec<Key>,
}

impl Input {
    pub fn new(pressed: Vec<Key>, new_pressed: Vec<Key>) -> Self {
        Self {
            pressed,
            new_pressed,
        }
    }

    pub fn holding(keys: &[Key]) -> Self {
        Self::new(keys.to_vec(), Vec::new())
    }

    /// A freshly pressed key that is also held.
    pub fn tap(keys: &[Key]) -> Self {
        Self::new(keys.to_vec(), keys.to_vec())
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.new_pressed.contains(&key)
    }
}
