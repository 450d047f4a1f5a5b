use crate::input::joypad::JoypadButton;

/// Button held down for frames `from..to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub button: JoypadButton,
    pub from: u64,
    pub to: u64,
}

impl Press {
    pub fn is_active(&self, frame: u64) -> bool {
        (self.from..self.to).contains(&frame)
    }
}

/// Timed button presses, for driving a game without a human at the controls
#[derive(Debug, Default, Clone)]
pub struct InputScript {
    presses: Vec<Press>,
}

impl InputScript {
    pub fn new(presses: impl IntoIterator<Item = Press>) -> Self {
        Self {
            presses: presses.into_iter().collect(),
        }
    }

    /// Snapshot of every button held during `frame`
    pub fn buttons_at(&self, frame: u64) -> JoypadButton {
        self.presses
            .iter()
            .filter(|press| press.is_active(frame))
            .fold(JoypadButton::empty(), |held, press| held | press.button)
    }
}
