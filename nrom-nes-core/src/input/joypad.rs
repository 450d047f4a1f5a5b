use crate::Byte;
use bitflags::bitflags;

bitflags! {
    /// Button snapshot, in the order the controller shifts them out (A first)
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct JoypadButton: Byte {
        const RIGHT             = 0b1000_0000;
        const LEFT              = 0b0100_0000;
        const DOWN              = 0b0010_0000;
        const UP                = 0b0001_0000;
        const START             = 0b0000_1000;
        const SELECT            = 0b0000_0100;
        const BUTTON_B          = 0b0000_0010;
        const BUTTON_A          = 0b0000_0001;
    }
}

/// Open bus bits returned alongside the serial data bit
const OPEN_BUS: Byte = 0x40;

/// Standard controller on port $4016.
/// While strobe is high the shift register keeps reloading from the snapshot,
/// so every read returns the A button.
#[derive(Debug, Default)]
pub struct Joypad {
    strobe: bool,
    shift_register: Byte,
    buttons: JoypadButton,
}

impl Joypad {
    pub fn read(&mut self) -> Byte {
        if self.strobe {
            self.reload();
        }

        let response = (self.shift_register & 1) | OPEN_BUS;

        if !self.strobe {
            self.shift_register >>= 1;
        }

        response
    }

    pub fn write(&mut self, value: Byte) {
        self.strobe = value & 1 == 1;

        if self.strobe {
            self.reload();
        }
    }

    /// Replaces the snapshot with the host's current button state
    pub fn set_buttons(&mut self, buttons: JoypadButton) {
        self.buttons = buttons;

        if self.strobe {
            self.reload();
        }
    }

    fn reload(&mut self) {
        self.shift_register = self.buttons.bits();
    }
}
