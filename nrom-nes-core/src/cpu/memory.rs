use crate::{Address, Byte};

/// Anything the CPU can be wired to.
///
/// Reads take `&mut self` because reading some registers has side effects
/// (PPU status, PPU data buffer, controller shift register).
/// Neither operation can fail: unmapped addresses read as 0 and ignore writes.
pub trait Memory {
    fn read(&mut self, addr: Address) -> Byte;
    fn write(&mut self, addr: Address, value: Byte);

    /// Side-effect free read used for tracing. Registers with read side
    /// effects report 0.
    fn peek(&self, addr: Address) -> Byte;

    fn read_u16(&mut self, addr: Address) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));

        u16::from_le_bytes([lo, hi])
    }

    fn write_u16(&mut self, addr: Address, data: u16) {
        let [lo, hi] = data.to_le_bytes();

        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    fn peek_u16(&self, addr: Address) -> u16 {
        u16::from_le_bytes([self.peek(addr), self.peek(addr.wrapping_add(1))])
    }
}
