use crate::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    Nmi,
    Brk,
}

#[derive(Debug)]
pub struct Interrupt {
    pub itype: InterruptType,
    pub vector_addr: Address,
    /// Whether the status copy pushed on the stack has the B flag set
    pub break_flag: bool,
    pub cpu_cycles: u8,
}

pub const NMI: Interrupt = Interrupt {
    itype: InterruptType::Nmi,
    vector_addr: 0xfffa,
    break_flag: false,
    cpu_cycles: 7,
};

pub const BRK: Interrupt = Interrupt {
    itype: InterruptType::Brk,
    vector_addr: 0xfffe,
    break_flag: true,
    cpu_cycles: 7,
};
