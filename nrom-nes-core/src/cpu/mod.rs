pub mod addressing_mode;
mod memory;
pub mod opcodes;
mod stack_pointer;
mod status_register;
pub mod trace;

pub use addressing_mode::AddressingMode;
pub use memory::Memory;
pub use stack_pointer::StackPointer;
pub use status_register::StatusRegister;

use crate::bus::Bus;
use crate::cpu::opcodes::{Mnemonic, Opcode, OPCODE_TABLE};
use crate::interrupts::{Interrupt, BRK, NMI};
use crate::utils::NthBit;
use crate::{Address, Byte};
use log::trace;

type Register = Byte;
type ProgramCounter = Address;
/// Resolved operand: an effective address, or `None` for implied/accumulator modes
type Operand = Option<Address>;

const RESET_VECTOR_BEGIN_ADDR: Address = 0xfffc;

#[derive(Debug)]
pub struct Cpu<M = Bus> {
    pub accumulator: Register,
    pub register_x: Register,
    pub register_y: Register,
    pub status_register: StatusRegister,
    pub program_counter: ProgramCounter,
    pub stack_pointer: StackPointer,

    nmi_pending: bool,
    bus: M,
}

impl<M: Memory> Memory for Cpu<M> {
    fn read(&mut self, addr: Address) -> Byte {
        self.bus.read(addr)
    }

    fn write(&mut self, addr: Address, value: Byte) {
        self.bus.write(addr, value);
    }

    fn peek(&self, addr: Address) -> Byte {
        self.bus.peek(addr)
    }
}

impl<M: Memory> Cpu<M> {
    pub fn new(bus: M) -> Self {
        Self {
            accumulator: 0,
            register_x: 0,
            register_y: 0,
            status_register: StatusRegister::default(),
            program_counter: 0,
            stack_pointer: StackPointer::default(),
            nmi_pending: false,
            bus,
        }
    }

    pub fn bus(&self) -> &M {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut M {
        &mut self.bus
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.register_x = 0;
        self.register_y = 0;
        self.status_register = StatusRegister::default();
        self.stack_pointer.reset();
        self.nmi_pending = false;
        self.program_counter = self.read_u16(RESET_VECTOR_BEGIN_ADDR);
    }

    /// Latches an NMI; it is serviced at the start of the next `step`.
    /// NMI ignores the interrupt disable flag.
    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn is_nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Executes one instruction, or enters a pending NMI instead.
    /// Returns the number of CPU cycles consumed.
    pub fn step(&mut self) -> u8 {
        if self.nmi_pending {
            self.nmi_pending = false;
            return self.interrupt(&NMI);
        }

        let code = self.read(self.program_counter);
        self.program_counter = self.program_counter.wrapping_add(1);

        let opcode = OPCODE_TABLE[code as usize];
        self.execute(opcode);

        opcode.cycles
    }

    fn execute(&mut self, opcode: Opcode) {
        let operand = self.operand_address(opcode.mode);

        match opcode.mnemonic {
            Mnemonic::Adc => self.adc(operand),
            Mnemonic::And => self.and(operand),
            Mnemonic::Asl => self.asl(operand),
            Mnemonic::Bcc => self.branch(operand, !self.status_register.contains(StatusRegister::CARRY)),
            Mnemonic::Bcs => self.branch(operand, self.status_register.contains(StatusRegister::CARRY)),
            Mnemonic::Beq => self.branch(operand, self.status_register.contains(StatusRegister::ZERO)),
            Mnemonic::Bit => self.bit(operand),
            Mnemonic::Bmi => self.branch(operand, self.status_register.contains(StatusRegister::NEGATIVE)),
            Mnemonic::Bne => self.branch(operand, !self.status_register.contains(StatusRegister::ZERO)),
            Mnemonic::Bpl => self.branch(operand, !self.status_register.contains(StatusRegister::NEGATIVE)),
            Mnemonic::Brk => self.brk(),
            Mnemonic::Bvc => self.branch(operand, !self.status_register.contains(StatusRegister::OVERFLOW)),
            Mnemonic::Bvs => self.branch(operand, self.status_register.contains(StatusRegister::OVERFLOW)),
            Mnemonic::Clc => self.status_register.set_carry_flag(false),
            Mnemonic::Cld => self.status_register.set_decimal_flag(false),
            Mnemonic::Cli => self.status_register.set_interrupt_flag(false),
            Mnemonic::Clv => self.status_register.set_overflow_flag(false),
            Mnemonic::Cmp => self.compare(self.accumulator, operand),
            Mnemonic::Cpx => self.compare(self.register_x, operand),
            Mnemonic::Cpy => self.compare(self.register_y, operand),
            Mnemonic::Dec => self.dec(operand),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),
            Mnemonic::Eor => self.eor(operand),
            Mnemonic::Inc => self.inc(operand),
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Jmp => self.jmp(operand),
            Mnemonic::Jsr => self.jsr(operand),
            Mnemonic::Lda => self.lda(operand),
            Mnemonic::Ldx => self.ldx(operand),
            Mnemonic::Ldy => self.ldy(operand),
            Mnemonic::Lsr => self.lsr(operand),
            Mnemonic::Nop => {}
            Mnemonic::Ora => self.ora(operand),
            Mnemonic::Pha => self.stack_push(self.accumulator),
            Mnemonic::Php => self.php(),
            Mnemonic::Pla => self.pla(),
            Mnemonic::Plp => self.plp(),
            Mnemonic::Rol => self.rol(operand),
            Mnemonic::Ror => self.ror(operand),
            Mnemonic::Rti => self.rti(),
            Mnemonic::Rts => self.rts(),
            Mnemonic::Sbc => self.sbc(operand),
            Mnemonic::Sec => self.status_register.set_carry_flag(true),
            Mnemonic::Sed => self.status_register.set_decimal_flag(true),
            Mnemonic::Sei => self.status_register.set_interrupt_flag(true),
            Mnemonic::Sta => self.store_value(self.accumulator, operand),
            Mnemonic::Stx => self.store_value(self.register_x, operand),
            Mnemonic::Sty => self.store_value(self.register_y, operand),
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Txs => self.stack_pointer.set(self.register_x),
            Mnemonic::Tya => self.tya(),
            Mnemonic::Undefined => trace!(
                "Undefined opcode {:#04x} at {:#06x} executed as NOP",
                opcode.code,
                self.program_counter.wrapping_sub(1)
            ),
        }
    }

    /// Resolves the effective address for `mode` and moves the program
    /// counter past the operand bytes.
    fn operand_address(&mut self, mode: AddressingMode) -> Operand {
        let pc = self.program_counter;
        let address = match mode {
            AddressingMode::Immediate => pc,
            AddressingMode::ZeroPage => self.read(pc).into(),
            AddressingMode::ZeroPageX => self.read(pc).wrapping_add(self.register_x).into(),
            AddressingMode::ZeroPageY => self.read(pc).wrapping_add(self.register_y).into(),
            AddressingMode::Absolute => self.read_u16(pc),
            AddressingMode::AbsoluteX => self.read_u16(pc).wrapping_add(self.register_x.into()),
            AddressingMode::AbsoluteY => self.read_u16(pc).wrapping_add(self.register_y.into()),
            AddressingMode::Indirect => {
                let ptr = self.read_u16(pc);
                self.read_u16_within_page(ptr)
            }
            AddressingMode::IndirectX => {
                let ptr = self.read(pc).wrapping_add(self.register_x);
                self.read_zero_page_u16(ptr)
            }
            AddressingMode::IndirectY => {
                let ptr = self.read(pc);
                self.read_zero_page_u16(ptr)
                    .wrapping_add(self.register_y.into())
            }
            AddressingMode::Relative => {
                let offset = self.read(pc) as i8;
                pc.wrapping_add(1).wrapping_add(offset as Address)
            }
            AddressingMode::Accumulator | AddressingMode::Implied => return None,
        };

        self.program_counter = pc.wrapping_add(mode.operand_len());

        Some(address)
    }

    /// 16-bit read that never leaves the page of `addr`: a pointer at $xxFF
    /// takes its high byte from $xx00 (the indirect JMP bug).
    fn read_u16_within_page(&mut self, addr: Address) -> u16 {
        let lo = self.read(addr);
        let hi = self.read((addr & 0xff00) | (addr.wrapping_add(1) & 0x00ff));

        u16::from_le_bytes([lo, hi])
    }

    fn read_zero_page_u16(&mut self, ptr: Byte) -> u16 {
        let lo = self.read(ptr.into());
        let hi = self.read(ptr.wrapping_add(1).into());

        u16::from_le_bytes([lo, hi])
    }

    /// Value of the operand; the accumulator when there is no address
    fn load_operand(&mut self, operand: Operand) -> Byte {
        match operand {
            Some(addr) => self.read(addr),
            None => self.accumulator,
        }
    }

    fn store_operand(&mut self, operand: Operand, value: Byte) {
        match operand {
            Some(addr) => self.write(addr, value),
            None => self.accumulator = value,
        }
    }

    fn load_value(&mut self, operand: Operand) -> Byte {
        let value = self.load_operand(operand);
        self.status_register.update_zero_and_negative_flags(value);

        value
    }

    fn store_value(&mut self, value: Byte, operand: Operand) {
        if let Some(addr) = operand {
            self.write(addr, value);
        }
    }

    fn set_accumulator(&mut self, value: Byte) {
        self.accumulator = value;
        self.status_register.update_zero_and_negative_flags(value);
    }

    fn add_with_carry(&mut self, value: Byte) {
        let sum = self.accumulator as u16 + value as u16 + self.status_register.carry() as u16;
        let result = sum as Byte;
        // overflow when both inputs share a sign that the result does not
        let overflow = (self.accumulator ^ result) & (value ^ result) & 0x80 != 0;

        self.status_register.set_carry_flag(sum > 0xff);
        self.status_register.set_overflow_flag(overflow);
        self.set_accumulator(result);
    }

    fn adc(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        self.add_with_carry(value);
    }

    fn sbc(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        self.add_with_carry(!value);
    }

    fn and(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        self.set_accumulator(self.accumulator & value);
    }

    fn eor(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        self.set_accumulator(self.accumulator ^ value);
    }

    fn ora(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        self.set_accumulator(self.accumulator | value);
    }

    fn bit(&mut self, operand: Operand) {
        let value = self.load_operand(operand);

        self.status_register
            .set_zero_flag(self.accumulator & value == 0);
        self.status_register.set_overflow_flag(value.nth_bit(6));
        self.status_register.set_negative_flag(value.nth_bit(7));
    }

    fn compare(&mut self, register: Register, operand: Operand) {
        let value = self.load_operand(operand);

        self.status_register.set_carry_flag(register >= value);
        self.status_register
            .update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    fn asl(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        let shifted = value << 1;

        self.status_register.set_carry_flag(value.nth_bit(7));
        self.status_register.update_zero_and_negative_flags(shifted);
        self.store_operand(operand, shifted);
    }

    fn lsr(&mut self, operand: Operand) {
        let value = self.load_operand(operand);
        let shifted = value >> 1;

        self.status_register.set_carry_flag(value.nth_bit(0));
        self.status_register.update_zero_and_negative_flags(shifted);
        self.store_operand(operand, shifted);
    }

    fn rol(&mut self, operand: Operand) {
        // rotate 1 bit left with input carry being stored at bit 0
        let value = self.load_operand(operand);
        let rotated = (value << 1) | self.status_register.carry();

        self.status_register.set_carry_flag(value.nth_bit(7));
        self.status_register.update_zero_and_negative_flags(rotated);
        self.store_operand(operand, rotated);
    }

    fn ror(&mut self, operand: Operand) {
        // rotate 1 bit right with input carry being stored at bit 7
        let value = self.load_operand(operand);
        let rotated = (value >> 1) | (self.status_register.carry() << 7);

        self.status_register.set_carry_flag(value.nth_bit(0));
        self.status_register.update_zero_and_negative_flags(rotated);
        self.store_operand(operand, rotated);
    }

    fn inc(&mut self, operand: Operand) {
        let value = self.load_operand(operand).wrapping_add(1);

        self.status_register.update_zero_and_negative_flags(value);
        self.store_operand(operand, value);
    }

    fn dec(&mut self, operand: Operand) {
        let value = self.load_operand(operand).wrapping_sub(1);

        self.status_register.update_zero_and_negative_flags(value);
        self.store_operand(operand, value);
    }

    fn inx(&mut self) {
        self.register_x = self.register_x.wrapping_add(1);
        self.status_register
            .update_zero_and_negative_flags(self.register_x);
    }

    fn iny(&mut self) {
        self.register_y = self.register_y.wrapping_add(1);
        self.status_register
            .update_zero_and_negative_flags(self.register_y);
    }

    fn dex(&mut self) {
        self.register_x = self.register_x.wrapping_sub(1);
        self.status_register
            .update_zero_and_negative_flags(self.register_x);
    }

    fn dey(&mut self) {
        self.register_y = self.register_y.wrapping_sub(1);
        self.status_register
            .update_zero_and_negative_flags(self.register_y);
    }

    fn lda(&mut self, operand: Operand) {
        self.accumulator = self.load_value(operand);
    }

    fn ldx(&mut self, operand: Operand) {
        self.register_x = self.load_value(operand);
    }

    fn ldy(&mut self, operand: Operand) {
        self.register_y = self.load_value(operand);
    }

    fn tax(&mut self) {
        self.register_x = self.accumulator;
        self.status_register
            .update_zero_and_negative_flags(self.register_x);
    }

    fn tay(&mut self) {
        self.register_y = self.accumulator;
        self.status_register
            .update_zero_and_negative_flags(self.register_y);
    }

    fn tsx(&mut self) {
        self.register_x = self.stack_pointer.value();
        self.status_register
            .update_zero_and_negative_flags(self.register_x);
    }

    fn txa(&mut self) {
        self.set_accumulator(self.register_x);
    }

    fn tya(&mut self) {
        self.set_accumulator(self.register_y);
    }

    fn branch(&mut self, operand: Operand, condition: bool) {
        if let (true, Some(target)) = (condition, operand) {
            self.program_counter = target;
        }
    }

    fn jmp(&mut self, operand: Operand) {
        if let Some(target) = operand {
            self.program_counter = target;
        }
    }

    fn jsr(&mut self, operand: Operand) {
        // the pushed address is the last byte of the JSR instruction
        let return_addr = self.program_counter.wrapping_sub(1);
        self.stack_push_u16(return_addr);
        self.jmp(operand);
    }

    fn rts(&mut self) {
        self.program_counter = self.stack_pop_u16().wrapping_add(1);
    }

    fn rti(&mut self) {
        self.plp();
        self.program_counter = self.stack_pop_u16();
    }

    fn brk(&mut self) {
        // BRK skips a padding byte after the opcode
        self.program_counter = self.program_counter.wrapping_add(1);
        self.interrupt(&BRK);
    }

    fn php(&mut self) {
        self.stack_push(self.status_register.with_break_flag().bits());
    }

    fn plp(&mut self) {
        let value = self.stack_pop();
        self.status_register = StatusRegister::from(value) | StatusRegister::UNUSED;
    }

    fn pla(&mut self) {
        let value = self.stack_pop();
        self.set_accumulator(value);
    }

    fn interrupt(&mut self, interrupt: &Interrupt) -> u8 {
        trace!(
            "{:?} interrupt at {:#06x}",
            interrupt.itype, self.program_counter
        );

        self.stack_push_u16(self.program_counter);

        let status = if interrupt.break_flag {
            self.status_register.with_break_flag()
        } else {
            self.status_register.without_break_flag()
        };
        self.stack_push(status.bits());

        self.status_register.set_interrupt_flag(true);
        self.program_counter = self.read_u16(interrupt.vector_addr);

        interrupt.cpu_cycles
    }

    fn stack_push(&mut self, value: Byte) {
        self.write(self.stack_pointer.address(), value);
        self.stack_pointer.decrement();
    }

    fn stack_pop(&mut self) -> Byte {
        self.stack_pointer.increment();
        self.read(self.stack_pointer.address())
    }

    fn stack_push_u16(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();

        self.stack_push(hi);
        self.stack_push(lo);
    }

    fn stack_pop_u16(&mut self) -> u16 {
        let lo = self.stack_pop();
        let hi = self.stack_pop();

        u16::from_le_bytes([lo, hi])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROGRAM_START: Address = 0x8000;

    /// Flat 64KiB of RAM, so that every address (vectors included) is writable
    pub(super) struct FlatMemory([Byte; 0x10000]);

    impl Memory for FlatMemory {
        fn read(&mut self, addr: Address) -> Byte {
            self.0[addr as usize]
        }

        fn write(&mut self, addr: Address, value: Byte) {
            self.0[addr as usize] = value;
        }

        fn peek(&self, addr: Address) -> Byte {
            self.0[addr as usize]
        }
    }

    /// CPU reset into `program`, loaded at `start`
    pub(super) fn test_cpu_at(start: Address, program: &[Byte]) -> Cpu<FlatMemory> {
        let mut memory = FlatMemory([0; 0x10000]);
        let begin = start as usize;
        memory.0[begin..begin + program.len()].copy_from_slice(program);
        memory.write_u16(RESET_VECTOR_BEGIN_ADDR, start);

        let mut cpu = Cpu::new(memory);
        cpu.reset();
        cpu
    }

    fn test_cpu(program: &[Byte]) -> Cpu<FlatMemory> {
        test_cpu_at(PROGRAM_START, program)
    }

    fn run_steps(cpu: &mut Cpu<FlatMemory>, steps: usize) -> usize {
        (0..steps).map(|_| cpu.step() as usize).sum()
    }

    fn flags(cpu: &Cpu<FlatMemory>, flag: StatusRegister) -> bool {
        cpu.status_register.contains(flag)
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn loads_program_counter_from_reset_vector() {
            let mut memory = FlatMemory([0; 0x10000]);
            memory.write_u16(0xfffc, 0xc123);
            let mut cpu = Cpu::new(memory);
            cpu.accumulator = 0x11;
            cpu.register_x = 0x22;
            cpu.register_y = 0x33;

            cpu.reset();

            assert_eq!(0xc123, cpu.program_counter);
            assert_eq!(0, cpu.accumulator);
            assert_eq!(0, cpu.register_x);
            assert_eq!(0, cpu.register_y);
            assert_eq!(0xfd, cpu.stack_pointer.value());
            assert_eq!(
                StatusRegister::INTERRUPT_DISABLE | StatusRegister::UNUSED,
                cpu.status_register
            );
        }
    }

    mod lda {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn immediate_load() {
            let mut cpu = test_cpu(&[0xa9, 0x05]);

            assert_eq!(2, cpu.step());

            assert_eq!(cpu.accumulator, 0x05);
            assert!(!flags(&cpu, StatusRegister::ZERO));
            assert!(!flags(&cpu, StatusRegister::NEGATIVE));
        }

        #[test]
        fn zero_and_negative_flags_for_every_value() {
            for value in 0..=Byte::MAX {
                let mut cpu = test_cpu(&[0xa9, value]);
                cpu.step();

                assert_eq!(value == 0, flags(&cpu, StatusRegister::ZERO));
                assert_eq!(value.nth_bit(7), flags(&cpu, StatusRegister::NEGATIVE));
            }
        }

        #[test]
        fn ldx_ldy_zero_and_negative_flags_for_every_value() {
            for value in 0..=Byte::MAX {
                let mut cpu = test_cpu(&[0xa2, value, 0xa0, value]);

                cpu.step();
                assert_eq!(value, cpu.register_x);
                assert_eq!(value == 0, flags(&cpu, StatusRegister::ZERO));
                assert_eq!(value.nth_bit(7), flags(&cpu, StatusRegister::NEGATIVE));

                cpu.step();
                assert_eq!(value, cpu.register_y);
                assert_eq!(value == 0, flags(&cpu, StatusRegister::ZERO));
                assert_eq!(value.nth_bit(7), flags(&cpu, StatusRegister::NEGATIVE));
            }
        }

        #[test]
        fn load_from_memory() {
            let mut cpu = test_cpu(&[0xa5, 0x10]);
            cpu.write(0x10, 0x55);

            assert_eq!(3, cpu.step());
            assert_eq!(cpu.accumulator, 0x55);
        }

        #[test]
        fn zero_page_x_wraps_within_zero_page() {
            let mut cpu = test_cpu(&[0xb5, 0xf0]);
            cpu.register_x = 0x20;
            cpu.write(0x10, 0x42);

            cpu.step();

            assert_eq!(cpu.accumulator, 0x42);
        }

        #[test]
        fn absolute_y_crosses_pages() {
            let mut cpu = test_cpu(&[0xb9, 0xff, 0x02]);
            cpu.register_y = 0x01;
            cpu.write(0x0300, 0x99);

            assert_eq!(4, cpu.step());
            assert_eq!(cpu.accumulator, 0x99);
        }

        #[test]
        fn pre_indexed_indirect() {
            let mut cpu = test_cpu(&[0xa1, 0x20]);
            cpu.register_x = 0x04;
            cpu.write_u16(0x24, 0x0456);
            cpu.write(0x0456, 0x77);

            assert_eq!(6, cpu.step());
            assert_eq!(cpu.accumulator, 0x77);
        }

        #[test]
        fn post_indexed_indirect() {
            let mut cpu = test_cpu(&[0xb1, 0x33]);
            cpu.register_y = 0x05;
            cpu.write_u16(0x33, 0x0400);
            cpu.write(0x0405, 0xaa);

            assert_eq!(5, cpu.step());
            assert_eq!(cpu.accumulator, 0xaa);
        }

        #[test]
        fn indirect_pointer_wraps_in_zero_page() {
            let mut cpu = test_cpu(&[0xb1, 0xff]);
            cpu.write(0xff, 0x34);
            cpu.write(0x00, 0x12);
            cpu.write(0x1234, 0x5a);

            cpu.step();

            assert_eq!(cpu.accumulator, 0x5a);
        }
    }

    mod transfers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn moves_reg_a_value_to_reg_x() {
            let mut cpu = test_cpu(&[0xa9, 0x0a, 0xaa]);
            run_steps(&mut cpu, 2);

            assert_eq!(cpu.accumulator, 10);
            assert_eq!(cpu.register_x, 10);
        }

        #[test]
        fn transfers_update_zero_and_negative() {
            // TAX, TAY, TXA, TYA, TSX
            for code in [0xaa, 0xa8, 0x8a, 0x98, 0xba] {
                for value in 0..=Byte::MAX {
                    let mut cpu = test_cpu(&[code]);
                    cpu.accumulator = value;
                    cpu.register_x = value;
                    cpu.register_y = value;
                    cpu.stack_pointer.set(value);

                    cpu.step();

                    assert_eq!(value == 0, flags(&cpu, StatusRegister::ZERO));
                    assert_eq!(value >= 0x80, flags(&cpu, StatusRegister::NEGATIVE));
                }
            }
        }

        #[test]
        fn txs_leaves_flags_alone() {
            let mut cpu = test_cpu(&[0x9a]);
            cpu.register_x = 0x00;

            cpu.step();

            assert_eq!(0x00, cpu.stack_pointer.value());
            assert!(!flags(&cpu, StatusRegister::ZERO));
        }
    }

    mod logical {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn and_ora_eor_update_zero_and_negative() {
            let cases: [(Byte, fn(Byte, Byte) -> Byte); 3] = [
                (0x29, |a, v| a & v),
                (0x09, |a, v| a | v),
                (0x49, |a, v| a ^ v),
            ];

            for (code, expected) in cases {
                for value in 0..=Byte::MAX {
                    let mut cpu = test_cpu(&[code, value]);
                    cpu.accumulator = 0xc3;

                    cpu.step();

                    let result = expected(0xc3, value);
                    assert_eq!(result, cpu.accumulator);
                    assert_eq!(result == 0, flags(&cpu, StatusRegister::ZERO));
                    assert_eq!(result >= 0x80, flags(&cpu, StatusRegister::NEGATIVE));
                }
            }
        }

        #[test]
        fn bit_copies_top_bits_and_tests_mask() {
            let mut cpu = test_cpu(&[0x24, 0x10]);
            cpu.accumulator = 0x01;
            cpu.write(0x10, 0xc0);

            cpu.step();

            assert!(flags(&cpu, StatusRegister::ZERO));
            assert!(flags(&cpu, StatusRegister::OVERFLOW));
            assert!(flags(&cpu, StatusRegister::NEGATIVE));
            assert_eq!(0x01, cpu.accumulator);
        }
    }

    mod arithmetic {
        use super::*;
        use pretty_assertions::assert_eq;

        fn adc(a: Byte, value: Byte, carry: bool) -> Cpu<FlatMemory> {
            let mut cpu = test_cpu(&[0x69, value]);
            cpu.accumulator = a;
            cpu.status_register.set_carry_flag(carry);
            cpu.step();
            cpu
        }

        fn sbc(a: Byte, value: Byte, carry: bool) -> Cpu<FlatMemory> {
            let mut cpu = test_cpu(&[0xe9, value]);
            cpu.accumulator = a;
            cpu.status_register.set_carry_flag(carry);
            cpu.step();
            cpu
        }

        #[test]
        fn adc_overflow_table() {
            // (a, operand, carry in) => (result, carry out, overflow)
            let cases = [
                ((0x50, 0x10, false), (0x60, false, false)),
                ((0x50, 0x50, false), (0xa0, false, true)),
                ((0x50, 0x90, false), (0xe0, false, false)),
                ((0x50, 0xd0, false), (0x20, true, false)),
                ((0xd0, 0x10, false), (0xe0, false, false)),
                ((0xd0, 0x50, false), (0x20, true, false)),
                ((0xd0, 0x90, false), (0x60, true, true)),
                ((0xd0, 0xd0, false), (0xa0, true, false)),
                ((0xff, 0x00, true), (0x00, true, false)),
                ((0x7f, 0x00, true), (0x80, false, true)),
            ];

            for ((a, value, carry_in), (result, carry, overflow)) in cases {
                let cpu = adc(a, value, carry_in);

                assert_eq!(result, cpu.accumulator, "{a:#x} + {value:#x}");
                assert_eq!(carry, flags(&cpu, StatusRegister::CARRY), "{a:#x} + {value:#x}");
                assert_eq!(overflow, flags(&cpu, StatusRegister::OVERFLOW), "{a:#x} + {value:#x}");
            }
        }

        #[test]
        fn sbc_overflow_table() {
            // carry in set means "no borrow"
            let cases = [
                ((0x50, 0xf0, true), (0x60, false, false)),
                ((0x50, 0xb0, true), (0xa0, false, true)),
                ((0x50, 0x70, true), (0xe0, false, false)),
                ((0x50, 0x30, true), (0x20, true, false)),
                ((0xd0, 0xf0, true), (0xe0, false, false)),
                ((0xd0, 0xb0, true), (0x20, true, false)),
                ((0xd0, 0x70, true), (0x60, true, true)),
                ((0xd0, 0x30, true), (0xa0, true, false)),
                ((0x00, 0x01, true), (0xff, false, false)),
                ((0x05, 0x03, false), (0x01, true, false)),
            ];

            for ((a, value, carry_in), (result, carry, overflow)) in cases {
                let cpu = sbc(a, value, carry_in);

                assert_eq!(result, cpu.accumulator, "{a:#x} - {value:#x}");
                assert_eq!(carry, flags(&cpu, StatusRegister::CARRY), "{a:#x} - {value:#x}");
                assert_eq!(overflow, flags(&cpu, StatusRegister::OVERFLOW), "{a:#x} - {value:#x}");
            }
        }

        #[test]
        fn compare_family() {
            // CMP, CPX, CPY immediate
            for code in [0xc9, 0xe0, 0xc0] {
                for (register, value, carry, zero, negative) in [
                    (0x40, 0x40, true, true, false),
                    (0x40, 0x20, true, false, false),
                    (0x40, 0x50, false, false, true),
                    (0x00, 0xff, false, false, false),
                    (0xff, 0x00, true, false, true),
                ] {
                    let mut cpu = test_cpu(&[code, value]);
                    cpu.accumulator = register;
                    cpu.register_x = register;
                    cpu.register_y = register;

                    cpu.step();

                    assert_eq!(carry, flags(&cpu, StatusRegister::CARRY));
                    assert_eq!(zero, flags(&cpu, StatusRegister::ZERO));
                    assert_eq!(negative, flags(&cpu, StatusRegister::NEGATIVE));
                }
            }
        }

        #[test]
        fn inx_overflow() {
            let mut cpu = test_cpu(&[0xa9, 0xff, 0xaa, 0xe8, 0xe8]);
            run_steps(&mut cpu, 4);

            assert_eq!(cpu.register_x, 1);
        }

        #[test]
        fn dey_to_zero_sets_zero_flag() {
            let mut cpu = test_cpu(&[0x88]);
            cpu.register_y = 1;

            cpu.step();

            assert_eq!(0, cpu.register_y);
            assert!(flags(&cpu, StatusRegister::ZERO));
        }

        #[test]
        fn inc_and_dec_memory() {
            let mut cpu = test_cpu(&[0xe6, 0x10, 0xce, 0x00, 0x02]);
            cpu.write(0x10, 0x7f);
            cpu.write(0x0200, 0x00);

            assert_eq!(11, run_steps(&mut cpu, 2));

            assert_eq!(0x80, cpu.read(0x10));
            assert_eq!(0xff, cpu.read(0x0200));
            assert!(flags(&cpu, StatusRegister::NEGATIVE));
        }
    }

    mod shifts {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn asl_accumulator_moves_bit_7_into_carry() {
            for value in 0..=Byte::MAX {
                let mut cpu = test_cpu(&[0x0a]);
                cpu.accumulator = value;

                cpu.step();

                let result = value << 1;
                assert_eq!(result, cpu.accumulator);
                assert_eq!(value.nth_bit(7), flags(&cpu, StatusRegister::CARRY));
                assert_eq!(result == 0, flags(&cpu, StatusRegister::ZERO));
                assert_eq!(result.nth_bit(7), flags(&cpu, StatusRegister::NEGATIVE));
            }
        }

        #[test]
        fn lsr_memory_moves_bit_0_into_carry() {
            for value in 0..=Byte::MAX {
                let mut cpu = test_cpu(&[0x46, 0x20]);
                cpu.write(0x20, value);

                cpu.step();

                let result = value >> 1;
                assert_eq!(result, cpu.read(0x20));
                assert_eq!(value.nth_bit(0), flags(&cpu, StatusRegister::CARRY));
                assert_eq!(result == 0, flags(&cpu, StatusRegister::ZERO));
                assert!(!flags(&cpu, StatusRegister::NEGATIVE));
            }
        }

        #[test]
        fn rol_shifts_carry_in() {
            let mut cpu = test_cpu(&[0x2a]);
            cpu.accumulator = 0b1000_0001;
            cpu.status_register.set_carry_flag(true);

            cpu.step();

            assert_eq!(0b0000_0011, cpu.accumulator);
            assert!(flags(&cpu, StatusRegister::CARRY));
        }

        #[test]
        fn ror_shifts_carry_in() {
            let mut cpu = test_cpu(&[0x66, 0x40]);
            cpu.write(0x40, 0b0000_0010);
            cpu.status_register.set_carry_flag(true);

            assert_eq!(5, cpu.step());

            assert_eq!(0b1000_0001, cpu.read(0x40));
            assert!(!flags(&cpu, StatusRegister::CARRY));
            assert!(flags(&cpu, StatusRegister::NEGATIVE));
        }
        #[test]
        fn rol_every_value_with_both_carries() {
            for carry_in in [false, true] {
                for value in 0..=Byte::MAX {
                    let mut cpu = test_cpu(&[0x2a]);
                    cpu.accumulator = value;
                    cpu.status_register.set_carry_flag(carry_in);

                    cpu.step();

                    let result = (value << 1) | Byte::from(carry_in);
                    assert_eq!(result, cpu.accumulator);
                    assert_eq!(value.nth_bit(7), flags(&cpu, StatusRegister::CARRY));
                    assert_eq!(result == 0, flags(&cpu, StatusRegister::ZERO));
                    assert_eq!(result.nth_bit(7), flags(&cpu, StatusRegister::NEGATIVE));
                }
            }
        }

        #[test]
        fn ror_every_value_with_both_carries() {
            for carry_in in [false, true] {
                for value in 0..=Byte::MAX {
                    let mut cpu = test_cpu(&[0x66, 0x40]);
                    cpu.write(0x40, value);
                    cpu.status_register.set_carry_flag(carry_in);

                    cpu.step();

                    let result = (value >> 1) | (Byte::from(carry_in) << 7);
                    assert_eq!(result, cpu.read(0x40));
                    assert_eq!(value.nth_bit(0), flags(&cpu, StatusRegister::CARRY));
                    assert_eq!(result == 0, flags(&cpu, StatusRegister::ZERO));
                    assert_eq!(carry_in, flags(&cpu, StatusRegister::NEGATIVE));
                }
            }
        }
    }

    mod flag_instructions {
        use super::*;

        #[test]
        fn carry_flag_enabled() {
            let mut cpu = test_cpu(&[0x38]);
            cpu.step();

            assert!(flags(&cpu, StatusRegister::CARRY));
        }

        #[test]
        fn decimal_flag_enabled() {
            let mut cpu = test_cpu(&[0xf8]);
            cpu.step();

            assert!(flags(&cpu, StatusRegister::DECIMAL));
        }

        #[test]
        fn interrupt_flag_cleared() {
            let mut cpu = test_cpu(&[0x58]);
            cpu.step();

            assert!(!flags(&cpu, StatusRegister::INTERRUPT_DISABLE));
        }

        #[test]
        fn clv_clears_overflow() {
            let mut cpu = test_cpu(&[0xb8]);
            cpu.status_register.set_overflow_flag(true);
            cpu.step();

            assert!(!flags(&cpu, StatusRegister::OVERFLOW));
        }
    }

    mod stack {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn pha_pla_round_trip() {
            // PHA, LDA #0, PLA
            let mut cpu = test_cpu(&[0x48, 0xa9, 0x00, 0x68]);
            cpu.accumulator = 0x9c;

            assert_eq!(9, run_steps(&mut cpu, 3));

            assert_eq!(0x9c, cpu.accumulator);
            assert_eq!(0xfd, cpu.stack_pointer.value());
            assert_eq!(0x9c, cpu.read(0x01fd));
            assert!(flags(&cpu, StatusRegister::NEGATIVE));
        }

        #[test]
        fn pla_zero_and_negative_flags_for_every_value() {
            for value in 0..=Byte::MAX {
                let mut cpu = test_cpu(&[0x68]);
                cpu.write(0x01fe, value);

                assert_eq!(4, cpu.step());

                assert_eq!(value, cpu.accumulator);
                assert_eq!(0xfe, cpu.stack_pointer.value());
                assert_eq!(value == 0, flags(&cpu, StatusRegister::ZERO));
                assert_eq!(value.nth_bit(7), flags(&cpu, StatusRegister::NEGATIVE));
            }
        }

        #[test]
        fn push_writes_then_decrements() {
            let mut cpu = test_cpu(&[0x48]);
            cpu.accumulator = 0x11;

            cpu.step();

            assert_eq!(0x11, cpu.read(0x01fd));
            assert_eq!(0xfc, cpu.stack_pointer.value());
        }

        #[test]
        fn stack_pointer_wraps_within_page_one() {
            let mut cpu = test_cpu(&[0x48, 0x68]);
            cpu.stack_pointer.set(0x00);
            cpu.accumulator = 0x42;

            cpu.step();
            assert_eq!(0x42, cpu.read(0x0100));
            assert_eq!(0xff, cpu.stack_pointer.value());

            cpu.accumulator = 0;
            cpu.step();
            assert_eq!(0x42, cpu.accumulator);
            assert_eq!(0x00, cpu.stack_pointer.value());
        }

        #[test]
        fn php_plp_forces_unused_bit() {
            for status in [0x00, 0xc3, 0xdf, 0xff] {
                // PHP, PLP
                let mut cpu = test_cpu(&[0x08, 0x28]);
                cpu.status_register = StatusRegister::from_bits_retain(status);

                cpu.step();
                assert_eq!(status | 0x30, cpu.read(0x01fd));

                cpu.status_register = StatusRegister::empty();
                cpu.step();
                assert!(flags(&cpu, StatusRegister::UNUSED));
            }
        }

        #[test]
        fn plp_keeps_pulled_bits() {
            let mut cpu = test_cpu(&[0x28]);
            cpu.write(0x01fe, 0xc3);

            cpu.step();

            assert_eq!(0xe3, cpu.status_register.bits());
        }
    }

    mod jumps {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn jmp_absolute() {
            let mut cpu = test_cpu(&[0x4c, 0x34, 0x12]);

            assert_eq!(3, cpu.step());
            assert_eq!(0x1234, cpu.program_counter);
        }

        #[test]
        fn jmp_indirect_page_boundary_bug() {
            let mut cpu = test_cpu(&[0x6c, 0xff, 0x30]);
            cpu.write(0x30ff, 0x80);
            cpu.write(0x3000, 0x50);
            cpu.write(0x3100, 0x40);

            assert_eq!(5, cpu.step());
            assert_eq!(0x5080, cpu.program_counter);
        }

        #[test]
        fn jmp_indirect_inside_page() {
            let mut cpu = test_cpu(&[0x6c, 0x20, 0x01]);
            cpu.write_u16(0x0120, 0xbeef);

            cpu.step();

            assert_eq!(0xbeef, cpu.program_counter);
        }

        #[test]
        fn jsr_rts_round_trip() {
            // JSR $8010 ... at $8010: RTS
            let mut program = vec![0x20, 0x10, 0x80];
            program.resize(0x10, 0xea);
            program.push(0x60);
            let mut cpu = test_cpu(&program);

            assert_eq!(6, cpu.step());
            assert_eq!(0x8010, cpu.program_counter);
            // return address points at the last byte of JSR
            assert_eq!(0x80, cpu.read(0x01fd));
            assert_eq!(0x02, cpu.read(0x01fc));

            assert_eq!(6, cpu.step());
            assert_eq!(0x8003, cpu.program_counter);
            assert_eq!(0xfd, cpu.stack_pointer.value());
        }
    }

    mod branches {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn taken_branch_is_relative_to_next_instruction() {
            let mut cpu = test_cpu(&[0xd0, 0x05]);

            assert_eq!(2, cpu.step());
            assert_eq!(0x8007, cpu.program_counter);
        }

        #[test]
        fn backward_branch() {
            let mut cpu = test_cpu(&[0xea, 0xea, 0xf0, 0xfc]);
            cpu.status_register.set_zero_flag(true);

            run_steps(&mut cpu, 3);

            assert_eq!(0x8000, cpu.program_counter);
        }

        #[test]
        fn not_taken_branch_skips_offset() {
            let mut cpu = test_cpu(&[0xb0, 0x40]);

            assert_eq!(2, cpu.step());
            assert_eq!(0x8002, cpu.program_counter);
        }

        #[test]
        fn every_branch_checks_its_flag() {
            let cases = [
                (0x90, StatusRegister::CARRY, false),
                (0xb0, StatusRegister::CARRY, true),
                (0xf0, StatusRegister::ZERO, true),
                (0xd0, StatusRegister::ZERO, false),
                (0x30, StatusRegister::NEGATIVE, true),
                (0x10, StatusRegister::NEGATIVE, false),
                (0x70, StatusRegister::OVERFLOW, true),
                (0x50, StatusRegister::OVERFLOW, false),
            ];

            for (code, flag, taken_when) in cases {
                for flag_set in [false, true] {
                    let mut cpu = test_cpu(&[code, 0x10]);
                    cpu.status_register.set(flag, flag_set);

                    cpu.step();

                    let expected = if flag_set == taken_when { 0x8012 } else { 0x8002 };
                    assert_eq!(expected, cpu.program_counter, "opcode {code:#x}");
                }
            }
        }
    }

    mod interrupts {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn brk_pushes_pc_plus_two_and_status_with_break() {
            let mut cpu = test_cpu(&[0x00]);
            cpu.write_u16(0xfffe, 0x9000);
            cpu.status_register = StatusRegister::CARRY | StatusRegister::UNUSED;

            assert_eq!(7, cpu.step());

            assert_eq!(0x9000, cpu.program_counter);
            assert_eq!(0x80, cpu.read(0x01fd));
            assert_eq!(0x02, cpu.read(0x01fc));
            assert_eq!(0x31, cpu.read(0x01fb));
            assert!(flags(&cpu, StatusRegister::INTERRUPT_DISABLE));
        }

        #[test]
        fn nmi_pushes_status_without_break() {
            let mut cpu = test_cpu(&[0xea]);
            cpu.write_u16(0xfffa, 0x9100);
            cpu.status_register = StatusRegister::BREAK | StatusRegister::UNUSED;

            cpu.request_nmi();
            assert_eq!(7, cpu.step());

            assert!(!cpu.is_nmi_pending());
            assert_eq!(0x9100, cpu.program_counter);
            assert_eq!(0x80, cpu.read(0x01fd));
            assert_eq!(0x00, cpu.read(0x01fc));
            assert_eq!(0x20, cpu.read(0x01fb));
            assert!(flags(&cpu, StatusRegister::INTERRUPT_DISABLE));
        }

        #[test]
        fn nmi_ignores_interrupt_disable() {
            let mut cpu = test_cpu(&[0xea]);
            cpu.write_u16(0xfffa, 0x9100);
            assert!(flags(&cpu, StatusRegister::INTERRUPT_DISABLE));

            cpu.request_nmi();
            cpu.step();

            assert_eq!(0x9100, cpu.program_counter);
        }

        #[test]
        fn rti_restores_status_and_program_counter() {
            // NMI handler at $9100 is a single RTI
            let mut cpu = test_cpu(&[0xea]);
            cpu.write_u16(0xfffa, 0x9100);
            cpu.write(0x9100, 0x40);
            cpu.status_register = StatusRegister::CARRY | StatusRegister::UNUSED;

            cpu.request_nmi();
            cpu.step();
            assert_eq!(6, cpu.step());

            assert_eq!(0x8000, cpu.program_counter);
            assert_eq!(0xfd, cpu.stack_pointer.value());
            assert_eq!(
                StatusRegister::CARRY | StatusRegister::UNUSED,
                cpu.status_register
            );
        }
    }

    mod undefined {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn every_opcode_value_executes() {
            for code in 0..=Byte::MAX {
                let mut cpu = test_cpu(&[code, 0x00, 0x00]);
                let cycles = cpu.step();

                assert!((2..=7).contains(&cycles), "opcode {code:#x}");
            }
        }

        #[test]
        fn undefined_opcode_is_two_cycle_nop() {
            let mut cpu = test_cpu(&[0x02, 0xa9, 0x01]);

            assert_eq!(2, cpu.step());
            assert_eq!(0x8001, cpu.program_counter);
            assert_eq!(2, cpu.step());
            assert_eq!(0x01, cpu.accumulator);
        }
    }

    mod mixed {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn simple_5_ops_working_together() {
            let mut cpu = test_cpu(&[0xa9, 0xc0, 0xaa, 0xe8]);
            run_steps(&mut cpu, 3);

            assert_eq!(cpu.register_x, 0xc1);
        }

        #[test]
        fn countdown_loop() {
            // LDX #5; loop: DEX; BNE loop; STX $10
            let mut cpu = test_cpu(&[0xa2, 0x05, 0xca, 0xd0, 0xfd, 0x86, 0x10]);
            cpu.write(0x10, 0xff);

            let cycles = run_steps(&mut cpu, 12);

            assert_eq!(2 + 5 * 4 + 3, cycles);
            assert_eq!(0x00, cpu.read(0x10));
            assert!(flags(&cpu, StatusRegister::ZERO));
        }
    }
}
