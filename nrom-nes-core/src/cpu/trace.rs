//! nestest-style one-line disassembly of the instruction at the program counter.
//! Only `peek` is used, so tracing never disturbs PPU or controller state.

use crate::cpu::opcodes::{Mnemonic, Opcode, OPCODE_TABLE};
use crate::cpu::{AddressingMode, Cpu, Memory};
use crate::{Address, Byte};

pub fn trace<M: Memory>(cpu: &Cpu<M>) -> String {
    let pc = cpu.program_counter;
    let opcode = OPCODE_TABLE[cpu.peek(pc) as usize];
    let hex = hex_representation(&opcode, cpu);
    let asm = asm_representation(&opcode, cpu);
    let registers = format!(
        "A:{:02X} X:{:02X} Y:{:02X} P:{} SP:{}",
        cpu.accumulator, cpu.register_x, cpu.register_y, cpu.status_register, cpu.stack_pointer,
    );

    // unofficial opcodes are marked with a leading '*' that eats one column
    match opcode.mnemonic {
        Mnemonic::Undefined => format!("{pc:04X}  {hex:<9}{asm:<33}{registers}"),
        _ => format!("{pc:04X}  {hex:<10}{asm:<32}{registers}"),
    }
}

fn hex_representation<M: Memory>(opcode: &Opcode, cpu: &Cpu<M>) -> String {
    let pc = cpu.program_counter;

    (0..opcode.length())
        .map(|offset| format!("{:02X}", cpu.peek(pc.wrapping_add(offset))))
        .collect::<Vec<_>>()
        .join(" ")
}

fn asm_representation<M: Memory>(opcode: &Opcode, cpu: &Cpu<M>) -> String {
    let operand_addr = cpu.program_counter.wrapping_add(1);
    let value = cpu.peek(operand_addr);
    let address = cpu.peek_u16(operand_addr);

    let args = match opcode.mode {
        AddressingMode::Implied => return opcode.mnemonic.to_string(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${value:02X}"),
        AddressingMode::ZeroPage => {
            format!("${:02X} = {:02X}", value, cpu.peek(value.into()))
        }
        AddressingMode::ZeroPageX | AddressingMode::ZeroPageY => {
            let (register, name) = match opcode.mode {
                AddressingMode::ZeroPageX => (cpu.register_x, 'X'),
                _ => (cpu.register_y, 'Y'),
            };
            let target = value.wrapping_add(register);

            format!(
                "${:02X},{} @ {:02X} = {:02X}",
                value,
                name,
                target,
                cpu.peek(target.into())
            )
        }
        AddressingMode::Absolute => match opcode.mnemonic {
            Mnemonic::Jmp | Mnemonic::Jsr => format!("${address:04X}"),
            _ => format!("${:04X} = {:02X}", address, cpu.peek(address)),
        },
        AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => {
            let (register, name) = match opcode.mode {
                AddressingMode::AbsoluteX => (cpu.register_x, 'X'),
                _ => (cpu.register_y, 'Y'),
            };
            let target = address.wrapping_add(register.into());

            format!(
                "${:04X},{} @ {:04X} = {:02X}",
                address,
                name,
                target,
                cpu.peek(target)
            )
        }
        AddressingMode::IndirectX => {
            let ptr = value.wrapping_add(cpu.register_x);
            let target = peek_zero_page_u16(cpu, ptr);

            format!(
                "(${:02X},X) @ {:02X} = {:04X} = {:02X}",
                value,
                ptr,
                target,
                cpu.peek(target)
            )
        }
        AddressingMode::IndirectY => {
            let base = peek_zero_page_u16(cpu, value);
            let target = base.wrapping_add(cpu.register_y.into());

            format!(
                "(${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                value,
                base,
                target,
                cpu.peek(target)
            )
        }
        AddressingMode::Indirect => {
            let lo = cpu.peek(address);
            let hi = cpu.peek((address & 0xff00) | (address.wrapping_add(1) & 0x00ff));

            format!("(${:04X}) = {:04X}", address, u16::from_le_bytes([lo, hi]))
        }
        AddressingMode::Relative => {
            let target = operand_addr
                .wrapping_add(1)
                .wrapping_add(value as i8 as Address);

            format!("${target:04X}")
        }
    };

    format!("{} {}", opcode.mnemonic, args)
}

fn peek_zero_page_u16<M: Memory>(cpu: &Cpu<M>, ptr: Byte) -> Address {
    u16::from_le_bytes([cpu.peek(ptr.into()), cpu.peek(ptr.wrapping_add(1).into())])
}
