//! Intel 8080 CPU core.
//!
//! The core models the processor only: registers, flags, the 256-entry
//! opcode table and the interrupt/halt state. Memory and IO ports are reached
//! through the [`Bus8080`] trait supplied by the host, so the same core can sit
//! inside an arcade board, a CP/M machine or a unit test.

pub mod cpu;
pub mod opcodes;
pub mod processor;

pub use cpu::{alu, Bus8080, CallbackBus, Cpu, Flags, Psw, RegPair, Registers};
pub use opcodes::{decode, Category, Instruction};
pub use processor::I8080;

/// Opcode of `RST n`, the one-byte call conventionally supplied by
/// interrupting hardware.
///
/// `n` is taken modulo 8; the instruction calls address `8 * n`.
pub const fn rst(n: u8) -> u8 {
    0xC7 | ((n & 0x07) << 3)
}

/// Opcode of `HLT`.
pub const HLT: u8 = 0x76;
