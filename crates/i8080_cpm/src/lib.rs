//! CP/M style harness for running 8080 diagnostic programs.
//!
//! The classic CPU exercisers (`TST8080.COM`, `CPUTEST.COM`, `8080PRE.COM`,
//! `8080EXM.COM`) are CP/M `.COM` files: they are loaded at 0100h, print
//! through BDOS call 5 and finish by jumping to 0000h. [`CpmMachine`] provides
//! just enough of that environment to run them on [`i8080_core`].

pub mod config;
pub mod machine;
pub mod memory;

pub use config::CpmConfig;
pub use machine::{load_com_file, run_com_file, CpmMachine, TestReport};
pub use memory::CpmMemory;

/// Default load address of CP/M transient programs.
pub const TPA_START: u16 = 0x0100;
/// BDOS entry point called by `CALL 5`.
pub const BDOS_ENTRY: u16 = 0x0005;

/// BDOS function 2: console output of the character in E.
pub const BDOS_CONSOLE_OUTPUT: u8 = 2;
/// BDOS function 9: print the `$`-terminated string at DE.
pub const BDOS_PRINT_STRING: u8 = 9;
