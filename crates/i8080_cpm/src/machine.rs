use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use i8080_core::{I8080, HLT};

use crate::config::CpmConfig;
use crate::memory::{CpmMemory, MEMORY_SIZE};
use crate::{BDOS_CONSOLE_OUTPUT, BDOS_PRINT_STRING};

/// Opcode of RET, planted at the BDOS entry.
const RET: u8 = 0xC9;

/// Summary of a program that ran to completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestReport {
    pub instructions: u64,
    pub cycles: u64,
    /// Whether the program printed a string through BDOS function 9.
    pub success_signal: bool,
    /// Address of the instruction that jumped to 0000h.
    pub exit_from: u16,
}

/// An 8080 with 64 KiB of RAM and a minimal BDOS.
///
/// Console output produced through BDOS functions 2 and 9 is written to
/// `console`.
pub struct CpmMachine<W: Write> {
    cpu: I8080<CpmMemory>,
    console: W,
    config: CpmConfig,
    success_signal: bool,
}

impl<W: Write> CpmMachine<W> {
    /// Construct a machine over zeroed memory.
    pub fn new(config: CpmConfig, console: W) -> Self {
        Self::with_memory(config, CpmMemory::new(), console)
    }

    /// Construct a machine over a caller supplied memory buffer.
    pub fn with_memory(config: CpmConfig, memory: CpmMemory, console: W) -> Self {
        Self {
            cpu: I8080::new(memory),
            console,
            config,
            success_signal: false,
        }
    }

    /// Place a `.COM` image at the load address, plant the BDOS trap and
    /// reset the CPU to start at the image.
    pub fn load_program(&mut self, image: &[u8]) -> Result<()> {
        let load_address = self.config.load_address;
        let capacity = MEMORY_SIZE - load_address as usize;
        if image.len() > capacity {
            bail!(
                "program image of {} bytes does not fit above 0x{:04X} ({} bytes available)",
                image.len(),
                load_address,
                capacity
            );
        }

        let memory = self.cpu.bus_mut();
        memory.load(load_address, image);
        memory.write(self.config.bdos_entry, RET);

        self.cpu.reset();
        self.cpu.jump(load_address);
        self.success_signal = false;

        log::info!(
            "Loaded {} bytes at 0x{:04X}, BDOS trap at 0x{:04X}",
            image.len(),
            load_address,
            self.config.bdos_entry
        );
        Ok(())
    }

    /// Run until the program jumps to 0000h.
    ///
    /// Reaching a HLT opcode, exceeding the configured cycle limit, or
    /// finishing without the success signal when one is required are all
    /// reported as errors.
    pub fn run(&mut self) -> Result<TestReport> {
        let mut report = TestReport::default();

        loop {
            let pc = self.cpu.pc();
            if self.cpu.bus().read(pc) == HLT {
                self.console.flush().context("failed to flush console")?;
                bail!("HLT at {pc:04X}");
            }
            if pc == self.config.bdos_entry {
                self.bdos_call()?;
            }

            report.cycles += u64::from(self.cpu.step());
            report.instructions += 1;

            if let Some(limit) = self.config.cycle_limit {
                if report.cycles > limit {
                    bail!(
                        "cycle limit of {limit} exceeded at PC={:04X} after {} instructions",
                        self.cpu.pc(),
                        report.instructions
                    );
                }
            }

            if self.cpu.pc() == 0 {
                self.console.flush().context("failed to flush console")?;
                report.exit_from = pc;
                report.success_signal = self.success_signal;
                log::info!(
                    "Jump to 0000 from {pc:04X}: {} instructions, {} cycles",
                    report.instructions,
                    report.cycles
                );
                if self.config.require_success && !self.success_signal {
                    bail!("program finished at {pc:04X} without reporting success");
                }
                return Ok(report);
            }
        }
    }

    /// Service the BDOS call the CPU is about to enter.
    fn bdos_call(&mut self) -> Result<()> {
        let function = self.cpu.regs().c();
        log::debug!(
            "BDOS call {function} (DE=0x{de:04X})",
            de = self.cpu.regs().de.whole()
        );

        match function {
            BDOS_PRINT_STRING => {
                let text = self.dollar_string(self.cpu.regs().de.whole());
                self.console
                    .write_all(&text)
                    .context("failed to write to console")?;
                self.success_signal = true;
            }
            BDOS_CONSOLE_OUTPUT => {
                let ch = self.cpu.regs().e();
                self.console
                    .write_all(&[ch])
                    .context("failed to write to console")?;
            }
            other => log::debug!("BDOS function {other} ignored"),
        }
        Ok(())
    }

    /// Collect bytes from `addr` up to (not including) the next `$`.
    fn dollar_string(&self, addr: u16) -> Vec<u8> {
        let memory = self.cpu.bus();
        (0..MEMORY_SIZE)
            .map(|offset| memory.read(addr.wrapping_add(offset as u16)))
            .take_while(|&byte| byte != b'$')
            .collect()
    }

    pub fn cpu(&self) -> &I8080<CpmMemory> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut I8080<CpmMemory> {
        &mut self.cpu
    }

    pub fn memory(&self) -> &CpmMemory {
        self.cpu.bus()
    }

    pub fn config(&self) -> &CpmConfig {
        &self.config
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn into_console(self) -> W {
        self.console
    }
}

/// Read a `.COM` image from disk.
pub fn load_com_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let image =
        std::fs::read(path).with_context(|| format!("unable to open file {:?}", path))?;
    log::info!("File {:?} loaded, size {}", path, image.len());
    Ok(image)
}

/// Load and run a single `.COM` file on a fresh machine.
pub fn run_com_file<W: Write>(
    path: impl AsRef<Path>,
    config: CpmConfig,
    console: W,
) -> Result<TestReport> {
    let path = path.as_ref();
    let image = load_com_file(path)?;
    let mut machine = CpmMachine::new(config, console);
    machine.load_program(&image)?;
    machine
        .run()
        .with_context(|| format!("{:?} failed", path))
}
