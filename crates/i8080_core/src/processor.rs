use crate::cpu::{Bus8080, CallbackBus, Cpu, Registers};

/// An 8080 bundled with the bus it was built with.
///
/// This is the host-facing handle: construct it once with the memory/IO
/// implementation, then drive it with [`I8080::step`] and
/// [`I8080::interrupt`]. The bus is owned, so dropping the processor drops
/// the host state with it and no handler can run afterwards.
#[derive(Debug)]
pub struct I8080<B: Bus8080> {
    cpu: Cpu,
    bus: B,
}

impl<B: Bus8080> I8080<B> {
    /// Create a processor in reset state on top of `bus`.
    pub fn new(bus: B) -> Self {
        Self {
            cpu: Cpu::new(),
            bus,
        }
    }

    /// Power-on reset. The bus is left untouched.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute one instruction and return the elapsed T-states.
    pub fn step(&mut self) -> u32 {
        self.cpu.step(&mut self.bus)
    }

    /// Deliver a maskable interrupt carrying `opcode`; see [`Cpu::interrupt`].
    pub fn interrupt(&mut self, opcode: u8) -> u32 {
        self.cpu.interrupt(&mut self.bus, opcode)
    }

    /// Continue execution at `addr`.
    pub fn jump(&mut self, addr: u16) {
        self.cpu.jump(addr);
    }

    pub fn pc(&self) -> u16 {
        self.cpu.regs.pc
    }

    pub fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.cpu.interrupt_enable
    }

    pub fn regs(&self) -> &Registers {
        &self.cpu.regs
    }

    pub fn regs_mut(&mut self) -> &mut Registers {
        &mut self.cpu.regs
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl<C> I8080<CallbackBus<C>> {
    /// Build a processor from four handlers sharing a host context.
    ///
    /// Each handler receives the context mutably, followed by the address (or
    /// port) and, for writes, the value.
    pub fn with_callbacks<R, W, I, O>(context: C, read: R, write: W, input: I, output: O) -> Self
    where
        R: FnMut(&mut C, u16) -> u8 + Send + 'static,
        W: FnMut(&mut C, u16, u8) + Send + 'static,
        I: FnMut(&mut C, u8) -> u8 + Send + 'static,
        O: FnMut(&mut C, u8, u8) + Send + 'static,
    {
        Self::new(CallbackBus::new(context, read, write, input, output))
    }

    /// The host context handed to every callback.
    pub fn context(&self) -> &C {
        self.bus.context()
    }

    pub fn context_mut(&mut self) -> &mut C {
        self.bus.context_mut()
    }
}
