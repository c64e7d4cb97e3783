use crate::cpu::{Bus8080, Cpu};

impl Cpu {
    pub(super) fn exec_hlt(&mut self) -> u32 {
        log::debug!(
            "8080 HLT at PC=0x{pc:04X} (INTE={inte})",
            pc = self.regs.pc.wrapping_sub(1),
            inte = self.interrupt_enable,
        );
        self.halted = true;
        7
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        self.interrupt_enable = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.interrupt_enable = false;
        4
    }

    pub(super) fn exec_in<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let port = self.fetch8(bus);
        self.regs.a = bus.io_read(port);
        10
    }

    pub(super) fn exec_out<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let port = self.fetch8(bus);
        bus.io_write(port, self.regs.a);
        10
    }
}
