use i8080_core::Bus8080;

/// Size of the 8080 address space.
pub const MEMORY_SIZE: usize = 0x10000;

/// Flat 64 KiB RAM with inert IO ports.
///
/// Port reads return 00h and port writes are dropped; the diagnostic programs
/// talk to the outside world through BDOS calls only.
#[derive(Clone)]
pub struct CpmMemory {
    bytes: Box<[u8]>,
}

impl CpmMemory {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Take ownership of an existing buffer. It is truncated or zero-padded
    /// to exactly 64 KiB.
    pub fn from_vec(mut bytes: Vec<u8>) -> Self {
        bytes.resize(MEMORY_SIZE, 0);
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// Copy `data` to memory starting at `addr`, wrapping past FFFFh.
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), byte);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

impl Default for CpmMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CpmMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpmMemory")
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl Bus8080 for CpmMemory {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }

    fn io_read(&mut self, _port: u8) -> u8 {
        0x00
    }

    fn io_write(&mut self, _port: u8, _value: u8) {}
}
