/// Bus interface for an Intel 8080-compatible CPU core.
///
/// The CPU uses this trait to access memory and IO ports without knowing
/// anything about the concrete machine. Addresses cover the full 16-bit space
/// and implementations are expected to answer every one of them.
pub trait Bus8080 {
    fn mem_read(&mut self, addr: u16) -> u8;
    fn mem_write(&mut self, addr: u16, value: u8);

    fn io_read(&mut self, port: u8) -> u8;
    fn io_write(&mut self, port: u8, value: u8);
}

impl<B: Bus8080 + ?Sized> Bus8080 for &mut B {
    fn mem_read(&mut self, addr: u16) -> u8 {
        (**self).mem_read(addr)
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        (**self).mem_write(addr, value);
    }

    fn io_read(&mut self, port: u8) -> u8 {
        (**self).io_read(port)
    }

    fn io_write(&mut self, port: u8, value: u8) {
        (**self).io_write(port, value);
    }
}

type ReadFn<C> = Box<dyn FnMut(&mut C, u16) -> u8 + Send>;
type WriteFn<C> = Box<dyn FnMut(&mut C, u16, u8) + Send>;
type InFn<C> = Box<dyn FnMut(&mut C, u8) -> u8 + Send>;
type OutFn<C> = Box<dyn FnMut(&mut C, u8, u8) + Send>;

/// A [`Bus8080`] assembled from four handler closures and a host context.
///
/// Every handler receives `&mut C`, so hosts that prefer callbacks over
/// implementing the trait can keep their machine state in the context.
/// Handlers must be `Send`, so a processor built on them can be moved to a
/// worker thread together with its context.
pub struct CallbackBus<C> {
    context: C,
    read: ReadFn<C>,
    write: WriteFn<C>,
    input: InFn<C>,
    output: OutFn<C>,
}

impl<C> CallbackBus<C> {
    pub fn new<R, W, I, O>(context: C, read: R, write: W, input: I, output: O) -> Self
    where
        R: FnMut(&mut C, u16) -> u8 + Send + 'static,
        W: FnMut(&mut C, u16, u8) + Send + 'static,
        I: FnMut(&mut C, u8) -> u8 + Send + 'static,
        O: FnMut(&mut C, u8, u8) + Send + 'static,
    {
        Self {
            context,
            read: Box::new(read),
            write: Box::new(write),
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C> Bus8080 for CallbackBus<C> {
    fn mem_read(&mut self, addr: u16) -> u8 {
        (self.read)(&mut self.context, addr)
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        (self.write)(&mut self.context, addr, value);
    }

    fn io_read(&mut self, port: u8) -> u8 {
        (self.input)(&mut self.context, port)
    }

    fn io_write(&mut self, port: u8, value: u8) {
        (self.output)(&mut self.context, port, value);
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for CallbackBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackBus")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
