use bonuspin::{Error, Mcp23s17, Port, Register};
use core::cell::RefCell;
use embedded_hal::digital::v2::{toggleable, InputPin, OutputPin, StatefulOutputPin};
use embedded_hal::spi;

/// One of the sixteen I/O lines of an MCP23S17. Lines 0-7 are GPA0-GPA7 and
/// lines 8-15 are GPB0-GPB7.
///
/// Several `ExpanderPin`s can borrow the same expander. Each trait call
/// borrows the `RefCell` mutably for the length of its bus transactions, so
/// pins must not be used from inside another borrow of the device.
pub struct ExpanderPin<'a, SPI, CS> {
    dev: &'a RefCell<Mcp23s17<SPI, CS>>,
    port: Port,
    mask: u8,
}

impl<'a, SPI, CS, SpiErr, PinErr> ExpanderPin<'a, SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// Returns `Error::Request` for a line above 15. The line's direction is
    /// left as it is; the expander powers up with every line an input.
    pub fn new(
        dev: &'a RefCell<Mcp23s17<SPI, CS>>,
        line: u8,
    ) -> Result<Self, Error<SpiErr, PinErr>> {
        let port = match line {
            0..=7 => Port::A,
            8..=15 => Port::B,
            _ => return Err(Error::Request),
        };
        Ok(Self {
            dev: dev,
            port: port,
            mask: 1 << (line % 8),
        })
    }

    pub fn line(&self) -> u8 {
        let base = match self.port {
            Port::A => 0,
            Port::B => 8,
        };
        base + self.mask.trailing_zeros() as u8
    }

    pub fn into_output(self) -> Result<Self, Error<SpiErr, PinErr>> {
        self.update(Register::Direction, false)?;
        Ok(self)
    }

    pub fn into_input(self) -> Result<Self, Error<SpiErr, PinErr>> {
        self.update(Register::Direction, true)?;
        Ok(self)
    }

    /// Enables or disables the line's internal 100k pull-up.
    pub fn set_pull_up(&mut self, enabled: bool) -> Result<(), Error<SpiErr, PinErr>> {
        self.update(Register::PullUp, enabled)
    }

    fn update(&self, register: Register, set: bool) -> Result<(), Error<SpiErr, PinErr>> {
        let mask = self.mask;
        self.dev
            .borrow_mut()
            .modify_register(register, self.port, |v| if set { v | mask } else { v & !mask })
            .map(|_| ())
    }

    fn test(&self, register: Register) -> Result<bool, Error<SpiErr, PinErr>> {
        let value = self.dev.borrow_mut().read_register(register, self.port)?;
        Ok(value & self.mask != 0)
    }
}

impl<'a, SPI, CS, SpiErr, PinErr> OutputPin for ExpanderPin<'a, SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    type Error = Error<SpiErr, PinErr>;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.update(Register::OutputLatch, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.update(Register::OutputLatch, true)
    }
}

impl<'a, SPI, CS, SpiErr, PinErr> StatefulOutputPin for ExpanderPin<'a, SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        self.test(Register::OutputLatch)
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        self.test(Register::OutputLatch).map(|hi| !hi)
    }
}

impl<'a, SPI, CS, SpiErr, PinErr> toggleable::Default for ExpanderPin<'a, SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
}

impl<'a, SPI, CS, SpiErr, PinErr> InputPin for ExpanderPin<'a, SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    type Error = Error<SpiErr, PinErr>;

    fn is_high(&self) -> Result<bool, Self::Error> {
        self.test(Register::Gpio)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.test(Register::Gpio).map(|hi| !hi)
    }
}
