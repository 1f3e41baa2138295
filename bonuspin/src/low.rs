use crate::Error;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi;

/// An SPI bus paired with the chip-select line of one device on it.
#[derive(Debug, Clone)]
pub(crate) struct Channel<SPI, CS> {
    pub spi: SPI,
    pub cs: CS,
}

impl<SPI, CS, SpiErr, PinErr> Channel<SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// Takes ownership of the bus and chip-select line, leaving the device
    /// deselected.
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, Error<SpiErr, PinErr>> {
        cs.set_high().map_err(Error::pin)?;
        Ok(Self { spi: spi, cs: cs })
    }

    /// Drives chip-select low for as long as the returned guard lives.
    pub fn select(&mut self) -> Result<Selected<'_, SPI, CS>, Error<SpiErr, PinErr>> {
        self.cs.set_low().map_err(Error::pin)?;
        Ok(Selected { ch: self })
    }
}

/// `Selected` is a chip-select scope. Chip-select goes back high when it is
/// dropped, whichever way the transaction ends.
pub(crate) struct Selected<'a, SPI, CS: OutputPin> {
    ch: &'a mut Channel<SPI, CS>,
}

impl<'a, SPI, CS, SpiErr, PinErr> Selected<'a, SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// Full-duplex exchange of a single byte.
    pub fn transfer(&mut self, c: u8) -> Result<u8, Error<SpiErr, PinErr>> {
        nb::block!(self.ch.spi.send(c)).map_err(Error::spi)?;
        nb::block!(self.ch.spi.read()).map_err(Error::spi)
    }

    pub fn write(&mut self, c: u8) -> Result<(), Error<SpiErr, PinErr>> {
        self.transfer(c).map(|_| ())
    }

    pub fn read(&mut self) -> Result<u8, Error<SpiErr, PinErr>> {
        self.transfer(0x00)
    }
}

impl<'a, SPI, CS: OutputPin> Drop for Selected<'a, SPI, CS> {
    fn drop(&mut self) {
        // Nowhere to report a failure from here.
        let _ = self.ch.cs.set_high();
    }
}
