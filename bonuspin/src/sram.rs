//! Module `sram` drives the Microchip 23LC1024, a 1Mbit SPI serial SRAM.
//!
//! Other parts of the 23xxxx family use the same instruction set but differ
//! in size and address width; only the 23LC1024 is handled here.

use crate::low;
use crate::Error;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi;
use log::trace;

/// Bytes of storage on a 23LC1024.
pub const CAPACITY: u32 = 0x2_0000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Instruction {
    Read = 0x03,
    Write = 0x02,
    /// Return to single SPI access.
    ResetIo = 0xFF,
    ReadMode = 0x05,
    WriteMode = 0x01,
}

/// Operating mode, held in the top two bits of the mode register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    /// Each access covers one byte.
    Byte = 0b00_000000,
    /// Accesses wrap within a 32-byte page.
    Page = 0b10_000000,
    /// Accesses run on through the whole array. The power-on default.
    Sequential = 0b01_000000,
}

impl Mode {
    fn from_register(value: u8) -> Option<Mode> {
        match value & 0b11_000000 {
            0b00_000000 => Some(Mode::Byte),
            0b10_000000 => Some(Mode::Page),
            0b01_000000 => Some(Mode::Sequential),
            _ => None,
        }
    }
}

/// `Sram23lc1024` represents one 23LC1024 on an SPI bus, in SPI (not SDI or
/// SQI) mode.
#[derive(Debug)]
pub struct Sram23lc1024<SPI, CS> {
    ch: low::Channel<SPI, CS>,
}

impl<SPI, CS, SpiErr, PinErr> Sram23lc1024<SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    pub fn new(spi: SPI, cs: CS) -> Result<Self, Error<SpiErr, PinErr>> {
        Ok(Self {
            ch: low::Channel::new(spi, cs)?,
        })
    }

    pub fn read_byte(&mut self, address: u32) -> Result<u8, Error<SpiErr, PinErr>> {
        if !in_range(address, 1) {
            return Err(Error::Request);
        }
        let value = {
            let mut sel = self.ch.select()?;
            sel.write(Instruction::Read as u8)?;
            send_address(&mut sel, address)?;
            sel.read()?
        };
        trace!("23lc1024 read {:#07x} -> {:#04x}", address, value);
        Ok(value)
    }

    pub fn write_byte(&mut self, address: u32, value: u8) -> Result<(), Error<SpiErr, PinErr>> {
        if !in_range(address, 1) {
            return Err(Error::Request);
        }
        {
            let mut sel = self.ch.select()?;
            sel.write(Instruction::Write as u8)?;
            send_address(&mut sel, address)?;
            sel.write(value)?;
        }
        trace!("23lc1024 write {:#07x} <- {:#04x}", address, value);
        Ok(())
    }

    /// Fills `buf` starting at `address`, in one transaction. The device
    /// must be in sequential mode (or page mode, within one page).
    pub fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), Error<SpiErr, PinErr>> {
        if !in_range(address, buf.len()) {
            return Err(Error::Request);
        }
        {
            let mut sel = self.ch.select()?;
            sel.write(Instruction::Read as u8)?;
            send_address(&mut sel, address)?;
            for b in buf.iter_mut() {
                *b = sel.read()?;
            }
        }
        trace!("23lc1024 read {} bytes at {:#07x}", buf.len(), address);
        Ok(())
    }

    /// Writes `data` starting at `address`, in one transaction. See
    /// [`read`](Self::read) for the mode requirement.
    pub fn write(&mut self, address: u32, data: &[u8]) -> Result<(), Error<SpiErr, PinErr>> {
        if !in_range(address, data.len()) {
            return Err(Error::Request);
        }
        {
            let mut sel = self.ch.select()?;
            sel.write(Instruction::Write as u8)?;
            send_address(&mut sel, address)?;
            for b in data.iter() {
                sel.write(*b)?;
            }
        }
        trace!("23lc1024 wrote {} bytes at {:#07x}", data.len(), address);
        Ok(())
    }

    /// Reads the mode register. A value with both mode bits set is reserved
    /// and reported as `Error::Protocol`.
    pub fn mode(&mut self) -> Result<Mode, Error<SpiErr, PinErr>> {
        let value = {
            let mut sel = self.ch.select()?;
            sel.write(Instruction::ReadMode as u8)?;
            sel.read()?
        };
        Mode::from_register(value).ok_or(Error::Protocol)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<SpiErr, PinErr>> {
        let mut sel = self.ch.select()?;
        sel.write(Instruction::WriteMode as u8)?;
        sel.write(mode as u8)
    }

    /// Sends RSTIO, which returns a device left in SDI or SQI mode (for
    /// example by another bus master) to plain SPI. Harmless in SPI mode.
    pub fn reset_io(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        let mut sel = self.ch.select()?;
        sel.write(Instruction::ResetIo as u8)
    }

    /// `release` returns the SPI bus and chip-select line.
    ///
    /// This consumes the `Sram23lc1024` object.
    pub fn release(self) -> (SPI, CS) {
        (self.ch.spi, self.ch.cs)
    }
}

fn in_range(address: u32, len: usize) -> bool {
    let end = address as u64 + len as u64;
    address < CAPACITY && end <= CAPACITY as u64
}

// 24-bit address, most significant byte first.
fn send_address<SPI, CS, SpiErr, PinErr>(
    sel: &mut low::Selected<'_, SPI, CS>,
    address: u32,
) -> Result<(), Error<SpiErr, PinErr>>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    sel.write((address >> 16) as u8)?;
    sel.write((address >> 8) as u8)?;
    sel.write(address as u8)
}
