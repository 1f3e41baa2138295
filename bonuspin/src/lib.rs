//! Drivers for small SPI peripheral ICs
//!
//! This library talks to a handful of hobbyist SPI chips through the
//! [`embedded-hal`](https://docs.rs/embedded-hal/0.2/embedded_hal/) traits, so
//! it runs on any microcontroller (or host adapter) that provides an
//! `embedded_hal::spi::FullDuplex<u8>` bus and
//! `embedded_hal::digital::v2::OutputPin` chip-select lines.
//!
//! Supported devices:
//!
//! - `mcp23s17::Mcp23s17`, the Microchip MCP23S17 16-bit IO expander. This
//!   covers both register maps (sequential and banked), hardware addressing,
//!   and 16-bit access to the paired A/B port registers.
//! - `sram::Sram23lc1024`, the Microchip 23LC1024 serial SRAM.
//!
//! Each driver takes ownership of the bus and of its device's chip-select
//! line:
//!
//! ```rust,ignore
//! let mut io = Mcp23s17::new(spi, cs, 0b000)?;
//! io.set_banked()?;
//! io.set_direction(0x00FF)?;
//! let pins = io.gpio()?;
//! ```
//!
//! Chip-select is held low for exactly one register or memory transaction
//! and is always released afterwards, even when the transaction fails part
//! way. If several devices share one bus, the caller must make sure their
//! transactions do not interleave.
//!
//! Transactions are logged through the [`log`](https://docs.rs/log) facade at
//! `trace` level.

#![cfg_attr(not(any(test, feature = "mock")), no_std)]

pub mod iocon;
mod low;
pub mod mcp23s17;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod registers;
pub mod sram;

pub use mcp23s17::Mcp23s17;
pub use registers::{Port, Register};
pub use sram::Sram23lc1024;

/// `Error` represents communication errors.
#[derive(Debug)]
pub enum Error<SpiErr, PinErr> {
    /// `Protocol` indicates that the device returned a value the library
    /// cannot interpret.
    Protocol,

    /// `Request` indicates that the caller provided invalid arguments that
    /// could not be checked at compile time.
    Request,

    /// `Spi` indicates that the underlying SPI bus returned an error.
    ///
    /// The data is the error returned by the underlying SPI implementation.
    Spi(SpiErr),

    /// `Pin` indicates that a chip-select or reset line returned an error.
    ///
    /// The data is the error returned by the underlying pin implementation.
    Pin(PinErr),
}

impl<SpiErr, PinErr> Error<SpiErr, PinErr> {
    fn spi(got: SpiErr) -> Self {
        Error::Spi(got)
    }

    fn pin(got: PinErr) -> Self {
        Error::Pin(got)
    }
}
