//! `embedded-hal` implementations via an MCP23S17 IO expander
//!
//! [`embedded-hal`](https://crates.io/crates/embedded-hal) is a hardware
//! abstraction layer for embedded systems. Device drivers written against it
//! only need some object implementing its digital pin traits.
//!
//! This library implements those traits for the individual I/O lines of an
//! MCP23S17, so that a driver which expects a microcontroller pin can instead
//! drive, or read, a line on the expander. Each access becomes one or two SPI
//! register transactions, so expect it to be far slower than a native pin.
//!
//! All of the trait implementations in this library require an
//! already-constructed `Mcp23s17` from the `bonuspin` crate, shared between
//! the pins through a `RefCell`:
//!
//! ```rust,ignore
//! let io = RefCell::new(Mcp23s17::new(spi, cs, 0b000)?);
//! let mut led = ExpanderPin::new(&io, 0)?.into_output()?;
//! let button = ExpanderPin::new(&io, 8)?;
//! if button.is_low()? {
//!     led.set_high()?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate embedded_hal;

pub mod pin;

pub use pin::ExpanderPin;
