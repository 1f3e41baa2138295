//! Module `mcp23s17` drives the Microchip MCP23S17, a 16-line IO expander
//! on SPI.
//!
//! ```rust,ignore
//! let mut io = Mcp23s17::new(spi, cs, 0b000)?;
//! io.set_direction(0xFF00)?; // port A outputs, port B inputs
//! io.set_output_latch(0x00AA)?;
//! let inputs = io.gpio()? >> 8;
//! ```
//!
//! Every register access is its own chip-select transaction. The driver
//! keeps a copy of the IOCON addressing bits (see [`State`]) so that it can
//! pick the right register map and opcode address without reading IOCON
//! first; always change IOCON through this driver so that copy stays true.

use crate::iocon::{self, opcode, Config, Operation, State};
use crate::low;
use crate::registers::{Port, Register};
use crate::Error;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi;
use log::{debug, trace};

/// Reset must be held low for at least 1µs.
const RESET_PULSE_US: u8 = 2;

/// `Mcp23s17` represents one MCP23S17 on an SPI bus.
#[derive(Debug)]
pub struct Mcp23s17<SPI, CS> {
    ch: low::Channel<SPI, CS>,
    address: u8,
    state: State,
}

impl<SPI, CS, SpiErr, PinErr> Mcp23s17<SPI, CS>
where
    SPI: spi::FullDuplex<u8, Error = SpiErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// `Mcp23s17::new` takes the SPI bus and the device's chip-select line,
    /// along with the device's strapped A2-A0 address.
    ///
    /// The address must fit in three bits, otherwise this returns
    /// `Error::Request` without touching the bus or the pin. The driver
    /// assumes the device is in its power-on configuration.
    pub fn new(spi: SPI, cs: CS, address: u8) -> Result<Self, Error<SpiErr, PinErr>> {
        if address & 0b111 != address {
            return Err(Error::Request);
        }
        Ok(Self {
            ch: low::Channel::new(spi, cs)?,
            address: address,
            state: State::default(),
        })
    }

    /// The strapped hardware address given at construction.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The address currently used in opcodes; zero unless hardware
    /// addressing is enabled.
    pub fn spi_address(&self) -> u8 {
        self.state.effective_address(self.address)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn read_register(
        &mut self,
        register: Register,
        port: Port,
    ) -> Result<u8, Error<SpiErr, PinErr>> {
        let addr = self.state.resolve(register, port);
        let op = opcode(self.spi_address(), Operation::Read);
        let value = {
            let mut sel = self.ch.select()?;
            sel.write(op)?;
            sel.write(addr)?;
            sel.read()?
        };
        trace!("mcp23s17 read {:#04x} -> {:#04x}", addr, value);
        Ok(value)
    }

    /// Writes one register. Writes to `Register::Configuration` go through
    /// [`write_configuration`](Self::write_configuration).
    pub fn write_register(
        &mut self,
        register: Register,
        port: Port,
        value: u8,
    ) -> Result<(), Error<SpiErr, PinErr>> {
        if register == Register::Configuration {
            return self.write_configuration(value);
        }
        let addr = self.state.resolve(register, port);
        self.write_address(addr, value)
    }

    /// Read-modify-write of one register. The write is skipped when `f`
    /// leaves the value unchanged. Returns the resulting value.
    pub fn modify_register<F>(
        &mut self,
        register: Register,
        port: Port,
        f: F,
    ) -> Result<u8, Error<SpiErr, PinErr>>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.read_register(register, port)?;
        let next = f(current);
        if next != current {
            self.write_register(register, port, next)?;
        }
        Ok(next)
    }

    /// Reads the A/B pair of `register` as one value, port A in the low byte.
    ///
    /// These are two separate transactions, A first.
    pub fn read16(&mut self, register: Register) -> Result<u16, Error<SpiErr, PinErr>> {
        let low = self.read_register(register, Port::A)?;
        let high = self.read_register(register, Port::B)?;
        Ok((u16::from(high) << 8) | u16::from(low))
    }

    /// Writes the A/B pair of `register`, low byte to port A first.
    pub fn write16(&mut self, register: Register, value: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write_register(register, Port::A, (value & 0x00FF) as u8)?;
        self.write_register(register, Port::B, ((value & 0xFF00) >> 8) as u8)
    }

    /// Reads IOCON from the device.
    pub fn configuration(&mut self) -> Result<u8, Error<SpiErr, PinErr>> {
        self.read_register(Register::Configuration, Port::A)
    }

    /// Writes IOCON and then takes the driver's addressing state from the
    /// byte just written.
    pub fn write_configuration(&mut self, value: u8) -> Result<(), Error<SpiErr, PinErr>> {
        let addr = self.state.resolve(Register::Configuration, Port::A);
        self.write_address(addr, value)?;
        let state = State::from_iocon(value);
        if state != self.state {
            debug!("mcp23s17 addressing {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        Ok(())
    }

    /// Writes a complete IOCON setting.
    pub fn configure(&mut self, config: &Config) -> Result<(), Error<SpiErr, PinErr>> {
        self.write_configuration(config.command_byte())
    }

    pub fn set_sequential(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        if self.state.registers_sequential() {
            return Ok(());
        }
        self.change_configuration(|c| c & !iocon::BANK)
    }

    pub fn set_banked(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        if self.state.registers_banked() {
            return Ok(());
        }
        self.change_configuration(|c| c | iocon::BANK)
    }

    pub fn set_interrupt_active_low(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        if self.state.interrupt_active_low() {
            return Ok(());
        }
        self.change_configuration(|c| c & !iocon::INTPOL)
    }

    pub fn set_interrupt_active_high(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        if self.state.interrupt_active_high() {
            return Ok(());
        }
        self.change_configuration(|c| c | iocon::INTPOL)
    }

    /// Makes the device match its A2-A0 pins against opcodes. Note that
    /// until this is done every MCP23S17 sharing the chip-select line
    /// answers to address zero, so they all receive this write.
    pub fn enable_hardware_address(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        if self.state.hardware_address_enabled() {
            return Ok(());
        }
        self.change_configuration(|c| c | iocon::HAEN)
    }

    pub fn disable_hardware_address(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        if !self.state.hardware_address_enabled() {
            return Ok(());
        }
        self.change_configuration(|c| c & !iocon::HAEN)
    }

    /// Connects INTA and INTB so either port's interrupt drives both lines.
    ///
    /// MIRROR is not tracked locally, so this always reads IOCON but only
    /// writes it when the bit has to change.
    pub fn mirror_interrupts(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        self.update_configuration(|c| c | iocon::MIRROR)
    }

    /// INTA follows port A and INTB follows port B. See
    /// [`mirror_interrupts`](Self::mirror_interrupts).
    pub fn separate_interrupts(&mut self) -> Result<(), Error<SpiErr, PinErr>> {
        self.update_configuration(|c| c & !iocon::MIRROR)
    }

    pub fn gpio(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::Gpio)
    }

    pub fn set_gpio(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::Gpio, pattern)
    }

    /// IODIR pair; a set bit is an input.
    pub fn direction(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::Direction)
    }

    pub fn set_direction(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::Direction, pattern)
    }

    pub fn polarity(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::Polarity)
    }

    pub fn set_polarity(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::Polarity, pattern)
    }

    pub fn interrupt_enable(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::InterruptEnable)
    }

    pub fn set_interrupt_enable(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::InterruptEnable, pattern)
    }

    pub fn default_compare(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::DefaultCompare)
    }

    pub fn set_default_compare(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::DefaultCompare, pattern)
    }

    pub fn interrupt_control(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::InterruptControl)
    }

    pub fn set_interrupt_control(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::InterruptControl, pattern)
    }

    pub fn pull_ups(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::PullUp)
    }

    pub fn set_pull_ups(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::PullUp, pattern)
    }

    pub fn interrupt_flags(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::InterruptFlag)
    }

    /// Port values captured at the last interrupt. Reading this clears the
    /// interrupt.
    pub fn interrupt_capture(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::InterruptCapture)
    }

    pub fn output_latch(&mut self) -> Result<u16, Error<SpiErr, PinErr>> {
        self.read16(Register::OutputLatch)
    }

    pub fn set_output_latch(&mut self, pattern: u16) -> Result<(), Error<SpiErr, PinErr>> {
        self.write16(Register::OutputLatch, pattern)
    }

    /// `reset` pulses the device's RESET line, which returns every register
    /// (IOCON included) to its power-on value, and resets the driver's
    /// addressing state to match.
    pub fn reset<RST, D>(
        &mut self,
        rst: &mut RST,
        delay: &mut D,
    ) -> Result<(), Error<SpiErr, RST::Error>>
    where
        RST: OutputPin,
        D: DelayUs<u8>,
    {
        rst.set_low().map_err(Error::pin)?;
        self.state = State::default();
        delay.delay_us(RESET_PULSE_US);
        rst.set_high().map_err(Error::pin)?;
        debug!("mcp23s17 reset");
        Ok(())
    }

    /// `release` returns the SPI bus and chip-select line.
    ///
    /// This consumes the `Mcp23s17` object.
    pub fn release(self) -> (SPI, CS) {
        (self.ch.spi, self.ch.cs)
    }

    fn write_address(&mut self, addr: u8, value: u8) -> Result<(), Error<SpiErr, PinErr>> {
        let op = opcode(self.spi_address(), Operation::Write);
        {
            let mut sel = self.ch.select()?;
            sel.write(op)?;
            sel.write(addr)?;
            sel.write(value)?;
        }
        trace!("mcp23s17 write {:#04x} <- {:#04x}", addr, value);
        Ok(())
    }

    // The tracked bits differ from what was asked for, so a write is due.
    fn change_configuration<F>(&mut self, f: F) -> Result<(), Error<SpiErr, PinErr>>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.configuration()?;
        self.write_configuration(f(current) & !iocon::UNIMPLEMENTED)
    }

    fn update_configuration<F>(&mut self, f: F) -> Result<(), Error<SpiErr, PinErr>>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.configuration()?;
        let next = f(current) & !iocon::UNIMPLEMENTED;
        if next == current {
            return Ok(());
        }
        self.write_configuration(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iocon::{BANK, HAEN, INTPOL, MIRROR};
    use crate::mock::{Event, Fault, Spi, Wire};
    use proptest::prelude::*;

    type Device = Mcp23s17<Spi, crate::mock::Pin>;

    fn device(wire: &Wire, address: u8) -> Device {
        let dev = Mcp23s17::new(wire.spi(), wire.pin("cs"), address).unwrap();
        wire.clear();
        dev
    }

    fn is_write_to(frame: &[u8], addr: u8) -> bool {
        frame.len() == 3 && frame[0] & 1 == 0 && frame[1] == addr
    }

    #[test]
    fn new_rejects_wide_address() {
        let wire = Wire::new();
        let got = Mcp23s17::new(wire.spi(), wire.pin("cs"), 0b1000);
        assert!(matches!(got, Err(Error::Request)));
        assert!(wire.events().is_empty());
    }

    #[test]
    fn new_deselects_and_defaults() {
        let wire = Wire::new();
        let dev = Mcp23s17::new(wire.spi(), wire.pin("cs"), 0b011).unwrap();
        assert_eq!(wire.events(), vec![Event::High("cs")]);
        assert_eq!(dev.address(), 0b011);
        assert_eq!(dev.spi_address(), 0);
        assert_eq!(dev.state(), State::default());
    }

    #[test]
    fn read_gpio_a_with_hardware_address_disabled() {
        let wire = Wire::new();
        let mut dev = device(&wire, 0b011);
        wire.respond(&[0x00, 0x00, 0x5A]);

        assert_eq!(dev.read_register(Register::Gpio, Port::A).unwrap(), 0x5A);
        assert_eq!(wire.bytes(), vec![0x41, 0x12, 0x00]);
        assert_eq!(
            wire.events(),
            vec![
                Event::Low("cs"),
                Event::Byte(0x41),
                Event::Byte(0x12),
                Event::Byte(0x00),
                Event::High("cs"),
            ]
        );
    }

    #[test]
    fn spi_error_releases_chip_select() {
        let wire = Wire::new();
        let mut dev = device(&wire, 0);
        wire.fail_after(1);

        let got = dev.read_register(Register::Gpio, Port::A);
        assert!(matches!(got, Err(Error::Spi(Fault))));
        assert_eq!(
            wire.events(),
            vec![Event::Low("cs"), Event::Byte(0x41), Event::High("cs")]
        );
        assert!(!wire.selected());
    }

    #[test]
    fn spi_error_on_first_byte_releases_chip_select() {
        let wire = Wire::new();
        let mut dev = device(&wire, 0);
        wire.fail_after(0);

        let got = dev.write_register(Register::OutputLatch, Port::A, 0xFF);
        assert!(matches!(got, Err(Error::Spi(Fault))));
        assert_eq!(wire.events(), vec![Event::Low("cs"), Event::High("cs")]);
    }

    #[test]
    fn failed_configuration_write_keeps_state() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);
        wire.fail_after(2);

        let got = dev.write_configuration(BANK);
        assert!(matches!(got, Err(Error::Spi(Fault))));
        assert_eq!(dev.state(), State::default());
        assert!(!wire.selected());
    }

    #[test]
    fn chip_select_error_sends_nothing() {
        let wire = Wire::new();
        let mut dev = device(&wire, 0);
        wire.fail_pin("cs");

        let got = dev.read_register(Register::Gpio, Port::A);
        assert!(matches!(got, Err(Error::Pin(Fault))));
        assert!(wire.bytes().is_empty());
    }

    #[test]
    fn write_register_frame() {
        let wire = Wire::new();
        let mut dev = device(&wire, 0);
        dev.write_register(Register::OutputLatch, Port::B, 0x3C).unwrap();
        assert_eq!(wire.frames(), vec![vec![0x40, 0x15, 0x3C]]);
        assert!(!wire.selected());
    }

    #[test]
    fn banked_configuration_changes_register_map() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.write_configuration(0b1000_0000).unwrap();
        assert!(!dev.state().registers_sequential());
        assert_eq!(dev.state().resolve(Register::Direction, Port::B), 0x10);
        assert_eq!(wire.frames(), vec![vec![0x40, 0x0A, 0x80]]);

        wire.clear();
        dev.write_register(Register::Direction, Port::B, 0x0F).unwrap();
        assert_eq!(wire.frames(), vec![vec![0x40, 0x10, 0x0F]]);
        assert_eq!(wire.register(0x01), 0x0F);
    }

    #[test]
    fn configuration_writes_through_port_b_update_state() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.write_register(Register::Configuration, Port::B, BANK).unwrap();
        assert!(dev.state().registers_banked());
        assert_eq!(wire.register(0x0A), BANK);
    }

    #[test]
    fn write16_then_read16() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.write16(Register::OutputLatch, 0xABCD).unwrap();
        assert_eq!(
            wire.frames(),
            vec![vec![0x40, 0x14, 0xCD], vec![0x40, 0x15, 0xAB]]
        );

        wire.clear();
        assert_eq!(dev.read16(Register::OutputLatch).unwrap(), 0xABCD);
        assert_eq!(
            wire.frames(),
            vec![vec![0x41, 0x14, 0x00], vec![0x41, 0x15, 0x00]]
        );
    }

    #[test]
    fn write16_then_read16_banked() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);
        dev.set_banked().unwrap();
        wire.clear();

        dev.set_pull_ups(0x1234).unwrap();
        assert_eq!(
            wire.frames(),
            vec![vec![0x40, 0x06, 0x34], vec![0x40, 0x16, 0x12]]
        );
        assert_eq!(dev.pull_ups().unwrap(), 0x1234);
        assert_eq!(wire.register(0x0C), 0x34);
        assert_eq!(wire.register(0x0D), 0x12);
    }

    #[test]
    fn enable_hardware_address_writes_once() {
        let wire = Wire::with_mcp23s17(0b011);
        let mut dev = device(&wire, 0b011);

        dev.enable_hardware_address().unwrap();
        dev.enable_hardware_address().unwrap();

        let writes = wire
            .frames()
            .iter()
            .filter(|f| is_write_to(f, 0x0A))
            .count();
        assert_eq!(writes, 1);
        assert_eq!(wire.register(0x0A), HAEN);
        assert!(dev.state().hardware_address_enabled());
        assert_eq!(dev.spi_address(), 0b011);

        wire.set_register(0x12, 0x99);
        wire.clear();
        assert_eq!(dev.read_register(Register::Gpio, Port::A).unwrap(), 0x99);
        assert_eq!(wire.frames(), vec![vec![0x47, 0x12, 0x00]]);
    }

    #[test]
    fn tracked_mutators_skip_bus_when_already_set() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.set_sequential().unwrap();
        dev.set_interrupt_active_low().unwrap();
        dev.disable_hardware_address().unwrap();
        assert!(wire.events().is_empty());
    }

    #[test]
    fn set_sequential_from_banked_uses_banked_iocon_address() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);
        dev.write_configuration(BANK | INTPOL).unwrap();
        wire.clear();

        dev.set_sequential().unwrap();
        assert_eq!(
            wire.frames(),
            vec![vec![0x41, 0x05, 0x00], vec![0x40, 0x05, INTPOL]]
        );
        assert!(dev.state().registers_sequential());
        assert!(dev.state().interrupt_active_high());
    }

    #[test]
    fn interrupt_polarity_leaves_banking_alone() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.set_banked().unwrap();
        dev.set_interrupt_active_high().unwrap();
        assert_eq!(wire.register(0x0A), BANK | INTPOL);

        dev.set_interrupt_active_low().unwrap();
        assert_eq!(wire.register(0x0A), BANK);
        assert!(dev.state().registers_banked());
        assert!(dev.state().interrupt_active_low());
    }

    #[test]
    fn mirror_interrupts_writes_only_on_change() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.mirror_interrupts().unwrap();
        dev.mirror_interrupts().unwrap();
        assert_eq!(wire.register(0x0A), MIRROR);
        let writes = wire
            .frames()
            .iter()
            .filter(|f| is_write_to(f, 0x0A))
            .count();
        assert_eq!(writes, 1);

        dev.separate_interrupts().unwrap();
        assert_eq!(wire.register(0x0A), 0x00);
    }

    #[test]
    fn modify_register_skips_unchanged_write() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        // IODIRA powers up as 0xFF.
        assert_eq!(
            dev.modify_register(Register::Direction, Port::A, |v| v | 0x01).unwrap(),
            0xFF
        );
        assert_eq!(wire.frames().len(), 1);

        assert_eq!(
            dev.modify_register(Register::Direction, Port::A, |v| v & !0x01).unwrap(),
            0xFE
        );
        assert_eq!(wire.register(0x00), 0xFE);
    }

    #[test]
    fn named_accessors_use_their_registers() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);

        dev.set_direction(0xFF00).unwrap();
        dev.set_polarity(0x0001).unwrap();
        dev.set_interrupt_enable(0x0300).unwrap();
        dev.set_default_compare(0x00F0).unwrap();
        dev.set_interrupt_control(0x8000).unwrap();
        dev.set_gpio(0x0042).unwrap();
        wire.set_register(0x0E, 0x04);
        wire.set_register(0x11, 0x80);

        assert_eq!(dev.direction().unwrap(), 0xFF00);
        assert_eq!(dev.polarity().unwrap(), 0x0001);
        assert_eq!(dev.interrupt_enable().unwrap(), 0x0300);
        assert_eq!(dev.default_compare().unwrap(), 0x00F0);
        assert_eq!(dev.interrupt_control().unwrap(), 0x8000);
        assert_eq!(dev.gpio().unwrap(), 0x0042);
        assert_eq!(dev.interrupt_flags().unwrap(), 0x0004);
        assert_eq!(dev.interrupt_capture().unwrap(), 0x8000);
    }

    #[test]
    fn configure_writes_command_byte() {
        let wire = Wire::with_mcp23s17(0);
        let mut dev = device(&wire, 0);
        let config = Config {
            banking: iocon::Banking::Banked,
            interrupt_lines: iocon::InterruptLines::Mirrored,
            ..iocon::DEFAULT_CONFIG
        };

        dev.configure(&config).unwrap();
        assert_eq!(wire.register(0x0A), BANK | MIRROR);
        assert!(dev.state().registers_banked());
    }

    #[test]
    fn reset_restores_power_on_state() {
        let wire = Wire::with_mcp23s17(0b001);
        let mut dev = device(&wire, 0b001);
        dev.write_configuration(BANK | HAEN).unwrap();
        wire.set_register(0x12, 0x55);

        let mut rst = wire.pin("reset");
        let mut delay = wire.delay();
        wire.clear();
        dev.reset(&mut rst, &mut delay).unwrap();

        assert_eq!(
            wire.events(),
            vec![Event::Low("reset"), Event::DelayUs(2), Event::High("reset")]
        );
        assert_eq!(dev.state(), State::default());
        assert_eq!(dev.spi_address(), 0);
        assert_eq!(dev.configuration().unwrap(), 0x00);
        assert_eq!(dev.direction().unwrap(), 0xFFFF);
    }

    #[test]
    fn release_returns_parts() {
        let wire = Wire::new();
        let dev = device(&wire, 0);
        let (_spi, mut cs) = dev.release();
        cs.set_low().unwrap();
        assert_eq!(wire.events(), vec![Event::Low("cs")]);
    }

    proptest! {
        #[test]
        fn state_follows_last_written_configuration(first in any::<u8>(), second in any::<u8>()) {
            let wire = Wire::with_mcp23s17(0);
            let mut dev = device(&wire, 0);

            dev.write_configuration(first).unwrap();
            prop_assert_eq!(dev.state(), State::from_iocon(first));
            dev.write_configuration(second).unwrap();
            prop_assert_eq!(dev.state(), State::from_iocon(second));
            prop_assert_eq!(dev.configuration().unwrap(), second);
            prop_assert!(!wire.selected());
        }
    }
}
