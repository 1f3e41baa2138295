//! The MCP23S17 IOCON register and the addressing state derived from it.
//!
//! IOCON layout, MSB first:
//! `BANK MIRROR SEQOP DISSLW HAEN ODR INTPOL -`

use crate::registers::{Port, Register};

pub const BANK: u8 = 0b1000_0000;
pub const MIRROR: u8 = 0b0100_0000;
pub const SEQOP: u8 = 0b0010_0000;
pub const DISSLW: u8 = 0b0001_0000;
pub const HAEN: u8 = 0b0000_1000;
pub const ODR: u8 = 0b0000_0100;
pub const INTPOL: u8 = 0b0000_0010;

/// Bit 0 is unimplemented and reads as zero.
pub(crate) const UNIMPLEMENTED: u8 = 0b0000_0001;

/// Device family code in the upper nibble of every opcode.
const OPCODE_HEADER: u8 = 0b0100_0000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Banking {
    Sequential,
    Banked,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptLines {
    Independent,
    Mirrored,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressPointer {
    Incrementing,
    Fixed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SlewRate {
    Enabled,
    Disabled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HardwareAddress {
    Disabled,
    Enabled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptDrive {
    ActiveDriver,
    OpenDrain,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptPolarity {
    ActiveLow,
    ActiveHigh,
}

/// A complete IOCON setting, for writing in one go with
/// [`Mcp23s17::configure`](crate::mcp23s17::Mcp23s17::configure).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub banking: Banking,
    pub interrupt_lines: InterruptLines,
    pub address_pointer: AddressPointer,
    pub slew_rate: SlewRate,
    pub hardware_address: HardwareAddress,
    pub interrupt_drive: InterruptDrive,
    pub interrupt_polarity: InterruptPolarity,
}

/// The power-on IOCON value, 0x00.
pub const DEFAULT_CONFIG: Config = Config {
    banking: Banking::Sequential,
    interrupt_lines: InterruptLines::Independent,
    address_pointer: AddressPointer::Incrementing,
    slew_rate: SlewRate::Enabled,
    hardware_address: HardwareAddress::Disabled,
    interrupt_drive: InterruptDrive::ActiveDriver,
    interrupt_polarity: InterruptPolarity::ActiveLow,
};

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl Config {
    pub fn command_byte(&self) -> u8 {
        let mut cmd = 0b00000000 as u8;
        cmd = cmd
            | (match self.banking {
                Banking::Sequential => 0,
                Banking::Banked => 1,
            } << 7);
        cmd = cmd
            | (match self.interrupt_lines {
                InterruptLines::Independent => 0,
                InterruptLines::Mirrored => 1,
            } << 6);
        cmd = cmd
            | (match self.address_pointer {
                AddressPointer::Incrementing => 0,
                AddressPointer::Fixed => 1,
            } << 5);
        cmd = cmd
            | (match self.slew_rate {
                SlewRate::Enabled => 0,
                SlewRate::Disabled => 1,
            } << 4);
        cmd = cmd
            | (match self.hardware_address {
                HardwareAddress::Disabled => 0,
                HardwareAddress::Enabled => 1,
            } << 3);
        cmd = cmd
            | (match self.interrupt_drive {
                InterruptDrive::ActiveDriver => 0,
                InterruptDrive::OpenDrain => 1,
            } << 2);
        cmd = cmd
            | (match self.interrupt_polarity {
                InterruptPolarity::ActiveLow => 0,
                InterruptPolarity::ActiveHigh => 1,
            } << 1);
        cmd
    }
}

/// `State` is the part of IOCON that changes how the driver talks to the
/// device: which register map is active, interrupt polarity, and whether
/// the hardware address pins take part in opcode matching.
///
/// A driver only ever builds its `State` from the IOCON byte it last wrote,
/// so it always describes the device as it was actually configured.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct State {
    registers_sequential: bool,
    interrupt_active_low: bool,
    hardware_address_enabled: bool,
}

impl Default for State {
    fn default() -> Self {
        State::from_iocon(0x00)
    }
}

impl State {
    pub fn from_iocon(iocon: u8) -> Self {
        State {
            registers_sequential: iocon & BANK == 0,
            interrupt_active_low: iocon & INTPOL == 0,
            hardware_address_enabled: iocon & HAEN != 0,
        }
    }

    pub fn registers_sequential(&self) -> bool {
        self.registers_sequential
    }

    pub fn registers_banked(&self) -> bool {
        !self.registers_sequential
    }

    pub fn interrupt_active_low(&self) -> bool {
        self.interrupt_active_low
    }

    pub fn interrupt_active_high(&self) -> bool {
        !self.interrupt_active_low
    }

    pub fn hardware_address_enabled(&self) -> bool {
        self.hardware_address_enabled
    }

    /// Physical address of `register` on `port` under the current map.
    pub fn resolve(&self, register: Register, port: Port) -> u8 {
        register.address(port, self.registers_sequential)
    }

    /// The address the device answers to: its strapped `bus_address` when
    /// HAEN is set, otherwise always zero.
    pub fn effective_address(&self, bus_address: u8) -> u8 {
        if self.hardware_address_enabled {
            bus_address
        } else {
            0b000
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// Control byte `0 1 0 0 A2 A1 A0 R/W`. Only the low three bits of `address`
/// are used.
pub fn opcode(address: u8, op: Operation) -> u8 {
    let mut cmd = OPCODE_HEADER;
    cmd = cmd | ((address & 0b111) << 1);
    cmd = cmd
        | match op {
            Operation::Read => 1,
            Operation::Write => 0,
        };
    cmd
}
