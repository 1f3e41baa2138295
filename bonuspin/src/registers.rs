//! MCP23S17 register map.
//!
//! The MCP23S17 has eleven registers per port. With IOCON.BANK clear the A
//! and B registers are interleaved in one block at 0x00-0x15; with BANK set
//! port A occupies 0x00-0x0A and port B 0x10-0x1A.

/// One of the two 8-line ports. Port A carries the low byte of a 16-bit
/// value, port B the high byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
}

/// The logical registers of the MCP23S17, each present once per [`Port`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Register {
    /// IODIR: a set bit makes the line an input.
    Direction,
    /// IPOL: a set bit inverts the value read from GPIO.
    Polarity,
    /// GPINTEN: interrupt-on-change enable.
    InterruptEnable,
    /// DEFVAL: comparison value for interrupt-on-change.
    DefaultCompare,
    /// INTCON: compare against DEFVAL (set) or the previous value (clear).
    InterruptControl,
    /// IOCON. Both ports address the same physical register.
    Configuration,
    /// GPPU: 100k pull-up enable.
    PullUp,
    /// INTF, read only.
    InterruptFlag,
    /// INTCAP, read only.
    InterruptCapture,
    /// GPIO: reads the port, writes go to the output latch.
    Gpio,
    /// OLAT.
    OutputLatch,
}

impl Register {
    pub const ALL: [Register; 11] = [
        Register::Direction,
        Register::Polarity,
        Register::InterruptEnable,
        Register::DefaultCompare,
        Register::InterruptControl,
        Register::Configuration,
        Register::PullUp,
        Register::InterruptFlag,
        Register::InterruptCapture,
        Register::Gpio,
        Register::OutputLatch,
    ];

    /// Physical address of this register on `port`, in sequential
    /// (`sequential == true`) or banked addressing.
    pub fn address(self, port: Port, sequential: bool) -> u8 {
        let (seq, banked) = match port {
            Port::A => self.port_a(),
            Port::B => self.port_b(),
        };
        if sequential {
            seq
        } else {
            banked
        }
    }

    fn port_a(self) -> (u8, u8) {
        match self {
            Register::Direction => (0x00, 0x00),
            Register::Polarity => (0x02, 0x01),
            Register::InterruptEnable => (0x04, 0x02),
            Register::DefaultCompare => (0x06, 0x03),
            Register::InterruptControl => (0x08, 0x04),
            Register::Configuration => (0x0A, 0x05),
            Register::PullUp => (0x0C, 0x06),
            Register::InterruptFlag => (0x0E, 0x07),
            Register::InterruptCapture => (0x10, 0x08),
            Register::Gpio => (0x12, 0x09),
            Register::OutputLatch => (0x14, 0x0A),
        }
    }

    fn port_b(self) -> (u8, u8) {
        match self {
            Register::Direction => (0x01, 0x10),
            Register::Polarity => (0x03, 0x11),
            Register::InterruptEnable => (0x05, 0x12),
            Register::DefaultCompare => (0x07, 0x13),
            Register::InterruptControl => (0x09, 0x14),
            Register::Configuration => (0x0B, 0x15),
            Register::PullUp => (0x0D, 0x16),
            Register::InterruptFlag => (0x0F, 0x17),
            Register::InterruptCapture => (0x11, 0x18),
            Register::Gpio => (0x13, 0x19),
            Register::OutputLatch => (0x15, 0x1A),
        }
    }
}
