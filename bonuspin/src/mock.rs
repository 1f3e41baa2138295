//! Simulated bus hardware for exercising the drivers off-target.
//!
//! A [`Wire`] records everything the SPI bus, pins and delay provider created
//! from it do, in order. By default the bus answers each byte with the next
//! canned response queued with [`Wire::respond`] (or `0x00`). A wire made with
//! [`Wire::with_mcp23s17`] instead answers as an MCP23S17 would: it decodes
//! opcode and register address frames delimited by the `"cs"` pin, honors the
//! BANK and HAEN bits of its own IOCON register, and returns to its power-on
//! register values while the `"reset"` pin is low.
//!
//! Faults can be injected with [`Wire::fail_after`] and [`Wire::fail_pin`];
//! the failing call reports [`Fault`] and leaves no event behind.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi;

/// Error returned by a bus or pin with an injected fault.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fault;

/// One observable action on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Low(&'static str),
    High(&'static str),
    Byte(u8),
    DelayUs(u32),
}

#[derive(Debug, Clone, Default)]
pub struct Wire {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<Event>,
    canned: VecDeque<u8>,
    pending: Option<u8>,
    selected: bool,
    chip: Option<Chip>,
    sends_left: Option<usize>,
    failing_pins: Vec<&'static str>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    /// A wire with an emulated MCP23S17 strapped to `hw_address`.
    pub fn with_mcp23s17(hw_address: u8) -> Self {
        let wire = Self::new();
        wire.inner.borrow_mut().chip = Some(Chip::new(hw_address));
        wire
    }

    pub fn spi(&self) -> Spi {
        Spi { wire: self.clone() }
    }

    pub fn pin(&self, name: &'static str) -> Pin {
        Pin {
            wire: self.clone(),
            name: name,
        }
    }

    pub fn delay(&self) -> Delay {
        Delay { wire: self.clone() }
    }

    /// Queues bytes to be clocked back, one per byte sent.
    pub fn respond(&self, bytes: &[u8]) {
        self.inner.borrow_mut().canned.extend(bytes.iter().copied());
    }

    /// Lets `sends` more bytes through, then fails every following send.
    pub fn fail_after(&self, sends: usize) {
        self.inner.borrow_mut().sends_left = Some(sends);
    }

    /// Makes every level change on the named pin fail.
    pub fn fail_pin(&self, name: &'static str) {
        self.inner.borrow_mut().failing_pins.push(name);
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().events.clear();
    }

    /// Every byte sent, regardless of chip-select.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter_map(|ev| match ev {
                Event::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Bytes sent grouped by chip-select transaction.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<u8>> = None;
        for ev in self.inner.borrow().events.iter() {
            match ev {
                Event::Low("cs") => current = Some(Vec::new()),
                Event::High("cs") => {
                    if let Some(frame) = current.take() {
                        frames.push(frame);
                    }
                }
                Event::Byte(b) => {
                    if let Some(frame) = current.as_mut() {
                        frame.push(*b);
                    }
                }
                _ => (),
            }
        }
        frames
    }

    /// Whether the `"cs"` pin is currently low.
    pub fn selected(&self) -> bool {
        self.inner.borrow().selected
    }

    /// Register contents of the emulated chip, indexed by sequential-mode
    /// address.
    pub fn register(&self, addr: u8) -> u8 {
        let inner = self.inner.borrow();
        match inner.chip.as_ref() {
            Some(chip) => chip.regs[Chip::canonical(addr)],
            None => panic!("wire has no emulated chip"),
        }
    }

    pub fn set_register(&self, addr: u8, value: u8) {
        let mut inner = self.inner.borrow_mut();
        match inner.chip.as_mut() {
            Some(chip) => chip.regs[Chip::canonical(addr)] = value,
            None => panic!("wire has no emulated chip"),
        }
    }

    fn pin_level(&self, name: &'static str, high: bool) -> Result<(), Fault> {
        let mut inner = self.inner.borrow_mut();
        if inner.failing_pins.contains(&name) {
            return Err(Fault);
        }
        inner.events.push(if high {
            Event::High(name)
        } else {
            Event::Low(name)
        });
        match (name, high) {
            ("cs", level) => {
                inner.selected = !level;
                if let Some(chip) = inner.chip.as_mut() {
                    chip.frame.clear();
                }
            }
            ("reset", false) => {
                if let Some(chip) = inner.chip.as_mut() {
                    chip.power_on();
                }
            }
            _ => (),
        }
        Ok(())
    }

    fn exchange(&self, c: u8) -> Result<(), Fault> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        match inner.sends_left {
            Some(0) => return Err(Fault),
            Some(n) => inner.sends_left = Some(n - 1),
            None => (),
        }
        inner.events.push(Event::Byte(c));
        let selected = inner.selected;
        let reply = match inner.chip.as_mut() {
            Some(chip) if selected => chip.exchange(c),
            Some(_) => 0x00,
            None => inner.canned.pop_front().unwrap_or(0x00),
        };
        inner.pending = Some(reply);
        Ok(())
    }
}

#[derive(Debug)]
pub struct Spi {
    wire: Wire,
}

impl spi::FullDuplex<u8> for Spi {
    type Error = Fault;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        Ok(self.wire.inner.borrow_mut().pending.take().unwrap_or(0x00))
    }

    fn send(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.wire.exchange(word).map_err(nb::Error::Other)
    }
}

#[derive(Debug)]
pub struct Pin {
    wire: Wire,
    name: &'static str,
}

impl OutputPin for Pin {
    type Error = Fault;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.wire.pin_level(self.name, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.wire.pin_level(self.name, true)
    }
}

#[derive(Debug)]
pub struct Delay {
    wire: Wire,
}

impl DelayUs<u8> for Delay {
    fn delay_us(&mut self, us: u8) {
        self.wire
            .inner
            .borrow_mut()
            .events
            .push(Event::DelayUs(us as u32));
    }
}

/// MCP23S17 register file. Registers are stored at their sequential-mode
/// addresses; IOCON lives at 0x0A and is also reachable as 0x0B.
#[derive(Debug)]
struct Chip {
    hw_address: u8,
    regs: [u8; 0x16],
    frame: Vec<u8>,
}

impl Chip {
    fn new(hw_address: u8) -> Self {
        let mut chip = Chip {
            hw_address: hw_address,
            regs: [0; 0x16],
            frame: Vec::new(),
        };
        chip.power_on();
        chip
    }

    fn power_on(&mut self) {
        self.regs = [0; 0x16];
        // IODIRA/IODIRB come up as all inputs.
        self.regs[0x00] = 0xFF;
        self.regs[0x01] = 0xFF;
    }

    fn canonical(addr: u8) -> usize {
        match addr {
            0x0B => 0x0A,
            a => a as usize,
        }
    }

    fn iocon(&self) -> u8 {
        self.regs[0x0A]
    }

    fn index(&self, addr: u8) -> Option<usize> {
        if self.iocon() & 0x80 == 0 {
            match addr {
                0x00..=0x15 => Some(Self::canonical(addr)),
                _ => None,
            }
        } else {
            let port = (addr >> 4) as usize;
            let offset = (addr & 0x0F) as usize;
            if port > 1 || offset > 0x0A {
                None
            } else {
                Some(Self::canonical((offset * 2 + port) as u8))
            }
        }
    }

    fn addressed(&self, opcode: u8) -> bool {
        let expect = if self.iocon() & 0x08 != 0 {
            self.hw_address
        } else {
            0
        };
        opcode & 0xF0 == 0x40 && (opcode >> 1) & 0b111 == expect
    }

    fn exchange(&mut self, c: u8) -> u8 {
        self.frame.push(c);
        if self.frame.len() < 3 || !self.addressed(self.frame[0]) {
            return 0x00;
        }
        let index = match self.index(self.frame[1]) {
            Some(i) => i,
            None => return 0x00,
        };
        if self.frame[0] & 1 == 1 {
            self.regs[index]
        } else {
            self.regs[index] = c;
            0x00
        }
    }
}
