//! Pin-level glue for the Pico: the MAX7219 display adapter and the bank of
//! input pins that raise `IO_IRQ_BANK0`.
//!
//! Wiring:
//!   GP2/GP3   player buttons (rising edge)
//!   GP4/5/16  player 1 matrix data, clock, chip select
//!   GP6/7/17  player 2 matrix data, clock, chip select
//!   GP8/GP9   player LEDs
//!   GP10      buzzer
//!   GP11      encoder switch, doubles as settings (falling edge)
//!   GP12/GP13 encoder DT/CLK (both edges)
//!   GP14      reset button (rising edge)

use embedded_hal::digital::v2::InputPin;
use heapless::Vec;
use max7219::{connectors::PinConnector, MAX7219};
use rp_pico::hal::gpio::{
    bank0::{Gpio11, Gpio12, Gpio13, Gpio14, Gpio2, Gpio3},
    DynPinId, FunctionSioInput, FunctionSioOutput, Interrupt, Pin, PinId, PullDown, PullType,
    PullUp,
};

use chess_clock::display::{Frame, TimeDisplay, DEVICES};
use chess_clock::{Event, Seat};

pub type DynOutput = Pin<DynPinId, FunctionSioOutput, PullDown>;
type Driver = MAX7219<PinConnector<DynOutput, DynOutput, DynOutput>>;

/// Four chained 8x8 matrices on three bit-banged pins.
pub struct MatrixDisplay {
    driver: Driver,
}

impl MatrixDisplay {
    pub fn new(data: DynOutput, sck: DynOutput, cs: DynOutput) -> Self {
        let mut driver = MAX7219::from_pins(DEVICES, data, cs, sck).ok().unwrap();
        driver.power_on().ok().unwrap();
        for dev_idx in 0..DEVICES {
            driver.clear_display(dev_idx).ok();
        }
        Self { driver }
    }

    fn show(&mut self, frame: &Frame) {
        for (dev_idx, rows) in frame.device_buffers().iter().enumerate() {
            if self.driver.write_raw(dev_idx, rows).is_err() {
                defmt::warn!("matrix {} write failed", dev_idx);
            }
        }
    }
}

impl TimeDisplay for MatrixDisplay {
    fn render_digits(&mut self, minutes: u8, seconds: u8) {
        self.show(&Frame::digits(minutes, seconds));
    }

    fn render_text(&mut self, text: &str) {
        self.show(&Frame::text(text));
    }

    fn set_brightness(&mut self, level: u8) {
        for dev_idx in 0..DEVICES {
            if self.driver.set_intensity(dev_idx, level).is_err() {
                defmt::warn!("matrix {} brightness failed", dev_idx);
            }
        }
    }
}

/// A pin interrupt, decoded as far as the pin bank can.
#[derive(Clone, Copy)]
pub enum Trigger {
    Event(Event),
    /// Encoder line moved; carries both levels for the quadrature decoder.
    Encoder { clk: bool, dt: bool },
}

pub struct Inputs {
    pub player_1: Pin<Gpio2, FunctionSioInput, PullDown>,
    pub player_2: Pin<Gpio3, FunctionSioInput, PullDown>,
    pub settings: Pin<Gpio11, FunctionSioInput, PullDown>,
    pub reset: Pin<Gpio14, FunctionSioInput, PullDown>,
    pub encoder_dt: Pin<Gpio12, FunctionSioInput, PullUp>,
    pub encoder_clk: Pin<Gpio13, FunctionSioInput, PullUp>,
}

impl Inputs {
    pub fn enable_interrupts(&mut self) {
        self.player_1.set_interrupt_enabled(Interrupt::EdgeHigh, true);
        self.player_2.set_interrupt_enabled(Interrupt::EdgeHigh, true);
        self.settings.set_interrupt_enabled(Interrupt::EdgeLow, true);
        self.reset.set_interrupt_enabled(Interrupt::EdgeHigh, true);
        for edge in [Interrupt::EdgeHigh, Interrupt::EdgeLow] {
            self.encoder_dt.set_interrupt_enabled(edge, true);
            self.encoder_clk.set_interrupt_enabled(edge, true);
        }
    }

    /// Acknowledges every pending pin interrupt and returns what fired.
    pub fn drain(&mut self) -> Vec<Trigger, 5> {
        let mut triggers = Vec::new();

        if acknowledge(&mut self.player_1, Interrupt::EdgeHigh) {
            triggers.push(Trigger::Event(Event::PlayerButton(Seat::One))).ok();
        }
        if acknowledge(&mut self.player_2, Interrupt::EdgeHigh) {
            triggers.push(Trigger::Event(Event::PlayerButton(Seat::Two))).ok();
        }
        if acknowledge(&mut self.settings, Interrupt::EdgeLow) {
            triggers.push(Trigger::Event(Event::SettingsButton)).ok();
        }
        if acknowledge(&mut self.reset, Interrupt::EdgeHigh) {
            triggers.push(Trigger::Event(Event::ResetButton)).ok();
        }

        let mut turned = false;
        for edge in [Interrupt::EdgeHigh, Interrupt::EdgeLow] {
            turned |= acknowledge(&mut self.encoder_clk, edge);
            turned |= acknowledge(&mut self.encoder_dt, edge);
        }
        if turned {
            let clk = self.encoder_clk.is_high().unwrap_or(false);
            let dt = self.encoder_dt.is_high().unwrap_or(false);
            triggers.push(Trigger::Encoder { clk, dt }).ok();
        }

        triggers
    }
}

fn acknowledge<I: PinId, P: PullType>(pin: &mut Pin<I, FunctionSioInput, P>, edge: Interrupt) -> bool {
    let fired = pin.interrupt_status(edge);
    if fired {
        pin.clear_interrupt(edge);
    }
    fired
}
