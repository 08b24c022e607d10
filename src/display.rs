//! The four-digit time display: the adapter contract players render through
//! and the LED-matrix framebuffer the firmware adapter draws into.

use embedded_graphics::{
    mono_font::{ascii::FONT_4X6, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;

/// Renders a player's time. Implementations absorb their own failures.
pub trait TimeDisplay {
    /// Shows `MM:SS`.
    fn render_digits(&mut self, minutes: u8, seconds: u8);
    /// Shows four characters with the colon off; spaces are blanks.
    fn render_text(&mut self, text: &str);
    fn set_brightness(&mut self, level: u8);
}

/// Chained 8x8 matrices per display.
pub const DEVICES: usize = 4;
pub const WIDTH: u32 = 8 * DEVICES as u32;
pub const HEIGHT: u32 = 8;

const GLYPH_WIDTH: i32 = 4;

/// A 32x8 monochrome framebuffer, one `u32` per row with column 0 in the
/// most significant bit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: [u32; HEIGHT as usize],
}

impl Frame {
    pub fn digits(minutes: u8, seconds: u8) -> Self {
        let mut buf = [0u8; 5];
        let mut frame = Frame::default();
        if let Ok(line) = format_no_std::show(
            &mut buf,
            format_args!("{:02}:{:02}", minutes.min(99), seconds.min(59)),
        ) {
            frame.draw_line(line);
        }
        frame
    }

    /// Lays out the first four characters of `text` around a dark colon.
    pub fn text(text: &str) -> Self {
        let mut line: String<5> = String::new();
        for (i, c) in text.chars().take(4).enumerate() {
            if i == 2 {
                line.push(' ').ok();
            }
            line.push(c).ok();
        }
        let mut frame = Frame::default();
        frame.draw_line(&line);
        frame
    }

    fn draw_line(&mut self, line: &str) {
        let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
        let width = line.chars().count() as i32 * GLYPH_WIDTH;
        let x = (WIDTH as i32 - width) / 2;
        Text::with_baseline(line, Point::new(x, 1), style, Baseline::Top)
            .draw(self)
            .ok();
    }

    #[cfg(test)]
    fn is_lit(&self, x: u32, y: u32) -> bool {
        x < WIDTH && y < HEIGHT && self.rows[y as usize] & (1 << (31 - x)) != 0
    }

    #[cfg(test)]
    fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| *row == 0)
    }

    /// Splits the frame into per-device row buffers (FC16 layout, device 0
    /// leftmost).
    pub fn device_buffers(&self) -> [[u8; 8]; DEVICES] {
        let mut device_buffers = [[0u8; 8]; DEVICES];
        for (dev_idx, buffer) in device_buffers.iter_mut().enumerate() {
            let shift = 24 - (dev_idx * 8);
            for (r, row) in self.rows.iter().enumerate() {
                buffer[r] = ((row >> shift) & 0xFF) as u8;
            }
        }
        device_buffers
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if !(0..WIDTH as i32).contains(&point.x) || !(0..HEIGHT as i32).contains(&point.y) {
                continue;
            }
            let bit = 1u32 << (31 - point.x);
            let row = &mut self.rows[point.y as usize];
            match color {
                BinaryColor::On => *row |= bit,
                BinaryColor::Off => *row &= !bit,
            }
        }
        Ok(())
    }
}
