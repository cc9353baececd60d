//! SSD1306 OLED adapter
//!
//! Maps the cursor-based `DisplayDriver` interface onto an
//! embedded-graphics frame buffer. Drawing only touches the buffer;
//! `present` pushes it to the panel.
//!
//! Text sizes select a fixed font:
//! - 1: 6×10
//! - 2: 9×15
//! - 3 and up: 10×20

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use doorlock_core::traits::{Color, DisplayDriver, DisplayError};

/// Frame buffer that can be cleared and pushed to a panel
pub trait Framebuffer: DrawTarget<Color = BinaryColor> {
    /// Clear the buffer without touching the panel
    fn clear_frame(&mut self);

    /// Push the buffer to the panel
    fn flush_frame(&mut self) -> Result<(), DisplayError>;
}

impl<DI, SIZE> Framebuffer for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn clear_frame(&mut self) {
        self.clear_buffer();
    }

    fn flush_frame(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|_| DisplayError::Communication)
    }
}

/// 128×64 SSD1306 on I²C in buffered mode
pub type Ssd1306Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

impl<I2C: embedded_hal::i2c::I2c> OledDisplay<Ssd1306Display<I2C>> {
    /// Wrap a 128×64 SSD1306 on I²C; call `init` before drawing
    pub fn ssd1306(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self::new(panel)
    }

    /// Send the panel init sequence and blank the screen
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.frame.init().map_err(|_| DisplayError::NotInitialized)?;
        self.clear()?;
        self.present()
    }
}

fn font_for(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        2 => &FONT_9X15,
        _ => &FONT_10X20,
    }
}

fn binary(color: Color) -> BinaryColor {
    match color {
        Color::Off => BinaryColor::Off,
        Color::On => BinaryColor::On,
    }
}

/// Cursor/text-size adapter over a frame buffer
pub struct OledDisplay<F> {
    frame: F,
    cursor: Point,
    text_size: u8,
}

impl<F: Framebuffer> OledDisplay<F> {
    pub fn new(frame: F) -> Self {
        Self {
            frame,
            cursor: Point::zero(),
            text_size: 1,
        }
    }

    /// Access the underlying frame buffer
    pub fn frame(&self) -> &F {
        &self.frame
    }
}

impl<F: Framebuffer> DisplayDriver for OledDisplay<F> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear_frame();
        self.cursor = Point::zero();
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font_for(self.text_size), BinaryColor::On);
        let next = Text::with_baseline(text, self.cursor, style, Baseline::Top)
            .draw(&mut self.frame)
            .map_err(|_| DisplayError::Communication)?;
        self.cursor = next;
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(binary(color)))
            .draw(&mut self.frame)
            .map_err(|_| DisplayError::Communication)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.frame.flush_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use doorlock_core::traits::DisplayExt;

    const W: usize = 128;
    const H: usize = 64;

    /// In-memory 128×64 panel
    struct FakePanel {
        pixels: Vec<bool>,
        flushes: usize,
    }

    impl FakePanel {
        fn new() -> Self {
            Self {
                pixels: vec![false; W * H],
                flushes: 0,
            }
        }

        fn lit(&self, x: usize, y: usize) -> bool {
            self.pixels[y * W + x]
        }

        fn lit_count(&self) -> usize {
            self.pixels.iter().filter(|p| **p).count()
        }
    }

    impl OriginDimensions for FakePanel {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for FakePanel {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, c) in pixels {
                if p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H {
                    self.pixels[p.y as usize * W + p.x as usize] = c.is_on();
                }
            }
            Ok(())
        }
    }

    impl Framebuffer for FakePanel {
        fn clear_frame(&mut self) {
            self.pixels.iter_mut().for_each(|p| *p = false);
        }

        fn flush_frame(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_fill_and_blank() {
        let mut display = OledDisplay::new(FakePanel::new());
        display.fill_rect(16, 48, 12, 2, Color::On).unwrap();
        assert_eq!(display.frame().lit_count(), 24);
        assert!(display.frame().lit(16, 48));
        assert!(!display.frame().lit(28, 48));

        display.blank(16, 48, 12, 2).unwrap();
        assert_eq!(display.frame().lit_count(), 0);
    }

    #[test]
    fn test_text_stays_in_cell() {
        let mut display = OledDisplay::new(FakePanel::new());
        display.text_at(65, 1, 2, "Open").unwrap();

        let frame = display.frame();
        assert!(frame.lit_count() > 0);
        // Nothing left of or above the cursor
        for y in 0..H {
            for x in 0..65 {
                assert!(!frame.lit(x, y));
            }
        }
        for x in 0..W {
            assert!(!frame.lit(x, 0));
        }
    }

    #[test]
    fn test_cursor_advances() {
        let mut display = OledDisplay::new(FakePanel::new());
        display.text_at(0, 0, 1, "ab").unwrap();
        assert_eq!(display.cursor, Point::new(12, 0));
    }

    #[test]
    fn test_clear_and_present() {
        let mut display = OledDisplay::new(FakePanel::new());
        display.text_at(1, 1, 1, "Temp").unwrap();
        display.clear().unwrap();
        assert_eq!(display.frame().lit_count(), 0);

        display.present().unwrap();
        assert_eq!(display.frame().flushes, 1);
    }

    #[test]
    fn test_font_selection() {
        assert_eq!(font_for(1).character_size, Size::new(6, 10));
        assert_eq!(font_for(2).character_size, Size::new(9, 15));
        assert_eq!(font_for(3).character_size, Size::new(10, 20));
        assert_eq!(font_for(4).character_size, Size::new(10, 20));
    }
}
