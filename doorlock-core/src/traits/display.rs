//! Display driver trait for the status OLED
//!
//! The interface mirrors a classic cursor-based text/graphics API: set the
//! cursor and text size, then draw. Nothing reaches the panel until
//! `present()` is called.

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the panel failed
    Communication,
    /// Display not initialized
    NotInitialized,
    /// Text did not fit the draw buffer
    BufferOverflow,
}

/// Pixel color on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off (background)
    Off,
    /// Pixel lit
    On,
}

/// Trait for the status display
///
/// Coordinates are pixels with the origin in the top-left corner. Text
/// size `n` uses glyph cells of nominally `6n × 8n` pixels.
pub trait DisplayDriver {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the text cursor to a pixel position
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Select the text size (1 = smallest)
    fn set_text_size(&mut self, size: u8);

    /// Draw text at the cursor and advance the cursor
    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Push the frame buffer to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

/// Helper trait for drawing common UI elements
pub trait DisplayExt: DisplayDriver {
    /// Draw text of a given size at a position
    fn text_at(&mut self, x: i32, y: i32, size: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(x, y);
        self.set_text_size(size);
        self.draw_text(text)
    }

    /// Blank a region back to the background color
    fn blank(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), DisplayError> {
        self.fill_rect(x, y, width, height, Color::Off)
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver> DisplayExt for T {}
