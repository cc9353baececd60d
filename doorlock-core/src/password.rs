//! Password entry sub-mode
//!
//! While the door is closed the joystick edits a 4-digit buffer: up/down
//! changes the digit under the cursor, left/right moves the cursor. Edits
//! are paced by wall-clock time so holding the stick produces a steady
//! repeat regardless of how fast the control loop runs.

use crate::config::{PasswordConfig, CODE_LEN};
use crate::input::{Horizontal, JoystickVector, Vertical};
use crate::traits::{Color, DisplayError, DisplayExt};

/// Left edge of the first digit slot
const SLOT_X0: i32 = 16;
/// Horizontal distance between digit slots
const SLOT_PITCH: i32 = 28;
/// Top edge of the digit glyphs
const DIGIT_Y: i32 = 30;
const DIGIT_SIZE: u8 = 2;
const DIGIT_W: u32 = 12;
const DIGIT_H: u32 = 16;
/// Cursor underline below the active slot
const CURSOR_Y: i32 = 48;
const CURSOR_H: u32 = 2;

const GLYPHS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

fn slot_x(slot: usize) -> i32 {
    SLOT_X0 + SLOT_PITCH * slot as i32
}

/// PIN buffer, cursor and what is currently on screen
#[derive(Debug, Clone)]
pub struct PasswordEntry {
    digits: [u8; CODE_LEN],
    cursor: u8,
    code: [u8; CODE_LEN],
    edit_interval_ms: u32,
    last_edit_ms: Option<u64>,
    drawn_digits: [Option<u8>; CODE_LEN],
    drawn_cursor: Option<u8>,
}

impl PasswordEntry {
    /// Create an empty entry checked against `config.code`
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            digits: [0; CODE_LEN],
            cursor: 0,
            code: config.code,
            edit_interval_ms: config.edit_interval_ms,
            last_edit_ms: None,
            drawn_digits: [None; CODE_LEN],
            drawn_cursor: None,
        }
    }

    /// Zero the buffer, home the cursor and forget what is on screen
    pub fn reset(&mut self) {
        self.digits = [0; CODE_LEN];
        self.cursor = 0;
        self.last_edit_ms = None;
        self.invalidate();
    }

    /// Force the next `render` to redraw every slot
    pub fn invalidate(&mut self) {
        self.drawn_digits = [None; CODE_LEN];
        self.drawn_cursor = None;
    }

    /// Apply joystick input, at most one edit per edit interval
    ///
    /// Returns true if the buffer or cursor changed. Neutral input never
    /// changes anything and does not use up the interval.
    pub fn tick(&mut self, joystick: JoystickVector, now_ms: u64) -> bool {
        if let Some(last) = self.last_edit_ms {
            if now_ms.saturating_sub(last) < u64::from(self.edit_interval_ms) {
                return false;
            }
        }

        let slot = usize::from(self.cursor);
        match (joystick.vertical, joystick.horizontal) {
            (Vertical::Up, _) => self.digits[slot] = (self.digits[slot] + 1) % 10,
            (Vertical::Down, _) => self.digits[slot] = (self.digits[slot] + 9) % 10,
            (Vertical::Neutral, Horizontal::Right) => {
                self.cursor = (self.cursor + 1) % CODE_LEN as u8
            }
            (Vertical::Neutral, Horizontal::Left) => {
                self.cursor = (self.cursor + CODE_LEN as u8 - 1) % CODE_LEN as u8
            }
            (Vertical::Neutral, Horizontal::Neutral) => return false,
        }

        self.last_edit_ms = Some(now_ms);
        true
    }

    /// Check the buffer against the reference code
    pub fn is_correct(&self) -> bool {
        self.digits == self.code
    }

    /// Current buffer
    pub fn digits(&self) -> [u8; CODE_LEN] {
        self.digits
    }

    /// Active slot (0..CODE_LEN)
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Redraw the slots and cursor that changed since the last render
    ///
    /// Returns true if anything was drawn (and presented).
    pub fn render<D: DisplayExt>(&mut self, display: &mut D) -> Result<bool, DisplayError> {
        let mut dirty = false;

        for slot in 0..CODE_LEN {
            let digit = self.digits[slot];
            if self.drawn_digits[slot] == Some(digit) {
                continue;
            }
            let x = slot_x(slot);
            display.blank(x, DIGIT_Y, DIGIT_W, DIGIT_H)?;
            display.text_at(x, DIGIT_Y, DIGIT_SIZE, GLYPHS[usize::from(digit)])?;
            self.drawn_digits[slot] = Some(digit);
            dirty = true;
        }

        if self.drawn_cursor != Some(self.cursor) {
            if let Some(old) = self.drawn_cursor {
                display.blank(slot_x(usize::from(old)), CURSOR_Y, DIGIT_W, CURSOR_H)?;
            }
            display.fill_rect(
                slot_x(usize::from(self.cursor)),
                CURSOR_Y,
                DIGIT_W,
                CURSOR_H,
                Color::On,
            )?;
            self.drawn_cursor = Some(self.cursor);
            dirty = true;
        }

        if dirty {
            display.present()?;
        }
        Ok(dirty)
    }
}
