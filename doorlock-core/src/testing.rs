//! Recording peripheral mocks for host tests

use crate::traits::{
    Color, Direction, DisplayDriver, DisplayError, Indicator, IndicatorOutput, MotorDriver,
    MotorError, ToneOutput,
};

/// One call made on the mock display
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Text {
        x: i32,
        y: i32,
        size: u8,
        text: String,
    },
    Rect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Present,
}

/// Display that records every draw call
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub ops: Vec<DrawOp>,
    pub fail: bool,
    cursor: (i32, i32),
    size: u8,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            size: 1,
            ..Self::default()
        }
    }

    /// Drop all recorded calls
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// All text drawn since the last reset
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &DrawOp) -> usize {
        self.ops.iter().filter(|op| *op == wanted).count()
    }

    pub fn presents(&self) -> usize {
        self.count(&DrawOp::Present)
    }

    pub fn clears(&self) -> usize {
        self.count(&DrawOp::Clear)
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::Communication)
        } else {
            Ok(())
        }
    }
}

impl DisplayDriver for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn set_text_size(&mut self, size: u8) {
        self.size = size;
    }

    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.check()?;
        self.ops.push(DrawOp::Text {
            x: self.cursor.0,
            y: self.cursor.1,
            size: self.size,
            text: text.to_string(),
        });
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
        self.check()?;
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.ops.push(DrawOp::Present);
        Ok(())
    }
}

/// One call made on the mock motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCall {
    Forward(u8),
    Backward(u8),
    Stop,
}

/// Motor that records commands
#[derive(Debug, Default)]
pub struct MockMotor {
    pub calls: Vec<MotorCall>,
    pub fail: bool,
    direction: Direction,
    speed: u8,
}

impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<MotorCall> {
        self.calls.last().copied()
    }

    fn record(&mut self, call: MotorCall) -> Result<(), MotorError> {
        self.calls.push(call);
        if self.fail {
            return Err(MotorError::Pwm);
        }
        match call {
            MotorCall::Forward(s) => {
                self.direction = Direction::Forward;
                self.speed = s;
            }
            MotorCall::Backward(s) => {
                self.direction = Direction::Backward;
                self.speed = s;
            }
            MotorCall::Stop => self.speed = 0,
        }
        Ok(())
    }
}

impl MotorDriver for MockMotor {
    fn drive_forward(&mut self, speed_percent: u8) -> Result<(), MotorError> {
        self.record(MotorCall::Forward(speed_percent))
    }

    fn drive_backward(&mut self, speed_percent: u8) -> Result<(), MotorError> {
        self.record(MotorCall::Backward(speed_percent))
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        self.record(MotorCall::Stop)
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn speed(&self) -> u8 {
        self.speed
    }
}

/// One call made on the mock tone output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Play(u32),
    Silence,
}

/// Tone output that records calls
#[derive(Debug, Default)]
pub struct MockTone {
    pub calls: Vec<ToneCall>,
}

impl MockTone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Periods played, in order
    pub fn played(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ToneCall::Play(p) => Some(*p),
                ToneCall::Silence => None,
            })
            .collect()
    }
}

impl ToneOutput for MockTone {
    fn play(&mut self, period_us: u32) {
        self.calls.push(ToneCall::Play(period_us));
    }

    fn silence(&mut self) {
        self.calls.push(ToneCall::Silence);
    }
}

/// Indicator that records every state shown
#[derive(Debug, Default)]
pub struct MockIndicator {
    pub shown: Vec<Indicator>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Indicator> {
        self.shown.last().copied()
    }
}

impl IndicatorOutput for MockIndicator {
    fn show(&mut self, indicator: Indicator) {
        self.shown.push(indicator);
    }
}
