//! Simple TOML parser for the door lock configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `doorlock.toml`. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - [section] headers
//! - Key = value pairs (integer, boolean)
//! - Single-line integer arrays: code = [1, 2, 3, 4]
//! - Comments (# ...)
//!
//! Unknown keys are ignored; unknown sections are an error.

use super::types::{DoorConfig, CHIME_LEN, CODE_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed for its key
    InvalidValue,
    /// Array had the wrong number of elements
    WrongLength,
    /// Line is neither a header, a comment nor `key = value`
    Syntax,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Password,
    Door,
    Motor,
    Chime,
    Input,
    Display,
}

/// Parse TOML configuration into `DoorConfig`
///
/// Keys that are absent keep their default value.
pub fn parse_config(input: &str) -> Result<DoorConfig, ParseError> {
    let mut config = DoorConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax)?;
        apply_value(section, key, value, &mut config)?;
    }

    validate(&config)?;
    Ok(config)
}

/// Drop everything after `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "password" => Ok(Section::Password),
        "door" => Ok(Section::Door),
        "motor" => Ok(Section::Motor),
        "chime" => Ok(Section::Chime),
        "input" => Ok(Section::Input),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a fixed-length integer array like "[3830, 3038, 2550, 3830]"
fn parse_array<T, const N: usize>(value: &str) -> Result<[T; N], ParseError>
where
    T: core::str::FromStr + Copy + Default,
{
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut out = [T::default(); N];
    let mut count = 0;

    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        if count == N {
            return Err(ParseError::WrongLength);
        }
        out[count] = parse_int(item)?;
        count += 1;
    }

    if count != N {
        return Err(ParseError::WrongLength);
    }
    Ok(out)
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DoorConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Password => match key {
            "code" => config.password.code = parse_array::<u8, CODE_LEN>(value)?,
            "edit_interval_ms" => config.password.edit_interval_ms = parse_int(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Door => match key {
            "run_window_s" => config.timing.run_window_ticks = parse_int(value)?,
            "hold_window_s" => config.timing.hold_window_ticks = parse_int(value)?,
            _ => {}
        },
        Section::Motor => match key {
            "speed_percent" => config.motor.speed_percent = parse_int(value)?,
            _ => {}
        },
        Section::Chime => match key {
            "opening_us" => config.chime.opening_us = parse_array::<u32, CHIME_LEN>(value)?,
            "closing_us" => config.chime.closing_us = parse_array::<u32, CHIME_LEN>(value)?,
            "note_ms" => config.chime.note_ms = parse_int(value)?,
            _ => {}
        },
        Section::Input => match key {
            "debounce_ms" => config.input.debounce_ms = parse_int(value)?,
            "joystick_dead_zone" => config.input.dead_zone = parse_int(value)?,
            "joystick_invert_x" => config.input.invert_x = parse_bool(value)?,
            "joystick_invert_y" => config.input.invert_y = parse_bool(value)?,
            "joystick_sample_ms" => config.input.joystick_sample_ms = parse_int(value)?,
            _ => {}
        },
        Section::Display => match key {
            "sensor_refresh_ms" => config.display.sensor_refresh_ms = parse_int(value)?,
            "state_refresh_ms" => config.display.state_refresh_ms = parse_int(value)?,
            _ => {}
        },
    }
    Ok(())
}

/// Reject values the controller cannot run with
fn validate(config: &DoorConfig) -> Result<(), ParseError> {
    if config.password.code.iter().any(|&d| d > 9) {
        return Err(ParseError::InvalidValue);
    }
    if config.chime.opening_us.contains(&0) || config.chime.closing_us.contains(&0) {
        return Err(ParseError::InvalidValue);
    }
    if config.timing.run_window_ticks == 0 || config.timing.hold_window_ticks == 0 {
        return Err(ParseError::InvalidValue);
    }
    if config.motor.speed_percent > 100 {
        return Err(ParseError::InvalidValue);
    }
    if config.input.joystick_sample_ms == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(())
}
