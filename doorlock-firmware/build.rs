//! Build script for doorlock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates doorlock.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const CODE_LEN: usize = 4;
const CHIME_LEN: usize = 4;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate doorlock.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=doorlock.toml");

    let config_path = Path::new("doorlock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: doorlock.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a doorlock.toml configuration file.         ║\n\
            ║  Please create one in the doorlock-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read doorlock.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in doorlock.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_password(&config, &mut errors);
    validate_door(&config, &mut errors);
    validate_motor(&config, &mut errors);
    validate_chime(&config, &mut errors);
    validate_input(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid doorlock.toml configuration                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=doorlock.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The firmware parser rejects unknown sections, so catch them here first
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    const KNOWN: [&str; 6] = ["password", "door", "motor", "chime", "input", "display"];

    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !KNOWN.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Check an integer field lies in `min..=max` when present
fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Check an integer array has exactly `len` entries in `min..=max`
fn check_array(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    len: usize,
    (min, max): (i64, i64),
    errors: &mut Vec<String>,
) {
    let Some(value) = table.get(key) else {
        return;
    };
    let Some(items) = value.as_array() else {
        errors.push(format!("[{}] {} must be an array", section, key));
        return;
    };
    if items.len() != len {
        errors.push(format!(
            "[{}] {} must have exactly {} entries",
            section, key, len
        ));
    }
    for item in items {
        match item.as_integer() {
            Some(v) if (min..=max).contains(&v) => {}
            _ => {
                errors.push(format!(
                    "[{}] {} entries must be integers {}-{}",
                    section, key, min, max
                ));
                break;
            }
        }
    }
}

fn validate_password(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(password) = section(config, "password") else {
        return;
    };
    check_array(password, "password", "code", CODE_LEN, (0, 9), errors);
    check_range(password, "password", "edit_interval_ms", 0, u32::MAX as i64, errors);
}

fn validate_door(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(door) = section(config, "door") else {
        return;
    };
    check_range(door, "door", "run_window_s", 1, u16::MAX as i64, errors);
    check_range(door, "door", "hold_window_s", 1, u16::MAX as i64, errors);
}

fn validate_motor(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(motor) = section(config, "motor") else {
        return;
    };
    check_range(motor, "motor", "speed_percent", 0, 100, errors);
}

fn validate_chime(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(chime) = section(config, "chime") else {
        return;
    };
    let periods = (1, u32::MAX as i64);
    check_array(chime, "chime", "opening_us", CHIME_LEN, periods, errors);
    check_array(chime, "chime", "closing_us", CHIME_LEN, periods, errors);
    check_range(chime, "chime", "note_ms", 0, u32::MAX as i64, errors);
}

fn validate_input(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(input) = section(config, "input") else {
        return;
    };
    check_range(input, "input", "joystick_dead_zone", 0, 4095, errors);
    check_range(input, "input", "joystick_sample_ms", 1, u32::MAX as i64, errors);
}
