//! Configuration loading
//!
//! `doorlock.toml` is compiled into the firmware and checked by `build.rs`.
//! Edit it and rebuild to change the lock's behavior.

use defmt::*;
use doorlock_core::config::{parse_config, DoorConfig};

/// Embedded configuration (compiled into firmware)
const EMBEDDED_CONFIG: &str = include_str!("../doorlock.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load() -> DoorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Configuration loaded: run {}s, hold {}s, motor {}%",
                config.timing.run_window_ticks,
                config.timing.hold_window_ticks,
                config.motor.speed_percent
            );
            config
        }
        Err(e) => {
            // Only reachable if build.rs and the parser disagree
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            DoorConfig::default()
        }
    }
}
