//! Environmental sensor implementations

pub mod dht22;

pub use dht22::{Dht22, Dht22Error, Measurement};
