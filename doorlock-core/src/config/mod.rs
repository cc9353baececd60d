//! Configuration types and the `doorlock.toml` parser

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
