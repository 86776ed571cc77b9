//! Configuration for subst.
//!
//! This module handles:
//! - TOML config file parsing
//! - Merging the config file with command-line options

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, Settings};
