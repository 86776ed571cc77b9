use crate::config::types::Config;
use crate::error::{Result, SubstError};
use std::path::Path;

/// Parse a config file from the given path.
///
/// Relative definition file paths are resolved against the directory
/// holding the config file.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| SubstError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let config = parse_config_str(&content, path)?;
	let base = path.parent().unwrap_or_else(|| Path::new(""));
	Ok(config.resolve_paths(base))
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	toml::from_str(content).map_err(|source| SubstError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}
