use crate::fix::{DEFAULT_WANTED, FixOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration from a TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Definition files loaded before any given on the command line.
	/// Relative paths are resolved against the config file's directory.
	#[serde(default)]
	pub substitutions: Vec<PathBuf>,

	/// Regex for file names picked up during directory traversal.
	#[serde(default)]
	pub wanted: Option<String>,
}

impl Config {
	/// Resolve relative definition file paths against `base`.
	pub fn resolve_paths(mut self, base: &Path) -> Self {
		for path in &mut self.substitutions {
			if path.is_relative() {
				*path = base.join(&*path);
			}
		}
		self
	}
}

/// Effective settings for a run, after merging the config file and the
/// command line.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Definition files in load order; later files override earlier ones.
	pub substitution_files: Vec<PathBuf>,

	/// Name filter for directory traversal.
	pub wanted: String,

	pub options: FixOptions,
}

impl Settings {
	/// Merge an optional config file with command-line values.
	///
	/// Command-line definition files load after the config's, and a
	/// command-line wanted pattern replaces the config's.
	pub fn merge(
		config: Option<Config>,
		cli_substitutions: Vec<PathBuf>,
		cli_wanted: Option<String>,
		options: FixOptions,
	) -> Self {
		let config = config.unwrap_or_default();

		let mut substitution_files = config.substitutions;
		substitution_files.extend(cli_substitutions);

		let wanted = cli_wanted
			.or(config.wanted)
			.unwrap_or_else(|| DEFAULT_WANTED.to_string());

		Settings {
			substitution_files,
			wanted,
			options,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_without_config() {
		let settings = Settings::merge(
			None,
			vec![PathBuf::from("a.subst")],
			None,
			FixOptions::default(),
		);
		assert_eq!(settings.substitution_files, vec![PathBuf::from("a.subst")]);
		assert_eq!(settings.wanted, DEFAULT_WANTED);
	}

	#[test]
	fn test_merge_cli_after_config() {
		let config = Config {
			substitutions: vec![PathBuf::from("/defs/base.subst")],
			wanted: Some(r"\.java$".to_string()),
		};
		let settings = Settings::merge(
			Some(config),
			vec![PathBuf::from("extra.subst")],
			Some(r"\.xml$".to_string()),
			FixOptions::default(),
		);
		assert_eq!(
			settings.substitution_files,
			vec![PathBuf::from("/defs/base.subst"), PathBuf::from("extra.subst")]
		);
		assert_eq!(settings.wanted, r"\.xml$");
	}

	#[test]
	fn test_config_wanted_used_when_cli_silent() {
		let config = Config {
			substitutions: vec![],
			wanted: Some(r"\.java$".to_string()),
		};
		let settings = Settings::merge(Some(config), vec![], None, FixOptions::default());
		assert_eq!(settings.wanted, r"\.java$");
	}

	#[test]
	fn test_resolve_paths() {
		let config = Config {
			substitutions: vec![PathBuf::from("names.subst"), PathBuf::from("/abs.subst")],
			wanted: None,
		}
		.resolve_paths(Path::new("/project"));
		assert_eq!(
			config.substitutions,
			vec![PathBuf::from("/project/names.subst"), PathBuf::from("/abs.subst")]
		);
	}
}
