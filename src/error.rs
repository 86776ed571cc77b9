use std::path::PathBuf;

/// Library-level structured errors for subst.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps the fatal ones with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SubstError {
	#[error("cannot open {path}")]
	OpenFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot create {path}")]
	CreateFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot read {path}")]
	ReadFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot write {path}")]
	WriteFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot rename {from} to {to}")]
	RenameFailed {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot list directory {path}")]
	ListFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("{path}: symbolic links are not processed")]
	SymlinkRejected { path: PathBuf },

	#[error("{path}:{line}: malformed substitution: {text:?}")]
	MalformedDefinition {
		path: PathBuf,
		line: usize,
		text: String,
	},

	#[error("cannot copy permissions of {from} to {to}")]
	PermissionsFailed {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot back up {path} as {backup}")]
	BackupFailed {
		path: PathBuf,
		backup: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("cannot read config file {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot parse config file {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

impl SubstError {
	/// Render the error together with its chain of causes on one line.
	pub fn describe(&self) -> String {
		use std::error::Error;

		let mut message = self.to_string();
		let mut cause = self.source();
		while let Some(err) = cause {
			message.push_str(": ");
			message.push_str(&err.to_string());
			cause = err.source();
		}
		message
	}
}

/// Report a target-level failure on stderr.
pub fn report(err: &SubstError) {
	eprintln!("error: {}", err.describe());
}

/// Report a non-fatal problem on stderr.
pub fn warn(err: &SubstError) {
	eprintln!("warning: {}", err.describe());
}

/// Result type alias using SubstError.
pub type Result<T> = std::result::Result<T, SubstError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_describe_includes_cause() {
		let err = SubstError::OpenFailed {
			path: PathBuf::from("missing.java"),
			source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
		};
		assert_eq!(err.describe(), "cannot open missing.java: no such file");
	}

	#[test]
	fn test_describe_without_cause() {
		let err = SubstError::MalformedDefinition {
			path: PathBuf::from("names.subst"),
			line: 3,
			text: "onlyonefield".to_string(),
		};
		assert_eq!(
			err.describe(),
			"names.subst:3: malformed substitution: \"onlyonefield\""
		);
	}

	#[test]
	fn test_config_errors_use_cannot_wording() {
		let err = SubstError::ConfigReadError {
			path: PathBuf::from("subst.toml"),
			source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
		};
		assert_eq!(err.describe(), "cannot read config file subst.toml: denied");
	}
}
