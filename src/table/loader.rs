use crate::error::{Result, SubstError, warn};
use std::collections::BTreeMap;
use std::path::Path;

/// Key to value mapping loaded from one or more definition files.
///
/// Keys are unique and never empty. Loading a key that is already present
/// replaces its value, so later definition files override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
	entries: BTreeMap<String, String>,
}

impl SubstitutionTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or overwrite a single substitution. Empty keys are ignored.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		if !key.is_empty() {
			self.entries.insert(key, value.into());
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate over `(key, value)` pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Load a definition file, printing a warning for every malformed line.
	///
	/// Failing to read the file at all is an error; malformed lines are not.
	pub fn load_file(&mut self, path: &Path) -> Result<()> {
		let content = std::fs::read(path).map_err(|source| SubstError::OpenFailed {
			path: path.to_path_buf(),
			source,
		})?;

		for malformed in self.load_bytes(&content, path) {
			warn(&malformed);
		}

		Ok(())
	}

	/// Load definitions from a string (useful for testing).
	///
	/// Returns one `MalformedDefinition` per line that was skipped.
	pub fn load_str(&mut self, content: &str, path: &Path) -> Vec<SubstError> {
		self.load_bytes(content.as_bytes(), path)
	}

	/// Load definitions from raw file content.
	///
	/// Lines that are not valid UTF-8 are reported as malformed rather than
	/// decoded lossily, so a key never contains a replacement character.
	pub fn load_bytes(&mut self, content: &[u8], path: &Path) -> Vec<SubstError> {
		let mut malformed = Vec::new();

		for (index, raw) in content.split(|&byte| byte == b'\n').enumerate() {
			let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
			let bad_line = || SubstError::MalformedDefinition {
				path: path.to_path_buf(),
				line: index + 1,
				text: String::from_utf8_lossy(raw).into_owned(),
			};

			let Ok(text) = std::str::from_utf8(raw) else {
				malformed.push(bad_line());
				continue;
			};
			let effective = match text.find('#') {
				Some(pos) => &text[..pos],
				None => text,
			};
			if effective.trim().is_empty() {
				continue;
			}

			let fields: Vec<&str> = effective.split('|').collect();
			match fields.as_slice() {
				[key, value] if !key.is_empty() => self.insert(*key, *value),
				_ => malformed.push(bad_line()),
			}
		}

		malformed
	}
}
