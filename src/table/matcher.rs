use crate::error::{Result, SubstError};
use crate::table::loader::SubstitutionTable;
use regex::bytes::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Compiled size limit for the key alternation; large rename tables exceed
/// the regex crate's default.
const SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// A single key occurrence found in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMatch<'m> {
	/// Byte offset where the key starts.
	pub start: usize,

	/// Byte offset just past the end of the key.
	pub end: usize,

	/// The key that matched.
	pub key: &'m str,

	/// The value that replaces it.
	pub value: &'m str,
}

/// Finds the leftmost occurrence of any table key in a line.
///
/// Keys are escaped before compilation, so they always match literally.
/// When several keys start at the same leftmost position, the longest one
/// wins; keys of equal length are ordered lexicographically.
#[derive(Debug, Clone)]
pub struct Matcher {
	regex: Option<Regex>,
	entries: HashMap<Vec<u8>, (String, String)>,
}

impl Matcher {
	/// Compile the key set of `table` into one alternation.
	pub fn new(table: &SubstitutionTable) -> Result<Self> {
		let mut keys: Vec<&str> = table.iter().map(|(key, _)| key).collect();
		keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

		let entries = table
			.iter()
			.map(|(key, value)| {
				(
					key.as_bytes().to_vec(),
					(key.to_string(), value.to_string()),
				)
			})
			.collect();

		if keys.is_empty() {
			return Ok(Matcher {
				regex: None,
				entries,
			});
		}

		let pattern = keys
			.iter()
			.map(|key| regex::escape(key))
			.collect::<Vec<_>>()
			.join("|");

		let regex = RegexBuilder::new(&pattern)
			.size_limit(SIZE_LIMIT)
			.build()
			.map_err(|source| SubstError::InvalidPattern {
				pattern: format!("<alternation of {} keys>", keys.len()),
				source,
			})?;

		Ok(Matcher {
			regex: Some(regex),
			entries,
		})
	}

	/// Find the next key occurrence at or after `offset`.
	pub fn find_at(&self, line: &[u8], offset: usize) -> Option<KeyMatch<'_>> {
		let regex = self.regex.as_ref()?;
		let found = regex.find_at(line, offset)?;
		let (key, value) = self.entries.get(found.as_bytes())?;

		Some(KeyMatch {
			start: found.start(),
			end: found.end(),
			key: key.as_str(),
			value: value.as_str(),
		})
	}

	/// True when the table had no keys, so nothing can ever match.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
