//! Substitution tables for subst.
//!
//! This module handles:
//! - Loading `key|value` definition files
//! - Compiling the key set into a literal matcher
//! - Rewriting lines with the compiled table

pub mod loader;
pub mod matcher;
pub mod rewriter;

pub use loader::SubstitutionTable;
pub use matcher::{KeyMatch, Matcher};
pub use rewriter::rewrite_line;

use crate::error::Result;
use std::borrow::Cow;
use std::path::PathBuf;

/// An immutable substitution table together with its compiled matcher.
///
/// Built once at startup and shared by reference with everything that
/// rewrites files.
#[derive(Debug, Clone)]
pub struct Substitutions {
	table: SubstitutionTable,
	matcher: Matcher,
}

impl Substitutions {
	/// Compile a fully loaded table.
	pub fn new(table: SubstitutionTable) -> Result<Self> {
		let matcher = Matcher::new(&table)?;
		Ok(Substitutions { table, matcher })
	}

	/// Load every definition file in order, then compile the result.
	///
	/// Later files override keys from earlier ones.
	pub fn load(paths: &[PathBuf]) -> Result<Self> {
		let mut table = SubstitutionTable::new();
		for path in paths {
			table.load_file(path)?;
		}
		Self::new(table)
	}

	pub fn table(&self) -> &SubstitutionTable {
		&self.table
	}

	pub fn matcher(&self) -> &Matcher {
		&self.matcher
	}

	/// Rewrite one line with this table.
	pub fn rewrite_line<'l>(&self, line: &'l [u8]) -> Cow<'l, [u8]> {
		rewrite_line(&self.matcher, line)
	}
}
