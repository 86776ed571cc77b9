use crate::error::{Result, SubstError, report};
use crate::fix::{Fixer, Status};
use regex::Regex;
use std::ffi::OsStr;
use std::fs::{self, DirEntry};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Names picked up during directory traversal when no other pattern is given.
pub const DEFAULT_WANTED: &str = r"^[\w-]+\.(java|xml|xsd|xsl|xslt|html|htm|jsp|properties)$";

/// File name filter applied to entries discovered inside directories.
///
/// Paths given explicitly on the command line are never filtered.
#[derive(Debug, Clone)]
pub struct WantedPattern {
	regex: Regex,
}

impl WantedPattern {
	pub fn new(pattern: &str) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| SubstError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		})?;
		Ok(WantedPattern { regex })
	}

	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Check a bare file name. Names that are not valid UTF-8 never match.
	pub fn matches(&self, name: &OsStr) -> bool {
		name.to_str().is_some_and(|name| self.regex.is_match(name))
	}
}

/// Process one command-line target.
///
/// Directories are walked, regular files are rewritten directly and
/// symbolic links are rejected.
pub fn fix_target<W: Write>(
	fixer: &mut Fixer<'_, W>,
	wanted: &WantedPattern,
	path: &Path,
) -> Status {
	let metadata = match fs::symlink_metadata(path) {
		Ok(metadata) => metadata,
		Err(source) => {
			report(&SubstError::OpenFailed {
				path: path.to_path_buf(),
				source,
			});
			return Status::Failed;
		}
	};

	if metadata.file_type().is_symlink() {
		report(&SubstError::SymlinkRejected {
			path: path.to_path_buf(),
		});
		Status::Failed
	} else if metadata.is_dir() {
		fix_tree(fixer, wanted, path)
	} else {
		fix_one(fixer, path)
	}
}

/// Walk `dir`, rewriting every wanted file.
///
/// Files at one level are handled in name order before any subdirectory
/// is entered; subdirectories are then visited in the same order.
/// Symbolic links are skipped.
pub fn fix_tree<W: Write>(
	fixer: &mut Fixer<'_, W>,
	wanted: &WantedPattern,
	dir: &Path,
) -> Status {
	let entries = match list_dir(dir) {
		Ok(entries) => entries,
		Err(err) => {
			report(&err);
			return Status::Failed;
		}
	};

	let mut status = Status::Clean;
	let mut subdirs: Vec<PathBuf> = Vec::new();

	for entry in entries {
		let path = entry.path();
		let file_type = match entry.file_type() {
			Ok(file_type) => file_type,
			Err(source) => {
				report(&SubstError::ListFailed { path, source });
				status = Status::Failed;
				continue;
			}
		};

		if file_type.is_symlink() {
			continue;
		} else if file_type.is_dir() {
			subdirs.push(path);
		} else if file_type.is_file() && wanted.matches(&entry.file_name()) {
			status |= fix_one(fixer, &path);
		}
	}

	for subdir in subdirs {
		status |= fix_tree(fixer, wanted, &subdir);
	}

	status
}

fn fix_one<W: Write>(fixer: &mut Fixer<'_, W>, path: &Path) -> Status {
	match fixer.fix_file(path) {
		Ok(_) => Status::Clean,
		Err(err) => {
			report(&err);
			Status::Failed
		}
	}
}

/// Directory entries sorted by name.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
	let list_failed = |source: std::io::Error| SubstError::ListFailed {
		path: dir.to_path_buf(),
		source,
	};

	let mut entries = fs::read_dir(dir)
		.map_err(list_failed)?
		.collect::<std::io::Result<Vec<_>>>()
		.map_err(list_failed)?;
	entries.sort_by_key(|entry| entry.file_name());

	Ok(entries)
}
