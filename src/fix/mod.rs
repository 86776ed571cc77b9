//! In-place rewriting of files and directory trees.
//!
//! This module handles:
//! - Streaming a file through the substitution table
//! - Writing the rewritten copy, backup and final rename
//! - Walking directories for files worth rewriting

pub mod status;
pub mod walker;

pub use status::Status;
pub use walker::{DEFAULT_WANTED, WantedPattern, fix_target, fix_tree};

use crate::error::{Result, SubstError, warn};
use crate::table::Substitutions;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

/// Options that change how files are rewritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixOptions {
	/// Report changes but never create, rename or modify files.
	pub dry_run: bool,

	/// Suppress the change transcript.
	pub quiet: bool,
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
	/// No line matched; the file was not touched.
	Unchanged,

	/// At least one line changed.
	Rewritten { changed_lines: usize },
}

/// Per-file processing state.
enum Phase {
	/// Comparing lines only, nothing written yet.
	Scanning,

	/// Copying every line to the temp file. `temp` is `None` in dry-run mode.
	Rewriting { temp: Option<BufWriter<File>> },
}

/// Path of the temp file used while rewriting `path`.
pub fn temp_path(path: &Path) -> PathBuf {
	sibling(path, "@", "")
}

/// Path the original is moved to once `path` has been rewritten.
pub fn backup_path(path: &Path) -> PathBuf {
	sibling(path, "", "~")
}

fn sibling(path: &Path, prefix: &str, suffix: &str) -> PathBuf {
	let mut name = OsString::from(prefix);
	name.push(path.file_name().unwrap_or(path.as_os_str()));
	name.push(suffix);
	path.with_file_name(name)
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_end(line: &[u8]) -> &[u8] {
	let line = line.strip_suffix(b"\n").unwrap_or(line);
	line.strip_suffix(b"\r").unwrap_or(line)
}

/// Rewrites files in place with a fixed substitution table.
///
/// Changed lines are reported to `out` as a transcript:
///
/// ```text
/// src/Foo.java
/// 12:
/// < HSSFCell cell;
/// > Cell cell;
/// ```
pub struct Fixer<'a, W: Write> {
	substitutions: &'a Substitutions,
	options: FixOptions,
	out: W,
}

impl<'a, W: Write> Fixer<'a, W> {
	pub fn new(substitutions: &'a Substitutions, options: FixOptions, out: W) -> Self {
		Fixer {
			substitutions,
			options,
			out,
		}
	}

	/// Give back the transcript sink.
	pub fn into_inner(self) -> W {
		self.out
	}

	/// Rewrite a single file.
	///
	/// The file is only read until the first changed line. At that point the
	/// temp file is created and the input is rewound, so the temp file
	/// receives every line. Once the input is exhausted the original is moved
	/// to its `~` backup and the temp file takes its place.
	pub fn fix_file(&mut self, path: &Path) -> Result<FileOutcome> {
		let temp = temp_path(path);
		let mut phase = Phase::Scanning;

		let changed_lines = match self.copy_through(path, &temp, &mut phase) {
			Ok(count) => count,
			Err(err) => {
				if let Phase::Rewriting { temp: Some(writer) } = phase {
					drop(writer);
					let _ = fs::remove_file(&temp);
				}
				return Err(err);
			}
		};

		match phase {
			Phase::Scanning => Ok(FileOutcome::Unchanged),
			Phase::Rewriting { temp: None } => Ok(FileOutcome::Rewritten { changed_lines }),
			Phase::Rewriting {
				temp: Some(writer),
			} => {
				let flushed = writer.into_inner().map_err(|err| err.into_error());
				if let Err(source) = flushed.and_then(|file| file.sync_all()) {
					let _ = fs::remove_file(&temp);
					return Err(SubstError::WriteFailed { path: temp, source });
				}
				finalize(path, &temp)?;
				Ok(FileOutcome::Rewritten { changed_lines })
			}
		}
	}

	/// Read `path` line by line, switching `phase` to rewriting on the first
	/// change. Returns the number of changed lines.
	fn copy_through(&mut self, path: &Path, temp: &Path, phase: &mut Phase) -> Result<usize> {
		let file = File::open(path).map_err(|source| SubstError::OpenFailed {
			path: path.to_path_buf(),
			source,
		})?;
		let mut reader = BufReader::new(file);
		let read_failed = |source: io::Error| SubstError::ReadFailed {
			path: path.to_path_buf(),
			source,
		};

		let mut line = Vec::new();
		let mut line_no = 0;
		let mut changed_lines = 0;

		loop {
			line.clear();
			if reader.read_until(b'\n', &mut line).map_err(read_failed)? == 0 {
				break;
			}
			line_no += 1;

			let rewritten = self.substitutions.rewrite_line(&line);
			let changed = rewritten.as_ref() != line.as_slice();

			match phase {
				Phase::Scanning => {
					if changed {
						*phase = Phase::Rewriting {
							temp: self.create_temp(temp)?,
						};
						reader.rewind().map_err(read_failed)?;
						line_no = 0;
					}
				}
				Phase::Rewriting { temp: writer } => {
					if let Some(writer) = writer {
						writer
							.write_all(&rewritten)
							.map_err(|source| SubstError::WriteFailed {
								path: temp.to_path_buf(),
								source,
							})?;
					}
					if changed {
						changed_lines += 1;
						self.record_change(path, line_no, &line, &rewritten, changed_lines == 1)?;
					}
				}
			}
		}

		Ok(changed_lines)
	}

	fn create_temp(&self, temp: &Path) -> Result<Option<BufWriter<File>>> {
		if self.options.dry_run {
			return Ok(None);
		}
		// A stale temp file or link from an earlier run is replaced, never
		// written through.
		let _ = fs::remove_file(temp);
		let file = OpenOptions::new()
			.write(true)
			.create_new(true)
			.open(temp)
			.map_err(|source| SubstError::CreateFailed {
				path: temp.to_path_buf(),
				source,
			})?;
		Ok(Some(BufWriter::new(file)))
	}

	fn record_change(
		&mut self,
		path: &Path,
		line_no: usize,
		old: &[u8],
		new: &[u8],
		first: bool,
	) -> Result<()> {
		if self.options.quiet {
			return Ok(());
		}

		write_change(&mut self.out, path, line_no, old, new, first).map_err(|source| {
			SubstError::WriteFailed {
				path: PathBuf::from("<transcript>"),
				source,
			}
		})
	}
}

fn write_change<W: Write>(
	out: &mut W,
	path: &Path,
	line_no: usize,
	old: &[u8],
	new: &[u8],
	first: bool,
) -> io::Result<()> {
	if first {
		writeln!(out, "{}", path.display())?;
	}
	writeln!(out, "{line_no}:")?;
	out.write_all(b"< ")?;
	out.write_all(trim_line_end(old))?;
	out.write_all(b"\n> ")?;
	out.write_all(trim_line_end(new))?;
	out.write_all(b"\n")
}

/// Copy permissions, move the original to its backup and the temp file into
/// place. Only the last rename is fatal.
fn finalize(path: &Path, temp: &Path) -> Result<()> {
	let permissions = fs::metadata(path)
		.and_then(|meta| fs::set_permissions(temp, meta.permissions()));
	if let Err(source) = permissions {
		warn(&SubstError::PermissionsFailed {
			from: path.to_path_buf(),
			to: temp.to_path_buf(),
			source,
		});
	}

	let backup = backup_path(path);
	if let Err(source) = fs::rename(path, &backup) {
		warn(&SubstError::BackupFailed {
			path: path.to_path_buf(),
			backup,
			source,
		});
	}

	fs::rename(temp, path).map_err(|source| SubstError::RenameFailed {
		from: temp.to_path_buf(),
		to: path.to_path_buf(),
		source,
	})
}
