//! Subst - CLI tool for mass literal-string substitution across source trees.
//!
//! This library provides the core functionality for subst, including:
//! - Loading `key|value` definition files into a substitution table
//! - Literal matching and line rewriting with the table
//! - In-place file rewriting with `@name` temp files and `name~` backups
//! - Directory traversal filtered by a wanted-name pattern
//!
//! # Example
//!
//! ```no_run
//! use subst_cli::fix::{DEFAULT_WANTED, FixOptions, Fixer, WantedPattern, fix_target};
//! use subst_cli::table::Substitutions;
//! use std::path::{Path, PathBuf};
//!
//! let substitutions = Substitutions::load(&[PathBuf::from("hssf.subst")]).unwrap();
//! let wanted = WantedPattern::new(DEFAULT_WANTED).unwrap();
//!
//! let mut fixer = Fixer::new(&substitutions, FixOptions::default(), std::io::stdout());
//! let status = fix_target(&mut fixer, &wanted, Path::new("src"));
//! println!("failed: {}", status.is_failed());
//! ```

pub mod config;
pub mod error;
pub mod fix;
pub mod table;

pub use error::{Result, SubstError};
