use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use subst_cli::config::{Settings, parse_config_file};
use subst_cli::fix::{FixOptions, Fixer, Status, WantedPattern, fix_target};
use subst_cli::table::Substitutions;

#[derive(Parser)]
#[command(name = "subst")]
#[command(
	author,
	version,
	about = "Mass literal-string substitution across source and markup trees"
)]
struct Cli {
	/// Definition file of `key|value` lines; may repeat, later files win
	#[arg(short = 's', long = "subst", value_name = "FILE")]
	substitutions: Vec<PathBuf>,

	/// Regex for file names picked up inside directories
	#[arg(short, long, value_name = "REGEX", value_parser = parse_wanted)]
	wanted: Option<String>,

	/// TOML config file with default definition files and wanted pattern
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Report changes without modifying any file
	#[arg(short = 'n', long)]
	dry_run: bool,

	/// Do not print the change transcript
	#[arg(short, long)]
	quiet: bool,

	/// Files or directories to rewrite
	#[arg(value_name = "PATH", required = true)]
	paths: Vec<PathBuf>,
}

fn parse_wanted(pattern: &str) -> std::result::Result<String, String> {
	WantedPattern::new(pattern)
		.map(|wanted| wanted.as_str().to_string())
		.map_err(|e| e.describe())
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	match run(cli) {
		Ok(status) => status.into(),
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<Status> {
	let config = cli
		.config
		.as_deref()
		.map(parse_config_file)
		.transpose()
		.context("Failed to load configuration")?;

	let options = FixOptions {
		dry_run: cli.dry_run,
		quiet: cli.quiet,
	};
	let settings = Settings::merge(config, cli.substitutions, cli.wanted, options);

	let substitutions = Substitutions::load(&settings.substitution_files)
		.context("Failed to load substitutions")?;
	let wanted = WantedPattern::new(&settings.wanted).context("Invalid wanted pattern")?;

	let mut fixer = Fixer::new(&substitutions, settings.options, io::stdout().lock());
	let mut status = Status::Clean;
	for path in &cli.paths {
		status |= fix_target(&mut fixer, &wanted, path);
	}

	Ok(status)
}
