use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use confmac::{Config, DumpFormat};

#[derive(Parser)]
#[command(name = "confmac")]
#[command(
	author,
	version,
	about = "Macro-expanding configuration file engine with shell-eval dump formats"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print all variables as eval-able assignments for a shell dialect
	Dump {
		/// Output dialect
		#[arg(long, value_enum, default_value_t = Format::Sh)]
		format: Format,

		/// Prefix for variable names (hash name for perl)
		#[arg(long, default_value = "")]
		prefix: String,

		/// Config files to load, in order
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Write the loaded variables back out in config-file syntax
	Write {
		/// Include doc comments and the included-files header
		#[arg(long)]
		docs: bool,

		/// Write to this file instead of stdout
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Config files to load, in order
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Print one variable's value
	Get {
		/// Value to print when the variable is not defined
		#[arg(long)]
		default: Option<String>,

		/// Variable name
		name: String,

		/// Config files to load, in order
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
}

/// CLI-facing dialect names for [`DumpFormat`].
#[derive(Clone, Copy, ValueEnum)]
enum Format {
	Sh,
	Csh,
	Matlab,
	Perl,
}

impl From<Format> for DumpFormat {
	fn from(format: Format) -> Self {
		match format {
			Format::Sh => DumpFormat::Sh,
			Format::Csh => DumpFormat::Csh,
			Format::Matlab => DumpFormat::Matlab,
			Format::Perl => DumpFormat::Perl,
		}
	}
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Dump {
			format,
			prefix,
			files,
		} => handle_dump(format, &prefix, &files),
		Commands::Write {
			docs,
			output,
			files,
		} => handle_write(docs, output.as_deref(), &files),
		Commands::Get {
			default,
			name,
			files,
		} => handle_get(&name, default.as_deref(), &files),
	}
}

fn handle_dump(format: Format, prefix: &str, files: &[PathBuf]) -> Result<ExitCode> {
	let config = Config::load(files).context("Failed to load configuration")?;

	let stdout = std::io::stdout();
	config
		.dump(&mut stdout.lock(), format.into(), prefix)
		.context("Failed to write dump")?;

	Ok(ExitCode::SUCCESS)
}

fn handle_write(docs: bool, output: Option<&std::path::Path>, files: &[PathBuf]) -> Result<ExitCode> {
	let config = Config::load(files).context("Failed to load configuration")?;

	match output {
		Some(path) => {
			config
				.write_to_path(path, docs)
				.with_context(|| format!("Failed to write {}", path.display()))?;
			println!("Wrote {}", path.display());
		}
		None => {
			let stdout = std::io::stdout();
			config
				.write(&mut stdout.lock(), docs)
				.context("Failed to write configuration")?;
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_get(name: &str, default: Option<&str>, files: &[PathBuf]) -> Result<ExitCode> {
	let config = Config::load(files).context("Failed to load configuration")?;

	match config.get(name).or(default) {
		Some(value) => {
			println!("{}", value);
			Ok(ExitCode::SUCCESS)
		}
		None => {
			eprintln!("error: variable '{}' is not defined", name);
			Ok(ExitCode::FAILURE)
		}
	}
}
