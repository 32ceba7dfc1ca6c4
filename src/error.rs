use std::path::PathBuf;

/// Library-level structured errors for confmac.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
///
/// Every error raised while reading a config file carries the file and line
/// of the directive that triggered it. Any of these errors aborts the entire
/// load; a `Config` is never observable in a partially loaded state.
#[derive(Debug, thiserror::Error)]
pub enum ConfmacError {
	#[error("Undefined variable '{name}' in '{input}' at line {line} of config file {file}")]
	UndefinedVariable {
		input: String,
		name: String,
		file: PathBuf,
		line: u64,
	},

	#[error("Malformed macro reference in '{input}' at line {line} of config file {file}")]
	MalformedMacro {
		input: String,
		file: PathBuf,
		line: u64,
	},

	#[error("Invalid line '{text}' at line {line} in config file {file}")]
	InvalidLine {
		text: String,
		file: PathBuf,
		line: u64,
	},

	#[error("Invalid SDEFINE '{text}' at line {line} in config file {file}")]
	InvalidSdefine {
		text: String,
		file: PathBuf,
		line: u64,
	},

	#[error("Include cycle: {path} is already being read (included at line {line} of {file})")]
	IncludeCycle {
		path: PathBuf,
		file: PathBuf,
		line: u64,
	},

	#[error("Failed to read config file: {path}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to run shell command: {command}")]
	ShellSpawn {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write config file: {path}")]
	WriteFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using ConfmacError.
pub type Result<T> = std::result::Result<T, ConfmacError>;
