//! Recursive config-file reader.
//!
//! Reads one file line by line, classifying each line as blank, comment,
//! INCLUDE, SDEFINE, or plain assignment, and commits results into the
//! variable and doc stores. Includes recurse with their own line counter;
//! the caller's (file, line) cursor is restored when they return.

use crate::error::{ConfmacError, Result};
use crate::expand::{self, ExpandError};
use crate::shell::CommandRunner;
use crate::store::{DocEntry, DocStore, VarStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Line-oriented reader driving the stores for one load.
///
/// The only parse state carried across lines is the pending comment buffer
/// and a last-line-was-blank flag; everything else lives in the stores.
pub(crate) struct FileReader<'a> {
	vars: &'a mut VarStore,
	docs: &'a mut DocStore,
	included: &'a mut Vec<PathBuf>,
	runner: &'a dyn CommandRunner,

	/// Files currently being read, outermost first. Guards INCLUDE cycles.
	in_progress: Vec<PathBuf>,

	/// Cursor for error context: the file and line being processed.
	file: PathBuf,
	line: u64,
}

impl<'a> FileReader<'a> {
	pub fn new(
		vars: &'a mut VarStore,
		docs: &'a mut DocStore,
		included: &'a mut Vec<PathBuf>,
		runner: &'a dyn CommandRunner,
	) -> Self {
		FileReader {
			vars,
			docs,
			included,
			runner,
			in_progress: Vec::new(),
			file: PathBuf::new(),
			line: 0,
		}
	}

	/// Read variables and doc comments from `path`, recursing into includes.
	pub fn read_file(&mut self, path: &Path) -> Result<()> {
		if self.in_progress.iter().any(|p| p == path) {
			return Err(ConfmacError::IncludeCycle {
				path: path.to_path_buf(),
				file: self.file.clone(),
				line: self.line,
			});
		}

		self.included.push(path.to_path_buf());

		let content = std::fs::read_to_string(path).map_err(|source| ConfmacError::FileRead {
			path: path.to_path_buf(),
			source,
		})?;

		self.in_progress.push(path.to_path_buf());
		self.file = path.to_path_buf();
		self.line = 0;

		// Comment lines accumulate here until a definition consumes them.
		let mut comments: Vec<String> = Vec::new();
		let mut last_blank = false;

		for raw in content.lines() {
			self.line += 1;
			let line = raw.trim();

			if line.is_empty() {
				// A blank line starts a new comment block; the buffer is
				// cleared by the next comment line, not immediately.
				last_blank = true;
				continue;
			}

			if let Some(text) = line.strip_prefix('#') {
				if last_blank {
					comments.clear();
				}
				comments.push(text.trim().to_string());
				last_blank = false;
				continue;
			}

			last_blank = false;

			let Some((cmd, rest)) = split_directive(line) else {
				return Err(ConfmacError::InvalidLine {
					text: line.to_string(),
					file: path.to_path_buf(),
					line: self.line,
				});
			};

			match cmd {
				"INCLUDE" => {
					// INCLUDE consumes no doc comments.
					comments.clear();
					let target = self.expand(rest)?;
					let resolved = resolve_include(path, &target);
					info!(
						file = %resolved.display(),
						line = self.line,
						from = %path.display(),
						"including config file"
					);

					let saved_line = self.line;
					self.read_file(&resolved)?;
					self.line = saved_line;
					self.file = path.to_path_buf();
				}
				"SDEFINE" => {
					self.handle_sdefine(line, rest, &comments)?;
					comments.clear();
				}
				name => {
					if !self.vars.contains(name) {
						debug!(name, line = self.line, file = %path.display(), "defining variable");
						let value = self.expand(rest)?;
						self.vars.try_define(name, &value);
					}
					// A discarded duplicate still gets a doc entry.
					self.new_doc(name, &comments);
					comments.clear();
				}
			}
		}

		self.in_progress.pop();
		Ok(())
	}

	/// Handle `SDEFINE <name> <shellcmd>`.
	///
	/// The doc entry is recorded whether or not the command runs. When the
	/// name is already defined the shell command is never invoked.
	fn handle_sdefine(&mut self, text: &str, rest: &str, comments: &[String]) -> Result<()> {
		let Some((name, shellcmd)) = split_directive(rest) else {
			return Err(ConfmacError::InvalidSdefine {
				text: text.to_string(),
				file: self.file.clone(),
				line: self.line,
			});
		};

		self.new_doc(name, comments);

		if self.vars.contains(name) {
			return Ok(());
		}

		let command = self.expand(shellcmd)?;
		debug!(
			name,
			command = %command,
			line = self.line,
			file = %self.file.display(),
			"defining variable from shell command"
		);

		let output = self
			.runner
			.run(&command)
			.map_err(|source| ConfmacError::ShellSpawn {
				command: command.clone(),
				source,
			})?;

		if output.exit_code != 0 {
			warn!(
				command = %command,
				exit_code = output.exit_code,
				line = self.line,
				file = %self.file.display(),
				"shell command returned non-zero exit"
			);
		}

		self.vars.try_define(name, output.stdout.trim());
		Ok(())
	}

	/// Expand macros in `input`, attaching the current cursor to failures.
	fn expand(&self, input: &str) -> Result<String> {
		expand::expand(input, self.vars).map_err(|err| match err {
			ExpandError::Undefined { name } => ConfmacError::UndefinedVariable {
				input: input.to_string(),
				name,
				file: self.file.clone(),
				line: self.line,
			},
			ExpandError::Malformed => ConfmacError::MalformedMacro {
				input: input.to_string(),
				file: self.file.clone(),
				line: self.line,
			},
		})
	}

	fn new_doc(&mut self, name: &str, comments: &[String]) {
		let entry = DocEntry::new(&self.file, self.line, &comments.join("\n"));
		self.docs.add_entry(name, entry);
	}
}

/// Split a directive line into `(command, rest)` on the first whitespace
/// run. A line with no argument has no valid split.
fn split_directive(line: &str) -> Option<(&str, &str)> {
	let (cmd, rest) = line.split_once(char::is_whitespace)?;
	let rest = rest.trim();
	if rest.is_empty() { None } else { Some((cmd, rest)) }
}

/// Resolve an include target against the directory of the including file.
/// Absolute targets are used verbatim.
fn resolve_include(current: &Path, target: &str) -> PathBuf {
	let target = Path::new(target);
	if target.is_absolute() {
		return target.to_path_buf();
	}
	match current.parent() {
		Some(dir) => dir.join(target),
		None => target.to_path_buf(),
	}
}
