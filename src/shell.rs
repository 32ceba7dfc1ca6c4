//! Shell-command evaluation for SDEFINE directives.
//!
//! The reader never spawns processes directly; it goes through the
//! `CommandRunner` trait so parse-time logic can be exercised with a fake
//! runner in tests.

use std::process::{Command, Stdio};

/// Captured result of one shell-command evaluation.
#[derive(Debug, Clone)]
pub struct ShellOutput {
	/// Raw captured standard output.
	pub stdout: String,

	/// Process exit code, -1 if terminated by a signal.
	pub exit_code: i32,
}

/// Capability to run a command line and capture its standard output.
pub trait CommandRunner {
	fn run(&self, command: &str) -> std::io::Result<ShellOutput>;
}

/// Runs commands through `sh -c`.
///
/// Standard output is captured; standard error flows through to the
/// terminal. The evaluation blocks until the subprocess terminates.
#[derive(Debug, Default)]
pub struct SystemShell;

impl CommandRunner for SystemShell {
	fn run(&self, command: &str) -> std::io::Result<ShellOutput> {
		let child = Command::new("sh")
			.arg("-c")
			.arg(command)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::inherit())
			.spawn()?;

		let output = child.wait_with_output()?;

		Ok(ShellOutput {
			stdout: String::from_utf8_lossy(&output.stdout).to_string(),
			exit_code: output.status.code().unwrap_or(-1),
		})
	}
}
