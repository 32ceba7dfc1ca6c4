#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn confmac_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("confmac").unwrap()
}

fn write_conf(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	fs::write(&path, content).unwrap();
	path
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	confmac_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Macro-expanding configuration"));
}

#[test]
fn test_version_flag() {
	confmac_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("confmac"));
}

#[test]
fn test_no_args_shows_help() {
	// With arg_required_else_help, no args should show help
	confmac_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// dump subcommand tests
// ============================================================================

#[test]
fn test_dump_sh() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "njobs 4\ndata /scratch/x\n");

	confmac_cmd()
		.args(["dump", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout(predicate::str::contains("njobs='4'"))
		.stdout(predicate::str::contains("data='/scratch/x'"));
}

#[test]
fn test_dump_csh_with_prefix() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "njobs 4\n");

	confmac_cmd()
		.args([
			"dump",
			"--format",
			"csh",
			"--prefix",
			"cfg_",
			conf.to_str().unwrap(),
		])
		.assert()
		.success()
		.stdout(predicate::str::contains("set cfg_njobs='4'"));
}

#[test]
fn test_dump_perl_hash_name() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "njobs 4\n");

	confmac_cmd()
		.args([
			"dump",
			"--format",
			"perl",
			"--prefix",
			"opts",
			conf.to_str().unwrap(),
		])
		.assert()
		.success()
		.stdout(predicate::str::contains("$opts{'njobs'}='4';"));
}

#[test]
fn test_dump_expands_macros() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(
		temp_dir.path(),
		"a.conf",
		"base /data\nout ${base}/results\n",
	);

	confmac_cmd()
		.args(["dump", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout(predicate::str::contains("out='/data/results'"));
}

// ============================================================================
// get subcommand tests
// ============================================================================

#[test]
fn test_get_value() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "njobs 4\n");

	confmac_cmd()
		.args(["get", "njobs", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout("4\n");
}

#[test]
fn test_get_missing_uses_default() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "njobs 4\n");

	confmac_cmd()
		.args(["get", "--default", "8", "missing", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout("8\n");
}

#[test]
fn test_get_missing_without_default_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "njobs 4\n");

	confmac_cmd()
		.args(["get", "missing", conf.to_str().unwrap()])
		.assert()
		.failure()
		.stderr(predicate::str::contains("not defined"));
}

#[test]
fn test_get_first_write_wins_across_files() {
	let temp_dir = tempfile::tempdir().unwrap();
	let first = write_conf(temp_dir.path(), "first.conf", "X a\n");
	let second = write_conf(temp_dir.path(), "second.conf", "X b\nY c\n");

	confmac_cmd()
		.args([
			"get",
			"X",
			first.to_str().unwrap(),
			second.to_str().unwrap(),
		])
		.assert()
		.success()
		.stdout("a\n");
}

#[test]
fn test_get_through_include() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::create_dir(temp_dir.path().join("sub")).unwrap();
	write_conf(&temp_dir.path().join("sub"), "inc.conf", "inner yes\n");
	let top = write_conf(temp_dir.path(), "top.conf", "INCLUDE sub/inc.conf\n");

	confmac_cmd()
		.args(["get", "inner", top.to_str().unwrap()])
		.assert()
		.success()
		.stdout("yes\n");
}

// ============================================================================
// write subcommand tests
// ============================================================================

#[test]
fn test_write_to_stdout() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "b 2\na 1\n");

	confmac_cmd()
		.args(["write", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout("a 1\nb 2\n");
}

#[test]
fn test_write_with_docs_has_header() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "# worker count\nnjobs 4\n");

	confmac_cmd()
		.args(["write", "--docs", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout(predicate::str::contains("# Config file created on"))
		.stdout(predicate::str::contains("# Files included:"))
		.stdout(predicate::str::contains("# worker count"))
		.stdout(predicate::str::contains("njobs 4"));
}

#[test]
fn test_write_round_trips_dollar_values() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "price $$12.50\n");
	let out = temp_dir.path().join("out.conf");

	confmac_cmd()
		.args([
			"write",
			"--output",
			out.to_str().unwrap(),
			conf.to_str().unwrap(),
		])
		.assert()
		.success()
		.stdout(predicate::str::contains("Wrote"));

	// The written file re-reads to the identical value.
	confmac_cmd()
		.args(["get", "price", out.to_str().unwrap()])
		.assert()
		.success()
		.stdout("$12.50\n");
}

// ============================================================================
// SDEFINE tests (Unix only - these use the real shell)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_sdefine_runs_shell_command() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "SDEFINE greeting echo hello\n");

	confmac_cmd()
		.args(["get", "greeting", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout("hello\n");
}

#[cfg(unix)]
#[test]
fn test_sdefine_skipped_when_already_defined() {
	let temp_dir = tempfile::tempdir().unwrap();
	let marker = temp_dir.path().join("ran");
	let conf = write_conf(
		temp_dir.path(),
		"a.conf",
		&format!("X fixed\nSDEFINE X touch {}\n", marker.to_string_lossy()),
	);

	confmac_cmd()
		.args(["get", "X", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout("fixed\n");

	assert!(!marker.exists(), "shell command should not have run");
}

#[cfg(unix)]
#[test]
fn test_sdefine_nonzero_exit_is_not_fatal() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(
		temp_dir.path(),
		"a.conf",
		"SDEFINE v sh -c 'echo partial; exit 3'\nnext ok\n",
	);

	confmac_cmd()
		.args(["get", "v", conf.to_str().unwrap()])
		.assert()
		.success()
		.stdout("partial\n");
}

// ============================================================================
// Error reporting tests
// ============================================================================

#[test]
fn test_missing_file_fails() {
	confmac_cmd()
		.args(["dump", "/no/such/file.conf"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_invalid_line_names_file_and_line() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "ok 1\nlonely\n");

	confmac_cmd()
		.args(["dump", conf.to_str().unwrap()])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid line 'lonely' at line 2"));
}

#[test]
fn test_undefined_macro_names_file_and_line() {
	let temp_dir = tempfile::tempdir().unwrap();
	let conf = write_conf(temp_dir.path(), "a.conf", "X $UNSET\n");

	confmac_cmd()
		.args(["dump", conf.to_str().unwrap()])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Undefined variable 'UNSET'"))
		.stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_include_cycle_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_conf(temp_dir.path(), "b.conf", "INCLUDE a.conf\n");
	let top = write_conf(temp_dir.path(), "a.conf", "INCLUDE b.conf\n");

	confmac_cmd()
		.args(["dump", top.to_str().unwrap()])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Include cycle"));
}
