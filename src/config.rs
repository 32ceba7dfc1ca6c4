//! The `Config` façade.
//!
//! Owns one variable store and one doc store, loads them from a list of
//! top-level config files, and exposes the get/set/doc operations. The
//! serializer methods live in [`crate::dump`].

use crate::error::Result;
use crate::reader::FileReader;
use crate::shell::{CommandRunner, SystemShell};
use crate::store::{DocEntry, DocStore, VarStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// A fully loaded set of config variables and their documentation.
///
/// Loading is all-or-nothing: any parse, macro, file, or spawn error
/// aborts the whole load and no `Config` is produced.
#[derive(Debug, Clone)]
pub struct Config {
	vars: VarStore,
	docs: DocStore,
	top_files: Vec<PathBuf>,
	included_files: Vec<PathBuf>,
}

impl Config {
	/// Load `files` in order, running SDEFINE commands through `sh`.
	pub fn load<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
		Self::load_with(files, &SystemShell)
	}

	/// Load `files` in order with an injected command runner.
	///
	/// Lets tests (or embedders that forbid subprocesses) supply a fake
	/// runner for SDEFINE evaluation.
	pub fn load_with<P: AsRef<Path>>(files: &[P], runner: &dyn CommandRunner) -> Result<Self> {
		let top_files: Vec<PathBuf> = files.iter().map(|p| p.as_ref().to_path_buf()).collect();
		let mut vars = VarStore::new();
		let mut docs = DocStore::new();
		let mut included_files = Vec::new();

		let mut reader = FileReader::new(&mut vars, &mut docs, &mut included_files, runner);
		for file in &top_files {
			info!(file = %file.display(), "reading config file");
			reader.read_file(file)?;
		}

		Ok(Config {
			vars,
			docs,
			top_files,
			included_files,
		})
	}

	/// A variable's value, or `None` if it was never defined.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.vars.get(name)
	}

	/// A variable's value, or `default` if it was never defined.
	pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
		self.vars.get(name).unwrap_or(default)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.vars.contains(name)
	}

	/// Explicitly override a variable's value.
	///
	/// This is the only way to change a committed value; it also ensures
	/// the variable has a (possibly empty) doc list.
	pub fn set(&mut self, name: &str, value: &str) {
		self.vars.set(name, value);
		self.docs.ensure(name);
	}

	/// Attach a doc entry to `name` from outside any config file.
	///
	/// Unknown names are reserved with an empty value, so a later file
	/// definition of the same name is treated as a duplicate.
	pub fn add_doc(&mut self, name: &str, text: &str, file: &Path, line: u64) {
		self.docs.add_entry(name, DocEntry::new(file, line, text));
		if !self.vars.contains(name) {
			self.vars.try_define(name, "");
		}
	}

	/// Doc entries for `name`, most recent definition attempt first.
	pub fn doc_entries(&self, name: &str) -> &[DocEntry] {
		self.docs.entries(name)
	}

	/// The concatenated display form of `name`'s non-empty doc entries.
	pub fn doc_string(&self, name: &str) -> String {
		self.docs.doc_string(name)
	}

	pub fn vars(&self) -> &VarStore {
		&self.vars
	}

	/// The top-level files this config was loaded from, as given.
	pub fn top_files(&self) -> &[PathBuf] {
		&self.top_files
	}

	/// Every file opened during the load, in open order, duplicates kept.
	pub fn included_files(&self) -> &[PathBuf] {
		&self.included_files
	}
}
