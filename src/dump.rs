//! Serialization of a loaded [`Config`].
//!
//! Two families of output:
//! - the generic round-trip format (`name value`, optional doc comments),
//!   the only escaping being `$` doubled to `$$` so a re-read reproduces
//!   the original values exactly;
//! - eval-able dump forms for sh, csh, matlab, and perl, each with its
//!   own single-quote escaping rule and no doc comments.

use crate::config::Config;
use crate::error::{ConfmacError, Result};
use chrono::Local;
use std::io::Write;
use std::path::Path;

/// Target dialect for [`Config::dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
	/// Bourne shell: `name='value'`
	Sh,
	/// C shell: `set name='value'`
	Csh,
	/// Matlab: `name='value';`
	Matlab,
	/// Perl hash entries: `$hash{'name'}='value';`
	Perl,
}

impl Config {
	/// Write all variables in config-file syntax, lexicographic name order.
	///
	/// With `with_docs`, a header lists the creation time and every file
	/// the load opened, and each variable is preceded by its doc entries
	/// in stored order (most recent definition attempt first).
	pub fn write<W: Write>(&self, w: &mut W, with_docs: bool) -> std::io::Result<()> {
		if with_docs {
			writeln!(
				w,
				"# Config file created on {}",
				Local::now().format("%Y-%m-%d %H:%M:%S")
			)?;
			writeln!(w, "# Files included:")?;
			for file in self.included_files() {
				writeln!(w, "#  {}", file.display())?;
			}
			writeln!(w)?;
		}

		for (name, value) in self.vars().iter() {
			if with_docs {
				for entry in self.doc_entries(name) {
					writeln!(w, "# (From line {} of {})", entry.line, entry.file.display())?;
					for comment_line in entry.comment.split('\n') {
						writeln!(w, "# {}", comment_line)?;
					}
				}
			}
			writeln!(w, "{} {}", name, value.replace('$', "$$"))?;
			if with_docs {
				writeln!(w)?;
			}
		}

		Ok(())
	}

	/// Like [`Config::write`], into a newly created file at `path`.
	pub fn write_to_path(&self, path: &Path, with_docs: bool) -> Result<()> {
		let wrap = |source| ConfmacError::WriteFailed {
			path: path.to_path_buf(),
			source,
		};
		let mut file = std::fs::File::create(path).map_err(wrap)?;
		self.write(&mut file, with_docs).map_err(wrap)
	}

	/// Write eval-able assignments for `format`, lexicographic name order.
	///
	/// `prefix` is prepended to every variable name; for the perl form it
	/// is the hash name instead, defaulting to `config` when empty.
	pub fn dump<W: Write>(&self, w: &mut W, format: DumpFormat, prefix: &str) -> std::io::Result<()> {
		for (name, value) in self.vars().iter() {
			match format {
				DumpFormat::Sh => {
					writeln!(w, "{}{}='{}'", prefix, name, quote_sh(value))?;
				}
				DumpFormat::Csh => {
					writeln!(w, "set {}{}='{}'", prefix, name, quote_sh(value))?;
				}
				DumpFormat::Matlab => {
					writeln!(w, "{}{}='{}';", prefix, name, value.replace('\'', "''"))?;
				}
				DumpFormat::Perl => {
					let hash = if prefix.is_empty() { "config" } else { prefix };
					writeln!(w, "${}{{'{}'}}='{}';", hash, name, value.replace('\'', "\\'"))?;
				}
			}
		}
		Ok(())
	}
}

/// Quote a single quote for sh/csh: close, emit a double-quoted `'`, reopen.
fn quote_sh(value: &str) -> String {
	value.replace('\'', "'\"'\"'")
}
