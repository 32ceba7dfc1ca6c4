use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One captured documentation block for one definition attempt.
///
/// Built from the run of comment lines immediately preceding a definition;
/// `file` and `line` point at the definition itself, not the comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
	/// Config file the definition attempt appeared in.
	pub file: PathBuf,

	/// Line number of the definition attempt.
	pub line: u64,

	/// Joined comment text, trimmed. May be empty.
	pub comment: String,
}

impl DocEntry {
	pub fn new(file: &Path, line: u64, comment: &str) -> Self {
		DocEntry {
			file: file.to_path_buf(),
			line,
			comment: comment.trim().to_string(),
		}
	}
}

impl fmt::Display for DocEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"(Line {} of config file {})",
			self.line,
			self.file.display()
		)?;
		writeln!(f, "{}", self.comment)
	}
}

/// Mapping from variable name to its ordered list of doc entries.
///
/// New entries go to the front, so the list reads most-recent-definition-
/// attempt first. Every definition attempt for a name gets an entry, even
/// when first-write-wins discards the attempted value.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
	docs: HashMap<String, Vec<DocEntry>>,
}

impl DocStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Prepend a doc entry for `name`, creating its list if needed.
	pub fn add_entry(&mut self, name: &str, entry: DocEntry) {
		self.docs.entry(name.to_string()).or_default().insert(0, entry);
	}

	/// Ensure an (empty) doc list exists for `name`.
	pub fn ensure(&mut self, name: &str) {
		self.docs.entry(name.to_string()).or_default();
	}

	/// All entries for `name`, most recent definition attempt first.
	pub fn entries(&self, name: &str) -> &[DocEntry] {
		self.docs.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The concatenated display form of all entries with non-empty text,
	/// in stored order.
	pub fn doc_string(&self, name: &str) -> String {
		let mut ret = String::new();
		for entry in self.entries(name) {
			if !entry.comment.is_empty() {
				ret.push_str(&entry.to_string());
			}
		}
		ret
	}
}
