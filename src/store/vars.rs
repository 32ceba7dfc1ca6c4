use std::collections::BTreeMap;

/// Ordered mapping from variable name to fully expanded string value.
///
/// Values are committed eagerly at definition time and are immutable for
/// the remainder of a load: `try_define` refuses to overwrite an existing
/// name. Only the explicit `set` operation may replace a value.
///
/// A `BTreeMap` keeps iteration in lexicographic name order, which is the
/// order every serializer output uses.
#[derive(Debug, Clone, Default)]
pub struct VarStore {
	vars: BTreeMap<String, String>,
}

impl VarStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up a variable's value.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.vars.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.vars.contains_key(name)
	}

	/// Explicitly set a variable, overwriting any existing value.
	pub fn set(&mut self, name: &str, value: &str) {
		self.vars.insert(name.to_string(), value.to_string());
	}

	/// Commit a value only if `name` is not already defined.
	///
	/// Returns whether the commit happened. This is the first-write-wins
	/// path used by plain assignments and SDEFINE.
	pub fn try_define(&mut self, name: &str, value: &str) -> bool {
		if self.vars.contains_key(name) {
			return false;
		}
		self.vars.insert(name.to_string(), value.to_string());
		true
	}

	/// Iterate `(name, value)` pairs in lexicographic name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_first_write_wins() {
		let mut vars = VarStore::new();
		assert!(vars.try_define("X", "a"));
		assert!(!vars.try_define("X", "b"));
		assert_eq!(vars.get("X"), Some("a"));
	}

	#[test]
	fn test_set_overwrites() {
		let mut vars = VarStore::new();
		assert!(vars.try_define("X", "a"));
		vars.set("X", "b");
		assert_eq!(vars.get("X"), Some("b"));
	}

	#[test]
	fn test_missing_variable() {
		let vars = VarStore::new();
		assert_eq!(vars.get("X"), None);
		assert!(!vars.contains("X"));
	}

	#[test]
	fn test_iteration_is_sorted() {
		let mut vars = VarStore::new();
		vars.try_define("zeta", "1");
		vars.try_define("alpha", "2");
		vars.try_define("mid", "3");
		let names: Vec<&str> = vars.iter().map(|(n, _)| n).collect();
		assert_eq!(names, vec!["alpha", "mid", "zeta"]);
	}
}
