//! Macro expansion of `$name` / `${name}` references.
//!
//! Expansion is purely textual and eager: a value sees only the variables
//! already committed at the moment it is expanded. A literal dollar sign
//! is written `$$` in the input and decodes to a single `$`.

use crate::store::VarStore;
use regex::Regex;
use std::sync::LazyLock;

/// Recognized macro tokens: `$$`, `$name`, `${name}`.
static MACRO_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\$(?:(?P<escaped>\$)|(?P<named>[A-Za-z_][A-Za-z0-9_]*)|\{(?P<braced>[A-Za-z_][A-Za-z0-9_]*)\})")
		.expect("macro token pattern is valid")
});

/// Expansion failures, without file/line context.
///
/// The reader attaches the current cursor when mapping these onto
/// `ConfmacError`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
	#[error("undefined variable '{name}'")]
	Undefined { name: String },

	#[error("malformed macro reference")]
	Malformed,
}

/// Expand every macro reference in `input` against `vars`.
///
/// Fails with `Undefined` when a referenced name is absent and with
/// `Malformed` on any `$` that does not form a valid reference (a lone
/// trailing `$`, `$1`, `${}`, an unterminated `${`, ...).
pub fn expand(input: &str, vars: &VarStore) -> Result<String, ExpandError> {
	let mut out = String::with_capacity(input.len());
	let mut last = 0;

	for caps in MACRO_TOKEN.captures_iter(input) {
		let token = caps.get(0).expect("capture 0 always present");

		let gap = &input[last..token.start()];
		if gap.contains('$') {
			return Err(ExpandError::Malformed);
		}
		out.push_str(gap);

		if caps.name("escaped").is_some() {
			out.push('$');
		} else {
			let name = caps
				.name("named")
				.or_else(|| caps.name("braced"))
				.expect("token is escaped, named, or braced")
				.as_str();
			match vars.get(name) {
				Some(value) => out.push_str(value),
				None => {
					return Err(ExpandError::Undefined {
						name: name.to_string(),
					});
				}
			}
		}

		last = token.end();
	}

	let tail = &input[last..];
	if tail.contains('$') {
		return Err(ExpandError::Malformed);
	}
	out.push_str(tail);

	Ok(out)
}
