//! Interned identifiers.

use ahash::RandomState;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// An interned identifier.
///
/// Identifiers compare by handle equality; two identifiers made from the same
/// text by the same [`Interner`] are the same identifier.
#[derive(
	Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Debug, Serialize, Deserialize,
)]
pub struct Ident(u32);

impl Ident {
	pub(crate) const fn from_raw(raw: u32) -> Self {
		Ident(raw)
	}

	pub fn to_raw(self) -> u32 {
		self.0
	}
}

macro_rules! well_known {
	($(($const_name:ident, $index:expr, $text:expr),)*) => {
		/// Identifiers the parser itself needs to recognize, interned at fixed
		/// handles by [`Interner::new`].
		pub mod names {
			use super::Ident;
			$(
				#[doc = concat!("`", $text, "`")]
				pub const $const_name: Ident = Ident::from_raw($index);
			)*
		}

		const WELL_KNOWN: &[&str] = &[$($text),*];
	};
}

well_known! {
	(USE_STRICT, 0, "use strict"),
	(ARGUMENTS, 1, "arguments"),
	(EVAL, 2, "eval"),
	(GET, 3, "get"),
	(SET, 4, "set"),
	(OF, 5, "of"),
	(AS, 6, "as"),
	(FROM, 7, "from"),
	(TARGET, 8, "target"),
	(PROTOTYPE, 9, "prototype"),
	(CONSTRUCTOR, 10, "constructor"),
	(STATIC, 11, "static"),
	(DEFAULT, 12, "default"),
	(NULL, 13, "null"),
	(PROTO, 14, "__proto__"),
	(STAR_DEFAULT, 15, "*default*"),
	(GENERATOR, 16, "@generator"),
	(GENERATOR_STATE, 17, "@generatorState"),
	(GENERATOR_VALUE, 18, "@generatorValue"),
	(GENERATOR_RESUME_MODE, 19, "@generatorResumeMode"),
}

/// An identifier interner.
///
/// Owns the text of every identifier handed out during a parse. The
/// well-known names in [`names`] are interned on construction so the parser
/// can compare tokens against them without lookups.
#[derive(Debug)]
pub struct Interner {
	lookup: HashMap<Box<str>, Ident, RandomState>,
	strings: Vec<Box<str>>,
}

impl Interner {
	pub fn new() -> Self {
		let mut interner = Interner {
			lookup: HashMap::default(),
			strings: Vec::new(),
		};
		for name in WELL_KNOWN {
			interner.intern(name);
		}
		interner
	}

	/// Intern a string, returning its handle. Interning the same text twice
	/// returns the same handle.
	pub fn intern(&mut self, text: &str) -> Ident {
		if let Some(x) = self.lookup.get(text) {
			return *x;
		}
		let id = Ident(self.strings.len() as u32);
		self.strings.push(text.into());
		self.lookup.insert(text.into(), id);
		id
	}

	/// Returns the text of an identifier.
	///
	/// # Panic
	/// Panics when given an identifier from another interner which is out of
	/// range for this one.
	pub fn resolve(&self, ident: Ident) -> &str {
		&self.strings[ident.0 as usize]
	}

	/// Returns the handle for the given text if it was interned before.
	pub fn get(&self, text: &str) -> Option<Ident> {
		self.lookup.get(text).copied()
	}

	pub fn len(&self) -> usize {
		self.strings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strings.is_empty()
	}
}

impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn intern_round_trip() {
		let mut interner = Interner::new();
		let a = interner.intern("foo");
		let b = interner.intern("bar");
		let c = interner.intern("foo");
		assert_eq!(a, c);
		assert_ne!(a, b);
		assert_eq!(interner.resolve(a), "foo");
		assert_eq!(interner.resolve(b), "bar");
	}

	#[test]
	fn well_known_names() {
		let mut interner = Interner::new();
		assert_eq!(interner.intern("use strict"), names::USE_STRICT);
		assert_eq!(interner.intern("arguments"), names::ARGUMENTS);
		assert_eq!(interner.intern("eval"), names::EVAL);
		assert_eq!(interner.intern("__proto__"), names::PROTO);
		assert_eq!(interner.intern("@generator"), names::GENERATOR);
		assert_eq!(interner.resolve(names::STAR_DEFAULT), "*default*");
	}
}
