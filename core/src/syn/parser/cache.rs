//! The function-body cache.
//!
//! Parsing the same source more than once is common: the engine first parses
//! an outer program and later re-parses an inner function when it is first
//! called. The cache remembers, keyed by the byte offset of a function body,
//! everything an outer parse learns about the body so a later parse can skip
//! straight over it.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::ast::{Features, Ident};
use crate::syn::token::Token;

/// Minimum body length, in bytes, before a block body is worth caching.
pub const BLOCK_BODY_CACHE_THRESHOLD: u32 = 16;
/// Minimum body length, in bytes, before an arrow expression body is worth
/// caching.
pub const ARROW_BODY_CACHE_THRESHOLD: u32 = 8;

/// Everything needed to replay a function body without re-parsing it.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CacheEntry {
	/// Offset one past the end of the body.
	pub body_end: u32,
	/// The final token of the body, restored as the last consumed token.
	pub end_token: Token,
	pub parameter_count: u32,
	pub strict: bool,
	pub captured: Vec<Ident>,
	pub features: Features,
	pub has_direct_super: bool,
	pub is_arrow_expression_body: bool,
}

/// A cache of function bodies for one source provider.
///
/// The cache is only valid for the source text it was built from and for the
/// interner used during that parse; entries are never invalidated within a
/// provider. Sharing a cache between threads requires external
/// synchronization.
#[derive(Debug, Default)]
pub struct FunctionCache {
	entries: HashMap<u32, CacheEntry, RandomState>,
}

impl FunctionCache {
	pub fn new() -> Self {
		FunctionCache {
			entries: HashMap::default(),
		}
	}

	/// Look up the body starting at the given offset.
	pub fn get(&self, body_start: u32) -> Option<&CacheEntry> {
		self.entries.get(&body_start)
	}

	/// Record a parsed body. The first entry for an offset wins; a body
	/// parsed twice is identical by construction.
	pub fn insert(&mut self, body_start: u32, entry: CacheEntry) {
		self.entries.entry(body_start).or_insert(entry);
	}

	pub fn contains(&self, body_start: u32) -> bool {
		self.entries.contains_key(&body_start)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
