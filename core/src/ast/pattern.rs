//! Destructuring patterns.

use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Ident, PropertyKey};
use crate::syn::token::Span;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Pattern {
	pub kind: PatternKind,
	pub span: Span,
}

impl Pattern {
	pub fn new(kind: PatternKind, span: Span) -> Self {
		Pattern {
			kind,
			span,
		}
	}

	/// Returns whether this pattern is a single binding name.
	pub fn is_simple_binding(&self) -> bool {
		matches!(self.kind, PatternKind::Ident(_))
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PatternKind {
	/// A single binding name.
	Ident(Ident),
	Array {
		/// `None` entries are elisions.
		elements: Vec<Option<ArrayPatternElement>>,
		rest: Option<Box<Pattern>>,
	},
	Object {
		properties: Vec<ObjectPatternProperty>,
		rest: Option<Box<Pattern>>,
	},
	/// An assignment target in expression destructuring, `[a.b] = c`.
	Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ArrayPatternElement {
	pub pattern: Pattern,
	pub default: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ObjectPatternProperty {
	pub key: PropertyKey,
	pub pattern: Pattern,
	pub default: Option<Expr>,
	/// `{x}` rather than `{x: x}`.
	pub shorthand: bool,
}
