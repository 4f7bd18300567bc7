//! Function records.

use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Features, Ident, Pattern, Stmt};
use crate::syn::token::Span;

/// The syntactic flavour of a function.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FunctionKind {
	Normal,
	Arrow,
	Method,
	Getter,
	Setter,
	Generator,
}

/// Whether a function is a class constructor, and of which kind.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConstructorKind {
	#[default]
	None,
	/// The constructor of a class without an `extends` clause.
	Base,
	/// The constructor of a class with an `extends` clause; must call
	/// `super()`.
	Derived,
}

/// A single formal parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FormalParameter {
	pub pattern: Pattern,
	pub default: Option<Expr>,
	/// Whether this is the trailing `...rest` parameter.
	pub rest: bool,
}

/// The body of a parsed function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FunctionBody {
	Block(Vec<Stmt>),
	/// An arrow function whose body is a single expression; evaluated as an
	/// implicit return.
	Expr(Box<Expr>),
	/// The body was skipped because the function cache already holds its
	/// side information; only the spans below describe it.
	Cached,
}

/// The output of parsing one function.
///
/// Carries everything the bytecode compiler needs to know about the function
/// without re-reading its source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FunctionInfo {
	pub name: Option<Ident>,
	pub parameters: Vec<FormalParameter>,
	/// Number of declared parameters. Meaningful even when the body was
	/// replayed from the cache and `parameters` is empty.
	pub parameter_count: u32,
	pub body: FunctionBody,
	pub kind: FunctionKind,
	pub constructor_kind: ConstructorKind,
	pub is_strict: bool,
	/// Whether the body is an arrow expression body rather than a block.
	pub is_arrow_expression_body: bool,
	/// Whether the function body contains a direct `super()` call.
	pub has_direct_super: bool,
	/// Names used by this function but declared in an enclosing scope.
	pub captured: Vec<Ident>,
	pub features: Features,
	/// The whole function, from the start of its parameters or keyword to
	/// the end of its body.
	pub span: Span,
	/// The body only, including braces for block bodies.
	pub body_span: Span,
}
