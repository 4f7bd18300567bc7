//! Class records.

use serde::{Deserialize, Serialize};

use crate::ast::{Expr, FunctionInfo, Ident, PropertyKey};
use crate::syn::token::Span;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MethodKind {
	Method,
	Getter,
	Setter,
}

/// A single method of a class body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ClassMember {
	pub key: PropertyKey,
	pub kind: MethodKind,
	pub function: Box<FunctionInfo>,
	pub span: Span,
}

/// The output of parsing one class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ClassInfo {
	pub name: Option<Ident>,
	/// The `extends` expression, if any.
	pub parent: Option<Box<Expr>>,
	/// The `constructor` method. `None` means the default constructor is
	/// synthesized downstream.
	pub constructor: Option<Box<FunctionInfo>>,
	pub instance_members: Vec<ClassMember>,
	pub static_members: Vec<ClassMember>,
	pub span: Span,
}
