//! Module item nodes.

use serde::{Deserialize, Serialize};

use crate::ast::{ClassInfo, Expr, FunctionInfo, Ident, Stmt};
use crate::syn::token::Span;

/// An `import` declaration.
///
/// `import d, * as ns from "mod"` and `import d, {a as b} from "mod"` are
/// both covered; at most one of `namespace` and `named` is populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ImportDecl {
	pub default: Option<Ident>,
	pub namespace: Option<Ident>,
	pub named: Vec<ImportSpecifier>,
	/// The module specifier string.
	pub source: Ident,
	pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ImportSpecifier {
	/// The name exported by the requested module.
	pub imported: Ident,
	/// The binding created in this module.
	pub local: Ident,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExportDecl {
	/// `export * from "mod"`
	All {
		source: Ident,
	},
	/// `export default ...`
	Default(ExportDefault),
	/// `export {a, b as c}` and `export {a} from "mod"`
	Named {
		specifiers: Vec<ExportSpecifier>,
		source: Option<Ident>,
	},
	/// `export var/let/const/function/class ...`
	Local(Box<Stmt>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExportDefault {
	Function(Box<FunctionInfo>),
	Class(Box<ClassInfo>),
	Expr(Expr),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ExportSpecifier {
	/// The local binding being exported.
	pub local: Ident,
	/// The name under which it is exported.
	pub exported: Ident,
}
