//! Statement nodes.

use serde::{Deserialize, Serialize};

use crate::ast::{
	ClassInfo, Expr, ExportDecl, FunctionInfo, Ident, ImportDecl, Pattern,
};
use crate::syn::token::Span;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Stmt {
	pub kind: StmtKind,
	pub span: Span,
}

impl Stmt {
	pub fn new(kind: StmtKind, span: Span) -> Self {
		Stmt {
			kind,
			span,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StmtKind {
	Block(Vec<Stmt>),
	Empty,
	Expr(Expr),
	If {
		test: Expr,
		consequent: Box<Stmt>,
		alternate: Option<Box<Stmt>>,
	},
	While {
		test: Expr,
		body: Box<Stmt>,
	},
	DoWhile {
		body: Box<Stmt>,
		test: Expr,
	},
	For {
		init: Option<ForInit>,
		test: Option<Expr>,
		update: Option<Expr>,
		body: Box<Stmt>,
	},
	ForIn {
		left: ForHead,
		right: Expr,
		body: Box<Stmt>,
	},
	ForOf {
		left: ForHead,
		right: Expr,
		body: Box<Stmt>,
	},
	Break(Option<Ident>),
	Continue(Option<Ident>),
	Return(Option<Expr>),
	Throw(Expr),
	Try {
		block: Vec<Stmt>,
		handler: Option<CatchClause>,
		finalizer: Option<Vec<Stmt>>,
	},
	Switch {
		discriminant: Expr,
		/// Clauses before `default`.
		cases: Vec<SwitchClause>,
		default: Option<Vec<Stmt>>,
		/// Clauses after `default`, kept separate so fall-through order is
		/// preserved.
		trailing_cases: Vec<SwitchClause>,
	},
	With {
		object: Expr,
		body: Box<Stmt>,
	},
	Debugger,
	Labeled {
		label: Ident,
		body: Box<Stmt>,
	},
	VarDecl(VarDecl),
	FunctionDecl(Box<FunctionInfo>),
	ClassDecl(Box<ClassInfo>),
	Import(ImportDecl),
	Export(ExportDecl),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ForInit {
	VarDecl(VarDecl),
	Expr(Expr),
}

/// The binding side of a `for-in`/`for-of` header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ForHead {
	VarDecl {
		kind: DeclKind,
		pattern: Pattern,
	},
	/// An assignment target, `for (a.b in x)`.
	Pattern(Pattern),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CatchClause {
	/// The catch parameter, a binding name or destructuring pattern.
	pub param: Pattern,
	pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SwitchClause {
	pub test: Expr,
	pub body: Vec<Stmt>,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeclKind {
	Var,
	Let,
	Const,
}

impl DeclKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			DeclKind::Var => "var",
			DeclKind::Let => "let",
			DeclKind::Const => "const",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct VarDecl {
	pub kind: DeclKind,
	pub declarations: Vec<Declarator>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Declarator {
	pub pattern: Pattern,
	pub init: Option<Expr>,
	pub span: Span,
}
