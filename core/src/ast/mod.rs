//! The abstract syntax tree produced by the parser.
//!
//! Nodes are plainly owned; a parse result owns its whole tree and releases
//! it as one. Identifiers are handles into the [`Interner`] that was used for
//! the parse.

use bitflags::bitflags;

pub(crate) mod class;
pub(crate) mod expr;
pub(crate) mod function;
pub(crate) mod ident;
pub(crate) mod module;
pub(crate) mod pattern;
pub(crate) mod stmt;

pub use class::{ClassInfo, ClassMember, MethodKind};
pub use expr::{
	AssignOp, BinaryOp, Expr, ExprKind, MemberKey, Property, PropertyKey, PropertyValue,
	TemplateElement, TemplateLiteral, UnaryOp, UpdateOp,
};
pub use function::{
	ConstructorKind, FormalParameter, FunctionBody, FunctionInfo, FunctionKind,
};
pub use ident::{names, Ident, Interner};
pub use module::{ExportDecl, ExportDefault, ExportSpecifier, ImportDecl, ImportSpecifier};
pub use pattern::{ArrayPatternElement, ObjectPatternProperty, Pattern, PatternKind};
pub use stmt::{
	CatchClause, DeclKind, Declarator, ForHead, ForInit, Stmt, StmtKind, SwitchClause,
	VarDecl,
};

bitflags! {
	/// Source features the bytecode compiler wants to know about without
	/// walking the tree.
	#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
	pub struct Features: u16 {
		const STRICT_MODE = 1 << 0;
		/// A binding shadows `arguments`.
		const SHADOWS_ARGUMENTS = 1 << 1;
		/// A parameter is written to.
		const MODIFIED_PARAMETER = 1 << 2;
		/// `arguments` is written to.
		const MODIFIED_ARGUMENTS = 1 << 3;
		/// `eval` is referenced.
		const USES_EVAL = 1 << 4;
		/// A `with` statement occurs.
		const USES_WITH = 1 << 5;
		/// `arguments` is referenced.
		const USES_ARGUMENTS = 1 << 6;
		/// `this` is referenced.
		const USES_THIS = 1 << 7;
	}
}

mod features_serde {
	use super::Features;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	impl Serialize for Features {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			self.bits().serialize(serializer)
		}
	}

	impl<'de> Deserialize<'de> for Features {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			let bits = u16::deserialize(deserializer)?;
			Ok(Features::from_bits_truncate(bits))
		}
	}
}
