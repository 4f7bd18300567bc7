//! Expression nodes.

use serde::{Deserialize, Serialize};

use crate::ast::{ClassInfo, FunctionInfo, Ident, Pattern};
use crate::syn::token::Span;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Expr {
	pub kind: ExprKind,
	pub span: Span,
}

impl Expr {
	pub fn new(kind: ExprKind, span: Span) -> Self {
		Expr {
			kind,
			span,
		}
	}

	/// Returns whether this expression is a plain object or array literal,
	/// which may be the start of an assignment pattern.
	pub fn is_object_or_array_literal(&self) -> bool {
		matches!(self.kind, ExprKind::Array(_) | ExprKind::Object(_))
	}

	/// Returns whether this expression is a valid assignment target.
	pub fn is_assignment_target(&self) -> bool {
		matches!(self.kind, ExprKind::Ident(_) | ExprKind::Member { .. })
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExprKind {
	This,
	Super,
	NewTarget,
	Ident(Ident),
	Null,
	Bool(bool),
	Number(f64),
	String(Ident),
	Regex {
		pattern: Ident,
		flags: Ident,
	},
	Template(Box<TemplateLiteral>),
	TaggedTemplate {
		tag: Box<Expr>,
		quasi: Box<TemplateLiteral>,
	},
	/// `None` entries are elisions.
	Array(Vec<Option<Expr>>),
	Object(Vec<Property>),
	Function(Box<FunctionInfo>),
	Arrow(Box<FunctionInfo>),
	Class(Box<ClassInfo>),
	Unary {
		op: UnaryOp,
		argument: Box<Expr>,
	},
	Update {
		op: UpdateOp,
		prefix: bool,
		argument: Box<Expr>,
	},
	Binary {
		op: BinaryOp,
		left: Box<Expr>,
		right: Box<Expr>,
	},
	Conditional {
		test: Box<Expr>,
		consequent: Box<Expr>,
		alternate: Box<Expr>,
	},
	Assign {
		op: AssignOp,
		target: Box<Expr>,
		value: Box<Expr>,
	},
	/// A destructuring assignment, `{x, y} = point`.
	AssignPattern {
		pattern: Box<Pattern>,
		value: Box<Expr>,
	},
	Sequence(Vec<Expr>),
	Call {
		callee: Box<Expr>,
		arguments: Vec<Expr>,
	},
	New {
		callee: Box<Expr>,
		/// `new a` has no argument list at all.
		arguments: Option<Vec<Expr>>,
	},
	Member {
		object: Box<Expr>,
		property: MemberKey,
	},
	Spread(Box<Expr>),
	Yield {
		delegate: bool,
		argument: Option<Box<Expr>>,
	},
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MemberKey {
	Dot(Ident),
	Bracket(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TemplateLiteral {
	pub quasis: Vec<TemplateElement>,
	pub expressions: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TemplateElement {
	pub cooked: Ident,
	pub raw: Ident,
	pub span: Span,
}

/// A property of an object literal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Property {
	pub key: PropertyKey,
	pub value: PropertyValue,
	pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PropertyKey {
	Ident(Ident),
	String(Ident),
	Number(f64),
	Computed(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PropertyValue {
	Init(Expr),
	Shorthand(Ident),
	Method(Box<FunctionInfo>),
	Getter(Box<FunctionInfo>),
	Setter(Box<FunctionInfo>),
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UnaryOp {
	/// `-`
	Minus,
	/// `+`
	Plus,
	/// `!`
	Not,
	/// `~`
	BitNot,
	TypeOf,
	Void,
	Delete,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UpdateOp {
	/// `++`
	Inc,
	/// `--`
	Dec,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BinaryOp {
	Add,
	Sub,
	Mul,
	Div,
	Rem,
	/// `==`
	Eq,
	/// `!=`
	NotEq,
	/// `===`
	StrictEq,
	/// `!==`
	StrictNotEq,
	Lt,
	Gt,
	LtEq,
	GtEq,
	Shl,
	Shr,
	UShr,
	BitAnd,
	BitOr,
	BitXor,
	/// `&&`
	And,
	/// `||`
	Or,
	In,
	InstanceOf,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AssignOp {
	/// `=`
	Assign,
	/// `+=`
	Add,
	/// `-=`
	Sub,
	/// `*=`
	Mul,
	/// `/=`
	Div,
	/// `%=`
	Rem,
	/// `<<=`
	Shl,
	/// `>>=`
	Shr,
	/// `>>>=`
	UShr,
	/// `&=`
	BitAnd,
	/// `|=`
	BitOr,
	/// `^=`
	BitXor,
}
