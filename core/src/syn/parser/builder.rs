//! The tree-builder contract.
//!
//! The grammar is written once, against [`TreeBuild`]. The [`AstBuilder`]
//! constructs real AST nodes; the [`SyntaxChecker`] validates only,
//! producing zero-sized stand-ins, which is what speculative probes and the
//! `check_*` entry points run with. Both builders must agree on the
//! error/no-error verdict for every source.

use std::fmt::Debug;

use crate::ast::{
	self, AssignOp, BinaryOp, ConstructorKind, DeclKind, ExportSpecifier, Features,
	FunctionKind, Ident, ImportDecl, MethodKind, TemplateElement, UnaryOp, UpdateOp,
};
use crate::syn::token::Span;

/// What the parser needs to know about an already-built expression to steer
/// grammar decisions, independent of the builder.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub enum ExprHint {
	ObjectLiteral,
	ArrayLiteral,
	/// A plain identifier reference.
	Ident(Ident),
	/// A member access, a valid assignment target.
	Member,
	Other,
}

impl ExprHint {
	/// Returns whether the expression may be assigned to.
	pub fn is_assignment_target(&self) -> bool {
		matches!(self, ExprHint::Ident(_) | ExprHint::Member)
	}

	/// Returns whether the expression is a plain object or array literal
	/// that could be re-parsed as an assignment pattern.
	pub fn is_object_or_array_literal(&self) -> bool {
		matches!(self, ExprHint::ObjectLiteral | ExprHint::ArrayLiteral)
	}
}

/// A property key, before the builder has seen it.
#[derive(Clone, Debug)]
pub enum PropKey<E> {
	Ident(Ident),
	String(Ident),
	Number(f64),
	Computed(E),
}

impl<E> PropKey<E> {
	/// The key's name when it is statically known.
	pub fn static_name(&self) -> Option<Ident> {
		match self {
			PropKey::Ident(x) | PropKey::String(x) => Some(*x),
			_ => None,
		}
	}
}

#[derive(Clone, Debug)]
pub enum PropValue<E, F> {
	Init(E),
	Shorthand(Ident),
	Method(F),
	Getter(F),
	Setter(F),
}

#[derive(Clone, Debug)]
pub struct PropertyParts<E, F> {
	pub key: PropKey<E>,
	pub value: PropValue<E, F>,
	pub span: Span,
}

#[derive(Clone, Debug)]
pub struct FormalParam<P, E> {
	pub pattern: P,
	pub default: Option<E>,
	pub rest: bool,
}

/// A function body as handed to the builder.
#[derive(Clone, Debug)]
pub enum FnBody<S, E> {
	Block(Vec<S>),
	Expr(E),
	/// Replayed from the function cache; nothing was built.
	Cached,
}

#[derive(Clone, Debug)]
pub struct DeclaratorParts<P, E> {
	pub pattern: P,
	pub init: Option<E>,
	pub span: Span,
}

#[derive(Clone, Debug)]
pub enum ForInitParts<D, E> {
	VarDecl(D),
	Expr(E),
}

#[derive(Clone, Debug)]
pub enum ForHeadParts<P> {
	Decl {
		kind: DeclKind,
		pattern: P,
	},
	Pattern(P),
}

#[derive(Clone, Debug)]
pub struct ObjectPatternProp<P, E> {
	pub key: PropKey<E>,
	pub pattern: P,
	pub default: Option<E>,
	pub shorthand: bool,
}

#[derive(Clone, Debug)]
pub struct ClassMemberParts<E, F> {
	pub key: PropKey<E>,
	pub kind: MethodKind,
	pub function: F,
	pub span: Span,
}

#[derive(Clone, Debug)]
pub struct SwitchClauseParts<E, S> {
	pub test: E,
	pub body: Vec<S>,
}

#[derive(Clone, Debug)]
pub struct CatchParts<P, S> {
	pub param: P,
	pub body: Vec<S>,
}

/// The concrete side record of a function parse; always produced, whichever
/// builder is active, because the cache and the compiler side-tables need
/// it.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct FunctionMeta {
	pub name: Option<Ident>,
	pub parameter_count: u32,
	pub kind: FunctionKind,
	pub constructor_kind: ConstructorKind,
	pub is_strict: bool,
	pub is_arrow_expression_body: bool,
	pub has_direct_super: bool,
	pub captured: Vec<Ident>,
	pub features: Features,
	pub span: Span,
	pub body_span: Span,
}

/// The operations the parser requires of a tree builder.
pub trait TreeBuild {
	/// Whether this builder constructs AST nodes. When false the parser may
	/// elide construction work.
	const CREATES_AST: bool;
	/// Whether the parser may consult and populate the function-body cache
	/// while running this builder.
	const CAN_USE_FUNCTION_CACHE: bool;

	type Expr: Debug;
	type Stmt: Debug;
	type Pattern: Debug;
	type Function: Debug;
	type Class: Debug;
	type VarDecl: Debug;

	fn hint(expr: &Self::Expr) -> ExprHint;

	fn this_expr(&mut self, span: Span) -> Self::Expr;
	fn super_expr(&mut self, span: Span) -> Self::Expr;
	fn new_target_expr(&mut self, span: Span) -> Self::Expr;
	fn ident_expr(&mut self, name: Ident, span: Span) -> Self::Expr;
	fn null_expr(&mut self, span: Span) -> Self::Expr;
	fn bool_expr(&mut self, value: bool, span: Span) -> Self::Expr;
	fn number_expr(&mut self, value: f64, span: Span) -> Self::Expr;
	fn string_expr(&mut self, value: Ident, span: Span) -> Self::Expr;
	fn regex_expr(&mut self, pattern: Ident, flags: Ident, span: Span) -> Self::Expr;
	fn template_expr(
		&mut self,
		quasis: Vec<TemplateElement>,
		expressions: Vec<Self::Expr>,
		span: Span,
	) -> Self::Expr;
	fn tagged_template_expr(
		&mut self,
		tag: Self::Expr,
		quasis: Vec<TemplateElement>,
		expressions: Vec<Self::Expr>,
		span: Span,
	) -> Self::Expr;
	fn array_expr(&mut self, elements: Vec<Option<Self::Expr>>, span: Span) -> Self::Expr;
	fn object_expr(
		&mut self,
		properties: Vec<PropertyParts<Self::Expr, Self::Function>>,
		span: Span,
	) -> Self::Expr;
	fn function_expr(&mut self, function: Self::Function, span: Span) -> Self::Expr;
	fn arrow_expr(&mut self, function: Self::Function, span: Span) -> Self::Expr;
	fn class_expr(&mut self, class: Self::Class, span: Span) -> Self::Expr;
	fn unary_expr(&mut self, op: UnaryOp, argument: Self::Expr, span: Span) -> Self::Expr;
	fn update_expr(
		&mut self,
		op: UpdateOp,
		prefix: bool,
		argument: Self::Expr,
		span: Span,
	) -> Self::Expr;
	fn binary_expr(
		&mut self,
		op: BinaryOp,
		left: Self::Expr,
		right: Self::Expr,
		span: Span,
	) -> Self::Expr;
	fn conditional_expr(
		&mut self,
		test: Self::Expr,
		consequent: Self::Expr,
		alternate: Self::Expr,
		span: Span,
	) -> Self::Expr;
	fn assign_expr(
		&mut self,
		op: AssignOp,
		target: Self::Expr,
		value: Self::Expr,
		span: Span,
	) -> Self::Expr;
	fn assign_pattern_expr(
		&mut self,
		pattern: Self::Pattern,
		value: Self::Expr,
		span: Span,
	) -> Self::Expr;
	fn sequence_expr(&mut self, expressions: Vec<Self::Expr>, span: Span) -> Self::Expr;
	fn call_expr(
		&mut self,
		callee: Self::Expr,
		arguments: Vec<Self::Expr>,
		span: Span,
	) -> Self::Expr;
	fn new_expr(
		&mut self,
		callee: Self::Expr,
		arguments: Option<Vec<Self::Expr>>,
		span: Span,
	) -> Self::Expr;
	fn member_dot_expr(&mut self, object: Self::Expr, property: Ident, span: Span)
		-> Self::Expr;
	fn member_bracket_expr(
		&mut self,
		object: Self::Expr,
		property: Self::Expr,
		span: Span,
	) -> Self::Expr;
	fn spread_expr(&mut self, argument: Self::Expr, span: Span) -> Self::Expr;
	fn yield_expr(
		&mut self,
		delegate: bool,
		argument: Option<Self::Expr>,
		span: Span,
	) -> Self::Expr;

	fn ident_pattern(&mut self, name: Ident, span: Span) -> Self::Pattern;
	fn array_pattern(
		&mut self,
		elements: Vec<Option<(Self::Pattern, Option<Self::Expr>)>>,
		rest: Option<Self::Pattern>,
		span: Span,
	) -> Self::Pattern;
	fn object_pattern(
		&mut self,
		properties: Vec<ObjectPatternProp<Self::Pattern, Self::Expr>>,
		rest: Option<Self::Pattern>,
		span: Span,
	) -> Self::Pattern;
	fn expr_pattern(&mut self, expr: Self::Expr, span: Span) -> Self::Pattern;

	fn function(
		&mut self,
		meta: FunctionMeta,
		parameters: Vec<FormalParam<Self::Pattern, Self::Expr>>,
		body: FnBody<Self::Stmt, Self::Expr>,
	) -> Self::Function;
	#[allow(clippy::too_many_arguments)]
	fn class(
		&mut self,
		name: Option<Ident>,
		parent: Option<Self::Expr>,
		constructor: Option<Self::Function>,
		instance_members: Vec<ClassMemberParts<Self::Expr, Self::Function>>,
		static_members: Vec<ClassMemberParts<Self::Expr, Self::Function>>,
		span: Span,
	) -> Self::Class;

	fn block_stmt(&mut self, elements: Vec<Self::Stmt>, span: Span) -> Self::Stmt;
	fn empty_stmt(&mut self, span: Span) -> Self::Stmt;
	fn expr_stmt(&mut self, expr: Self::Expr, span: Span) -> Self::Stmt;
	fn if_stmt(
		&mut self,
		test: Self::Expr,
		consequent: Self::Stmt,
		alternate: Option<Self::Stmt>,
		span: Span,
	) -> Self::Stmt;
	fn while_stmt(&mut self, test: Self::Expr, body: Self::Stmt, span: Span) -> Self::Stmt;
	fn do_while_stmt(&mut self, body: Self::Stmt, test: Self::Expr, span: Span) -> Self::Stmt;
	fn for_stmt(
		&mut self,
		init: Option<ForInitParts<Self::VarDecl, Self::Expr>>,
		test: Option<Self::Expr>,
		update: Option<Self::Expr>,
		body: Self::Stmt,
		span: Span,
	) -> Self::Stmt;
	fn for_in_stmt(
		&mut self,
		head: ForHeadParts<Self::Pattern>,
		right: Self::Expr,
		body: Self::Stmt,
		span: Span,
	) -> Self::Stmt;
	fn for_of_stmt(
		&mut self,
		head: ForHeadParts<Self::Pattern>,
		right: Self::Expr,
		body: Self::Stmt,
		span: Span,
	) -> Self::Stmt;
	fn break_stmt(&mut self, label: Option<Ident>, span: Span) -> Self::Stmt;
	fn continue_stmt(&mut self, label: Option<Ident>, span: Span) -> Self::Stmt;
	fn return_stmt(&mut self, argument: Option<Self::Expr>, span: Span) -> Self::Stmt;
	fn throw_stmt(&mut self, argument: Self::Expr, span: Span) -> Self::Stmt;
	fn try_stmt(
		&mut self,
		block: Vec<Self::Stmt>,
		handler: Option<CatchParts<Self::Pattern, Self::Stmt>>,
		finalizer: Option<Vec<Self::Stmt>>,
		span: Span,
	) -> Self::Stmt;
	#[allow(clippy::too_many_arguments)]
	fn switch_stmt(
		&mut self,
		discriminant: Self::Expr,
		cases: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>,
		default: Option<Vec<Self::Stmt>>,
		trailing_cases: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>,
		span: Span,
	) -> Self::Stmt;
	fn with_stmt(&mut self, object: Self::Expr, body: Self::Stmt, span: Span) -> Self::Stmt;
	fn debugger_stmt(&mut self, span: Span) -> Self::Stmt;
	fn labeled_stmt(&mut self, label: Ident, body: Self::Stmt, span: Span) -> Self::Stmt;
	fn var_decl(
		&mut self,
		kind: DeclKind,
		declarations: Vec<DeclaratorParts<Self::Pattern, Self::Expr>>,
	) -> Self::VarDecl;
	fn var_decl_stmt(&mut self, decl: Self::VarDecl, span: Span) -> Self::Stmt;
	fn function_decl_stmt(&mut self, function: Self::Function, span: Span) -> Self::Stmt;
	fn class_decl_stmt(&mut self, class: Self::Class, span: Span) -> Self::Stmt;

	fn import_stmt(&mut self, decl: ImportDecl, span: Span) -> Self::Stmt;
	fn export_all_stmt(&mut self, source: Ident, span: Span) -> Self::Stmt;
	fn export_default_expr_stmt(&mut self, expr: Self::Expr, span: Span) -> Self::Stmt;
	fn export_default_function_stmt(&mut self, function: Self::Function, span: Span)
		-> Self::Stmt;
	fn export_default_class_stmt(&mut self, class: Self::Class, span: Span) -> Self::Stmt;
	fn export_named_stmt(
		&mut self,
		specifiers: Vec<ExportSpecifier>,
		source: Option<Ident>,
		span: Span,
	) -> Self::Stmt;
	fn export_local_stmt(&mut self, declaration: Self::Stmt, span: Span) -> Self::Stmt;
}

/// The builder which constructs the full AST.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstBuilder;

fn key_to_ast(key: PropKey<ast::Expr>) -> ast::PropertyKey {
	match key {
		PropKey::Ident(x) => ast::PropertyKey::Ident(x),
		PropKey::String(x) => ast::PropertyKey::String(x),
		PropKey::Number(x) => ast::PropertyKey::Number(x),
		PropKey::Computed(x) => ast::PropertyKey::Computed(Box::new(x)),
	}
}

impl TreeBuild for AstBuilder {
	const CREATES_AST: bool = true;
	const CAN_USE_FUNCTION_CACHE: bool = true;

	type Expr = ast::Expr;
	type Stmt = ast::Stmt;
	type Pattern = ast::Pattern;
	type Function = Box<ast::FunctionInfo>;
	type Class = Box<ast::ClassInfo>;
	type VarDecl = ast::VarDecl;

	fn hint(expr: &Self::Expr) -> ExprHint {
		match expr.kind {
			ast::ExprKind::Object(_) => ExprHint::ObjectLiteral,
			ast::ExprKind::Array(_) => ExprHint::ArrayLiteral,
			ast::ExprKind::Ident(x) => ExprHint::Ident(x),
			ast::ExprKind::Member {
				..
			} => ExprHint::Member,
			_ => ExprHint::Other,
		}
	}

	fn this_expr(&mut self, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::This, span)
	}

	fn super_expr(&mut self, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Super, span)
	}

	fn new_target_expr(&mut self, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::NewTarget, span)
	}

	fn ident_expr(&mut self, name: Ident, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Ident(name), span)
	}

	fn null_expr(&mut self, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Null, span)
	}

	fn bool_expr(&mut self, value: bool, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Bool(value), span)
	}

	fn number_expr(&mut self, value: f64, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Number(value), span)
	}

	fn string_expr(&mut self, value: Ident, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::String(value), span)
	}

	fn regex_expr(&mut self, pattern: Ident, flags: Ident, span: Span) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Regex {
				pattern,
				flags,
			},
			span,
		)
	}

	fn template_expr(
		&mut self,
		quasis: Vec<TemplateElement>,
		expressions: Vec<Self::Expr>,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Template(Box::new(ast::TemplateLiteral {
				quasis,
				expressions,
			})),
			span,
		)
	}

	fn tagged_template_expr(
		&mut self,
		tag: Self::Expr,
		quasis: Vec<TemplateElement>,
		expressions: Vec<Self::Expr>,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::TaggedTemplate {
				tag: Box::new(tag),
				quasi: Box::new(ast::TemplateLiteral {
					quasis,
					expressions,
				}),
			},
			span,
		)
	}

	fn array_expr(&mut self, elements: Vec<Option<Self::Expr>>, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Array(elements), span)
	}

	fn object_expr(
		&mut self,
		properties: Vec<PropertyParts<Self::Expr, Self::Function>>,
		span: Span,
	) -> Self::Expr {
		let properties = properties
			.into_iter()
			.map(|prop| ast::Property {
				key: key_to_ast(prop.key),
				value: match prop.value {
					PropValue::Init(x) => ast::PropertyValue::Init(x),
					PropValue::Shorthand(x) => ast::PropertyValue::Shorthand(x),
					PropValue::Method(x) => ast::PropertyValue::Method(x),
					PropValue::Getter(x) => ast::PropertyValue::Getter(x),
					PropValue::Setter(x) => ast::PropertyValue::Setter(x),
				},
				span: prop.span,
			})
			.collect();
		ast::Expr::new(ast::ExprKind::Object(properties), span)
	}

	fn function_expr(&mut self, function: Self::Function, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Function(function), span)
	}

	fn arrow_expr(&mut self, function: Self::Function, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Arrow(function), span)
	}

	fn class_expr(&mut self, class: Self::Class, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Class(class), span)
	}

	fn unary_expr(&mut self, op: UnaryOp, argument: Self::Expr, span: Span) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Unary {
				op,
				argument: Box::new(argument),
			},
			span,
		)
	}

	fn update_expr(
		&mut self,
		op: UpdateOp,
		prefix: bool,
		argument: Self::Expr,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Update {
				op,
				prefix,
				argument: Box::new(argument),
			},
			span,
		)
	}

	fn binary_expr(
		&mut self,
		op: BinaryOp,
		left: Self::Expr,
		right: Self::Expr,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Binary {
				op,
				left: Box::new(left),
				right: Box::new(right),
			},
			span,
		)
	}

	fn conditional_expr(
		&mut self,
		test: Self::Expr,
		consequent: Self::Expr,
		alternate: Self::Expr,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Conditional {
				test: Box::new(test),
				consequent: Box::new(consequent),
				alternate: Box::new(alternate),
			},
			span,
		)
	}

	fn assign_expr(
		&mut self,
		op: AssignOp,
		target: Self::Expr,
		value: Self::Expr,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Assign {
				op,
				target: Box::new(target),
				value: Box::new(value),
			},
			span,
		)
	}

	fn assign_pattern_expr(
		&mut self,
		pattern: Self::Pattern,
		value: Self::Expr,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::AssignPattern {
				pattern: Box::new(pattern),
				value: Box::new(value),
			},
			span,
		)
	}

	fn sequence_expr(&mut self, expressions: Vec<Self::Expr>, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Sequence(expressions), span)
	}

	fn call_expr(
		&mut self,
		callee: Self::Expr,
		arguments: Vec<Self::Expr>,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Call {
				callee: Box::new(callee),
				arguments,
			},
			span,
		)
	}

	fn new_expr(
		&mut self,
		callee: Self::Expr,
		arguments: Option<Vec<Self::Expr>>,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::New {
				callee: Box::new(callee),
				arguments,
			},
			span,
		)
	}

	fn member_dot_expr(
		&mut self,
		object: Self::Expr,
		property: Ident,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Member {
				object: Box::new(object),
				property: ast::MemberKey::Dot(property),
			},
			span,
		)
	}

	fn member_bracket_expr(
		&mut self,
		object: Self::Expr,
		property: Self::Expr,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Member {
				object: Box::new(object),
				property: ast::MemberKey::Bracket(Box::new(property)),
			},
			span,
		)
	}

	fn spread_expr(&mut self, argument: Self::Expr, span: Span) -> Self::Expr {
		ast::Expr::new(ast::ExprKind::Spread(Box::new(argument)), span)
	}

	fn yield_expr(
		&mut self,
		delegate: bool,
		argument: Option<Self::Expr>,
		span: Span,
	) -> Self::Expr {
		ast::Expr::new(
			ast::ExprKind::Yield {
				delegate,
				argument: argument.map(Box::new),
			},
			span,
		)
	}

	fn ident_pattern(&mut self, name: Ident, span: Span) -> Self::Pattern {
		ast::Pattern::new(ast::PatternKind::Ident(name), span)
	}

	fn array_pattern(
		&mut self,
		elements: Vec<Option<(Self::Pattern, Option<Self::Expr>)>>,
		rest: Option<Self::Pattern>,
		span: Span,
	) -> Self::Pattern {
		let elements = elements
			.into_iter()
			.map(|x| {
				x.map(|(pattern, default)| ast::ArrayPatternElement {
					pattern,
					default,
				})
			})
			.collect();
		ast::Pattern::new(
			ast::PatternKind::Array {
				elements,
				rest: rest.map(Box::new),
			},
			span,
		)
	}

	fn object_pattern(
		&mut self,
		properties: Vec<ObjectPatternProp<Self::Pattern, Self::Expr>>,
		rest: Option<Self::Pattern>,
		span: Span,
	) -> Self::Pattern {
		let properties = properties
			.into_iter()
			.map(|x| ast::ObjectPatternProperty {
				key: key_to_ast(x.key),
				pattern: x.pattern,
				default: x.default,
				shorthand: x.shorthand,
			})
			.collect();
		ast::Pattern::new(
			ast::PatternKind::Object {
				properties,
				rest: rest.map(Box::new),
			},
			span,
		)
	}

	fn expr_pattern(&mut self, expr: Self::Expr, span: Span) -> Self::Pattern {
		ast::Pattern::new(ast::PatternKind::Expr(Box::new(expr)), span)
	}

	fn function(
		&mut self,
		meta: FunctionMeta,
		parameters: Vec<FormalParam<Self::Pattern, Self::Expr>>,
		body: FnBody<Self::Stmt, Self::Expr>,
	) -> Self::Function {
		let parameters = parameters
			.into_iter()
			.map(|x| ast::FormalParameter {
				pattern: x.pattern,
				default: x.default,
				rest: x.rest,
			})
			.collect();
		let body = match body {
			FnBody::Block(x) => ast::FunctionBody::Block(x),
			FnBody::Expr(x) => ast::FunctionBody::Expr(Box::new(x)),
			FnBody::Cached => ast::FunctionBody::Cached,
		};
		Box::new(ast::FunctionInfo {
			name: meta.name,
			parameters,
			parameter_count: meta.parameter_count,
			body,
			kind: meta.kind,
			constructor_kind: meta.constructor_kind,
			is_strict: meta.is_strict,
			is_arrow_expression_body: meta.is_arrow_expression_body,
			has_direct_super: meta.has_direct_super,
			captured: meta.captured,
			features: meta.features,
			span: meta.span,
			body_span: meta.body_span,
		})
	}

	fn class(
		&mut self,
		name: Option<Ident>,
		parent: Option<Self::Expr>,
		constructor: Option<Self::Function>,
		instance_members: Vec<ClassMemberParts<Self::Expr, Self::Function>>,
		static_members: Vec<ClassMemberParts<Self::Expr, Self::Function>>,
		span: Span,
	) -> Self::Class {
		let map = |members: Vec<ClassMemberParts<Self::Expr, Self::Function>>| {
			members
				.into_iter()
				.map(|x| ast::ClassMember {
					key: key_to_ast(x.key),
					kind: x.kind,
					function: x.function,
					span: x.span,
				})
				.collect()
		};
		Box::new(ast::ClassInfo {
			name,
			parent: parent.map(Box::new),
			constructor,
			instance_members: map(instance_members),
			static_members: map(static_members),
			span,
		})
	}

	fn block_stmt(&mut self, elements: Vec<Self::Stmt>, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Block(elements), span)
	}

	fn empty_stmt(&mut self, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Empty, span)
	}

	fn expr_stmt(&mut self, expr: Self::Expr, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Expr(expr), span)
	}

	fn if_stmt(
		&mut self,
		test: Self::Expr,
		consequent: Self::Stmt,
		alternate: Option<Self::Stmt>,
		span: Span,
	) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::If {
				test,
				consequent: Box::new(consequent),
				alternate: alternate.map(Box::new),
			},
			span,
		)
	}

	fn while_stmt(&mut self, test: Self::Expr, body: Self::Stmt, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::While {
				test,
				body: Box::new(body),
			},
			span,
		)
	}

	fn do_while_stmt(&mut self, body: Self::Stmt, test: Self::Expr, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::DoWhile {
				body: Box::new(body),
				test,
			},
			span,
		)
	}

	fn for_stmt(
		&mut self,
		init: Option<ForInitParts<Self::VarDecl, Self::Expr>>,
		test: Option<Self::Expr>,
		update: Option<Self::Expr>,
		body: Self::Stmt,
		span: Span,
	) -> Self::Stmt {
		let init = init.map(|x| match x {
			ForInitParts::VarDecl(x) => ast::ForInit::VarDecl(x),
			ForInitParts::Expr(x) => ast::ForInit::Expr(x),
		});
		ast::Stmt::new(
			ast::StmtKind::For {
				init,
				test,
				update,
				body: Box::new(body),
			},
			span,
		)
	}

	fn for_in_stmt(
		&mut self,
		head: ForHeadParts<Self::Pattern>,
		right: Self::Expr,
		body: Self::Stmt,
		span: Span,
	) -> Self::Stmt {
		let left = match head {
			ForHeadParts::Decl {
				kind,
				pattern,
			} => ast::ForHead::VarDecl {
				kind,
				pattern,
			},
			ForHeadParts::Pattern(x) => ast::ForHead::Pattern(x),
		};
		ast::Stmt::new(
			ast::StmtKind::ForIn {
				left,
				right,
				body: Box::new(body),
			},
			span,
		)
	}

	fn for_of_stmt(
		&mut self,
		head: ForHeadParts<Self::Pattern>,
		right: Self::Expr,
		body: Self::Stmt,
		span: Span,
	) -> Self::Stmt {
		let left = match head {
			ForHeadParts::Decl {
				kind,
				pattern,
			} => ast::ForHead::VarDecl {
				kind,
				pattern,
			},
			ForHeadParts::Pattern(x) => ast::ForHead::Pattern(x),
		};
		ast::Stmt::new(
			ast::StmtKind::ForOf {
				left,
				right,
				body: Box::new(body),
			},
			span,
		)
	}

	fn break_stmt(&mut self, label: Option<Ident>, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Break(label), span)
	}

	fn continue_stmt(&mut self, label: Option<Ident>, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Continue(label), span)
	}

	fn return_stmt(&mut self, argument: Option<Self::Expr>, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Return(argument), span)
	}

	fn throw_stmt(&mut self, argument: Self::Expr, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Throw(argument), span)
	}

	fn try_stmt(
		&mut self,
		block: Vec<Self::Stmt>,
		handler: Option<CatchParts<Self::Pattern, Self::Stmt>>,
		finalizer: Option<Vec<Self::Stmt>>,
		span: Span,
	) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Try {
				block,
				handler: handler.map(|x| ast::CatchClause {
					param: x.param,
					body: x.body,
				}),
				finalizer,
			},
			span,
		)
	}

	fn switch_stmt(
		&mut self,
		discriminant: Self::Expr,
		cases: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>,
		default: Option<Vec<Self::Stmt>>,
		trailing_cases: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>,
		span: Span,
	) -> Self::Stmt {
		let map = |clauses: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>| {
			clauses
				.into_iter()
				.map(|x| ast::SwitchClause {
					test: x.test,
					body: x.body,
				})
				.collect()
		};
		ast::Stmt::new(
			ast::StmtKind::Switch {
				discriminant,
				cases: map(cases),
				default,
				trailing_cases: map(trailing_cases),
			},
			span,
		)
	}

	fn with_stmt(&mut self, object: Self::Expr, body: Self::Stmt, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::With {
				object,
				body: Box::new(body),
			},
			span,
		)
	}

	fn debugger_stmt(&mut self, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Debugger, span)
	}

	fn labeled_stmt(&mut self, label: Ident, body: Self::Stmt, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Labeled {
				label,
				body: Box::new(body),
			},
			span,
		)
	}

	fn var_decl(
		&mut self,
		kind: DeclKind,
		declarations: Vec<DeclaratorParts<Self::Pattern, Self::Expr>>,
	) -> Self::VarDecl {
		let declarations = declarations
			.into_iter()
			.map(|x| ast::Declarator {
				pattern: x.pattern,
				init: x.init,
				span: x.span,
			})
			.collect();
		ast::VarDecl {
			kind,
			declarations,
		}
	}

	fn var_decl_stmt(&mut self, decl: Self::VarDecl, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::VarDecl(decl), span)
	}

	fn function_decl_stmt(&mut self, function: Self::Function, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::FunctionDecl(function), span)
	}

	fn class_decl_stmt(&mut self, class: Self::Class, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::ClassDecl(class), span)
	}

	fn import_stmt(&mut self, decl: ImportDecl, span: Span) -> Self::Stmt {
		ast::Stmt::new(ast::StmtKind::Import(decl), span)
	}

	fn export_all_stmt(&mut self, source: Ident, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Export(ast::ExportDecl::All {
				source,
			}),
			span,
		)
	}

	fn export_default_expr_stmt(&mut self, expr: Self::Expr, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Export(ast::ExportDecl::Default(ast::ExportDefault::Expr(expr))),
			span,
		)
	}

	fn export_default_function_stmt(
		&mut self,
		function: Self::Function,
		span: Span,
	) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Export(ast::ExportDecl::Default(ast::ExportDefault::Function(
				function,
			))),
			span,
		)
	}

	fn export_default_class_stmt(&mut self, class: Self::Class, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Export(ast::ExportDecl::Default(ast::ExportDefault::Class(class))),
			span,
		)
	}

	fn export_named_stmt(
		&mut self,
		specifiers: Vec<ExportSpecifier>,
		source: Option<Ident>,
		span: Span,
	) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Export(ast::ExportDecl::Named {
				specifiers,
				source,
			}),
			span,
		)
	}

	fn export_local_stmt(&mut self, declaration: Self::Stmt, span: Span) -> Self::Stmt {
		ast::Stmt::new(
			ast::StmtKind::Export(ast::ExportDecl::Local(Box::new(declaration))),
			span,
		)
	}
}

/// The builder which validates syntax and discards structure.
///
/// Expressions reduce to the [`ExprHint`] the parser needs for grammar
/// decisions, everything else is zero-sized.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntaxChecker;

impl TreeBuild for SyntaxChecker {
	const CREATES_AST: bool = false;
	// No caching inside speculative regions; the checker is what speculative
	// probes run with.
	const CAN_USE_FUNCTION_CACHE: bool = false;

	type Expr = ExprHint;
	type Stmt = ();
	type Pattern = ();
	type Function = ();
	type Class = ();
	type VarDecl = ();

	fn hint(expr: &Self::Expr) -> ExprHint {
		*expr
	}

	fn this_expr(&mut self, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn super_expr(&mut self, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn new_target_expr(&mut self, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn ident_expr(&mut self, name: Ident, _: Span) -> Self::Expr {
		ExprHint::Ident(name)
	}

	fn null_expr(&mut self, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn bool_expr(&mut self, _: bool, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn number_expr(&mut self, _: f64, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn string_expr(&mut self, _: Ident, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn regex_expr(&mut self, _: Ident, _: Ident, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn template_expr(
		&mut self,
		_: Vec<TemplateElement>,
		_: Vec<Self::Expr>,
		_: Span,
	) -> Self::Expr {
		ExprHint::Other
	}

	fn tagged_template_expr(
		&mut self,
		_: Self::Expr,
		_: Vec<TemplateElement>,
		_: Vec<Self::Expr>,
		_: Span,
	) -> Self::Expr {
		ExprHint::Other
	}

	fn array_expr(&mut self, _: Vec<Option<Self::Expr>>, _: Span) -> Self::Expr {
		ExprHint::ArrayLiteral
	}

	fn object_expr(
		&mut self,
		_: Vec<PropertyParts<Self::Expr, Self::Function>>,
		_: Span,
	) -> Self::Expr {
		ExprHint::ObjectLiteral
	}

	fn function_expr(&mut self, _: Self::Function, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn arrow_expr(&mut self, _: Self::Function, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn class_expr(&mut self, _: Self::Class, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn unary_expr(&mut self, _: UnaryOp, _: Self::Expr, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn update_expr(&mut self, _: UpdateOp, _: bool, _: Self::Expr, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn binary_expr(
		&mut self,
		_: BinaryOp,
		_: Self::Expr,
		_: Self::Expr,
		_: Span,
	) -> Self::Expr {
		ExprHint::Other
	}

	fn conditional_expr(
		&mut self,
		_: Self::Expr,
		_: Self::Expr,
		_: Self::Expr,
		_: Span,
	) -> Self::Expr {
		ExprHint::Other
	}

	fn assign_expr(
		&mut self,
		_: AssignOp,
		_: Self::Expr,
		_: Self::Expr,
		_: Span,
	) -> Self::Expr {
		ExprHint::Other
	}

	fn assign_pattern_expr(&mut self, _: Self::Pattern, _: Self::Expr, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn sequence_expr(&mut self, _: Vec<Self::Expr>, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn call_expr(&mut self, _: Self::Expr, _: Vec<Self::Expr>, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn new_expr(&mut self, _: Self::Expr, _: Option<Vec<Self::Expr>>, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn member_dot_expr(&mut self, _: Self::Expr, _: Ident, _: Span) -> Self::Expr {
		ExprHint::Member
	}

	fn member_bracket_expr(&mut self, _: Self::Expr, _: Self::Expr, _: Span) -> Self::Expr {
		ExprHint::Member
	}

	fn spread_expr(&mut self, _: Self::Expr, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn yield_expr(&mut self, _: bool, _: Option<Self::Expr>, _: Span) -> Self::Expr {
		ExprHint::Other
	}

	fn ident_pattern(&mut self, _: Ident, _: Span) -> Self::Pattern {}

	fn array_pattern(
		&mut self,
		_: Vec<Option<(Self::Pattern, Option<Self::Expr>)>>,
		_: Option<Self::Pattern>,
		_: Span,
	) -> Self::Pattern {
	}

	fn object_pattern(
		&mut self,
		_: Vec<ObjectPatternProp<Self::Pattern, Self::Expr>>,
		_: Option<Self::Pattern>,
		_: Span,
	) -> Self::Pattern {
	}

	fn expr_pattern(&mut self, _: Self::Expr, _: Span) -> Self::Pattern {}

	fn function(
		&mut self,
		_: FunctionMeta,
		_: Vec<FormalParam<Self::Pattern, Self::Expr>>,
		_: FnBody<Self::Stmt, Self::Expr>,
	) -> Self::Function {
	}

	fn class(
		&mut self,
		_: Option<Ident>,
		_: Option<Self::Expr>,
		_: Option<Self::Function>,
		_: Vec<ClassMemberParts<Self::Expr, Self::Function>>,
		_: Vec<ClassMemberParts<Self::Expr, Self::Function>>,
		_: Span,
	) -> Self::Class {
	}

	fn block_stmt(&mut self, _: Vec<Self::Stmt>, _: Span) -> Self::Stmt {}

	fn empty_stmt(&mut self, _: Span) -> Self::Stmt {}

	fn expr_stmt(&mut self, _: Self::Expr, _: Span) -> Self::Stmt {}

	fn if_stmt(
		&mut self,
		_: Self::Expr,
		_: Self::Stmt,
		_: Option<Self::Stmt>,
		_: Span,
	) -> Self::Stmt {
	}

	fn while_stmt(&mut self, _: Self::Expr, _: Self::Stmt, _: Span) -> Self::Stmt {}

	fn do_while_stmt(&mut self, _: Self::Stmt, _: Self::Expr, _: Span) -> Self::Stmt {}

	fn for_stmt(
		&mut self,
		_: Option<ForInitParts<Self::VarDecl, Self::Expr>>,
		_: Option<Self::Expr>,
		_: Option<Self::Expr>,
		_: Self::Stmt,
		_: Span,
	) -> Self::Stmt {
	}

	fn for_in_stmt(
		&mut self,
		_: ForHeadParts<Self::Pattern>,
		_: Self::Expr,
		_: Self::Stmt,
		_: Span,
	) -> Self::Stmt {
	}

	fn for_of_stmt(
		&mut self,
		_: ForHeadParts<Self::Pattern>,
		_: Self::Expr,
		_: Self::Stmt,
		_: Span,
	) -> Self::Stmt {
	}

	fn break_stmt(&mut self, _: Option<Ident>, _: Span) -> Self::Stmt {}

	fn continue_stmt(&mut self, _: Option<Ident>, _: Span) -> Self::Stmt {}

	fn return_stmt(&mut self, _: Option<Self::Expr>, _: Span) -> Self::Stmt {}

	fn throw_stmt(&mut self, _: Self::Expr, _: Span) -> Self::Stmt {}

	fn try_stmt(
		&mut self,
		_: Vec<Self::Stmt>,
		_: Option<CatchParts<Self::Pattern, Self::Stmt>>,
		_: Option<Vec<Self::Stmt>>,
		_: Span,
	) -> Self::Stmt {
	}

	fn switch_stmt(
		&mut self,
		_: Self::Expr,
		_: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>,
		_: Option<Vec<Self::Stmt>>,
		_: Vec<SwitchClauseParts<Self::Expr, Self::Stmt>>,
		_: Span,
	) -> Self::Stmt {
	}

	fn with_stmt(&mut self, _: Self::Expr, _: Self::Stmt, _: Span) -> Self::Stmt {}

	fn debugger_stmt(&mut self, _: Span) -> Self::Stmt {}

	fn labeled_stmt(&mut self, _: Ident, _: Self::Stmt, _: Span) -> Self::Stmt {}

	fn var_decl(
		&mut self,
		_: DeclKind,
		_: Vec<DeclaratorParts<Self::Pattern, Self::Expr>>,
	) -> Self::VarDecl {
	}

	fn var_decl_stmt(&mut self, _: Self::VarDecl, _: Span) -> Self::Stmt {}

	fn function_decl_stmt(&mut self, _: Self::Function, _: Span) -> Self::Stmt {}

	fn class_decl_stmt(&mut self, _: Self::Class, _: Span) -> Self::Stmt {}

	fn import_stmt(&mut self, _: ImportDecl, _: Span) -> Self::Stmt {}

	fn export_all_stmt(&mut self, _: Ident, _: Span) -> Self::Stmt {}

	fn export_default_expr_stmt(&mut self, _: Self::Expr, _: Span) -> Self::Stmt {}

	fn export_default_function_stmt(&mut self, _: Self::Function, _: Span) -> Self::Stmt {}

	fn export_default_class_stmt(&mut self, _: Self::Class, _: Span) -> Self::Stmt {}

	fn export_named_stmt(
		&mut self,
		_: Vec<ExportSpecifier>,
		_: Option<Ident>,
		_: Span,
	) -> Self::Stmt {
	}

	fn export_local_stmt(&mut self, _: Self::Stmt, _: Span) -> Self::Stmt {}
}
