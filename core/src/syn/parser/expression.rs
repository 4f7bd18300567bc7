//! Expression parsing, with a Pratt loop for binary operators.

use reblessive::Stk;

use crate::ast::{names, AssignOp, BinaryOp, Features, UnaryOp, UpdateOp};
use crate::syn::parser::mac::{bail, enter_expr_recursion, unexpected};
use crate::syn::parser::{
	DestructureKind, ExprHint, ParseResult, Parser, TreeBuild,
};
use crate::syn::token::{t, Keyword, Token, TokenKind};

/// An enum which defines how strongly an operator binds its operands.
///
/// If a binding power is higher the operator is more likely to directly
/// operate on its neighbours: `*` has a higher binding power than `-`,
/// so `1 - 2 * 3` parses as `1 - (2 * 3)`. All binary operators of the
/// language are left associative; the conditional and assignment operators
/// are handled outside the Pratt loop.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum BindingPower {
	Base,
	Or,
	And,
	BitOr,
	BitXor,
	BitAnd,
	Equality,
	Relation,
	Shift,
	AddSub,
	MulDiv,
}

impl<B: TreeBuild> Parser<'_, B> {
	/// Returns the binding power of an infix operator token.
	///
	/// The `in` operator only binds when the ambient `allows_in` flag is
	/// set; inside a `for`-initializer it must not be consumed, so the
	/// header's `in` can be recognized.
	fn infix_binding_power(&self, token: TokenKind) -> Option<BindingPower> {
		match token {
			t!("||") => Some(BindingPower::Or),
			t!("&&") => Some(BindingPower::And),
			t!("|") => Some(BindingPower::BitOr),
			t!("^") => Some(BindingPower::BitXor),
			t!("&") => Some(BindingPower::BitAnd),
			t!("==") | t!("!=") | t!("===") | t!("!==") => Some(BindingPower::Equality),
			t!("<") | t!(">") | t!("<=") | t!(">=") | t!("instanceof") => {
				Some(BindingPower::Relation)
			}
			t!("in") => {
				if self.allows_in {
					Some(BindingPower::Relation)
				} else {
					None
				}
			}
			t!("<<") | t!(">>") | t!(">>>") => Some(BindingPower::Shift),
			t!("+") | t!("-") => Some(BindingPower::AddSub),
			t!("*") | t!("/") | t!("%") => Some(BindingPower::MulDiv),
			_ => None,
		}
	}

	fn infix_operator(token: TokenKind) -> BinaryOp {
		match token {
			t!("||") => BinaryOp::Or,
			t!("&&") => BinaryOp::And,
			t!("|") => BinaryOp::BitOr,
			t!("^") => BinaryOp::BitXor,
			t!("&") => BinaryOp::BitAnd,
			t!("==") => BinaryOp::Eq,
			t!("!=") => BinaryOp::NotEq,
			t!("===") => BinaryOp::StrictEq,
			t!("!==") => BinaryOp::StrictNotEq,
			t!("<") => BinaryOp::Lt,
			t!(">") => BinaryOp::Gt,
			t!("<=") => BinaryOp::LtEq,
			t!(">=") => BinaryOp::GtEq,
			t!("instanceof") => BinaryOp::InstanceOf,
			t!("in") => BinaryOp::In,
			t!("<<") => BinaryOp::Shl,
			t!(">>") => BinaryOp::Shr,
			t!(">>>") => BinaryOp::UShr,
			t!("+") => BinaryOp::Add,
			t!("-") => BinaryOp::Sub,
			t!("*") => BinaryOp::Mul,
			t!("/") => BinaryOp::Div,
			t!("%") => BinaryOp::Rem,
			// Unreachable as the token was previously matched as an infix
			// operator.
			x => unreachable!("found non-operator token {x:?}"),
		}
	}

	fn assignment_operator(token: TokenKind) -> Option<AssignOp> {
		match token {
			t!("=") => Some(AssignOp::Assign),
			t!("+=") => Some(AssignOp::Add),
			t!("-=") => Some(AssignOp::Sub),
			t!("*=") => Some(AssignOp::Mul),
			t!("/=") => Some(AssignOp::Div),
			t!("%=") => Some(AssignOp::Rem),
			t!("<<=") => Some(AssignOp::Shl),
			t!(">>=") => Some(AssignOp::Shr),
			t!(">>>=") => Some(AssignOp::UShr),
			t!("&=") => Some(AssignOp::BitAnd),
			t!("|=") => Some(AssignOp::BitOr),
			t!("^=") => Some(AssignOp::BitXor),
			_ => None,
		}
	}

	/// Parse a full expression, including the comma operator.
	pub(crate) async fn parse_expression(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let first = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
		if self.peek_kind() != t!(",") {
			return Ok(first);
		}
		self.non_trivial_count += 1;
		let mut expressions = vec![first];
		while self.eat(t!(",")) {
			let expr = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
			expressions.push(expr);
		}
		let span = start.covers(self.last_span());
		Ok(self.builder.sequence_expr(expressions, span))
	}

	/// Parse an assignment expression, the most common expression entry
	/// point.
	///
	/// This is where the grammar's cover productions are untangled: arrow
	/// function parameter lists, and object/array literals which turn out to
	/// be destructuring assignment patterns.
	pub(crate) async fn parse_assignment_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		enter_expr_recursion!(this = self => {
			this.parse_assignment_expr_inner(ctx).await
		})
	}

	async fn parse_assignment_expr_inner(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let token = self.peek();

		// `yield` is an expression keyword only inside a generator body.
		if token.kind == t!("yield") && self.scopes.in_generator_body() {
			return self.parse_yield_expr(ctx).await;
		}

		#[cfg(feature = "es6-arrow-functions")]
		if matches!(token.kind, t!("(") | TokenKind::Identifier)
			|| token.kind.can_be_identifier() && !self.scopes.strict()
		{
			if self.is_arrow_function_parameters() {
				return self.parse_arrow_function(ctx).await;
			}
		}

		// An expression starting with `{` or `[` may be a destructuring
		// assignment pattern in disguise.
		if matches!(token.kind, t!("{") | t!("[")) {
			let save_point = self.save_point();
			self.indicates_pattern = None;
			let attempt = ctx.run(|ctx| self.parse_conditional_expr(ctx)).await;
			match attempt {
				Ok(expr) => {
					let hint = B::hint(&expr);
					if hint.is_object_or_array_literal() && self.peek_kind() == t!("=") {
						self.rewind(save_point);
						return self.parse_assignment_pattern_expr(ctx).await;
					}
					if let Some(span) = self.indicates_pattern.take() {
						bail!("A shorthand property initializer is only valid in a destructuring pattern"; @span);
					}
					return self.finish_assignment(ctx, expr, start).await;
				}
				Err(e) => {
					if self.indicates_pattern.take().is_some() {
						self.rewind(save_point);
						return self.parse_assignment_pattern_expr(ctx).await;
					}
					return Err(e);
				}
			}
		}

		let expr = ctx.run(|ctx| self.parse_conditional_expr(ctx)).await?;
		self.finish_assignment(ctx, expr, start).await
	}

	/// Re-parse an object/array literal as an assignment pattern followed by
	/// `=` and the assigned value.
	async fn parse_assignment_pattern_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let pattern = ctx
			.run(|ctx| self.parse_destructuring_pattern(ctx, DestructureKind::ToExpressions))
			.await?;
		self.indicates_pattern = None;
		let token = self.peek();
		if token.kind != t!("=") {
			unexpected!(self, token, "`=` after a destructuring pattern");
		}
		self.pop_peek();
		self.assignment_count += 1;
		let value = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
		let span = start.covers(self.last_span());
		Ok(self.builder.assign_pattern_expr(pattern, value, span))
	}

	/// Handle a trailing assignment operator after a parsed conditional
	/// expression.
	async fn finish_assignment(
		&mut self,
		ctx: &mut Stk,
		expr: B::Expr,
		start: crate::syn::token::Span,
	) -> ParseResult<B::Expr> {
		let token = self.peek();
		let Some(op) = Self::assignment_operator(token.kind) else {
			return Ok(expr);
		};
		let hint = B::hint(&expr);
		if !hint.is_assignment_target() {
			bail!("Left hand side of operator '{}' must be a reference", token.kind.as_str(); @start.covers(token.span));
		}
		if let ExprHint::Ident(name) = hint {
			if self.scopes.strict() && (name == names::EVAL || name == names::ARGUMENTS) {
				let text = self.interner.resolve(name).to_owned();
				bail!("Cannot modify '{text}' in strict mode"; @start);
			}
			if name == names::ARGUMENTS {
				self.features |= Features::MODIFIED_ARGUMENTS;
			}
			if self
				.scopes
				.current_function()
				.map(|x| x.declares_parameter(name))
				.unwrap_or(false)
			{
				self.features |= Features::MODIFIED_PARAMETER;
			}
		}
		self.pop_peek();
		self.assignment_count += 1;
		let value = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
		let span = start.covers(self.last_span());
		Ok(self.builder.assign_expr(op, expr, value, span))
	}

	/// Parse a conditional expression, `a ? b : c`. Right associative.
	pub(crate) async fn parse_conditional_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let test = self.parse_binary_expr(ctx, BindingPower::Base).await?;
		if !self.eat(t!("?")) {
			return Ok(test);
		}
		self.non_trivial_count += 1;
		// Both branches allow `in` again, even inside a for-initializer.
		let old_allows_in = self.allows_in;
		self.allows_in = true;
		let consequent = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await;
		self.allows_in = old_allows_in;
		let consequent = consequent?;
		let token = self.peek();
		if token.kind != t!(":") {
			unexpected!(self, token, "`:` in a conditional expression");
		}
		self.pop_peek();
		let alternate = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
		let span = start.covers(self.last_span());
		Ok(self.builder.conditional_expr(test, consequent, alternate, span))
	}

	/// The Pratt parsing loop for binary operators.
	async fn parse_binary_expr(
		&mut self,
		ctx: &mut Stk,
		min_bp: BindingPower,
	) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let mut lhs = self.parse_unary_expr(ctx).await?;

		loop {
			let token = self.peek();
			let Some(bp) = self.infix_binding_power(token.kind) else {
				break;
			};
			if bp <= min_bp {
				break;
			}
			self.pop_peek();
			self.non_trivial_count += 1;
			self.non_lhs_count += 1;
			let op = Self::infix_operator(token.kind);
			let rhs = ctx.run(|ctx| self.parse_binary_expr(ctx, bp)).await?;
			let span = start.covers(self.last_span());
			lhs = self.builder.binary_expr(op, lhs, rhs, span);
		}

		Ok(lhs)
	}

	fn prefix_unary_operator(token: Token) -> Option<UnaryOp> {
		match token.kind {
			t!("!") => Some(UnaryOp::Not),
			t!("~") => Some(UnaryOp::BitNot),
			t!("+") => Some(UnaryOp::Plus),
			t!("-") => Some(UnaryOp::Minus),
			t!("typeof") => Some(UnaryOp::TypeOf),
			t!("void") => Some(UnaryOp::Void),
			t!("delete") => Some(UnaryOp::Delete),
			_ => None,
		}
	}

	/// Parse prefix operators, then a postfix expression.
	async fn parse_unary_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let token = self.peek();
		if let Some(op) = Self::prefix_unary_operator(token) {
			self.pop_peek();
			self.non_trivial_count += 1;
			self.non_lhs_count += 1;
			let argument = ctx.run(|ctx| self.parse_unary_expr(ctx)).await?;
			if op == UnaryOp::Delete && self.scopes.strict() {
				if let ExprHint::Ident(_) = B::hint(&argument) {
					bail!("Cannot delete unqualified property names in strict mode"; @token.span.covers(self.last_span()));
				}
			}
			let span = token.span.covers(self.last_span());
			return Ok(self.builder.unary_expr(op, argument, span));
		}

		if let t!("++") | t!("--") = token.kind {
			self.pop_peek();
			self.non_trivial_count += 1;
			self.non_lhs_count += 1;
			let op = if token.kind == t!("++") {
				UpdateOp::Inc
			} else {
				UpdateOp::Dec
			};
			let argument = ctx.run(|ctx| self.parse_unary_expr(ctx)).await?;
			self.check_update_target(&argument, token)?;
			let span = token.span.covers(self.last_span());
			return Ok(self.builder.update_expr(op, true, argument, span));
		}

		self.parse_postfix_expr(ctx).await
	}

	/// Parse a member/call expression with an optional postfix `++`/`--`.
	async fn parse_postfix_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let expr = self.parse_member_expr(ctx).await?;
		let token = self.peek();
		// A line terminator before a postfix operator terminates the
		// expression; the operator then prefixes whatever follows.
		if let t!("++") | t!("--") = token.kind {
			if !token.newline_before {
				self.pop_peek();
				self.non_trivial_count += 1;
				self.non_lhs_count += 1;
				self.check_update_target(&expr, token)?;
				let op = if token.kind == t!("++") {
					UpdateOp::Inc
				} else {
					UpdateOp::Dec
				};
				let span = start.covers(token.span);
				return Ok(self.builder.update_expr(op, false, expr, span));
			}
		}
		Ok(expr)
	}

	fn check_update_target(&mut self, expr: &B::Expr, token: Token) -> ParseResult<()> {
		let hint = B::hint(expr);
		if !hint.is_assignment_target() {
			bail!("Operand of operator '{}' must be a reference", token.kind.as_str(); @token.span);
		}
		if let ExprHint::Ident(name) = hint {
			if self.scopes.strict() && (name == names::EVAL || name == names::ARGUMENTS) {
				let text = self.interner.resolve(name).to_owned();
				bail!("Cannot modify '{text}' in strict mode"; @token.span);
			}
			if name == names::ARGUMENTS {
				self.features |= Features::MODIFIED_ARGUMENTS;
			}
			if self
				.scopes
				.current_function()
				.map(|x| x.declares_parameter(name))
				.unwrap_or(false)
			{
				self.features |= Features::MODIFIED_PARAMETER;
			}
		}
		Ok(())
	}

	/// Parse a `yield` expression inside a generator body.
	async fn parse_yield_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let token = self.pop_peek();
		debug_assert_eq!(token.kind, t!("yield"));
		if self.function_parse_phase == super::FunctionParsePhase::Parameters {
			bail!("Cannot use 'yield' within parameters of a generator"; @token.span);
		}
		self.non_trivial_count += 1;
		self.non_lhs_count += 1;

		let next = self.peek();
		// No line terminator is allowed between `yield` and its argument.
		if next.newline_before {
			let span = token.span;
			return Ok(self.builder.yield_expr(false, None, span));
		}
		let delegate = if next.kind == t!("*") {
			self.pop_peek();
			true
		} else {
			false
		};
		if !delegate && !Self::token_starts_expression(next.kind) {
			let span = token.span;
			return Ok(self.builder.yield_expr(false, None, span));
		}
		let argument = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.yield_expr(delegate, Some(argument), span))
	}

	/// Returns whether a token can begin an expression, used to decide if
	/// `yield` and `return` take an argument.
	pub(crate) fn token_starts_expression(kind: TokenKind) -> bool {
		match kind {
			t!(")") | t!("]") | t!("}") | t!(";") | t!(",") | t!(":") | TokenKind::Eof => false,
			TokenKind::Template(crate::syn::token::TemplateKind::Middle) => false,
			TokenKind::Template(crate::syn::token::TemplateKind::Tail) => false,
			TokenKind::Operator(x) => {
				use crate::syn::token::Operator;
				matches!(
					x,
					Operator::Not
						| Operator::BitNot | Operator::Inc
						| Operator::Dec | Operator::Add
						| Operator::Sub | Operator::Div
				)
			}
			TokenKind::Keyword(x) => !matches!(
				x,
				Keyword::In
					| Keyword::InstanceOf | Keyword::Case
					| Keyword::Else | Keyword::Catch
					| Keyword::Finally | Keyword::While
			),
			_ => true,
		}
	}
}
