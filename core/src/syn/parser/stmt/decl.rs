//! Variable declarations and the `for` statement, whose header shares the
//! declaration grammar.

use reblessive::Stk;

use crate::syn::parser::builder::{DeclaratorParts, ForHeadParts, ForInitParts};
use crate::syn::parser::mac::{bail, expected, unexpected};
use crate::syn::parser::{DestructureKind, ParseResult, Parser, ScopeKind, TreeBuild};
use crate::syn::token::{t, TokenKind};

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse a `var`/`let`/`const` statement. The keyword is the next
	/// token.
	pub(super) async fn parse_variable_stmt(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let decl = self.parse_variable_declaration(ctx, kind).await?;
		self.expect_semicolon()?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.var_decl_stmt(decl, span))
	}

	/// Parse the declarator list of a declaration at statement position.
	pub(super) async fn parse_variable_declaration(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::VarDecl> {
		let decl_kind = kind.decl_kind().expect("not a declaration kind");
		let mut declarations = Vec::new();
		loop {
			let pattern_start = self.peek();
			let is_destructuring = matches!(pattern_start.kind, t!("[") | t!("{"));
			let pattern =
				ctx.run(|ctx| self.parse_destructuring_pattern(ctx, kind)).await?;
			let init = if self.eat(t!("=")) {
				Some(ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?)
			} else {
				None
			};
			if init.is_none() {
				if kind == DestructureKind::ToConst {
					bail!("const declared variables must have an initializer"; @pattern_start.span.covers(self.last_span()));
				}
				if is_destructuring {
					bail!("Destructured variable declarations must have an initializer"; @pattern_start.span.covers(self.last_span()));
				}
			}
			let span = pattern_start.span.covers(self.last_span());
			declarations.push(DeclaratorParts {
				pattern,
				init,
				span,
			});
			if !self.eat(t!(",")) {
				break;
			}
		}
		Ok(self.builder.var_decl(decl_kind, declarations))
	}

	/// Parse a `for` statement, disambiguating the three header grammars:
	/// `for (;;)`, `for (.. in ..)`, and `for (.. of ..)`.
	pub(super) async fn parse_for_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		debug_assert_eq!(token.kind, t!("for"));
		let open = expected!(self, t!("("));

		let head = self.peek();
		match head.kind {
			t!(";") => {
				self.pop_peek();
				self.parse_for_classic_tail(ctx, token.span, open.span, None).await
			}
			t!("var") => {
				self.pop_peek();
				self.parse_for_declaration(
					ctx,
					token.span,
					open.span,
					DestructureKind::ToVariables,
				)
				.await
			}
			t!("const") => {
				self.pop_peek();
				// A lexical header binding lives in a scope that wraps only
				// the header expressions and the body.
				self.scopes.push_inheriting(ScopeKind::Block);
				let res = self
					.parse_for_declaration(ctx, token.span, open.span, DestructureKind::ToConst)
					.await;
				self.scopes.pop();
				res
			}
			t!("let") if self.let_starts_for_declaration() => {
				self.pop_peek();
				self.scopes.push_inheriting(ScopeKind::Block);
				let res = self
					.parse_for_declaration(ctx, token.span, open.span, DestructureKind::ToLet)
					.await;
				self.scopes.pop();
				res
			}
			_ => self.parse_for_expr_head(ctx, token.span, open.span).await,
		}
	}

	/// `let` in a for-header begins a declaration under the same rules as
	/// at statement position; `for (let.x in y)` is an expression header.
	fn let_starts_for_declaration(&mut self) -> bool {
		if self.scopes.strict() {
			return true;
		}
		let next = self.peek1();
		matches!(next.kind, t!("[") | t!("{") | TokenKind::Identifier)
			|| next.kind.can_be_identifier()
	}

	/// A for-header starting with a declaration keyword, which is the
	/// point where the three grammars diverge.
	async fn parse_for_declaration(
		&mut self,
		ctx: &mut Stk,
		for_span: crate::syn::token::Span,
		open: crate::syn::token::Span,
		kind: DestructureKind,
	) -> ParseResult<B::Stmt> {
		let decl_kind = kind.decl_kind().expect("not a declaration kind");
		let pattern_start = self.peek();
		let is_destructuring = matches!(pattern_start.kind, t!("[") | t!("{"));

		let old_allows_in = self.allows_in;
		self.allows_in = false;
		let pattern = ctx.run(|ctx| self.parse_destructuring_pattern(ctx, kind)).await;
		self.allows_in = old_allows_in;
		let pattern = pattern?;

		// `for (const c in o)` and `for (let k of xs)` take no initializer;
		// a const without one is legal exactly here.
		if self.peek_kind() == t!("in") {
			self.pop_peek();
			let right = ctx.run(|ctx| self.parse_expression(ctx)).await?;
			self.expect_closing_delimiter(t!(")"), open)?;
			let head = ForHeadParts::Decl {
				kind: decl_kind,
				pattern,
			};
			let body = self.parse_loop_body(ctx).await?;
			let span = for_span.covers(self.last_span());
			return Ok(self.builder.for_in_stmt(head, right, body, span));
		}
		if self.at_contextual_of() {
			self.pop_peek();
			let right = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
			self.expect_closing_delimiter(t!(")"), open)?;
			let head = ForHeadParts::Decl {
				kind: decl_kind,
				pattern,
			};
			let body = self.parse_loop_body(ctx).await?;
			let span = for_span.covers(self.last_span());
			return Ok(self.builder.for_of_stmt(head, right, body, span));
		}

		// A classic for-loop, with the usual initializer rules and possibly
		// more declarators.
		let mut declarations = Vec::new();
		let mut pattern = Some(pattern);
		let mut pattern_span = pattern_start.span;
		let mut first_is_destructuring = is_destructuring;
		loop {
			let pattern = match pattern.take() {
				Some(x) => x,
				None => {
					pattern_span = self.peek().span;
					first_is_destructuring =
						matches!(self.peek_kind(), t!("[") | t!("{"));
					let old_allows_in = self.allows_in;
					self.allows_in = false;
					let res = ctx
						.run(|ctx| self.parse_destructuring_pattern(ctx, kind))
						.await;
					self.allows_in = old_allows_in;
					res?
				}
			};
			let init = if self.eat(t!("=")) {
				let old_allows_in = self.allows_in;
				self.allows_in = false;
				let res = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await;
				self.allows_in = old_allows_in;
				Some(res?)
			} else {
				None
			};
			if init.is_none() {
				if kind == DestructureKind::ToConst {
					bail!("const declared variables must have an initializer"; @pattern_span.covers(self.last_span()));
				}
				if first_is_destructuring {
					bail!("Destructured variable declarations must have an initializer"; @pattern_span.covers(self.last_span()));
				}
			}
			let span = pattern_span.covers(self.last_span());
			declarations.push(DeclaratorParts {
				pattern,
				init,
				span,
			});
			if !self.eat(t!(",")) {
				break;
			}
		}
		let decl = self.builder.var_decl(decl_kind, declarations);
		let init = Some(ForInitParts::VarDecl(decl));

		let semi = self.peek();
		if semi.kind != t!(";") {
			unexpected!(self, semi, "`;`, `in`, or `of` in a for-loop header");
		}
		self.pop_peek();
		self.parse_for_classic_tail(ctx, for_span, open, init).await
	}

	/// A for-header starting with an expression.
	async fn parse_for_expr_head(
		&mut self,
		ctx: &mut Stk,
		for_span: crate::syn::token::Span,
		open: crate::syn::token::Span,
	) -> ParseResult<B::Stmt> {
		let save_point = self.save_point();
		let head_start = self.peek().span;

		let old_allows_in = self.allows_in;
		self.allows_in = false;
		let expr = ctx.run(|ctx| self.parse_expression(ctx)).await;
		self.allows_in = old_allows_in;

		// A failed parse of a header that opens with `[` or `{` may still be
		// a destructuring target.
		let expr = match expr {
			Ok(x) => x,
			Err(e) => {
				if self.indicates_pattern.take().is_none() {
					return Err(e);
				}
				self.rewind(save_point);
				return self.parse_for_pattern_head(ctx, for_span, open).await;
			}
		};

		let is_in = self.peek_kind() == t!("in");
		let is_of = !is_in && self.at_contextual_of();
		if is_in || is_of {
			let hint = B::hint(&expr);
			if hint.is_object_or_array_literal() {
				self.rewind(save_point);
				return self.parse_for_pattern_head(ctx, for_span, open).await;
			}
			if !hint.is_assignment_target() {
				let kw = if is_in {
					"for-in"
				} else {
					"for-of"
				};
				bail!("Invalid left-hand side in a {kw} loop header"; @head_start.covers(self.last_span()));
			}
			self.pop_peek();
			let span = head_start.covers(self.last_span());
			let pattern = self.builder.expr_pattern(expr, span);
			let right = if is_in {
				ctx.run(|ctx| self.parse_expression(ctx)).await?
			} else {
				ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?
			};
			self.expect_closing_delimiter(t!(")"), open)?;
			let body = self.parse_loop_body(ctx).await?;
			let span = for_span.covers(self.last_span());
			let head = ForHeadParts::Pattern(pattern);
			return if is_in {
				Ok(self.builder.for_in_stmt(head, right, body, span))
			} else {
				Ok(self.builder.for_of_stmt(head, right, body, span))
			};
		}

		if let Some(span) = self.indicates_pattern.take() {
			bail!("A shorthand property initializer is only valid in a destructuring pattern"; @span);
		}

		let semi = self.peek();
		if semi.kind != t!(";") {
			unexpected!(self, semi, "`;`, `in`, or `of` in a for-loop header");
		}
		self.pop_peek();
		self.parse_for_classic_tail(ctx, for_span, open, Some(ForInitParts::Expr(expr))).await
	}

	/// Re-parse a for-in/of header that turned out to be a destructuring
	/// assignment target.
	async fn parse_for_pattern_head(
		&mut self,
		ctx: &mut Stk,
		for_span: crate::syn::token::Span,
		open: crate::syn::token::Span,
	) -> ParseResult<B::Stmt> {
		let pattern = ctx
			.run(|ctx| self.parse_destructuring_pattern(ctx, DestructureKind::ToExpressions))
			.await?;
		self.indicates_pattern = None;
		let token = self.peek();
		let is_in = token.kind == t!("in");
		let is_of = !is_in && self.at_contextual_of();
		if !is_in && !is_of {
			unexpected!(self, token, "`in` or `of` after a destructuring loop target");
		}
		self.pop_peek();
		let right = if is_in {
			ctx.run(|ctx| self.parse_expression(ctx)).await?
		} else {
			ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?
		};
		self.expect_closing_delimiter(t!(")"), open)?;
		let body = self.parse_loop_body(ctx).await?;
		let span = for_span.covers(self.last_span());
		let head = ForHeadParts::Pattern(pattern);
		if is_in {
			Ok(self.builder.for_in_stmt(head, right, body, span))
		} else {
			Ok(self.builder.for_of_stmt(head, right, body, span))
		}
	}

	/// The `; test ; update ) body` tail shared by every classic for-loop.
	async fn parse_for_classic_tail(
		&mut self,
		ctx: &mut Stk,
		for_span: crate::syn::token::Span,
		open: crate::syn::token::Span,
		init: Option<ForInitParts<B::VarDecl, B::Expr>>,
	) -> ParseResult<B::Stmt> {
		let test = if self.peek_kind() == t!(";") {
			None
		} else {
			Some(ctx.run(|ctx| self.parse_expression(ctx)).await?)
		};
		expected!(self, t!(";"));
		let update = if self.peek_kind() == t!(")") {
			None
		} else {
			Some(ctx.run(|ctx| self.parse_expression(ctx)).await?)
		};
		self.expect_closing_delimiter(t!(")"), open)?;
		let body = self.parse_loop_body(ctx).await?;
		let span = for_span.covers(self.last_span());
		Ok(self.builder.for_stmt(init, test, update, body, span))
	}

	/// Parse a loop body with the iteration depth raised.
	pub(super) async fn parse_loop_body(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		self.loop_depth += 1;
		let body = ctx.run(|ctx| self.parse_stmt(ctx)).await;
		self.loop_depth -= 1;
		body
	}

	/// Whether the next token is the contextual keyword `of`.
	fn at_contextual_of(&mut self) -> bool {
		let token = self.peek();
		token.kind == TokenKind::Identifier && {
			let text = self.lexer.reader.span(token.span);
			text == b"of"
		}
	}
}
