//! Statement parsing.

use reblessive::Stk;

use crate::ast::{Features, Ident};
use crate::syn::parser::builder::{CatchParts, SwitchClauseParts};
use crate::syn::parser::mac::{bail, enter_stmt_recursion, expected, unexpected};
use crate::syn::parser::{DestructureKind, ParseResult, Parser, ScopeKind, TreeBuild};
use crate::syn::token::{t, Span, TokenKind};

mod decl;
mod module;

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse a single statement.
	pub(crate) async fn parse_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		enter_stmt_recursion!(this = self => {
			this.parse_stmt_inner(ctx).await
		})
	}

	async fn parse_stmt_inner(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.peek();
		match token.kind {
			t!("{") => self.parse_block_stmt(ctx).await,
			t!(";") => {
				self.pop_peek();
				Ok(self.builder.empty_stmt(token.span))
			}
			t!("var") => self.parse_variable_stmt(ctx, DestructureKind::ToVariables).await,
			t!("const") => self.parse_variable_stmt(ctx, DestructureKind::ToConst).await,
			t!("let") => {
				if self.let_starts_declaration() {
					self.parse_variable_stmt(ctx, DestructureKind::ToLet).await
				} else {
					self.parse_expression_stmt(ctx).await
				}
			}
			t!("function") => {
				let (_, function) =
					ctx.run(|ctx| self.parse_function_declaration(ctx, true)).await?;
				let span = token.span.covers(self.last_span());
				Ok(self.builder.function_decl_stmt(function, span))
			}
			#[cfg(feature = "es6-class")]
			t!("class") => {
				self.pop_peek();
				let (name, class) =
					ctx.run(|ctx| self.parse_class_tail(ctx, token.span, true)).await?;
				if let Some(name) = name {
					self.declare_class_name(name, token.span)?;
				}
				let span = token.span.covers(self.last_span());
				Ok(self.builder.class_decl_stmt(class, span))
			}
			t!("if") => self.parse_if_stmt(ctx).await,
			t!("while") => self.parse_while_stmt(ctx).await,
			t!("do") => self.parse_do_while_stmt(ctx).await,
			t!("for") => self.parse_for_stmt(ctx).await,
			t!("switch") => self.parse_switch_stmt(ctx).await,
			t!("try") => self.parse_try_stmt(ctx).await,
			t!("return") => self.parse_return_stmt(ctx).await,
			t!("throw") => self.parse_throw_stmt(ctx).await,
			t!("break") => self.parse_break_stmt(),
			t!("continue") => self.parse_continue_stmt(),
			t!("with") => self.parse_with_stmt(ctx).await,
			t!("debugger") => {
				self.pop_peek();
				self.expect_semicolon()?;
				Ok(self.builder.debugger_stmt(token.span))
			}
			t!("import") | t!("export") => {
				bail!("Import and export declarations are only valid at the top level of a module"; @token.span);
			}
			_ => {
				if self.token_starts_label() {
					return self.parse_labeled_stmt(ctx).await;
				}
				self.parse_expression_stmt(ctx).await
			}
		}
	}

	/// Automatic semicolon insertion: a statement may end without an
	/// explicit `;` before a `}`, at the end of input, or after a line
	/// terminator.
	pub(crate) fn expect_semicolon(&mut self) -> ParseResult<()> {
		if self.eat(t!(";")) {
			return Ok(());
		}
		let token = self.peek();
		if token.is_eof() || token.kind == t!("}") || token.newline_before {
			return Ok(());
		}
		unexpected!(self, token, "`;` or a line terminator to end the statement")
	}

	/// Whether a `let` at statement position begins a declaration.
	///
	/// `let [` always does, per the standard; `let.` and `let(` are
	/// expressions in sloppy mode.
	fn let_starts_declaration(&mut self) -> bool {
		if self.scopes.strict() {
			return true;
		}
		let next = self.peek1();
		matches!(next.kind, t!("[") | t!("{") | TokenKind::Identifier)
			|| next.kind.can_be_identifier()
	}

	/// Whether the statement begins with `IDENT :`, a label.
	fn token_starts_label(&mut self) -> bool {
		let token = self.peek();
		let is_ident = match token.kind {
			TokenKind::Identifier => true,
			TokenKind::Keyword(x) if x.is_reserved_in_strict_only() => {
				!self.scopes.strict()
			}
			_ => false,
		};
		is_ident && self.peek1().kind == t!(":")
	}

	async fn parse_expression_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let start = self.recent_span();
		let expr = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_semicolon()?;
		let span = start.covers(self.last_span());
		Ok(self.builder.expr_stmt(expr, span))
	}

	/// Parse statements until the closing token, without directive
	/// processing. The closing token is not consumed.
	async fn parse_stmt_list(
		&mut self,
		ctx: &mut Stk,
		close: TokenKind,
	) -> ParseResult<Vec<B::Stmt>> {
		let mut elements = Vec::new();
		loop {
			let token = self.peek();
			if token.is_eof() || token.kind == close {
				break;
			}
			let stmt = ctx.run(|ctx| self.parse_stmt(ctx)).await?;
			elements.push(stmt);
		}
		Ok(elements)
	}

	/// Parse a `{ ... }` block into its statements, inside a fresh lexical
	/// scope.
	async fn parse_brace_block(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		let open = expected!(self, t!("{"));
		self.scopes.push_inheriting(ScopeKind::Block);
		let res = self.parse_stmt_list(ctx, t!("}")).await;
		let elements = match res {
			Ok(x) => x,
			Err(e) => {
				return Err(e);
			}
		};
		self.expect_closing_delimiter(t!("}"), open.span)?;
		self.scopes.pop();
		Ok(elements)
	}

	async fn parse_block_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let start = self.recent_span();
		let elements = self.parse_brace_block(ctx).await?;
		let span = start.covers(self.last_span());
		Ok(self.builder.block_stmt(elements, span))
	}

	async fn parse_if_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let open = expected!(self, t!("("));
		let test = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_closing_delimiter(t!(")"), open.span)?;
		let consequent = ctx.run(|ctx| self.parse_stmt(ctx)).await?;
		let alternate = if self.eat(t!("else")) {
			Some(ctx.run(|ctx| self.parse_stmt(ctx)).await?)
		} else {
			None
		};
		let span = token.span.covers(self.last_span());
		Ok(self.builder.if_stmt(test, consequent, alternate, span))
	}

	async fn parse_while_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let open = expected!(self, t!("("));
		let test = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_closing_delimiter(t!(")"), open.span)?;
		self.loop_depth += 1;
		let body = ctx.run(|ctx| self.parse_stmt(ctx)).await;
		self.loop_depth -= 1;
		let body = body?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.while_stmt(test, body, span))
	}

	async fn parse_do_while_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		self.loop_depth += 1;
		let body = ctx.run(|ctx| self.parse_stmt(ctx)).await;
		self.loop_depth -= 1;
		let body = body?;
		let while_token = self.peek();
		if while_token.kind != t!("while") {
			unexpected!(self, while_token, "`while` after a do-while body");
		}
		self.pop_peek();
		let open = expected!(self, t!("("));
		let test = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_closing_delimiter(t!(")"), open.span)?;
		// The semicolon after a do-while is always optional.
		self.eat(t!(";"));
		let span = token.span.covers(self.last_span());
		Ok(self.builder.do_while_stmt(body, test, span))
	}

	async fn parse_return_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		if !self.scopes.inside_function() {
			bail!("Return statements are only valid inside functions"; @token.span);
		}
		let next = self.peek();
		let argument = if next.newline_before || !Self::token_starts_expression(next.kind) {
			None
		} else {
			Some(ctx.run(|ctx| self.parse_expression(ctx)).await?)
		};
		self.expect_semicolon()?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.return_stmt(argument, span))
	}

	async fn parse_throw_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let next = self.peek();
		if next.newline_before {
			bail!("No line break is allowed between 'throw' and its expression"; @token.span);
		}
		let argument = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_semicolon()?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.throw_stmt(argument, span))
	}

	fn parse_break_stmt(&mut self) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let label = self.parse_jump_label()?;
		match label {
			Some((name, span)) => {
				if self.scopes.find_label(name).is_none() {
					let text = self.interner.resolve(name).to_owned();
					bail!("Cannot use the undeclared label '{text}'"; @span);
				}
			}
			None => {
				if self.loop_depth == 0 && self.switch_depth == 0 {
					bail!("'break' is only valid inside a loop or switch statement"; @token.span);
				}
			}
		}
		self.expect_semicolon()?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.break_stmt(label.map(|x| x.0), span))
	}

	fn parse_continue_stmt(&mut self) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let label = self.parse_jump_label()?;
		match label {
			Some((name, span)) => {
				let Some(label) = self.scopes.find_label(name) else {
					let text = self.interner.resolve(name).to_owned();
					bail!("Cannot use the undeclared label '{text}'"; @span);
				};
				if !label.is_loop {
					let text = self.interner.resolve(name).to_owned();
					bail!("Cannot continue to the label '{text}' as it is not targeting a loop"; @span);
				}
			}
			None => {
				if self.loop_depth == 0 {
					bail!("'continue' is only valid inside a loop statement"; @token.span);
				}
			}
		}
		self.expect_semicolon()?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.continue_stmt(label.map(|x| x.0), span))
	}

	/// The optional label of a `break`/`continue`; a line terminator
	/// terminates the statement instead.
	fn parse_jump_label(&mut self) -> ParseResult<Option<(Ident, Span)>> {
		let token = self.peek();
		if token.newline_before {
			return Ok(None);
		}
		let is_ident = match token.kind {
			TokenKind::Identifier => true,
			TokenKind::Keyword(x) if x.is_reserved_in_strict_only() => !self.scopes.strict(),
			_ => false,
		};
		if !is_ident {
			return Ok(None);
		}
		self.pop_peek();
		let name = self.ident_value(token);
		Ok(Some((name, token.span)))
	}

	async fn parse_labeled_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let start = self.recent_span();
		let mut labels: Vec<(Ident, Span)> = Vec::new();
		while self.token_starts_label() {
			let token = self.pop_peek();
			let name = self.ident_value(token);
			if self.scopes.find_label(name).is_some()
				|| labels.iter().any(|x| x.0 == name)
			{
				let text = self.interner.resolve(name).to_owned();
				bail!("Label '{text}' has already been declared"; @token.span);
			}
			labels.push((name, token.span));
			self.pop_peek();
		}
		// A label targets a loop if the labeled statement is one.
		let is_loop = matches!(self.peek_kind(), t!("for") | t!("while") | t!("do"));
		for (name, _) in labels.iter() {
			self.scopes.push_label(*name, is_loop);
		}
		let body = ctx.run(|ctx| self.parse_stmt(ctx)).await;
		for _ in labels.iter() {
			self.scopes.pop_label();
		}
		let mut body = body?;
		let span = start.covers(self.last_span());
		for (name, _) in labels.iter().rev() {
			body = self.builder.labeled_stmt(*name, body, span);
		}
		Ok(body)
	}

	async fn parse_with_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		if self.scopes.strict() {
			bail!("'with' statements are not valid in strict mode"; @token.span);
		}
		self.features |= Features::USES_WITH;
		if let Some(x) = self.scopes.current_function_mut() {
			x.needs_full_activation = true;
		}
		let open = expected!(self, t!("("));
		let object = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_closing_delimiter(t!(")"), open.span)?;
		self.scopes.push_inheriting(ScopeKind::With);
		let body = ctx.run(|ctx| self.parse_stmt(ctx)).await;
		self.scopes.pop();
		let body = body?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.with_stmt(object, body, span))
	}

	async fn parse_switch_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let open = expected!(self, t!("("));
		let discriminant = ctx.run(|ctx| self.parse_expression(ctx)).await?;
		self.expect_closing_delimiter(t!(")"), open.span)?;

		self.scopes.push_inheriting(ScopeKind::Switch);
		self.switch_depth += 1;
		let res = self.parse_switch_body(ctx).await;
		self.switch_depth -= 1;
		self.scopes.pop();
		let (cases, default, trailing_cases) = res?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.switch_stmt(discriminant, cases, default, trailing_cases, span))
	}

	#[allow(clippy::type_complexity)]
	async fn parse_switch_body(
		&mut self,
		ctx: &mut Stk,
	) -> ParseResult<(
		Vec<SwitchClauseParts<B::Expr, B::Stmt>>,
		Option<Vec<B::Stmt>>,
		Vec<SwitchClauseParts<B::Expr, B::Stmt>>,
	)> {
		let open = expected!(self, t!("{"));
		let mut cases = Vec::new();
		let mut default: Option<Vec<B::Stmt>> = None;
		let mut trailing_cases = Vec::new();
		loop {
			let token = self.peek();
			match token.kind {
				t!("}") => {
					self.pop_peek();
					break;
				}
				t!("case") => {
					self.pop_peek();
					let test = ctx.run(|ctx| self.parse_expression(ctx)).await?;
					expected!(self, t!(":"));
					let body = self.parse_clause_stmts(ctx).await?;
					let clause = SwitchClauseParts {
						test,
						body,
					};
					if default.is_some() {
						trailing_cases.push(clause);
					} else {
						cases.push(clause);
					}
				}
				t!("default") => {
					self.pop_peek();
					if default.is_some() {
						bail!("Switch statements may only contain a single default label"; @token.span);
					}
					expected!(self, t!(":"));
					default = Some(self.parse_clause_stmts(ctx).await?);
				}
				TokenKind::Eof => {
					self.expect_closing_delimiter(t!("}"), open.span)?;
				}
				_ => {
					unexpected!(self, token, "`case` or `default` in a switch body");
				}
			}
		}
		Ok((cases, default, trailing_cases))
	}

	/// The statements of one switch clause, up to the next clause or the
	/// closing brace.
	async fn parse_clause_stmts(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		let mut elements = Vec::new();
		loop {
			let token = self.peek();
			if matches!(token.kind, t!("case") | t!("default") | t!("}")) || token.is_eof() {
				break;
			}
			elements.push(ctx.run(|ctx| self.parse_stmt(ctx)).await?);
		}
		Ok(elements)
	}

	async fn parse_try_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		let block = self.parse_brace_block(ctx).await?;

		let handler = if self.peek_kind() == t!("catch") {
			self.pop_peek();
			let open = expected!(self, t!("("));
			// The catch parameter lives in its own lexical scope together
			// with the handler body.
			self.scopes.push_inheriting(ScopeKind::Catch);
			let res = self.parse_catch_tail(ctx, open.span).await;
			self.scopes.pop();
			Some(res?)
		} else {
			None
		};

		let finalizer = if self.eat(t!("finally")) {
			Some(self.parse_brace_block(ctx).await?)
		} else {
			None
		};

		if handler.is_none() && finalizer.is_none() {
			bail!("A try statement must have either a catch or a finally block"; @token.span);
		}

		let span = token.span.covers(self.last_span());
		Ok(self.builder.try_stmt(block, handler, finalizer, span))
	}

	async fn parse_catch_tail(
		&mut self,
		ctx: &mut Stk,
		open: Span,
	) -> ParseResult<CatchParts<B::Pattern, B::Stmt>> {
		let param = ctx
			.run(|ctx| self.parse_destructuring_pattern(ctx, DestructureKind::ToCatchParameters))
			.await?;
		self.expect_closing_delimiter(t!(")"), open)?;
		let body_open = expected!(self, t!("{"));
		let body = self.parse_stmt_list(ctx, t!("}")).await?;
		self.expect_closing_delimiter(t!("}"), body_open.span)?;
		Ok(CatchParts {
			param,
			body,
		})
	}

	#[cfg(feature = "es6-class")]
	fn declare_class_name(&mut self, name: Ident, span: Span) -> ParseResult<()> {
		use crate::syn::parser::DeclarationResult;
		let result = self.scopes.declare_lexical(name);
		if let Some(pending) = self.pending_binding_names.as_mut() {
			pending.push((name, span));
		}
		if result.contains(DeclarationResult::INVALID_STRICT_MODE) {
			let text = self.interner.resolve(name).to_owned();
			bail!("Cannot name a class '{text}' in strict mode"; @span);
		}
		if result.contains(DeclarationResult::INVALID_DUPLICATE) {
			let text = self.interner.resolve(name).to_owned();
			bail!("Cannot declare a lexical variable twice: '{text}'"; @span);
		}
		Ok(())
	}
}
