//! Module item parsing: `import` and `export` declarations.

use reblessive::Stk;

use crate::ast::{names, ExportSpecifier, Ident, ImportDecl, ImportSpecifier};
use crate::syn::parser::mac::{bail, expected, unexpected};
use crate::syn::parser::{
	DeclarationResult, DestructureKind, ParseResult, Parser, TreeBuild,
};
use crate::syn::token::{t, Span, Token, TokenKind};

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse the top level of a module: statements plus import and export
	/// declarations.
	pub(crate) async fn parse_module_items(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		let mut elements = Vec::new();
		loop {
			let token = self.peek();
			if token.is_eof() {
				break;
			}
			let stmt = match token.kind {
				t!("import") => ctx.run(|ctx| self.parse_import_stmt(ctx)).await?,
				t!("export") => ctx.run(|ctx| self.parse_export_stmt(ctx)).await?,
				_ => ctx.run(|ctx| self.parse_stmt(ctx)).await?,
			};
			elements.push(stmt);
		}
		Ok(elements)
	}

	/// Parse an `import` declaration.
	async fn parse_import_stmt(&mut self, _ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		debug_assert_eq!(token.kind, t!("import"));

		// `import "mod"` imports for side effects only.
		if self.peek_kind() == TokenKind::Strand {
			let source = self.parse_module_specifier()?;
			self.expect_semicolon()?;
			let span = token.span.covers(self.last_span());
			let decl = ImportDecl {
				default: None,
				namespace: None,
				named: Vec::new(),
				source,
				span,
			};
			return Ok(self.builder.import_stmt(decl, span));
		}

		let mut default = None;
		let mut namespace = None;
		let mut named = Vec::new();

		let next = self.peek();
		match next.kind {
			t!("*") => {
				namespace = Some(self.parse_namespace_import()?);
			}
			t!("{") => {
				named = self.parse_named_imports()?;
			}
			_ => {
				let name = self.parse_binding_identifier()?;
				let span = self.last_span();
				self.declare_import(name, span)?;
				default = Some(name);
				if self.eat(t!(",")) {
					let next = self.peek();
					match next.kind {
						t!("*") => {
							namespace = Some(self.parse_namespace_import()?);
						}
						t!("{") => {
							named = self.parse_named_imports()?;
						}
						_ => {
							unexpected!(self, next, "`*` or `{` after the default import");
						}
					}
				}
			}
		}

		self.expect_contextual(names::FROM, "`from` before the module specifier")?;
		let source = self.parse_module_specifier()?;
		self.expect_semicolon()?;
		let span = token.span.covers(self.last_span());
		let decl = ImportDecl {
			default,
			namespace,
			named,
			source,
			span,
		};
		Ok(self.builder.import_stmt(decl, span))
	}

	/// `* as ns`
	fn parse_namespace_import(&mut self) -> ParseResult<Ident> {
		expected!(self, t!("*"));
		self.expect_contextual(names::AS, "`as` after `*`")?;
		let name = self.parse_binding_identifier()?;
		let span = self.last_span();
		self.declare_import(name, span)?;
		Ok(name)
	}

	/// `{a, b as c, default as d}`
	fn parse_named_imports(&mut self) -> ParseResult<Vec<ImportSpecifier>> {
		let open = expected!(self, t!("{"));
		let mut specifiers = Vec::new();
		loop {
			if self.eat(t!("}")) {
				break;
			}
			// The imported name is an identifier name: keywords are fine as
			// long as the local binding is renamed.
			let token = self.next();
			if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword(_)) {
				unexpected!(self, token, "an import name");
			}
			let imported = self.ident_value(token);
			let local = if self.at_contextual(names::AS) {
				self.pop_peek();
				let local = self.parse_binding_identifier()?;
				let span = self.last_span();
				self.declare_import(local, span)?;
				local
			} else {
				if !matches!(token.kind, TokenKind::Identifier)
					&& !token.kind.can_be_identifier()
				{
					unexpected!(self, token, "`as` after a reserved-word import name");
				}
				self.declare_import(imported, token.span)?;
				imported
			};
			specifiers.push(ImportSpecifier {
				imported,
				local,
			});
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!("}"), open.span)?;
				break;
			}
		}
		Ok(specifiers)
	}

	/// Declare an imported binding; imports are lexical and may not be
	/// duplicated.
	fn declare_import(&mut self, name: Ident, span: Span) -> ParseResult<()> {
		let result = self.scopes.declare_lexical(name);
		if result.contains(DeclarationResult::INVALID_DUPLICATE) {
			let text = self.interner.resolve(name).to_owned();
			bail!("Cannot declare an imported binding '{text}' twice"; @span);
		}
		Ok(())
	}

	/// Parse an `export` declaration.
	async fn parse_export_stmt(&mut self, ctx: &mut Stk) -> ParseResult<B::Stmt> {
		let token = self.pop_peek();
		debug_assert_eq!(token.kind, t!("export"));

		let next = self.peek();
		match next.kind {
			t!("*") => {
				self.pop_peek();
				self.expect_contextual(names::FROM, "`from` after `export *`")?;
				let source = self.parse_module_specifier()?;
				self.expect_semicolon()?;
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_all_stmt(source, span))
			}
			t!("default") => {
				self.pop_peek();
				if !self.scopes.add_export(names::DEFAULT, next.span) {
					bail!("Only one 'default' export is allowed per module"; @next.span);
				}
				self.parse_export_default(ctx, token).await
			}
			t!("{") => self.parse_export_named(ctx, token).await,
			t!("var") | t!("let") | t!("const") => {
				let kind = match next.kind {
					t!("var") => DestructureKind::ToVariables,
					t!("let") => DestructureKind::ToLet,
					_ => DestructureKind::ToConst,
				};
				let outer = self.pending_binding_names.replace(Vec::new());
				let stmt = ctx.run(|ctx| self.parse_variable_stmt(ctx, kind)).await;
				let declared = self.pending_binding_names.take().unwrap_or_default();
				self.pending_binding_names = outer;
				let stmt = stmt?;
				self.register_declared_exports(declared)?;
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_local_stmt(stmt, span))
			}
			t!("function") => {
				let outer = self.pending_binding_names.replace(Vec::new());
				let start = next.span;
				let res = ctx.run(|ctx| self.parse_function_declaration(ctx, true)).await;
				let declared = self.pending_binding_names.take().unwrap_or_default();
				self.pending_binding_names = outer;
				let (_, function) = res?;
				self.register_declared_exports(declared)?;
				let fn_span = start.covers(self.last_span());
				let stmt = self.builder.function_decl_stmt(function, fn_span);
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_local_stmt(stmt, span))
			}
			#[cfg(feature = "es6-class")]
			t!("class") => {
				let start = self.pop_peek().span;
				let (name, class) =
					ctx.run(|ctx| self.parse_class_tail(ctx, start, true)).await?;
				if let Some(name) = name {
					self.declare_class_name(name, start)?;
					if !self.scopes.add_export(name, start) {
						let text = self.interner.resolve(name).to_owned();
						bail!("Cannot export the name '{text}' twice"; @start);
					}
				}
				let class_span = start.covers(self.last_span());
				let stmt = self.builder.class_decl_stmt(class, class_span);
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_local_stmt(stmt, span))
			}
			_ => {
				unexpected!(self, next, "a declaration or an export clause after `export`")
			}
		}
	}

	/// `export default ...`
	async fn parse_export_default(&mut self, ctx: &mut Stk, token: Token) -> ParseResult<B::Stmt> {
		let next = self.peek();
		match next.kind {
			t!("function") => {
				let (_, function) =
					ctx.run(|ctx| self.parse_function_declaration(ctx, false)).await?;
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_default_function_stmt(function, span))
			}
			#[cfg(feature = "es6-class")]
			t!("class") => {
				self.pop_peek();
				let (name, class) =
					ctx.run(|ctx| self.parse_class_tail(ctx, next.span, false)).await?;
				if let Some(name) = name {
					self.declare_class_name(name, next.span)?;
				}
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_default_class_stmt(class, span))
			}
			_ => {
				let expr = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
				self.expect_semicolon()?;
				let span = token.span.covers(self.last_span());
				Ok(self.builder.export_default_expr_stmt(expr, span))
			}
		}
	}

	/// `export {a, b as c}` with an optional `from` clause.
	async fn parse_export_named(&mut self, _ctx: &mut Stk, token: Token) -> ParseResult<B::Stmt> {
		let open = expected!(self, t!("{"));
		let mut specifiers: Vec<(ExportSpecifier, Span)> = Vec::new();
		loop {
			if self.eat(t!("}")) {
				break;
			}
			let local_token = self.next();
			if !matches!(local_token.kind, TokenKind::Identifier | TokenKind::Keyword(_)) {
				unexpected!(self, local_token, "a binding name to export");
			}
			let local = self.ident_value(local_token);
			let exported = if self.at_contextual(names::AS) {
				self.pop_peek();
				let token = self.next();
				if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword(_)) {
					unexpected!(self, token, "an export name");
				}
				self.ident_value(token)
			} else {
				local
			};
			specifiers.push((
				ExportSpecifier {
					local,
					exported,
				},
				local_token.span,
			));
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!("}"), open.span)?;
				break;
			}
		}

		let source = if self.at_contextual(names::FROM) {
			self.pop_peek();
			Some(self.parse_module_specifier()?)
		} else {
			None
		};
		self.expect_semicolon()?;

		let is_reexport = source.is_some();
		let mut out = Vec::with_capacity(specifiers.len());
		for (specifier, span) in specifiers {
			if !self.scopes.add_export(specifier.exported, span) {
				let text = self.interner.resolve(specifier.exported).to_owned();
				bail!("Cannot export the name '{text}' twice"; @span);
			}
			// A re-export resolves in the requested module; a plain named
			// export must resolve to a local declaration by the end of the
			// module.
			if !is_reexport {
				self.export_locals.push((specifier.local, span));
			}
			out.push(specifier);
		}

		let span = token.span.covers(self.last_span());
		Ok(self.builder.export_named_stmt(out, source, span))
	}

	/// Register every name an exported declaration declared.
	fn register_declared_exports(&mut self, declared: Vec<(Ident, Span)>) -> ParseResult<()> {
		for (name, span) in declared {
			if !self.scopes.add_export(name, span) {
				let text = self.interner.resolve(name).to_owned();
				bail!("Cannot export the name '{text}' twice"; @span);
			}
		}
		Ok(())
	}

	/// The string literal naming the requested module.
	fn parse_module_specifier(&mut self) -> ParseResult<Ident> {
		let token = self.next();
		if token.kind != TokenKind::Strand {
			unexpected!(self, token, "a module specifier string");
		}
		let (value, _, _) = self.strand_value(token);
		Ok(value)
	}

	/// Whether the next token is the given contextual keyword, written
	/// without escapes.
	fn at_contextual(&mut self, name: Ident) -> bool {
		let token = self.peek();
		if token.kind != TokenKind::Identifier {
			return false;
		}
		let text = self.lexer.reader.span(token.span);
		self.interner.get(std::str::from_utf8(text).unwrap_or_default()) == Some(name)
	}

	fn expect_contextual(&mut self, name: Ident, expected: &'static str) -> ParseResult<()> {
		if !self.at_contextual(name) {
			let token = self.peek();
			unexpected!(self, token, expected);
		}
		self.pop_peek();
		Ok(())
	}
}
