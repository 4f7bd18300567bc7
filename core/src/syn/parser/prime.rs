//! Parsing of primary expressions and member/call chains.

use reblessive::Stk;

use crate::ast::{names, Features, FunctionKind, Ident, TemplateElement};
use crate::syn::parser::builder::{PropKey, PropValue, PropertyParts};
use crate::syn::parser::mac::{bail, expected, unexpected};
use crate::syn::parser::{ParseError, ParseErrorKind, ParseResult, Parser, TreeBuild};
use crate::syn::token::{t, Keyword, Span, TemplateKind, Token, TokenKind};

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse a member expression: a primary expression followed by any
	/// number of property accesses, calls, and tagged templates, with `new`
	/// handled as a prefix.
	pub(crate) async fn parse_member_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.recent_span();
		let expr = if self.peek_kind() == t!("new") {
			self.parse_new_expr(ctx).await?
		} else {
			self.parse_primary_expr(ctx).await?
		};
		self.parse_suffixes(ctx, expr, start, true).await
	}

	/// Parse a `new` expression or the `new.target` meta property.
	async fn parse_new_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let new_token = self.pop_peek();
		debug_assert_eq!(new_token.kind, t!("new"));

		if self.eat(t!(".")) {
			let token = self.next();
			let is_target =
				token.kind == TokenKind::Identifier && self.ident_value(token) == names::TARGET;
			if !is_target {
				unexpected!(self, token, "`target` after `new.`");
			}
			if !self.scopes.inside_function() {
				bail!("new.target is only valid inside functions"; @new_token.span.covers(token.span));
			}
			self.non_trivial_count += 1;
			let span = new_token.span.covers(token.span);
			return Ok(self.builder.new_target_expr(span));
		}

		self.non_trivial_count += 1;
		self.non_lhs_count += 1;
		// The callee may itself be a `new` expression, `new new F()()`.
		let callee = if self.peek_kind() == t!("new") {
			ctx.run(|ctx| self.parse_new_expr(ctx)).await?
		} else {
			let start = self.recent_span();
			let primary = ctx.run(|ctx| self.parse_primary_expr(ctx)).await?;
			// Calls bind to the `new`, member accesses bind to the callee.
			self.parse_suffixes(ctx, primary, start, false).await?
		};
		let arguments = if self.peek_kind() == t!("(") {
			Some(self.parse_arguments(ctx).await?)
		} else {
			None
		};
		let span = new_token.span.covers(self.last_span());
		Ok(self.builder.new_expr(callee, arguments, span))
	}

	/// Parse the suffixes of a member expression. When `allow_calls` is
	/// false, call arguments are left for the caller; `new` callees use
	/// this.
	async fn parse_suffixes(
		&mut self,
		ctx: &mut Stk,
		mut expr: B::Expr,
		start: Span,
		allow_calls: bool,
	) -> ParseResult<B::Expr> {
		loop {
			let token = self.peek();
			match token.kind {
				t!(".") => {
					self.pop_peek();
					let name_token = self.next();
					// Property names may be any identifier name, including
					// reserved words.
					if !matches!(
						name_token.kind,
						TokenKind::Identifier | TokenKind::Keyword(_)
					) {
						unexpected!(self, name_token, "a property name");
					}
					let name = self.ident_value(name_token);
					self.non_trivial_count += 1;
					let span = start.covers(name_token.span);
					expr = self.builder.member_dot_expr(expr, name, span);
				}
				t!("[") => {
					self.pop_peek();
					self.non_trivial_count += 1;
					let old_allows_in = self.allows_in;
					self.allows_in = true;
					let property = ctx.run(|ctx| self.parse_expression(ctx)).await;
					self.allows_in = old_allows_in;
					let property = property?;
					self.expect_closing_delimiter(t!("]"), token.span)?;
					let span = start.covers(self.last_span());
					expr = self.builder.member_bracket_expr(expr, property, span);
				}
				t!("(") if allow_calls => {
					// A direct call to eval observes the local scope, which
					// the compiler needs to know about.
					if let super::ExprHint::Ident(name) = B::hint(&expr) {
						if name == names::EVAL {
							self.features |= Features::USES_EVAL;
							if let Some(x) = self.scopes.current_function_mut() {
								x.needs_full_activation = true;
							}
						}
					}
					let arguments = self.parse_arguments(ctx).await?;
					self.non_trivial_count += 1;
					let span = start.covers(self.last_span());
					expr = self.builder.call_expr(expr, arguments, span);
				}
				#[cfg(feature = "es6-template-literals")]
				TokenKind::Template(TemplateKind::Full)
				| TokenKind::Template(TemplateKind::Head) => {
					self.non_trivial_count += 1;
					expr = ctx.run(|ctx| self.parse_template_literal(ctx, Some(expr), start)).await?;
				}
				_ => break,
			}
		}
		Ok(expr)
	}

	/// Parse a parenthesized argument list, including spread arguments.
	async fn parse_arguments(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Expr>> {
		let open = expected!(self, t!("("));
		let old_allows_in = self.allows_in;
		self.allows_in = true;
		let res = self.parse_arguments_inner(ctx, open).await;
		self.allows_in = old_allows_in;
		res
	}

	async fn parse_arguments_inner(
		&mut self,
		ctx: &mut Stk,
		open: Token,
	) -> ParseResult<Vec<B::Expr>> {
		let mut arguments = Vec::new();
		loop {
			if self.eat(t!(")")) {
				return Ok(arguments);
			}
			let token = self.peek();
			if token.kind == t!("...") {
				self.pop_peek();
				let argument = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
				let span = token.span.covers(self.last_span());
				arguments.push(self.builder.spread_expr(argument, span));
			} else {
				arguments.push(ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?);
			}
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!(")"), open.span)?;
				return Ok(arguments);
			}
		}
	}

	/// Parse a primary expression.
	pub(crate) async fn parse_primary_expr(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let token = self.peek();
		match token.kind {
			t!("(") => {
				self.pop_peek();
				self.non_trivial_count += 1;
				let old_allows_in = self.allows_in;
				self.allows_in = true;
				let expr = ctx.run(|ctx| self.parse_expression(ctx)).await;
				self.allows_in = old_allows_in;
				let expr = expr?;
				self.expect_closing_delimiter(t!(")"), token.span)?;
				Ok(expr)
			}
			t!("this") => {
				self.pop_peek();
				self.features |= Features::USES_THIS;
				Ok(self.builder.this_expr(token.span))
			}
			t!("super") => {
				self.pop_peek();
				self.parse_super_head(token)
			}
			t!("true") => {
				self.pop_peek();
				Ok(self.builder.bool_expr(true, token.span))
			}
			t!("false") => {
				self.pop_peek();
				Ok(self.builder.bool_expr(false, token.span))
			}
			t!("null") => {
				self.pop_peek();
				Ok(self.builder.null_expr(token.span))
			}
			TokenKind::Number(_) => {
				self.pop_peek();
				if Self::number_is_legacy_octal(token) && self.scopes.strict() {
					bail!("Octal literals are not allowed in strict mode"; @token.span);
				}
				let value = self.number_value(token);
				self.num_constants += 1;
				Ok(self.builder.number_expr(value, token.span))
			}
			TokenKind::Strand => {
				self.pop_peek();
				let (value, _, has_octal) = self.strand_value(token);
				if has_octal && self.scopes.strict() {
					bail!("Octal escape sequences are not allowed in strict mode"; @token.span);
				}
				self.num_constants += 1;
				Ok(self.builder.string_expr(value, token.span))
			}
			#[cfg(feature = "es6-template-literals")]
			TokenKind::Template(TemplateKind::Full) | TokenKind::Template(TemplateKind::Head) => {
				self.parse_template_literal(ctx, None, token.span).await
			}
			t!("/") | t!("/=") => self.parse_regex_literal(token),
			t!("[") => self.parse_array_literal(ctx).await,
			t!("{") => self.parse_object_literal(ctx).await,
			t!("function") => self.parse_function_expression(ctx).await,
			#[cfg(feature = "es6-class")]
			t!("class") => {
				self.pop_peek();
				let (_, class) =
					ctx.run(|ctx| self.parse_class_tail(ctx, token.span, false)).await?;
				let span = token.span.covers(self.last_span());
				Ok(self.builder.class_expr(class, span))
			}
			TokenKind::Identifier => {
				self.pop_peek();
				let name = self.ident_value(token);
				self.use_ident(name);
				Ok(self.builder.ident_expr(name, token.span))
			}
			TokenKind::Keyword(x) if x.is_reserved_in_strict_only() => {
				if self.scopes.strict() {
					bail!("Cannot use the reserved word '{}' in strict mode", x.as_str(); @token.span);
				}
				if x == Keyword::Yield && self.scopes.in_generator() {
					bail!("Cannot use 'yield' as an identifier inside a generator"; @token.span);
				}
				self.pop_peek();
				let name = self.ident_value(token);
				self.use_ident(name);
				Ok(self.builder.ident_expr(name, token.span))
			}
			_ => {
				unexpected!(self, token, "an expression")
			}
		}
	}

	/// Validate a `super` head against the enclosing function context.
	///
	/// Arrow functions delegate to the closest enclosing non-arrow function
	/// by walking the scope stack.
	fn parse_super_head(&mut self, token: Token) -> ParseResult<B::Expr> {
		use crate::ast::ConstructorKind;
		use crate::syn::parser::SuperBinding;

		let next = self.peek();
		match next.kind {
			t!("(") => {
				let is_derived_ctor = self
					.scopes
					.closest_non_arrow_function()
					.map(|x| x.constructor_kind == ConstructorKind::Derived)
					.unwrap_or(false);
				if !is_derived_ctor && !self.is_builtin() {
					bail!("super is not valid in this context"; @token.span => "super calls are only valid inside a derived class constructor");
				}
				if let Some(x) = self.scopes.closest_non_arrow_function_mut() {
					x.has_direct_super = true;
				}
			}
			t!(".") | t!("[") => {
				let in_method = self
					.scopes
					.closest_non_arrow_function()
					.map(|x| {
						matches!(
							x.function_kind,
							Some(FunctionKind::Method)
								| Some(FunctionKind::Getter)
								| Some(FunctionKind::Setter)
						) || x.constructor_kind != ConstructorKind::None
							|| x.expected_super_binding == SuperBinding::Needed
					})
					.unwrap_or(false);
				if !in_method && !self.is_builtin() {
					bail!("super is not valid in this context"; @token.span => "super property access is only valid inside a method");
				}
			}
			_ => {
				unexpected!(self, next, "`(`, `.`, or `[` after `super`");
			}
		}
		self.non_trivial_count += 1;
		Ok(self.builder.super_expr(token.span))
	}

	/// Rescan a `/` token as a regular expression literal.
	fn parse_regex_literal(&mut self, token: Token) -> ParseResult<B::Expr> {
		self.backup_before_token(token);
		let regex = self.lexer.scan_regex();
		self.last_span = regex.span;
		self.last_token_kind = regex.kind;
		if regex.is_invalid() {
			let error = self.lexer.error.take().unwrap();
			return Err(ParseError::new(ParseErrorKind::InvalidToken(error), regex.span));
		}
		let pattern = self.lexer.string.take().unwrap_or_default();
		let flags = self.lexer.regex_flags.take().unwrap_or_default();
		for c in flags.chars() {
			if !matches!(c, 'g' | 'i' | 'm' | 'u' | 'y') {
				bail!("Invalid regular expression flag '{c}'"; @regex.span);
			}
		}
		let pattern = self.interner.intern(&pattern);
		let flags = self.interner.intern(&flags);
		self.num_constants += 1;
		Ok(self.builder.regex_expr(pattern, flags, regex.span))
	}

	/// Parse an array literal, `[a, , b, ...c]`.
	async fn parse_array_literal(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let open = self.pop_peek();
		debug_assert_eq!(open.kind, t!("["));
		let mut elements = Vec::new();
		loop {
			if self.eat(t!("]")) {
				break;
			}
			if self.eat(t!(",")) {
				// An elision.
				elements.push(None);
				continue;
			}
			let token = self.peek();
			let element = if token.kind == t!("...") {
				self.pop_peek();
				self.non_trivial_count += 1;
				let argument = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
				let span = token.span.covers(self.last_span());
				self.builder.spread_expr(argument, span)
			} else {
				ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?
			};
			elements.push(Some(element));
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!("]"), open.span)?;
				break;
			}
		}
		let span = open.span.covers(self.last_span());
		Ok(self.builder.array_expr(elements, span))
	}

	/// Parse an object literal.
	async fn parse_object_literal(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let open = self.pop_peek();
		debug_assert_eq!(open.kind, t!("{"));
		let mut properties: Vec<PropertyParts<B::Expr, B::Function>> = Vec::new();
		let mut seen_proto = false;
		loop {
			if self.eat(t!("}")) {
				break;
			}
			let property = ctx.run(|ctx| self.parse_object_property(ctx)).await?;
			// Two plain `__proto__` properties set the prototype twice.
			// Shorthand and computed variants define an ordinary property
			// and are exempt.
			if matches!(property.value, PropValue::Init(_)) {
				if property.key.static_name() == Some(names::PROTO) {
					if seen_proto {
						bail!("Attempted to redefine __proto__ property"; @property.span);
					}
					seen_proto = true;
				}
			}
			properties.push(property);
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!("}"), open.span)?;
				break;
			}
		}
		let span = open.span.covers(self.last_span());
		Ok(self.builder.object_expr(properties, span))
	}

	/// Parse a single object literal property.
	async fn parse_object_property(
		&mut self,
		ctx: &mut Stk,
	) -> ParseResult<PropertyParts<B::Expr, B::Function>> {
		let start = self.peek();

		#[cfg(feature = "es6-generators")]
		if start.kind == t!("*") {
			// A generator method, `*gen() {}`.
			self.pop_peek();
			let key = self.parse_property_key(ctx).await?;
			let function = self
				.parse_method_function(ctx, FunctionKind::Generator, key.static_name())
				.await?;
			let span = start.span.covers(self.last_span());
			return Ok(PropertyParts {
				key,
				value: PropValue::Method(function),
				span,
			});
		}

		// `get`/`set` begin an accessor only when followed by a property
		// name.
		if start.kind == TokenKind::Identifier {
			let name = self.ident_value(start);
			if (name == names::GET || name == names::SET)
				&& Self::token_starts_property_name(self.peek1().kind)
			{
				self.pop_peek();
				let key = self.parse_property_key(ctx).await?;
				let kind = if name == names::GET {
					FunctionKind::Getter
				} else {
					FunctionKind::Setter
				};
				let function =
					self.parse_method_function(ctx, kind, key.static_name()).await?;
				let span = start.span.covers(self.last_span());
				let value = if kind == FunctionKind::Getter {
					PropValue::Getter(function)
				} else {
					PropValue::Setter(function)
				};
				return Ok(PropertyParts {
					key,
					value,
					span,
				});
			}
		}

		let key = self.parse_property_key(ctx).await?;
		let token = self.peek();
		match token.kind {
			t!(":") => {
				self.pop_peek();
				let value = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
				let span = start.span.covers(self.last_span());
				Ok(PropertyParts {
					key,
					value: PropValue::Init(value),
					span,
				})
			}
			t!("(") => {
				let function = self
					.parse_method_function(ctx, FunctionKind::Method, key.static_name())
					.await?;
				let span = start.span.covers(self.last_span());
				Ok(PropertyParts {
					key,
					value: PropValue::Method(function),
					span,
				})
			}
			t!("=") => {
				// A CoverInitializedName, `{x = 1}`. Only legal when the
				// whole literal is re-parsed as a destructuring pattern;
				// remember the span so the caller can error otherwise.
				self.pop_peek();
				let Some(name) = self.property_key_shorthand_name(&key, start)? else {
					unexpected!(self, token, "`:` or `(` after a property name");
				};
				if self.indicates_pattern.is_none() {
					self.indicates_pattern = Some(token.span);
				}
				let _default = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
				let span = start.span.covers(self.last_span());
				Ok(PropertyParts {
					key,
					value: PropValue::Shorthand(name),
					span,
				})
			}
			_ => {
				// Shorthand, `{x}`.
				let Some(name) = self.property_key_shorthand_name(&key, start)? else {
					unexpected!(self, token, "`:` or `(` after a property name");
				};
				self.use_ident(name);
				Ok(PropertyParts {
					key,
					value: PropValue::Shorthand(name),
					span: start.span,
				})
			}
		}
	}

	/// The binding name of a shorthand property; only plain identifier keys
	/// qualify.
	fn property_key_shorthand_name(
		&mut self,
		key: &PropKey<B::Expr>,
		start: Token,
	) -> ParseResult<Option<Ident>> {
		if start.kind != TokenKind::Identifier && !start.kind.can_be_identifier() {
			return Ok(None);
		}
		if let PropKey::Ident(name) = key {
			if start.kind.can_be_identifier() && self.scopes.strict() {
				bail!("Cannot use the reserved word '{}' in strict mode", start.kind.as_str(); @start.span);
			}
			return Ok(Some(*name));
		}
		Ok(None)
	}

	fn token_starts_property_name(kind: TokenKind) -> bool {
		matches!(
			kind,
			TokenKind::Identifier
				| TokenKind::Keyword(_)
				| TokenKind::Strand
				| TokenKind::Number(_)
				| t!("[")
		)
	}

	/// Parse a property key: identifier, string, number, or computed.
	pub(crate) async fn parse_property_key(
		&mut self,
		ctx: &mut Stk,
	) -> ParseResult<PropKey<B::Expr>> {
		let token = self.next();
		match token.kind {
			TokenKind::Identifier | TokenKind::Keyword(_) => {
				Ok(PropKey::Ident(self.ident_value(token)))
			}
			TokenKind::Strand => {
				let (value, _, _) = self.strand_value(token);
				Ok(PropKey::String(value))
			}
			TokenKind::Number(_) => Ok(PropKey::Number(self.number_value(token))),
			t!("[") => {
				let old_allows_in = self.allows_in;
				self.allows_in = true;
				let expr = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await;
				self.allows_in = old_allows_in;
				let expr = expr?;
				self.expect_closing_delimiter(t!("]"), token.span)?;
				self.non_trivial_count += 1;
				Ok(PropKey::Computed(expr))
			}
			_ => {
				unexpected!(self, token, "a property name")
			}
		}
	}

	/// Parse a template literal, optionally tagged.
	#[cfg(feature = "es6-template-literals")]
	pub(crate) async fn parse_template_literal(
		&mut self,
		ctx: &mut Stk,
		tag: Option<B::Expr>,
		start: Span,
	) -> ParseResult<B::Expr> {
		let head = self.pop_peek();
		let mut quasis: Vec<TemplateElement> = Vec::new();
		let mut expressions: Vec<B::Expr> = Vec::new();

		let (cooked, raw) = self.template_value(head);
		quasis.push(TemplateElement {
			cooked,
			raw,
			span: head.span,
		});

		if matches!(head.kind, TokenKind::Template(TemplateKind::Head)) {
			self.non_trivial_count += 1;
			loop {
				let old_allows_in = self.allows_in;
				self.allows_in = true;
				let expr = ctx.run(|ctx| self.parse_expression(ctx)).await;
				self.allows_in = old_allows_in;
				expressions.push(expr?);

				let close = self.peek();
				if close.kind != t!("}") {
					unexpected!(self, close, "`}` closing a template substitution");
				}
				self.backup_before_token(close);
				let segment = self.lexer.scan_template_trailer();
				self.last_span = segment.span;
				self.last_token_kind = segment.kind;
				if segment.is_invalid() {
					let error = self.lexer.error.take().unwrap();
					return Err(ParseError::new(
						ParseErrorKind::InvalidToken(error),
						segment.span,
					));
				}
				let (cooked, raw) = self.template_value(segment);
				quasis.push(TemplateElement {
					cooked,
					raw,
					span: segment.span,
				});
				if matches!(segment.kind, TokenKind::Template(TemplateKind::Tail)) {
					break;
				}
			}
		}

		let span = start.covers(self.last_span());
		match tag {
			Some(tag) => Ok(self.builder.tagged_template_expr(tag, quasis, expressions, span)),
			None => {
				self.num_constants += 1;
				Ok(self.builder.template_expr(quasis, expressions, span))
			}
		}
	}
}
