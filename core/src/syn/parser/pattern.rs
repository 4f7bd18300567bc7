//! Destructuring pattern parsing.

use reblessive::Stk;

use crate::ast::{names, DeclKind, Features, Ident};
use crate::syn::parser::builder::{ObjectPatternProp, PropKey};
use crate::syn::parser::mac::{bail, unexpected};
use crate::syn::parser::{DeclarationResult, ParseResult, Parser, TreeBuild};
use crate::syn::token::{t, Span, TokenKind};

/// What a destructuring pattern binds into, which decides declaration
/// behavior and which rest elements are allowed.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) enum DestructureKind {
	ToVariables,
	ToLet,
	ToConst,
	ToParameters,
	ToCatchParameters,
	/// Assignment destructuring; targets are references, nothing is
	/// declared.
	ToExpressions,
}

impl DestructureKind {
	pub fn decl_kind(&self) -> Option<DeclKind> {
		match self {
			DestructureKind::ToVariables => Some(DeclKind::Var),
			DestructureKind::ToLet => Some(DeclKind::Let),
			DestructureKind::ToConst => Some(DeclKind::Const),
			_ => None,
		}
	}
}

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse a destructuring pattern: an array pattern, an object pattern,
	/// or a single binding.
	pub(crate) async fn parse_destructuring_pattern(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::Pattern> {
		let token = self.peek();
		match token.kind {
			t!("[") => self.parse_array_pattern(ctx, kind).await,
			t!("{") => self.parse_object_pattern(ctx, kind).await,
			_ => self.parse_binding_target(ctx, kind).await,
		}
	}

	/// Parse a single binding name, or an assignment target for expression
	/// destructuring.
	async fn parse_binding_target(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::Pattern> {
		if kind == DestructureKind::ToExpressions {
			let start = self.recent_span();
			let expr = ctx.run(|ctx| self.parse_member_expr(ctx)).await?;
			if !B::hint(&expr).is_assignment_target() {
				bail!("Invalid destructuring assignment target"; @start.covers(self.last_span()));
			}
			let span = start.covers(self.last_span());
			return Ok(self.builder.expr_pattern(expr, span));
		}
		let name = self.parse_binding_identifier()?;
		let span = self.last_span();
		self.declare_binding(name, kind, span)?;
		Ok(self.builder.ident_pattern(name, span))
	}

	/// Parse an identifier in binding position, rejecting reserved words
	/// according to the current mode.
	pub(crate) fn parse_binding_identifier(&mut self) -> ParseResult<Ident> {
		let token = self.next();
		match token.kind {
			TokenKind::Identifier => Ok(self.ident_value(token)),
			TokenKind::Keyword(x) if x.is_reserved_in_strict_only() => {
				if self.scopes.strict() {
					bail!("Cannot use the reserved word '{}' as a variable name in strict mode", x.as_str(); @token.span);
				}
				if x == crate::syn::token::Keyword::Yield && self.scopes.in_generator() {
					bail!("Cannot use 'yield' as a variable name inside a generator"; @token.span);
				}
				Ok(self.ident_value(token))
			}
			_ => {
				unexpected!(self, token, "a binding name")
			}
		}
	}

	/// Declare a bound name according to the destructuring kind, deciding
	/// which declaration-result bits are fatal.
	pub(crate) fn declare_binding(
		&mut self,
		name: Ident,
		kind: DestructureKind,
		span: Span,
	) -> ParseResult<()> {
		if name == names::ARGUMENTS {
			self.features |= Features::SHADOWS_ARGUMENTS;
		}
		let result = match kind {
			DestructureKind::ToVariables => self.scopes.declare_var(name),
			DestructureKind::ToLet | DestructureKind::ToConst => {
				self.scopes.declare_lexical(name)
			}
			DestructureKind::ToParameters => self.scopes.declare_parameter(name),
			DestructureKind::ToCatchParameters => self.scopes.declare_lexical(name),
			DestructureKind::ToExpressions => DeclarationResult::empty(),
		};
		if let Some(pending) = self.pending_binding_names.as_mut() {
			pending.push((name, span));
		}
		if result.contains(DeclarationResult::INVALID_STRICT_MODE) {
			let text = self.interner.resolve(name).to_owned();
			bail!("Cannot use '{text}' as a variable name in strict mode"; @span);
		}
		if result.contains(DeclarationResult::INVALID_DUPLICATE) {
			let text = self.interner.resolve(name).to_owned();
			match kind {
				DestructureKind::ToVariables => {
					bail!("Cannot declare a var variable that shadows a let/const/class variable: '{text}'"; @span);
				}
				DestructureKind::ToLet | DestructureKind::ToConst => {
					bail!("Cannot declare a lexical variable twice: '{text}'"; @span);
				}
				DestructureKind::ToCatchParameters => {
					bail!("Cannot declare a catch parameter twice: '{text}'"; @span);
				}
				DestructureKind::ToParameters => {
					// Whether a duplicate parameter is fatal depends on the
					// whole list; the function parser decides once the list
					// shape is known.
					if self.seen_duplicate_parameter.is_none() {
						self.seen_duplicate_parameter = Some((name, span));
					}
				}
				DestructureKind::ToExpressions => {}
			}
		}
		Ok(())
	}

	async fn parse_array_pattern(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::Pattern> {
		let open = self.pop_peek();
		debug_assert_eq!(open.kind, t!("["));
		let mut elements: Vec<Option<(B::Pattern, Option<B::Expr>)>> = Vec::new();
		let mut rest = None;
		loop {
			if self.eat(t!("]")) {
				break;
			}
			if self.eat(t!(",")) {
				elements.push(None);
				continue;
			}
			let token = self.peek();
			if token.kind == t!("...") {
				self.pop_peek();
				rest = Some(self.parse_rest_element(ctx, kind).await?);
				// A rest element is always last.
				let token = self.peek();
				if token.kind != t!("]") {
					bail!("Expected a closing ']' following a rest element"; @token.span);
				}
				self.pop_peek();
				break;
			}
			let pattern =
				ctx.run(|ctx| self.parse_destructuring_pattern(ctx, kind)).await?;
			let default = if self.eat(t!("=")) {
				Some(ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?)
			} else {
				None
			};
			elements.push(Some((pattern, default)));
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!("]"), open.span)?;
				break;
			}
		}
		let span = open.span.covers(self.last_span());
		Ok(self.builder.array_pattern(elements, rest, span))
	}

	async fn parse_object_pattern(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::Pattern> {
		let open = self.pop_peek();
		debug_assert_eq!(open.kind, t!("{"));
		let mut properties: Vec<ObjectPatternProp<B::Pattern, B::Expr>> = Vec::new();
		let mut rest = None;
		loop {
			if self.eat(t!("}")) {
				break;
			}
			let token = self.peek();
			if token.kind == t!("...") {
				self.pop_peek();
				rest = Some(self.parse_rest_element(ctx, kind).await?);
				let token = self.peek();
				if token.kind != t!("}") {
					bail!("Expected a closing '}}' following a rest element"; @token.span);
				}
				self.pop_peek();
				break;
			}

			let key_token = self.peek();
			let key = self.parse_property_key(ctx).await?;
			let (pattern, shorthand) = if self.eat(t!(":")) {
				let pattern =
					ctx.run(|ctx| self.parse_destructuring_pattern(ctx, kind)).await?;
				(pattern, false)
			} else {
				// Shorthand, the key is also the binding.
				let Some(name) = key.static_name() else {
					unexpected!(self, key_token, "`:` after a computed property key");
				};
				if let PropKey::String(_) = key {
					unexpected!(self, key_token, "`:` after a string property key");
				}
				if matches!(key_token.kind, TokenKind::Keyword(x) if !x.is_reserved_in_strict_only())
				{
					unexpected!(self, key_token, "a binding name");
				}
				if self.scopes.strict() && key_token.kind.can_be_identifier() {
					bail!("Cannot use the reserved word '{}' as a variable name in strict mode", key_token.kind.as_str(); @key_token.span);
				}
				let pattern = if kind == DestructureKind::ToExpressions {
					self.use_ident(name);
					let expr = self.builder.ident_expr(name, key_token.span);
					self.builder.expr_pattern(expr, key_token.span)
				} else {
					self.declare_binding(name, kind, key_token.span)?;
					self.builder.ident_pattern(name, key_token.span)
				};
				(pattern, true)
			};
			let default = if self.eat(t!("=")) {
				Some(ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?)
			} else {
				None
			};
			properties.push(ObjectPatternProp {
				key,
				pattern,
				default,
				shorthand,
			});
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!("}"), open.span)?;
				break;
			}
		}
		let span = open.span.covers(self.last_span());
		Ok(self.builder.object_pattern(properties, rest, span))
	}

	/// Parse the pattern of a rest element.
	///
	/// In declaration and parameter contexts the inner pattern must be a
	/// simple binding; expression destructuring also accepts member targets.
	async fn parse_rest_element(
		&mut self,
		ctx: &mut Stk,
		kind: DestructureKind,
	) -> ParseResult<B::Pattern> {
		if kind == DestructureKind::ToExpressions {
			return self.parse_binding_target(ctx, kind).await;
		}
		let token = self.peek();
		if !matches!(token.kind, TokenKind::Identifier) && !token.kind.can_be_identifier() {
			unexpected!(self, token, "a binding name for a rest element");
		}
		let name = self.parse_binding_identifier()?;
		let span = self.last_span();
		self.declare_binding(name, kind, span)?;
		Ok(self.builder.ident_pattern(name, span))
	}
}
