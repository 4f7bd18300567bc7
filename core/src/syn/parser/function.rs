//! Function parsing: declarations, expressions, methods, arrows, and the
//! function-body cache.

use reblessive::Stk;

use crate::ast::{names, ConstructorKind, FunctionKind, Ident, Interner};
use crate::syn::parser::builder::{FnBody, FormalParam, FunctionMeta};
use crate::syn::parser::cache::{
	CacheEntry, ARROW_BODY_CACHE_THRESHOLD, BLOCK_BODY_CACHE_THRESHOLD,
};
use crate::syn::parser::mac::{bail, expected, unexpected};
use crate::syn::parser::{
	DeclarationResult, DestructureKind, FunctionParsePhase, ParseResult, Parser, Scope,
	SuperBinding, SyntaxChecker, TreeBuild,
};
use crate::syn::token::{t, Span};

/// Shape information about a parsed formal parameter list.
#[derive(Clone, Debug, Default)]
pub(crate) struct ParameterListShape {
	pub count: u32,
	pub has_defaults: bool,
	pub has_destructuring: bool,
	pub has_rest: bool,
	/// Every declared parameter name with its span, for retroactive
	/// strict-mode validation.
	pub names: Vec<(Ident, Span)>,
}

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse a function expression; the `function` keyword is the next
	/// token.
	pub(crate) async fn parse_function_expression(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let token = self.pop_peek();
		debug_assert_eq!(token.kind, t!("function"));
		let mut kind = FunctionKind::Normal;
		#[cfg(feature = "es6-generators")]
		if self.eat(t!("*")) {
			kind = FunctionKind::Generator;
		}
		let name = if self.peek_kind() == t!("(") {
			None
		} else {
			let name = self.parse_binding_identifier()?;
			self.last_function_name = Some((name, self.last_span()));
			Some(name)
		};
		let name_span = name.map(|_| self.last_span());
		let function = self
			.parse_function_tail(
				ctx,
				token.span,
				kind,
				name,
				name_span,
				ConstructorKind::None,
				SuperBinding::NotNeeded,
			)
			.await?;
		let span = token.span.covers(self.last_span());
		Ok(self.builder.function_expr(function, span))
	}

	/// Parse a function declaration; the `function` keyword is the next
	/// token. Returns the declared name and the function record; the caller
	/// builds the statement.
	pub(crate) async fn parse_function_declaration(
		&mut self,
		ctx: &mut Stk,
		require_name: bool,
	) -> ParseResult<(Option<Ident>, B::Function)> {
		let token = self.pop_peek();
		debug_assert_eq!(token.kind, t!("function"));
		let mut kind = FunctionKind::Normal;
		#[cfg(feature = "es6-generators")]
		if self.eat(t!("*")) {
			kind = FunctionKind::Generator;
		}
		let name = if self.peek_kind() == t!("(") {
			if require_name {
				let token = self.peek();
				unexpected!(self, token, "a function name");
			}
			None
		} else {
			Some(self.parse_binding_identifier()?)
		};
		let name_span = name.map(|_| self.last_span());

		if let Some(name) = name {
			self.last_function_name = Some((name, self.last_span()));
			let span = self.last_span();
			self.declare_function_name(name, span)?;
		}

		let function = self
			.parse_function_tail(
				ctx,
				token.span,
				kind,
				name,
				name_span,
				ConstructorKind::None,
				SuperBinding::NotNeeded,
			)
			.await?;
		Ok((name, function))
	}

	/// Declare the name of a function declaration: hoisted var-like at a
	/// function boundary, lexical inside a block.
	fn declare_function_name(&mut self, name: Ident, span: Span) -> ParseResult<()> {
		let result = if self.scopes.current().is_function_boundary() {
			self.scopes.declare_var(name)
		} else {
			self.scopes.declare_lexical(name)
		};
		if let Some(pending) = self.pending_binding_names.as_mut() {
			pending.push((name, span));
		}
		if result.contains(DeclarationResult::INVALID_STRICT_MODE) {
			let text = self.interner.resolve(name).to_owned();
			bail!("Cannot name a function '{text}' in strict mode"; @span);
		}
		if result.contains(DeclarationResult::INVALID_DUPLICATE) {
			let text = self.interner.resolve(name).to_owned();
			bail!("Cannot declare a function '{text}' that shadows a let/const/class variable"; @span);
		}
		if self.scopes.depth() == 1 {
			self.function_declarations.push(name);
		}
		Ok(())
	}

	/// Parse a method of an object literal or class body, starting at its
	/// parameter list.
	pub(crate) async fn parse_method_function(
		&mut self,
		ctx: &mut Stk,
		kind: FunctionKind,
		name: Option<Ident>,
	) -> ParseResult<B::Function> {
		self.parse_method_function_with(
			ctx,
			kind,
			name,
			ConstructorKind::None,
			SuperBinding::Needed,
		)
		.await
	}

	/// Like [`Parser::parse_method_function`] but with an explicit
	/// constructor kind, used for class constructors.
	pub(crate) async fn parse_method_function_with(
		&mut self,
		ctx: &mut Stk,
		kind: FunctionKind,
		name: Option<Ident>,
		constructor_kind: ConstructorKind,
		super_binding: SuperBinding,
	) -> ParseResult<B::Function> {
		let start = self.recent_span();
		self.parse_function_tail(ctx, start, kind, name, None, constructor_kind, super_binding)
			.await
	}

	/// Parse the parameter list and body of a function, whatever its
	/// flavour, and assemble the function record.
	#[allow(clippy::too_many_arguments)]
	async fn parse_function_tail(
		&mut self,
		ctx: &mut Stk,
		start: Span,
		kind: FunctionKind,
		name: Option<Ident>,
		name_span: Option<Span>,
		constructor_kind: ConstructorKind,
		super_binding: SuperBinding,
	) -> ParseResult<B::Function> {
		let was_strict = self.scopes.strict();
		let features_before = self.features;
		let outer_phase = self.function_parse_phase;
		let outer_duplicate = self.seen_duplicate_parameter.take();
		let outer_pending = self.pending_binding_names.take();
		// break/continue do not cross function boundaries.
		let outer_loop_depth = std::mem::take(&mut self.loop_depth);
		let outer_switch_depth = std::mem::take(&mut self.switch_depth);

		let mut scope = Scope::function(kind, was_strict);
		scope.is_generator = kind == FunctionKind::Generator;
		scope.constructor_kind = constructor_kind;
		scope.expected_super_binding = super_binding;
		self.scopes.push(scope);

		// Parameters.
		self.function_parse_phase = FunctionParsePhase::Parameters;
		self.pending_binding_names = Some(Vec::new());
		let open = expected!(self, t!("("));
		let (parameters, mut shape) = self.parse_formal_parameter_list(ctx, open.span).await?;
		shape.names = self.pending_binding_names.take().unwrap_or_default();

		self.check_parameter_list(kind, &shape, false)?;

		// A generator runs its body in a second scope nested inside the
		// wrapper scope that holds the parameters, with the synthetic
		// parameter list the code generator expects.
		if kind == FunctionKind::Generator {
			let strict = self.scopes.strict();
			let mut body_scope = Scope::function(FunctionKind::Generator, strict);
			body_scope.is_generator = true;
			body_scope.is_generator_body = true;
			body_scope.constructor_kind = constructor_kind;
			body_scope.expected_super_binding = super_binding;
			self.scopes.push(body_scope);
			self.declare_generator_parameters();
		}

		// Body.
		self.function_parse_phase = FunctionParsePhase::Body;
		let body_token = self.peek();
		if body_token.kind != t!("{") {
			unexpected!(self, body_token, "`{` before a function body");
		}
		let body_start = body_token.span.offset;

		let (body, body_span) = if let Some(entry) = self.cache_get(body_start) {
			self.replay_cached_body(&entry);
			debug_assert_eq!(entry.parameter_count, shape.count);
			(FnBody::Cached, Span {
				offset: body_start,
				len: entry.body_end - body_start,
			})
		} else {
			let open = self.pop_peek();
			let elements =
				ctx.run(|ctx| self.parse_source_elements_checked(ctx, Some(t!("}")))).await?;
			self.expect_closing_delimiter(t!("}"), open.span)?;
			let body_span = open.span.covers(self.last_span());
			(FnBody::Block(elements), body_span)
		};

		// A directive in the body may have turned strict mode on after the
		// name and parameters were already checked under sloppy rules.
		let became_strict = !was_strict && self.scopes.strict();
		if became_strict {
			if let (Some(name), Some(span)) = (name, name_span) {
				if name == names::EVAL || name == names::ARGUMENTS {
					let text = self.interner.resolve(name).to_owned();
					bail!("Cannot name a function '{text}' in strict mode"; @span);
				}
			}
			self.check_parameter_list(kind, &shape, true)?;
		}

		let ended_strict = self.scopes.strict();

		// Pop the body scope (and for generators the wrapper as well),
		// computing the captured-variable set.
		let mut popped = self.scopes.pop();
		let has_direct_super = popped.has_direct_super;
		if kind == FunctionKind::Generator {
			popped = self.scopes.pop();
		}
		let captured = popped.captured;

		// Record the body in the cache when it is long enough to be worth
		// skipping next time.
		if matches!(body, FnBody::Block(_)) && body_span.len > BLOCK_BODY_CACHE_THRESHOLD {
			let entry = CacheEntry {
				body_end: body_span.offset + body_span.len,
				end_token: self.last_token(),
				parameter_count: shape.count,
				strict: ended_strict,
				captured: captured.clone(),
				features: self.features.difference(features_before),
				has_direct_super,
				is_arrow_expression_body: false,
			};
			self.cache_insert(body_start, entry);
		}

		self.function_parse_phase = outer_phase;
		self.seen_duplicate_parameter = outer_duplicate;
		self.pending_binding_names = outer_pending;
		self.loop_depth = outer_loop_depth;
		self.switch_depth = outer_switch_depth;

		let meta = FunctionMeta {
			name,
			parameter_count: shape.count,
			kind,
			constructor_kind,
			is_strict: ended_strict,
			is_arrow_expression_body: false,
			has_direct_super,
			captured,
			features: self.features.difference(features_before),
			span: start.covers(self.last_span()),
			body_span,
		};
		Ok(self.builder.function(meta, parameters, body))
	}

	/// Replay a cached function body: restore the scope side effects the
	/// original parse produced and jump the lexer to the end of the body.
	fn replay_cached_body(&mut self, entry: &CacheEntry) {
		for name in entry.captured.iter() {
			self.scopes.use_name(*name);
		}
		if entry.strict {
			self.scopes.set_strict();
		}
		if entry.has_direct_super {
			if let Some(x) = self.scopes.closest_non_arrow_function_mut() {
				x.has_direct_super = true;
			}
		}
		self.features |= entry.features;
		self.token_buffer.clear();
		self.lexer.skip_to(entry.body_end);
		self.last_span = entry.end_token.span;
		self.last_token_kind = entry.end_token.kind;
	}

	/// Parse a formal parameter list after the opening parenthesis.
	pub(crate) async fn parse_formal_parameter_list(
		&mut self,
		ctx: &mut Stk,
		open: Span,
	) -> ParseResult<(Vec<FormalParam<B::Pattern, B::Expr>>, ParameterListShape)> {
		let mut parameters = Vec::new();
		let mut shape = ParameterListShape::default();
		loop {
			if self.eat(t!(")")) {
				break;
			}
			let token = self.peek();
			if token.kind == t!("...") {
				self.pop_peek();
				let name = self.parse_binding_identifier()?;
				let span = self.last_span();
				self.declare_binding(name, DestructureKind::ToParameters, span)?;
				if self.peek_kind() == t!("=") {
					bail!("A rest parameter cannot have a default value"; @self.recent_span());
				}
				let pattern = self.builder.ident_pattern(name, span);
				parameters.push(FormalParam {
					pattern,
					default: None,
					rest: true,
				});
				shape.count += 1;
				shape.has_rest = true;
				// A rest parameter is the last in its list.
				if !self.eat(t!(")")) {
					let token = self.peek();
					unexpected!(self, token, "`)` after a rest parameter");
				}
				break;
			}
			if matches!(token.kind, t!("[") | t!("{")) {
				shape.has_destructuring = true;
			}
			let pattern = ctx
				.run(|ctx| self.parse_destructuring_pattern(ctx, DestructureKind::ToParameters))
				.await?;
			let default = if self.eat(t!("=")) {
				shape.has_defaults = true;
				Some(ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?)
			} else {
				None
			};
			parameters.push(FormalParam {
				pattern,
				default,
				rest: false,
			});
			shape.count += 1;
			if !self.eat(t!(",")) {
				self.expect_closing_delimiter(t!(")"), open)?;
				break;
			}
		}
		Ok((parameters, shape))
	}

	/// Validate a parameter list against its shape and the current strict
	/// mode. Runs again with `retroactive` when a body directive switched
	/// the function to strict after the fact.
	fn check_parameter_list(
		&mut self,
		kind: FunctionKind,
		shape: &ParameterListShape,
		retroactive: bool,
	) -> ParseResult<()> {
		if let Some((name, span)) = self.seen_duplicate_parameter {
			let non_simple = shape.has_defaults || shape.has_destructuring || shape.has_rest;
			if non_simple || self.scopes.strict() {
				let text = self.interner.resolve(name).to_owned();
				bail!("Cannot declare a parameter named '{text}' twice"; @span);
			}
		}
		if retroactive {
			for (name, span) in shape.names.iter() {
				if *name == names::EVAL || *name == names::ARGUMENTS {
					let text = self.interner.resolve(*name).to_owned();
					bail!("Cannot use '{text}' as a parameter name in strict mode"; @*span);
				}
			}
		}
		if kind == FunctionKind::Getter && shape.count != 0 {
			bail!("A getter must have no parameters"; @self.last_span());
		}
		if kind == FunctionKind::Setter && (shape.count != 1 || shape.has_rest) {
			bail!("A setter must have a single parameter"; @self.last_span());
		}
		Ok(())
	}

	/// The speculative probe deciding whether the upcoming tokens are arrow
	/// function parameters.
	///
	/// Accepts `IDENT =>`, `( ) =>`, and `( formal-params ) =>`. The
	/// parenthesized cases run a scratch syntax-only parser over the same
	/// source with its own throwaway scope stack and interner, so nothing a
	/// rejected speculation declared can leak into this parse.
	#[cfg(feature = "es6-arrow-functions")]
	pub(crate) fn is_arrow_function_parameters(&mut self) -> bool {
		let token = self.peek();
		if token.kind != t!("(") {
			let next = self.peek1();
			return next.kind == t!("=>") && !next.newline_before;
		}

		let offset = token.span.offset;
		let strict = self.scopes.strict();
		let mut interner = Interner::new();
		let mut probe = Parser::new(
			self.source(),
			SyntaxChecker,
			self.settings,
			&mut interner,
			None,
		);
		probe.lexer.skip_to(offset);
		probe.last_span = Span {
			offset,
			len: 0,
		};
		let mut stack = reblessive::Stack::new();
		stack
			.enter(|ctx| probe.probe_arrow_parameters(ctx, strict))
			.finish()
			.unwrap_or(false)
	}

	/// The probe body, run on a scratch syntax-only parser.
	#[cfg(feature = "es6-arrow-functions")]
	async fn probe_arrow_parameters(&mut self, ctx: &mut Stk, strict: bool) -> ParseResult<bool> {
		self.scopes.push(Scope::function(FunctionKind::Arrow, strict));
		self.function_parse_phase = FunctionParsePhase::Parameters;
		let res = self.probe_arrow_parameters_inner(ctx).await;
		self.scopes.truncate(0);
		res
	}

	#[cfg(feature = "es6-arrow-functions")]
	async fn probe_arrow_parameters_inner(&mut self, ctx: &mut Stk) -> ParseResult<bool> {
		let open = expected!(self, t!("("));
		self.parse_formal_parameter_list(ctx, open.span).await?;
		Ok(self.peek_kind() == t!("=>"))
	}

	/// Parse an arrow function after the probe has accepted its parameters.
	#[cfg(feature = "es6-arrow-functions")]
	pub(crate) async fn parse_arrow_function(&mut self, ctx: &mut Stk) -> ParseResult<B::Expr> {
		let start = self.peek().span;
		let was_strict = self.scopes.strict();
		let features_before = self.features;
		let outer_phase = self.function_parse_phase;
		let outer_duplicate = self.seen_duplicate_parameter.take();
		let outer_pending = self.pending_binding_names.take();
		let outer_loop_depth = std::mem::take(&mut self.loop_depth);
		let outer_switch_depth = std::mem::take(&mut self.switch_depth);

		self.scopes.push(Scope::function(FunctionKind::Arrow, was_strict));
		self.function_parse_phase = FunctionParsePhase::Parameters;
		self.pending_binding_names = Some(Vec::new());

		let (parameters, mut shape) = if self.peek_kind() == t!("(") {
			let open = self.pop_peek();
			self.parse_formal_parameter_list(ctx, open.span).await?
		} else {
			let name = self.parse_binding_identifier()?;
			let span = self.last_span();
			self.declare_binding(name, DestructureKind::ToParameters, span)?;
			let pattern = self.builder.ident_pattern(name, span);
			let parameters = vec![FormalParam {
				pattern,
				default: None,
				rest: false,
			}];
			let shape = ParameterListShape {
				count: 1,
				..ParameterListShape::default()
			};
			(parameters, shape)
		};
		shape.names = self.pending_binding_names.take().unwrap_or_default();
		self.check_parameter_list(FunctionKind::Arrow, &shape, false)?;

		let arrow = self.peek();
		if arrow.kind != t!("=>") {
			unexpected!(self, arrow, "`=>` after arrow function parameters");
		}
		if arrow.newline_before {
			bail!("Cannot have a newline between arrow function parameters and '=>'"; @arrow.span);
		}
		self.pop_peek();

		self.function_parse_phase = FunctionParsePhase::Body;
		let body_token = self.peek();
		let body_start = body_token.span.offset;
		let is_block = body_token.kind == t!("{");

		let (body, body_span, is_expr_body) = if let Some(entry) = self.cache_get(body_start) {
			let is_expr_body = entry.is_arrow_expression_body;
			self.replay_cached_body(&entry);
			let body_span = Span {
				offset: body_start,
				len: entry.body_end - body_start,
			};
			(FnBody::Cached, body_span, is_expr_body)
		} else if is_block {
			let open = self.pop_peek();
			let elements =
				ctx.run(|ctx| self.parse_source_elements_checked(ctx, Some(t!("}")))).await?;
			self.expect_closing_delimiter(t!("}"), open.span)?;
			let body_span = open.span.covers(self.last_span());
			(FnBody::Block(elements), body_span, false)
		} else {
			// An expression body is re-expressed as an implicit return
			// downstream.
			let expr = ctx.run(|ctx| self.parse_assignment_expr(ctx)).await?;
			let body_span = body_token.span.covers(self.last_span());
			(FnBody::Expr(expr), body_span, true)
		};

		let became_strict = !was_strict && self.scopes.strict();
		if became_strict {
			self.check_parameter_list(FunctionKind::Arrow, &shape, true)?;
		}
		let ended_strict = self.scopes.strict();

		let popped = self.scopes.pop();
		let captured = popped.captured;

		let threshold = if is_expr_body {
			ARROW_BODY_CACHE_THRESHOLD
		} else {
			BLOCK_BODY_CACHE_THRESHOLD
		};
		if !matches!(body, FnBody::Cached) && body_span.len > threshold {
			let entry = CacheEntry {
				body_end: body_span.offset + body_span.len,
				end_token: self.last_token(),
				parameter_count: shape.count,
				strict: ended_strict,
				captured: captured.clone(),
				features: self.features.difference(features_before),
				has_direct_super: false,
				is_arrow_expression_body: is_expr_body,
			};
			self.cache_insert(body_start, entry);
		}

		self.function_parse_phase = outer_phase;
		self.seen_duplicate_parameter = outer_duplicate;
		self.pending_binding_names = outer_pending;
		self.loop_depth = outer_loop_depth;
		self.switch_depth = outer_switch_depth;

		let meta = FunctionMeta {
			name: None,
			parameter_count: shape.count,
			kind: FunctionKind::Arrow,
			constructor_kind: ConstructorKind::None,
			is_strict: ended_strict,
			is_arrow_expression_body: is_expr_body,
			has_direct_super: false,
			captured,
			features: self.features.difference(features_before),
			span: start.covers(self.last_span()),
			body_span,
		};
		let function = self.builder.function(meta, parameters, body);
		let span = start.covers(self.last_span());
		Ok(self.builder.arrow_expr(function, span))
	}
}
