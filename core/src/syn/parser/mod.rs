//! Module implementing the ECMAScript parser.
//!
//! The parser is a relatively simple recursive descent parser. Most of the
//! functions peek a token from the lexer and then decide which path to take
//! depending on which token is next.
//!
//! # Implementation Details
//!
//! There are a bunch of common patterns for which this module has some
//! convenience functions and macros.
//! - Whenever only one token can be next use the [`expected!`] macro. It
//!     ensures that the given token type is next and returns a parser error
//!     otherwise.
//! - Whenever a limited set of tokens can be next it is common to match the
//!     token kind and have a catch-all arm calling [`unexpected!`]. This
//!     macro raises a parse error naming the found token and what was
//!     expected.
//! - If a single token can be optionally next use [`Parser::eat`]; it
//!     returns whether the given token kind was eaten.
//! - If a closing delimiter is expected use
//!     [`Parser::expect_closing_delimiter`], whose error also points at the
//!     delimiter which needed closing.
//!
//! ## Speculative parsing
//!
//! ECMAScript has productions which cannot be distinguished by bounded
//! lookahead, most prominently arrow-function parameter lists versus
//! parenthesized expressions and object literals versus destructuring
//! patterns. These are handled transactionally: [`Parser::save_point`]
//! captures the lexer position and the ambient counters, a trial parse runs,
//! and [`Parser::rewind`] restores everything, including the scope-stack
//! depth. Rewinds never skip forward.
//!
//! ## Token payloads
//!
//! The lexer leaves token payloads in side-channel slots which are
//! overwritten by further lookahead. The parser therefore never trusts a
//! slot for a token that has sat in the peek buffer; payload accessors like
//! [`Parser::ident_value`] reconstruct the value from the token's span
//! instead, which is always valid.
//!
//! ## Use of reblessive
//!
//! The parser uses reblessive to parse deeply nested sources without
//! overflowing the machine stack: every function which can recurse is an
//! async function taking a reblessive context. An explicit depth budget on
//! top of that turns truly pathological nesting into a "Stack exhausted"
//! error rather than unbounded memory growth.

use reblessive::Stk;

use crate::ast::{names, Features, FunctionKind, Ident, Interner};
use crate::syn::{
	lexer::Lexer,
	token::{NumberKind, Span, TemplateKind, Token, TokenKind},
};

mod builder;
mod cache;
mod class;
mod error;
mod expression;
mod function;
pub(crate) mod mac;
mod pattern;
mod prime;
mod scope;
mod stmt;
mod token_buffer;

#[cfg(test)]
pub mod test;

pub use builder::{
	AstBuilder, CatchParts, ClassMemberParts, DeclaratorParts, ExprHint, FnBody,
	ForHeadParts, ForInitParts, FormalParam, FunctionMeta, ObjectPatternProp, PropKey,
	PropValue, PropertyParts, SwitchClauseParts, SyntaxChecker, TreeBuild,
};
pub use cache::{CacheEntry, FunctionCache};
pub use error::{ParseError, ParseErrorKind};
pub use scope::{DeclarationResult, Label, Scope, ScopeKind, ScopeStack, SuperBinding};

pub(crate) use pattern::DestructureKind;

use self::token_buffer::TokenBuffer;
use crate::syn::{BuiltinMode, ParseMode, ParserSettings};
use mac::{bail, expected, unexpected};

/// The result returned by most parser functions.
pub type ParseResult<T> = Result<T, ParseError>;

/// Which part of a function the parser is currently inside, used to reject
/// `yield` in generator parameter position.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) enum FunctionParsePhase {
	Body,
	Parameters,
}

/// A transactional snapshot of the parser, capturing everything a
/// speculative parse may disturb.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SavePoint {
	last_span: Span,
	non_lhs_count: u32,
	non_trivial_count: u32,
	assignment_count: u32,
	num_constants: u32,
	scope_depth: usize,
}

/// The ECMAScript parser.
#[non_exhaustive]
pub struct Parser<'a, B> {
	pub(crate) lexer: Lexer<'a>,
	last_span: Span,
	last_token_kind: TokenKind,
	token_buffer: TokenBuffer<4>,
	pub(crate) builder: B,
	pub(crate) interner: &'a mut Interner,
	cache: Option<&'a mut FunctionCache>,
	pub(crate) scopes: ScopeStack,
	pub(crate) settings: ParserSettings,
	/// Whether the `in` operator is currently allowed; disabled inside
	/// `for`-initializers.
	pub(crate) allows_in: bool,
	pub(crate) function_parse_phase: FunctionParsePhase,
	// Ambient counters. Their main purpose is deciding, after the fact,
	// whether a statement was a directive: a directive prologue entry
	// contains nothing but a string literal, so parsing one leaves the
	// counters untouched.
	pub(crate) non_lhs_count: u32,
	pub(crate) non_trivial_count: u32,
	pub(crate) assignment_count: u32,
	pub(crate) last_ident: Option<Ident>,
	pub(crate) last_function_name: Option<(Ident, Span)>,
	/// Set when a parsed expression is only legal as a destructuring
	/// pattern (a CoverInitializedName like `{x = 1}`), with the span of the
	/// offending initializer.
	pub(crate) indicates_pattern: Option<Span>,
	pub(crate) features: Features,
	pub(crate) num_constants: u32,
	pub(crate) function_declarations: Vec<Ident>,
	pub(crate) var_declarations: Vec<Ident>,
	/// First duplicate parameter of the list currently being parsed, fatal
	/// or not depending on the final list shape.
	pub(crate) seen_duplicate_parameter: Option<(Ident, Span)>,
	/// When set, every declared binding is also collected here; used by
	/// `export <declaration>` to register the exported names.
	pub(crate) pending_binding_names: Option<Vec<(Ident, Span)>>,
	pub(crate) loop_depth: u32,
	pub(crate) switch_depth: u32,
	/// Local names of plain named exports, validated against module-level
	/// declarations at the end of the parse.
	pub(crate) export_locals: Vec<(Ident, Span)>,
	pub(crate) stmt_recursion: usize,
	pub(crate) expr_recursion: usize,
}

impl<'a, B: TreeBuild> Parser<'a, B> {
	/// Create a new parser for the given source.
	pub fn new(
		source: &'a [u8],
		builder: B,
		settings: ParserSettings,
		interner: &'a mut Interner,
		cache: Option<&'a mut FunctionCache>,
	) -> Self {
		Parser {
			lexer: Lexer::new(source),
			last_span: Span::empty(),
			last_token_kind: TokenKind::Eof,
			token_buffer: TokenBuffer::new(),
			builder,
			interner,
			cache,
			scopes: ScopeStack::new(),
			settings,
			allows_in: true,
			function_parse_phase: FunctionParsePhase::Body,
			non_lhs_count: 0,
			non_trivial_count: 0,
			assignment_count: 0,
			last_ident: None,
			last_function_name: None,
			indicates_pattern: None,
			features: Features::empty(),
			num_constants: 0,
			function_declarations: Vec::new(),
			var_declarations: Vec::new(),
			seen_duplicate_parameter: None,
			pending_binding_names: None,
			loop_depth: 0,
			switch_depth: 0,
			export_locals: Vec::new(),
			stmt_recursion: 256,
			expr_recursion: 512,
		}
	}

	pub fn source(&self) -> &'a [u8] {
		self.lexer.reader.full()
	}

	/// Returns the next token and advances the parser one token forward.
	#[allow(clippy::should_implement_trait)]
	pub fn next(&mut self) -> Token {
		let res = self.token_buffer.pop().unwrap_or_else(|| self.lexer.next_token());
		self.last_span = res.span;
		self.last_token_kind = res.kind;
		res
	}

	/// Consume the current peeked value and advance the parser one token
	/// forward.
	///
	/// Should only be called after peeking a value.
	pub fn pop_peek(&mut self) -> Token {
		let res = self.token_buffer.pop().unwrap();
		self.last_span = res.span;
		self.last_token_kind = res.kind;
		res
	}

	/// Returns the next token without consuming it.
	pub fn peek(&mut self) -> Token {
		if let Some(x) = self.token_buffer.first() {
			return x;
		}
		let res = self.lexer.next_token();
		self.token_buffer.push(res);
		res
	}

	/// Returns the token after the next token without consuming either.
	pub fn peek1(&mut self) -> Token {
		self.peek_token_at(1)
	}

	/// Returns the n'th next token without consuming it.
	/// `peek_token_at(0)` is equivalent to `peek`.
	pub fn peek_token_at(&mut self, at: u8) -> Token {
		for _ in self.token_buffer.len()..=at {
			let r = self.lexer.next_token();
			self.token_buffer.push(r);
		}
		self.token_buffer.at(at).unwrap()
	}

	/// Return the token kind of the next token without consuming it.
	pub fn peek_kind(&mut self) -> TokenKind {
		self.peek().kind
	}

	/// Returns the span of the next token if it was already peeked,
	/// otherwise returns the span of the last consumed token.
	pub fn recent_span(&mut self) -> Span {
		self.token_buffer.first().map(|x| x.span).unwrap_or(self.last_span)
	}

	/// Returns the span of the last consumed token.
	pub fn last_span(&mut self) -> Span {
		self.last_span
	}

	/// Returns the last consumed token, reconstructed from its recorded
	/// kind and span.
	pub(crate) fn last_token(&self) -> Token {
		Token {
			kind: self.last_token_kind,
			span: self.last_span,
			newline_before: false,
		}
	}

	/// Eat the next token if it is of the given kind.
	/// Returns whether a token was eaten.
	pub fn eat(&mut self, token: TokenKind) -> bool {
		let peek = self.peek();
		if token == peek.kind {
			self.token_buffer.pop();
			self.last_span = peek.span;
			self.last_token_kind = peek.kind;
			true
		} else {
			false
		}
	}

	/// Checks if the next token is of the given kind. If it isn't it returns
	/// an UnclosedDelimiter error.
	pub fn expect_closing_delimiter(
		&mut self,
		kind: TokenKind,
		should_close: Span,
	) -> ParseResult<()> {
		if !self.eat(kind) {
			return Err(ParseError::new(
				ParseErrorKind::UnclosedDelimiter {
					expected: kind,
					should_close,
				},
				self.recent_span(),
			));
		}
		Ok(())
	}

	/// Capture a transactional snapshot of the parser.
	pub(crate) fn save_point(&self) -> SavePoint {
		SavePoint {
			last_span: self.last_span,
			non_lhs_count: self.non_lhs_count,
			non_trivial_count: self.non_trivial_count,
			assignment_count: self.assignment_count,
			num_constants: self.num_constants,
			scope_depth: self.scopes.depth(),
		}
	}

	/// Roll the parser back to a snapshot.
	///
	/// The lexer backs up to just after the last token consumed at capture
	/// time; everything after re-lexes, so payload slots regenerate
	/// correctly. Scopes pushed since the capture are discarded without
	/// propagating anything into their parents.
	pub(crate) fn rewind(&mut self, save_point: SavePoint) {
		self.token_buffer.clear();
		self.lexer.backup_after(save_point.last_span);
		self.lexer.error = None;
		self.last_span = save_point.last_span;
		self.non_lhs_count = save_point.non_lhs_count;
		self.non_trivial_count = save_point.non_trivial_count;
		self.assignment_count = save_point.assignment_count;
		self.num_constants = save_point.num_constants;
		self.indicates_pattern = None;
		self.scopes.truncate(save_point.scope_depth);
	}

	/// Back the lexer up to the start of the given token, clearing the peek
	/// buffer. Used before rescanning a `/` as a regular expression or a `}`
	/// as a template trailer.
	pub(crate) fn backup_before_token(&mut self, token: Token) {
		self.token_buffer.clear();
		self.lexer.backup_before(token.span);
	}

	// --- Token payload accessors.
	//
	// Values are reconstructed from the token span with a scratch lexer
	// rather than read from the shared payload slots, because the slots may
	// have been overwritten while the token sat in the peek buffer.

	fn span_text(&self, span: Span) -> &'a [u8] {
		self.lexer.reader.span(span)
	}

	/// The interned text of an identifier token, or of a keyword token used
	/// as an identifier.
	pub(crate) fn ident_value(&mut self, token: Token) -> Ident {
		match token.kind {
			TokenKind::Identifier => {
				let text = self.span_text(token.span);
				if text.contains(&b'\\') {
					let mut sub = Lexer::new(text);
					sub.next_token();
					let value = sub.string.take().unwrap_or_default();
					self.interner.intern(&value)
				} else {
					// Fast path, the text is exactly the span.
					let text = std::str::from_utf8(text).unwrap_or_default();
					self.interner.intern(text)
				}
			}
			TokenKind::Keyword(x) => self.interner.intern(x.as_str()),
			x => unreachable!("token {:?} has no identifier value", x),
		}
	}

	/// The value of a string literal token: the interned cooked text, plus
	/// whether it was written without escapes and whether it contained a
	/// legacy octal escape.
	pub(crate) fn strand_value(&mut self, token: Token) -> (Ident, bool, bool) {
		debug_assert_eq!(token.kind, TokenKind::Strand);
		let mut sub = Lexer::new(self.span_text(token.span));
		sub.next_token();
		let value = sub.string.take().unwrap_or_default();
		let id = self.interner.intern(&value);
		(id, !sub.strand_has_escape, sub.strand_has_octal_escape)
	}

	/// The numeric value of a number token.
	pub(crate) fn number_value(&mut self, token: Token) -> f64 {
		debug_assert!(matches!(token.kind, TokenKind::Number(_)));
		let mut sub = Lexer::new(self.span_text(token.span));
		sub.next_token();
		sub.number.take().unwrap_or(f64::NAN)
	}

	/// The cooked and raw text of a template segment token.
	pub(crate) fn template_value(&mut self, token: Token) -> (Ident, Ident) {
		let TokenKind::Template(kind) = token.kind else {
			unreachable!("token {:?} is not a template segment", token.kind)
		};
		let mut sub = Lexer::new(self.span_text(token.span));
		match kind {
			TemplateKind::Full | TemplateKind::Head => {
				sub.next_token();
			}
			TemplateKind::Middle | TemplateKind::Tail => {
				sub.scan_template_trailer();
			}
		}
		let cooked = sub.template_cooked.take().unwrap_or_default();
		let raw = sub.template_raw.take().unwrap_or_default();
		(self.interner.intern(&cooked), self.interner.intern(&raw))
	}

	/// Whether a number literal was written in the legacy octal form, which
	/// strict mode rejects.
	pub(crate) fn number_is_legacy_octal(token: Token) -> bool {
		matches!(token.kind, TokenKind::Number(NumberKind::LegacyOctal))
	}

	/// Record a use of an identifier in the current scope, tracking the
	/// features the compiler wants to know about.
	pub(crate) fn use_ident(&mut self, name: Ident) {
		if name == names::EVAL {
			self.features |= Features::USES_EVAL;
			if let Some(x) = self.scopes.current_function_mut() {
				x.needs_full_activation = true;
			}
		}
		if name == names::ARGUMENTS {
			self.features |= Features::USES_ARGUMENTS;
			if let Some(x) = self.scopes.current_function_mut() {
				x.needs_full_activation = true;
			}
		}
		self.scopes.use_name(name);
		self.last_ident = Some(name);
	}

	/// Whether user-oriented early errors apply; builtins get a pass on a
	/// few of them.
	pub(crate) fn is_builtin(&self) -> bool {
		matches!(self.settings.builtin_mode, BuiltinMode::Builtin)
	}

	/// Parse a complete source according to the configured parse mode.
	///
	/// This is the primary entry point of the parser.
	pub async fn parse_root(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		let res = self.parse_root_inner(ctx).await;
		if res.is_err() {
			// Scope balance holds on the error path as well.
			self.scopes.truncate(0);
		}
		debug_assert!(self.scopes.is_empty());
		res
	}

	async fn parse_root_inner(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		match self.settings.parse_mode {
			ParseMode::Program => self.parse_program_root(ctx).await,
			ParseMode::ModuleAnalyze | ParseMode::ModuleEvaluate => {
				self.parse_module_root(ctx).await
			}
			_ => self.parse_function_root(ctx).await,
		}
	}

	async fn parse_program_root(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		let mut scope = Scope::function(FunctionKind::Normal, self.settings.strict);
		scope.constructor_kind = self.settings.constructor_kind;
		scope.expected_super_binding = self.settings.super_binding;
		scope.is_program_root = true;
		self.scopes.push(scope);

		let elements = self.parse_source_elements_checked(ctx, None).await?;

		let token = self.peek();
		if !token.is_eof() {
			unexpected!(self, token, "the program to end");
		}

		let scope = self.scopes.pop();
		if scope.strict {
			self.features |= Features::STRICT_MODE;
		}
		self.var_declarations = scope.var_names_sorted();
		Ok(elements)
	}

	async fn parse_module_root(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		self.scopes.push(Scope::module());

		let elements = self.parse_module_items(ctx).await?;

		let token = self.peek();
		if !token.is_eof() {
			unexpected!(self, token, "the module to end");
		}

		// Every named export must resolve to a module-level declaration.
		self.validate_exports()?;

		let scope = self.scopes.pop();
		debug_assert!(scope.strict);
		self.features |= Features::STRICT_MODE;
		self.var_declarations = scope.var_names_sorted();
		Ok(elements)
	}

	/// Parse the source of a single function, for the compiler re-entering a
	/// function it only has cached side information for.
	async fn parse_function_root(&mut self, ctx: &mut Stk) -> ParseResult<Vec<B::Stmt>> {
		let kind = match self.settings.parse_mode {
			ParseMode::NormalFunction => FunctionKind::Normal,
			ParseMode::Method => FunctionKind::Method,
			ParseMode::Getter => FunctionKind::Getter,
			ParseMode::Setter => FunctionKind::Setter,
			ParseMode::GeneratorWrapperFunction | ParseMode::GeneratorBody => {
				FunctionKind::Generator
			}
			ParseMode::ArrowFunction => FunctionKind::Arrow,
			_ => unreachable!(),
		};
		let mut scope = Scope::function(kind, self.settings.strict);
		scope.constructor_kind = self.settings.constructor_kind;
		scope.expected_super_binding = self.settings.super_binding;
		scope.is_generator = matches!(
			self.settings.parse_mode,
			ParseMode::GeneratorWrapperFunction | ParseMode::GeneratorBody
		);
		scope.is_generator_body = matches!(self.settings.parse_mode, ParseMode::GeneratorBody);
		self.scopes.push(scope);

		if matches!(self.settings.parse_mode, ParseMode::GeneratorBody) {
			self.declare_generator_parameters();
		}

		let elements = self.parse_source_elements_checked(ctx, None).await?;

		let token = self.peek();
		if !token.is_eof() {
			unexpected!(self, token, "the function source to end");
		}

		let scope = self.scopes.pop();
		if scope.strict {
			self.features |= Features::STRICT_MODE;
		}
		self.var_declarations = scope.var_names_sorted();
		Ok(elements)
	}

	/// Declare the synthetic parameter list every generator body receives
	/// for downstream code generation.
	pub(crate) fn declare_generator_parameters(&mut self) {
		for name in [
			names::GENERATOR,
			names::GENERATOR_STATE,
			names::GENERATOR_VALUE,
			names::GENERATOR_RESUME_MODE,
		] {
			let _ = self.scopes.declare_parameter(name);
		}
	}

	/// Parse a list of source elements with directive-prologue processing,
	/// re-parsing the list under strict mode when a `"use strict"` directive
	/// retroactively applies.
	///
	/// `close` is the token ending the list; `None` means end of input. The
	/// closing token is not consumed.
	pub(crate) async fn parse_source_elements_checked(
		&mut self,
		ctx: &mut Stk,
		close: Option<TokenKind>,
	) -> ParseResult<Vec<B::Stmt>> {
		let save_point = self.save_point();
		let mut elements = Vec::new();
		let mut in_prologue = true;

		loop {
			let token = self.peek();
			if token.is_eof() {
				break;
			}
			if let Some(close) = close {
				if token.kind == close {
					break;
				}
			}

			if in_prologue && token.kind == TokenKind::Strand {
				let (value, exact, _) = self.strand_value(token);
				let trivial_before = (self.non_trivial_count, self.assignment_count);
				let stmt = ctx.run(|ctx| self.parse_stmt(ctx)).await?;
				let is_directive =
					(self.non_trivial_count, self.assignment_count) == trivial_before;
				if is_directive {
					if value == names::USE_STRICT && exact && !self.scopes.strict() {
						// The directive applies to everything before it as
						// well: validate what we already saw, then re-parse
						// the whole list in strict mode.
						self.validate_retroactive_strict()?;
						self.scopes.set_strict();
						self.rewind(save_point);
						elements.clear();
						continue;
					}
					elements.push(stmt);
					continue;
				}
				in_prologue = false;
				elements.push(stmt);
				continue;
			}
			in_prologue = false;

			let stmt = ctx.run(|ctx| self.parse_stmt(ctx)).await?;
			elements.push(stmt);
		}
		Ok(elements)
	}

	/// Checks performed when a directive prologue turns on strict mode after
	/// part of the surrounding construct was already parsed.
	fn validate_retroactive_strict(&mut self) -> ParseResult<()> {
		if let Some((name, span)) = self.last_function_name {
			if name == names::EVAL {
				bail!("Cannot name a function 'eval' in strict mode"; @span);
			}
			if name == names::ARGUMENTS {
				bail!("Cannot name a function 'arguments' in strict mode"; @span);
			}
		}
		Ok(())
	}

	/// Validate that every named export refers to a declared module-level
	/// binding. Runs at the end of a module parse, when all hoisted and
	/// lexical declarations are known.
	fn validate_exports(&mut self) -> ParseResult<()> {
		let pending = std::mem::take(&mut self.export_locals);
		for (name, span) in pending {
			if !self.scopes.is_declared_in_current_function(name) {
				let text = self.interner.resolve(name).to_owned();
				bail!("Exported binding '{text}' needs to refer to a top-level declared variable"; @span);
			}
		}
		Ok(())
	}

	/// Look up the function cache for a body starting at the given offset.
	pub(crate) fn cache_get(&self, body_start: u32) -> Option<CacheEntry> {
		if !B::CAN_USE_FUNCTION_CACHE {
			return None;
		}
		self.cache.as_ref().and_then(|x| x.get(body_start)).cloned()
	}

	/// Record a cache entry for a body starting at the given offset.
	pub(crate) fn cache_insert(&mut self, body_start: u32, entry: CacheEntry) {
		if !B::CAN_USE_FUNCTION_CACHE {
			return;
		}
		if let Some(cache) = self.cache.as_mut() {
			cache.insert(body_start, entry);
		}
	}
}

impl Parser<'_, AstBuilder> {
	/// Assemble the public parse output after a successful AST parse.
	pub fn into_output(self, elements: Vec<crate::ast::Stmt>) -> crate::syn::ParseOutput {
		crate::syn::ParseOutput {
			elements,
			function_declarations: self.function_declarations,
			var_declarations: self.var_declarations,
			features: self.features,
			num_constants: self.num_constants,
		}
	}
}
