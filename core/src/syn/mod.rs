//! Module containing the implementation of the ECMAScript tokens, lexer,
//! and parser.

use tracing::{debug, instrument};

pub mod common;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

#[cfg(test)]
mod test;

use crate::ast::{ConstructorKind, Features, Ident, Interner, Stmt};
use error::RenderedError;
use parser::{AstBuilder, FunctionCache, Parser, SuperBinding, SyntaxChecker};
use reblessive::Stack;

/// An error returned by the public parse entry points: the first failure,
/// rendered against the source.
#[derive(Debug)]
#[non_exhaustive]
pub struct Error(pub RenderedError);

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl std::error::Error for Error {}

/// Which grammar variant the parser runs.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[non_exhaustive]
pub enum ParseMode {
	#[default]
	Program,
	/// Module grammar, used to discover imports and exports.
	ModuleAnalyze,
	/// Module grammar, producing the evaluatable tree.
	ModuleEvaluate,
	NormalFunction,
	Method,
	Getter,
	Setter,
	GeneratorWrapperFunction,
	GeneratorBody,
	ArrowFunction,
}

/// Whether the source is user code or an engine-internal builtin, which
/// disables some user-oriented checks.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[non_exhaustive]
pub enum BuiltinMode {
	#[default]
	Normal,
	Builtin,
}

/// Whether `this` starts in a temporal dead zone, as it does in derived
/// class constructors before `super()` runs.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[non_exhaustive]
pub enum ThisTdzMode {
	#[default]
	None,
	DerivedConstructor,
}

/// Everything that configures a parse besides the source itself.
///
/// Parsing is a pure function of the source and these settings.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct ParserSettings {
	pub parse_mode: ParseMode,
	pub builtin_mode: BuiltinMode,
	/// Start in strict mode, before any directive is seen.
	pub strict: bool,
	pub super_binding: SuperBinding,
	pub constructor_kind: ConstructorKind,
	pub this_tdz: ThisTdzMode,
}

/// The output of a parse: the tree plus the side tables the bytecode
/// compiler consumes.
#[derive(Debug)]
#[non_exhaustive]
pub struct ParseOutput {
	pub elements: Vec<Stmt>,
	/// Functions declared at the top level of the parsed source.
	pub function_declarations: Vec<Ident>,
	/// `var`-bound names hoisted to the top level of the parsed source.
	pub var_declarations: Vec<Ident>,
	pub features: Features,
	/// Number of literal constants encountered, for compiler
	/// preallocation.
	pub num_constants: u32,
}

/// The output of a standalone parse which owns its interner.
#[derive(Debug)]
#[non_exhaustive]
pub struct Program {
	pub output: ParseOutput,
	pub interner: Interner,
}

/// Parses an ECMAScript program.
///
/// During parsing the total depth of nested statements and expressions
/// counts against a depth limit; if the limit is reached parsing returns a
/// "Stack exhausted" error rather than overflowing the call stack.
#[instrument(level = "debug", name = "parser", skip_all, fields(length = source.len()))]
pub fn parse_program(source: &str) -> Result<Program, Error> {
	debug!("parsing program");
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings {
		parse_mode: ParseMode::Program,
		..ParserSettings::default()
	};
	let output = run_ast_parse(source, settings, &mut interner, &mut cache)?;
	Ok(Program {
		output,
		interner,
	})
}

/// Parses an ECMAScript module.
#[instrument(level = "debug", name = "parser", skip_all, fields(length = source.len()))]
pub fn parse_module(source: &str) -> Result<Program, Error> {
	debug!("parsing module");
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings {
		parse_mode: ParseMode::ModuleEvaluate,
		..ParserSettings::default()
	};
	let output = run_ast_parse(source, settings, &mut interner, &mut cache)?;
	Ok(Program {
		output,
		interner,
	})
}

/// Parses with explicit settings against a caller-owned interner and
/// function cache, which is how the engine re-parses an inner function
/// and reuses the side information of an earlier pass.
#[instrument(level = "debug", name = "parser", skip_all, fields(length = source.len()))]
pub fn parse_with(
	source: &str,
	settings: ParserSettings,
	interner: &mut Interner,
	cache: &mut FunctionCache,
) -> Result<ParseOutput, Error> {
	debug!("parsing with explicit settings");
	run_ast_parse(source, settings, interner, cache)
}

/// Checks the syntax of a program without building a tree.
///
/// Agrees with [`parse_program`] on the verdict and, on failure, on the
/// error message.
#[instrument(level = "debug", name = "parser", skip_all, fields(length = source.len()))]
pub fn check_program(source: &str) -> Result<(), Error> {
	debug!("checking program");
	let settings = ParserSettings {
		parse_mode: ParseMode::Program,
		..ParserSettings::default()
	};
	check_with(source, settings)
}

/// Checks the syntax of a module without building a tree.
#[instrument(level = "debug", name = "parser", skip_all, fields(length = source.len()))]
pub fn check_module(source: &str) -> Result<(), Error> {
	debug!("checking module");
	let settings = ParserSettings {
		parse_mode: ParseMode::ModuleAnalyze,
		..ParserSettings::default()
	};
	check_with(source, settings)
}

/// Checks syntax with explicit settings.
pub fn check_with(source: &str, settings: ParserSettings) -> Result<(), Error> {
	let mut interner = Interner::new();
	let mut parser =
		Parser::new(source.as_bytes(), SyntaxChecker, settings, &mut interner, None);
	let mut stack = Stack::new();
	stack
		.enter(|stk| parser.parse_root(stk))
		.finish()
		.map_err(|e| Error(e.render_on(source)))?;
	Ok(())
}

fn run_ast_parse(
	source: &str,
	settings: ParserSettings,
	interner: &mut Interner,
	cache: &mut FunctionCache,
) -> Result<ParseOutput, Error> {
	let mut parser =
		Parser::new(source.as_bytes(), AstBuilder, settings, interner, Some(cache));
	let mut stack = Stack::new();
	let elements = stack
		.enter(|stk| parser.parse_root(stk))
		.finish()
		.map_err(|e| Error(e.render_on(source)))?;
	Ok(parser.into_output(elements))
}
