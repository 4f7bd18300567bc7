//! Cross-cutting grammar tests.

use crate::ast::{Expr, ExprKind, FunctionInfo, Stmt, StmtKind};

mod cache;
mod expr;
mod module;
mod stmt;
mod strict;

use crate::syn::{self, Program};

/// Parse a program, panicking with the rendered error on failure.
pub(super) fn parse(source: &str) -> Program {
	match syn::parse_program(source) {
		Ok(x) => x,
		Err(e) => panic!("failed to parse {source:?}:\n{e}"),
	}
}

/// Parse a program, panicking if it unexpectedly succeeds, and return the
/// rendered error text.
pub(super) fn parse_err(source: &str) -> String {
	match syn::parse_program(source) {
		Ok(_) => panic!("expected {source:?} to fail to parse"),
		Err(e) => e.to_string(),
	}
}

/// The statements of a parsed program.
pub(super) fn parse_stmts(source: &str) -> Vec<Stmt> {
	parse(source).output.elements
}

/// The single expression of a one-expression-statement program.
pub(super) fn parse_expr(source: &str) -> Expr {
	let mut elements = parse_stmts(source);
	assert_eq!(elements.len(), 1, "expected a single statement in {source:?}");
	match elements.remove(0).kind {
		StmtKind::Expr(x) => x,
		x => panic!("expected an expression statement, found {x:?}"),
	}
}

/// The function record of a program declaring a single function.
pub(super) fn parse_function(source: &str) -> Box<FunctionInfo> {
	for stmt in parse_stmts(source) {
		if let StmtKind::FunctionDecl(x) = stmt.kind {
			return x;
		}
	}
	panic!("no function declaration in {source:?}");
}

#[test]
fn builders_agree_on_verdicts() {
	let sources = [
		"let x = 1;",
		"function f(a, b) { return a + b; }",
		"class A extends B { constructor() { super(); } m() {} }",
		"for (let k of xs) {}",
		"`a${1 + 2}b`",
		"({a: 1, b() {}, get c() { return 1; }})",
		"let {a: x = 1, ...rest} = o;",
		"(a, b) => a + b",
		// Invalid programs.
		"let x = ;",
		"function (){}",
		"let a; let a;",
		"const c;",
		"continue;",
		"'use strict'; with (a) {}",
		"({x = 1});",
		"for (let [a] of) {}",
	];
	for source in sources {
		let full = syn::parse_program(source);
		let check = syn::check_program(source);
		assert_eq!(
			full.is_ok(),
			check.is_ok(),
			"builders disagree on verdict for {source:?}"
		);
		if let (Err(full), Err(check)) = (full, check) {
			assert_eq!(
				full.to_string(),
				check.to_string(),
				"builders disagree on error for {source:?}"
			);
		}
	}
}

#[test]
fn deeply_nested_source_errors_cleanly() {
	let mut source = String::new();
	for _ in 0..10_000 {
		source.push('(');
	}
	source.push('1');
	for _ in 0..10_000 {
		source.push(')');
	}
	let err = parse_err(&source);
	assert!(err.contains("Stack exhausted"), "unexpected error: {err}");
}

#[test]
fn interned_identifiers_round_trip() {
	let program = parse("let alpha = beta + alpha;");
	let interner = &program.interner;
	let alpha = interner.get("alpha").expect("alpha interned");
	let beta = interner.get("beta").expect("beta interned");
	assert_ne!(alpha, beta);
	assert_eq!(interner.resolve(alpha), "alpha");
	assert_eq!(interner.resolve(beta), "beta");

	// Identifier identity is preserved across parses of the same source.
	let again = parse("let alpha = beta + alpha;");
	assert_eq!(again.interner.get("alpha"), Some(alpha));
	assert_eq!(again.interner.get("beta"), Some(beta));
}

#[test]
fn top_level_declarations_are_reported() {
	let program = parse("var a; function f() { var inner; } var b;");
	let interner = &program.interner;
	let names: Vec<&str> = program
		.output
		.var_declarations
		.iter()
		.map(|x| interner.resolve(*x))
		.collect();
	assert!(names.contains(&"a"));
	assert!(names.contains(&"b"));
	assert!(names.contains(&"f"));
	assert!(!names.contains(&"inner"));
	let functions: Vec<&str> = program
		.output
		.function_declarations
		.iter()
		.map(|x| interner.resolve(*x))
		.collect();
	assert_eq!(functions, vec!["f"]);
}

#[test]
fn num_constants_counts_literals() {
	let program = parse("let a = 1 + 2; let b = 'x';");
	assert_eq!(program.output.num_constants, 3);
}

#[test]
fn expr_kind_helper() {
	let expr = parse_expr("a + b;");
	assert!(matches!(expr.kind, ExprKind::Binary { .. }));
}
