//! Directive prologue and strict-mode tests.

use super::{parse, parse_err, parse_function, parse_stmts};
use crate::ast::Features;

#[test]
fn directive_turns_on_strict_mode() {
	let program = parse("'use strict'; var a;");
	assert!(program.output.features.contains(Features::STRICT_MODE));
	let program = parse("var a;");
	assert!(!program.output.features.contains(Features::STRICT_MODE));
}

#[test]
fn directive_retroaction_on_function_name() {
	let err = parse_err("\"use strict\"; function eval(){}");
	assert!(
		err.contains("Cannot name a function 'eval' in strict mode"),
		"unexpected error: {err}"
	);
}

#[test]
fn directive_inside_function_applies_retroactively_to_name() {
	let err = parse_err("function eval() { 'use strict'; }");
	assert!(
		err.contains("Cannot name a function 'eval' in strict mode"),
		"unexpected error: {err}"
	);
}

#[test]
fn directive_inside_function_applies_retroactively_to_parameters() {
	let err = parse_err("function f(eval) { 'use strict'; }");
	assert!(err.contains("eval"), "unexpected error: {err}");
	let err = parse_err("function f(a, a) { 'use strict'; }");
	assert!(err.contains("twice"), "unexpected error: {err}");
}

#[test]
fn escaped_directive_does_not_count() {
	// An escape anywhere in the literal disqualifies the directive.
	let program = parse("\"use\\u0020strict\"; with (o) {}");
	assert!(!program.output.features.contains(Features::STRICT_MODE));
}

#[test]
fn directive_must_lead_the_prologue() {
	// A non-directive statement ends the prologue; the later string is just
	// an expression statement.
	let program = parse("var a; 'use strict'; with (o) {}");
	assert!(!program.output.features.contains(Features::STRICT_MODE));
	// Other directives may precede it.
	let err = parse_err("'a directive'; 'use strict'; with (o) {}");
	assert!(err.contains("with"), "unexpected error: {err}");
}

#[test]
fn strict_function_in_sloppy_program() {
	let function = parse_function("function f() { 'use strict'; } with (o) {}");
	assert!(function.is_strict);
}

#[test]
fn strict_rejects_with() {
	let err = parse_err("'use strict'; with (o) {}");
	assert!(err.contains("with"), "unexpected error: {err}");
}

#[test]
fn strict_rejects_octal_literals_and_escapes() {
	let err = parse_err("'use strict'; var a = 017;");
	assert!(err.contains("Octal"), "unexpected error: {err}");
	let err = parse_err("'use strict'; var a = '\\17';");
	assert!(err.contains("Octal"), "unexpected error: {err}");
	parse_stmts("var a = 017;");
}

#[test]
fn strict_rejects_reserved_words_as_bindings() {
	let err = parse_err("'use strict'; var yield = 1;");
	assert!(err.contains("yield"), "unexpected error: {err}");
	let err = parse_err("'use strict'; let interface;");
	assert!(err.contains("interface"), "unexpected error: {err}");
	// Fine in sloppy mode.
	parse_stmts("var yield = 1; var interface = 2;");
}

#[test]
fn strict_rejects_eval_and_arguments_as_targets() {
	let err = parse_err("'use strict'; eval = 1;");
	assert!(err.contains("eval"), "unexpected error: {err}");
	let err = parse_err("'use strict'; arguments++;");
	assert!(err.contains("arguments"), "unexpected error: {err}");
	parse_stmts("eval = 1; arguments++;");
}

#[test]
fn strict_rejects_unqualified_delete() {
	let err = parse_err("'use strict'; delete a;");
	assert!(err.contains("delete"), "unexpected error: {err}");
	parse_stmts("'use strict'; delete a.b;");
}

#[test]
fn strict_duplicate_parameters() {
	let err = parse_err("'use strict'; function f(a, a) {}");
	assert!(err.contains("twice"), "unexpected error: {err}");
	// Sloppy simple lists may duplicate.
	parse_stmts("function f(a, a) {}");
	// Non-simple lists may not, even in sloppy mode.
	let err = parse_err("function f(a, a, b = 1) {}");
	assert!(err.contains("twice"), "unexpected error: {err}");
	let err = parse_err("function f(a, ...a) {}");
	assert!(err.contains("twice"), "unexpected error: {err}");
}

#[test]
fn class_bodies_are_strict() {
	let err = parse_err("class A { m() { with (o) {} } }");
	assert!(err.contains("with"), "unexpected error: {err}");
}

#[test]
fn module_code_is_strict() {
	let err = crate::syn::parse_module("with (o) {}").unwrap_err().to_string();
	assert!(err.contains("with"), "unexpected error: {err}");
}

#[test]
fn rest_parameter_rules() {
	let err = parse_err("function f(...a, b) {}");
	assert!(err.contains(")"), "unexpected error: {err}");
	let err = parse_err("function f(...a = 1) {}");
	assert!(err.contains("default"), "unexpected error: {err}");
}

#[test]
fn getter_and_setter_arity() {
	let err = parse_err("({get a(x) { return 1; }});");
	assert!(err.contains("getter"), "unexpected error: {err}");
	let err = parse_err("({set a() {}});");
	assert!(err.contains("setter"), "unexpected error: {err}");
}
