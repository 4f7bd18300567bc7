//! Statement grammar tests.

use super::{parse, parse_err, parse_stmts};
use crate::ast::{
	DeclKind, ExprKind, ForHead, ForInit, PatternKind, StmtKind,
};

#[test]
fn automatic_semicolon_insertion() {
	let elements = parse_stmts("a\nb");
	assert_eq!(elements.len(), 2);
	let elements = parse_stmts("a; b");
	assert_eq!(elements.len(), 2);
	let err = parse_err("a b");
	assert!(err.contains("line terminator"), "unexpected error: {err}");
}

#[test]
fn block_statement() {
	let elements = parse_stmts("{ let a = 1; a; }");
	assert_eq!(elements.len(), 1);
	assert!(matches!(&elements[0].kind, StmtKind::Block(x) if x.len() == 2));
}

#[test]
fn lexical_declaration_with_destructuring_default_and_rest() {
	let mut elements = parse_stmts("let {a: x = 1, ...rest} = o;");
	let StmtKind::VarDecl(decl) = elements.remove(0).kind else {
		panic!("expected a declaration");
	};
	assert_eq!(decl.kind, DeclKind::Let);
	assert_eq!(decl.declarations.len(), 1);
	let declarator = &decl.declarations[0];
	assert!(declarator.init.is_some());
	let PatternKind::Object {
		properties,
		rest,
	} = &declarator.pattern.kind
	else {
		panic!("expected an object pattern");
	};
	assert_eq!(properties.len(), 1);
	assert!(matches!(properties[0].pattern.kind, PatternKind::Ident(_)));
	assert!(matches!(
		properties[0].default.as_ref().unwrap().kind,
		ExprKind::Number(x) if x == 1.0
	));
	assert!(rest.is_some());
}

#[test]
fn rest_element_must_be_last() {
	let err = parse_err("let [...a, b] = xs;");
	assert!(
		err.contains("closing ']' following a rest element"),
		"unexpected error: {err}"
	);
}

#[test]
fn const_requires_initializer() {
	let err = parse_err("const c;");
	assert!(err.contains("initializer"), "unexpected error: {err}");
}

#[test]
fn duplicate_lexical_binding_errors() {
	let err = parse_err("let a; let a;");
	assert!(err.contains("twice"), "unexpected error: {err}");
	let err = parse_err("let a; var a;");
	assert!(err.contains("shadows"), "unexpected error: {err}");
	// var/var duplicates are fine.
	parse_stmts("var a; var a;");
	// Shadowing in an inner block is fine.
	parse_stmts("let a; { let a; }");
}

#[test]
fn let_disambiguation() {
	// `let [` is always a declaration.
	let elements = parse_stmts("let [a] = xs;");
	assert!(matches!(elements[0].kind, StmtKind::VarDecl(_)));
	// A lone `let` in sloppy mode is just an identifier.
	let elements = parse_stmts("let = 5;");
	assert!(matches!(elements[0].kind, StmtKind::Expr(_)));
	let elements = parse_stmts("let.x;");
	assert!(matches!(elements[0].kind, StmtKind::Expr(_)));
}

#[test]
fn for_classic() {
	let elements = parse_stmts("for (var i = 0; i < 10; i++) {}");
	let StmtKind::For {
		init,
		test,
		update,
		..
	} = &elements[0].kind
	else {
		panic!("expected a for statement");
	};
	assert!(matches!(init, Some(ForInit::VarDecl(_))));
	assert!(test.is_some());
	assert!(update.is_some());
	parse_stmts("for (;;) break;");
}

#[test]
fn for_of_with_lexical_binding() {
	let elements = parse_stmts("for (let k of xs) {}");
	let StmtKind::ForOf {
		left,
		body,
		..
	} = &elements[0].kind
	else {
		panic!("expected a for-of statement");
	};
	assert!(matches!(
		left,
		ForHead::VarDecl {
			kind: DeclKind::Let,
			..
		}
	));
	assert!(matches!(body.kind, StmtKind::Block(_)));
}

#[test]
fn for_in_allows_const_without_initializer() {
	let elements = parse_stmts("for (const c in o) {}");
	assert!(matches!(&elements[0].kind, StmtKind::ForIn { .. }));
}

#[test]
fn for_in_with_member_target() {
	let elements = parse_stmts("for (a.b in o) {}");
	let StmtKind::ForIn {
		left,
		..
	} = &elements[0].kind
	else {
		panic!("expected a for-in statement");
	};
	assert!(matches!(left, ForHead::Pattern(_)));
}

#[test]
fn for_of_with_destructuring_target() {
	let elements = parse_stmts("for ([a, b] of pairs) {}");
	let StmtKind::ForOf {
		left,
		..
	} = &elements[0].kind
	else {
		panic!("expected a for-of statement");
	};
	let ForHead::Pattern(pattern) = left else {
		panic!("expected a pattern head");
	};
	assert!(matches!(pattern.kind, PatternKind::Array { .. }));
}

#[test]
fn for_header_scope_does_not_leak() {
	// The header binding is scoped to the loop, redeclaring outside is fine.
	parse_stmts("for (let i = 0; i < 1; i++) {} let i;");
}

#[test]
fn labels_and_jumps() {
	parse_stmts("outer: for (;;) { inner: for (;;) { continue outer; } break outer; }");
	let err = parse_err("for (;;) { continue missing; }");
	assert!(err.contains("undeclared label"), "unexpected error: {err}");
	let err = parse_err("lbl: { continue lbl; }");
	assert!(err.contains("not targeting a loop"), "unexpected error: {err}");
	let err = parse_err("break;");
	assert!(err.contains("only valid inside"), "unexpected error: {err}");
	let err = parse_err("lbl: lbl: for(;;) {}");
	assert!(err.contains("already been declared"), "unexpected error: {err}");
	// break to a non-loop label is fine.
	parse_stmts("lbl: { break lbl; }");
}

#[test]
fn switch_clause_lists() {
	let elements = parse_stmts(
		"switch (x) { case 1: a; case 2: b; default: c; case 3: d; }",
	);
	let StmtKind::Switch {
		cases,
		default,
		trailing_cases,
		..
	} = &elements[0].kind
	else {
		panic!("expected a switch statement");
	};
	assert_eq!(cases.len(), 2);
	assert!(default.is_some());
	assert_eq!(trailing_cases.len(), 1);
}

#[test]
fn switch_single_default() {
	let err = parse_err("switch (x) { default: a; default: b; }");
	assert!(err.contains("single default"), "unexpected error: {err}");
}

#[test]
fn try_catch_finally() {
	let elements = parse_stmts("try { a; } catch (e) { b; } finally { c; }");
	let StmtKind::Try {
		handler,
		finalizer,
		..
	} = &elements[0].kind
	else {
		panic!("expected a try statement");
	};
	assert!(handler.is_some());
	assert!(finalizer.is_some());

	// A destructuring catch parameter.
	parse_stmts("try {} catch ({message}) {}");

	let err = parse_err("try { a; }");
	assert!(err.contains("catch or"), "unexpected error: {err}");
}

#[test]
fn catch_parameter_is_scoped() {
	parse_stmts("try {} catch (e) {} let e;");
}

#[test]
fn return_outside_function_errors() {
	let err = parse_err("return 1;");
	assert!(err.contains("only valid inside functions"), "unexpected error: {err}");
	parse_stmts("function f() { return 1; }");
}

#[test]
fn throw_needs_expression_on_same_line() {
	let err = parse_err("throw\n x;");
	assert!(err.contains("line break"), "unexpected error: {err}");
	parse_stmts("throw x;");
}

#[test]
fn with_statement_in_sloppy_mode() {
	let elements = parse_stmts("with (o) { a; }");
	assert!(matches!(&elements[0].kind, StmtKind::With { .. }));
}

#[test]
fn do_while_optional_semicolon() {
	let elements = parse_stmts("do a; while (b) c;");
	assert_eq!(elements.len(), 2);
}

#[test]
fn class_declaration() {
	let program = parse("class A extends B { constructor() { super(); } m() {} }");
	let StmtKind::ClassDecl(class) = &program.output.elements[0].kind else {
		panic!("expected a class declaration");
	};
	assert!(class.parent.is_some());
	assert!(class.constructor.is_some());
	assert_eq!(class.instance_members.len(), 1);
	let constructor = class.constructor.as_ref().unwrap();
	assert!(constructor.has_direct_super);
	assert_eq!(constructor.constructor_kind, crate::ast::ConstructorKind::Derived);
	let interner = &program.interner;
	let member_name = match &class.instance_members[0].key {
		crate::ast::PropertyKey::Ident(x) => interner.resolve(*x),
		x => panic!("unexpected key {x:?}"),
	};
	assert_eq!(member_name, "m");
}

#[test]
fn class_constructor_rules() {
	let err = parse_err("class A { constructor() {} constructor() {} }");
	assert!(err.contains("multiple constructors"), "unexpected error: {err}");
	let err = parse_err("class A { get constructor() {} }");
	assert!(err.contains("getter or setter"), "unexpected error: {err}");
	let err = parse_err("class A { static prototype() {} }");
	assert!(err.contains("prototype"), "unexpected error: {err}");
}

#[test]
fn super_rules() {
	let err = parse_err("class A { m() { super(); } }");
	assert!(err.contains("super"), "unexpected error: {err}");
	// Property access is fine in any method.
	parse_stmts("class A { m() { return super.x; } }");
	// Arrows delegate to the enclosing method.
	parse_stmts("class A extends B { constructor() { let f = () => super(); } }");
	let err = parse_err("super.x;");
	assert!(err.contains("super"), "unexpected error: {err}");
}

#[test]
fn static_members() {
	let elements = parse_stmts("class A { static m() {} static() {} }");
	let StmtKind::ClassDecl(class) = &elements[0].kind else {
		panic!("expected a class declaration");
	};
	assert_eq!(class.static_members.len(), 1);
	// `static()` is an instance method named static.
	assert_eq!(class.instance_members.len(), 1);
}

#[test]
fn import_export_rejected_outside_modules() {
	let err = parse_err("import \"mod\";");
	assert!(err.contains("module"), "unexpected error: {err}");
	let err = parse_err("function f() { export let x; }");
	assert!(err.contains("module"), "unexpected error: {err}");
}
