//! Expression grammar tests.

use super::{parse_err, parse_expr, parse_function, parse_stmts};
use crate::ast::{
	AssignOp, BinaryOp, ExprKind, FunctionBody, FunctionKind, MemberKey, PatternKind,
	PropertyValue, StmtKind, UnaryOp,
};

#[test]
fn binary_precedence() {
	let expr = parse_expr("1 + 2 * 3;");
	let ExprKind::Binary {
		op: BinaryOp::Add,
		right,
		..
	} = expr.kind
	else {
		panic!("expected addition at the root, found {:?}", expr.kind);
	};
	assert!(matches!(
		right.kind,
		ExprKind::Binary {
			op: BinaryOp::Mul,
			..
		}
	));
}

#[test]
fn binary_left_associative() {
	let expr = parse_expr("1 - 2 - 3;");
	let ExprKind::Binary {
		op: BinaryOp::Sub,
		left,
		..
	} = expr.kind
	else {
		panic!("expected subtraction at the root, found {:?}", expr.kind);
	};
	assert!(matches!(
		left.kind,
		ExprKind::Binary {
			op: BinaryOp::Sub,
			..
		}
	));
}

#[test]
fn logical_binds_weaker_than_equality() {
	let expr = parse_expr("a == b && c == d;");
	assert!(matches!(
		expr.kind,
		ExprKind::Binary {
			op: BinaryOp::And,
			..
		}
	));
}

#[test]
fn conditional_is_right_associative() {
	let expr = parse_expr("a ? b : c ? d : e;");
	let ExprKind::Conditional {
		alternate,
		..
	} = expr.kind
	else {
		panic!("expected a conditional");
	};
	assert!(matches!(alternate.kind, ExprKind::Conditional { .. }));
}

#[test]
fn assignment_is_right_associative() {
	let expr = parse_expr("a = b = c;");
	let ExprKind::Assign {
		op: AssignOp::Assign,
		value,
		..
	} = expr.kind
	else {
		panic!("expected an assignment");
	};
	assert!(matches!(value.kind, ExprKind::Assign { .. }));
}

#[test]
fn assignment_needs_a_reference() {
	let err = parse_err("1 = 2;");
	assert!(err.contains("must be a reference"), "unexpected error: {err}");
}

#[test]
fn member_and_call_chains() {
	let expr = parse_expr("a.b[c](d, ...e);");
	let ExprKind::Call {
		callee,
		arguments,
	} = expr.kind
	else {
		panic!("expected a call");
	};
	assert_eq!(arguments.len(), 2);
	assert!(matches!(arguments[1].kind, ExprKind::Spread(_)));
	assert!(matches!(
		callee.kind,
		ExprKind::Member {
			property: MemberKey::Bracket(_),
			..
		}
	));
}

#[test]
fn new_with_and_without_arguments() {
	let expr = parse_expr("new A;");
	assert!(matches!(
		expr.kind,
		ExprKind::New {
			arguments: None,
			..
		}
	));
	let expr = parse_expr("new A(1);");
	assert!(matches!(
		expr.kind,
		ExprKind::New {
			arguments: Some(_),
			..
		}
	));
	// Calls bind to the inner new.
	let expr = parse_expr("new new A()();");
	let ExprKind::New {
		callee,
		arguments,
	} = expr.kind
	else {
		panic!("expected new");
	};
	assert!(arguments.is_some());
	assert!(matches!(callee.kind, ExprKind::New { .. }));
}

#[test]
fn new_target_requires_a_function() {
	let function = parse_function("function f() { return new.target; }");
	assert!(matches!(function.body, FunctionBody::Block(_)));
	let err = parse_err("new.target;");
	assert!(err.contains("only valid inside functions"), "unexpected error: {err}");
}

#[test]
fn update_operand_must_be_a_reference() {
	parse_expr("a++;");
	parse_expr("++a.b;");
	let err = parse_err("1++;");
	assert!(err.contains("must be a reference"), "unexpected error: {err}");
}

#[test]
fn postfix_update_stops_at_a_newline() {
	// `a` and `++b` are two statements.
	let elements = parse_stmts("a\n++b;");
	assert_eq!(elements.len(), 2);
}

#[test]
fn arrow_function_with_two_parameters() {
	let expr = parse_expr("(a, b) => a + b;");
	let ExprKind::Arrow(function) = expr.kind else {
		panic!("expected an arrow function, found {:?}", expr.kind);
	};
	assert_eq!(function.parameter_count, 2);
	assert_eq!(function.kind, FunctionKind::Arrow);
	assert!(function.is_arrow_expression_body);
	assert!(matches!(function.body, FunctionBody::Expr(_)));
}

#[test]
fn arrow_function_single_parameter() {
	let expr = parse_expr("x => x * 2;");
	let ExprKind::Arrow(function) = expr.kind else {
		panic!("expected an arrow function");
	};
	assert_eq!(function.parameter_count, 1);
}

#[test]
fn arrow_function_rest_only() {
	let expr = parse_expr("(...a) => a;");
	let ExprKind::Arrow(function) = expr.kind else {
		panic!("expected an arrow function");
	};
	assert_eq!(function.parameter_count, 1);
	assert!(function.parameters[0].rest);
}

#[test]
fn arrow_rejects_newline_before_arrow() {
	let err = parse_err("(a, b)\n=> a;");
	assert!(err.contains("newline"), "unexpected error: {err}");
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
	let expr = parse_expr("(a, b);");
	assert!(matches!(expr.kind, ExprKind::Sequence(_)));
}

#[test]
fn destructuring_assignment_expression() {
	let expr = parse_expr("({a, b} = o);");
	let ExprKind::AssignPattern {
		pattern,
		..
	} = expr.kind
	else {
		panic!("expected a pattern assignment, found {:?}", expr.kind);
	};
	assert!(matches!(pattern.kind, PatternKind::Object { .. }));
}

#[test]
fn array_destructuring_assignment() {
	let expr = parse_expr("[a, b.c] = xs;");
	let ExprKind::AssignPattern {
		pattern,
		..
	} = expr.kind
	else {
		panic!("expected a pattern assignment, found {:?}", expr.kind);
	};
	let PatternKind::Array {
		elements,
		..
	} = &pattern.kind
	else {
		panic!("expected an array pattern");
	};
	assert_eq!(elements.len(), 2);
}

#[test]
fn shorthand_initializer_outside_pattern_errors() {
	let err = parse_err("({x = 1});");
	assert!(err.contains("destructuring pattern"), "unexpected error: {err}");
}

#[test]
fn object_literal_forms() {
	let expr = parse_expr("({a: 1, b, c() {}, get d() { return 1; }, set d(v) {}, [k]: 2});");
	let ExprKind::Object(properties) = expr.kind else {
		panic!("expected an object literal");
	};
	assert_eq!(properties.len(), 6);
	assert!(matches!(properties[1].value, PropertyValue::Shorthand(_)));
	assert!(matches!(properties[2].value, PropertyValue::Method(_)));
	assert!(matches!(properties[3].value, PropertyValue::Getter(_)));
	assert!(matches!(properties[4].value, PropertyValue::Setter(_)));
}

#[test]
fn duplicate_proto_errors() {
	let err = parse_err("({__proto__: a, __proto__: b});");
	assert!(err.contains("__proto__"), "unexpected error: {err}");
	// Shorthand and computed keys define ordinary properties.
	parse_expr("({__proto__: a, ['__proto__']: b});");
	parse_expr("({__proto__, __proto__: b});");
}

#[test]
fn array_literal_with_elisions_and_spread() {
	let expr = parse_expr("[1, , 2, ...rest];");
	let ExprKind::Array(elements) = expr.kind else {
		panic!("expected an array literal");
	};
	assert_eq!(elements.len(), 4);
	assert!(elements[1].is_none());
	assert!(matches!(elements[3].as_ref().unwrap().kind, ExprKind::Spread(_)));
}

#[test]
fn template_literal_with_substitutions() {
	let expr = parse_expr("`a${x}b${y}c`;");
	let ExprKind::Template(template) = expr.kind else {
		panic!("expected a template literal, found {:?}", expr.kind);
	};
	assert_eq!(template.quasis.len(), 3);
	assert_eq!(template.expressions.len(), 2);
}

#[test]
fn tagged_template() {
	let expr = parse_expr("tag`a${x}b`;");
	assert!(matches!(expr.kind, ExprKind::TaggedTemplate { .. }));
}

#[test]
fn regex_literal() {
	let expr = parse_expr("/ab+c/gi;");
	assert!(matches!(expr.kind, ExprKind::Regex { .. }));
	let err = parse_err("/a/gg;");
	assert!(err.contains("flag"), "unexpected error: {err}");
}

#[test]
fn division_does_not_become_a_regex() {
	let expr = parse_expr("a / b / c;");
	assert!(matches!(
		expr.kind,
		ExprKind::Binary {
			op: BinaryOp::Div,
			..
		}
	));
}

#[test]
fn typeof_void_delete() {
	let expr = parse_expr("typeof a;");
	assert!(matches!(
		expr.kind,
		ExprKind::Unary {
			op: UnaryOp::TypeOf,
			..
		}
	));
	parse_expr("void 0;");
	parse_expr("delete a.b;");
}

#[test]
fn generator_yield_forms() {
	let function = parse_function("function* g(){ yield* x; yield; }");
	assert_eq!(function.kind, FunctionKind::Generator);
	let FunctionBody::Block(body) = &function.body else {
		panic!("expected a block body");
	};
	assert_eq!(body.len(), 2);
	let StmtKind::Expr(first) = &body[0].kind else {
		panic!("expected an expression statement");
	};
	assert!(matches!(
		first.kind,
		ExprKind::Yield {
			delegate: true,
			argument: Some(_),
		}
	));
	let StmtKind::Expr(second) = &body[1].kind else {
		panic!("expected an expression statement");
	};
	assert!(matches!(
		second.kind,
		ExprKind::Yield {
			delegate: false,
			argument: None,
		}
	));
}

#[test]
fn yield_is_an_identifier_outside_generators() {
	let expr = parse_expr("yield + 1;");
	assert!(matches!(
		expr.kind,
		ExprKind::Binary {
			op: BinaryOp::Add,
			..
		}
	));
}

#[test]
fn yield_in_generator_parameters_errors() {
	let err = parse_err("function* g(a = yield) {}");
	assert!(err.contains("yield"), "unexpected error: {err}");
}

#[test]
fn in_operator_allowed_in_expressions() {
	let expr = parse_expr("a in b;");
	assert!(matches!(
		expr.kind,
		ExprKind::Binary {
			op: BinaryOp::In,
			..
		}
	));
}
