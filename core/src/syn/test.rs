use super::{check_program, parse_program};

#[test]
fn error_renders_with_a_snippet() {
	let source = "let a = 1;\nlet a = 2;\n";
	let error = parse_program(source).unwrap_err().to_string();
	// The rendered error points at the offending line.
	assert!(error.contains("Cannot declare a lexical variable twice"), "{error}");
	assert!(error.contains("2 |"), "{error}");
	assert!(error.contains('^'), "{error}");
}

#[test]
fn error_in_the_middle_of_a_line() {
	let source = "let x = 1 + ;";
	let error = parse_program(source).unwrap_err().to_string();
	assert!(error.contains("Unexpected token ';'"), "{error}");
}

#[test]
fn check_is_cheap_and_agrees() {
	let source = "function f(a, {b = 1}) { return () => a + b; }";
	assert!(parse_program(source).is_ok());
	assert!(check_program(source).is_ok());
}

#[test]
fn empty_source() {
	let program = parse_program("").unwrap();
	assert!(program.output.elements.is_empty());
	assert!(program.output.var_declarations.is_empty());
}
