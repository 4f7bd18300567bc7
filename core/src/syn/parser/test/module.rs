//! Module grammar tests.

use crate::ast::{ExportDecl, ImportDecl, StmtKind};
use crate::syn::{self, Program};

fn parse(source: &str) -> Program {
	match syn::parse_module(source) {
		Ok(x) => x,
		Err(e) => panic!("failed to parse module {source:?}:\n{e}"),
	}
}

fn parse_err(source: &str) -> String {
	match syn::parse_module(source) {
		Ok(_) => panic!("expected module {source:?} to fail to parse"),
		Err(e) => e.to_string(),
	}
}

fn first_import(program: &Program) -> &ImportDecl {
	for stmt in program.output.elements.iter() {
		if let StmtKind::Import(x) = &stmt.kind {
			return x;
		}
	}
	panic!("no import declaration");
}

#[test]
fn bare_import() {
	let program = parse("import \"mod\";");
	let import = first_import(&program);
	assert!(import.default.is_none());
	assert!(import.namespace.is_none());
	assert!(import.named.is_empty());
	assert_eq!(program.interner.resolve(import.source), "mod");
}

#[test]
fn default_namespace_and_named_imports() {
	let program = parse("import d, * as ns from \"mod\";");
	let import = first_import(&program);
	assert!(import.default.is_some());
	assert!(import.namespace.is_some());

	let program = parse("import d, {a, b as c, default as dd} from \"mod\";");
	let import = first_import(&program);
	assert!(import.default.is_some());
	assert_eq!(import.named.len(), 3);
	let interner = &program.interner;
	assert_eq!(interner.resolve(import.named[2].imported), "default");
	assert_eq!(interner.resolve(import.named[2].local), "dd");
}

#[test]
fn duplicate_import_binding_errors() {
	let err = parse_err("import {a, b as a} from \"mod\";");
	assert!(err.contains("twice"), "unexpected error: {err}");
}

#[test]
fn reserved_word_import_needs_rename() {
	let err = parse_err("import {default} from \"mod\";");
	assert!(err.contains("as"), "unexpected error: {err}");
}

#[test]
fn export_forms() {
	let program = parse(
		"export var a = 1;\n\
		 export function f() {}\n\
		 export class C {}\n\
		 let local = 2;\n\
		 export {local as renamed};\n\
		 export {a as b2} ;\n\
		 export * from \"other\";\n\
		 export {x} from \"other\";\n\
		 export default 42;\n",
	);
	let exports: Vec<&ExportDecl> = program
		.output
		.elements
		.iter()
		.filter_map(|x| match &x.kind {
			StmtKind::Export(e) => Some(e),
			_ => None,
		})
		.collect();
	assert_eq!(exports.len(), 8);
	assert!(matches!(exports[0], ExportDecl::Local(_)));
	assert!(matches!(exports[3], ExportDecl::Named {
		source: None,
		..
	}));
	assert!(matches!(exports[5], ExportDecl::All { .. }));
	assert!(matches!(
		exports[6],
		ExportDecl::Named {
			source: Some(_),
			..
		}
	));
	assert!(matches!(exports[7], ExportDecl::Default(_)));
}

#[test]
fn named_export_must_resolve() {
	let err = parse_err("export {missing};");
	assert!(
		err.contains("top-level declared variable"),
		"unexpected error: {err}"
	);
	// Resolution happens at the end of the parse, later declarations count.
	parse("export {late}; var late;");
	// A re-export resolves in the other module.
	parse("export {whatever} from \"other\";");
}

#[test]
fn duplicate_export_name_errors() {
	let err = parse_err("var a; export {a, a};");
	assert!(err.contains("twice"), "unexpected error: {err}");
	let err = parse_err("var a, b; export {a}; export {b as a};");
	assert!(err.contains("twice"), "unexpected error: {err}");
}

#[test]
fn single_default_export() {
	let err = parse_err("export default 1; export default 2;");
	assert!(err.contains("default"), "unexpected error: {err}");
}

#[test]
fn default_export_declarations() {
	parse("export default function () {}");
	parse("export default function named() { return named; }");
	parse("export default class {}");
	let program = parse("export default class C {}");
	assert!(program.interner.get("C").is_some());
}

#[test]
fn import_bindings_are_lexical() {
	let err = parse_err("import {a} from \"mod\"; let a;");
	assert!(err.contains("twice"), "unexpected error: {err}");
}

#[test]
fn imports_only_at_top_level() {
	let err = parse_err("function f() { import \"mod\"; }");
	assert!(err.contains("top level"), "unexpected error: {err}");
}
