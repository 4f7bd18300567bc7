//! Function-body cache tests.

use crate::ast::{FunctionBody, FunctionInfo, Interner, StmtKind};
use crate::syn::parser::FunctionCache;
use crate::syn::{self, ParserSettings};

fn first_function(elements: &[crate::ast::Stmt]) -> &FunctionInfo {
	for stmt in elements {
		if let StmtKind::FunctionDecl(x) = &stmt.kind {
			return x;
		}
	}
	panic!("no function declaration");
}

#[test]
fn cache_replay_skips_the_body() {
	let source = "function f(x) { let twice = x + x; return twice * twice; } f;";
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings::default();

	let first = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	let first_fn = first_function(&first.elements).clone();
	assert!(matches!(first_fn.body, FunctionBody::Block(_)));
	assert_eq!(cache.len(), 1, "a body this long should be cached");

	// Re-parsing the same source with the same cache skips the body and
	// reproduces the side information.
	let second = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	let second_fn = first_function(&second.elements).clone();
	assert!(matches!(second_fn.body, FunctionBody::Cached));
	assert_eq!(cache.len(), 1, "no new cache entry on the re-parse");

	assert_eq!(first_fn.name, second_fn.name);
	assert_eq!(first_fn.parameter_count, second_fn.parameter_count);
	assert_eq!(first_fn.is_strict, second_fn.is_strict);
	assert_eq!(first_fn.captured, second_fn.captured);
	assert_eq!(first_fn.span, second_fn.span);
	assert_eq!(first_fn.body_span, second_fn.body_span);
	assert_eq!(first_fn.features, second_fn.features);

	// The rest of the program still parses normally.
	assert_eq!(first.elements.len(), second.elements.len());
}

#[test]
fn short_bodies_are_not_cached() {
	let source = "function f() { g(); }";
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings::default();
	syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	assert!(cache.is_empty());
}

#[test]
fn captured_variables_survive_the_replay() {
	let source = "function outer() { let up = 1; return function inner() { return up + down; }; }";
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings::default();

	let first = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	let outer_first = first_function(&first.elements).clone();

	let second = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	let outer_second = first_function(&second.elements).clone();

	// `down` is free in outer as well; `up` resolves inside it.
	let up = interner.get("up").unwrap();
	let down = interner.get("down").unwrap();
	assert!(outer_first.captured.contains(&down));
	assert!(!outer_first.captured.contains(&up));
	assert_eq!(outer_first.captured, outer_second.captured);
}

#[test]
fn strict_flag_survives_the_replay() {
	let source = "function f() { 'use strict'; let somewhat = 'long body'; }";
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings::default();

	let first = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	assert!(first_function(&first.elements).is_strict);

	let second = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	let function = first_function(&second.elements);
	assert!(matches!(function.body, FunctionBody::Cached));
	assert!(function.is_strict);
}

#[test]
fn syntax_checking_does_not_populate_the_cache() {
	let source = "function f(x) { let twice = x + x; return twice * twice; }";
	syn::check_program(source).unwrap();
	// The checker has no cache at all; parse one fresh to show the contrast.
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	syn::parse_with(source, ParserSettings::default(), &mut interner, &mut cache).unwrap();
	assert_eq!(cache.len(), 1);
}

#[test]
fn arrow_expression_bodies_use_the_lower_threshold() {
	let source = "let f = (a) => a + a + a;";
	let mut interner = Interner::new();
	let mut cache = FunctionCache::new();
	let settings = ParserSettings::default();
	syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	assert_eq!(cache.len(), 1, "an arrow expression body over 8 bytes is cached");

	let second = syn::parse_with(source, settings, &mut interner, &mut cache).unwrap();
	let StmtKind::VarDecl(decl) = &second.elements[0].kind else {
		panic!("expected a declaration");
	};
	let init = decl.declarations[0].init.as_ref().unwrap();
	let crate::ast::ExprKind::Arrow(function) = &init.kind else {
		panic!("expected an arrow function");
	};
	assert!(matches!(function.body, FunctionBody::Cached));
	assert!(function.is_arrow_expression_body);
}
