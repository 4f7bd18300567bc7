//! The parser core of the Kestrel ECMAScript engine.
//!
//! Kestrel's front end is a recursive-descent parser for ES5 plus the ES6
//! additions: `let`/`const`, classes, arrow functions, generators,
//! destructuring, modules, template literals, spread/rest, and computed
//! properties. Given a source text and a parse mode it produces either an
//! abstract syntax tree or a syntax-validity verdict, along with the side
//! information the bytecode compiler consumes: declared variables, captured
//! variables, function-body source-range caches, and strict-mode flags.
//!
//! The interesting machinery lives in [`syn`]:
//!
//! - a hand-written byte-level [lexer](syn::lexer) driven by parser
//!   feedback for the `/`-as-regex and `}`-as-template ambiguities,
//! - the [parser](syn::parser) itself, written once against a pluggable
//!   [tree builder](syn::parser::TreeBuild) so the same grammar drives
//!   both full AST construction and cheap syntax-only validation,
//! - a scope stack computing captured-variable sets as scopes pop,
//! - a [function-body cache](syn::parser::FunctionCache) letting outer
//!   parses skip re-parsing inner function bodies.
//!
//! ```
//! let program = kestrel_core::syn::parse_program("let x = 1 + 2;").unwrap();
//! assert_eq!(program.output.elements.len(), 1);
//! ```

pub mod ast;
pub mod syn;
