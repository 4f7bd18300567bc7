use crate::syn::{
	error::{RenderedError, Snippet},
	lexer::Error as LexError,
	token::{Span, TokenKind},
};

/// The different kinds of parsing failures.
///
/// Syntax errors are token mismatches, semantic errors are well-formed
/// syntax violating a rule, and `StackExhausted` is the recursion guard.
/// Whatever the kind, the first error aborts the parse.
#[derive(Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
	/// The parser encountered an unexpected token.
	Unexpected {
		found: TokenKind,
		expected: &'static str,
	},
	UnexpectedExplain {
		found: TokenKind,
		expected: &'static str,
		explain: &'static str,
	},
	/// The parser encountered the end of the source where it expected more.
	UnexpectedEof {
		expected: &'static str,
	},
	/// An unclosed delimiter, with the span of the token which should be
	/// closed.
	UnclosedDelimiter {
		expected: TokenKind,
		should_close: Span,
	},
	/// The parser encountered a token which could not be lexed correctly.
	InvalidToken(LexError),
	/// Well-formed syntax which violates a rule of the language, like a
	/// duplicate lexical binding.
	Semantic {
		message: String,
		explain: Option<&'static str>,
	},
	/// The recursion guard tripped.
	StackExhausted,
}

/// A parsing error.
#[derive(Debug)]
#[non_exhaustive]
pub struct ParseError {
	pub kind: ParseErrorKind,
	pub at: Span,
}

impl ParseError {
	/// Create a new parse error.
	pub fn new(kind: ParseErrorKind, at: Span) -> Self {
		ParseError {
			kind,
			at,
		}
	}

	/// Returns whether this is a semantic error rather than a plain token
	/// mismatch.
	pub fn is_semantic(&self) -> bool {
		matches!(self.kind, ParseErrorKind::Semantic { .. })
	}

	/// Returns whether the recursion guard produced this error.
	pub fn is_stack_exhausted(&self) -> bool {
		matches!(self.kind, ParseErrorKind::StackExhausted)
	}

	/// Create a rendered error from the string this error was generated
	/// from.
	pub fn render_on(&self, source: &str) -> RenderedError {
		let (text, explain) = match &self.kind {
			ParseErrorKind::Unexpected {
				found,
				expected,
			} => (
				format!("Unexpected token '{}' expected {}", found.as_str(), expected),
				None,
			),
			ParseErrorKind::UnexpectedExplain {
				found,
				expected,
				explain,
			} => (
				format!("Unexpected token '{}' expected {}", found.as_str(), expected),
				Some(*explain),
			),
			ParseErrorKind::UnexpectedEof {
				expected,
			} => (format!("Source ended early, expected {}", expected), None),
			ParseErrorKind::UnclosedDelimiter {
				expected,
				should_close,
			} => {
				// Point at the failure and at the delimiter it had to
				// close.
				return RenderedError {
					text: format!("Expected closing delimiter '{}'", expected.as_str()),
					snippets: vec![
						Snippet::from_span(source, self.at, None),
						Snippet::from_span(
							source,
							*should_close,
							Some("expected this delimiter to close"),
						),
					],
				};
			}
			ParseErrorKind::InvalidToken(error) => (error.to_string(), None),
			ParseErrorKind::Semantic {
				message,
				explain,
			} => (message.clone(), *explain),
			ParseErrorKind::StackExhausted => ("Stack exhausted".to_string(), None),
		};
		RenderedError {
			text,
			snippets: vec![Snippet::from_span(source, self.at, explain)],
		}
	}
}
