use thiserror::Error;

mod byte;
mod ident;
pub mod keywords;
mod number;
mod reader;
mod regex;
mod strand;
mod template;
pub mod unicode;

#[cfg(test)]
mod test;

pub use reader::{BytesReader, CharError};

use crate::syn::token::{Span, Token, TokenKind};

/// An error returned by the lexer when an invalid token is encountered.
///
/// Can be retrieved from the `Lexer::error` field whenever it returned a
/// [`TokenKind::Invalid`] token.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	#[error("Lexer encountered unexpected character {0:?}")]
	UnexpectedCharacter(char),
	#[error("invalid escape character {0:?}")]
	InvalidEscapeCharacter(char),
	#[error("Lexer encountered unexpected end of source characters")]
	UnexpectedEof,
	#[error("source was not valid utf-8")]
	InvalidUtf8,
	#[error("missing digits after number base prefix")]
	DigitsExpected,
	#[error("number cannot be directly followed by an identifier character")]
	IdentAfterNumber,
	#[error("invalid unicode escape sequence")]
	InvalidUnicodeEscape,
	#[error("unicode escape is not a valid identifier character")]
	InvalidIdentEscape,
	#[error("unterminated string literal")]
	UnterminatedStrand,
	#[error("unterminated template literal")]
	UnterminatedTemplate,
	#[error("unterminated regular expression literal")]
	UnterminatedRegex,
	#[error("duplicate regular expression flag {0:?}")]
	DuplicateRegexFlag(char),
	#[error("unterminated multi-line comment")]
	UnterminatedComment,
}

impl From<CharError> for Error {
	fn from(value: CharError) -> Self {
		match value {
			CharError::Eof => Self::UnexpectedEof,
			CharError::Unicode => Self::InvalidUtf8,
		}
	}
}

/// The ECMAScript lexer.
///
/// Takes a slice of bytes and turns it into tokens. The lexer generates
/// tokens lazily: whenever [`Lexer::next_token`] is called it will lex the
/// next bytes of the source as a token. The lexer always returns a token,
/// even at the end of the source or when the source contains invalid tokens,
/// in both cases a specific kind of token is returned.
///
/// Note that ECMAScript cannot be lexed without feedback from the parser:
/// a `/` is either a division operator or the start of a regular expression
/// and a `}` may close a block or continue a template literal, depending on
/// syntactic position. The parser drives these cases through
/// [`Lexer::scan_regex`] and [`Lexer::scan_template_trailer`] after backing
/// the cursor up to the ambiguous token.
#[non_exhaustive]
pub struct Lexer<'a> {
	/// The reader for reading the source bytes.
	pub reader: BytesReader<'a>,
	/// The one past the last byte of the previous token.
	last_offset: u32,
	/// Whether a line terminator was crossed since the previous token.
	newline: bool,
	/// A buffer used to build the value of tokens which can't be read
	/// straight from the source, like strings with escape sequences.
	scratch: String,

	// Below are the storage slots for values produced by tokens.
	//
	// For performance reasons the tokens themselves are kept small; tokens
	// which carry a value leave it here and the parser consumes it right
	// after advancing over the token, before any further lookahead can
	// overwrite the slot.
	/// Text of identifiers, string literals, and regex patterns.
	pub string: Option<String>,
	/// Numeric value of number tokens.
	pub number: Option<f64>,
	/// Cooked text of the latest template segment.
	pub template_cooked: Option<String>,
	/// Raw text of the latest template segment.
	pub template_raw: Option<String>,
	/// Flags of a scanned regular expression.
	pub regex_flags: Option<String>,
	/// Whether the latest string literal contained an escape sequence or a
	/// line continuation. `"use strict"` only counts when written exactly.
	pub strand_has_escape: bool,
	/// Whether the latest string literal contained a legacy octal escape,
	/// which strict mode forbids.
	pub strand_has_octal_escape: bool,
	/// Whether the latest identifier contained a unicode escape, in which
	/// case it never matches a keyword.
	pub ident_has_escape: bool,
	pub error: Option<Error>,
}

impl<'a> Lexer<'a> {
	/// Create a new lexer.
	///
	/// # Panic
	/// This function will panic if the source is longer than u32::MAX.
	pub fn new(source: &'a [u8]) -> Lexer<'a> {
		let reader = BytesReader::new(source);
		assert!(source.len() <= u32::MAX as usize, "source code exceeded maximum size");
		Lexer {
			reader,
			last_offset: 0,
			newline: false,
			scratch: String::new(),
			string: None,
			number: None,
			template_cooked: None,
			template_raw: None,
			regex_flags: None,
			strand_has_escape: false,
			strand_has_octal_escape: false,
			ident_has_escape: false,
			error: None,
		}
	}

	/// Reset the state of the lexer.
	///
	/// Doesn't change the position of the reader.
	pub fn reset(&mut self) {
		self.last_offset = 0;
		self.newline = false;
		self.scratch.clear();
		self.string = None;
		self.number = None;
		self.template_cooked = None;
		self.template_raw = None;
		self.regex_flags = None;
		self.error = None;
	}

	/// Returns the next token, driving the lexer forward.
	///
	/// If the lexer is at the end of the source it will always return the Eof
	/// token.
	pub fn next_token(&mut self) -> Token {
		self.newline = false;
		loop {
			self.last_offset = self.reader.offset() as u32;
			let Some(byte) = self.reader.next() else {
				return self.eof_token();
			};
			match byte {
				unicode::byte::CR => {
					self.eat(unicode::byte::LF);
					self.newline = true;
				}
				unicode::byte::LF => {
					self.newline = true;
				}
				unicode::byte::TAB
				| unicode::byte::VT
				| unicode::byte::FF
				| unicode::byte::SP => {}
				b'/' if self.reader.peek() == Some(b'/') => {
					self.reader.next();
					self.eat_single_line_comment();
				}
				b'/' if self.reader.peek() == Some(b'*') => {
					self.reader.next();
					match self.eat_multi_line_comment() {
						Ok(()) => {}
						Err(e) => return self.invalid_token(e),
					}
				}
				x if x.is_ascii() => return self.lex_ascii(x),
				x => {
					let backup = self.reader.offset() - 1;
					let c = match self.reader.complete_char(x) {
						Ok(c) => c,
						Err(e) => return self.invalid_token(e.into()),
					};
					if unicode::is_line_terminator(c) {
						self.newline = true;
						continue;
					}
					if unicode::is_whitespace(c) {
						continue;
					}
					self.reader.backup(backup);
					return self.lex_char();
				}
			}
		}
	}

	/// Creates the eof token.
	///
	/// An eof token has tokenkind Eof and a span which points to the last
	/// character of the source.
	fn eof_token(&mut self) -> Token {
		Token {
			kind: TokenKind::Eof,
			span: Span {
				offset: self.last_offset,
				len: 0,
			},
			newline_before: self.newline,
		}
	}

	/// Return an invalid token.
	fn invalid_token(&mut self, error: Error) -> Token {
		self.error = Some(error);
		self.finish_token(TokenKind::Invalid)
	}

	/// Returns the span for the current token being lexed.
	pub fn current_span(&self) -> Span {
		// The source is checked to be no longer than u32::MAX so this can't
		// overflow.
		let new_offset = self.reader.offset() as u32;
		Span {
			offset: self.last_offset,
			len: new_offset - self.last_offset,
		}
	}

	/// Builds a token from a TokenKind.
	///
	/// Attaches a span to the token and updates the token offset.
	fn finish_token(&mut self, kind: TokenKind) -> Token {
		let span = self.current_span();
		self.last_offset = self.reader.offset() as u32;
		Token {
			kind,
			span,
			newline_before: self.newline,
		}
	}

	/// Moves the lexer state back to before the given span.
	pub fn backup_before(&mut self, span: Span) {
		self.reader.backup(span.offset as usize);
		self.last_offset = span.offset;
	}

	/// Moves the lexer state to after the given span.
	pub fn backup_after(&mut self, span: Span) {
		let offset = span.offset + span.len;
		self.reader.backup(offset as usize);
		self.last_offset = offset;
	}

	/// Moves the lexer state forward to the given offset.
	///
	/// Used to replay a cached function body without re-lexing it.
	pub fn skip_to(&mut self, offset: u32) {
		self.reader.skip_to(offset as usize);
		self.last_offset = offset;
	}

	/// Checks if the next byte is the given byte, if it is it consumes the
	/// byte and returns true. Otherwise returns false.
	pub fn eat(&mut self, byte: u8) -> bool {
		if self.reader.peek() == Some(byte) {
			self.reader.next();
			true
		} else {
			false
		}
	}

	/// Checks if the closure returns true when given the next byte, if it is
	/// it consumes the byte and returns true. Otherwise returns false.
	pub fn eat_when<F: FnOnce(u8) -> bool>(&mut self, f: F) -> bool {
		let Some(x) = self.reader.peek() else {
			return false;
		};
		if f(x) {
			self.reader.next();
			true
		} else {
			false
		}
	}
}

impl Iterator for Lexer<'_> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		let token = self.next_token();
		if token.is_eof() {
			return None;
		}
		Some(token)
	}
}
