use std::mem;

use crate::syn::{
	lexer::{keywords::KEYWORDS, unicode, Error, Lexer},
	token::{Token, TokenKind},
};

impl<'a> Lexer<'a> {
	/// Lex an identifier starting from an already-consumed ascii byte.
	///
	/// The start byte must be a valid identifier start or a `\` beginning a
	/// unicode escape.
	pub(super) fn lex_ident_from_next_byte(&mut self, start: u8) -> Token {
		debug_assert!(
			matches!(start, b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | b'\\')
		);
		self.scratch.clear();
		self.ident_has_escape = false;
		if start == b'\\' {
			let c = match self.lex_unicode_escape() {
				Ok(c) => c,
				Err(e) => return self.invalid_token(e),
			};
			if !unicode::is_identifier_start(c) {
				return self.invalid_token(Error::InvalidIdentEscape);
			}
			self.ident_has_escape = true;
			self.scratch.push(c);
		} else {
			self.scratch.push(start as char);
		}
		self.lex_ident()
	}

	/// Lex an identifier starting with a non-ascii character.
	///
	/// The reader is positioned at the start of the character, which the
	/// caller already checked to be an identifier start.
	pub(super) fn lex_ident_unicode(&mut self) -> Token {
		self.scratch.clear();
		self.ident_has_escape = false;
		self.lex_ident()
	}

	/// Lex the remainder of an identifier.
	///
	/// The scratch contains the characters lexed so far.
	pub(super) fn lex_ident(&mut self) -> Token {
		loop {
			let Some(x) = self.reader.peek() else {
				break;
			};
			if unicode::is_ascii_identifier_continue(x) {
				self.scratch.push(x as char);
				self.reader.next();
				continue;
			}
			if x == b'\\' {
				self.reader.next();
				let c = match self.lex_unicode_escape() {
					Ok(c) => c,
					Err(e) => return self.invalid_token(e),
				};
				if !unicode::is_identifier_continue(c) {
					return self.invalid_token(Error::InvalidIdentEscape);
				}
				self.ident_has_escape = true;
				self.scratch.push(c);
				continue;
			}
			if !x.is_ascii() {
				let backup = self.reader.offset();
				self.reader.next();
				let c = match self.reader.complete_char(x) {
					Ok(c) => c,
					Err(e) => return self.invalid_token(e.into()),
				};
				if unicode::is_identifier_continue(c) {
					self.scratch.push(c);
					continue;
				}
				self.reader.backup(backup);
			}
			break;
		}
		// When finished lexing the identifier, try to match it to a keyword.
		// An identifier written with an escape never matches; the original
		// text can be reconstructed from the token span.
		if !self.ident_has_escape {
			if let Some(x) = KEYWORDS.get(self.scratch.as_str()).copied() {
				self.scratch.clear();
				return self.finish_token(x);
			}
		}
		self.string = Some(mem::take(&mut self.scratch));
		self.finish_token(TokenKind::Identifier)
	}

	/// Lex a `\u` escape inside an identifier. The `\` was already consumed.
	pub(super) fn lex_unicode_escape(&mut self) -> Result<char, Error> {
		if !self.eat(b'u') {
			return Err(Error::InvalidUnicodeEscape);
		}
		if self.eat(b'{') {
			// \u{XXXXXX} with 1 to 6 hex digits.
			let mut val: u32 = 0;
			let mut digits = 0;
			loop {
				let Some(x) = self.reader.next() else {
					return Err(Error::UnexpectedEof);
				};
				match x {
					b'}' => break,
					x if x.is_ascii_hexdigit() => {
						digits += 1;
						if digits > 6 {
							return Err(Error::InvalidUnicodeEscape);
						}
						val = (val << 4) | (x as char).to_digit(16).unwrap();
					}
					_ => return Err(Error::InvalidUnicodeEscape),
				}
			}
			if digits == 0 {
				return Err(Error::InvalidUnicodeEscape);
			}
			return char::from_u32(val).ok_or(Error::InvalidUnicodeEscape);
		}
		// Exactly four hex digits.
		let mut val: u32 = 0;
		for _ in 0..4 {
			let Some(x) = self.reader.next() else {
				return Err(Error::UnexpectedEof);
			};
			if !x.is_ascii_hexdigit() {
				return Err(Error::InvalidUnicodeEscape);
			}
			val = (val << 4) | (x as char).to_digit(16).unwrap();
		}
		char::from_u32(val).ok_or(Error::InvalidUnicodeEscape)
	}
}
