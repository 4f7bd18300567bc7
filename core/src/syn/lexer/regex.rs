use std::mem;

use crate::syn::{
	lexer::{unicode, Error, Lexer},
	token::{Token, TokenKind},
};

impl<'a> Lexer<'a> {
	/// Scan a regular expression literal.
	///
	/// The reader must be positioned at the opening `/`; the parser backs the
	/// lexer up to the `/` or `/=` token before calling this. Only the
	/// syntactic shape is validated here, pattern semantics are left to the
	/// regex engine.
	///
	/// On success the pattern text is left in the string slot and the flags
	/// in the regex flag slot.
	pub fn scan_regex(&mut self) -> Token {
		match self.scan_regex_err() {
			Ok(x) => x,
			Err(e) => {
				self.scratch.clear();
				self.invalid_token(e)
			}
		}
	}

	fn scan_regex_err(&mut self) -> Result<Token, Error> {
		let opening = self.reader.next();
		debug_assert_eq!(opening, Some(b'/'));
		self.scratch.clear();
		let mut in_class = false;
		loop {
			let Some(x) = self.reader.next() else {
				return Err(Error::UnterminatedRegex);
			};
			match x {
				b'/' if !in_class => break,
				b'[' => {
					in_class = true;
					self.scratch.push('[');
				}
				b']' if in_class => {
					in_class = false;
					self.scratch.push(']');
				}
				b'\\' => {
					self.scratch.push('\\');
					let Some(x) = self.reader.next() else {
						return Err(Error::UnterminatedRegex);
					};
					if matches!(x, unicode::byte::CR | unicode::byte::LF) {
						return Err(Error::UnterminatedRegex);
					}
					if x.is_ascii() {
						self.scratch.push(x as char);
					} else {
						let c = self.reader.complete_char(x)?;
						if unicode::is_line_terminator(c) {
							return Err(Error::UnterminatedRegex);
						}
						self.scratch.push(c);
					}
				}
				unicode::byte::CR | unicode::byte::LF => {
					return Err(Error::UnterminatedRegex);
				}
				x if x.is_ascii() => {
					self.scratch.push(x as char);
				}
				x => {
					let c = self.reader.complete_char(x)?;
					if unicode::is_line_terminator(c) {
						return Err(Error::UnterminatedRegex);
					}
					self.scratch.push(c);
				}
			}
		}
		// Flags follow immediately, every identifier character is taken so
		// duplicates and unknown flags produce an error here rather than two
		// tokens.
		let mut flags = String::new();
		while let Some(x) = self.reader.peek() {
			if !unicode::is_ascii_identifier_continue(x) {
				break;
			}
			self.reader.next();
			let c = x as char;
			if flags.contains(c) {
				return Err(Error::DuplicateRegexFlag(c));
			}
			flags.push(c);
		}
		self.string = Some(mem::take(&mut self.scratch));
		self.regex_flags = Some(flags);
		Ok(self.finish_token(TokenKind::Regex))
	}
}
