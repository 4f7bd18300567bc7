use crate::syn::{
	lexer::{unicode, Error, Lexer},
	token::{t, Token},
};

impl<'a> Lexer<'a> {
	/// Eats a single line comment.
	///
	/// The terminating line-feed is left for the main loop so it can record
	/// the line terminator.
	pub(super) fn eat_single_line_comment(&mut self) {
		loop {
			let Some(byte) = self.reader.peek() else {
				break;
			};
			match byte {
				unicode::byte::CR | unicode::byte::LF => break,
				x if !x.is_ascii() => {
					let backup = self.reader.offset();
					self.reader.next();
					let c = match self.reader.complete_char(x) {
						Ok(c) => c,
						Err(_) => {
							// Let the next token handle the error.
							self.reader.backup(backup);
							break;
						}
					};
					if unicode::is_line_terminator(c) {
						self.reader.backup(backup);
						break;
					}
				}
				_ => {
					self.reader.next();
				}
			}
		}
	}

	/// Eats a multi line comment, recording whether it contained a line
	/// terminator, and returns an error if `*/` is missing.
	pub(super) fn eat_multi_line_comment(&mut self) -> Result<(), Error> {
		loop {
			let Some(byte) = self.reader.next() else {
				return Err(Error::UnterminatedComment);
			};
			match byte {
				b'*' => {
					if self.reader.peek() == Some(b'/') {
						self.reader.next();
						return Ok(());
					}
				}
				unicode::byte::CR | unicode::byte::LF => {
					// A comment spanning multiple lines counts as a line
					// terminator for semicolon insertion.
					self.newline = true;
				}
				x if !x.is_ascii() => {
					let backup = self.reader.offset() - 1;
					let c = match self.reader.complete_char(x) {
						Ok(c) => c,
						Err(_) => {
							self.reader.backup(backup + 1);
							continue;
						}
					};
					if unicode::is_line_terminator(c) {
						self.newline = true;
					}
				}
				_ => {}
			}
		}
	}

	/// Lex the next token, starting from the given byte.
	///
	/// Whitespace and comments have already been eaten by the caller.
	pub(super) fn lex_ascii(&mut self, byte: u8) -> Token {
		let kind = match byte {
			b'{' => t!("{"),
			b'}' => t!("}"),
			b'[' => t!("["),
			b']' => t!("]"),
			b'(' => t!("("),
			b')' => t!(")"),
			b';' => t!(";"),
			b',' => t!(","),
			b':' => t!(":"),
			b'?' => t!("?"),
			b'~' => t!("~"),
			b'.' => match self.reader.peek() {
				Some(b'0'..=b'9') => return self.lex_number(byte),
				Some(b'.') if self.reader.peek1() == Some(b'.') => {
					self.reader.next();
					self.reader.next();
					t!("...")
				}
				_ => t!("."),
			},
			b'=' => match self.reader.peek() {
				Some(b'=') => {
					self.reader.next();
					if self.eat(b'=') {
						t!("===")
					} else {
						t!("==")
					}
				}
				Some(b'>') => {
					self.reader.next();
					t!("=>")
				}
				_ => t!("="),
			},
			b'!' => match self.reader.peek() {
				Some(b'=') => {
					self.reader.next();
					if self.eat(b'=') {
						t!("!==")
					} else {
						t!("!=")
					}
				}
				_ => t!("!"),
			},
			b'+' => match self.reader.peek() {
				Some(b'+') => {
					self.reader.next();
					t!("++")
				}
				Some(b'=') => {
					self.reader.next();
					t!("+=")
				}
				_ => t!("+"),
			},
			b'-' => match self.reader.peek() {
				Some(b'-') => {
					self.reader.next();
					t!("--")
				}
				Some(b'=') => {
					self.reader.next();
					t!("-=")
				}
				_ => t!("-"),
			},
			b'*' => match self.reader.peek() {
				Some(b'=') => {
					self.reader.next();
					t!("*=")
				}
				_ => t!("*"),
			},
			b'/' => match self.reader.peek() {
				// Comments are eaten by the caller.
				Some(b'=') => {
					self.reader.next();
					t!("/=")
				}
				_ => t!("/"),
			},
			b'%' => match self.reader.peek() {
				Some(b'=') => {
					self.reader.next();
					t!("%=")
				}
				_ => t!("%"),
			},
			b'<' => match self.reader.peek() {
				Some(b'<') => {
					self.reader.next();
					if self.eat(b'=') {
						t!("<<=")
					} else {
						t!("<<")
					}
				}
				Some(b'=') => {
					self.reader.next();
					t!("<=")
				}
				_ => t!("<"),
			},
			b'>' => match self.reader.peek() {
				Some(b'>') => {
					self.reader.next();
					match self.reader.peek() {
						Some(b'>') => {
							self.reader.next();
							if self.eat(b'=') {
								t!(">>>=")
							} else {
								t!(">>>")
							}
						}
						Some(b'=') => {
							self.reader.next();
							t!(">>=")
						}
						_ => t!(">>"),
					}
				}
				Some(b'=') => {
					self.reader.next();
					t!(">=")
				}
				_ => t!(">"),
			},
			b'&' => match self.reader.peek() {
				Some(b'&') => {
					self.reader.next();
					t!("&&")
				}
				Some(b'=') => {
					self.reader.next();
					t!("&=")
				}
				_ => t!("&"),
			},
			b'|' => match self.reader.peek() {
				Some(b'|') => {
					self.reader.next();
					t!("||")
				}
				Some(b'=') => {
					self.reader.next();
					t!("|=")
				}
				_ => t!("|"),
			},
			b'^' => match self.reader.peek() {
				Some(b'=') => {
					self.reader.next();
					t!("^=")
				}
				_ => t!("^"),
			},
			b'"' | b'\'' => return self.lex_strand(byte == b'"'),
			#[cfg(feature = "es6-template-literals")]
			b'`' => return self.lex_template_head(),
			b'0'..=b'9' => return self.lex_number(byte),
			b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => {
				return self.lex_ident_from_next_byte(byte)
			}
			b'\\' => return self.lex_ident_from_next_byte(byte),
			x => return self.invalid_token(Error::UnexpectedCharacter(x as char)),
		};
		self.finish_token(kind)
	}

	/// Lex a token starting with a non-ascii character.
	///
	/// The reader is positioned at the start of the character.
	pub(super) fn lex_char(&mut self) -> Token {
		let backup = self.reader.offset();
		let start = self.reader.next().unwrap_or(0);
		let c = match self.reader.complete_char(start) {
			Ok(c) => c,
			Err(e) => return self.invalid_token(e.into()),
		};
		if unicode::is_identifier_start(c) {
			self.reader.backup(backup);
			return self.lex_ident_unicode();
		}
		self.invalid_token(Error::UnexpectedCharacter(c))
	}
}
