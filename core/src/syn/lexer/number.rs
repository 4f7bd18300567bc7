use std::mem;

use crate::syn::{
	lexer::{unicode, Error, Lexer},
	token::{NumberKind, Token, TokenKind},
};

impl<'a> Lexer<'a> {
	/// Lex a number token starting from an already-consumed byte, either a
	/// digit or a `.` known to be followed by a digit.
	pub(super) fn lex_number(&mut self, start: u8) -> Token {
		debug_assert!(matches!(start, b'0'..=b'9' | b'.'));
		self.scratch.clear();
		let res = match start {
			b'0' => match self.reader.peek() {
				Some(b'x') | Some(b'X') => {
					self.reader.next();
					self.lex_radix_digits(16).map(|v| (v, NumberKind::Hex))
				}
				Some(b'o') | Some(b'O') => {
					self.reader.next();
					self.lex_radix_digits(8).map(|v| (v, NumberKind::Octal))
				}
				Some(b'b') | Some(b'B') => {
					self.reader.next();
					self.lex_radix_digits(2).map(|v| (v, NumberKind::Binary))
				}
				Some(b'0'..=b'9') => self.lex_legacy_octal(),
				_ => {
					self.scratch.push('0');
					self.lex_decimal()
				}
			},
			b'.' => {
				self.scratch.push('.');
				self.lex_decimal_fraction()
			}
			x => {
				self.scratch.push(x as char);
				self.lex_decimal()
			}
		};
		let (value, kind) = match res {
			Ok(x) => x,
			Err(e) => return self.invalid_token(e),
		};
		// `3in` and the like are a syntax error rather than two tokens.
		if let Some(x) = self.reader.peek() {
			if unicode::is_ascii_identifier_continue(x) {
				return self.invalid_token(Error::IdentAfterNumber);
			}
		}
		self.scratch.clear();
		self.number = Some(value);
		self.finish_token(TokenKind::Number(kind))
	}

	/// Lex the digits of a hex, octal, or binary literal after its prefix.
	fn lex_radix_digits(&mut self, radix: u32) -> Result<f64, Error> {
		let mut value: f64 = 0.0;
		let mut any = false;
		while let Some(x) = self.reader.peek() {
			let Some(digit) = (x as char).to_digit(radix) else {
				break;
			};
			self.reader.next();
			any = true;
			value = value * radix as f64 + digit as f64;
		}
		if !any {
			return Err(Error::DigitsExpected);
		}
		Ok(value)
	}

	/// Lex a `0`-prefixed literal without a radix letter.
	///
	/// All-octal digit runs are octal; a digit `8` or `9` demotes the whole
	/// literal to decimal. Either way the literal is flagged legacy so strict
	/// mode can reject it.
	fn lex_legacy_octal(&mut self) -> Result<(f64, NumberKind), Error> {
		let mut octal = true;
		while let Some(x @ b'0'..=b'9') = self.reader.peek() {
			if x >= b'8' {
				octal = false;
			}
			self.scratch.push(x as char);
			self.reader.next();
		}
		let value = if octal {
			let mut value: f64 = 0.0;
			for c in self.scratch.chars() {
				value = value * 8.0 + c.to_digit(8).unwrap() as f64;
			}
			value
		} else {
			self.scratch.parse().map_err(|_| Error::DigitsExpected)?
		};
		Ok((value, NumberKind::LegacyOctal))
	}

	/// Lex the remainder of a decimal literal, starting after its first
	/// digit which is already in the scratch.
	fn lex_decimal(&mut self) -> Result<(f64, NumberKind), Error> {
		while let Some(x @ b'0'..=b'9') = self.reader.peek() {
			self.scratch.push(x as char);
			self.reader.next();
		}
		if self.reader.peek() == Some(b'.') {
			self.scratch.push('.');
			self.reader.next();
			while let Some(x @ b'0'..=b'9') = self.reader.peek() {
				self.scratch.push(x as char);
				self.reader.next();
			}
		}
		self.lex_exponent()
	}

	/// Lex a decimal literal which began with a `.`, the digit after the dot
	/// is not yet consumed.
	fn lex_decimal_fraction(&mut self) -> Result<(f64, NumberKind), Error> {
		while let Some(x @ b'0'..=b'9') = self.reader.peek() {
			self.scratch.push(x as char);
			self.reader.next();
		}
		self.lex_exponent()
	}

	/// Lex an optional exponent and parse the accumulated text.
	fn lex_exponent(&mut self) -> Result<(f64, NumberKind), Error> {
		if let Some(b'e') | Some(b'E') = self.reader.peek() {
			self.scratch.push('e');
			self.reader.next();
			if let Some(x @ (b'+' | b'-')) = self.reader.peek() {
				self.scratch.push(x as char);
				self.reader.next();
			}
			let mut any = false;
			while let Some(x @ b'0'..=b'9') = self.reader.peek() {
				self.scratch.push(x as char);
				self.reader.next();
				any = true;
			}
			if !any {
				return Err(Error::DigitsExpected);
			}
		}
		let text = mem::take(&mut self.scratch);
		let value = text.parse().map_err(|_| Error::DigitsExpected)?;
		Ok((value, NumberKind::Decimal))
	}
}
