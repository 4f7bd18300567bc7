/// A macro for indicating that the parser encountered a token which it
/// didn't expect.
macro_rules! unexpected {
	($parser:expr, $found:expr, $expected:expr) => {
		match $found.kind {
			$crate::syn::token::TokenKind::Invalid => {
				let error = $parser.lexer.error.take().unwrap();
				return Err($crate::syn::parser::ParseError::new(
					$crate::syn::parser::ParseErrorKind::InvalidToken(error),
					$parser.recent_span(),
				));
			}
			$crate::syn::token::TokenKind::Eof => {
				let expected = $expected;
				return Err($crate::syn::parser::ParseError::new(
					$crate::syn::parser::ParseErrorKind::UnexpectedEof {
						expected,
					},
					$parser.recent_span(),
				));
			}
			x => {
				let expected = $expected;
				return Err($crate::syn::parser::ParseError::new(
					$crate::syn::parser::ParseErrorKind::Unexpected {
						found: x,
						expected,
					},
					$parser.recent_span(),
				));
			}
		}
	};
	($parser:expr, $found:expr, $expected:expr, => $explain:expr) => {
		match $found.kind {
			$crate::syn::token::TokenKind::Invalid => {
				let error = $parser.lexer.error.take().unwrap();
				return Err($crate::syn::parser::ParseError::new(
					$crate::syn::parser::ParseErrorKind::InvalidToken(error),
					$parser.recent_span(),
				));
			}
			x => {
				return Err($crate::syn::parser::ParseError::new(
					$crate::syn::parser::ParseErrorKind::UnexpectedExplain {
						found: x,
						expected: $expected,
						explain: $explain,
					},
					$parser.recent_span(),
				));
			}
		}
	};
}

/// A macro for requiring a certain token to be next, returning an error
/// otherwise.
macro_rules! expected {
	($parser:expr, $($kind:tt)*) => {{
		let token = $parser.next();
		match token.kind {
			$($kind)* => token,
			$crate::syn::token::TokenKind::Invalid => {
				let error = $parser.lexer.error.take().unwrap();
				return Err($crate::syn::parser::ParseError::new(
					$crate::syn::parser::ParseErrorKind::InvalidToken(error),
					$parser.recent_span(),
				));
			}
			x => {
				let expected = $($kind)*.as_str();
				let kind = if let $crate::syn::token::TokenKind::Eof = x {
					$crate::syn::parser::ParseErrorKind::UnexpectedEof {
						expected,
					}
				} else {
					$crate::syn::parser::ParseErrorKind::Unexpected {
						found: x,
						expected,
					}
				};

				return Err($crate::syn::parser::ParseError::new(kind, $parser.last_span()));
			}
		}
	}};
}

/// A macro for raising a semantic error at a given span.
macro_rules! bail {
	($fmt:literal $(, $arg:expr)* $(,)? ; @$span:expr) => {
		return Err($crate::syn::parser::ParseError::new(
			$crate::syn::parser::ParseErrorKind::Semantic {
				message: format!($fmt $(, $arg)*),
				explain: None,
			},
			$span,
		))
	};
	($fmt:literal $(, $arg:expr)* $(,)? ; @$span:expr => $explain:literal) => {
		return Err($crate::syn::parser::ParseError::new(
			$crate::syn::parser::ParseErrorKind::Semantic {
				message: format!($fmt $(, $arg)*),
				explain: Some($explain),
			},
			$span,
		))
	};
}

/// A recursion guard for statement-level productions.
///
/// Decrements the statement depth budget for the duration of the body and
/// raises a stack exhaustion error when the budget runs out.
macro_rules! enter_stmt_recursion {
	($name:ident = $this:expr => { $($t:tt)* }) => {{
		if $this.stmt_recursion == 0 {
			return Err($crate::syn::parser::ParseError::new(
				$crate::syn::parser::ParseErrorKind::StackExhausted,
				$this.last_span(),
			));
		}
		struct Dropper<'a, 'b, B>(&'a mut $crate::syn::parser::Parser<'b, B>);
		impl<B> Drop for Dropper<'_, '_, B> {
			fn drop(&mut self) {
				self.0.stmt_recursion += 1;
			}
		}
		impl<'a, B> ::std::ops::Deref for Dropper<'_, 'a, B> {
			type Target = $crate::syn::parser::Parser<'a, B>;

			fn deref(&self) -> &Self::Target {
				self.0
			}
		}

		impl<'a, B> ::std::ops::DerefMut for Dropper<'_, 'a, B> {
			fn deref_mut(&mut self) -> &mut Self::Target {
				self.0
			}
		}

		$this.stmt_recursion -= 1;
		#[allow(unused_mut)]
		let mut $name = Dropper($this);
		{
			$($t)*
		}
	}};
}

/// A recursion guard for expression-level productions.
macro_rules! enter_expr_recursion {
	($name:ident = $this:expr => { $($t:tt)* }) => {{
		if $this.expr_recursion == 0 {
			return Err($crate::syn::parser::ParseError::new(
				$crate::syn::parser::ParseErrorKind::StackExhausted,
				$this.last_span(),
			));
		}
		struct Dropper<'a, 'b, B>(&'a mut $crate::syn::parser::Parser<'b, B>);
		impl<B> Drop for Dropper<'_, '_, B> {
			fn drop(&mut self) {
				self.0.expr_recursion += 1;
			}
		}
		impl<'a, B> ::std::ops::Deref for Dropper<'_, 'a, B> {
			type Target = $crate::syn::parser::Parser<'a, B>;

			fn deref(&self) -> &Self::Target {
				self.0
			}
		}

		impl<'a, B> ::std::ops::DerefMut for Dropper<'_, 'a, B> {
			fn deref_mut(&mut self) -> &mut Self::Target {
				self.0
			}
		}

		$this.expr_recursion -= 1;
		#[allow(unused_mut)]
		let mut $name = Dropper($this);
		{
			$($t)*
		}
	}};
}

pub(super) use bail;
pub(super) use enter_expr_recursion;
pub(super) use enter_stmt_recursion;
pub(super) use expected;
pub(super) use unexpected;
