//! Module specifying the token representation of the parser.

use serde::{Deserialize, Serialize};
use std::hash::Hash;

mod keyword;
pub use keyword::Keyword;
mod mac;
pub(crate) use mac::t;

/// A location in the source passed to the lexer.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Span {
	/// Offset in bytes.
	pub offset: u32,
	/// The amount of bytes this location encompasses.
	pub len: u32,
}

impl Span {
	/// Create a new empty span.
	pub const fn empty() -> Self {
		Span {
			offset: 0,
			len: 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Create a span that covers the range of both spans as well as possible
	/// space inbetween.
	pub fn covers(self, other: Span) -> Span {
		let start = self.offset.min(other.offset);
		let end = (self.offset + self.len).max(other.offset + other.len);
		Span {
			offset: start,
			len: end - start,
		}
	}

	/// Returns a zero-length span that starts after the current span.
	pub fn after(self) -> Span {
		Span {
			offset: self.offset + self.len,
			len: 0,
		}
	}
}

/// A punctuator which operates on values.
#[repr(u8)]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Operator {
	/// `!`
	Not,
	/// `~`
	BitNot,
	/// `++`
	Inc,
	/// `--`
	Dec,
	/// `+`
	Add,
	/// `-`
	Sub,
	/// `*`
	Mul,
	/// `/`
	Div,
	/// `%`
	Rem,
	/// `==`
	Eq,
	/// `!=`
	NotEq,
	/// `===`
	StrictEq,
	/// `!==`
	StrictNotEq,
	/// `<`
	Lt,
	/// `>`
	Gt,
	/// `<=`
	LtEq,
	/// `>=`
	GtEq,
	/// `<<`
	Shl,
	/// `>>`
	Shr,
	/// `>>>`
	UShr,
	/// `&`
	BitAnd,
	/// `|`
	BitOr,
	/// `^`
	BitXor,
	/// `&&`
	And,
	/// `||`
	Or,
	/// `=`
	Assign,
	/// `+=`
	AddAssign,
	/// `-=`
	SubAssign,
	/// `*=`
	MulAssign,
	/// `/=`
	DivAssign,
	/// `%=`
	RemAssign,
	/// `<<=`
	ShlAssign,
	/// `>>=`
	ShrAssign,
	/// `>>>=`
	UShrAssign,
	/// `&=`
	BitAndAssign,
	/// `|=`
	BitOrAssign,
	/// `^=`
	BitXorAssign,
}

impl Operator {
	fn as_str(&self) -> &'static str {
		match self {
			Operator::Not => "!",
			Operator::BitNot => "~",
			Operator::Inc => "++",
			Operator::Dec => "--",
			Operator::Add => "+",
			Operator::Sub => "-",
			Operator::Mul => "*",
			Operator::Div => "/",
			Operator::Rem => "%",
			Operator::Eq => "==",
			Operator::NotEq => "!=",
			Operator::StrictEq => "===",
			Operator::StrictNotEq => "!==",
			Operator::Lt => "<",
			Operator::Gt => ">",
			Operator::LtEq => "<=",
			Operator::GtEq => ">=",
			Operator::Shl => "<<",
			Operator::Shr => ">>",
			Operator::UShr => ">>>",
			Operator::BitAnd => "&",
			Operator::BitOr => "|",
			Operator::BitXor => "^",
			Operator::And => "&&",
			Operator::Or => "||",
			Operator::Assign => "=",
			Operator::AddAssign => "+=",
			Operator::SubAssign => "-=",
			Operator::MulAssign => "*=",
			Operator::DivAssign => "/=",
			Operator::RemAssign => "%=",
			Operator::ShlAssign => "<<=",
			Operator::ShrAssign => ">>=",
			Operator::UShrAssign => ">>>=",
			Operator::BitAndAssign => "&=",
			Operator::BitOrAssign => "|=",
			Operator::BitXorAssign => "^=",
		}
	}

	/// Returns whether this operator is a compound or plain assignment.
	pub fn is_assignment(&self) -> bool {
		matches!(
			self,
			Operator::Assign
				| Operator::AddAssign
				| Operator::SubAssign
				| Operator::MulAssign
				| Operator::DivAssign
				| Operator::RemAssign
				| Operator::ShlAssign
				| Operator::ShrAssign
				| Operator::UShrAssign
				| Operator::BitAndAssign
				| Operator::BitOrAssign
				| Operator::BitXorAssign
		)
	}
}

/// A delimiting token, denoting the start or end of a certain production.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Delim {
	/// `()`
	Paren,
	/// `[]`
	Bracket,
	/// `{}`
	Brace,
}

/// The syntactic family of a numeric literal.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum NumberKind {
	/// A plain decimal number, possibly fractional or with an exponent.
	Decimal,
	/// `0x` prefixed.
	Hex,
	/// `0o` prefixed.
	Octal,
	/// `0b` prefixed.
	Binary,
	/// A `0`-prefixed octal without the `o`. Illegal in strict mode.
	LegacyOctal,
}

/// Which segment of a template literal a template token covers.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum TemplateKind {
	/// `` `..` `` — a template without substitutions.
	Full,
	/// `` `..${ `` — up to the first substitution.
	Head,
	/// `}..${` — between two substitutions.
	Middle,
	/// `` }..` `` — after the last substitution.
	Tail,
}

/// The type of token.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum TokenKind {
	Keyword(Keyword),
	Identifier,
	Number(NumberKind),
	/// A string literal.
	Strand,
	Template(TemplateKind),
	/// A regular expression literal. Never produced by plain lexing, only by
	/// rescanning a `/` at expression position.
	Regex,
	Operator(Operator),
	OpenDelim(Delim),
	CloseDelim(Delim),
	/// `=>`
	Arrow,
	/// `?`
	Question,
	/// `:`
	Colon,
	/// `;`
	SemiColon,
	/// `,`
	Comma,
	/// `.`
	Dot,
	/// `...`
	DotDotDot,
	/// A token which could not be properly lexed.
	Invalid,
	/// A token which indicates the end of the file.
	Eof,
}

/// An assertion statically checking that the size of TokenKind remains two bytes.
const _TOKEN_KIND_SIZE_ASSERT: [(); 2] = [(); std::mem::size_of::<TokenKind>()];

impl TokenKind {
	/// Returns whether the lexer left a payload for this token in one of its
	/// side-channel slots.
	pub fn has_data(&self) -> bool {
		matches!(
			self,
			TokenKind::Identifier
				| TokenKind::Number(_)
				| TokenKind::Strand
				| TokenKind::Template(_)
				| TokenKind::Regex
		)
	}

	/// Returns whether this token may act as a binding name in at least one
	/// mode.
	pub fn can_be_identifier(&self) -> bool {
		match self {
			TokenKind::Identifier => true,
			TokenKind::Keyword(k) => k.is_reserved_in_strict_only(),
			_ => false,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match *self {
			TokenKind::Keyword(x) => x.as_str(),
			TokenKind::Identifier => "an identifier",
			TokenKind::Number(_) => "a number",
			TokenKind::Strand => "a string",
			TokenKind::Template(TemplateKind::Full) => "a template literal",
			TokenKind::Template(TemplateKind::Head) => "a template head",
			TokenKind::Template(TemplateKind::Middle) => "a template middle",
			TokenKind::Template(TemplateKind::Tail) => "a template tail",
			TokenKind::Regex => "a regular expression",
			TokenKind::Operator(x) => x.as_str(),
			TokenKind::OpenDelim(Delim::Paren) => "(",
			TokenKind::OpenDelim(Delim::Brace) => "{",
			TokenKind::OpenDelim(Delim::Bracket) => "[",
			TokenKind::CloseDelim(Delim::Paren) => ")",
			TokenKind::CloseDelim(Delim::Brace) => "}",
			TokenKind::CloseDelim(Delim::Bracket) => "]",
			TokenKind::Arrow => "=>",
			TokenKind::Question => "?",
			TokenKind::Colon => ":",
			TokenKind::SemiColon => ";",
			TokenKind::Comma => ",",
			TokenKind::Dot => ".",
			TokenKind::DotDotDot => "...",
			TokenKind::Invalid => "Invalid",
			TokenKind::Eof => "Eof",
		}
	}
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
	/// Whether a line terminator (or a block comment containing one) occurred
	/// between the previous token and this one. Drives automatic semicolon
	/// insertion and the no-newline-before-`=>` rule.
	pub newline_before: bool,
}

impl Token {
	pub const fn invalid() -> Token {
		Token {
			kind: TokenKind::Invalid,
			span: Span::empty(),
			newline_before: false,
		}
	}

	/// Returns if the token is invalid.
	pub fn is_invalid(&self) -> bool {
		matches!(self.kind, TokenKind::Invalid)
	}

	/// Returns if the token is `end of file`.
	pub fn is_eof(&self) -> bool {
		matches!(self.kind, TokenKind::Eof)
	}
}
