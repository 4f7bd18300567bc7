use crate::syn::token::{Keyword, TokenKind};
use phf::phf_map;

/// A map for mapping identifier strings to a tokenkind.
///
/// ECMAScript keywords are case-sensitive, an identifier like `If` is a plain
/// identifier.
pub(crate) static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
	"break" => TokenKind::Keyword(Keyword::Break),
	"case" => TokenKind::Keyword(Keyword::Case),
	"catch" => TokenKind::Keyword(Keyword::Catch),
	"class" => TokenKind::Keyword(Keyword::Class),
	"const" => TokenKind::Keyword(Keyword::Const),
	"continue" => TokenKind::Keyword(Keyword::Continue),
	"debugger" => TokenKind::Keyword(Keyword::Debugger),
	"default" => TokenKind::Keyword(Keyword::Default),
	"delete" => TokenKind::Keyword(Keyword::Delete),
	"do" => TokenKind::Keyword(Keyword::Do),
	"else" => TokenKind::Keyword(Keyword::Else),
	"enum" => TokenKind::Keyword(Keyword::Enum),
	"export" => TokenKind::Keyword(Keyword::Export),
	"extends" => TokenKind::Keyword(Keyword::Extends),
	"false" => TokenKind::Keyword(Keyword::False),
	"finally" => TokenKind::Keyword(Keyword::Finally),
	"for" => TokenKind::Keyword(Keyword::For),
	"function" => TokenKind::Keyword(Keyword::Function),
	"if" => TokenKind::Keyword(Keyword::If),
	"implements" => TokenKind::Keyword(Keyword::Implements),
	"import" => TokenKind::Keyword(Keyword::Import),
	"in" => TokenKind::Keyword(Keyword::In),
	"instanceof" => TokenKind::Keyword(Keyword::InstanceOf),
	"interface" => TokenKind::Keyword(Keyword::Interface),
	"let" => TokenKind::Keyword(Keyword::Let),
	"new" => TokenKind::Keyword(Keyword::New),
	"null" => TokenKind::Keyword(Keyword::Null),
	"package" => TokenKind::Keyword(Keyword::Package),
	"private" => TokenKind::Keyword(Keyword::Private),
	"protected" => TokenKind::Keyword(Keyword::Protected),
	"public" => TokenKind::Keyword(Keyword::Public),
	"return" => TokenKind::Keyword(Keyword::Return),
	"static" => TokenKind::Keyword(Keyword::Static),
	"super" => TokenKind::Keyword(Keyword::Super),
	"switch" => TokenKind::Keyword(Keyword::Switch),
	"this" => TokenKind::Keyword(Keyword::This),
	"throw" => TokenKind::Keyword(Keyword::Throw),
	"true" => TokenKind::Keyword(Keyword::True),
	"try" => TokenKind::Keyword(Keyword::Try),
	"typeof" => TokenKind::Keyword(Keyword::TypeOf),
	"var" => TokenKind::Keyword(Keyword::Var),
	"void" => TokenKind::Keyword(Keyword::Void),
	"while" => TokenKind::Keyword(Keyword::While),
	"with" => TokenKind::Keyword(Keyword::With),
	"yield" => TokenKind::Keyword(Keyword::Yield),
};

/// Takes a string and returns whether it could be a reserved word in some
/// context.
pub fn could_be_reserved(s: &str) -> bool {
	KEYWORDS.contains_key(s)
}
