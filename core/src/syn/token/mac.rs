/// A shorthand for token kinds.
macro_rules! t {
	("invalid") => {
		$crate::syn::token::TokenKind::Invalid
	};
	("eof") => {
		$crate::syn::token::TokenKind::Eof
	};
	("[") => {
		$crate::syn::token::TokenKind::OpenDelim($crate::syn::token::Delim::Bracket)
	};
	("{") => {
		$crate::syn::token::TokenKind::OpenDelim($crate::syn::token::Delim::Brace)
	};
	("(") => {
		$crate::syn::token::TokenKind::OpenDelim($crate::syn::token::Delim::Paren)
	};
	("]") => {
		$crate::syn::token::TokenKind::CloseDelim($crate::syn::token::Delim::Bracket)
	};
	("}") => {
		$crate::syn::token::TokenKind::CloseDelim($crate::syn::token::Delim::Brace)
	};
	(")") => {
		$crate::syn::token::TokenKind::CloseDelim($crate::syn::token::Delim::Paren)
	};
	(";") => {
		$crate::syn::token::TokenKind::SemiColon
	};
	(":") => {
		$crate::syn::token::TokenKind::Colon
	};
	(",") => {
		$crate::syn::token::TokenKind::Comma
	};
	("...") => {
		$crate::syn::token::TokenKind::DotDotDot
	};
	(".") => {
		$crate::syn::token::TokenKind::Dot
	};
	("?") => {
		$crate::syn::token::TokenKind::Question
	};
	("=>") => {
		$crate::syn::token::TokenKind::Arrow
	};

	("!") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Not)
	};
	("~") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitNot)
	};
	("++") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Inc)
	};
	("--") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Dec)
	};
	("+") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Add)
	};
	("-") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Sub)
	};
	("*") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Mul)
	};
	("/") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Div)
	};
	("%") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Rem)
	};
	("==") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Eq)
	};
	("!=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::NotEq)
	};
	("===") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::StrictEq)
	};
	("!==") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::StrictNotEq)
	};
	("<") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Lt)
	};
	(">") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Gt)
	};
	("<=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::LtEq)
	};
	(">=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::GtEq)
	};
	("<<") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Shl)
	};
	(">>") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Shr)
	};
	(">>>") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::UShr)
	};
	("&") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitAnd)
	};
	("|") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitOr)
	};
	("^") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitXor)
	};
	("&&") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::And)
	};
	("||") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Or)
	};
	("=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::Assign)
	};
	("+=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::AddAssign)
	};
	("-=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::SubAssign)
	};
	("*=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::MulAssign)
	};
	("/=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::DivAssign)
	};
	("%=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::RemAssign)
	};
	("<<=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::ShlAssign)
	};
	(">>=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::ShrAssign)
	};
	(">>>=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::UShrAssign)
	};
	("&=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitAndAssign)
	};
	("|=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitOrAssign)
	};
	("^=") => {
		$crate::syn::token::TokenKind::Operator($crate::syn::token::Operator::BitXorAssign)
	};

	("break") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Break)
	};
	("case") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Case)
	};
	("catch") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Catch)
	};
	("class") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Class)
	};
	("const") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Const)
	};
	("continue") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Continue)
	};
	("debugger") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Debugger)
	};
	("default") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Default)
	};
	("delete") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Delete)
	};
	("do") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Do)
	};
	("else") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Else)
	};
	("enum") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Enum)
	};
	("export") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Export)
	};
	("extends") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Extends)
	};
	("false") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::False)
	};
	("finally") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Finally)
	};
	("for") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::For)
	};
	("function") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Function)
	};
	("if") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::If)
	};
	("implements") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Implements)
	};
	("import") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Import)
	};
	("in") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::In)
	};
	("instanceof") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::InstanceOf)
	};
	("interface") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Interface)
	};
	("let") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Let)
	};
	("new") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::New)
	};
	("null") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Null)
	};
	("package") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Package)
	};
	("private") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Private)
	};
	("protected") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Protected)
	};
	("public") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Public)
	};
	("return") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Return)
	};
	("static") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Static)
	};
	("super") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Super)
	};
	("switch") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Switch)
	};
	("this") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::This)
	};
	("throw") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Throw)
	};
	("true") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::True)
	};
	("try") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Try)
	};
	("typeof") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::TypeOf)
	};
	("var") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Var)
	};
	("void") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Void)
	};
	("while") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::While)
	};
	("with") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::With)
	};
	("yield") => {
		$crate::syn::token::TokenKind::Keyword($crate::syn::token::Keyword::Yield)
	};
}

pub(crate) use t;
