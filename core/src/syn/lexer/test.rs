use crate::syn::{
	lexer::Lexer,
	token::{t, NumberKind, TemplateKind, TokenKind},
};

fn lex_kinds(source: &str) -> Vec<TokenKind> {
	Lexer::new(source.as_bytes()).map(|t| t.kind).collect()
}

#[test]
fn punctuators() {
	let kinds = lex_kinds("{ } ( ) [ ] ; , < > <= >= == != === !== + - * % ++ -- << >> >>> & | ^ ! ~ && || ? : = += -= *= %= <<= >>= >>>= &= |= ^= => . ...");
	let expected = vec![
		t!("{"),
		t!("}"),
		t!("("),
		t!(")"),
		t!("["),
		t!("]"),
		t!(";"),
		t!(","),
		t!("<"),
		t!(">"),
		t!("<="),
		t!(">="),
		t!("=="),
		t!("!="),
		t!("==="),
		t!("!=="),
		t!("+"),
		t!("-"),
		t!("*"),
		t!("%"),
		t!("++"),
		t!("--"),
		t!("<<"),
		t!(">>"),
		t!(">>>"),
		t!("&"),
		t!("|"),
		t!("^"),
		t!("!"),
		t!("~"),
		t!("&&"),
		t!("||"),
		t!("?"),
		t!(":"),
		t!("="),
		t!("+="),
		t!("-="),
		t!("*="),
		t!("%="),
		t!("<<="),
		t!(">>="),
		t!(">>>="),
		t!("&="),
		t!("|="),
		t!("^="),
		t!("=>"),
		t!("."),
		t!("..."),
	];
	assert_eq!(kinds, expected);
}

#[test]
fn keywords_are_case_sensitive() {
	assert_eq!(lex_kinds("if"), vec![t!("if")]);
	assert_eq!(lex_kinds("If"), vec![TokenKind::Identifier]);
	assert_eq!(lex_kinds("IF"), vec![TokenKind::Identifier]);
}

#[test]
fn escaped_keyword_is_identifier() {
	let mut lexer = Lexer::new(br"\u0069f");
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Identifier);
	assert_eq!(lexer.string.take().as_deref(), Some("if"));
}

#[test]
fn identifier_value() {
	let mut lexer = Lexer::new(b"foo_bar$1");
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Identifier);
	assert_eq!(lexer.string.take().as_deref(), Some("foo_bar$1"));
}

#[test]
fn unicode_identifier() {
	let mut lexer = Lexer::new("späß".as_bytes());
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Identifier);
	assert_eq!(lexer.string.take().as_deref(), Some("späß"));
}

#[test]
fn numbers() {
	let cases: &[(&str, f64, NumberKind)] = &[
		("0", 0.0, NumberKind::Decimal),
		("123", 123.0, NumberKind::Decimal),
		("1.5", 1.5, NumberKind::Decimal),
		(".5", 0.5, NumberKind::Decimal),
		("1e3", 1000.0, NumberKind::Decimal),
		("1.5e-1", 0.15, NumberKind::Decimal),
		("0x10", 16.0, NumberKind::Hex),
		("0o17", 15.0, NumberKind::Octal),
		("0b101", 5.0, NumberKind::Binary),
		("017", 15.0, NumberKind::LegacyOctal),
		("019", 19.0, NumberKind::LegacyOctal),
	];
	for (source, value, kind) in cases {
		let mut lexer = Lexer::new(source.as_bytes());
		let token = lexer.next_token();
		assert_eq!(token.kind, TokenKind::Number(*kind), "{}", source);
		assert_eq!(lexer.number.take(), Some(*value), "{}", source);
	}
}

#[test]
fn number_followed_by_identifier() {
	let mut lexer = Lexer::new(b"3in");
	let token = lexer.next_token();
	assert!(token.is_invalid());
}

#[test]
fn strand_value() {
	let mut lexer = Lexer::new(br#""a\n\x41B\u{43}""#);
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Strand);
	assert_eq!(lexer.string.take().as_deref(), Some("a\nABC"));
	assert!(lexer.strand_has_escape);
}

#[test]
fn strand_exactness() {
	let mut lexer = Lexer::new(br#""use strict""#);
	lexer.next_token();
	assert!(!lexer.strand_has_escape);

	let mut lexer = Lexer::new(br#""use\x20strict""#);
	lexer.next_token();
	assert!(lexer.strand_has_escape);
}

#[test]
fn strand_octal_escape() {
	let mut lexer = Lexer::new(br#"'\101'"#);
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Strand);
	assert_eq!(lexer.string.take().as_deref(), Some("A"));
	assert!(lexer.strand_has_octal_escape);

	let mut lexer = Lexer::new(br#"'\0'"#);
	lexer.next_token();
	assert!(!lexer.strand_has_octal_escape);
}

#[test]
fn strand_line_continuation() {
	let mut lexer = Lexer::new(b"'a\\\nb'");
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Strand);
	assert_eq!(lexer.string.take().as_deref(), Some("ab"));
	assert!(lexer.strand_has_escape);
}

#[test]
fn unterminated_strand() {
	let mut lexer = Lexer::new(b"'a\nb'");
	let token = lexer.next_token();
	assert!(token.is_invalid());
}

#[test]
fn template_full() {
	let mut lexer = Lexer::new(b"`a\\tb`");
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Template(TemplateKind::Full));
	assert_eq!(lexer.template_cooked.take().as_deref(), Some("a\tb"));
	assert_eq!(lexer.template_raw.take().as_deref(), Some("a\\tb"));
}

#[test]
fn template_head_and_trailer() {
	let mut lexer = Lexer::new(b"`a${x}b`");
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Template(TemplateKind::Head));
	assert_eq!(lexer.template_cooked.take().as_deref(), Some("a"));
	// The substitution expression.
	let token = lexer.next_token();
	assert_eq!(token.kind, TokenKind::Identifier);
	// Back the lexer up to the closing brace and rescan.
	let token = lexer.next_token();
	assert_eq!(token.kind, t!("}"));
	lexer.backup_before(token.span);
	let token = lexer.scan_template_trailer();
	assert_eq!(token.kind, TokenKind::Template(TemplateKind::Tail));
	assert_eq!(lexer.template_cooked.take().as_deref(), Some("b"));
}

#[test]
fn regex_scan() {
	let mut lexer = Lexer::new(b"/a[/]b\\/c/gi");
	let token = lexer.next_token();
	assert_eq!(token.kind, t!("/"));
	lexer.backup_before(token.span);
	let token = lexer.scan_regex();
	assert_eq!(token.kind, TokenKind::Regex);
	assert_eq!(lexer.string.take().as_deref(), Some("a[/]b\\/c"));
	assert_eq!(lexer.regex_flags.take().as_deref(), Some("gi"));
}

#[test]
fn regex_duplicate_flag() {
	let mut lexer = Lexer::new(b"/a/gg");
	let token = lexer.next_token();
	lexer.backup_before(token.span);
	let token = lexer.scan_regex();
	assert!(token.is_invalid());
}

#[test]
fn newline_tracking() {
	let mut lexer = Lexer::new(b"a\nb /* c\n */ d e");
	let a = lexer.next_token();
	assert!(!a.newline_before);
	let b = lexer.next_token();
	assert!(b.newline_before);
	let d = lexer.next_token();
	assert!(d.newline_before, "multi-line comment counts as a terminator");
	let e = lexer.next_token();
	assert!(!e.newline_before);
}

#[test]
fn comments_are_skipped() {
	let kinds = lex_kinds("a // comment\nb /* inline */ c");
	assert_eq!(
		kinds,
		vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Identifier]
	);
}

#[test]
fn division_is_not_comment() {
	assert_eq!(
		lex_kinds("a / b"),
		vec![TokenKind::Identifier, t!("/"), TokenKind::Identifier]
	);
	assert_eq!(lex_kinds("a /= b")[1], t!("/="));
}

#[test]
fn spans_cover_tokens() {
	let source = "let abc = 1;";
	let mut lexer = Lexer::new(source.as_bytes());
	let token = lexer.next_token();
	assert_eq!(token.span.offset, 0);
	assert_eq!(token.span.len, 3);
	let token = lexer.next_token();
	assert_eq!(&source[token.span.offset as usize..][..token.span.len as usize], "abc");
}
