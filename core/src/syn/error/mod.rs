//! Rendering of parse errors against their source text.
//!
//! The parser reports a single first failure as a message plus the span of
//! the offending token. Rendering resolves that span into a line/column
//! location, extracts the source line, and draws a marker underneath the
//! offending characters:
//!
//! ```text
//! Unexpected token ';' expected an expression
//!  --> 1:13
//!   |
//! 1 | let x = 1 + ;
//!   |             ^
//! ```
//!
//! Some errors carry a second snippet, like the span of the delimiter an
//! unclosed `}` was supposed to match.

use std::fmt;

use crate::syn::common::Location;
use crate::syn::token::Span;

/// A parse error rendered against its source, ready for display.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct RenderedError {
	pub text: String,
	pub snippets: Vec<Snippet>,
}

impl fmt::Display for RenderedError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.text)?;
		for s in self.snippets.iter() {
			writeln!(f, "{}", s)?;
		}
		Ok(())
	}
}

/// One marked line of source.
///
/// Long lines are windowed around the marked range rather than shown whole;
/// a `…` on either side records where text was dropped.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Snippet {
	/// Position of the start of the marked range, 1-indexed.
	location: Location,
	/// The displayed part of the source line.
	line: String,
	/// Whether the displayed part was cut at the start or the end.
	cut_start: bool,
	cut_end: bool,
	/// Position of the marker in characters, relative to `line`.
	marker_offset: usize,
	/// Width of the marker in characters, at least one.
	marker_width: usize,
	/// An optional note printed after the marker.
	explain: Option<&'static str>,
}

impl Snippet {
	/// How many characters of the source line are shown.
	const WINDOW: usize = 72;
	/// How much context is kept before the marker when the line must be
	/// cut.
	const LEAD: usize = 16;

	/// Build a snippet marking `span` within `source`.
	pub fn from_span(source: &str, span: Span, explain: Option<&'static str>) -> Self {
		let location = Location::of_span_start(source, span);
		let line = source
			.split('\n')
			.nth(location.line - 1)
			.unwrap_or("")
			.trim_end_matches('\r')
			.trim_end();
		let col = location.column - 1;

		// The marker covers the span's text up to the end of its first
		// line, and always at least one character.
		let start = span.offset as usize;
		let end = (span.offset + span.len) as usize;
		let marked = source.get(start..end).unwrap_or("");
		let marked = marked.split('\n').next().unwrap_or("");
		let width = marked.chars().count().max(1);

		let (line, cut_start, cut_end, marker_offset) = Self::window(line, col);
		let shown = line.chars().count();
		let marker_width = width.min(shown.saturating_sub(marker_offset)).max(1);

		Snippet {
			location,
			line,
			cut_start,
			cut_end,
			marker_offset,
			marker_width,
			explain,
		}
	}

	/// Cut a window out of a long line so the marked column stays visible,
	/// with some context in front of it.
	fn window(line: &str, col: usize) -> (String, bool, bool, usize) {
		let total = line.chars().count();
		if total <= Self::WINDOW {
			return (line.to_owned(), false, false, col.min(total));
		}
		let mut start = col.saturating_sub(Self::LEAD);
		if start + Self::WINDOW > total {
			start = total - Self::WINDOW;
		}
		let shown: String = line.chars().skip(start).take(Self::WINDOW).collect();
		let cut_end = start + Self::WINDOW < total;
		(shown, start > 0, cut_end, col.saturating_sub(start))
	}
}

impl fmt::Display for Snippet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let number = self.location.line.to_string();
		let pad = " ".repeat(number.len());

		writeln!(f, "{pad}--> {}:{}", self.location.line, self.location.column)?;
		writeln!(f, "{pad} |")?;

		write!(f, "{number} | ")?;
		if self.cut_start {
			f.write_str("…")?;
		}
		f.write_str(&self.line)?;
		if self.cut_end {
			f.write_str("…")?;
		}
		writeln!(f)?;

		write!(f, "{pad} | ")?;
		let lead = self.marker_offset + usize::from(self.cut_start);
		for _ in 0..lead {
			f.write_str(" ")?;
		}
		for _ in 0..self.marker_width {
			f.write_str("^")?;
		}
		if let Some(explain) = self.explain {
			write!(f, " {explain}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::{RenderedError, Snippet};
	use crate::syn::token::Span;

	fn span_of(source: &str, needle: &str) -> Span {
		let offset = source.find(needle).expect("needle present") as u32;
		Span {
			offset,
			len: needle.len() as u32,
		}
	}

	#[test]
	fn marks_the_offending_token() {
		let source = "let x = 1 + ;";
		let snippet =
			Snippet::from_span(source, span_of(source, ";"), Some("expected an expression"));
		let expected = " --> 1:13\n  |\n1 | let x = 1 + ;\n  |             ^ expected an expression";
		assert_eq!(snippet.to_string(), expected);
	}

	#[test]
	fn marks_on_later_lines() {
		let source = "function f() {\n  return 1 +;\n}";
		let snippet = Snippet::from_span(source, span_of(source, ";"), None);
		assert_eq!(snippet.location.line, 2);
		let rendered = snippet.to_string();
		assert!(rendered.contains("2 |   return 1 +;"), "{rendered}");
		assert!(rendered.ends_with('^'), "{rendered}");
	}

	#[test]
	fn marker_covers_the_whole_token() {
		let source = "let result = total !== expected;";
		let snippet = Snippet::from_span(source, span_of(source, "!=="), None);
		let rendered = snippet.to_string();
		assert!(rendered.contains("^^^"), "{rendered}");
		assert!(!rendered.contains("^^^^"), "{rendered}");
	}

	#[test]
	fn windows_long_lines() {
		let padding = "first + ".repeat(30);
		let source = format!("let total = {padding}last + ;");
		let snippet = Snippet::from_span(&source, span_of(&source, ";"), None);
		let rendered = snippet.to_string();
		// The front of the line is dropped, the marked column stays visible.
		assert!(snippet.cut_start, "{rendered}");
		assert!(rendered.contains('…'), "{rendered}");
		assert!(rendered.contains("last + ;"), "{rendered}");
		assert!(rendered.contains('^'), "{rendered}");
	}

	#[test]
	fn multibyte_identifiers_align() {
		let source = "let süß = @;";
		let snippet = Snippet::from_span(source, span_of(source, "@"), None);
		// Columns count characters, not bytes.
		assert_eq!(snippet.location.column, 11);
		assert_eq!(snippet.marker_offset, 10);
	}

	#[test]
	fn renders_message_and_snippets() {
		let source = "if (ready { go(); }";
		let error = RenderedError {
			text: "Expected closing delimiter ')'".to_owned(),
			snippets: vec![
				Snippet::from_span(source, span_of(source, "{"), None),
				Snippet::from_span(
					source,
					span_of(source, "("),
					Some("expected this delimiter to close"),
				),
			],
		};
		let rendered = error.to_string();
		assert!(rendered.starts_with("Expected closing delimiter ')'\n"), "{rendered}");
		assert!(rendered.contains("--> 1:11"), "{rendered}");
		assert!(rendered.contains("expected this delimiter to close"), "{rendered}");
	}
}
