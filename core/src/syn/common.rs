use crate::syn::token::Span;

/// A human readable location inside a string.
///
/// Locations are 1 indexed, the first character on the first line being on
/// line 1 column 1.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Location {
	pub line: usize,
	/// In chars.
	pub column: usize,
}

impl Location {
	/// Returns the location of the start of a span in the given source.
	pub fn of_span_start(source: &str, span: Span) -> Self {
		Self::of_offset(source, span.offset as usize)
	}

	/// Returns the location of a byte offset in the given source.
	pub fn of_offset(source: &str, offset: usize) -> Self {
		// Bytes of input prior to the line being iterated.
		let mut bytes_prior = 0;
		for (line_idx, line) in source.split('\n').enumerate() {
			// +1 for the '\n'
			let bytes_so_far = bytes_prior + line.len() + 1;
			if bytes_so_far > offset {
				let line_offset = offset.min(bytes_prior + line.len()) - bytes_prior;
				let column = line[..line_offset].chars().count();
				// +1 because line and column are 1 indexed.
				return Self {
					line: line_idx + 1,
					column: column + 1,
				};
			}
			bytes_prior = bytes_so_far;
		}
		// Offset lies past the end of the source, point just past the last
		// character instead.
		let line_count = source.split('\n').count();
		let column = source.split('\n').next_back().map(|x| x.chars().count()).unwrap_or(0);
		Self {
			line: line_count,
			column: column + 1,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn location_of_offset() {
		let source = "let a;\nlet b;";
		let loc = Location::of_offset(source, 0);
		assert_eq!(loc, Location {
			line: 1,
			column: 1
		});
		let loc = Location::of_offset(source, 7);
		assert_eq!(loc, Location {
			line: 2,
			column: 1
		});
		let loc = Location::of_offset(source, 11);
		assert_eq!(loc, Location {
			line: 2,
			column: 5
		});
	}

	#[test]
	fn location_past_end() {
		let source = "a";
		let loc = Location::of_offset(source, 10);
		assert_eq!(loc, Location {
			line: 1,
			column: 2
		});
	}
}
