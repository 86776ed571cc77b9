use crate::table::matcher::Matcher;
use std::borrow::Cow;

/// Replace every non-overlapping key occurrence in `line`, left to right.
///
/// After a replacement the scan resumes just past the inserted value, so
/// replacement text is never rescanned and a value that contains another
/// key does not trigger a second substitution.
///
/// Returns `Cow::Borrowed` when no key occurs in the line.
pub fn rewrite_line<'l>(matcher: &Matcher, line: &'l [u8]) -> Cow<'l, [u8]> {
	let Some(first) = matcher.find_at(line, 0) else {
		return Cow::Borrowed(line);
	};

	let mut rewritten = Vec::with_capacity(line.len() + first.value.len());
	let mut copied = 0;
	let mut next = Some(first);

	while let Some(found) = next {
		rewritten.extend_from_slice(&line[copied..found.start]);
		rewritten.extend_from_slice(found.value.as_bytes());
		copied = found.end;
		next = matcher.find_at(line, copied);
	}

	rewritten.extend_from_slice(&line[copied..]);
	Cow::Owned(rewritten)
}
