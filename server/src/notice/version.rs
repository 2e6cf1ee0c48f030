//! Version string ordering compatible with the host platform.
//!
//! Versions are split into parts on any non-alphanumeric character and on
//! every digit/non-digit boundary (`1.0rc1` is `1`, `0`, `rc`, `1`). Numeric
//! parts compare as numbers, textual parts by their release rank:
//!
//! `dev < alpha = a < beta = b < RC = rc < (number) < pl = p`
//!
//! Unknown tags rank below everything. When one version runs out of parts, a
//! remaining number makes the other one greater; a remaining tag is ranked
//! against a number.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
	Number(&'a str),
	Tag(&'a str),
}

/// Stand-in for a numeric part when ranking tags against numbers
const NUMBER: Part<'static> = Part::Tag("#N");

const RANKS: [(&str, i32); 10] = [
	("dev", 0),
	("alpha", 1),
	("a", 1),
	("beta", 2),
	("b", 2),
	("RC", 3),
	("rc", 3),
	("#", 4),
	("pl", 5),
	("p", 5),
];

fn rank(tag: &str) -> i32 {
	RANKS
		.iter()
		.find(|(prefix, _)| tag.starts_with(prefix))
		.map(|(_, rank)| *rank)
		.unwrap_or(-6)
}

fn parts(version: &str) -> Vec<Part<'_>> {
	let mut res = Vec::new();
	let mut start: Option<(usize, bool)> = None;

	for (idx, ch) in version.char_indices() {
		let class = if ch.is_ascii_digit() {
			Some(true)
		} else if ch.is_alphanumeric() || ch == '#' {
			Some(false)
		} else {
			None
		};

		match (start, class) {
			(Some((_, digit)), Some(is_digit)) if digit == is_digit => {}
			(prev, class) => {
				if let Some((from, digit)) = prev {
					res.push(part(&version[from..idx], digit));
				}
				start = class.map(|is_digit| (idx, is_digit));
			}
		}
	}
	if let Some((from, digit)) = start {
		res.push(part(&version[from..], digit));
	}
	res
}

fn part(s: &str, digit: bool) -> Part<'_> {
	if digit { Part::Number(s) } else { Part::Tag(s) }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
	let a = a.trim_start_matches('0');
	let b = b.trim_start_matches('0');
	a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_part(a: Part, b: Part) -> Ordering {
	match (a, b) {
		(Part::Number(a), Part::Number(b)) => compare_numbers(a, b),
		(Part::Tag(a), Part::Tag(b)) => rank(a).cmp(&rank(b)),
		(Part::Number(_), Part::Tag(b)) => rank("#").cmp(&rank(b)),
		(Part::Tag(a), Part::Number(_)) => rank(a).cmp(&rank("#")),
	}
}

fn compare_parts(a: &[Part], b: &[Part]) -> Ordering {
	for (pa, pb) in a.iter().zip(b.iter()) {
		let ord = compare_part(*pa, *pb);
		if ord != Ordering::Equal {
			return ord;
		}
	}

	let common = a.len().min(b.len());
	match (a.get(common), b.get(common)) {
		(Some(Part::Number(_)), _) => Ordering::Greater,
		(Some(Part::Tag(_)), _) => compare_parts(&a[common..], &[NUMBER]),
		(None, Some(Part::Number(_))) => Ordering::Less,
		(None, Some(Part::Tag(_))) => compare_parts(&[NUMBER], &b[common..]),
		(None, None) => Ordering::Equal,
	}
}

/// Compare two version strings
pub fn compare(a: &str, b: &str) -> Ordering {
	compare_parts(&parts(a), &parts(b))
}

pub fn is_lower(a: &str, b: &str) -> bool {
	compare(a, b) == Ordering::Less
}

/// Equality in version ordering (`1.0` and `1.0.0` differ, `1.0` and `1-0` do not)
pub fn is_same(a: &str, b: &str) -> bool {
	compare(a, b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
	use super::*;
	use Ordering::*;

	#[test]
	fn test_numeric_parts() {
		assert_eq!(compare("4.0.5", "4.0.2"), Greater);
		assert_eq!(compare("4.0.5", "4.1.6"), Less);
		assert_eq!(compare("3.10.0", "3.9.9"), Greater);
		assert_eq!(compare("1.02", "1.2"), Equal);
		assert_eq!(compare("4.0.0", "4.0.0"), Equal);
	}

	#[test]
	fn test_longer_version_with_number_is_greater() {
		assert_eq!(compare("1.0", "1.0.0"), Less);
		assert_eq!(compare("1.0.1", "1.0"), Greater);
	}

	#[test]
	fn test_separators_are_equivalent() {
		assert_eq!(compare("1-0_0+1", "1.0.0.1"), Equal);
		assert_eq!(compare("1.0rc1", "1.0.rc.1"), Equal);
	}

	#[test]
	fn test_release_tags() {
		assert_eq!(compare("1.0dev", "1.0alpha"), Less);
		assert_eq!(compare("1.0a1", "1.0alpha1"), Equal);
		assert_eq!(compare("1.0beta", "1.0b"), Equal);
		assert_eq!(compare("1.0b2", "1.0RC1"), Less);
		assert_eq!(compare("1.0rc1", "1.0RC1"), Equal);
		assert_eq!(compare("1.0pl1", "1.0p1"), Equal);
		assert_eq!(compare("1.0.1", "1.0pl1"), Less);
		assert_eq!(compare("1.0foo", "1.0dev"), Less);
	}

	#[test]
	fn test_trailing_tag_against_release() {
		assert_eq!(compare("1.0.0-beta", "1.0.0"), Less);
		assert_eq!(compare("1.0.0", "1.0.0-rc1"), Greater);
		assert_eq!(compare("1.0.0pl", "1.0.0"), Greater);
	}

	#[test]
	fn test_helpers() {
		assert!(is_lower("3.9.1", "4.0.0"));
		assert!(!is_lower("4.0.0", "4.0.0"));
		assert!(is_same("4.1.0", "4-1-0"));
		assert!(!is_same("4.1.0", "4.2.0"));
	}
}

// vim: ts=4
