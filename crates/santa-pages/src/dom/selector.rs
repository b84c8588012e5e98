//! Selector matching for the in-memory backend.
//!
//! Supports selector lists of compound selectors: type (`form`), universal
//! (`*`), id (`#invite_code`), class (`.alert`) and attribute selectors with
//! `=`, `^=`, `$=`, `*=` and `~=`. Combinators are rejected.

use crate::error::{DomError, DomResult};

/// Element data a selector is matched against.
pub(crate) trait SelectorSubject {
	fn tag(&self) -> &str;
	fn attribute(&self, name: &str) -> Option<String>;
	fn has_class(&self, class: &str) -> bool;
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList(Vec<Compound>);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
	tag: Option<String>,
	conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
	Id(String),
	Class(String),
	Attribute {
		name: String,
		matcher: Option<(AttrOp, String)>,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
	Equals,
	Prefix,
	Suffix,
	Substring,
	Includes,
}

impl SelectorList {
	pub(crate) fn parse(source: &str) -> DomResult<Self> {
		let mut parser = Parser {
			source,
			chars: source.chars().collect(),
			pos: 0,
		};
		parser.list().map(Self)
	}

	pub(crate) fn matches(&self, subject: &impl SelectorSubject) -> bool {
		self.0.iter().any(|compound| compound.matches(subject))
	}
}

impl Compound {
	fn matches(&self, subject: &impl SelectorSubject) -> bool {
		if let Some(tag) = &self.tag
			&& tag != subject.tag()
		{
			return false;
		}
		self.conditions.iter().all(|condition| condition.matches(subject))
	}
}

impl Condition {
	fn matches(&self, subject: &impl SelectorSubject) -> bool {
		match self {
			Self::Id(id) => subject.attribute("id").as_deref() == Some(id.as_str()),
			Self::Class(class) => subject.has_class(class),
			Self::Attribute {
				name,
				matcher: None,
			} => subject.attribute(name).is_some(),
			Self::Attribute {
				name,
				matcher: Some((op, expected)),
			} => subject
				.attribute(name)
				.is_some_and(|actual| op.test(&actual, expected)),
		}
	}
}

impl AttrOp {
	fn test(self, actual: &str, expected: &str) -> bool {
		match self {
			Self::Equals => actual == expected,
			// Empty operands never match for the substring operators.
			Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
			Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
			Self::Substring => !expected.is_empty() && actual.contains(expected),
			Self::Includes => actual.split_whitespace().any(|word| word == expected),
		}
	}
}

struct Parser<'a> {
	source: &'a str,
	chars: Vec<char>,
	pos: usize,
}

impl Parser<'_> {
	fn list(&mut self) -> DomResult<Vec<Compound>> {
		let mut compounds = Vec::new();
		loop {
			self.skip_whitespace();
			compounds.push(self.compound()?);
			self.skip_whitespace();
			match self.peek() {
				None => return Ok(compounds),
				Some(',') => self.pos += 1,
				Some(_) => return Err(self.error("combinators are not supported")),
			}
		}
	}

	fn compound(&mut self) -> DomResult<Compound> {
		let mut compound = Compound::default();
		let mut universal = false;

		match self.peek() {
			Some('*') => {
				self.pos += 1;
				universal = true;
			}
			Some(c) if is_ident_char(c) => {
				compound.tag = Some(self.ident()?.to_ascii_lowercase());
			}
			_ => {}
		}

		loop {
			match self.peek() {
				Some('#') => {
					self.pos += 1;
					compound.conditions.push(Condition::Id(self.ident()?));
				}
				Some('.') => {
					self.pos += 1;
					compound.conditions.push(Condition::Class(self.ident()?));
				}
				Some('[') => {
					self.pos += 1;
					compound.conditions.push(self.attribute()?);
				}
				_ => break,
			}
		}

		if !universal && compound.tag.is_none() && compound.conditions.is_empty() {
			return Err(self.error("expected a selector"));
		}
		Ok(compound)
	}

	fn attribute(&mut self) -> DomResult<Condition> {
		self.skip_whitespace();
		let name = self.ident()?.to_ascii_lowercase();
		self.skip_whitespace();

		let op = match self.peek() {
			Some(']') => {
				self.pos += 1;
				return Ok(Condition::Attribute {
					name,
					matcher: None,
				});
			}
			Some('=') => {
				self.pos += 1;
				AttrOp::Equals
			}
			Some(c @ ('^' | '$' | '*' | '~')) => {
				self.pos += 1;
				self.expect('=')?;
				match c {
					'^' => AttrOp::Prefix,
					'$' => AttrOp::Suffix,
					'*' => AttrOp::Substring,
					_ => AttrOp::Includes,
				}
			}
			_ => return Err(self.error("malformed attribute selector")),
		};

		self.skip_whitespace();
		let value = match self.peek() {
			Some(quote @ ('"' | '\'')) => {
				self.pos += 1;
				self.quoted(quote)?
			}
			_ => self.ident()?,
		};
		self.skip_whitespace();
		self.expect(']')?;

		Ok(Condition::Attribute {
			name,
			matcher: Some((op, value)),
		})
	}

	fn ident(&mut self) -> DomResult<String> {
		let start = self.pos;
		while self.peek().is_some_and(is_ident_char) {
			self.pos += 1;
		}
		if start == self.pos {
			return Err(self.error("expected an identifier"));
		}
		Ok(self.chars[start..self.pos].iter().collect())
	}

	fn quoted(&mut self, quote: char) -> DomResult<String> {
		let start = self.pos;
		while let Some(c) = self.peek() {
			if c == quote {
				let value = self.chars[start..self.pos].iter().collect();
				self.pos += 1;
				return Ok(value);
			}
			self.pos += 1;
		}
		Err(self.error("unterminated string"))
	}

	fn expect(&mut self, expected: char) -> DomResult<()> {
		if self.peek() == Some(expected) {
			self.pos += 1;
			Ok(())
		} else {
			Err(self.error(&format!("expected '{}'", expected)))
		}
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.pos += 1;
		}
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn error(&self, reason: &str) -> DomError {
		DomError::InvalidSelector {
			selector: self.source.to_string(),
			reason: reason.to_string(),
		}
	}
}

fn is_ident_char(c: char) -> bool {
	c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
