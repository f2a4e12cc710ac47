use std::{fmt, str::FromStr};

use snafu::ensure;

use super::error::{self, ParseError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOperator {
    Equals,
    NotEquals,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRequirement {
    field: String,
    operator: FieldOperator,
    value: String,
}

impl FieldRequirement {
    #[must_use]
    pub fn field(&self) -> &str { &self.field }

    #[must_use]
    pub const fn operator(&self) -> FieldOperator { self.operator }

    /// The unescaped value.
    #[must_use]
    pub fn value(&self) -> &str { &self.value }
}

/// A parsed field selector such as `metadata.name=web,status.phase!=Failed`.
///
/// Values may escape `\`, `,`, `=` and `!` with a backslash. A field that an
/// object does not carry compares as the empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSelector {
    raw: String,
    requirements: Vec<FieldRequirement>,
}

impl FieldSelector {
    #[must_use]
    pub fn as_str(&self) -> &str { &self.raw }

    #[must_use]
    pub fn requirements(&self) -> &[FieldRequirement] { &self.requirements }

    /// Evaluates the selector, resolving field paths through `lookup`.
    pub fn matches<F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.requirements.iter().all(|requirement| {
            let actual = lookup(&requirement.field).unwrap_or_default();
            match requirement.operator {
                FieldOperator::Equals => actual == requirement.value,
                FieldOperator::NotEquals => actual != requirement.value,
            }
        })
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.raw) }
}

impl FromStr for FieldSelector {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ensure!(!input.is_empty(), error::EmptySnafu);

        let requirements =
            split_unescaped(input, ',').into_iter().map(parse_term).collect::<Result<_, _>>()?;
        Ok(Self { raw: input.to_string(), requirements })
    }
}

fn split_unescaped(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(&input[start..index]);
            start = index + c.len_utf8();
        }
    }
    parts.push(&input[start..]);
    parts
}

fn parse_term(term: &str) -> Result<FieldRequirement, ParseError> {
    ensure!(!term.is_empty(), error::EmptyTermSnafu);

    let mut escaped = false;
    for (index, c) in term.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        let rest = &term[index..];
        let (operator, width) = if c == '\\' {
            escaped = true;
            continue;
        } else if rest.starts_with("!=") {
            (FieldOperator::NotEquals, 2)
        } else if rest.starts_with("==") {
            (FieldOperator::Equals, 2)
        } else if c == '=' {
            (FieldOperator::Equals, 1)
        } else {
            continue;
        };

        let field = &term[..index];
        ensure!(!field.is_empty(), error::EmptyFieldSnafu { term });
        let value = unescape(&term[index + width..], term)?;
        return Ok(FieldRequirement { field: field.to_string(), operator, value });
    }

    error::MissingOperatorSnafu { term }.fail()
}

fn unescape(value: &str, term: &str) -> Result<String, ParseError> {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('\\' | ',' | '=' | '!')) => unescaped.push(escaped),
                _ => return error::InvalidEscapeSnafu { term }.fail(),
            },
            // `=` must be escaped inside a value
            '=' => return error::InvalidEscapeSnafu { term }.fail(),
            c => unescaped.push(c),
        }
    }
    Ok(unescaped)
}
