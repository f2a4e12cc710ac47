use std::{
    collections::BTreeMap,
    fmt,
    iter::Peekable,
    str::{CharIndices, FromStr},
    sync::LazyLock,
};

use regex::Regex;
use snafu::ensure;

use super::error::{self, ParseError};

const MAX_NAME_LENGTH: usize = 63;
const MAX_PREFIX_LENGTH: usize = 253;

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$")
        .expect("qualified name pattern should always compile")
});

static DNS_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS subdomain pattern should always compile")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelOperator {
    Exists,
    DoesNotExist,
    Equals,
    NotEquals,
    In,
    NotIn,
    GreaterThan,
    LessThan,
}

impl LabelOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::DoesNotExist => "!",
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::In => "in",
            Self::NotIn => "notin",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }
}

/// One comma separated clause of a label selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelRequirement {
    key: String,
    operator: LabelOperator,
    values: Vec<String>,
}

impl LabelRequirement {
    #[must_use]
    pub fn key(&self) -> &str { &self.key }

    #[must_use]
    pub const fn operator(&self) -> LabelOperator { self.operator }

    #[must_use]
    pub fn values(&self) -> &[String] { &self.values }

    /// Evaluates this clause against a label set the way the API server does.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let value = labels.get(&self.key);
        match self.operator {
            LabelOperator::Exists => value.is_some(),
            LabelOperator::DoesNotExist => value.is_none(),
            LabelOperator::Equals | LabelOperator::In => {
                value.is_some_and(|value| self.values.contains(value))
            }
            LabelOperator::NotEquals | LabelOperator::NotIn => {
                value.is_none_or(|value| !self.values.contains(value))
            }
            LabelOperator::GreaterThan | LabelOperator::LessThan => {
                let actual = value.and_then(|value| value.parse::<i64>().ok());
                let bound = self.values.first().and_then(|value| value.parse::<i64>().ok());
                match (actual, bound) {
                    (Some(actual), Some(bound)) if self.operator == LabelOperator::GreaterThan => {
                        actual > bound
                    }
                    (Some(actual), Some(bound)) => actual < bound,
                    _ => false,
                }
            }
        }
    }
}

/// A parsed label selector such as `app=web,tier in (frontend, backend)`.
///
/// The original expression is kept verbatim and is what gets sent to the API
/// server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSelector {
    raw: String,
    requirements: Vec<LabelRequirement>,
}

impl LabelSelector {
    #[must_use]
    pub fn as_str(&self) -> &str { &self.raw }

    #[must_use]
    pub fn requirements(&self) -> &[LabelRequirement] { &self.requirements }

    /// Returns `true` when every requirement holds for `labels`.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|requirement| requirement.matches(labels))
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.raw) }
}

impl FromStr for LabelSelector {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let requirements = Parser { input, tokens: tokenize(input), cursor: 0 }.parse()?;
        Ok(Self { raw: input.to_string(), requirements })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Identifier(String),
    Comma,
    OpenParen,
    CloseParen,
    Not,
    Equals,
    DoubleEquals,
    NotEquals,
    GreaterThan,
    LessThan,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "'{identifier}'"),
            Self::Comma => f.write_str("','"),
            Self::OpenParen => f.write_str("'('"),
            Self::CloseParen => f.write_str("')'"),
            Self::Not => f.write_str("'!'"),
            Self::Equals => f.write_str("'='"),
            Self::DoubleEquals => f.write_str("'=='"),
            Self::NotEquals => f.write_str("'!='"),
            Self::GreaterThan => f.write_str("'>'"),
            Self::LessThan => f.write_str("'<'"),
        }
    }
}

const fn is_special(c: char) -> bool { matches!(c, ',' | '(' | ')' | '!' | '=' | '<' | '>') }

fn followed_by(chars: &mut Peekable<CharIndices<'_>>, expected: char) -> bool {
    chars.next_if(|&(_, next)| next == expected).is_some()
}

fn tokenize(input: &str) -> Vec<(usize, Token)> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            ',' => Token::Comma,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '<' => Token::LessThan,
            '>' => Token::GreaterThan,
            '!' if followed_by(&mut chars, '=') => Token::NotEquals,
            '!' => Token::Not,
            '=' if followed_by(&mut chars, '=') => Token::DoubleEquals,
            '=' => Token::Equals,
            _ => {
                let mut identifier = String::from(c);
                while let Some((_, next)) =
                    chars.next_if(|&(_, next)| !next.is_whitespace() && !is_special(next))
                {
                    identifier.push(next);
                }
                Token::Identifier(identifier)
            }
        };
        tokens.push((position, token));
    }
    tokens
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(usize, Token)>,
    cursor: usize,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Vec<LabelRequirement>, ParseError> {
        ensure!(!self.tokens.is_empty(), error::EmptySnafu);

        let mut requirements = Vec::new();
        loop {
            requirements.push(self.requirement()?);
            match self.next() {
                None => return Ok(requirements),
                Some((_, Token::Comma)) => {}
                other => return Err(self.unexpected(other, "',' or end of selector")),
            }
        }
    }

    fn peek(&self) -> Option<&Token> { self.tokens.get(self.cursor).map(|(_, token)| token) }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn requirement(&mut self) -> Result<LabelRequirement, ParseError> {
        if self.peek() == Some(&Token::Not) {
            self.cursor += 1;
            let key = self.key()?;
            return Ok(LabelRequirement {
                key,
                operator: LabelOperator::DoesNotExist,
                values: Vec::new(),
            });
        }

        let key = self.key()?;
        if matches!(self.peek(), None | Some(Token::Comma)) {
            return Ok(LabelRequirement { key, operator: LabelOperator::Exists, values: Vec::new() });
        }

        match self.next() {
            Some((_, Token::Equals | Token::DoubleEquals)) => {
                let values = vec![self.single_value()?];
                Ok(LabelRequirement { key, operator: LabelOperator::Equals, values })
            }
            Some((_, Token::NotEquals)) => {
                let values = vec![self.single_value()?];
                Ok(LabelRequirement { key, operator: LabelOperator::NotEquals, values })
            }
            Some((_, Token::GreaterThan)) => self.integer(key, LabelOperator::GreaterThan),
            Some((_, Token::LessThan)) => self.integer(key, LabelOperator::LessThan),
            Some((_, Token::Identifier(keyword))) if keyword == "in" => {
                self.value_set(key, LabelOperator::In)
            }
            Some((_, Token::Identifier(keyword))) if keyword == "notin" => {
                self.value_set(key, LabelOperator::NotIn)
            }
            other => Err(self.unexpected(other, "operator")),
        }
    }

    fn key(&mut self) -> Result<String, ParseError> {
        match self.next() {
            Some((_, Token::Identifier(key))) => {
                validate_key(&key)?;
                Ok(key)
            }
            other => Err(self.unexpected(other, "label key")),
        }
    }

    fn single_value(&mut self) -> Result<String, ParseError> {
        if matches!(self.peek(), None | Some(Token::Comma)) {
            return Ok(String::new());
        }
        match self.next() {
            Some((_, Token::Identifier(value))) => {
                validate_value(&value)?;
                Ok(value)
            }
            other => Err(self.unexpected(other, "label value")),
        }
    }

    fn integer(
        &mut self,
        key: String,
        operator: LabelOperator,
    ) -> Result<LabelRequirement, ParseError> {
        match self.next() {
            Some((_, Token::Identifier(value))) => {
                ensure!(
                    value.parse::<i64>().is_ok(),
                    error::NotAnIntegerSnafu { key, operator: operator.as_str(), value }
                );
                Ok(LabelRequirement { key, operator, values: vec![value] })
            }
            other => Err(self.unexpected(other, "integer value")),
        }
    }

    fn value_set(
        &mut self,
        key: String,
        operator: LabelOperator,
    ) -> Result<LabelRequirement, ParseError> {
        match self.next() {
            Some((_, Token::OpenParen)) => {}
            other => return Err(self.unexpected(other, "'('")),
        }

        if self.peek() == Some(&Token::CloseParen) {
            return error::EmptyValueSetSnafu { key, operator: operator.as_str() }.fail();
        }

        // a missing member between '(', ',' and ')' stands for the empty value
        let mut values = Vec::<String>::new();
        loop {
            let value = if matches!(self.peek(), Some(Token::Comma | Token::CloseParen)) {
                String::new()
            } else {
                match self.next() {
                    Some((_, Token::Identifier(value))) => {
                        validate_value(&value)?;
                        value
                    }
                    other => return Err(self.unexpected(other, "label value")),
                }
            };
            if !values.contains(&value) {
                values.push(value);
            }

            match self.next() {
                Some((_, Token::Comma)) => {}
                Some((_, Token::CloseParen)) => {
                    return Ok(LabelRequirement { key, operator, values });
                }
                other => return Err(self.unexpected(other, "',' or ')'")),
            }
        }
    }

    fn unexpected(&self, found: Option<(usize, Token)>, expected: &'static str) -> ParseError {
        let (position, found) = found.map_or_else(
            || (self.input.len(), "end of selector".to_string()),
            |(position, token)| (position, token.to_string()),
        );
        error::UnexpectedSnafu { selector: self.input, position, found, expected }.build()
    }
}

fn validate_key(key: &str) -> Result<(), ParseError> {
    let (prefix, name) = key.split_once('/').map_or((None, key), |(prefix, name)| (Some(prefix), name));

    if let Some(prefix) = prefix {
        ensure!(
            !prefix.is_empty()
                && prefix.len() <= MAX_PREFIX_LENGTH
                && DNS_SUBDOMAIN.is_match(prefix),
            error::InvalidKeySnafu {
                key,
                reason: "prefix must be a DNS subdomain of at most 253 characters"
            }
        );
    }
    ensure!(
        !name.is_empty() && name.len() <= MAX_NAME_LENGTH,
        error::InvalidKeySnafu { key, reason: "name must be between 1 and 63 characters" }
    );
    ensure!(
        QUALIFIED_NAME.is_match(name),
        error::InvalidKeySnafu {
            key,
            reason: "name must consist of alphanumerics, '-', '_' or '.' and start and end with \
                     an alphanumeric"
        }
    );
    Ok(())
}

fn validate_value(value: &str) -> Result<(), ParseError> {
    if value.is_empty() {
        return Ok(());
    }
    ensure!(
        value.len() <= MAX_NAME_LENGTH,
        error::InvalidValueSnafu { value, reason: "must be at most 63 characters" }
    );
    ensure!(
        QUALIFIED_NAME.is_match(value),
        error::InvalidValueSnafu {
            value,
            reason: "must consist of alphanumerics, '-', '_' or '.' and start and end with an \
                     alphanumeric"
        }
    );
    Ok(())
}
