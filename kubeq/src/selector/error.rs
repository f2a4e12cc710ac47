use snafu::Snafu;

/// Reasons a selector expression can be rejected.
#[derive(Clone, Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("selector is empty"))]
    Empty,

    #[snafu(display(
        "unexpected {found} at position {position} in selector '{selector}', expected {expected}"
    ))]
    Unexpected { selector: String, position: usize, found: String, expected: &'static str },

    #[snafu(display("invalid label key '{key}': {reason}"))]
    InvalidKey { key: String, reason: &'static str },

    #[snafu(display("invalid label value '{value}': {reason}"))]
    InvalidValue { value: String, reason: &'static str },

    #[snafu(display("operator '{operator}' on key '{key}' requires an integer, got '{value}'"))]
    NotAnInteger { key: String, operator: &'static str, value: String },

    #[snafu(display("operator '{operator}' on key '{key}' requires at least one value"))]
    EmptyValueSet { key: String, operator: &'static str },

    #[snafu(display("field selector term '{term}' has no operator"))]
    MissingOperator { term: String },

    #[snafu(display("field selector term '{term}' has an empty field name"))]
    EmptyField { term: String },

    #[snafu(display("field selector contains an empty term"))]
    EmptyTerm,

    #[snafu(display("invalid escape sequence in field selector term '{term}'"))]
    InvalidEscape { term: String },
}
