//! Label and field selector grammars.
//!
//! Both selector kinds are parsed eagerly so that malformed expressions are
//! rejected before a request leaves the process. The parsed forms keep the
//! original text, which is what gets sent to the API server, and can also
//! evaluate themselves against in-memory objects.

mod error;
mod field;
mod label;

pub use self::{
    error::ParseError,
    field::{FieldOperator, FieldRequirement, FieldSelector},
    label::{LabelOperator, LabelRequirement, LabelSelector},
};
