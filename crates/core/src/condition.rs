use crate::{Field, render};

/// A pre-rendered boolean expression supplied by the caller.
///
/// The condition grammar (conjunctions, comparisons, grouping) lives outside
/// this core; the builder only ever asks for the final text.
pub trait ConditionGroup {
    fn get_string(&self) -> String;
}

/// Passthrough condition for callers that already hold rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCondition {
    text: String,
}

impl RawCondition {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ConditionGroup for RawCondition {
    fn get_string(&self) -> String {
        self.text.clone()
    }
}

/// Comparison operators available to single-field conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Comparison {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

/// One field compared against its own named parameter, as used by the
/// HAVING COUNT clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    pub field: Field,
    pub comparison: Comparison,
}

impl QueryField {
    #[must_use]
    pub fn new(field: Field, comparison: Comparison) -> Self {
        Self { field, comparison }
    }

    #[must_use]
    pub fn parameter(&self) -> String {
        render::parameter(&self.field.name)
    }
}
