use std::{fmt, str::FromStr};

use crate::MetadataError;

/// The statement shapes a caller can request for an entity.
///
/// The operation selects both the clause sequence and the property subset the
/// metadata provider exposes to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    Merge,
}

impl Operation {
    pub const ALL: [Self; 5] = [
        Self::Select,
        Self::Insert,
        Self::Update,
        Self::Delete,
        Self::Merge,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = MetadataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "merge" => Ok(Self::Merge),
            _ => Err(MetadataError::UnknownOperation {
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Operation;

    #[test]
    fn parses_case_insensitively() {
        let parsed: Operation = " Merge ".parse().expect("merge must parse");
        assert_eq!(parsed, Operation::Merge);
    }

    #[test]
    fn rejects_unknown_operations() {
        let error = "upsert".parse::<Operation>().expect_err("upsert is not an operation");
        assert!(error.to_string().contains("upsert"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for operation in Operation::ALL {
            let parsed: Operation = operation.as_str().parse().expect("canonical name must parse");
            assert_eq!(parsed, operation);
        }
    }
}
