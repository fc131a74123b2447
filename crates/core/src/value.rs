use std::{fmt, str::FromStr};

use crate::MetadataError;

/// The value surface seen by property handlers.
///
/// Conversion handlers translate between entity-side and database-side
/// representations; this enum is deliberately small and owns its payloads so
/// handlers can rewrite values freely.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

/// Storage-type tags a property can be overridden to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    BigInt,
    Int,
    SmallInt,
    Bit,
    Float,
    Decimal,
    NVarChar,
    VarChar,
    DateTime,
    Date,
    Time,
    UniqueIdentifier,
    Binary,
}

impl DbType {
    /// SQL type name as emitted by the target dialect.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::BigInt => "BIGINT",
            Self::Int => "INT",
            Self::SmallInt => "SMALLINT",
            Self::Bit => "BIT",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::NVarChar => "NVARCHAR",
            Self::VarChar => "VARCHAR",
            Self::DateTime => "DATETIME",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::UniqueIdentifier => "UNIQUEIDENTIFIER",
            Self::Binary => "BINARY",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for DbType {
    type Err = MetadataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bigint" => Ok(Self::BigInt),
            "int" => Ok(Self::Int),
            "smallint" => Ok(Self::SmallInt),
            "bit" => Ok(Self::Bit),
            "float" => Ok(Self::Float),
            "decimal" => Ok(Self::Decimal),
            "nvarchar" => Ok(Self::NVarChar),
            "varchar" => Ok(Self::VarChar),
            "datetime" => Ok(Self::DateTime),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "uniqueidentifier" => Ok(Self::UniqueIdentifier),
            "binary" => Ok(Self::Binary),
            _ => Err(MetadataError::UnknownDbType {
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DbType;

    #[test]
    fn sql_names_parse_back() {
        for db_type in [DbType::BigInt, DbType::NVarChar, DbType::UniqueIdentifier] {
            let parsed: DbType = db_type.as_sql().parse().expect("sql name must parse");
            assert_eq!(parsed, db_type);
        }
    }
}
