//! Pure text-fragment helpers over property sequences.
//!
//! Each helper returns one fragment per property, in the order given; the
//! builder joins fragments with `", "`. Identifiers are bracket-quoted and
//! parameters use the `@name` placeholder style of the target dialect.

use crate::PropertyDescriptor;

/// Bracket-quotes a single identifier.
#[must_use]
pub fn quote(name: &str) -> String {
    format!("[{name}]")
}

/// Bracket-quotes a possibly schema-qualified name part by part, so
/// `dbo.Person` renders as `[dbo].[Person]`.
#[must_use]
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote)
        .collect::<Vec<_>>()
        .join(".")
}

/// Renders the placeholder for a named parameter.
#[must_use]
pub fn parameter(name: &str) -> String {
    format!("@{name}")
}

/// `[Column]` per property.
#[must_use]
pub fn as_fields(properties: &[PropertyDescriptor]) -> Vec<String> {
    properties
        .iter()
        .map(|property| quote(property.column_name()))
        .collect()
}

/// `[Column] = @Name` per property, for SET and qualifier contexts.
#[must_use]
pub fn as_fields_and_parameters(properties: &[PropertyDescriptor]) -> Vec<String> {
    properties
        .iter()
        .map(|property| {
            format!(
                "{} = {}",
                quote(property.column_name()),
                parameter(&property.name)
            )
        })
        .collect()
}

/// `alias.[Column]` per property, for merge and join contexts.
#[must_use]
pub fn as_fields_and_alias_fields(properties: &[PropertyDescriptor], alias: &str) -> Vec<String> {
    properties
        .iter()
        .map(|property| format!("{alias}.{}", quote(property.column_name())))
        .collect()
}

/// `@Name` per property.
#[must_use]
pub fn as_parameters(properties: &[PropertyDescriptor]) -> Vec<String> {
    properties
        .iter()
        .map(|property| parameter(&property.name))
        .collect()
}

/// `@Name AS [Column]` per property, for merge-source projections.
#[must_use]
pub fn as_parameters_as_fields(properties: &[PropertyDescriptor]) -> Vec<String> {
    properties
        .iter()
        .map(|property| {
            format!(
                "{} AS {}",
                parameter(&property.name),
                quote(property.column_name())
            )
        })
        .collect()
}
