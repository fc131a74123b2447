use std::fmt;

use crate::{
    BuildError, ConditionGroup, EntityDescriptor, Field, MetadataProvider, Operation, OrderField,
    QueryField, Result, render,
};

/// Single-use fluent assembler for one SQL statement.
///
/// Every clause method consumes the builder, appends its token to the
/// accumulator with a single separating space, and returns the builder for
/// chaining. A fresh builder is required per statement; the accumulator is
/// append-only except for `trim` and the `end` terminator.
pub struct StatementBuilder<'a> {
    provider: &'a dyn MetadataProvider,
    entity: &'a EntityDescriptor,
    statement: String,
}

impl fmt::Debug for StatementBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementBuilder")
            .field("entity", &self.entity)
            .field("statement", &self.statement)
            .finish_non_exhaustive()
    }
}

impl<'a> StatementBuilder<'a> {
    #[must_use]
    pub fn new(provider: &'a dyn MetadataProvider, entity: &'a EntityDescriptor) -> Self {
        Self {
            provider,
            entity,
            statement: String::new(),
        }
    }

    /// The accumulated statement text.
    #[must_use]
    pub fn get_string(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.statement
    }

    /// Strips incidental edge whitespace left by formatting calls.
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.statement = self.statement.trim().to_string();
        self
    }

    /// Explicit separator, for formatting only.
    #[must_use]
    pub fn space(mut self) -> Self {
        self.statement.push(' ');
        self
    }

    /// Explicit line break, for formatting only.
    #[must_use]
    pub fn new_line(mut self) -> Self {
        self.statement.push('\n');
        self
    }

    /// Appends a caller-supplied token verbatim.
    #[must_use]
    pub fn write_text(self, text: &str) -> Self {
        self.append(text)
    }

    #[must_use]
    fn append(mut self, token: &str) -> Self {
        // Empty fragments append nothing, so separators never double up.
        if token.is_empty() {
            return self;
        }
        if !self.statement.is_empty() {
            self.statement.push(' ');
        }
        self.statement.push_str(token);
        self
    }

    // Data-dependent clauses.

    /// Comma-joined bracket-quoted column list for the operation's
    /// properties. An empty property set renders nothing, by design.
    #[must_use]
    pub fn fields(self, operation: Operation) -> Self {
        let properties = self.provider.properties_for(self.entity, operation);
        let fragment = render::as_fields(&properties).join(", ");
        self.append(&fragment)
    }

    /// A single bracket-quoted column.
    #[must_use]
    pub fn field(self, field: &Field) -> Self {
        let fragment = render::quote(&field.name);
        self.append(&fragment)
    }

    /// `[Column] = @Name` pairs for value-binding contexts.
    #[must_use]
    pub fn fields_and_parameters(self, operation: Operation) -> Self {
        let properties = self.provider.properties_for(self.entity, operation);
        let fragment = render::as_fields_and_parameters(&properties).join(", ");
        self.append(&fragment)
    }

    /// `alias.[Column]` forms for merge and join contexts.
    #[must_use]
    pub fn fields_and_alias_fields(self, operation: Operation, alias: &str) -> Self {
        let properties = self.provider.properties_for(self.entity, operation);
        let fragment = render::as_fields_and_alias_fields(&properties, alias).join(", ");
        self.append(&fragment)
    }

    /// Bare `@Name` placeholder list.
    #[must_use]
    pub fn parameters(self, operation: Operation) -> Self {
        let properties = self.provider.properties_for(self.entity, operation);
        let fragment = render::as_parameters(&properties).join(", ");
        self.append(&fragment)
    }

    /// `@Name AS [Column]` list for merge-source projections.
    #[must_use]
    pub fn parameters_as_fields(self, operation: Operation) -> Self {
        let properties = self.provider.properties_for(self.entity, operation);
        let fragment = render::as_parameters_as_fields(&properties).join(", ");
        self.append(&fragment)
    }

    /// The entity's mapped table name.
    #[must_use]
    pub fn table(self) -> Self {
        let fragment = self.provider.mapped_table_name(self.entity);
        self.append(&fragment)
    }

    /// `WHERE` followed by the pre-rendered condition text.
    #[must_use]
    pub fn where_group(self, group: &dyn ConditionGroup) -> Self {
        let fragment = format!("WHERE {}", group.get_string());
        self.append(&fragment)
    }

    /// `GROUP BY` with an explicit column list. An empty list cannot form a
    /// complete clause and fails loudly.
    pub fn group_by(self, fields: &[Field]) -> Result<Self> {
        if fields.is_empty() {
            return Err(BuildError::EmptyClause { clause: "GROUP BY" }.into());
        }
        let columns = fields
            .iter()
            .map(|field| render::quote(&field.name))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(self.append(&format!("GROUP BY {columns}")))
    }

    /// `HAVING COUNT([Field]) <op> @Field`.
    #[must_use]
    pub fn having_count(self, query_field: &QueryField) -> Self {
        let fragment = format!(
            "HAVING COUNT({}) {} {}",
            render::quote(&query_field.field.name),
            query_field.comparison.as_sql(),
            query_field.parameter()
        );
        self.append(&fragment)
    }

    /// AND-joined `left.[Field] = right.[Field]` pairs for merge and join
    /// conditions. An empty qualifier list fails loudly.
    pub fn join_qualifiers(self, fields: &[Field], left: &str, right: &str) -> Result<Self> {
        if fields.is_empty() {
            return Err(BuildError::EmptyClause {
                clause: "join qualifiers",
            }
            .into());
        }
        let pairs = fields
            .iter()
            .map(|field| {
                let column = render::quote(&field.name);
                format!("{left}.{column} = {right}.{column}")
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        Ok(self.append(&pairs))
    }

    /// `ORDER BY` with explicit directions. An empty list cannot form a
    /// complete clause and fails loudly.
    pub fn order_by(self, fields: &[OrderField]) -> Result<Self> {
        if fields.is_empty() {
            return Err(BuildError::EmptyClause { clause: "ORDER BY" }.into());
        }
        let columns = fields
            .iter()
            .map(|ordered| {
                format!(
                    "{} {}",
                    render::quote(&ordered.field.name),
                    ordered.order.as_sql()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(self.append(&format!("ORDER BY {columns}")))
    }

    // Keyword clauses.

    #[must_use]
    pub fn select(self) -> Self {
        self.append("SELECT")
    }

    #[must_use]
    pub fn insert(self) -> Self {
        self.append("INSERT")
    }

    #[must_use]
    pub fn into(self) -> Self {
        self.append("INTO")
    }

    #[must_use]
    pub fn values(self) -> Self {
        self.append("VALUES")
    }

    #[must_use]
    pub fn update(self) -> Self {
        self.append("UPDATE")
    }

    #[must_use]
    pub fn set(self) -> Self {
        self.append("SET")
    }

    #[must_use]
    pub fn delete(self) -> Self {
        self.append("DELETE")
    }

    #[must_use]
    pub fn from(self) -> Self {
        self.append("FROM")
    }

    #[must_use]
    pub fn join(self) -> Self {
        self.append("JOIN")
    }

    #[must_use]
    pub fn on(self) -> Self {
        self.append("ON")
    }

    #[must_use]
    pub fn using(self) -> Self {
        self.append("USING")
    }

    #[must_use]
    pub fn merge(self) -> Self {
        self.append("MERGE")
    }

    #[must_use]
    pub fn as_alias(self, alias: &str) -> Self {
        self.append(&format!("AS {alias}"))
    }

    #[must_use]
    pub fn top(self, rows: usize) -> Self {
        self.append(&format!("TOP ({rows})"))
    }

    #[must_use]
    pub fn and(self) -> Self {
        self.append("AND")
    }

    #[must_use]
    pub fn or(self) -> Self {
        self.append("OR")
    }

    #[must_use]
    pub fn not(self) -> Self {
        self.append("NOT")
    }

    #[must_use]
    pub fn open_paren(self) -> Self {
        self.append("(")
    }

    #[must_use]
    pub fn close_paren(self) -> Self {
        self.append(")")
    }

    /// The IN keyword; named with a trailing underscore because `in` is a
    /// Rust keyword.
    #[must_use]
    pub fn in_(self) -> Self {
        self.append("IN")
    }

    #[must_use]
    pub fn between(self) -> Self {
        self.append("BETWEEN")
    }

    #[must_use]
    pub fn when(self) -> Self {
        self.append("WHEN")
    }

    #[must_use]
    pub fn matched(self) -> Self {
        self.append("MATCHED")
    }

    #[must_use]
    pub fn then(self) -> Self {
        self.append("THEN")
    }

    /// The statement terminator.
    #[must_use]
    pub fn end(self) -> Self {
        self.append(";")
    }
}

impl fmt::Display for StatementBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statement)
    }
}
