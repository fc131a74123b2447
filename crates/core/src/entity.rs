use crate::{CommandMode, DbType, Operation};

/// Immutable description of one logical record type.
///
/// Descriptors are registered once, shared by reference for the process
/// lifetime, and identified by `name` in every keyed cache.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
    pub name: String,
    pub table: String,
    pub command_mode: Option<CommandMode>,
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            command_mode: None,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_command_mode(mut self, mode: CommandMode) -> Self {
        self.command_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Properties declared as part of the primary key, in declaration order.
    #[must_use]
    pub fn primary_properties(&self) -> Vec<PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|property| property.primary)
            .cloned()
            .collect()
    }
}

/// One declared property of an entity.
///
/// `column` and `db_type` start as the declared values; the metadata provider
/// overlays registry overrides onto the copies it hands to the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub column: Option<String>,
    pub db_type: Option<DbType>,
    pub primary: bool,
    pub ignored: Vec<Operation>,
}

impl PropertyDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            db_type: None,
            primary: false,
            ignored: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_db_type(mut self, db_type: DbType) -> Self {
        self.db_type = Some(db_type);
        self
    }

    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    #[must_use]
    pub fn ignored_for(mut self, operation: Operation) -> Self {
        self.ignored.push(operation);
        self
    }

    /// Column the property maps to: the override when set, the property name
    /// otherwise.
    #[must_use]
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_relevant_for(&self, operation: Operation) -> bool {
        !self.ignored.contains(&operation)
    }
}

/// A single named column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
}

impl Field {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A column reference with an ordering direction, for ORDER BY rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderField {
    pub field: Field,
    pub order: Order,
}

impl OrderField {
    #[must_use]
    pub fn ascending(name: impl Into<String>) -> Self {
        Self {
            field: Field::named(name),
            order: Order::Ascending,
        }
    }

    #[must_use]
    pub fn descending(name: impl Into<String>) -> Self {
        Self {
            field: Field::named(name),
            order: Order::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityDescriptor, PropertyDescriptor};
    use crate::Operation;

    #[test]
    fn column_name_prefers_the_override() {
        let plain = PropertyDescriptor::new("Id");
        assert_eq!(plain.column_name(), "Id");

        let mapped = PropertyDescriptor::new("Id").with_column("PersonId");
        assert_eq!(mapped.column_name(), "PersonId");
    }

    #[test]
    fn ignored_operations_exclude_the_property() {
        let property = PropertyDescriptor::new("CreatedAt").ignored_for(Operation::Update);
        assert!(property.is_relevant_for(Operation::Insert));
        assert!(!property.is_relevant_for(Operation::Update));
    }

    #[test]
    fn primary_properties_preserve_declaration_order() {
        let entity = EntityDescriptor::new("Pair", "Pair")
            .with_property(PropertyDescriptor::new("Left").primary())
            .with_property(PropertyDescriptor::new("Middle"))
            .with_property(PropertyDescriptor::new("Right").primary());

        let primary = entity.primary_properties();
        let names: Vec<&str> = primary.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Left", "Right"]);
    }
}
