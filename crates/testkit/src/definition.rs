use serde::Deserialize;

use repoql_core::{
    CommandMode, EntityDescriptor, MapProvider, MetadataError, Operation, PropertyDescriptor,
    Result,
};

/// Declarative entity shape shared by YAML statement cases and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityDefinition {
    pub name: String,
    pub table: String,
    pub command_mode: Option<String>,
    pub properties: Vec<PropertyDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyDefinition {
    pub name: String,
    pub column: Option<String>,
    pub db_type: Option<String>,
    pub primary: bool,
    pub ignore: Vec<String>,
}

impl EntityDefinition {
    /// Converts the declarative shape into a descriptor, resolving textual
    /// operation, db-type, and command-mode tags.
    pub fn into_descriptor(self) -> Result<EntityDescriptor> {
        let mut entity = EntityDescriptor::new(self.name, self.table);
        if let Some(mode) = self.command_mode {
            entity = entity.with_command_mode(parse_command_mode(&mode)?);
        }
        for property in self.properties {
            entity = entity.with_property(property.into_descriptor()?);
        }
        Ok(entity)
    }

    /// Builds a provider with this entity registered, returning both.
    pub fn into_provider(self) -> Result<(MapProvider, std::sync::Arc<EntityDescriptor>)> {
        let provider = MapProvider::new();
        let entity = provider.register(self.into_descriptor()?)?;
        Ok((provider, entity))
    }
}

impl PropertyDefinition {
    pub fn into_descriptor(self) -> Result<PropertyDescriptor> {
        let mut property = PropertyDescriptor::new(self.name);
        if let Some(column) = self.column {
            property = property.with_column(column);
        }
        if let Some(db_type) = self.db_type {
            property = property.with_db_type(db_type.parse()?);
        }
        if self.primary {
            property = property.primary();
        }
        for operation in self.ignore {
            let operation: Operation = operation.parse()?;
            property = property.ignored_for(operation);
        }
        Ok(property)
    }
}

fn parse_command_mode(value: &str) -> Result<CommandMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "inline_text" => Ok(CommandMode::InlineText),
        "precompiled_routine" => Ok(CommandMode::PrecompiledRoutine),
        _ => Err(MetadataError::UnknownCommandMode {
            value: value.to_string(),
        }
        .into()),
    }
}

/// Parses a single entity definition from YAML.
pub fn load_entity_from_str(yaml: &str) -> std::result::Result<EntityDefinition, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use super::load_entity_from_str;
    use repoql_core::{CommandMode, DbType, Operation};

    const PERSON_YAML: &str = "\
name: Person
table: dbo.Person
command_mode: precompiled_routine
properties:
  - name: Id
    column: PersonId
    db_type: bigint
    primary: true
  - name: Name
    ignore: [update]
";

    #[test]
    fn yaml_definitions_resolve_into_descriptors() {
        let definition = load_entity_from_str(PERSON_YAML)
            .unwrap_or_else(|error| panic!("yaml must parse: {error}"));
        let entity = definition
            .into_descriptor()
            .unwrap_or_else(|error| panic!("definition must resolve: {error}"));

        assert_eq!(entity.name, "Person");
        assert_eq!(entity.command_mode, Some(CommandMode::PrecompiledRoutine));
        assert_eq!(entity.properties.len(), 2);
        assert_eq!(entity.properties[0].column.as_deref(), Some("PersonId"));
        assert_eq!(entity.properties[0].db_type, Some(DbType::BigInt));
        assert!(entity.properties[0].primary);
        assert_eq!(entity.properties[1].ignored, [Operation::Update]);
    }

    #[test]
    fn unknown_tags_fail_resolution() {
        let definition = load_entity_from_str(
            "name: Bad\ntable: Bad\nproperties:\n  - name: Id\n    db_type: blob\n",
        )
        .unwrap_or_else(|error| panic!("yaml must parse: {error}"));
        let error = definition
            .into_descriptor()
            .expect_err("unknown db type must fail");
        assert!(error.to_string().contains("blob"));
    }

    #[test]
    fn unknown_yaml_keys_are_rejected() {
        let error = load_entity_from_str("name: X\ntable: X\nrows: 3\n")
            .expect_err("unknown keys must be rejected");
        assert!(error.to_string().contains("rows"));
    }
}
