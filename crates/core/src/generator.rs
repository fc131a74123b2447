use crate::{
    BuildError, CommandMode, CommandModeCache, ConditionGroup, EntityDescriptor, Field,
    MetadataProvider, Operation, OrderField, Result, StatementBuilder,
};

const MERGE_TARGET_ALIAS: &str = "T";
const MERGE_SOURCE_ALIAS: &str = "S";

/// One generated statement paired with its resolved execution mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub mode: CommandMode,
}

/// Canonical per-operation statement shapes over the fluent builder.
///
/// A generator is cheap to share: it borrows the provider and owns the
/// process-lifetime command-mode cache consulted by `generate`.
pub struct StatementGenerator<'a> {
    provider: &'a dyn MetadataProvider,
    mode_cache: CommandModeCache,
}

impl<'a> StatementGenerator<'a> {
    #[must_use]
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self {
            provider,
            mode_cache: CommandModeCache::new(),
        }
    }

    #[must_use]
    pub fn mode_cache(&self) -> &CommandModeCache {
        &self.mode_cache
    }

    /// Builds the statement for `operation` and resolves the entity's
    /// command mode through the cache.
    pub fn generate(
        &self,
        entity: &EntityDescriptor,
        operation: Operation,
        condition: Option<&dyn ConditionGroup>,
    ) -> Result<Statement> {
        let sql = match operation {
            Operation::Select => self.select(entity, condition, None, None)?,
            Operation::Insert => self.insert(entity)?,
            Operation::Update => self.update(entity, condition)?,
            Operation::Delete => self.delete(entity, condition)?,
            Operation::Merge => self.merge(entity, None)?,
        };
        let mode = self.mode_cache.resolve(self.provider, entity);
        Ok(Statement { sql, mode })
    }

    pub fn select(
        &self,
        entity: &EntityDescriptor,
        condition: Option<&dyn ConditionGroup>,
        order: Option<&[OrderField]>,
        top: Option<usize>,
    ) -> Result<String> {
        let mut builder = StatementBuilder::new(self.provider, entity).select();
        if let Some(rows) = top {
            builder = builder.top(rows);
        }
        builder = builder.fields(Operation::Select).from().table();
        if let Some(condition) = condition {
            builder = builder.where_group(condition);
        }
        if let Some(order) = order {
            builder = builder.order_by(order)?;
        }
        Ok(builder.end().into_string())
    }

    pub fn insert(&self, entity: &EntityDescriptor) -> Result<String> {
        Ok(StatementBuilder::new(self.provider, entity)
            .insert()
            .into()
            .table()
            .open_paren()
            .fields(Operation::Insert)
            .close_paren()
            .values()
            .open_paren()
            .parameters(Operation::Insert)
            .close_paren()
            .end()
            .into_string())
    }

    pub fn update(
        &self,
        entity: &EntityDescriptor,
        condition: Option<&dyn ConditionGroup>,
    ) -> Result<String> {
        let mut builder = StatementBuilder::new(self.provider, entity)
            .update()
            .table()
            .set()
            .fields_and_parameters(Operation::Update);
        if let Some(condition) = condition {
            builder = builder.where_group(condition);
        }
        Ok(builder.end().into_string())
    }

    pub fn delete(
        &self,
        entity: &EntityDescriptor,
        condition: Option<&dyn ConditionGroup>,
    ) -> Result<String> {
        let mut builder = StatementBuilder::new(self.provider, entity)
            .delete()
            .from()
            .table();
        if let Some(condition) = condition {
            builder = builder.where_group(condition);
        }
        Ok(builder.end().into_string())
    }

    /// Full MERGE shape: the parameter set is projected as the source table
    /// and matched against the target on the qualifier columns. Qualifiers
    /// default to the entity's primary properties.
    pub fn merge(&self, entity: &EntityDescriptor, qualifiers: Option<&[Field]>) -> Result<String> {
        // Qualifiers come from the resolved property set so column overrides
        // reach the ON clause.
        let default_qualifiers: Vec<Field> = self
            .provider
            .properties_for(entity, Operation::Merge)
            .iter()
            .filter(|property| property.primary)
            .map(|property| Field::named(property.column_name()))
            .collect();
        let qualifiers = match qualifiers {
            Some(fields) => fields,
            None => default_qualifiers.as_slice(),
        };
        if qualifiers.is_empty() {
            return Err(BuildError::MissingQualifiers {
                entity: entity.name.clone(),
            }
            .into());
        }

        let builder = StatementBuilder::new(self.provider, entity)
            .merge()
            .table()
            .as_alias(MERGE_TARGET_ALIAS)
            .using()
            .open_paren()
            .select()
            .parameters_as_fields(Operation::Merge)
            .close_paren()
            .as_alias(MERGE_SOURCE_ALIAS)
            .on()
            .open_paren()
            .join_qualifiers(qualifiers, MERGE_SOURCE_ALIAS, MERGE_TARGET_ALIAS)?
            .close_paren()
            .when()
            .matched()
            .then()
            .update()
            .set()
            .fields_and_parameters(Operation::Update)
            .when()
            .not()
            .matched()
            .then()
            .insert()
            .open_paren()
            .fields(Operation::Insert)
            .close_paren()
            .values()
            .open_paren()
            .parameters(Operation::Insert)
            .close_paren()
            .end();
        Ok(builder.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::StatementGenerator;
    use crate::{
        BuildError, CommandMode, EntityDescriptor, Error, Field, MapProvider, Operation,
        OrderField, PropertyDescriptor, RawCondition,
    };

    fn person_provider() -> (MapProvider, std::sync::Arc<EntityDescriptor>) {
        let provider = MapProvider::new();
        let entity = provider
            .register(
                EntityDescriptor::new("Person", "Person")
                    .with_property(PropertyDescriptor::new("Id").primary())
                    .with_property(PropertyDescriptor::new("Name")),
            )
            .expect("registration must succeed");
        (provider, entity)
    }

    #[test]
    fn select_with_condition_order_and_top() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let condition = RawCondition::new("([Name] = @Name)");
        let sql = generator
            .select(
                &entity,
                Some(&condition),
                Some(&[OrderField::descending("Id")]),
                Some(5),
            )
            .expect("select must build");
        assert_eq!(
            sql,
            "SELECT TOP (5) [Id], [Name] FROM [Person] WHERE ([Name] = @Name) ORDER BY [Id] DESC ;"
        );
    }

    #[test]
    fn insert_matches_the_canonical_shape() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let sql = generator.insert(&entity).expect("insert must build");
        assert_eq!(
            sql,
            "INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name ) ;"
        );
    }

    #[test]
    fn update_binds_fields_to_parameters() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let condition = RawCondition::new("([Id] = @Id)");
        let sql = generator
            .update(&entity, Some(&condition))
            .expect("update must build");
        assert_eq!(
            sql,
            "UPDATE [Person] SET [Id] = @Id, [Name] = @Name WHERE ([Id] = @Id) ;"
        );
    }

    #[test]
    fn delete_without_condition_has_no_field_list() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let sql = generator.delete(&entity, None).expect("delete must build");
        assert_eq!(sql, "DELETE FROM [Person] ;");
    }

    #[test]
    fn merge_defaults_to_primary_qualifiers() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let sql = generator.merge(&entity, None).expect("merge must build");
        assert_eq!(
            sql,
            "MERGE [Person] AS T USING ( SELECT @Id AS [Id], @Name AS [Name] ) AS S \
             ON ( S.[Id] = T.[Id] ) \
             WHEN MATCHED THEN UPDATE SET [Id] = @Id, [Name] = @Name \
             WHEN NOT MATCHED THEN INSERT ( [Id], [Name] ) VALUES ( @Id, @Name ) ;"
        );
    }

    #[test]
    fn merge_without_any_qualifier_fails_loudly() {
        let provider = MapProvider::new();
        let entity = provider
            .register(
                EntityDescriptor::new("Log", "Log")
                    .with_property(PropertyDescriptor::new("Message")),
            )
            .expect("registration must succeed");
        let generator = StatementGenerator::new(&provider);
        let error = generator
            .merge(&entity, None)
            .expect_err("merge without qualifiers must fail");
        assert!(matches!(
            error,
            Error::Build(BuildError::MissingQualifiers { .. })
        ));
    }

    #[test]
    fn generate_attaches_the_resolved_command_mode() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let statement = generator
            .generate(&entity, Operation::Insert, None)
            .expect("generate must build");
        assert_eq!(statement.mode, CommandMode::InlineText);
        assert!(statement.sql.starts_with("INSERT INTO [Person]"));
        assert_eq!(generator.mode_cache().len(), 1);
    }

    #[test]
    fn explicit_qualifiers_override_the_primary_key() {
        let (provider, entity) = person_provider();
        let generator = StatementGenerator::new(&provider);
        let sql = generator
            .merge(&entity, Some(&[Field::named("Name")]))
            .expect("merge must build");
        assert!(sql.contains("ON ( S.[Name] = T.[Name] )"));
    }
}
