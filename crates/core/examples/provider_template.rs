//! Skeleton for a custom metadata provider.
//!
//! `MapProvider` covers explicitly registered mappings; other
//! entity-description mechanisms (attribute-derived, convention-based)
//! implement `MetadataProvider` themselves. This template derives columns by
//! convention: every property maps to a snake_case column and the table name
//! is used unqualified.

use repoql_core::{
    CommandMode, CommandModeCache, EntityDescriptor, MetadataProvider, Operation,
    PropertyDescriptor, Result, StatementGenerator, render,
};

#[derive(Debug, Default)]
struct ConventionProvider;

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() && index > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

impl MetadataProvider for ConventionProvider {
    fn properties_for(
        &self,
        entity: &EntityDescriptor,
        operation: Operation,
    ) -> Vec<PropertyDescriptor> {
        entity
            .properties
            .iter()
            .filter(|property| property.is_relevant_for(operation))
            .map(|property| {
                let mut resolved = property.clone();
                resolved.column = Some(snake_case(&property.name));
                resolved
            })
            .collect()
    }

    fn mapped_table_name(&self, entity: &EntityDescriptor) -> String {
        render::quote(&snake_case(&entity.table))
    }

    fn command_mode_hint(&self, entity: &EntityDescriptor) -> Option<CommandMode> {
        entity.command_mode
    }
}

fn main() -> Result<()> {
    let entity = EntityDescriptor::new("OrderLine", "OrderLine")
        .with_property(PropertyDescriptor::new("OrderId").primary())
        .with_property(PropertyDescriptor::new("LineNumber").primary())
        .with_property(PropertyDescriptor::new("Quantity"));

    let provider = ConventionProvider;
    let generator = StatementGenerator::new(&provider);

    let insert = generator.insert(&entity)?;
    assert_eq!(
        insert,
        "INSERT INTO [order_line] ( [order_id], [line_number], [quantity] ) \
         VALUES ( @OrderId, @LineNumber, @Quantity ) ;"
    );

    let merge = generator.merge(&entity, None)?;
    assert!(merge.contains("ON ( S.[order_id] = T.[order_id] AND S.[line_number] = T.[line_number] )"));

    let cache = CommandModeCache::new();
    assert_eq!(cache.resolve(&provider, &entity), CommandMode::InlineText);

    println!("{insert}");
    Ok(())
}
