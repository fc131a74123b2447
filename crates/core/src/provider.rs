use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    CommandMode, EntityDescriptor, MetadataError, Operation, PropertyDescriptor,
    PropertyOptionsRegistry, Result, render,
};

/// Capability interface over entity metadata.
///
/// One implementation exists per entity-description mechanism; this crate
/// ships the explicitly-registered-mapping variant. Implementations must be
/// shareable across threads.
pub trait MetadataProvider: Send + Sync {
    /// Ordered properties relevant to `operation`, possibly empty, with any
    /// per-property overrides already applied.
    fn properties_for(
        &self,
        entity: &EntityDescriptor,
        operation: Operation,
    ) -> Vec<PropertyDescriptor>;

    /// Bracket-quoted, schema-qualified table name for the entity.
    fn mapped_table_name(&self, entity: &EntityDescriptor) -> String;

    /// Entity-level command-mode declaration, when one exists.
    fn command_mode_hint(&self, entity: &EntityDescriptor) -> Option<CommandMode>;
}

/// Metadata provider backed by explicitly registered descriptors.
///
/// Registration is insert-once; descriptors are immutable afterwards and
/// shared by `Arc`. The provider owns the property options registry and
/// overlays its overrides when handing property sets to the builder.
#[derive(Debug, Default)]
pub struct MapProvider {
    entities: RwLock<HashMap<String, Arc<EntityDescriptor>>>,
    options: PropertyOptionsRegistry,
}

impl MapProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, entity: EntityDescriptor) -> Result<Arc<EntityDescriptor>> {
        let mut entities = self.entities.write().expect("entity map lock poisoned");
        if entities.contains_key(&entity.name) {
            return Err(MetadataError::DuplicateEntity { name: entity.name }.into());
        }
        let descriptor = Arc::new(entity);
        entities.insert(descriptor.name.clone(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Fails fast on unresolvable entity names so malformed SQL is never
    /// produced downstream.
    pub fn entity(&self, name: &str) -> Result<Arc<EntityDescriptor>> {
        let entities = self.entities.read().expect("entity map lock poisoned");
        entities.get(name).cloned().ok_or_else(|| {
            MetadataError::UnknownEntity {
                name: name.to_string(),
            }
            .into()
        })
    }

    #[must_use]
    pub fn options(&self) -> &PropertyOptionsRegistry {
        &self.options
    }

    fn apply_overrides(&self, entity: &EntityDescriptor, property: &PropertyDescriptor) -> PropertyDescriptor {
        let mut resolved = property.clone();
        if let Some(options) = self.options.options_for(&entity.name, &property.name) {
            if let Some(column) = options.column {
                resolved.column = Some(column);
            }
            if let Some(db_type) = options.db_type {
                resolved.db_type = Some(db_type);
            }
        }
        resolved
    }
}

impl MetadataProvider for MapProvider {
    fn properties_for(
        &self,
        entity: &EntityDescriptor,
        operation: Operation,
    ) -> Vec<PropertyDescriptor> {
        entity
            .properties
            .iter()
            .filter(|property| property.is_relevant_for(operation))
            .map(|property| self.apply_overrides(entity, property))
            .collect()
    }

    fn mapped_table_name(&self, entity: &EntityDescriptor) -> String {
        render::quote_qualified(&entity.table)
    }

    fn command_mode_hint(&self, entity: &EntityDescriptor) -> Option<CommandMode> {
        entity.command_mode
    }
}
