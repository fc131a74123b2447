use std::sync::Arc;

use repoql_core::{EntityDescriptor, MapProvider, Operation, PropertyDescriptor, Result};

mod definition;
mod yaml_runner;

pub use definition::{EntityDefinition, PropertyDefinition, load_entity_from_str};
pub use yaml_runner::{CaseResult, StatementCase, load_statement_cases_from_str, run_statement_case};

/// The two-property entity used throughout the statement tests.
#[must_use]
pub fn person_descriptor() -> EntityDescriptor {
    EntityDescriptor::new("Person", "Person")
        .with_property(PropertyDescriptor::new("Id").primary())
        .with_property(PropertyDescriptor::new("Name"))
}

/// An audit-style entity with per-operation ignores.
#[must_use]
pub fn audit_descriptor() -> EntityDescriptor {
    EntityDescriptor::new("AuditEntry", "audit.Entry")
        .with_property(PropertyDescriptor::new("Id").primary())
        .with_property(PropertyDescriptor::new("Actor"))
        .with_property(PropertyDescriptor::new("RecordedAt").ignored_for(Operation::Update))
}

/// Registers `entity` on a fresh provider and returns both.
pub fn provider_with(entity: EntityDescriptor) -> Result<(MapProvider, Arc<EntityDescriptor>)> {
    let provider = MapProvider::new();
    let entity = provider.register(entity)?;
    Ok((provider, entity))
}
