use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use crate::{DbType, Value};

/// Custom value conversion attached to one property.
///
/// `set` translates an entity-side value into its database representation
/// before binding; `get` translates a database value back.
pub trait PropertyHandler: Send + Sync {
    fn set(&self, value: Value) -> Value;
    fn get(&self, value: Value) -> Value;
}

/// Identity of a configured property within the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub entity: String,
    pub property: String,
}

impl PropertyKey {
    #[must_use]
    pub fn new(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            property: property.into(),
        }
    }
}

/// The configured overrides for one property.
#[derive(Clone, Default)]
pub struct PropertyOptions {
    pub column: Option<String>,
    pub db_type: Option<DbType>,
    pub handler: Option<Arc<dyn PropertyHandler>>,
}

impl fmt::Debug for PropertyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyOptions")
            .field("column", &self.column)
            .field("db_type", &self.db_type)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// Shared, internally synchronized store of per-property configuration.
///
/// Entries are created on first configuration and merged on every later one;
/// the latest setter per facet wins while untouched facets keep their prior
/// values. Entries are never removed.
#[derive(Debug, Default)]
pub struct PropertyOptionsRegistry {
    entries: Mutex<HashMap<PropertyKey, PropertyOptions>>,
}

impl PropertyOptionsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fluent configurator scoped to one property.
    #[must_use]
    pub fn configure(
        &self,
        entity: impl Into<String>,
        property: impl Into<String>,
    ) -> PropertyConfigurator<'_> {
        PropertyConfigurator {
            registry: self,
            key: PropertyKey::new(entity, property),
        }
    }

    /// Snapshot of the configured overrides, if any.
    #[must_use]
    pub fn options_for(&self, entity: &str, property: &str) -> Option<PropertyOptions> {
        let entries = self.entries.lock().expect("property options lock poisoned");
        entries
            .get(&PropertyKey::new(entity, property))
            .cloned()
    }

    fn update(&self, key: &PropertyKey, apply: impl FnOnce(&mut PropertyOptions)) {
        let mut entries = self.entries.lock().expect("property options lock poisoned");
        apply(entries.entry(key.clone()).or_default());
    }
}

/// Fluent configurator for one property; every setter merges into the
/// registry entry and returns the configurator for chaining.
#[derive(Debug)]
pub struct PropertyConfigurator<'a> {
    registry: &'a PropertyOptionsRegistry,
    key: PropertyKey,
}

impl PropertyConfigurator<'_> {
    pub fn column(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.registry.update(&self.key, |options| options.column = Some(name));
        self
    }

    pub fn db_type(self, db_type: DbType) -> Self {
        self.registry
            .update(&self.key, |options| options.db_type = Some(db_type));
        self
    }

    pub fn property_handler(self, handler: Arc<dyn PropertyHandler>) -> Self {
        self.registry
            .update(&self.key, |options| options.handler = Some(handler));
        self
    }

    #[must_use]
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }
}
