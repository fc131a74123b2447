use std::{
    collections::HashMap,
    sync::RwLock,
    time::SystemTime,
};

use crate::{EntityDescriptor, MetadataProvider};

/// How an entity's statements reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandMode {
    /// Inline statement text, the default.
    #[default]
    InlineText,
    /// A precompiled routine declared on the entity.
    PrecompiledRoutine,
}

impl CommandMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InlineText => "inline_text",
            Self::PrecompiledRoutine => "precompiled_routine",
        }
    }
}

/// Generic keyed-cache entry.
///
/// The timestamp records entry creation for future eviction policies; no
/// eviction is implemented and entries live for the process lifetime.
#[derive(Debug, Clone)]
pub struct CacheItem<V> {
    key: String,
    value: V,
    timestamp: SystemTime,
}

impl<V> CacheItem<V> {
    #[must_use]
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
            timestamp: SystemTime::now(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// Memoizes the command mode per entity descriptor.
///
/// Resolution happens at most once per descriptor name: the fast path is a
/// shared read, and a miss upgrades to a write lock where the first inserted
/// entry wins. The underlying inspection is pure, so a lost race recomputes
/// the identical value and then observes the winner's entry.
#[derive(Debug, Default)]
pub struct CommandModeCache {
    entries: RwLock<HashMap<String, CacheItem<CommandMode>>>,
}

impl CommandModeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the command mode for `entity`, consulting the provider's
    /// entity-level hint on first access only.
    pub fn resolve(&self, provider: &dyn MetadataProvider, entity: &EntityDescriptor) -> CommandMode {
        if let Some(mode) = self.lookup(&entity.name) {
            return mode;
        }

        let computed = provider.command_mode_hint(entity).unwrap_or_default();

        let mut entries = self
            .entries
            .write()
            .expect("command mode cache lock poisoned");
        *entries
            .entry(entity.name.clone())
            .or_insert_with(|| CacheItem::new(entity.name.clone(), computed))
            .value()
    }

    fn lookup(&self, key: &str) -> Option<CommandMode> {
        let entries = self
            .entries
            .read()
            .expect("command mode cache lock poisoned");
        entries.get(key).map(|item| *item.value())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("command mode cache lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
