//! Schema registry
//!
//! In-memory store of output contracts keyed by code. One registry is built
//! by the composition root and shared by reference (`Arc<SchemaRegistry>`)
//! with every layer that needs lookups.
//!
//! All access goes through a single reader/writer lock: `register` takes the
//! write side, `get_by_code` and `list_all` the read side. A poisoned lock is
//! recovered, since the map is never left half-updated by a panicking writer.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::contracts::{builtin_definitions, SchemaDefinition, SchemaSummary};

#[derive(Debug, Default)]
struct RegistryInner {
    entries: HashMap<String, Arc<SchemaDefinition>>,
    /// Codes in first-registration order
    order: Vec<String>,
}

/// Code-keyed store of schema definitions
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    inner: RwLock<RegistryInner>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in catalog
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.seed_builtins();
        registry
    }

    /// Register the built-in catalog. Repeated seeding rewrites identical
    /// content and leaves the order unchanged.
    pub fn seed_builtins(&self) {
        let count = self.register_all(builtin_definitions());
        tracing::debug!(count, "Seeded built-in output contracts");
    }

    /// Insert or replace the definition stored under `definition.code`.
    ///
    /// Returns the definition that was replaced, if any. A replaced code
    /// keeps its original position in [`list_all`](Self::list_all).
    pub fn register(&self, definition: SchemaDefinition) -> Option<Arc<SchemaDefinition>> {
        let code = definition.code.clone();
        let mut inner = self.write();
        let previous = inner.entries.insert(code.clone(), Arc::new(definition));
        if previous.is_none() {
            inner.order.push(code.clone());
        }
        drop(inner);

        tracing::debug!(code = %code, replaced = previous.is_some(), "Registered output contract");
        previous
    }

    /// Register several definitions in order; returns how many were given
    pub fn register_all<I>(&self, definitions: I) -> usize
    where
        I: IntoIterator<Item = SchemaDefinition>,
    {
        let mut count = 0;
        for definition in definitions {
            self.register(definition);
            count += 1;
        }
        count
    }

    /// Exact, case-sensitive lookup
    pub fn get_by_code(&self, code: &str) -> Option<Arc<SchemaDefinition>> {
        self.read().entries.get(code).cloned()
    }

    /// Snapshot of every definition in registration order
    pub fn list_all(&self) -> Vec<Arc<SchemaDefinition>> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|code| inner.entries.get(code).cloned())
            .collect()
    }

    /// Catalog listing (code, name, description) in registration order
    pub fn summaries(&self) -> Vec<SchemaSummary> {
        self.list_all().iter().map(|d| d.summary()).collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.read().entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
