//! Warehouse registry
//!
//! The Registry owns every warehouse, keyed by a numeric id. Ids come from a
//! counter that only ever moves forward, so a deleted warehouse's id is
//! never handed out again.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::types::Container;
use crate::error::{Result, StockpileError};

/// A named warehouse and the container it owns
#[derive(Debug, Clone)]
pub struct Entry {
    /// Display name, editable after creation
    pub name: String,
    /// The stock held by this warehouse
    pub container: Container,
    /// When the warehouse was created
    pub created_at: DateTime<Utc>,
}

impl Entry {
    fn new(name: String, container: Container) -> Self {
        Self {
            name,
            container,
            created_at: Utc::now(),
        }
    }
}

/// Id-keyed collection of warehouses
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<u64, Entry>,
    /// Last id handed out; zero means none yet
    last_id: u64,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id. The first id is 1.
    pub fn allocate_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Create a warehouse and return its id
    pub fn create(&mut self, name: impl Into<String>, capacity: f64, initial_balance: f64) -> u64 {
        let id = self.allocate_id();
        let entry = Entry::new(name.into(), Container::new(capacity, initial_balance));
        tracing::debug!(id, name = %entry.name, capacity, initial_balance, "created warehouse");
        self.entries.insert(id, entry);
        id
    }

    /// Get a warehouse by id
    pub fn get(&self, id: u64) -> Result<&Entry> {
        self.entries.get(&id).ok_or(StockpileError::NotFound(id))
    }

    /// Get a mutable reference to a warehouse by id
    pub fn get_mut(&mut self, id: u64) -> Result<&mut Entry> {
        self.entries.get_mut(&id).ok_or(StockpileError::NotFound(id))
    }

    /// Change a warehouse's display name
    pub fn rename(&mut self, id: u64, new_name: impl Into<String>) -> Result<()> {
        let entry = self.get_mut(id)?;
        entry.name = new_name.into();
        tracing::debug!(id, name = %entry.name, "renamed warehouse");
        Ok(())
    }

    /// Delete a warehouse. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        match self.entries.remove(&id) {
            Some(entry) => tracing::debug!(id, name = %entry.name, "removed warehouse"),
            None => tracing::debug!(id, "remove of unknown warehouse ignored"),
        }
    }

    /// All warehouses, in ascending id order
    pub fn list(&self) -> Vec<(u64, &Entry)> {
        let mut entries: Vec<(u64, &Entry)> =
            self.entries.iter().map(|(id, entry)| (*id, entry)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Check if a warehouse exists
    pub fn exists(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Get the number of warehouses
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
