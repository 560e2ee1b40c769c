//! In-memory project registry
//!
//! Projects are kept in insertion order. Each one can be addressed two ways:
//!
//! - by positional index (`0..len`), which is what pages link to. Indices are
//!   re-derived after every removal, so an index is only meaningful until the
//!   next mutation.
//! - by its stable [`Uuid`], which never changes for the life of the record.

use std::collections::HashMap;

use uuid::Uuid;

use super::entity::{IndexedProject, Project};
use crate::error::{Error, Result};

/// Ordered collection of projects
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    records: HashMap<Uuid, Project>,
    order: Vec<Uuid>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given projects in order
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let mut registry = Self::new();
        for project in projects {
            registry.append(project);
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Add a project at the end and return its index.
    ///
    /// A project whose id is already registered gets a fresh id so the map
    /// and the order never disagree.
    pub fn append(&mut self, mut project: Project) -> usize {
        if self.records.contains_key(&project.id) {
            project.id = Uuid::new_v4();
        }
        let index = self.order.len();
        self.order.push(project.id);
        self.records.insert(project.id, project);
        index
    }

    /// Get the project at a position
    pub fn get_at(&self, index: usize) -> Result<&Project> {
        let id = self.id_at(index)?;
        self.get(id)
    }

    /// Get a project by id
    pub fn get(&self, id: Uuid) -> Result<&Project> {
        self.records
            .get(&id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    /// Current position of a project
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Remove the project at a position, shifting later projects down by one.
    ///
    /// An out-of-range index leaves the registry untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<Project> {
        let id = self.id_at(index)?;
        self.order.remove(index);
        self.records
            .remove(&id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    /// Replace the project at a position, keeping its id and position.
    ///
    /// Returns the previous record.
    pub fn replace_at(&mut self, index: usize, project: Project) -> Result<Project> {
        let id = self.id_at(index)?;
        self.replace(id, project)
    }

    /// Replace a project by id, keeping its id and position
    pub fn replace(&mut self, id: Uuid, mut project: Project) -> Result<Project> {
        let slot = self
            .records
            .get_mut(&id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))?;
        project.id = id;
        Ok(std::mem::replace(slot, project))
    }

    /// Iterate projects in order
    pub fn iter(&self) -> impl Iterator<Item = &Project> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Projects in order, each paired with its current index
    pub fn indexed(&self) -> Vec<IndexedProject> {
        self.iter()
            .enumerate()
            .map(|(index, project)| IndexedProject {
                index,
                project: project.clone(),
            })
            .collect()
    }

    fn id_at(&self, index: usize) -> Result<Uuid> {
        self.order
            .get(index)
            .copied()
            .ok_or_else(|| Error::ProjectNotFound(index.to_string()))
    }
}
