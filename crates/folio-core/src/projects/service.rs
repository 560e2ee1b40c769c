//! Project service
//!
//! The async interface the web layer talks to. Every operation takes the
//! registry lock for its whole duration, so appends, reads, replacements and
//! removals are linearized even when requests are handled concurrently.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::entity::{EditableProject, IndexedProject, Project, ProjectDraft};
use super::registry::ProjectRegistry;
use crate::error::Result;

/// Shared handle to the project registry
#[derive(Debug, Clone, Default)]
pub struct ProjectService {
    registry: Arc<RwLock<ProjectRegistry>>,
}

impl ProjectService {
    /// Create a service over an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service over an existing registry
    pub fn with_registry(registry: ProjectRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    /// Create a project from form input and append it. Returns its index.
    pub async fn create(&self, draft: ProjectDraft) -> Result<usize> {
        let project = Project::from_draft(draft)?;
        let id = project.id;
        let name = project.name.clone();

        let index = self.registry.write().await.append(project);
        info!(%id, index, name = %name, "Project created");
        Ok(index)
    }

    /// All projects in order with their current indices
    pub async fn list(&self) -> Vec<IndexedProject> {
        self.registry.read().await.indexed()
    }

    /// Number of registered projects
    pub async fn len(&self) -> usize {
        self.registry.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.registry.read().await.is_empty()
    }

    /// Get the project at a position
    pub async fn get(&self, index: usize) -> Result<Project> {
        let registry = self.registry.read().await;
        registry.get_at(index).cloned().inspect_err(|_| {
            debug!(index, len = registry.len(), "Project lookup out of range");
        })
    }

    /// Fetch a project for editing, with its dates back in ISO form.
    ///
    /// The project stays in the registry; nothing changes until
    /// [`ProjectService::update`] is called.
    pub async fn edit_fetch(&self, index: usize) -> Result<EditableProject> {
        let registry = self.registry.read().await;
        let project = registry.get_at(index)?;
        debug!(id = %project.id, index, "Project fetched for editing");
        project.to_editable(index)
    }

    /// Replace a project in place from edited form input. Returns its index.
    pub async fn update(&self, id: Uuid, draft: ProjectDraft) -> Result<usize> {
        let project = Project::from_draft(draft)?;

        let mut registry = self.registry.write().await;
        let previous = registry.replace(id, project).inspect_err(|_| {
            warn!(%id, "Update submitted for a project that no longer exists");
        })?;
        let index = registry.index_of(id).unwrap_or_default();

        info!(%id, index, previous = %previous.name, "Project updated");
        Ok(index)
    }

    /// Delete the project at a position. Later projects shift down by one.
    pub async fn delete(&self, index: usize) -> Result<Project> {
        let mut registry = self.registry.write().await;
        let removed = registry.remove_at(index).inspect_err(|_| {
            warn!(index, len = registry.len(), "Delete requested for missing project");
        })?;

        info!(id = %removed.id, index, name = %removed.name, "Project deleted");
        Ok(removed)
    }
}
