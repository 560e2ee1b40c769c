//! Folio Core Library
//!
//! This crate provides the core functionality for Folio, including:
//! - Project registry (ordered in-memory collection with positional and stable-id addressing)
//! - Project service (the async, lock-guarded contract used by the web layer)
//! - Date and duration helpers for display and edit forms
//! - Configuration management

pub mod config;
pub mod dates;
pub mod error;
pub mod projects;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::projects::{
        EditableProject, IndexedProject, Project, ProjectDraft, ProjectRegistry, ProjectService,
        Technology, TechnologySet,
    };
}
