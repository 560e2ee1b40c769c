//! Portfolio projects
//!
//! - `entity`: project records, form drafts, and technology tags
//! - `registry`: the ordered in-memory collection
//! - `service`: lock-guarded async access used by request handlers
//! - `seed`: demo projects for a fresh server

pub mod entity;
pub mod registry;
pub mod seed;
pub mod service;

pub use entity::{
    EditableProject, IndexedProject, Project, ProjectDraft, Technology, TechnologySet,
};
pub use registry::ProjectRegistry;
pub use seed::demo_projects;
pub use service::ProjectService;
