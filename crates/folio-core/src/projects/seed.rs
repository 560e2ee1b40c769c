//! Demo projects loaded at startup

use super::entity::{Project, ProjectDraft, TechnologySet};
use crate::error::Result;

const LOREM: &str = "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium \
doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi \
architecto beatae vitae dicta sunt explicabo.";

/// The projects a fresh server starts with
pub fn demo_projects() -> Result<Vec<Project>> {
    let drafts = [
        ProjectDraft::new("Test Project Main", "2022-10-01", "2022-12-01")
            .with_description(LOREM)
            .with_technologies(TechnologySet::all()),
        ProjectDraft::new("Test Project Additional", "2022-10-20", "2022-11-21")
            .with_description(LOREM)
            .with_technologies(TechnologySet::from_markers([
                Some("checked"),
                None,
                None,
                Some("checked"),
            ])),
    ];

    drafts.into_iter().map(Project::from_draft).collect()
}
