//! Project records and the inputs they are built from

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::error::{Error, Result};

/// Maximum length of a project name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a project description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// A technology a project can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    NodeJs,
    React,
    NextJs,
    TypeScript,
}

impl Technology {
    /// All technologies, in the order forms and pages show them
    pub const ALL: [Technology; 4] = [
        Technology::NodeJs,
        Technology::React,
        Technology::NextJs,
        Technology::TypeScript,
    ];

    /// Name of the checkbox carrying this technology in project forms
    pub fn form_field(&self) -> &'static str {
        match self {
            Technology::NodeJs => "nodejs",
            Technology::React => "reactjs",
            Technology::NextJs => "nextjs",
            Technology::TypeScript => "typescript",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Technology::NodeJs => "Node.js",
            Technology::React => "React",
            Technology::NextJs => "Next.js",
            Technology::TypeScript => "TypeScript",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of technologies enabled on a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnologySet(BTreeSet<Technology>);

impl TechnologySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every technology enabled
    pub fn all() -> Self {
        Technology::ALL.into_iter().collect()
    }

    /// Build from the four checkbox markers, in [`Technology::ALL`] order.
    ///
    /// A marker counts as selected when it is present and non-empty.
    pub fn from_markers<S: AsRef<str>>(markers: [Option<S>; 4]) -> Self {
        Technology::ALL
            .into_iter()
            .zip(markers)
            .filter(|(_, marker)| marker.as_ref().is_some_and(|m| !m.as_ref().is_empty()))
            .map(|(tech, _)| tech)
            .collect()
    }

    pub fn contains(&self, tech: Technology) -> bool {
        self.0.contains(&tech)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Technology> + '_ {
        self.0.iter().copied()
    }

    /// Fixed-order view used by pages: one flag per entry of [`Technology::ALL`]
    pub fn slots(&self) -> [bool; 4] {
        Technology::ALL.map(|tech| self.contains(tech))
    }
}

impl FromIterator<Technology> for TechnologySet {
    fn from_iter<I: IntoIterator<Item = Technology>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Raw project input as submitted through the create and edit forms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    /// ISO start date (`YYYY-MM-DD`)
    pub start_date: String,
    /// ISO end date (`YYYY-MM-DD`)
    pub end_date: String,
    pub description: String,
    pub technologies: TechnologySet,
}

impl ProjectDraft {
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_technologies(mut self, technologies: TechnologySet) -> Self {
        self.technologies = technologies;
        self
    }

    /// Check required fields and lengths.
    ///
    /// Dates are checked separately when they are converted.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(Error::validation("project-name", "Project name cannot be empty"));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(Error::validation(
                "project-name",
                format!("Project name must be {} characters or less", MAX_NAME_LEN),
            ));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::validation(
                "project-description",
                format!(
                    "Description must be {} characters or less",
                    MAX_DESCRIPTION_LEN
                ),
            ));
        }

        Ok(())
    }
}

/// A portfolio project as stored in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier, unaffected by the project's position in the registry
    pub id: Uuid,
    pub name: String,
    /// Display start date, e.g. `01 October 2022`
    pub start_date: String,
    /// Display end date
    pub end_date: String,
    /// Duration label computed when the project was created or last edited
    pub duration: String,
    pub description: String,
    pub technologies: TechnologySet,
}

impl Project {
    /// Build a project from form input, deriving display dates and the duration
    pub fn from_draft(draft: ProjectDraft) -> Result<Self> {
        draft.validate()?;

        let start_date = dates::to_display_date(&draft.start_date)?;
        let end_date = dates::to_display_date(&draft.end_date)?;
        let duration = dates::compute_duration(&draft.start_date, &draft.end_date)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            start_date,
            end_date,
            duration,
            description: draft.description,
            technologies: draft.technologies,
        })
    }

    /// Copy of this project with dates converted back to ISO form for an edit form
    pub fn to_editable(&self, index: usize) -> Result<EditableProject> {
        Ok(EditableProject {
            id: self.id,
            index,
            name: self.name.clone(),
            start_date: dates::to_editable_date(&self.start_date)?,
            end_date: dates::to_editable_date(&self.end_date)?,
            description: self.description.clone(),
            technologies: self.technologies.clone(),
        })
    }
}

/// A project prepared for an edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableProject {
    pub id: Uuid,
    /// Position of the project when the form was fetched
    pub index: usize,
    pub name: String,
    /// ISO start date
    pub start_date: String,
    /// ISO end date
    pub end_date: String,
    pub description: String,
    pub technologies: TechnologySet,
}

impl EditableProject {
    /// Turn the prefilled form back into a draft, as if resubmitted unchanged
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            description: self.description.clone(),
            technologies: self.technologies.clone(),
        }
    }
}

/// A project paired with its current position in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedProject {
    pub index: usize,
    pub project: Project,
}
