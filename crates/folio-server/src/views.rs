//! HTML rendering
//!
//! Pages are plain strings; every user-supplied value goes through [`escape`].

use axum::http::StatusCode;
use folio_core::Error;
use folio_core::projects::{EditableProject, IndexedProject, Project, Technology, TechnologySet};

/// Escape text for use in HTML content and attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{}</title><link rel=\"stylesheet\" href=\"/public/css/style.css\"></head><body>\
<nav><a href=\"/\">Home</a> <a href=\"/project\">Add Project</a> <a href=\"/contact\">Contact Me</a></nav>\
<main>{}</main></body></html>",
        escape(title),
        body
    )
}

fn technology_badges(technologies: &TechnologySet) -> String {
    if technologies.is_empty() {
        return "<span class=\"muted\">No technologies selected</span>".to_string();
    }
    technologies
        .iter()
        .map(|tech| format!("<span class=\"tech\">{}</span>", escape(tech.label())))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn home(projects: &[IndexedProject]) -> String {
    let mut cards = String::new();
    for IndexedProject { index, project } in projects {
        cards.push_str(&format!(
            "<article class=\"project-card\">\
<h3><a href=\"/detail-project/{index}\">{name}</a></h3>\
<p class=\"duration\">Duration: {duration}</p>\
<p>{description}</p>\
<p>{techs}</p>\
<p class=\"actions\"><a href=\"/update-project/{index}\">Edit</a> \
<a href=\"/delete-project/{index}\">Delete</a></p>\
</article>",
            index = index,
            name = escape(&project.name),
            duration = escape(&project.duration),
            description = escape(&project.description),
            techs = technology_badges(&project.technologies),
        ));
    }
    if cards.is_empty() {
        cards.push_str("<p class=\"muted\">No projects yet. <a href=\"/project\">Add one</a>.</p>");
    }

    layout(
        "Home",
        &format!(
            "<section class=\"intro\"><h1>Welcome to my portfolio</h1>\
<p>Projects I have built, newest at the end.</p></section>\
<section class=\"projects\"><h2>My Projects</h2>{}</section>",
            cards
        ),
    )
}

pub fn contact() -> String {
    layout(
        "Contact Me",
        "<h1>Contact Me</h1>\
<form class=\"contact\" onsubmit=\"return false\">\
<label for=\"name\">Name</label><input id=\"name\" name=\"name\" type=\"text\">\
<label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\">\
<label for=\"subject\">Subject</label><input id=\"subject\" name=\"subject\" type=\"text\">\
<label for=\"message\">Message</label><textarea id=\"message\" name=\"message\"></textarea>\
<button type=\"submit\">Send</button></form>",
    )
}

struct FormValues<'a> {
    name: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    description: &'a str,
    technologies: &'a TechnologySet,
}

fn project_form_fields(values: &FormValues<'_>) -> String {
    let mut checkboxes = String::new();
    for tech in Technology::ALL {
        let checked = if values.technologies.contains(tech) {
            " checked"
        } else {
            ""
        };
        checkboxes.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"{field}\" value=\"checked\"{checked}> {label}</label>",
            field = tech.form_field(),
            checked = checked,
            label = escape(tech.label()),
        ));
    }

    format!(
        "<label for=\"project-name\">Project Name</label>\
<input id=\"project-name\" name=\"project-name\" type=\"text\" required value=\"{name}\">\
<label for=\"date-start\">Start Date</label>\
<input id=\"date-start\" name=\"date-start\" type=\"date\" required value=\"{start}\">\
<label for=\"date-end\">End Date</label>\
<input id=\"date-end\" name=\"date-end\" type=\"date\" required value=\"{end}\">\
<label for=\"project-description\">Description</label>\
<textarea id=\"project-description\" name=\"project-description\">{description}</textarea>\
<fieldset><legend>Technologies</legend>{checkboxes}</fieldset>",
        name = escape(values.name),
        start = escape(values.start_date),
        end = escape(values.end_date),
        description = escape(values.description),
        checkboxes = checkboxes,
    )
}

pub fn project_form() -> String {
    let empty = TechnologySet::new();
    let fields = project_form_fields(&FormValues {
        name: "",
        start_date: "",
        end_date: "",
        description: "",
        technologies: &empty,
    });
    layout(
        "Add Project",
        &format!(
            "<h1>Add My Project</h1>\
<form method=\"post\" action=\"/project/create\">{}<button type=\"submit\">Submit</button></form>",
            fields
        ),
    )
}

pub fn update_form(project: &EditableProject) -> String {
    let fields = project_form_fields(&FormValues {
        name: &project.name,
        start_date: &project.start_date,
        end_date: &project.end_date,
        description: &project.description,
        technologies: &project.technologies,
    });
    layout(
        "Edit Project",
        &format!(
            "<h1>Edit Project</h1>\
<form method=\"post\" action=\"/project/update/{id}\">{fields}\
<button type=\"submit\">Save</button> <a href=\"/detail-project/{index}\">Cancel</a></form>",
            id = project.id,
            fields = fields,
            index = project.index,
        ),
    )
}

pub fn project_detail(index: usize, project: &Project) -> String {
    layout(
        &project.name,
        &format!(
            "<article class=\"project-detail\"><h1>{name}</h1>\
<dl><dt>Start</dt><dd>{start}</dd><dt>End</dt><dd>{end}</dd>\
<dt>Duration</dt><dd>{duration}</dd></dl>\
<h2>Technologies</h2><p>{techs}</p>\
<h2>Description</h2><p>{description}</p>\
<p class=\"actions\"><a href=\"/update-project/{index}\">Edit</a> \
<a href=\"/delete-project/{index}\">Delete</a></p></article>",
            name = escape(&project.name),
            start = escape(&project.start_date),
            end = escape(&project.end_date),
            duration = escape(&project.duration),
            techs = technology_badges(&project.technologies),
            description = escape(&project.description),
            index = index,
        ),
    )
}

pub fn error_page(status: StatusCode, err: &Error) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let suggestion = err
        .suggestion()
        .map(|s| format!("<p class=\"suggestion\">{}</p>", escape(&s)))
        .unwrap_or_default();

    layout(
        reason,
        &format!(
            "<h1>{code} {reason}</h1><p class=\"error\" data-code=\"{err_code}\">{message}</p>{suggestion}\
<p><a href=\"/\">Back to home</a></p>",
            code = status.as_u16(),
            reason = escape(reason),
            err_code = err.code(),
            message = escape(&err.to_string()),
            suggestion = suggestion,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::projects::ProjectDraft;

    fn sample() -> Project {
        Project::from_draft(
            ProjectDraft::new("<b>Site</b>", "2022-10-01", "2022-12-01")
                .with_description("Tom & Jerry")
                .with_technologies(TechnologySet::from_markers([
                    Some("checked"),
                    None,
                    None,
                    Some("checked"),
                ])),
        )
        .unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_home_lists_projects_with_indices() {
        let projects = vec![
            IndexedProject {
                index: 0,
                project: sample(),
            },
            IndexedProject {
                index: 1,
                project: sample(),
            },
        ];
        let html = home(&projects);
        assert!(html.contains("href=\"/detail-project/1\""));
        assert!(html.contains("href=\"/delete-project/0\""));
        assert!(html.contains("&lt;b&gt;Site&lt;/b&gt;"));
        assert!(!html.contains("<b>Site</b>"));
        assert!(html.contains("Duration: 2 Months"));
    }

    #[test]
    fn test_home_empty() {
        assert!(home(&[]).contains("No projects yet"));
    }

    #[test]
    fn test_detail_shows_dates_and_technologies() {
        let html = project_detail(4, &sample());
        assert!(html.contains("01 October 2022"));
        assert!(html.contains("01 December 2022"));
        assert!(html.contains("Node.js"));
        assert!(html.contains("TypeScript"));
        assert!(!html.contains(">React<"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("/update-project/4"));
    }

    #[test]
    fn test_update_form_prefills_iso_dates_and_checkboxes() {
        let editable = sample().to_editable(2).unwrap();
        let html = update_form(&editable);
        assert!(html.contains(&format!("action=\"/project/update/{}\"", editable.id)));
        assert!(html.contains("value=\"2022-10-01\""));
        assert!(html.contains("value=\"2022-12-01\""));
        assert!(html.contains("name=\"nodejs\" value=\"checked\" checked"));
        assert!(html.contains("name=\"reactjs\" value=\"checked\">"));
        assert!(html.contains("name=\"typescript\" value=\"checked\" checked"));
    }

    #[test]
    fn test_create_form_posts_to_create() {
        let html = project_form();
        assert!(html.contains("action=\"/project/create\""));
        for tech in Technology::ALL {
            assert!(html.contains(&format!("name=\"{}\"", tech.form_field())));
        }
    }

    #[test]
    fn test_error_page() {
        let err = Error::ProjectNotFound("7".into());
        let html = error_page(StatusCode::NOT_FOUND, &err);
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("data-code=\"E001\""));
        assert!(html.contains("Back to home"));
    }
}
