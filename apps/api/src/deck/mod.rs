//! Slide-deck assembly — the structured data blob the export collaborators
//! (PowerPoint, print-to-PDF, Google Slides) render. Pure data: no byte
//! layouts, no pixels.

use serde::Serialize;

use crate::profile::models::{CurrentWork, Profile, Project, Skill};

/// Projects shown on the deck are capped; the full list stays in the profile.
const MAX_DECK_PROJECTS: usize = 3;

const FALLBACK_NAME: &str = "Your Name";
const FALLBACK_TITLE: &str = "Your Professional Title";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Slide {
    Title {
        content: TitleContent,
    },
    Content {
        title: String,
        content: String,
    },
    Skills {
        title: String,
        content: Vec<Skill>,
    },
    Work {
        title: String,
        content: CurrentWork,
    },
    Projects {
        title: String,
        content: Vec<Project>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleContent {
    pub title: String,
    pub subtitle: String,
    pub contact: String,
}

/// Builds the deck from a profile. The title slide always exists; every
/// other slide appears only when its section has content.
pub fn build_deck(profile: &Profile) -> Deck {
    let personal = &profile.personal_info;

    let display_name = if personal.name.is_empty() {
        FALLBACK_NAME
    } else {
        personal.name.as_str()
    };

    let mut slides = vec![Slide::Title {
        content: TitleContent {
            title: display_name.to_string(),
            subtitle: if personal.title.is_empty() {
                FALLBACK_TITLE.to_string()
            } else {
                personal.title.clone()
            },
            contact: format!("{} {}", personal.email, personal.phone)
                .trim()
                .to_string(),
        },
    }];

    if !personal.summary.is_empty() {
        slides.push(Slide::Content {
            title: "Professional Summary".to_string(),
            content: personal.summary.clone(),
        });
    }

    if !profile.skills.is_empty() {
        slides.push(Slide::Skills {
            title: "Skills & Expertise".to_string(),
            content: profile.skills.clone(),
        });
    }

    if !profile.current_work.company.is_empty() {
        slides.push(Slide::Work {
            title: "Current Role".to_string(),
            content: profile.current_work.clone(),
        });
    }

    if !profile.projects.is_empty() {
        slides.push(Slide::Projects {
            title: "Key Projects".to_string(),
            content: profile
                .projects
                .iter()
                .take(MAX_DECK_PROJECTS)
                .cloned()
                .collect(),
        });
    }

    Deck {
        title: format!(
            "{} Presentation",
            if personal.name.is_empty() {
                "Professional"
            } else {
                personal.name.as_str()
            }
        ),
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::PersonalInfo;

    #[test]
    fn test_empty_profile_yields_placeholder_title_slide_only() {
        let deck = build_deck(&Profile::default());
        assert_eq!(deck.title, "Professional Presentation");
        assert_eq!(deck.slides.len(), 1);
        match &deck.slides[0] {
            Slide::Title { content } => {
                assert_eq!(content.title, "Your Name");
                assert_eq!(content.subtitle, "Your Professional Title");
                assert_eq!(content.contact, "");
            }
            other => panic!("expected a title slide, got {other:?}"),
        }
    }

    #[test]
    fn test_populated_sections_become_slides_in_order() {
        let mut profile = Profile {
            personal_info: PersonalInfo {
                name: "Jane Doe".into(),
                title: "Engineer".into(),
                email: "jane@example.com".into(),
                summary: "Builds data platforms.".into(),
                ..PersonalInfo::default()
            },
            ..Profile::default()
        };
        profile.skills.push(Skill {
            name: "Rust".into(),
            level: "Expert".into(),
            category: "Technical".into(),
        });
        profile.current_work.company = "Initech".into();
        for i in 0..5 {
            profile.projects.push(Project {
                name: format!("Project {i}"),
                ..Project::default()
            });
        }

        let deck = build_deck(&profile);
        assert_eq!(deck.title, "Jane Doe Presentation");
        assert_eq!(deck.slides.len(), 5);
        assert!(matches!(deck.slides[1], Slide::Content { .. }));
        assert!(matches!(deck.slides[2], Slide::Skills { .. }));
        assert!(matches!(deck.slides[3], Slide::Work { .. }));
        match &deck.slides[4] {
            Slide::Projects { content, .. } => assert_eq!(content.len(), MAX_DECK_PROJECTS),
            other => panic!("expected projects slide, got {other:?}"),
        }
    }

    #[test]
    fn test_slides_tag_with_lowercase_type() {
        let deck = build_deck(&Profile::default());
        let value = serde_json::to_value(&deck).unwrap();
        assert_eq!(value["slides"][0]["type"], "title");
    }
}
