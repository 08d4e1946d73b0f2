//! The canonical profile document.
//!
//! One document per user, created empty, mutated only by whole-value
//! replacement: either a merge of an AI extraction or a direct edit from the
//! form collaborators. Field names serialize as camelCase because the stored
//! JSON doubles as the wire contract for the browser front-end.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "professional";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub years_experience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub level: String,
    pub category: String,
}

/// Both `name` and `title` are kept populated (cross-filled on merge) because
/// the preview and export collaborators read whichever one they grew up with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: String,
    pub duration: String,
    pub achievements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWork {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub achievements: Vec<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub year: String,
    pub date: String,
    pub organization: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// References are exclusively user-authored; the ingestion pipeline never
/// writes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub name: String,
    pub position: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub relationship: String,
    pub testimonial: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobDetails {
    pub job_title: String,
    pub company: String,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub current_work: CurrentWork,
    pub achievements: Vec<Achievement>,
    pub references: Vec<Reference>,
    pub profile_photo: String,
    pub theme: String,
    pub job_details: JobDetails,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            skills: Vec::new(),
            projects: Vec::new(),
            current_work: CurrentWork::default(),
            achievements: Vec::new(),
            references: Vec::new(),
            profile_photo: String::new(),
            theme: DEFAULT_THEME.to_string(),
            job_details: JobDetails::default(),
        }
    }
}
