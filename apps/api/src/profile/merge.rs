//! Merge of an AI extraction into the canonical profile.
//!
//! Pure: always computes a full new `Profile` from the current value and the
//! extraction, never mutating in place, so a concurrent read can never see a
//! half-merged document. The policy is one-way fill: scalar fields overwrite
//! only when the extracted value is non-empty, lists replace wholesale when
//! non-empty, `currentWork` merges per field because it is a single object
//! rather than a list, and references are never touched.

use crate::import::parser::{RawAchievement, RawCurrentWork, RawExtraction, RawProject, RawSkill};

use super::models::{Achievement, CurrentWork, Profile, Project, Skill};

const DEFAULT_SKILL_LEVEL: &str = "Intermediate";
const DEFAULT_SKILL_CATEGORY: &str = "Technical";
const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
const DEFAULT_PROJECT_ROLE: &str = "Developer";
const DEFAULT_PROJECT_DURATION: &str = "Not specified";
const DEFAULT_ORGANIZATION: &str = "Unknown";
const DEFAULT_ACHIEVEMENT_TYPE: &str = "Professional";

pub fn merge_extraction(current: &Profile, extracted: &RawExtraction) -> Profile {
    let mut next = current.clone();

    fill(&mut next.personal_info.name, extracted.name.as_deref());
    fill(&mut next.personal_info.title, extracted.title.as_deref());
    fill(&mut next.personal_info.email, extracted.email.as_deref());
    fill(&mut next.personal_info.phone, extracted.phone.as_deref());
    fill(&mut next.personal_info.summary, extracted.summary.as_deref());
    if let Some(years) = &extracted.years_experience {
        let years = years.clone().into_string();
        fill(&mut next.personal_info.years_experience, Some(years.as_str()));
    }

    if let Some(skills) = &extracted.skills {
        if !skills.is_empty() {
            next.skills = skills.iter().map(normalize_skill).collect();
        }
    }

    if let Some(projects) = &extracted.projects {
        if !projects.is_empty() {
            next.projects = projects.iter().map(normalize_project).collect();
        }
    }

    if let Some(work) = &extracted.current_work {
        merge_current_work(&mut next.current_work, work);
    }

    if let Some(achievements) = &extracted.achievements {
        if !achievements.is_empty() {
            next.achievements = achievements.iter().map(normalize_achievement).collect();
        }
    }

    // References stay exclusively user-authored.
    next
}

/// Overwrites `dst` only when the candidate is present and non-empty after
/// trimming. An empty extraction never erases user-entered data.
fn fill(dst: &mut String, candidate: Option<&str>) {
    if let Some(value) = candidate {
        let value = value.trim();
        if !value.is_empty() {
            *dst = value.to_string();
        }
    }
}

fn normalize_skill(raw: &RawSkill) -> Skill {
    match raw {
        RawSkill::Name(name) => Skill {
            name: name.trim().to_string(),
            level: DEFAULT_SKILL_LEVEL.to_string(),
            category: DEFAULT_SKILL_CATEGORY.to_string(),
        },
        RawSkill::Detailed {
            name,
            level,
            category,
        } => Skill {
            name: text_or(name, ""),
            level: text_or(level, DEFAULT_SKILL_LEVEL),
            category: text_or(category, DEFAULT_SKILL_CATEGORY),
        },
    }
}

fn normalize_project(raw: &RawProject) -> Project {
    // name and title cross-fill so every downstream reader finds one.
    let label = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| raw.title.as_deref().map(str::trim).filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_PROJECT_NAME)
        .to_string();

    Project {
        name: label.clone(),
        title: label,
        description: text_or(&raw.description, ""),
        technologies: raw.technologies.clone().unwrap_or_default(),
        role: text_or(&raw.role, DEFAULT_PROJECT_ROLE),
        duration: text_or(&raw.duration, DEFAULT_PROJECT_DURATION),
        achievements: raw.achievements.clone().unwrap_or_default(),
        link: raw
            .link
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    }
}

/// Shallow per-field merge: extracted fields overwrite, absent fields
/// survive. This mirrors an object spread, not the list-replacement rule.
fn merge_current_work(dst: &mut CurrentWork, raw: &RawCurrentWork) {
    if let Some(company) = &raw.company {
        dst.company = company.trim().to_string();
    }
    if let Some(position) = &raw.position {
        dst.position = position.trim().to_string();
    }
    if let Some(duration) = &raw.duration {
        dst.duration = duration.trim().to_string();
    }
    if let Some(achievements) = &raw.achievements {
        dst.achievements = achievements.clone();
    }
    if let Some(responsibilities) = &raw.responsibilities {
        dst.responsibilities = responsibilities.clone();
    }
}

fn normalize_achievement(raw: &RawAchievement) -> Achievement {
    let year = raw
        .year
        .clone()
        .map(|y| y.into_string())
        .filter(|s| !s.trim().is_empty());
    let date = raw
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    // date and year cross-fill from each other.
    let resolved_year = year.clone().or_else(|| date.clone()).unwrap_or_default();
    let resolved_date = date.or(year).unwrap_or_default();

    Achievement {
        title: text_or(&raw.title, ""),
        description: text_or(&raw.description, ""),
        year: resolved_year,
        date: resolved_date,
        organization: text_or(&raw.organization, DEFAULT_ORGANIZATION),
        kind: text_or(&raw.kind, DEFAULT_ACHIEVEMENT_TYPE),
    }
}

fn text_or(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
