//! Completeness scoring over the profile document.
//!
//! Derived state, recomputed by callers after every merge or edit — the
//! merger itself knows nothing about scoring.

use super::models::Profile;

const SECTION_COUNT: u32 = 7;

/// Percentage of profile sections with enough content to present, rounded.
pub fn completeness_percent(profile: &Profile) -> u32 {
    let mut completed = 0u32;

    let personal = &profile.personal_info;
    if !personal.name.is_empty() && !personal.title.is_empty() && !personal.summary.is_empty() {
        completed += 1;
    }
    if !profile.profile_photo.is_empty() {
        completed += 1;
    }
    if !profile.skills.is_empty() {
        completed += 1;
    }
    if !profile.projects.is_empty() {
        completed += 1;
    }
    if !profile.current_work.company.is_empty() && !profile.current_work.position.is_empty() {
        completed += 1;
    }
    if !profile.achievements.is_empty() {
        completed += 1;
    }
    if !profile.references.is_empty() {
        completed += 1;
    }

    ((completed as f64 / SECTION_COUNT as f64) * 100.0).round() as u32
}

/// The preview unlocks once the title slide and skills slide have content.
pub fn is_ready_for_preview(profile: &Profile) -> bool {
    !profile.personal_info.name.is_empty()
        && !profile.personal_info.title.is_empty()
        && !profile.skills.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{CurrentWork, PersonalInfo, Skill};

    fn named_profile() -> Profile {
        Profile {
            personal_info: PersonalInfo {
                name: "Jane".into(),
                title: "Engineer".into(),
                summary: "Builds things.".into(),
                ..PersonalInfo::default()
            },
            ..Profile::default()
        }
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(completeness_percent(&Profile::default()), 0);
    }

    #[test]
    fn test_one_section_rounds_to_14() {
        assert_eq!(completeness_percent(&named_profile()), 14);
    }

    #[test]
    fn test_three_sections_round_to_43() {
        let mut profile = named_profile();
        profile.skills.push(Skill::default());
        profile.current_work = CurrentWork {
            company: "Initech".into(),
            position: "Engineer".into(),
            ..CurrentWork::default()
        };
        assert_eq!(completeness_percent(&profile), 43);
    }

    #[test]
    fn test_full_profile_scores_100() {
        let mut profile = named_profile();
        profile.profile_photo = "data:image/png;base64,...".into();
        profile.skills.push(Skill::default());
        profile.projects.push(Default::default());
        profile.current_work = CurrentWork {
            company: "Initech".into(),
            position: "Engineer".into(),
            ..CurrentWork::default()
        };
        profile.achievements.push(Default::default());
        profile.references.push(Default::default());
        assert_eq!(completeness_percent(&profile), 100);
    }

    #[test]
    fn test_preview_requires_name_title_and_a_skill() {
        let mut profile = named_profile();
        assert!(!is_ready_for_preview(&profile));
        profile.skills.push(Skill::default());
        assert!(is_ready_for_preview(&profile));
    }
}
