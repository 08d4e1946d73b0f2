// Enhancement prompt builders. Unlike the ingestion prompts these interpolate
// several fields each, so they are functions rather than replace-templates.

use crate::profile::models::{PersonalInfo, Project};

pub fn summary_prompt(personal: &PersonalInfo) -> String {
    format!(
        "Create a compelling professional summary for someone with the following information:\n\
         Name: {}\n\
         Title: {}\n\
         Years of Experience: {}\n\
         Current Summary: {}\n\n\
         Make it impactful, concise (2-3 sentences), and tailored for job interviews. \
         Focus on achievements and value proposition.",
        personal.name, personal.title, personal.years_experience, personal.summary
    )
}

pub fn skill_prompt(skill: &str, level: &str) -> String {
    format!(
        "Create a brief, impressive description for this skill:\n\
         Skill: {skill}\n\
         Proficiency Level: {level}\n\n\
         Write 1-2 sentences that highlight expertise and practical application. \
         Make it sound professional and impactful."
    )
}

pub fn project_prompt(project: &Project) -> String {
    format!(
        "Enhance this project description to make it more impressive for interviews:\n\
         Title: {}\n\
         Description: {}\n\
         Technologies: {}\n\n\
         Rewrite the description to be more impactful, highlighting achievements, results, \
         and technical skills. Keep it concise but impressive.",
        project.title,
        project.description,
        project.technologies.join(", ")
    )
}
