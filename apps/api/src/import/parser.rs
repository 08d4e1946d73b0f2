//! Extraction parser — turns the model's free-form reply into `RawExtraction`.
//!
//! The reply shape is never guaranteed: models wrap JSON in Markdown fences,
//! return bare strings where arrays were requested, or emit numbers where
//! strings were asked for. Everything here is defensive: fences are stripped,
//! heterogeneous shapes are absorbed by untagged enums, and anything that is
//! not a JSON object fails loudly with a typed error.

use serde::Deserialize;
use tracing::warn;

use super::ImportError;

/// Loosely-typed extraction payload. Every field is optional — an absent
/// field means "no update", never "clear the existing value".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExtraction {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub years_experience: Option<LooseText>,
    pub skills: Option<Vec<RawSkill>>,
    pub projects: Option<Vec<RawProject>>,
    pub current_work: Option<RawCurrentWork>,
    pub achievements: Option<Vec<RawAchievement>>,
}

/// A scalar the model may return as a string or a number ("5+ years" vs 5).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseText {
    Text(String),
    Number(serde_json::Number),
}

impl LooseText {
    pub fn into_string(self) -> String {
        match self {
            LooseText::Text(s) => s,
            LooseText::Number(n) => n.to_string(),
        }
    }
}

/// Skills arrive either as bare strings ("Go") or as objects
/// ({"name": "Go", "level": "Expert"}).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSkill {
    Name(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        level: Option<String>,
        #[serde(default)]
        category: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProject {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCurrentWork {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAchievement {
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<LooseText>,
    pub date: Option<String>,
    pub organization: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Parses the model reply. Non-JSON is a `Parse` failure; valid JSON that is
/// not an object (or an object that cannot be read as an extraction) is
/// `MalformedData` — distinct, so the UI can suggest re-uploading instead of
/// reconfiguring the AI provider.
pub fn parse_extraction(raw: &str) -> Result<RawExtraction, ImportError> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!("extraction reply was not JSON: {e}");
        ImportError::Parse
    })?;

    if !value.is_object() {
        return Err(ImportError::MalformedData(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| ImportError::MalformedData(e.to_string()))
}

/// Strips a wrapping Markdown code fence, with or without a language tag.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // The language tag, if any, occupies the remainder of the fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
