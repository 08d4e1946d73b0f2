use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmSettings;
use crate::profile::models::Project;
use crate::profile::store::load_profile;
use crate::state::AppState;

use super::prompts;

#[derive(Serialize)]
pub struct EnhanceResponse {
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub settings: LlmSettings,
}

/// POST /api/v1/enhance/summary — rewrites the stored personal summary.
pub async fn handle_enhance_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let profile = load_profile(&state.db, req.user_id)
        .await
        .map_err(AppError::Internal)?;
    let request = req
        .settings
        .to_request(prompts::summary_prompt(&profile.personal_info))?;
    let content = state.llm.generate(&request).await?;
    Ok(Json(EnhanceResponse { content }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    pub skill: String,
    pub level: String,
    #[serde(flatten)]
    pub settings: LlmSettings,
}

/// POST /api/v1/enhance/skill
pub async fn handle_enhance_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let request = req
        .settings
        .to_request(prompts::skill_prompt(&req.skill, &req.level))?;
    let content = state.llm.generate(&request).await?;
    Ok(Json(EnhanceResponse { content }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub project: Project,
    #[serde(flatten)]
    pub settings: LlmSettings,
}

/// POST /api/v1/enhance/project
pub async fn handle_enhance_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let request = req
        .settings
        .to_request(prompts::project_prompt(&req.project))?;
    let content = state.llm.generate(&request).await?;
    Ok(Json(EnhanceResponse { content }))
}
